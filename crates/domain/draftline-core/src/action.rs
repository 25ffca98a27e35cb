use std::collections::BTreeMap;
use std::sync::Arc;

use crate::stage::{Stage, StageStatus};
use crate::state::DocumentBundle;

/// Field-level overwrite of [`crate::StepData`]; `None` keeps the prior value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepDataPatch {
    pub source_url: Option<String>,
    pub access_token: Option<String>,
    pub bundle: Option<Arc<DocumentBundle>>,
    pub vector_markup: Option<String>,
    pub component_source: Option<String>,
    pub style_text: Option<String>,
    pub user_markup: Option<String>,
    pub user_style: Option<String>,
    pub final_markup: Option<String>,
    pub final_style: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStatusPatch {
    pub connect: Option<StageStatus>,
    pub convert: Option<StageStatus>,
    pub style: Option<StageStatus>,
    pub finalize: Option<StageStatus>,
}

impl StepStatusPatch {
    pub fn single(stage: Stage, status: StageStatus) -> Self {
        let mut patch = Self::default();
        match stage {
            Stage::Connect => patch.connect = Some(status),
            Stage::Convert => patch.convert = Some(status),
            Stage::Style => patch.style = Some(status),
            Stage::Finalize => patch.finalize = Some(status),
        }
        patch
    }

    pub(crate) fn entries(&self) -> [(Stage, Option<StageStatus>); 4] {
        [
            (Stage::Connect, self.connect),
            (Stage::Convert, self.convert),
            (Stage::Style, self.style),
            (Stage::Finalize, self.finalize),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiStatePatch {
    pub expanded: Option<BTreeMap<Stage, bool>>,
    pub show_preview: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressPatch {
    pub current: Option<u8>,
    pub total: Option<u8>,
    pub message: Option<String>,
}

impl ProgressPatch {
    pub fn stage(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            current: Some(stage.number()),
            total: None,
            message: Some(message.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MergeStepData(StepDataPatch),
    MergeStepStatus(StepStatusPatch),
    MergeUiState(UiStatePatch),
    SetError { stage: Stage, message: String },
    ClearErrors,
    ToggleExpanded(Stage),
    MergeProgress(ProgressPatch),
    ResetAll,
}
