use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stage::{Stage, StageStatus};

/// Everything fetched for one design file during the connect stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBundle {
    pub file_id: String,
    pub document: Value,
    pub metadata: Value,
    pub components: Value,
    pub styles: Value,
    pub retrieved_at: DateTime<Utc>,
}

impl DocumentBundle {
    /// Best-effort document name: the tree's own name, then the metadata's.
    pub fn name(&self) -> Option<&str> {
        self.document
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| self.metadata.get("name").and_then(Value::as_str))
    }
}

/// Summary written into the header of generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub component_count: usize,
    pub style_count: usize,
}

impl DocumentMeta {
    pub fn from_bundle(bundle: &DocumentBundle, generated_at: DateTime<Utc>) -> Self {
        Self {
            name: bundle.name().unwrap_or("Untitled").to_string(),
            generated_at,
            component_count: count_entries(&bundle.components, "components"),
            style_count: count_entries(&bundle.styles, "styles"),
        }
    }
}

// Collections come back either bare or wrapped as `{ "meta": { "<key>": [...] } }`.
fn count_entries(value: &Value, key: &str) -> usize {
    fn len_of(v: &Value) -> usize {
        match v {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    match value {
        Value::Object(map) => {
            if let Some(inner) = map.get("meta").and_then(|m| m.get(key)) {
                len_of(inner)
            } else if let Some(inner) = map.get(key) {
                len_of(inner)
            } else {
                map.len()
            }
        }
        other => len_of(other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepData {
    pub source_url: String,
    pub access_token: String,
    pub bundle: Option<Arc<DocumentBundle>>,
    pub vector_markup: String,
    pub component_source: String,
    pub style_text: String,
    pub user_markup: String,
    pub user_style: String,
    pub final_markup: String,
    pub final_style: String,
}

impl Default for StepData {
    fn default() -> Self {
        Self {
            source_url: draftline_config::DEFAULT_SOURCE_URL.to_string(),
            access_token: String::new(),
            bundle: None,
            vector_markup: String::new(),
            component_source: String::new(),
            style_text: String::new(),
            user_markup: String::new(),
            user_style: String::new(),
            final_markup: String::new(),
            final_style: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStatuses {
    pub connect: StageStatus,
    pub convert: StageStatus,
    pub style: StageStatus,
    pub finalize: StageStatus,
}

impl StepStatuses {
    pub fn get(&self, stage: Stage) -> StageStatus {
        match stage {
            Stage::Connect => self.connect,
            Stage::Convert => self.convert,
            Stage::Style => self.style,
            Stage::Finalize => self.finalize,
        }
    }

    pub fn slot_mut(&mut self, stage: Stage) -> &mut StageStatus {
        match stage {
            Stage::Connect => &mut self.connect,
            Stage::Convert => &mut self.convert,
            Stage::Style => &mut self.style,
            Stage::Finalize => &mut self.finalize,
        }
    }

    pub fn is_running(&self) -> bool {
        Stage::ALL.iter().any(|s| self.get(*s).is_loading())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub current: u8,
    pub total: u8,
    pub message: String,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current: 0,
            total: draftline_config::TOTAL_STAGES,
            message: String::new(),
        }
    }
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        f32::from(self.current.min(self.total)) / f32::from(self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub expanded: BTreeMap<Stage, bool>,
    pub show_preview: bool,
    pub errors: BTreeMap<Stage, String>,
    pub progress: Progress,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            expanded: Stage::ALL
                .iter()
                .map(|s| (*s, *s == Stage::Connect))
                .collect(),
            show_preview: false,
            errors: BTreeMap::new(),
            progress: Progress::default(),
        }
    }
}

impl UiState {
    pub fn is_expanded(&self, stage: Stage) -> bool {
        self.expanded.get(&stage).copied().unwrap_or(false)
    }

    pub fn error(&self, stage: Stage) -> Option<&str> {
        self.errors.get(&stage).map(String::as_str)
    }
}

/// The single root a workflow session renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineState {
    pub step_data: StepData,
    pub step_status: StepStatuses,
    pub ui: UiState,
}

impl PipelineState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn status(&self, stage: Stage) -> StageStatus {
        self.step_status.get(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(components: Value, styles: Value) -> DocumentBundle {
        DocumentBundle {
            file_id: "abc".into(),
            document: json!({ "name": "Landing" }),
            metadata: json!({}),
            components,
            styles,
            retrieved_at: Utc::now(),
        }
    }

    #[test]
    fn meta_counts_nested_and_bare_collections() {
        let b = bundle(
            json!({ "meta": { "components": [{}, {}, {}] } }),
            json!([{}, {}]),
        );
        let meta = DocumentMeta::from_bundle(&b, Utc::now());
        assert_eq!(meta.name, "Landing");
        assert_eq!(meta.component_count, 3);
        assert_eq!(meta.style_count, 2);
    }

    #[test]
    fn name_falls_back_to_metadata_then_untitled() {
        let mut b = bundle(json!([]), json!([]));
        b.document = json!({});
        b.metadata = json!({ "name": "From meta" });
        assert_eq!(b.name(), Some("From meta"));

        b.metadata = Value::Null;
        assert_eq!(DocumentMeta::from_bundle(&b, Utc::now()).name, "Untitled");
    }

    #[test]
    fn initial_ui_expands_only_the_connect_panel() {
        let ui = UiState::default();
        assert!(ui.is_expanded(Stage::Connect));
        assert!(!ui.is_expanded(Stage::Finalize));
        assert_eq!(ui.progress.total, 4);
    }
}
