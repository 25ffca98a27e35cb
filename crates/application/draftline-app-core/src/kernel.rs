use draftline_core::{
    export_artifacts, Action, PipelineState, Stage, StageError, StepDataPatch, UiStatePatch,
};
use tracing::debug;

use crate::orchestrator::StageOrchestrator;
use crate::ports::{CodeGenerator, DocumentSource, ExportSink, MarkupTransformer};
use crate::store::WorkflowStore;
use crate::viewmodel::{workflow_vm, WorkflowVm};

/// The surface a presentation layer binds to: a state snapshot plus actions.
pub struct WorkflowKernel<D, T, G> {
    pub store: WorkflowStore,
    orchestrator: StageOrchestrator<D, T, G>,
}

impl<D, T, G> WorkflowKernel<D, T, G>
where
    D: DocumentSource,
    T: MarkupTransformer,
    G: CodeGenerator,
{
    pub fn new(source: D, transformer: T, generator: G) -> Self {
        Self::with_store(WorkflowStore::default(), source, transformer, generator)
    }

    pub fn with_store(store: WorkflowStore, source: D, transformer: T, generator: G) -> Self {
        let orchestrator = StageOrchestrator::new(store.clone(), source, transformer, generator);
        Self {
            store,
            orchestrator,
        }
    }

    pub fn snapshot(&self) -> PipelineState {
        self.store.state()
    }

    pub fn view(&self) -> WorkflowVm {
        workflow_vm(&self.store.state())
    }

    fn merge(&self, patch: StepDataPatch) {
        self.store.apply(Action::MergeStepData(patch));
    }

    pub fn set_source_url(&self, url: impl Into<String>) {
        self.merge(StepDataPatch {
            source_url: Some(url.into()),
            ..Default::default()
        });
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        self.merge(StepDataPatch {
            access_token: Some(token.into()),
            ..Default::default()
        });
    }

    pub fn set_style_text(&self, css: impl Into<String>) {
        self.merge(StepDataPatch {
            style_text: Some(css.into()),
            ..Default::default()
        });
    }

    pub fn set_user_markup(&self, markup: impl Into<String>) {
        self.merge(StepDataPatch {
            user_markup: Some(markup.into()),
            ..Default::default()
        });
    }

    pub fn set_user_style(&self, css: impl Into<String>) {
        self.merge(StepDataPatch {
            user_style: Some(css.into()),
            ..Default::default()
        });
    }

    pub fn toggle_panel(&self, stage: Stage) {
        self.store.apply(Action::ToggleExpanded(stage));
    }

    pub fn set_preview(&self, show: bool) {
        self.store.apply(Action::MergeUiState(UiStatePatch {
            show_preview: Some(show),
            ..Default::default()
        }));
    }

    pub async fn run_connect(&self) -> Result<(), StageError> {
        self.orchestrator.run_connect().await
    }

    pub async fn run_convert(&self, markup_override: Option<String>) -> Result<(), StageError> {
        self.orchestrator.run_convert(markup_override).await
    }

    pub fn run_style(&self) -> Result<(), StageError> {
        self.orchestrator.run_style()
    }

    pub async fn run_finalize(&self) -> Result<(), StageError> {
        self.orchestrator.run_finalize().await
    }

    /// Hand the final component and stylesheet to `sink`.
    ///
    /// Does nothing and returns `Ok(false)` until both outputs exist.
    pub fn export(&self, sink: &dyn ExportSink) -> anyhow::Result<bool> {
        let data = self.store.state().step_data;
        let Some(artifacts) = export_artifacts(&data.final_markup, &data.final_style) else {
            debug!("export skipped: final outputs not ready");
            return Ok(false);
        };
        sink.deliver_all(&artifacts)?;
        Ok(true)
    }

    pub fn reset_all(&self) {
        self.store.apply(Action::ResetAll);
    }
}
