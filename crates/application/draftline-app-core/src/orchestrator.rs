use std::sync::Arc;

use chrono::Utc;
use draftline_core::{
    assemble_outputs, classify_connect_error, classify_convert_error, contains_vector_element,
    require_custom_input, Action, DocumentBundle, DocumentMeta, ErrorKind, PipelineState,
    ProgressPatch, SpliceOutcome, Stage, StageError, StageStatus, StepDataPatch, StepStatusPatch,
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::options::{GenerationConfig, TransformOptions};
use crate::ports::{CodeGenerator, DocumentSource, MarkupTransformer};
use crate::store::WorkflowStore;

enum ConvertInput {
    Bundle(Arc<DocumentBundle>),
    Manual(Option<String>),
}

/// Runs the four workflow stages against the external collaborators.
///
/// Each stage moves `Loading -> Success | Error` and records failures in the
/// per-stage error map. Only a successful connect chains into convert; style
/// and finalize always wait for an explicit call.
pub struct StageOrchestrator<D, T, G> {
    store: WorkflowStore,
    source: Arc<D>,
    transformer: Arc<T>,
    generator: Arc<G>,
}

impl<D, T, G> StageOrchestrator<D, T, G>
where
    D: DocumentSource,
    T: MarkupTransformer,
    G: CodeGenerator,
{
    pub fn new(store: WorkflowStore, source: D, transformer: T, generator: G) -> Self {
        Self {
            store,
            source: Arc::new(source),
            transformer: Arc::new(transformer),
            generator: Arc::new(generator),
        }
    }

    pub fn store(&self) -> &WorkflowStore {
        &self.store
    }

    pub async fn run_connect(&self) -> Result<(), StageError> {
        let span = info_span!("connect", run_id = %Uuid::new_v4());
        self.connect().instrument(span).await
    }

    /// Convert stored (or freshly supplied) vector markup into component source.
    pub async fn run_convert(&self, markup_override: Option<String>) -> Result<(), StageError> {
        let span = info_span!("convert", run_id = %Uuid::new_v4());
        self.convert(ConvertInput::Manual(markup_override))
            .instrument(span)
            .await
    }

    pub fn run_style(&self) -> Result<(), StageError> {
        let _span = info_span!("style", run_id = %Uuid::new_v4()).entered();
        self.ensure_not_running(Stage::Style)?;

        if self.store.state().step_data.style_text.trim().is_empty() {
            return Err(self.reject(
                Stage::Style,
                StageError::validation("Add some styles before continuing"),
            ));
        }

        self.begin(Stage::Style, "Applying styles...")?;
        self.commit(Stage::Style, StepDataPatch::default(), "Styles ready")
    }

    pub async fn run_finalize(&self) -> Result<(), StageError> {
        let span = info_span!("finalize", run_id = %Uuid::new_v4());
        self.finalize().instrument(span).await
    }

    async fn connect(&self) -> Result<(), StageError> {
        self.ensure_not_running(Stage::Connect)?;

        let data = self.store.state().step_data;
        let url = data.source_url.trim();
        let token = data.access_token.trim();
        if url.is_empty() || token.is_empty() {
            return Err(self.reject(
                Stage::Connect,
                StageError::validation("Enter both the design file URL and an access token"),
            ));
        }

        self.begin(Stage::Connect, "Validating design file URL...")?;

        let bundle = match self.fetch_bundle(url, token).await {
            Ok(bundle) => Arc::new(bundle),
            Err(e) => return Err(self.fail(Stage::Connect, e)),
        };
        info!(file_id = %bundle.file_id, "design file fetched");

        self.commit(
            Stage::Connect,
            StepDataPatch {
                bundle: Some(bundle.clone()),
                ..Default::default()
            },
            "Design file loaded",
        )?;

        // Convert reports its own outcome through the store.
        let _ = self.convert(ConvertInput::Bundle(bundle)).await;
        Ok(())
    }

    async fn fetch_bundle(&self, url: &str, token: &str) -> Result<DocumentBundle, StageError> {
        let connect_err = |e: anyhow::Error| classify_connect_error(&format!("{e:#}"));

        let check = self
            .source
            .validate_reference(url)
            .await
            .map_err(connect_err)?;
        if !check.valid {
            return Err(StageError::validation(
                check
                    .error
                    .unwrap_or_else(|| "Invalid design file URL".to_string()),
            ));
        }

        self.progress(Stage::Connect, "Fetching design document...");
        let document = self
            .source
            .fetch_document(&check.id, token)
            .await
            .map_err(connect_err)?;

        self.progress(Stage::Connect, "Fetching metadata, components and styles...");
        let metadata = self
            .source
            .fetch_metadata(&check.id, token)
            .await
            .map_err(connect_err)?;
        let components = self
            .source
            .fetch_components(&check.id, token)
            .await
            .map_err(connect_err)?;
        let styles = self
            .source
            .fetch_styles(&check.id, token)
            .await
            .map_err(connect_err)?;

        Ok(DocumentBundle {
            file_id: check.id,
            document,
            metadata,
            components,
            styles,
            retrieved_at: Utc::now(),
        })
    }

    async fn convert(&self, input: ConvertInput) -> Result<(), StageError> {
        self.ensure_not_running(Stage::Convert)?;

        let markup = match input {
            ConvertInput::Manual(markup_override) => {
                if let Some(markup) = markup_override.filter(|m| !m.trim().is_empty()) {
                    self.store.apply(Action::MergeStepData(StepDataPatch {
                        vector_markup: Some(markup),
                        ..Default::default()
                    }));
                }
                let markup = self.store.state().step_data.vector_markup;
                if let Err(e) = validate_vector_markup(&markup) {
                    return Err(self.reject(Stage::Convert, e));
                }
                self.begin(Stage::Convert, "Converting markup to component...")?;
                markup
            }
            ConvertInput::Bundle(bundle) => {
                self.begin(Stage::Convert, "Extracting vector markup...")?;
                let markup = match self.generator.extract_vector_markup(&bundle.document) {
                    Ok(markup) => markup,
                    Err(e) => {
                        return Err(self.fail(
                            Stage::Convert,
                            StageError::Collaborator {
                                kind: ErrorKind::Generic,
                                message: format!("Failed to extract vector markup: {e:#}"),
                            },
                        ))
                    }
                };
                self.write_in_flight(
                    Stage::Convert,
                    StepDataPatch {
                        vector_markup: Some(markup.clone()),
                        ..Default::default()
                    },
                )?;
                if let Err(e) = validate_vector_markup(&markup) {
                    return Err(self.fail(Stage::Convert, e));
                }
                self.progress(Stage::Convert, "Converting markup to component...");
                markup
            }
        };

        match self
            .transformer
            .transform(&markup, &TransformOptions::default())
            .await
        {
            Ok(source) => self.commit(
                Stage::Convert,
                StepDataPatch {
                    component_source: Some(source),
                    ..Default::default()
                },
                "Component generated",
            ),
            Err(e) => Err(self.fail(Stage::Convert, classify_convert_error(&format!("{e:#}")))),
        }
    }

    async fn finalize(&self) -> Result<(), StageError> {
        self.ensure_not_running(Stage::Finalize)?;

        let data = self.store.state().step_data;
        if let Err(e) = require_custom_input(&data.user_markup, &data.user_style) {
            return Err(self.reject(Stage::Finalize, e));
        }
        if data.bundle.is_none() && data.component_source.trim().is_empty() {
            return Err(self.reject(
                Stage::Finalize,
                StageError::validation(
                    "Nothing to finalize yet: connect a design file or convert markup first",
                ),
            ));
        }

        self.begin(Stage::Finalize, "Generating code...")?;
        let generated_at = Utc::now();

        let generated = match &data.bundle {
            Some(bundle) => {
                let store = self.store.clone();
                let on_progress = move |message: &str| {
                    store.apply_if(
                        |state| state.status(Stage::Finalize).is_loading(),
                        [Action::MergeProgress(ProgressPatch::message(message))],
                    );
                };
                match self
                    .generator
                    .generate(&bundle.document, &GenerationConfig::default(), &on_progress)
                    .await
                {
                    Ok(code) => code,
                    Err(e) => {
                        return Err(self.fail(
                            Stage::Finalize,
                            StageError::Collaborator {
                                kind: ErrorKind::Generic,
                                message: format!("Code generation failed: {e:#}"),
                            },
                        ))
                    }
                }
            }
            None => data.component_source.clone(),
        };

        self.progress(Stage::Finalize, "Combining artifacts...");
        let meta = data
            .bundle
            .as_deref()
            .map(|bundle| DocumentMeta::from_bundle(bundle, generated_at));

        let outputs = assemble_outputs(
            &generated,
            &data.user_markup,
            &data.style_text,
            &data.user_style,
            meta.as_ref(),
        );
        if let SpliceOutcome::PatternMiss(e) = &outputs.splice {
            warn!(error = %e, "custom markup not spliced; keeping generated markup as is");
        }

        self.commit(
            Stage::Finalize,
            StepDataPatch {
                final_markup: Some(outputs.markup),
                final_style: Some(outputs.style),
                ..Default::default()
            },
            "Code ready",
        )
    }

    fn ensure_not_running(&self, stage: Stage) -> Result<(), StageError> {
        if self.store.state().status(stage).is_loading() {
            warn!(?stage, "stage invoked while a previous run is still pending");
            return Err(StageError::Busy(stage));
        }
        Ok(())
    }

    // Input rejected before loading: record the message, leave the status alone.
    fn reject(&self, stage: Stage, err: StageError) -> StageError {
        warn!(?stage, error = %err, "stage input rejected");
        self.store.apply(Action::SetError {
            stage,
            message: err.to_string(),
        });
        err
    }

    fn begin(&self, stage: Stage, message: &str) -> Result<(), StageError> {
        // Going through Idle lets a succeeded stage run again.
        let started = self.store.apply_if(
            |state| !state.status(stage).is_loading(),
            [
                Action::MergeStepStatus(StepStatusPatch::single(stage, StageStatus::Idle)),
                Action::MergeStepStatus(StepStatusPatch::single(stage, StageStatus::Loading)),
                Action::ClearErrors,
                Action::MergeProgress(ProgressPatch::stage(stage, message)),
            ],
        );
        if !started {
            return Err(StageError::Busy(stage));
        }
        info!(?stage, "stage started");
        Ok(())
    }

    // Writes made after an await only land while the stage is still loading;
    // a reset in the meantime turns the run into `Superseded`.
    fn still_loading(stage: Stage) -> impl Fn(&PipelineState) -> bool {
        move |state| state.status(stage).is_loading()
    }

    fn progress(&self, stage: Stage, message: &str) {
        self.store.apply_if(
            Self::still_loading(stage),
            [Action::MergeProgress(ProgressPatch::message(message))],
        );
    }

    fn superseded(stage: Stage) -> StageError {
        warn!(?stage, "workflow reset while the stage was running; results discarded");
        StageError::Superseded(stage)
    }

    fn write_in_flight(&self, stage: Stage, patch: StepDataPatch) -> Result<(), StageError> {
        if self
            .store
            .apply_if(Self::still_loading(stage), [Action::MergeStepData(patch)])
        {
            Ok(())
        } else {
            Err(Self::superseded(stage))
        }
    }

    // Output data and the Success transition land together or not at all.
    fn commit(&self, stage: Stage, patch: StepDataPatch, message: &str) -> Result<(), StageError> {
        let committed = self.store.apply_if(
            Self::still_loading(stage),
            [
                Action::MergeStepData(patch),
                Action::MergeStepStatus(StepStatusPatch::single(stage, StageStatus::Success)),
                Action::MergeProgress(ProgressPatch::message(message)),
            ],
        );
        if !committed {
            return Err(Self::superseded(stage));
        }
        info!(?stage, "stage succeeded");
        Ok(())
    }

    fn fail(&self, stage: Stage, err: StageError) -> StageError {
        let recorded = self.store.apply_if(
            Self::still_loading(stage),
            [
                Action::SetError {
                    stage,
                    message: err.to_string(),
                },
                Action::MergeStepStatus(StepStatusPatch::single(stage, StageStatus::Error)),
            ],
        );
        if !recorded {
            return Self::superseded(stage);
        }
        warn!(?stage, kind = ?err.kind(), error = %err, "stage failed");
        err
    }
}

fn validate_vector_markup(markup: &str) -> Result<(), StageError> {
    if markup.trim().is_empty() {
        return Err(StageError::validation(
            "Paste vector markup or connect a design file first",
        ));
    }
    if !contains_vector_element(markup) {
        return Err(StageError::validation("No vector elements found in markup"));
    }
    Ok(())
}
