use draftline_core::{PipelineState, Stage, StageStatus};

#[derive(Debug, Clone)]
pub struct StageVm {
    pub stage: Stage,
    pub label: &'static str,
    pub status: StageStatus,
    pub error: Option<String>,
    pub expanded: bool,
    pub show_spinner: bool,
    pub can_run: bool,
}

#[derive(Debug, Clone)]
pub struct WorkflowVm {
    pub stages: Vec<StageVm>,
    pub progress_bar: Option<(f32, String)>,
    pub show_preview: bool,
    pub can_export: bool,
}

fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

fn inputs_ready(state: &PipelineState, stage: Stage) -> bool {
    let data = &state.step_data;
    match stage {
        Stage::Connect => has_text(&data.source_url) && has_text(&data.access_token),
        Stage::Convert => has_text(&data.vector_markup),
        Stage::Style => has_text(&data.style_text),
        Stage::Finalize => has_text(&data.user_markup) || has_text(&data.user_style),
    }
}

pub fn workflow_vm(state: &PipelineState) -> WorkflowVm {
    let stages = Stage::ALL
        .iter()
        .map(|&stage| {
            let status = state.status(stage);
            StageVm {
                stage,
                label: stage.label(),
                status,
                error: state.ui.error(stage).map(str::to_string),
                expanded: state.ui.is_expanded(stage),
                show_spinner: status.is_loading(),
                can_run: !status.is_loading() && inputs_ready(state, stage),
            }
        })
        .collect();

    let progress = &state.ui.progress;
    let progress_bar = (progress.current > 0).then(|| {
        let label = if progress.message.is_empty() {
            format!("Step {} of {}", progress.current, progress.total)
        } else {
            format!(
                "Step {} of {}: {}",
                progress.current, progress.total, progress.message
            )
        };
        (progress.fraction(), label)
    });

    WorkflowVm {
        stages,
        progress_bar,
        show_preview: state.ui.show_preview,
        can_export: has_text(&state.step_data.final_markup)
            && has_text(&state.step_data.final_style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftline_core::{reduce, Action, DocumentBundle, ProgressPatch, StepDataPatch};

    #[test]
    fn fresh_state_needs_a_token_before_connect() {
        let vm = workflow_vm(&PipelineState::initial());
        assert!(!vm.stages[0].can_run);
        assert!(vm.stages[0].expanded);
        assert!(vm.progress_bar.is_none());
        assert!(!vm.can_export);
    }

    #[test]
    fn progress_bar_reports_step_and_message() {
        let state = reduce(
            PipelineState::initial(),
            Action::MergeStepData(StepDataPatch {
                access_token: Some("tok".into()),
                ..Default::default()
            }),
        );
        let state = reduce(
            state,
            Action::MergeProgress(ProgressPatch::stage(Stage::Convert, "Converting")),
        );
        let vm = workflow_vm(&state);
        assert!(vm.stages[0].can_run);
        let (fraction, label) = vm.progress_bar.unwrap();
        assert!((fraction - 0.5).abs() < f32::EPSILON);
        assert_eq!(label, "Step 2 of 4: Converting");
    }

    #[test]
    fn convert_needs_markup_even_with_a_bundle() {
        let bundle = DocumentBundle {
            file_id: "AbC123".into(),
            document: serde_json::json!({ "children": [] }),
            metadata: serde_json::Value::Null,
            components: serde_json::Value::Null,
            styles: serde_json::Value::Null,
            retrieved_at: chrono::Utc::now(),
        };
        let state = reduce(
            PipelineState::initial(),
            Action::MergeStepData(StepDataPatch {
                bundle: Some(std::sync::Arc::new(bundle)),
                ..Default::default()
            }),
        );
        assert!(!workflow_vm(&state).stages[1].can_run);

        let state = reduce(
            state,
            Action::MergeStepData(StepDataPatch {
                vector_markup: Some("<svg/>".into()),
                ..Default::default()
            }),
        );
        assert!(workflow_vm(&state).stages[1].can_run);
    }
}
