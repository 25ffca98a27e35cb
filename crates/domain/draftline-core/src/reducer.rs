use crate::action::{Action, ProgressPatch, StepDataPatch, StepStatusPatch, UiStatePatch};
use crate::state::{PipelineState, StepData, StepStatuses, UiState};

pub fn reduce(mut state: PipelineState, action: Action) -> PipelineState {
    match action {
        Action::MergeStepData(patch) => merge_step_data(&mut state.step_data, patch),

        Action::MergeStepStatus(patch) => merge_step_status(&mut state.step_status, patch),

        Action::MergeUiState(patch) => merge_ui(&mut state.ui, patch),

        Action::SetError { stage, message } => {
            state.ui.errors.insert(stage, message);
        }

        Action::ClearErrors => state.ui.errors.clear(),

        Action::ToggleExpanded(stage) => {
            let flag = state.ui.expanded.entry(stage).or_insert(false);
            *flag = !*flag;
        }

        Action::MergeProgress(patch) => merge_progress(&mut state.ui, patch),

        Action::ResetAll => state = PipelineState::initial(),
    }
    state
}

fn merge_step_data(data: &mut StepData, patch: StepDataPatch) {
    let StepDataPatch {
        source_url,
        access_token,
        bundle,
        vector_markup,
        component_source,
        style_text,
        user_markup,
        user_style,
        final_markup,
        final_style,
    } = patch;

    if let Some(v) = source_url {
        data.source_url = v;
    }
    if let Some(v) = access_token {
        data.access_token = v;
    }
    if let Some(v) = bundle {
        data.bundle = Some(v);
    }
    if let Some(v) = vector_markup {
        data.vector_markup = v;
    }
    if let Some(v) = component_source {
        data.component_source = v;
    }
    if let Some(v) = style_text {
        data.style_text = v;
    }
    if let Some(v) = user_markup {
        data.user_markup = v;
    }
    if let Some(v) = user_style {
        data.user_style = v;
    }
    if let Some(v) = final_markup {
        data.final_markup = v;
    }
    if let Some(v) = final_style {
        data.final_style = v;
    }
}

// Entries that would break the status invariant are dropped; the others still apply.
fn merge_step_status(statuses: &mut StepStatuses, patch: StepStatusPatch) {
    for (stage, next) in patch.entries() {
        let Some(next) = next else { continue };
        let slot = statuses.slot_mut(stage);
        if slot.can_enter(next) {
            *slot = next;
        }
    }
}

fn merge_ui(ui: &mut UiState, patch: UiStatePatch) {
    if let Some(expanded) = patch.expanded {
        ui.expanded = expanded;
    }
    if let Some(show) = patch.show_preview {
        ui.show_preview = show;
    }
}

fn merge_progress(ui: &mut UiState, patch: ProgressPatch) {
    if let Some(current) = patch.current {
        ui.progress.current = current;
    }
    if let Some(total) = patch.total {
        ui.progress.total = total;
    }
    if let Some(message) = patch.message {
        ui.progress.message = message;
    }
}
