pub mod action;
pub mod combine;
pub mod error;
pub mod export;
pub mod finalize;
pub mod reducer;
pub mod stage;
pub mod state;

pub use action::{Action, ProgressPatch, StepDataPatch, StepStatusPatch, UiStatePatch};
pub use combine::{
    combine_markup, combine_styles, contains_vector_element, splice_user_markup, CombineError,
    MarkupOutcome, SpliceOutcome,
};
pub use error::{classify_connect_error, classify_convert_error, ErrorKind, StageError};
pub use export::{export_artifacts, ExportArtifact};
pub use finalize::{assemble_outputs, require_custom_input, FinalOutputs};
pub use reducer::reduce;
pub use stage::{Stage, StageStatus};
pub use state::{
    DocumentBundle, DocumentMeta, PipelineState, Progress, StepData, StepStatuses, UiState,
};
