pub mod export;
pub mod kernel;
pub mod options;
pub mod orchestrator;
pub mod ports;
pub mod store;
pub mod viewmodel;

pub use export::DirectoryExportSink;
pub use kernel::WorkflowKernel;
pub use options::{GenerationConfig, StyleMode, TargetFramework, TransformOptions};
pub use orchestrator::StageOrchestrator;
pub use ports::*;
pub use store::WorkflowStore;
pub use viewmodel::*;
