//! Central configuration constants for workflow defaults and generated output.

/// Placeholder shown in the source URL field of a fresh workflow.
pub const DEFAULT_SOURCE_URL: &str = "https://www.figma.com/file/your-file-key/your-design";

/// Number of stages in one workflow run.
pub const TOTAL_STAGES: u8 = 4;

/// Component name handed to the markup transformer.
pub const GENERATED_COMPONENT_NAME: &str = "GeneratedComponent";

/// File name of the exported component source.
pub const COMPONENT_FILE_NAME: &str = "GeneratedComponent.tsx";

/// File name of the exported stylesheet.
pub const STYLE_FILE_NAME: &str = "styles.css";

/// Content type attached to every exported artifact.
pub const EXPORT_CONTENT_TYPE: &str = "text/plain";

/// Tablet breakpoint used by the responsive style section (pixels).
pub const TABLET_BREAKPOINT_PX: u32 = 768;

/// Phone breakpoint used by the responsive style section (pixels).
pub const MOBILE_BREAKPOINT_PX: u32 = 480;
