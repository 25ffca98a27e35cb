use crate::stage::Stage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    /// Required input missing or malformed; raised before any collaborator call.
    #[error("{0}")]
    Validation(String),
    /// A collaborator call failed; `message` is already user-facing.
    #[error("{message}")]
    Collaborator { kind: ErrorKind, message: String },
    #[error("{} is already running", .0.label())]
    Busy(Stage),
    /// The workflow was reset while the stage was in flight; its results were discarded.
    #[error("{} was reset before it finished", .0.label())]
    Superseded(Stage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    AccessDenied,
    NotFound,
    InvalidCredentials,
    RateLimited,
    ParseFailure,
    Generic,
    Busy,
    Superseded,
}

impl StageError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StageError::Validation(_) => ErrorKind::Validation,
            StageError::Collaborator { kind, .. } => *kind,
            StageError::Busy(_) => ErrorKind::Busy,
            StageError::Superseded(_) => ErrorKind::Superseded,
        }
    }
}

/// Map a document-source failure onto a user-facing message.
///
/// Matching is done on the collaborator's error text, so it only holds as long
/// as the remote service keeps putting HTTP status codes into its messages.
pub fn classify_connect_error(raw: &str) -> StageError {
    let (kind, message) = if raw.contains("403") {
        (
            ErrorKind::AccessDenied,
            "Access denied. Make sure the token can read this file.".to_string(),
        )
    } else if raw.contains("404") {
        (
            ErrorKind::NotFound,
            "Design file not found. Check the URL.".to_string(),
        )
    } else if raw.contains("401") {
        (ErrorKind::InvalidCredentials, "Invalid access token.".to_string())
    } else if raw.contains("429") {
        (
            ErrorKind::RateLimited,
            "Rate limit exceeded. Wait a moment and try again.".to_string(),
        )
    } else {
        (
            ErrorKind::Generic,
            format!("Failed to fetch design file: {raw}"),
        )
    };
    StageError::Collaborator { kind, message }
}

pub fn classify_convert_error(raw: &str) -> StageError {
    let lower = raw.to_ascii_lowercase();
    if ["parse", "syntax", "unexpected token"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        StageError::Collaborator {
            kind: ErrorKind::ParseFailure,
            message: format!("Failed to parse vector markup: {raw}"),
        }
    } else {
        StageError::Collaborator {
            kind: ErrorKind::Generic,
            message: format!("Conversion failed: {raw}"),
        }
    }
}
