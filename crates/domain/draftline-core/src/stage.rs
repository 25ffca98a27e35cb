use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Connect,
    Convert,
    Style,
    Finalize,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Connect, Stage::Convert, Stage::Style, Stage::Finalize];

    /// One-based position in the pipeline, used as the progress counter.
    pub fn number(self) -> u8 {
        match self {
            Stage::Connect => 1,
            Stage::Convert => 2,
            Stage::Style => 3,
            Stage::Finalize => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Connect => "Connect design file",
            Stage::Convert => "Extract & convert",
            Stage::Style => "Styles",
            Stage::Finalize => "Finalize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StageStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl StageStatus {
    /// Whether a stage currently in `self` may move to `next`.
    ///
    /// `Loading` is entered from `Idle` or `Error` only; `Success` and `Error`
    /// only from `Loading`. Returning to `Idle` is always allowed, which is how
    /// a succeeded stage is re-run.
    pub fn can_enter(self, next: StageStatus) -> bool {
        match next {
            StageStatus::Idle => true,
            StageStatus::Loading => matches!(self, StageStatus::Idle | StageStatus::Error),
            StageStatus::Success | StageStatus::Error => self == StageStatus::Loading,
        }
    }

    pub fn is_loading(self) -> bool {
        self == StageStatus::Loading
    }
}
