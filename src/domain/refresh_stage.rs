use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RefreshStage {
    Idle,
    Enumerating,
    Extracting,
    Rebuilding,
    Populating,
    Done,
    Failed,
}

impl RefreshStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshStage::Idle => "IDLE",
            RefreshStage::Enumerating => "ENUMERATING",
            RefreshStage::Extracting => "EXTRACTING",
            RefreshStage::Rebuilding => "REBUILDING",
            RefreshStage::Populating => "POPULATING",
            RefreshStage::Done => "DONE",
            RefreshStage::Failed => "FAILED",
        }
    }

    /// Whether a failure in this stage leaves the index empty or partial.
    pub fn touches_index(&self) -> bool {
        matches!(self, RefreshStage::Rebuilding | RefreshStage::Populating)
    }
}

impl fmt::Display for RefreshStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
