use serde::Serialize;

/// Status of one record in a batch upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub key: String,
    pub succeeded: bool,
    pub status_code: u16,
    pub error_message: Option<String>,
}

impl UploadOutcome {
    pub fn accepted(key: impl Into<String>, status_code: u16) -> Self {
        Self {
            key: key.into(),
            succeeded: true,
            status_code,
            error_message: None,
        }
    }

    pub fn rejected(key: impl Into<String>, status_code: u16, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            succeeded: false,
            status_code,
            error_message: Some(message.into()),
        }
    }
}

/// Per-record status of a batch upload, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    pub fn new(outcomes: Vec<UploadOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failures(&self) -> Vec<&UploadOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded).collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.succeeded)
    }
}
