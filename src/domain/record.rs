use serde::{Deserialize, Serialize};

/// Text extracted from one source document, keyed by document name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub key: String,
    pub text: String,
}

impl ExtractedRecord {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// The persisted unit of the search index. Field names match the index schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub name: String,
    pub information: String,
}

impl IndexRecord {
    pub fn new(name: impl Into<String>, information: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            information: information.into(),
        }
    }
}

impl From<ExtractedRecord> for IndexRecord {
    fn from(record: ExtractedRecord) -> Self {
        Self {
            name: record.key,
            information: record.text,
        }
    }
}
