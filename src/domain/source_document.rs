/// Object suffix stripped when deriving a document key.
pub const SOURCE_SUFFIX: &str = ".pdf";

/// A document found in the source container at refresh time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub key: String,
    pub locator: String,
}

impl SourceDocument {
    pub fn new(key: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            locator: locator.into(),
        }
    }

    /// Builds a document from an object path, deriving its key.
    pub fn from_object_path(object_path: &str, locator: impl Into<String>) -> Self {
        Self::new(Self::key_from_object_path(object_path), locator)
    }

    /// `Ancient-Roman-Architecture.pdf` becomes `Ancient Roman Architecture`.
    ///
    /// Paths without the suffix keep their full name.
    pub fn key_from_object_path(object_path: &str) -> String {
        object_path
            .strip_suffix(SOURCE_SUFFIX)
            .unwrap_or(object_path)
            .replace('-', " ")
    }
}
