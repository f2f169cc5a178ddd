use std::fmt;

use serde::Serialize;

pub const KEY_FIELD: &str = "name";
pub const TEXT_FIELD: &str = "information";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexName(String);

impl IndexName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub key: bool,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsOptions {
    pub allowed_origins: Vec<String>,
    pub max_age_in_seconds: u64,
}

/// Index definition. The field set is fixed; only the name varies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSchema {
    pub name: String,
    pub fields: Vec<IndexField>,
    pub cors_options: CorsOptions,
    pub scoring_profiles: Vec<serde_json::Value>,
}

impl IndexSchema {
    pub fn for_index(index: &IndexName) -> Self {
        Self {
            name: index.as_str().to_string(),
            fields: vec![
                IndexField {
                    name: KEY_FIELD,
                    field_type: "Edm.String",
                    key: true,
                    searchable: true,
                },
                IndexField {
                    name: TEXT_FIELD,
                    field_type: "Edm.String",
                    key: false,
                    searchable: true,
                },
            ],
            cors_options: CorsOptions {
                allowed_origins: vec!["*".to_string()],
                max_age_in_seconds: 60,
            },
            scoring_profiles: Vec::new(),
        }
    }

    pub fn key_field(&self) -> Option<&IndexField> {
        self.fields.iter().find(|f| f.key)
    }
}
