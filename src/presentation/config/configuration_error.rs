#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("missing or invalid configuration: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("{0}")]
    InvalidEnvironment(String),
    #[error("configuration source: {0}")]
    Source(#[from] config::ConfigError),
}
