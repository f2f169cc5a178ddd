use std::collections::HashMap;

use config::{Config, Environment as EnvironmentSource, File};

use super::{ConfigurationError, Environment, Settings};

/// Variable names used by earlier deployments, mapped onto settings keys.
const LEGACY_VARIABLES: [(&str, &str); 9] = [
    ("COGSEARCH_ENDPOINT", "search.endpoint"),
    ("COGSEARCH_KEY", "search.api_key"),
    ("STORAGE_STRING1", "storage.source_connection_string"),
    ("TTS_STORAGE_STRING", "storage.artifact_connection_string"),
    ("DI_ENDPOINT", "document_intelligence.endpoint"),
    ("DI_KEY1", "document_intelligence.api_key"),
    ("SPEECH_KEY", "speech.api_key"),
    ("SPEECH_LOCATION", "speech.region"),
    ("FUNC_CODE", "access.function_code"),
];

/// Loads `.env`, the environment's settings file and process variables, then validates.
pub fn load_settings() -> Result<(Environment, Settings), ConfigurationError> {
    dotenvy::dotenv().ok();
    let vars: HashMap<String, String> = std::env::vars().collect();
    load_settings_from(&vars)
}

/// Same as [`load_settings`] with an explicit variable set instead of the process environment.
pub fn load_settings_from(
    vars: &HashMap<String, String>,
) -> Result<(Environment, Settings), ConfigurationError> {
    let environment: Environment = vars
        .get("APP_ENVIRONMENT")
        .cloned()
        .unwrap_or_else(|| "local".to_string())
        .try_into()
        .map_err(ConfigurationError::InvalidEnvironment)?;

    let mut builder = Config::builder()
        .add_source(File::with_name(&environment.settings_file()).required(false))
        .add_source(
            EnvironmentSource::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .source(Some(vars.clone())),
        );

    for (variable, key) in LEGACY_VARIABLES {
        builder = builder.set_override_option(key, vars.get(variable).cloned())?;
    }

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;

    Ok((environment, settings))
}
