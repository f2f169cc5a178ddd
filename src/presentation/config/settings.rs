use std::time::Duration;

use serde::Deserialize;

use super::ConfigurationError;
use crate::infrastructure::document_analysis::DEFAULT_MODEL_ID;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub storage: StorageSettings,
    pub document_intelligence: DocumentIntelligenceSettings,
    pub speech: SpeechSettings,
    pub access: AccessSettings,
    pub timeouts: TimeoutSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7071,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProviderSetting {
    Azure,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub provider: SearchProviderSetting,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub index_name: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider: SearchProviderSetting::Azure,
            endpoint: None,
            api_key: None,
            index_name: "architecture".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Azure,
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub source_connection_string: Option<String>,
    pub source_container: String,
    pub artifact_connection_string: Option<String>,
    pub artifact_container: String,
    pub local_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Azure,
            source_connection_string: None,
            source_container: "pdfs".to_string(),
            artifact_connection_string: None,
            artifact_container: "output-wav".to_string(),
            local_path: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentIntelligenceSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model_id: String,
}

impl Default for DocumentIntelligenceSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub api_key: Option<String>,
    pub region: Option<String>,
    pub voice: String,
    pub output_format: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            region: None,
            voice: "en-AU-WilliamNeural".to_string(),
            output_format: "riff-24khz-16bit-mono-pcm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    pub function_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    pub request_secs: u64,
    pub analysis_secs: u64,
    pub lookup_secs: u64,
    pub storage_secs: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            request_secs: 30,
            analysis_secs: 300,
            lookup_secs: 10,
            storage_secs: 60,
        }
    }
}

impl TimeoutSettings {
    /// Names of timeouts set to zero, which would expire immediately.
    fn zero_values(&self) -> Vec<String> {
        [
            (self.request_secs, "timeouts.request_secs"),
            (self.analysis_secs, "timeouts.analysis_secs"),
            (self.lookup_secs, "timeouts.lookup_secs"),
            (self.storage_secs, "timeouts.storage_secs"),
        ]
        .into_iter()
        .filter(|(secs, _)| *secs == 0)
        .map(|(_, name)| format!("{name} (must be greater than zero)"))
        .collect()
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn analysis(&self) -> Duration {
        Duration::from_secs(self.analysis_secs)
    }

    pub fn lookup(&self) -> Duration {
        Duration::from_secs(self.lookup_secs)
    }

    pub fn storage(&self) -> Duration {
        Duration::from_secs(self.storage_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json: bool,
}

/// Returns the value of a required setting, or the name to report as missing.
fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| name.to_string())
}

impl Settings {
    /// Checks every credential the configured providers need and every
    /// timeout, and reports all problems together.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut checks: Vec<(&Option<String>, &str)> = vec![
            (
                &self.document_intelligence.endpoint,
                "document_intelligence.endpoint (DI_ENDPOINT)",
            ),
            (
                &self.document_intelligence.api_key,
                "document_intelligence.api_key (DI_KEY1)",
            ),
            (&self.speech.api_key, "speech.api_key (SPEECH_KEY)"),
            (&self.speech.region, "speech.region (SPEECH_LOCATION)"),
            (&self.access.function_code, "access.function_code (FUNC_CODE)"),
        ];

        if self.search.provider == SearchProviderSetting::Azure {
            checks.push((&self.search.endpoint, "search.endpoint (COGSEARCH_ENDPOINT)"));
            checks.push((&self.search.api_key, "search.api_key (COGSEARCH_KEY)"));
        }

        if self.storage.provider == StorageProviderSetting::Azure {
            checks.push((
                &self.storage.source_connection_string,
                "storage.source_connection_string (STORAGE_STRING1)",
            ));
            checks.push((
                &self.storage.artifact_connection_string,
                "storage.artifact_connection_string (TTS_STORAGE_STRING)",
            ));
        }

        let mut missing: Vec<String> = checks
            .into_iter()
            .filter_map(|(value, name)| required(value, name).err())
            .collect();
        missing.extend(self.timeouts.zero_values());

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::MissingFields(missing))
        }
    }
}
