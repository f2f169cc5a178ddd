mod configuration_error;
mod environment;
mod loader;
mod settings;

pub use configuration_error::ConfigurationError;
pub use environment::Environment;
pub use loader::{load_settings, load_settings_from};
pub use settings::{
    AccessSettings, DocumentIntelligenceSettings, LoggingSettings, SearchProviderSetting,
    SearchSettings, ServerSettings, Settings, SpeechSettings, StorageProviderSetting,
    StorageSettings, TimeoutSettings,
};
