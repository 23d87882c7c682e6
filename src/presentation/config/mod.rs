mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    EmbeddingsSettings, LlmSettings, LoggingSettings, QdrantSettings, RetrievalSettings,
    RetrySettings, ServerSettings, Settings, SettingsError,
};
