use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::application::services::{DEFAULT_EMBED_BATCH_SIZE, Jitter, RetryPolicy};
use crate::domain::{ChunkPolicyTable, DocumentType};
use crate::infrastructure::llm::{DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_EMBEDDING_MODEL};
use crate::infrastructure::observability::{DEFAULT_LOG_FILTER, TracingConfig};

use super::Environment;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub embeddings: EmbeddingsSettings,
    pub qdrant: QdrantSettings,
    pub retry: RetrySettings,
    pub chunking: ChunkPolicyTable,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_mb: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            chat_model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsSettings {
    /// Falls back to the LLM key when unset.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub dimension: u64,
    /// Maximum number of chunks sent in one embedding request.
    pub batch_size: usize,
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimension: DEFAULT_EMBEDDING_DIMENSIONS as u64,
            batch_size: DEFAULT_EMBED_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QdrantSettings {
    /// When unset the process-local vector store is used.
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub collection_name: String,
}

impl Default for QdrantSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            collection_name: "documents".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_factor: f64,
    pub max_delay_ms: u64,
    pub jitter: Jitter,
    pub timeout_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            backoff_factor: 2.0,
            max_delay_ms: 10_000,
            jitter: Jitter::Full,
            timeout_secs: 30,
        }
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        RetryPolicy::new(settings.max_attempts)
            .with_backoff(
                Duration::from_millis(settings.initial_delay_ms),
                settings.backoff_factor,
                Duration::from_millis(settings.max_delay_ms),
            )
            .with_jitter(settings.jitter)
            .with_attempt_timeout(Duration::from_secs(settings.timeout_secs))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json: bool,
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            json: false,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// Loads `.env`, then `appsettings.<env>.toml` if present, then
    /// `APP__SECTION__KEY` environment variables, and validates the result.
    pub fn load() -> Result<(Self, Environment), SettingsError> {
        dotenvy::dotenv().ok();

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(SettingsError::InvalidEnvironment)?;

        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;

        Ok((settings, environment))
    }

    pub fn embeddings_api_key(&self) -> &str {
        self.embeddings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(&self.llm.api_key)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(SettingsError::MissingCredential("llm.api_key"));
        }

        if self.embeddings_api_key().trim().is_empty() {
            return Err(SettingsError::MissingCredential("embeddings.api_key"));
        }

        if let Some(document_type) = self.chunking.first_invalid() {
            return Err(SettingsError::InvalidChunking(document_type));
        }

        if self.retry.max_attempts == 0 {
            return Err(SettingsError::InvalidValue(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.embeddings.dimension == 0 {
            return Err(SettingsError::InvalidValue(
                "embeddings.dimension must be positive".to_string(),
            ));
        }

        if self.embeddings.batch_size == 0 {
            return Err(SettingsError::InvalidValue(
                "embeddings.batch_size must be positive".to_string(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(SettingsError::InvalidValue(
                "retrieval.top_k must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig {
            environment: environment.to_string(),
            json_format: self.logging.json
                || std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")),
            default_filter: self.logging.filter.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("{0}")]
    InvalidEnvironment(String),
    #[error("missing required credential: {0}")]
    MissingCredential(&'static str),
    #[error("chunk overlap must be smaller than chunk size for {0}")]
    InvalidChunking(DocumentType),
    #[error("invalid setting: {0}")]
    InvalidValue(String),
}
