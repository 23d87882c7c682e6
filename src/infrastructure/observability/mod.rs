mod init_tracing;
mod prompt_sanitizer;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use prompt_sanitizer::sanitize_prompt;
pub use tracing_config::{DEFAULT_LOG_FILTER, TracingConfig};
