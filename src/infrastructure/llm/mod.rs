mod openai_chat_client;
mod openai_embedder;

pub use openai_chat_client::{DEFAULT_OPENAI_BASE_URL, OpenAiChatClient};
pub use openai_embedder::{DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_EMBEDDING_MODEL, OpenAiEmbedder};
