use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docroute::application::ports::{
    CollectionConfig, Embedder, FileLoader, LlmClient, SplitterFactory, StructuredParser,
    VectorStore,
};
use docroute::application::services::{
    ChunkingService, DocumentClassifier, IngestionPipeline, PromptCatalog, RetrievalService,
    RetryPolicy,
};
use docroute::infrastructure::llm::{OpenAiChatClient, OpenAiEmbedder};
use docroute::infrastructure::observability::init_tracing;
use docroute::infrastructure::persistence::{InMemoryVectorStore, QdrantAdapter};
use docroute::infrastructure::text_processing::{
    PagePassThroughParser, PdfAdapter, TextSplitterFactory,
};
use docroute::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (settings, environment) = Settings::load().context("Invalid configuration")?;

    init_tracing(&settings.tracing_config(environment));

    let retry_policy = RetryPolicy::from(&settings.retry);
    let prompts = Arc::new(PromptCatalog::default());
    let policies = Arc::new(settings.chunking.clone());

    let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAiChatClient::new(
        settings.llm.base_url.as_deref(),
        settings.llm.api_key.clone(),
        settings.llm.chat_model.clone(),
        settings.llm.max_tokens,
        settings.llm.temperature,
    ));
    let embedder: Arc<dyn Embedder> = Arc::new(OpenAiEmbedder::new(
        settings.embeddings.base_url.as_deref(),
        settings.embeddings_api_key().to_string(),
        settings.embeddings.model.clone(),
    ));

    let vector_store: Arc<dyn VectorStore> = match &settings.qdrant.url {
        Some(url) => {
            tracing::info!(url = %url, "Using Qdrant vector store");
            Arc::new(
                QdrantAdapter::new(url, settings.qdrant.api_key.clone())
                    .context("Failed to create Qdrant client")?,
            )
        }
        None => {
            tracing::warn!("No Qdrant URL configured, using in-memory vector store");
            Arc::new(InMemoryVectorStore::new())
        }
    };

    let file_loader: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
    let splitters: Arc<dyn SplitterFactory> = Arc::new(TextSplitterFactory);
    let structured_parser: Arc<dyn StructuredParser> = Arc::new(PagePassThroughParser::new());

    let classifier = Arc::new(DocumentClassifier::new(
        Arc::clone(&llm_client),
        Arc::clone(&prompts),
        retry_policy.clone(),
    ));
    let chunking = Arc::new(ChunkingService::new(
        policies,
        splitters,
        structured_parser,
        retry_policy.clone(),
    ));

    let ingestion_pipeline = Arc::new(IngestionPipeline::new(
        file_loader,
        classifier,
        chunking,
        Arc::clone(&embedder),
        Arc::clone(&vector_store),
        settings.qdrant.collection_name.clone(),
        CollectionConfig::new(settings.embeddings.dimension),
        retry_policy.clone(),
    )
    .with_embed_batch_size(settings.embeddings.batch_size));

    let retrieval_service = Arc::new(RetrievalService::new(
        embedder,
        llm_client,
        vector_store,
        prompts,
        retry_policy,
        settings.qdrant.collection_name.clone(),
        settings.retrieval.top_k,
    ));

    let state = AppState {
        ingestion_pipeline,
        retrieval_service,
        max_upload_bytes: settings.server.max_upload_mb * 1024 * 1024,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
