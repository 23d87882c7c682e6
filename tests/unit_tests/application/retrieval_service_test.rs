use std::sync::{Arc, Mutex};

use docroute::application::ports::{
    CollectionConfig, LlmClient, LlmClientError, ResponseFormat, VectorPoint, VectorStore,
};
use docroute::application::services::{
    Answer, Citation, NO_INFORMATION_ANSWER, PromptCatalog, RetrievalError, RetrievalService,
    parse_answer,
};
use docroute::domain::{Metadata, VectorFilter};
use docroute::infrastructure::persistence::InMemoryVectorStore;
use serde_json::json;

use crate::support::{CountingEmbedder, TEST_COLLECTION, TEST_DIMENSIONS, fast_retry};

const CITED_ANSWER: &str = r#"{"answer": [{"text": "Refunds take 14 days.", "source": {"file_name": "refunds.pdf", "page": 2}}]}"#;

/// Judges a passage relevant when it mentions the keyword and answers JSON
/// requests with a fixed reply.
struct KeywordJudge {
    keyword: &'static str,
    answer: &'static str,
    answer_prompts: Mutex<Vec<String>>,
    relevance_calls: Mutex<usize>,
}

impl KeywordJudge {
    fn new(keyword: &'static str) -> Self {
        Self {
            keyword,
            answer: CITED_ANSWER,
            answer_prompts: Mutex::new(Vec::new()),
            relevance_calls: Mutex::new(0),
        }
    }

    fn answer_prompts(&self) -> Vec<String> {
        self.answer_prompts.lock().unwrap().clone()
    }

    fn relevance_calls(&self) -> usize {
        *self.relevance_calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl LlmClient for KeywordJudge {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, LlmClientError> {
        match format {
            ResponseFormat::Json => {
                self.answer_prompts.lock().unwrap().push(user_prompt.to_string());
                Ok(self.answer.to_string())
            }
            ResponseFormat::Text => {
                *self.relevance_calls.lock().unwrap() += 1;
                let passage = user_prompt.split("Passage:").nth(1).unwrap_or_default();
                Ok(if passage.contains(self.keyword) { "YES" } else { "NO" }.to_string())
            }
        }
    }
}

fn payload(content: &str, file_name: &str, page: u32, role: &str) -> Metadata {
    json!({
        "content": content,
        "file_name": file_name,
        "page": page,
        "chunk_index": 0,
        "role": role,
    })
    .as_object()
    .cloned()
    .unwrap()
}

async fn seeded_store(embedder: &CountingEmbedder) -> Arc<InMemoryVectorStore> {
    let store = Arc::new(InMemoryVectorStore::new());
    store
        .ensure_collection(TEST_COLLECTION, &CollectionConfig::new(TEST_DIMENSIONS as u64))
        .await
        .unwrap();

    let rows = [
        ("p1", "Refunds are processed within 14 days.", "refunds.pdf", 2, "child"),
        ("p2", "The cafeteria opens at 8am.", "facilities.pdf", 1, "child"),
        ("p3", "Refunds overview page.", "refunds.pdf", 1, "page"),
    ];
    let points: Vec<VectorPoint> = rows
        .iter()
        .map(|(id, content, file_name, page, role)| VectorPoint {
            id: id.to_string(),
            vector: embedder.vector_for(content),
            payload: payload(content, file_name, *page, role),
        })
        .collect();
    store.upsert(TEST_COLLECTION, &points).await.unwrap();
    store
}

fn service(
    embedder: Arc<CountingEmbedder>,
    llm: Arc<KeywordJudge>,
    store: Arc<InMemoryVectorStore>,
) -> RetrievalService {
    RetrievalService::new(
        embedder,
        llm,
        store,
        Arc::new(PromptCatalog::default()),
        fast_retry(3),
        TEST_COLLECTION,
        10,
    )
}

#[tokio::test]
async fn given_question_when_retrieving_then_only_child_chunks_are_returned() {
    let embedder = Arc::new(CountingEmbedder::new());
    let store = seeded_store(&embedder).await;
    let retrieval = service(embedder, Arc::new(KeywordJudge::new("Refunds")), store);

    let passages = retrieval.retrieve("How long do refunds take?", &[]).await.unwrap();

    assert_eq!(passages.len(), 2);
    assert!(passages.iter().all(|p| p.content != "Refunds overview page."));
}

#[tokio::test]
async fn given_extra_filter_when_retrieving_then_filters_are_combined() {
    let embedder = Arc::new(CountingEmbedder::new());
    let store = seeded_store(&embedder).await;
    let retrieval = service(embedder, Arc::new(KeywordJudge::new("Refunds")), store);

    let passages = retrieval
        .retrieve("refunds", &[VectorFilter::matches("file_name", "refunds.pdf")])
        .await
        .unwrap();

    assert_eq!(passages.len(), 1);
    assert_eq!(passages[0].file_name.as_deref(), Some("refunds.pdf"));
    assert_eq!(passages[0].page, Some(2));
}

#[tokio::test]
async fn given_relevant_passage_when_asking_then_answer_is_built_from_it_only() {
    let embedder = Arc::new(CountingEmbedder::new());
    let store = seeded_store(&embedder).await;
    let llm = Arc::new(KeywordJudge::new("Refunds"));
    let retrieval = service(embedder, llm.clone(), store);

    let answer = retrieval.ask("How long do refunds take?").await.unwrap();

    assert_eq!(answer.claims.len(), 1);
    assert_eq!(
        answer.claims[0].source,
        Some(Citation {
            file_name: Some("refunds.pdf".to_string()),
            page: Some(2),
        })
    );
    assert_eq!(llm.relevance_calls(), 2);
    let prompts = llm.answer_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Refunds are processed within 14 days."));
    assert!(!prompts[0].contains("cafeteria"));
}

#[tokio::test]
async fn given_no_relevant_passage_when_asking_then_returns_no_information_without_answer_call() {
    let embedder = Arc::new(CountingEmbedder::new());
    let store = seeded_store(&embedder).await;
    let llm = Arc::new(KeywordJudge::new("parking"));
    let retrieval = service(embedder, llm.clone(), store);

    let answer = retrieval.ask("Where can I park?").await.unwrap();

    assert_eq!(answer, Answer::no_information());
    assert!(llm.answer_prompts().is_empty());
}

#[tokio::test]
async fn given_missing_collection_when_asking_then_returns_no_information() {
    let embedder = Arc::new(CountingEmbedder::new());
    let llm = Arc::new(KeywordJudge::new("Refunds"));
    let retrieval = service(embedder, llm.clone(), Arc::new(InMemoryVectorStore::new()));

    let answer = retrieval.ask("anything").await.unwrap();

    assert_eq!(answer.claims[0].text, NO_INFORMATION_ANSWER);
    assert_eq!(llm.relevance_calls(), 0);
}

#[tokio::test]
async fn given_embedder_failure_when_asking_then_returns_embedding_error() {
    let store = Arc::new(InMemoryVectorStore::new());
    let retrieval = service(
        Arc::new(CountingEmbedder::failing()),
        Arc::new(KeywordJudge::new("Refunds")),
        store,
    );

    let result = retrieval.ask("anything").await;

    assert!(matches!(result, Err(RetrievalError::Embedding(_))));
}

#[test]
fn given_cited_json_when_parsing_answer_then_reads_claims() {
    let answer = parse_answer(CITED_ANSWER);

    assert_eq!(answer.claims[0].text, "Refunds take 14 days.");
    assert_eq!(answer.claims[0].source.as_ref().and_then(|s| s.page), Some(2));
}

#[test]
fn given_fenced_json_without_source_when_parsing_answer_then_claim_is_uncited() {
    let answer = parse_answer("```json\n{\"answer\": [{\"text\": \"No source here.\"}]}\n```");

    assert_eq!(answer, Answer::uncited("No source here."));
}

#[test]
fn given_plain_text_when_parsing_answer_then_keeps_raw_reply_uncited() {
    let answer = parse_answer("  Refunds take two weeks.  ");

    assert_eq!(answer, Answer::uncited("Refunds take two weeks."));
}

#[test]
fn given_empty_claim_list_when_parsing_answer_then_returns_no_information() {
    assert_eq!(parse_answer(r#"{"answer": []}"#), Answer::no_information());
}
