use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, LlmClientError, ResponseFormat, SearchResult, VectorStore,
    VectorStoreError,
};
use crate::domain::{
    META_CHUNK_INDEX, META_CONTENT, META_FILE_NAME, META_PAGE, META_ROLE, ROLE_CHILD, VectorFilter,
};

use super::json_reply::strip_code_fence;
use super::{PromptCatalog, RetryPolicy};

pub const NO_INFORMATION_ANSWER: &str = "The documents contain no information about this question.";

/// Retrieves child chunks for a question, keeps the ones the model judges
/// relevant, and asks the model for a cited answer.
pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    vector_store: Arc<dyn VectorStore>,
    prompts: Arc<PromptCatalog>,
    retry_policy: RetryPolicy,
    collection: String,
    top_k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedPassage {
    pub content: String,
    pub file_name: Option<String>,
    pub page: Option<u32>,
    pub chunk_index: Option<u64>,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    #[serde(default)]
    pub source: Option<Citation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub claims: Vec<Claim>,
}

impl Answer {
    pub fn uncited(text: impl Into<String>) -> Self {
        Self {
            claims: vec![Claim {
                text: text.into(),
                source: None,
            }],
        }
    }

    pub fn no_information() -> Self {
        Self::uncited(NO_INFORMATION_ANSWER)
    }
}

impl RetrievalService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        vector_store: Arc<dyn VectorStore>,
        prompts: Arc<PromptCatalog>,
        retry_policy: RetryPolicy,
        collection: impl Into<String>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            vector_store,
            prompts,
            retry_policy,
            collection: collection.into(),
            top_k,
        }
    }

    #[tracing::instrument(skip(self, question), fields(question_chars = question.chars().count()))]
    pub async fn ask(&self, question: &str) -> Result<Answer, RetrievalError> {
        let candidates = self.retrieve(question, &[]).await?;
        let relevant = self.compress(question, candidates).await?;

        if relevant.is_empty() {
            tracing::info!("No relevant passages found");
            return Ok(Answer::no_information());
        }

        self.answer(question, &relevant).await
    }

    /// Nearest child chunks for the question. `filters` are ANDed with the
    /// child-role restriction.
    pub async fn retrieve(
        &self,
        question: &str,
        filters: &[VectorFilter],
    ) -> Result<Vec<RetrievedPassage>, RetrievalError> {
        let embedder = &self.embedder;
        let query_embedding = self
            .retry_policy
            .run("embed_question", move || embedder.embed(question))
            .await?;

        let mut all_filters = vec![VectorFilter::matches(META_ROLE, ROLE_CHILD)];
        all_filters.extend_from_slice(filters);

        let store = &self.vector_store;
        let collection = self.collection.as_str();
        let vector = &query_embedding;
        let conditions = all_filters.as_slice();
        let top_k = self.top_k;

        let results = match self
            .retry_policy
            .run("query_chunks", move || {
                store.query(collection, vector, conditions, top_k)
            })
            .await
        {
            Ok(results) => results,
            Err(VectorStoreError::CollectionNotFound(name)) => {
                tracing::warn!(collection = %name, "Collection does not exist yet");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(candidates = results.len(), "Retrieved candidates");
        Ok(results.into_iter().map(to_passage).collect())
    }

    async fn compress(
        &self,
        question: &str,
        candidates: Vec<RetrievedPassage>,
    ) -> Result<Vec<RetrievedPassage>, RetrievalError> {
        let total = candidates.len();
        let mut kept = Vec::with_capacity(total);

        for passage in candidates {
            let user_prompt = format!("Question: {question}\n\nPassage:\n{}", passage.content);
            let client = &self.llm_client;
            let system_prompt = self.prompts.relevance();
            let prompt = user_prompt.as_str();

            let verdict = self
                .retry_policy
                .run("judge_relevance", move || {
                    client.complete(system_prompt, prompt, ResponseFormat::Text)
                })
                .await?;

            if is_affirmative(&verdict) {
                kept.push(passage);
            }
        }

        tracing::debug!(candidates = total, kept = kept.len(), "Compressed candidates");
        Ok(kept)
    }

    async fn answer(
        &self,
        question: &str,
        passages: &[RetrievedPassage],
    ) -> Result<Answer, RetrievalError> {
        let context: Vec<Value> = passages
            .iter()
            .map(|p| {
                json!({
                    "content": p.content,
                    "source": { "file_name": p.file_name, "page": p.page },
                })
            })
            .collect();
        let user_prompt = json!({ "question": question, "passages": context }).to_string();

        let client = &self.llm_client;
        let system_prompt = self.prompts.answer();
        let prompt = user_prompt.as_str();

        let raw = self
            .retry_policy
            .run("generate_answer", move || {
                client.complete(system_prompt, prompt, ResponseFormat::Json)
            })
            .await?;

        Ok(parse_answer(&raw))
    }
}

/// Decodes the model's answer; anything that does not fit the expected shape
/// becomes one uncited claim holding the raw reply.
pub fn parse_answer(raw: &str) -> Answer {
    match serde_json::from_str::<Answer>(strip_code_fence(raw)) {
        Ok(answer) if !answer.claims.is_empty() => answer,
        Ok(_) => Answer::no_information(),
        Err(e) => {
            tracing::warn!(error = %e, "Answer is not in the expected JSON shape");
            Answer::uncited(raw.trim())
        }
    }
}

fn is_affirmative(verdict: &str) -> bool {
    verdict
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_uppercase()
        .starts_with("YES")
}

fn to_passage(result: SearchResult) -> RetrievedPassage {
    let payload = &result.payload;
    RetrievedPassage {
        content: payload
            .get(META_CONTENT)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        file_name: payload
            .get(META_FILE_NAME)
            .and_then(Value::as_str)
            .map(str::to_string),
        page: payload
            .get(META_PAGE)
            .and_then(Value::as_u64)
            .and_then(|p| u32::try_from(p).ok()),
        chunk_index: payload.get(META_CHUNK_INDEX).and_then(Value::as_u64),
        score: result.score,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
