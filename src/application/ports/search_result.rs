use crate::domain::Metadata;

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: String,
    pub payload: Metadata,
    pub score: f32,
}
