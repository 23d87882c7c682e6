use super::{DistanceMetric, PayloadFieldType, PayloadIndex};
use crate::domain::{META_DOC_ID, META_DOCUMENT_TYPE, META_FILE_NAME, META_PAGE, META_ROLE};

#[derive(Debug, Clone)]
pub struct CollectionConfig {
    pub vector_dimensions: u64,
    pub distance_metric: DistanceMetric,
    pub payload_indexes: Vec<PayloadIndex>,
}

impl CollectionConfig {
    pub fn new(vector_dimensions: u64) -> Self {
        let keyword = |field: &str| PayloadIndex {
            field_name: field.to_string(),
            field_type: PayloadFieldType::Keyword,
        };

        Self {
            vector_dimensions,
            distance_metric: DistanceMetric::Cosine,
            payload_indexes: vec![
                keyword(META_DOC_ID),
                keyword(META_FILE_NAME),
                keyword(META_ROLE),
                keyword(META_DOCUMENT_TYPE),
                PayloadIndex {
                    field_name: META_PAGE.to_string(),
                    field_type: PayloadFieldType::Integer,
                },
            ],
        }
    }
}
