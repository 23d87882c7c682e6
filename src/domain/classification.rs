use serde::Serialize;

use super::DocumentType;

/// Inferred document type with the model's confidence and rationale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub document_type: DocumentType,
    pub confidence: f64,
    pub reason: String,
}

impl Classification {
    /// Confidence is clamped to `[0, 1]`; NaN becomes 0.
    pub fn new(document_type: DocumentType, confidence: f64, reason: impl Into<String>) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            document_type,
            confidence,
            reason: reason.into(),
        }
    }

    pub fn unknown(reason: impl Into<String>) -> Self {
        Self::new(DocumentType::Unknown, 0.0, reason)
    }
}
