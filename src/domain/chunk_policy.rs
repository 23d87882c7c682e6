use serde::{Deserialize, Serialize};

use super::DocumentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitParams {
    pub size: usize,
    pub overlap: usize,
}

impl SplitParams {
    pub const fn new(size: usize, overlap: usize) -> Self {
        Self { size, overlap }
    }

    pub fn is_valid(&self) -> bool {
        self.size > 0 && self.overlap < self.size
    }
}

/// Chunking behaviour applied to a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Hand the document to the structured parser untouched.
    PassThrough,
    RecursiveSplit(SplitParams),
    SlidingWindow(SplitParams),
}

impl ChunkStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ChunkStrategy::PassThrough => "pass_through",
            ChunkStrategy::RecursiveSplit(_) => "recursive_split",
            ChunkStrategy::SlidingWindow(_) => "sliding_window",
        }
    }

    pub fn params(&self) -> Option<SplitParams> {
        match self {
            ChunkStrategy::PassThrough => None,
            ChunkStrategy::RecursiveSplit(params) | ChunkStrategy::SlidingWindow(params) => {
                Some(*params)
            }
        }
    }
}

pub const MANUAL_SPLIT: SplitParams = SplitParams::new(1500, 200);
pub const GENERAL_SPLIT: SplitParams = SplitParams::new(800, 150);

/// Document type to chunking strategy mapping. One slot per type so every
/// variant is covered by an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkPolicyTable {
    pub procedure: ChunkStrategy,
    pub policy: ChunkStrategy,
    pub manual: ChunkStrategy,
    pub report: ChunkStrategy,
    pub unknown: ChunkStrategy,
}

impl Default for ChunkPolicyTable {
    fn default() -> Self {
        Self {
            procedure: ChunkStrategy::RecursiveSplit(GENERAL_SPLIT),
            policy: ChunkStrategy::PassThrough,
            manual: ChunkStrategy::RecursiveSplit(MANUAL_SPLIT),
            report: ChunkStrategy::RecursiveSplit(GENERAL_SPLIT),
            unknown: ChunkStrategy::RecursiveSplit(GENERAL_SPLIT),
        }
    }
}

impl ChunkPolicyTable {
    pub fn strategy_for(&self, document_type: DocumentType) -> ChunkStrategy {
        match document_type {
            DocumentType::Procedure => self.procedure,
            DocumentType::Policy => self.policy,
            DocumentType::Manual => self.manual,
            DocumentType::Report => self.report,
            DocumentType::Unknown => self.unknown,
        }
    }

    /// Returns the first document type whose split parameters are unusable.
    pub fn first_invalid(&self) -> Option<DocumentType> {
        DocumentType::ALL.into_iter().find(|doc_type| {
            self.strategy_for(*doc_type)
                .params()
                .is_some_and(|params| !params.is_valid())
        })
    }
}
