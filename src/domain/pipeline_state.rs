use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Stages of one document's trip through the ingestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Received,
    Extracted,
    Sampled,
    Classified,
    Chunked,
    Embedded,
    Indexed,
    Errored,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Received => "RECEIVED",
            PipelineState::Extracted => "EXTRACTED",
            PipelineState::Sampled => "SAMPLED",
            PipelineState::Classified => "CLASSIFIED",
            PipelineState::Chunked => "CHUNKED",
            PipelineState::Embedded => "EMBEDDED",
            PipelineState::Indexed => "INDEXED",
            PipelineState::Errored => "ERRORED",
        }
    }

    /// The state a successful transition leads to. Terminal and absorbing
    /// states have no successor.
    pub fn next(&self) -> Option<PipelineState> {
        match self {
            PipelineState::Received => Some(PipelineState::Extracted),
            PipelineState::Extracted => Some(PipelineState::Sampled),
            PipelineState::Sampled => Some(PipelineState::Classified),
            PipelineState::Classified => Some(PipelineState::Chunked),
            PipelineState::Chunked => Some(PipelineState::Embedded),
            PipelineState::Embedded => Some(PipelineState::Indexed),
            PipelineState::Indexed | PipelineState::Errored => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Indexed | PipelineState::Errored)
    }
}

impl FromStr for PipelineState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEIVED" => Ok(PipelineState::Received),
            "EXTRACTED" => Ok(PipelineState::Extracted),
            "SAMPLED" => Ok(PipelineState::Sampled),
            "CLASSIFIED" => Ok(PipelineState::Classified),
            "CHUNKED" => Ok(PipelineState::Chunked),
            "EMBEDDED" => Ok(PipelineState::Embedded),
            "INDEXED" => Ok(PipelineState::Indexed),
            "ERRORED" => Ok(PipelineState::Errored),
            _ => Err(format!("Invalid pipeline state: {}", s)),
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
