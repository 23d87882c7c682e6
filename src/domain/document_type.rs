use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Procedure,
    Policy,
    Manual,
    Report,
    Unknown,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Procedure,
        DocumentType::Policy,
        DocumentType::Manual,
        DocumentType::Report,
        DocumentType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Procedure => "PROCEDURE",
            DocumentType::Policy => "POLICY",
            DocumentType::Manual => "MANUAL",
            DocumentType::Report => "REPORT",
            DocumentType::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PROCEDURE" => Ok(DocumentType::Procedure),
            "POLICY" => Ok(DocumentType::Policy),
            "MANUAL" => Ok(DocumentType::Manual),
            "REPORT" => Ok(DocumentType::Report),
            "UNKNOWN" => Ok(DocumentType::Unknown),
            _ => Err(format!("Invalid document type: {}", s)),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
