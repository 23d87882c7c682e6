use async_trait::async_trait;

use crate::application::ports::{StructuredParser, StructuredParserError};
use crate::domain::{ContentUnit, Document};

/// In-process stand-in for an external structured parser: every page
/// becomes one unit with its page metadata intact.
#[derive(Debug, Default, Clone, Copy)]
pub struct PagePassThroughParser;

impl PagePassThroughParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StructuredParser for PagePassThroughParser {
    async fn parse(&self, document: &Document) -> Result<Vec<ContentUnit>, StructuredParserError> {
        Ok(document.units().to_vec())
    }
}
