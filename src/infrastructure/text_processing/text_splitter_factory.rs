use crate::application::ports::{SplitterFactory, TextSplitter};
use crate::domain::ChunkStrategy;

use super::{RecursiveCharacterSplitter, SlidingWindowSplitter};

#[derive(Debug, Default, Clone, Copy)]
pub struct TextSplitterFactory;

impl SplitterFactory for TextSplitterFactory {
    fn splitter_for(&self, strategy: ChunkStrategy) -> Option<Box<dyn TextSplitter>> {
        match strategy {
            ChunkStrategy::PassThrough => None,
            ChunkStrategy::RecursiveSplit(params) => Some(Box::new(
                RecursiveCharacterSplitter::new(params.size, params.overlap),
            )),
            ChunkStrategy::SlidingWindow(params) => Some(Box::new(SlidingWindowSplitter::new(
                params.size,
                params.overlap,
            ))),
        }
    }
}
