use crate::domain::ChunkStrategy;

/// A piece of split text located in its source by character offset.
///
/// The first `overlap` characters repeat the tail of the previous span, so
/// dropping them from every span and concatenating yields the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub offset: usize,
    pub overlap: usize,
}

impl TextSpan {
    /// Offset of the first character that is not carried over from the previous span.
    pub fn content_start(&self) -> usize {
        self.offset + self.overlap
    }

    pub fn without_overlap(&self) -> &str {
        match self.text.char_indices().nth(self.overlap) {
            Some((byte_idx, _)) => &self.text[byte_idx..],
            None => "",
        }
    }
}

pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<TextSpan>;
}

/// Builds the splitter a chunking strategy calls for.
pub trait SplitterFactory: Send + Sync {
    /// `None` for strategies that do not split text themselves.
    fn splitter_for(&self, strategy: ChunkStrategy) -> Option<Box<dyn TextSplitter>>;
}
