use crate::application::ports::{TextSpan, TextSplitter};

/// Plain character window that advances by `chunk_size - chunk_overlap`.
pub struct SlidingWindowSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SlidingWindowSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }
}

impl TextSplitter for SlidingWindowSplitter {
    fn split(&self, text: &str) -> Vec<TextSpan> {
        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();
        let step = self.chunk_size - self.chunk_overlap;

        let mut spans = Vec::new();
        let mut offset = 0;

        while offset < total_len {
            let end = (offset + self.chunk_size).min(total_len);
            spans.push(TextSpan {
                text: chars[offset..end].iter().collect(),
                offset,
                overlap: if offset == 0 { 0 } else { self.chunk_overlap },
            });

            if end == total_len {
                break;
            }
            offset += step;
        }

        spans
    }
}
