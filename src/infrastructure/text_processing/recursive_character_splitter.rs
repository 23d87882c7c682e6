use crate::application::ports::{TextSpan, TextSplitter};

/// Cut points in priority order. A cut is placed right after the separator
/// so no character is ever dropped.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ".", " "];

/// Fixed-size splitter that prefers paragraph, line, sentence and word
/// boundaries before falling back to a raw character cut.
///
/// Every chunk after the first starts with exactly `chunk_overlap`
/// characters taken from the end of the previous chunk.
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    /// Expects `chunk_overlap < chunk_size`; an oversized overlap is clamped.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    fn find_cut(chars: &[char], min_cut: usize, max_cut: usize) -> usize {
        for separator in SEPARATORS {
            let sep: Vec<char> = separator.chars().collect();
            let found = (min_cut.max(sep.len())..=max_cut)
                .rev()
                .find(|&cut| chars[cut - sep.len()..cut] == sep[..]);
            if let Some(cut) = found {
                return cut;
            }
        }
        max_cut
    }
}

impl TextSplitter for RecursiveCharacterSplitter {
    fn split(&self, text: &str) -> Vec<TextSpan> {
        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();

        if total_len == 0 {
            return Vec::new();
        }

        let mut spans = Vec::new();
        let mut start = 0;

        loop {
            let carried = if spans.is_empty() {
                0
            } else {
                self.chunk_overlap
            };
            let window_end = (start + self.chunk_size - carried).min(total_len);

            let cut = if window_end == total_len {
                total_len
            } else {
                // The first cut must leave enough text to seed the next overlap.
                let min_cut = if spans.is_empty() {
                    self.chunk_overlap.max(1)
                } else {
                    start + 1
                };
                Self::find_cut(&chars, min_cut, window_end)
            };

            let offset = start - carried;
            spans.push(TextSpan {
                text: chars[offset..cut].iter().collect(),
                offset,
                overlap: carried,
            });

            if cut == total_len {
                break;
            }
            start = cut;
        }

        spans
    }
}
