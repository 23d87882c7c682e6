use docroute::application::ports::{TextSpan, TextSplitter};
use docroute::infrastructure::text_processing::SlidingWindowSplitter;

#[test]
fn given_text_when_sliding_then_windows_advance_by_size_minus_overlap() {
    let splitter = SlidingWindowSplitter::new(4, 1);

    let spans = splitter.split("abcdefghij");

    let summary: Vec<(&str, usize, usize)> = spans
        .iter()
        .map(|s| (s.text.as_str(), s.offset, s.overlap))
        .collect();
    assert_eq!(
        summary,
        vec![("abcd", 0, 0), ("defg", 3, 1), ("ghij", 6, 1)]
    );
}

#[test]
fn given_windows_when_dropping_overlap_then_source_is_restored() {
    let text = "The quick brown fox jumps over the lazy dog.";
    for (size, overlap) in [(5, 2), (7, 0), (10, 9), (44, 3), (100, 10)] {
        let splitter = SlidingWindowSplitter::new(size, overlap);

        let restored: String = splitter
            .split(text)
            .iter()
            .map(TextSpan::without_overlap)
            .collect();

        assert_eq!(restored, text, "size {size}, overlap {overlap}");
    }
}

#[test]
fn given_text_shorter_than_window_when_sliding_then_returns_single_span() {
    let splitter = SlidingWindowSplitter::new(50, 10);

    let spans = splitter.split("short");

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "short");
}

#[test]
fn given_empty_text_when_sliding_then_returns_no_spans() {
    assert!(SlidingWindowSplitter::new(10, 2).split("").is_empty());
}
