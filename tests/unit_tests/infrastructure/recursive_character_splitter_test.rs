use docroute::application::ports::{TextSpan, TextSplitter};
use docroute::infrastructure::text_processing::RecursiveCharacterSplitter;
use proptest::prelude::*;

const MIXED_TEXT: &str = "Installation\n\nDownload the archive and unpack it. Run the installer as an \
administrator.\nThen restart the service.\n\n설치 절차는 다음과 같다. 먼저 패키지를 내려받는다.\n\
Configuration values live in appsettings.local.toml and can be overridden per environment.\n\n\
Troubleshooting: check the logs, verify the port, and retry the upload.";

fn reassemble(spans: &[TextSpan]) -> String {
    spans.iter().map(TextSpan::without_overlap).collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[test]
fn given_empty_text_when_splitting_then_returns_no_spans() {
    let splitter = RecursiveCharacterSplitter::new(10, 2);

    assert!(splitter.split("").is_empty());
}

#[test]
fn given_text_shorter_than_size_when_splitting_then_returns_single_span() {
    let splitter = RecursiveCharacterSplitter::new(800, 150);

    let spans = splitter.split("Hello world.\n\nSecond page.");

    assert_eq!(
        spans,
        vec![TextSpan {
            text: "Hello world.\n\nSecond page.".to_string(),
            offset: 0,
            overlap: 0,
        }]
    );
}

#[test]
fn given_many_sizes_and_overlaps_when_splitting_then_dropping_overlap_restores_text() {
    for size in [5, 8, 13, 20, 40, 64, 100] {
        for overlap in [0, 1, 2, 4, size / 2, size - 1] {
            let splitter = RecursiveCharacterSplitter::new(size, overlap);

            let spans = splitter.split(MIXED_TEXT);

            assert_eq!(
                reassemble(&spans),
                MIXED_TEXT,
                "round trip failed for size {size}, overlap {overlap}"
            );
        }
    }
}

#[test]
fn given_many_sizes_when_splitting_then_no_span_exceeds_size() {
    for (size, overlap) in [(5, 1), (12, 3), (30, 10), (50, 0)] {
        let splitter = RecursiveCharacterSplitter::new(size, overlap);

        for span in splitter.split(MIXED_TEXT) {
            assert!(char_len(&span.text) <= size, "span {:?} exceeds {size}", span.text);
        }
    }
}

#[test]
fn given_overlap_when_splitting_then_each_span_repeats_exact_tail_of_previous() {
    let splitter = RecursiveCharacterSplitter::new(40, 7);

    let spans = splitter.split(MIXED_TEXT);

    assert!(spans.len() > 2);
    assert_eq!(spans[0].overlap, 0);
    for pair in spans.windows(2) {
        let previous: Vec<char> = pair[0].text.chars().collect();
        let tail: String = previous[previous.len() - 7..].iter().collect();
        let head: String = pair[1].text.chars().take(7).collect();
        assert_eq!(pair[1].overlap, 7);
        assert_eq!(head, tail);
    }
}

#[test]
fn given_spans_when_splitting_then_offsets_locate_text_in_source() {
    let splitter = RecursiveCharacterSplitter::new(25, 5);
    let source: Vec<char> = MIXED_TEXT.chars().collect();

    for span in splitter.split(MIXED_TEXT) {
        let located: String = source[span.offset..span.offset + char_len(&span.text)]
            .iter()
            .collect();
        assert_eq!(located, span.text);
    }
}

#[test]
fn given_paragraph_break_in_window_when_splitting_then_cuts_after_paragraph() {
    let splitter = RecursiveCharacterSplitter::new(15, 0);

    let spans = splitter.split("aaaa bbbb.\n\ncccc dddd.");

    let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["aaaa bbbb.\n\n", "cccc dddd."]);
}

#[test]
fn given_no_separator_in_window_when_splitting_then_falls_back_to_hard_cut() {
    let splitter = RecursiveCharacterSplitter::new(4, 0);

    let spans = splitter.split("abcdefghij");

    let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn given_overlap_not_below_size_when_creating_then_overlap_is_clamped() {
    let splitter = RecursiveCharacterSplitter::new(5, 10);

    let spans = splitter.split("abcdefghijklmnop");

    assert_eq!(reassemble(&spans), "abcdefghijklmnop");
    assert!(spans.iter().skip(1).all(|s| s.overlap == 4));
}

#[test]
fn given_multibyte_text_when_splitting_then_round_trips_by_characters() {
    let text = "금융 규정 제1조 목적. 이 규정은 회사의 자금 관리 기준을 정한다.\n제2조 적용 범위.";
    let splitter = RecursiveCharacterSplitter::new(9, 3);

    let spans = splitter.split(text);

    assert_eq!(reassemble(&spans), text);
    assert!(spans.iter().all(|s| char_len(&s.text) <= 9));
}

proptest! {
    #[test]
    fn given_any_text_and_valid_parameters_when_splitting_then_spans_round_trip_within_size(
        text in "[a-z가-힣 .\n]{0,400}",
        size in 1usize..80,
        overlap_seed in 0usize..80,
    ) {
        let overlap = overlap_seed % size;
        let splitter = RecursiveCharacterSplitter::new(size, overlap);

        let spans = splitter.split(&text);

        prop_assert_eq!(reassemble(&spans), text.clone());
        for (index, span) in spans.iter().enumerate() {
            prop_assert!(char_len(&span.text) <= size);
            prop_assert_eq!(span.overlap, if index == 0 { 0 } else { overlap });
        }
    }
}
