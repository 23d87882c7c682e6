use docroute::application::ports::SplitterFactory;
use docroute::domain::{ChunkStrategy, SplitParams};
use docroute::infrastructure::text_processing::TextSplitterFactory;

#[test]
fn given_pass_through_when_building_splitter_then_returns_none() {
    assert!(TextSplitterFactory.splitter_for(ChunkStrategy::PassThrough).is_none());
}

#[test]
fn given_recursive_strategy_when_building_splitter_then_honors_parameters() {
    let splitter = TextSplitterFactory
        .splitter_for(ChunkStrategy::RecursiveSplit(SplitParams::new(4, 0)))
        .unwrap();

    let spans = splitter.split("abcdefgh");

    assert_eq!(spans.len(), 2);
}

#[test]
fn given_sliding_strategy_when_building_splitter_then_honors_parameters() {
    let splitter = TextSplitterFactory
        .splitter_for(ChunkStrategy::SlidingWindow(SplitParams::new(4, 2)))
        .unwrap();

    let offsets: Vec<usize> = splitter.split("abcdefgh").iter().map(|s| s.offset).collect();

    assert_eq!(offsets, vec![0, 2, 4]);
}
