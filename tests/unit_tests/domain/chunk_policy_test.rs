use docroute::domain::{
    ChunkPolicyTable, ChunkStrategy, DocumentType, GENERAL_SPLIT, MANUAL_SPLIT, SplitParams,
};

#[test]
fn given_default_table_when_looking_up_manual_then_uses_large_recursive_split() {
    let table = ChunkPolicyTable::default();

    assert_eq!(
        table.strategy_for(DocumentType::Manual),
        ChunkStrategy::RecursiveSplit(SplitParams::new(1500, 200))
    );
    assert_eq!(MANUAL_SPLIT, SplitParams::new(1500, 200));
}

#[test]
fn given_default_table_when_looking_up_general_types_then_uses_standard_split() {
    let table = ChunkPolicyTable::default();

    for document_type in [DocumentType::Procedure, DocumentType::Report, DocumentType::Unknown] {
        assert_eq!(
            table.strategy_for(document_type),
            ChunkStrategy::RecursiveSplit(GENERAL_SPLIT)
        );
    }
    assert_eq!(GENERAL_SPLIT, SplitParams::new(800, 150));
}

#[test]
fn given_default_table_when_looking_up_policy_then_passes_through() {
    let table = ChunkPolicyTable::default();

    assert_eq!(table.strategy_for(DocumentType::Policy), ChunkStrategy::PassThrough);
    assert_eq!(ChunkStrategy::PassThrough.params(), None);
}

#[test]
fn given_default_table_when_validating_then_every_entry_is_usable() {
    assert_eq!(ChunkPolicyTable::default().first_invalid(), None);
}

#[test]
fn given_overlap_not_below_size_when_validating_then_reports_document_type() {
    let table = ChunkPolicyTable {
        report: ChunkStrategy::SlidingWindow(SplitParams::new(100, 100)),
        ..ChunkPolicyTable::default()
    };

    assert_eq!(table.first_invalid(), Some(DocumentType::Report));
}

#[test]
fn given_split_params_when_checking_validity_then_requires_positive_size_and_smaller_overlap() {
    assert!(SplitParams::new(10, 9).is_valid());
    assert!(SplitParams::new(10, 0).is_valid());
    assert!(!SplitParams::new(10, 10).is_valid());
    assert!(!SplitParams::new(0, 0).is_valid());
}

#[test]
fn given_partial_json_when_deserializing_table_then_missing_types_keep_defaults() {
    let json = r#"{"manual": {"kind": "sliding_window", "size": 400, "overlap": 40}}"#;

    let table: ChunkPolicyTable = serde_json::from_str(json).unwrap();

    assert_eq!(
        table.manual,
        ChunkStrategy::SlidingWindow(SplitParams::new(400, 40))
    );
    assert_eq!(table.policy, ChunkStrategy::PassThrough);
}

#[test]
fn given_strategies_when_naming_then_names_are_stable() {
    assert_eq!(ChunkStrategy::PassThrough.name(), "pass_through");
    assert_eq!(ChunkStrategy::RecursiveSplit(GENERAL_SPLIT).name(), "recursive_split");
    assert_eq!(ChunkStrategy::SlidingWindow(GENERAL_SPLIT).name(), "sliding_window");
}
