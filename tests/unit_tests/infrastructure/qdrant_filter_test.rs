use docroute::domain::{RangeBounds, VectorFilter};
use docroute::infrastructure::persistence::QdrantAdapter;
use qdrant_client::qdrant::condition::ConditionOneOf;

#[test]
fn given_no_filters_when_building_then_returns_none() {
    assert!(QdrantAdapter::build_filter(&[]).is_none());
}

#[test]
fn given_several_filters_when_building_then_all_become_must_conditions() {
    let filters = [
        VectorFilter::matches("role", "child"),
        VectorFilter::matches("page", 3),
        VectorFilter::range(
            "page",
            RangeBounds {
                lte: Some(10.0),
                ..RangeBounds::default()
            },
        ),
    ];

    let filter = QdrantAdapter::build_filter(&filters).unwrap();

    assert_eq!(filter.must.len(), 3);
    assert!(filter.should.is_empty());
}

#[test]
fn given_float_match_when_building_then_uses_closed_range() {
    let filter = QdrantAdapter::build_filter(&[VectorFilter::matches("score", 0.5)]).unwrap();

    let Some(ConditionOneOf::Field(field)) = &filter.must[0].condition_one_of else {
        panic!("expected a field condition");
    };
    let range = field.range.as_ref().unwrap();
    assert_eq!(field.key, "score");
    assert_eq!(range.gte, Some(0.5));
    assert_eq!(range.lte, Some(0.5));
}

#[tokio::test]
async fn given_url_when_creating_adapter_then_client_builds_without_connecting() {
    assert!(QdrantAdapter::new("http://localhost:6334", None).is_ok());
}
