use docroute::domain::Embedding;

#[test]
fn given_identical_vectors_when_computing_cosine_then_returns_one() {
    let a = Embedding::new(vec![1.0, 2.0, 3.0]);
    let b = Embedding::new(vec![1.0, 2.0, 3.0]);

    assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-6);
}

#[test]
fn given_orthogonal_vectors_when_computing_cosine_then_returns_zero() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![0.0, 1.0]);

    assert!(a.cosine_similarity(&b).abs() < 1e-6);
}

#[test]
fn given_different_dimensions_when_computing_cosine_then_returns_zero() {
    let a = Embedding::new(vec![1.0, 0.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_zero_vector_when_computing_cosine_then_returns_zero() {
    let a = Embedding::new(vec![0.0, 0.0]);
    let b = Embedding::new(vec![1.0, 1.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_vec_when_converting_then_keeps_dimensions() {
    let embedding: Embedding = vec![0.5; 1536].into();

    assert_eq!(embedding.dimensions(), 1536);
}
