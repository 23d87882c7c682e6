use docroute::domain::PipelineState;

#[test]
fn given_received_when_following_successors_then_walks_to_indexed() {
    let mut state = PipelineState::Received;
    let mut visited = vec![state];
    while let Some(next) = state.next() {
        visited.push(next);
        state = next;
    }

    assert_eq!(
        visited,
        vec![
            PipelineState::Received,
            PipelineState::Extracted,
            PipelineState::Sampled,
            PipelineState::Classified,
            PipelineState::Chunked,
            PipelineState::Embedded,
            PipelineState::Indexed,
        ]
    );
}

#[test]
fn given_terminal_states_when_asking_for_successor_then_none() {
    assert!(PipelineState::Indexed.is_terminal());
    assert!(PipelineState::Errored.is_terminal());
    assert_eq!(PipelineState::Errored.next(), None);
    assert!(!PipelineState::Chunked.is_terminal());
}

#[test]
fn given_state_names_when_parsing_then_round_trips() {
    for state in [PipelineState::Sampled, PipelineState::Errored] {
        assert_eq!(state.as_str().parse::<PipelineState>(), Ok(state));
    }
    assert!("DONE".parse::<PipelineState>().is_err());
}

#[test]
fn given_state_when_serializing_then_uses_screaming_case() {
    let json = serde_json::to_string(&PipelineState::Chunked).unwrap();

    assert_eq!(json, "\"CHUNKED\"");
}
