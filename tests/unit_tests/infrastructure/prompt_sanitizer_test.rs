use docroute::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_trimmed_prompt() {
    assert_eq!(sanitize_prompt("  What is the refund policy?  "), "What is the refund policy?");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_length_note() {
    let prompt = "a".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert_eq!(sanitized, format!("{}... (150 chars total)", "a".repeat(100)));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "규정".repeat(80);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"규정".repeat(50)));
    assert!(sanitized.ends_with("(160 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_every_occurrence_is_redacted() {
    let sanitized = sanitize_prompt("Bearer abc123 then token=xyz&token=second password=hunter2");

    assert_eq!(
        sanitized,
        "Bearer [REDACTED] then token=[REDACTED]&token=[REDACTED] password=[REDACTED]"
    );
}
