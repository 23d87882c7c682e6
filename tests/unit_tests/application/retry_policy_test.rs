use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use docroute::application::ports::{EmbedderError, LlmClientError, Retryable};
use docroute::application::services::{
    DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, Jitter, RetryPolicy,
};

use crate::support::fast_retry;

#[tokio::test]
async fn given_transient_failures_when_running_then_retries_until_success() {
    let policy = fast_retry(3);
    let calls = AtomicU32::new(0);

    let result: Result<u32, LlmClientError> = policy
        .run("test_call", || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if attempt < 3 {
                    Err(LlmClientError::ApiRequestFailed("503".to_string()))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_permanent_failure_when_running_then_does_not_retry() {
    let policy = fast_retry(5);
    let calls = AtomicU32::new(0);

    let result: Result<(), LlmClientError> = policy
        .run("test_call", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(LlmClientError::InvalidResponse("bad body".to_string())) }
        })
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_unauthorized_response_when_running_then_does_not_retry() {
    let policy = fast_retry(5);
    let calls = AtomicU32::new(0);

    let result: Result<(), LlmClientError> = policy
        .run("test_call", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(LlmClientError::from_status(401, "invalid api key".to_string())) }
        })
        .await;

    assert!(matches!(result, Err(LlmClientError::Rejected { status: 401, .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn given_http_statuses_when_mapping_errors_then_only_transient_ones_are_retryable() {
    for status in [400, 401, 403, 404, 422] {
        assert!(!LlmClientError::from_status(status, String::new()).is_retryable());
        assert!(!EmbedderError::from_status(status, String::new()).is_retryable());
    }
    for status in [408, 429, 500, 502, 503] {
        assert!(LlmClientError::from_status(status, String::new()).is_retryable());
        assert!(EmbedderError::from_status(status, String::new()).is_retryable());
    }
    assert!(matches!(
        EmbedderError::from_status(429, String::new()),
        EmbedderError::RateLimited
    ));
}

#[tokio::test]
async fn given_persistent_transient_failure_when_running_then_stops_at_max_attempts() {
    let policy = fast_retry(3);
    let calls = AtomicU32::new(0);

    let result: Result<(), LlmClientError> = policy
        .run("test_call", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(LlmClientError::RateLimited) }
        })
        .await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_slow_call_when_running_then_each_attempt_times_out() {
    let policy = fast_retry(2).with_attempt_timeout(Duration::from_millis(20));
    let calls = AtomicU32::new(0);

    let result: Result<(), LlmClientError> = policy
        .run("test_call", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            }
        })
        .await;

    assert!(matches!(result, Err(LlmClientError::Timeout(d)) if d == Duration::from_millis(20)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn given_backoff_settings_when_computing_delays_then_grows_exponentially_up_to_cap() {
    let policy = RetryPolicy::new(6)
        .with_backoff(Duration::from_millis(100), 2.0, Duration::from_secs(1))
        .with_jitter(Jitter::None);

    assert_eq!(policy.delay_for(1), Duration::from_millis(100));
    assert_eq!(policy.delay_for(2), Duration::from_millis(200));
    assert_eq!(policy.delay_for(3), Duration::from_millis(400));
    assert_eq!(policy.delay_for(5), Duration::from_secs(1));
}

#[test]
fn given_full_jitter_when_computing_delay_then_never_exceeds_base() {
    let policy = RetryPolicy::new(3)
        .with_backoff(Duration::from_millis(200), 2.0, Duration::from_secs(2))
        .with_jitter(Jitter::Full);

    for attempt in 1..=4 {
        for _ in 0..50 {
            assert!(policy.delay_for(attempt) <= policy.base_delay(attempt));
        }
    }
}

#[test]
fn given_zero_attempts_when_creating_then_allows_one_attempt() {
    assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
}

#[test]
fn given_default_policy_when_inspecting_then_uses_documented_defaults() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    assert_eq!(policy.attempt_timeout(), DEFAULT_ATTEMPT_TIMEOUT);
    assert_eq!(policy.base_delay(1), Duration::from_millis(500));
}
