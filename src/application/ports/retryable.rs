use std::time::Duration;

/// Tells a retry policy whether a failure is transient.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Failure of a call to an external collaborator. Such calls are bounded by
/// a per-attempt timeout that must be expressible as the port's own error.
pub trait TransportError: Retryable + Sized {
    fn timed_out(after: Duration) -> Self;
}
