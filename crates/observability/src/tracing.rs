//! Span helpers shared by the gateway and the CLI.

/// Create a span for one inference gateway call
///
/// Declares the fields that [`record_duration`](crate::record_duration) and
/// [`record_error`](crate::record_error) fill in later.
///
/// ```rust
/// use localchat_observability::gateway_span;
///
/// let span = gateway_span!("gemma2:9b", 8000u64);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! gateway_span {
    ($model:expr, $timeout_ms:expr) => {
        tracing::info_span!(
            "gateway.request",
            llm.model = $model,
            gateway.timeout_ms = $timeout_ms,
            gateway.outcome = tracing::field::Empty,
            gateway.duration_ms = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and log it
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record latency in milliseconds on the current span
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
