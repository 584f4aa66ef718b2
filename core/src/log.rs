//! Progress output for the request pipeline.
//!
//! The pipeline reports what it is doing through `RequestLog` instead of
//! writing to stdout, so callers can route or capture it. Nothing a caller
//! depends on programmatically goes through here.

/// Sink for human-readable progress lines.
pub trait RequestLog: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards progress lines to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl RequestLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!(target: "http_helper", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "http_helper", "{message}");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl RequestLog for NoopLog {
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
