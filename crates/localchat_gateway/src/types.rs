//! Request/result types for one gateway call.

use std::time::Duration;

use serde::Serialize;

pub const NO_CONTENT_TEXT: &str = "Local model responded but no text was found in the response.";
pub const TIMEOUT_TEXT: &str = "Local LLM request timed out.";
pub const UNREACHABLE_TEXT: &str = "Sorry — local LLM not connected.";

/// Why the gateway substituted a fallback for a model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No response within the timeout bound.
    Timeout,
    /// Connection or transport failure.
    Unreachable,
    /// Backend answered with a non-success status and no usable text.
    BackendError { status: u16 },
    /// Backend answered successfully but no text could be extracted.
    NoContent,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::Timeout => "timeout",
            FallbackReason::Unreachable => "unreachable",
            FallbackReason::BackendError { .. } => "backend_error",
            FallbackReason::NoContent => "no_content",
        }
    }

    /// Human-readable text shown in place of a reply.
    pub fn message(&self) -> String {
        match self {
            FallbackReason::Timeout => TIMEOUT_TEXT.to_string(),
            FallbackReason::Unreachable => UNREACHABLE_TEXT.to_string(),
            FallbackReason::BackendError { status } => {
                format!("Local LLM returned HTTP {status}.")
            }
            FallbackReason::NoContent => NO_CONTENT_TEXT.to_string(),
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::BackendError { status } => write!(f, "backend_error({status})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One outbound request. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub prompt: String,
    pub model: String,
    pub timeout: Duration,
}

impl GatewayRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            timeout,
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// JSON body sent to a generate-style endpoint.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "prompt": self.prompt,
            "stream": false
        })
    }
}

/// Outcome of a gateway call. Both variants carry non-empty displayable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayResult {
    Reply(String),
    Fallback { reason: FallbackReason, text: String },
}

impl GatewayResult {
    pub fn fallback(reason: FallbackReason) -> Self {
        GatewayResult::Fallback {
            text: reason.message(),
            reason,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            GatewayResult::Reply(text) => text,
            GatewayResult::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            GatewayResult::Reply(text) => text,
            GatewayResult::Fallback { text, .. } => text,
        }
    }

    pub fn reason(&self) -> Option<FallbackReason> {
        match self {
            GatewayResult::Reply(_) => None,
            GatewayResult::Fallback { reason, .. } => Some(*reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GatewayResult::Fallback { .. })
    }

    /// Short outcome label for logs and spans.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayResult::Reply(_) => "reply",
            GatewayResult::Fallback { reason, .. } => reason.as_str(),
        }
    }
}
