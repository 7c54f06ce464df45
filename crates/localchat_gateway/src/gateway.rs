//! Inference gateway: backend trait + HTTP implementation for generate-style servers.

use std::time::Instant;

use localchat_observability::{gateway_span, record_duration, record_error};
use tokio::time::timeout;
use tracing::{debug, warn, Instrument, Span};

use crate::config::GatewayConfig;
use crate::extract::ResponseNormalizer;
use crate::types::{FallbackReason, GatewayRequest, GatewayResult};

/// Anything that turns a prompt into displayable text.
///
/// Implementations must not fail: every outcome, including transport errors,
/// is reported as a [`GatewayResult`].
#[async_trait::async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> GatewayResult;
}

/// HTTP gateway for a local model server (Ollama `/api/generate` by default).
///
/// Holds no per-call state; share it behind an `Arc` for concurrent callers.
pub struct OllamaGateway {
    config: GatewayConfig,
    normalizer: ResponseNormalizer,
    client: reqwest::Client,
}

impl OllamaGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            normalizer: ResponseNormalizer::default(),
            client: reqwest::Client::new(),
        }
    }

    /// Replace the response normalizer, e.g. to add extraction strategies.
    pub fn with_normalizer(mut self, normalizer: ResponseNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Request for `prompt` using the configured model and timeout.
    pub fn request(&self, prompt: impl Into<String>) -> GatewayRequest {
        GatewayRequest::new(prompt, self.config.model.clone(), self.config.timeout)
    }

    /// Send `prompt` with the configured defaults.
    pub async fn send_prompt(&self, prompt: impl Into<String>) -> GatewayResult {
        self.send(self.request(prompt)).await
    }

    /// POST the request and read the whole body.
    async fn exchange(&self, request: &GatewayRequest) -> reqwest::Result<(u16, String)> {
        let res = self
            .client
            .post(&self.config.endpoint)
            .json(&request.body())
            .send()
            .await?;
        let status = res.status().as_u16();
        let text = res.text().await?;
        Ok((status, text))
    }

    async fn dispatch(&self, request: GatewayRequest) -> GatewayResult {
        let started = Instant::now();

        // Dropping the exchange future on expiry aborts the in-flight request.
        let result = match timeout(request.timeout, self.exchange(&request)).await {
            Err(_) => {
                warn!(
                    endpoint = %self.config.endpoint,
                    timeout_ms = request.timeout_ms(),
                    "Local LLM request aborted (timeout)"
                );
                GatewayResult::fallback(FallbackReason::Timeout)
            }
            Ok(Err(e)) => {
                record_error(&e);
                GatewayResult::fallback(FallbackReason::Unreachable)
            }
            Ok(Ok((status, body))) => {
                Span::current().record("http.status_code", status);
                debug!(status, body = %body, "Local LLM response");
                let result = self.normalizer.normalize(status, &body);
                if let Some(FallbackReason::BackendError { status }) = result.reason() {
                    warn!(status, "Local LLM returned an error status");
                }
                result
            }
        };

        record_duration("gateway.duration_ms", started.elapsed());
        Span::current().record("gateway.outcome", result.outcome());
        result
    }
}

#[async_trait::async_trait]
impl InferenceBackend for OllamaGateway {
    async fn send(&self, request: GatewayRequest) -> GatewayResult {
        let span = gateway_span!(request.model.as_str(), request.timeout_ms());
        self.dispatch(request).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_config_defaults() {
        let gateway = OllamaGateway::new(
            GatewayConfig::new()
                .with_model("llama3.2")
                .with_timeout(std::time::Duration::from_millis(1500)),
        );
        let request = gateway.request("User: hi\nAssistant:");
        assert_eq!(request.model, "llama3.2");
        assert_eq!(request.timeout_ms(), 1500);
        assert_eq!(request.prompt, "User: hi\nAssistant:");
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_unreachable() {
        let gateway = OllamaGateway::new(GatewayConfig::new().with_endpoint("not a url"));
        let result = gateway.send_prompt("User: hi\nAssistant:").await;
        assert_eq!(result.reason(), Some(FallbackReason::Unreachable));
        assert_eq!(result.text(), crate::types::UNREACHABLE_TEXT);
    }
}
