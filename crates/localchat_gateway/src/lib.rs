//! localchat-gateway: prompt context window, inference gateway, response normalization.
//!
//! The gateway never fails: every call resolves to a [`GatewayResult`] carrying
//! displayable text, either the model's reply or a fallback message.
//!
//! ```rust,no_run
//! use localchat_gateway::{ChatSession, GatewayConfig, OllamaGateway};
//! use std::sync::Arc;
//!
//! # async fn demo() -> localchat_core::Result<()> {
//! let config = GatewayConfig::from_env();
//! let gateway = Arc::new(OllamaGateway::new(config.clone()));
//! let mut session = ChatSession::new(gateway, &config);
//!
//! let reply = session.send("Hello there").await?;
//! println!("{}", reply.text());
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod extract;
mod gateway;
mod session;
mod types;

pub use config::{
    GatewayConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_MS, ENV_LLM_URL,
    ENV_MAX_PAIRS, ENV_MODEL, ENV_TIMEOUT_MS,
};
pub use context::{build_prompt, context_window, DEFAULT_MAX_PAIRS};
pub use extract::{default_strategies, ExtractStrategy, ResponseNormalizer, MAX_RAW_TEXT_CHARS};
pub use gateway::{InferenceBackend, OllamaGateway};
pub use session::ChatSession;
pub use types::{
    FallbackReason, GatewayRequest, GatewayResult, NO_CONTENT_TEXT, TIMEOUT_TEXT,
    UNREACHABLE_TEXT,
};
