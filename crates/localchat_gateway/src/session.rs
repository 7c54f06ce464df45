//! Chat session: the transcript controller that drives prompt building and the gateway.

use std::sync::Arc;
use std::time::Duration;

use localchat_core::{Conversation, LocalChatError, Result, Turn};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::context::build_prompt;
use crate::gateway::InferenceBackend;
use crate::types::{GatewayRequest, GatewayResult};

/// One in-memory conversation bound to a backend.
///
/// `send` takes `&mut self`, so calls for a conversation are serialized and
/// every prompt sees the complete, ordered history.
pub struct ChatSession {
    backend: Arc<dyn InferenceBackend>,
    conversation: Conversation,
    model: String,
    timeout: Duration,
    max_pairs: usize,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn InferenceBackend>, config: &GatewayConfig) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
            model: config.model.clone(),
            timeout: config.timeout,
            max_pairs: config.max_pairs,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Drop the history and start over.
    pub fn clear(&mut self) {
        self.conversation = Conversation::new();
    }

    /// Send one user message and record both sides of the exchange.
    ///
    /// Input is trimmed; blank input is rejected with
    /// [`LocalChatError::EmptyInput`] and leaves the conversation untouched.
    /// The assistant turn holds the result text, fallbacks included.
    pub async fn send(&mut self, input: &str) -> Result<GatewayResult> {
        let utterance = input.trim();
        if utterance.is_empty() {
            return Err(LocalChatError::EmptyInput);
        }

        let prompt = build_prompt(self.conversation.turns(), utterance, self.max_pairs);
        self.conversation.push(Turn::user(utterance));
        debug!(
            turns = self.conversation.len(),
            prompt_chars = prompt.len(),
            "Sending chat turn"
        );

        let request = GatewayRequest::new(prompt, self.model.clone(), self.timeout);
        let result = self.backend.send(request).await;

        self.conversation.push(Turn::assistant(result.text()));
        Ok(result)
    }
}
