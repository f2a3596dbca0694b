//! Chat request client
//!
//! This module turns one user message into one answer. The
//! [`ChatEndpoint`] trait is the seam the chat session talks to;
//! [`HttpChatClient`] is the real implementation that speaks the remote
//! endpoint's base64-in-a-JSON-string contract.
//!
//! # Outcomes
//!
//! - HTTP 200 with an `answer` field: `Ok(answer)`
//! - Any other status: `Ok(raw body)`, the body stands in for the answer
//! - HTTP 200 without a usable `answer`: `Err(RagChatError::MalformedResponse)`
//! - The request itself fails: `Err(RagChatError::Transport)`

pub mod http;
pub mod payload;

pub use http::HttpChatClient;
pub use payload::RequestPayload;

use crate::error::Result;
use crate::session::SessionId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Answer returned by the endpoint, with any cited sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// Answer text (or the raw error body for non-200 responses)
    pub answer: String,
    /// `metadata.source` of each retrieved document, in response order
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatAnswer {
    /// An answer with no sources
    pub fn text(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
        }
    }
}

/// Something that can answer a chat message
///
/// Each call is an independent request; implementations keep no
/// per-conversation state beyond what the caller passes in.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send one message and return the answer with its sources
    ///
    /// # Arguments
    ///
    /// * `user_input` - Non-empty message text
    /// * `session_id` - Conversation identifier, if the session uses one
    async fn ask(&self, user_input: &str, session_id: Option<&SessionId>) -> Result<ChatAnswer>;

    /// Send one message and return only the answer text
    async fn send(&self, user_input: &str, session_id: Option<&SessionId>) -> Result<String> {
        Ok(self.ask(user_input, session_id).await?.answer)
    }
}
