//! Chat session handler
//!
//! A [`ChatSession`] owns everything one conversation needs: the endpoint
//! client, the session state store and the optional session identifier.
//! Front ends call [`ChatSession::submit`] once per message.
//!
//! Request failures never escape `submit`. Transport errors and malformed
//! responses are turned into display text and recorded in the transcript in
//! place of an answer, so every submitted message produces exactly one turn.

use crate::client::{ChatEndpoint, HttpChatClient};
use crate::config::{Config, SessionMode};
use crate::error::{RagChatError, Result};
use crate::session::{SessionId, SessionState, Transcript};

/// Environment variable a hosting runtime uses to hand over the session id
pub const SESSION_ID_ENV: &str = "RAGCHAT_SESSION_ID";

/// Result of one submitted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text recorded as the turn's output
    pub output: String,
    /// Document sources cited by the endpoint, if any
    pub sources: Vec<String>,
    /// Whether `output` is error text rather than an endpoint answer
    pub is_error: bool,
}

/// One interactive conversation with the endpoint
pub struct ChatSession {
    endpoint: Box<dyn ChatEndpoint>,
    state: SessionState,
    session_id: Option<SessionId>,
}

impl ChatSession {
    /// Create a session around an endpoint
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Client used for every message in this session
    /// * `session_id` - Identifier sent with each message, if any
    pub fn new(endpoint: Box<dyn ChatEndpoint>, session_id: Option<SessionId>) -> Self {
        match &session_id {
            Some(id) => tracing::info!("Starting chat session {}", id),
            None => tracing::info!("Starting chat session without identifier"),
        }

        Self {
            endpoint,
            state: SessionState::new(),
            session_id,
        }
    }

    /// Create a session from configuration
    ///
    /// Builds an [`HttpChatClient`] and resolves the session identifier once:
    /// generated in [`SessionMode::Generated`], read from
    /// `RAGCHAT_SESSION_ID` in [`SessionMode::External`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built, or
    /// `RagChatError::SessionUnavailable` if an external identifier is
    /// required but not set
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpChatClient::new(&config.endpoint)?;
        let session_id = match config.chat.session_mode {
            SessionMode::None => None,
            SessionMode::Generated => Some(SessionId::generate()),
            SessionMode::External => Some(SessionId::from_runtime(
                std::env::var(SESSION_ID_ENV).ok(),
            )?),
        };
        Ok(Self::new(Box::new(client), session_id))
    }

    /// Identifier sent with each message, if any
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Read-only access to the session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Full transcript, oldest first
    pub fn transcript(&self) -> Transcript {
        self.state.read_all()
    }

    /// Handle one submitted message
    ///
    /// Blank input is ignored: no request is sent and no turn is recorded,
    /// and `Ok(None)` is returned. Otherwise exactly one turn is appended,
    /// holding either the answer or the error text.
    ///
    /// # Errors
    ///
    /// Only state-store failures are returned; request failures become the
    /// turn's output.
    pub async fn submit(&mut self, input: &str) -> Result<Option<Reply>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        self.state.set_input(input);
        tracing::info!("Submitting message ({} chars)", input.chars().count());

        let reply = match self.endpoint.ask(input, self.session_id.as_ref()).await {
            Ok(answer) => Reply {
                output: answer.answer,
                sources: answer.sources,
                is_error: false,
            },
            Err(e) => {
                tracing::error!("Request failed: {:#}", e);
                Reply {
                    output: error_text(&e),
                    sources: Vec::new(),
                    is_error: true,
                }
            }
        };

        self.state.append_turn(input, reply.output.clone())?;
        self.state.set_input("");

        Ok(Some(reply))
    }
}

/// Text recorded in the transcript when a request fails
///
/// Malformed responses keep their own message so the turn reads like a
/// remote error; other failures are prefixed with `Error:`.
pub fn error_text(err: &anyhow::Error) -> String {
    match err.downcast_ref::<RagChatError>() {
        Some(e) if matches!(e, RagChatError::MalformedResponse(_)) => e.to_string(),
        Some(e) => format!("Error: {}", e),
        None => format!("Error: {:#}", err),
    }
}
