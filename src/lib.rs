//! RagChat - terminal chat client library
//!
//! This library sends user messages to a remote text-generation / RAG
//! endpoint and keeps the per-session transcript of questions and answers.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `client`: request payload encoding and the HTTP endpoint client
//! - `session`: per-session state store, transcript and session identifier
//! - `chat`: the request handler that ties a client to a session
//! - `commands`: interactive and one-shot CLI command handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use ragchat::{ChatSession, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let mut session = ChatSession::from_config(&config)?;
//!     if let Some(reply) = session.submit("How do I charge my car?").await? {
//!         println!("{}", reply.output);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use chat::{ChatSession, Reply};
pub use client::{ChatAnswer, ChatEndpoint, HttpChatClient, RequestPayload};
pub use config::Config;
pub use error::{RagChatError, Result};
pub use session::{SessionId, SessionState, Transcript, Turn};
