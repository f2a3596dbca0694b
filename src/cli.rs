//! Command-line interface definition for RagChat
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};

/// RagChat - terminal chat client for a remote RAG endpoint
///
/// Sends each message to the configured endpoint and keeps a running
/// transcript of the session.
#[derive(Parser, Debug, Clone)]
#[command(name = "ragchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the endpoint URL from config
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Session identifier mode: none, generated or external
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for RagChat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Send a single message and print the answer
    Ask {
        /// Message text
        message: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            endpoint: None,
            session: None,
            command: Commands::Chat,
        }
    }
}
