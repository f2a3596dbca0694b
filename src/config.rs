//! Configuration management for RagChat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{RagChatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Endpoint used when nothing overrides it
pub const DEFAULT_ENDPOINT: &str =
    "https://9ek0hrjut6.execute-api.us-east-1.amazonaws.com/chat_by_telsa_bot";

/// Main configuration structure for RagChat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,
    /// Chat session behavior
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL every message is POSTed to
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// Request timeout in seconds; unset keeps the HTTP client default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            timeout_seconds: None,
        }
    }
}

/// How a session identifies itself to the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Send the bare user input
    #[default]
    None,
    /// Generate an identifier at session start and send it with every message
    Generated,
    /// Take the identifier from the hosting environment (`RAGCHAT_SESSION_ID`)
    External,
}

impl SessionMode {
    /// Parse a session mode from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::config::SessionMode;
    ///
    /// assert_eq!(SessionMode::parse_str("Generated").unwrap(), SessionMode::Generated);
    /// assert!(SessionMode::parse_str("sticky").is_err());
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "generated" => Ok(Self::Generated),
            "external" => Ok(Self::External),
            other => Err(format!("Unknown session mode: {}", other)),
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Generated => write!(f, "generated"),
            Self::External => write!(f, "external"),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Whether messages carry a session identifier
    #[serde(default)]
    pub session_mode: SessionMode,

    /// Print retrieved document sources under each answer
    #[serde(default)]
    pub show_sources: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed, or if
    /// a CLI override is invalid
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli)?;

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RagChatError::Config(format!("Failed to read config file: {}", e)))?;
        let config = serde_yaml::from_str(&contents).map_err(RagChatError::Yaml)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(url) = std::env::var("RAGCHAT_ENDPOINT") {
            self.endpoint.url = url;
        }

        if let Ok(timeout) = std::env::var("RAGCHAT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.endpoint.timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid RAGCHAT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(mode) = std::env::var("RAGCHAT_SESSION_MODE") {
            match SessionMode::parse_str(&mode) {
                Ok(mode) => self.chat.session_mode = mode,
                Err(e) => tracing::warn!("{}, keeping {}", e, self.chat.session_mode),
            }
        }

        if let Ok(show) = std::env::var("RAGCHAT_SHOW_SOURCES") {
            match show.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.chat.show_sources = true,
                "0" | "false" | "no" => self.chat.show_sources = false,
                _ => tracing::warn!("Invalid RAGCHAT_SHOW_SOURCES: {}", show),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) -> Result<()> {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(url) = &cli.endpoint {
            self.endpoint.url = url.clone();
        }

        if let Some(mode) = &cli.session {
            self.chat.session_mode = SessionMode::parse_str(mode).map_err(RagChatError::Config)?;
        }

        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `RagChatError::Config` if the endpoint is not an http(s) URL
    /// or the timeout is zero
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint.url).map_err(|e| {
            RagChatError::Config(format!("Invalid endpoint URL {}: {}", self.endpoint.url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RagChatError::Config(format!(
                "Endpoint URL must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.endpoint.timeout_seconds == Some(0) {
            return Err(RagChatError::Config(
                "endpoint.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
