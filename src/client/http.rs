//! HTTP implementation of [`ChatEndpoint`]
//!
//! Every message is a single POST to the configured endpoint. The body is
//! the base64-encoded payload as a JSON string, sent with
//! `accept: text/plain` and `Content-Type: text/plain`. There is no retry.

use crate::client::{ChatAnswer, ChatEndpoint, RequestPayload};
use crate::config::EndpointConfig;
use crate::error::{RagChatError, Result};
use crate::session::SessionId;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Chat client for the remote text-generation / RAG endpoint
///
/// # Examples
///
/// ```
/// use ragchat::client::HttpChatClient;
/// use ragchat::config::EndpointConfig;
///
/// let config = EndpointConfig {
///     url: "http://localhost:8080/chat".to_string(),
///     timeout_seconds: None,
/// };
/// let client = HttpChatClient::new(&config).unwrap();
/// assert_eq!(client.endpoint().as_str(), "http://localhost:8080/chat");
/// ```
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    endpoint: url::Url,
}

impl HttpChatClient {
    /// Create a client for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns `RagChatError::Config` if the URL does not parse, or
    /// `RagChatError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let endpoint = url::Url::parse(&config.url).map_err(|e| {
            RagChatError::Config(format!("Invalid endpoint URL {}: {}", config.url, e))
        })?;

        let mut builder =
            Client::builder().user_agent(concat!("ragchat/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(RagChatError::Transport)?;

        tracing::info!("Initialized chat client: endpoint={}", endpoint);

        Ok(Self { client, endpoint })
    }

    /// The URL every request is posted to
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatEndpoint for HttpChatClient {
    async fn ask(&self, user_input: &str, session_id: Option<&SessionId>) -> Result<ChatAnswer> {
        let payload = RequestPayload::build(user_input, session_id);
        let body = payload.to_body()?;

        tracing::debug!("Sending request to {}: body={}", self.endpoint, body);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "text/plain")
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(RagChatError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(RagChatError::Transport)?;

        if status != StatusCode::OK {
            tracing::warn!("Endpoint returned {}, using body as answer", status);
            return Ok(ChatAnswer::text(text));
        }

        tracing::debug!("Endpoint response: {}", text);
        parse_answer(&text)
    }
}

/// Extract the answer and document sources from a 200 response body
///
/// `docs` is optional and read leniently; only `answer` is required.
///
/// # Errors
///
/// Returns `RagChatError::MalformedResponse` if the body is not JSON or has
/// no string `answer` field.
///
/// # Examples
///
/// ```
/// use ragchat::client::http::parse_answer;
///
/// let answer = parse_answer(r#"{"answer": "Plug it in."}"#).unwrap();
/// assert_eq!(answer.answer, "Plug it in.");
/// assert!(answer.sources.is_empty());
/// ```
pub fn parse_answer(body: &str) -> Result<ChatAnswer> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Endpoint returned non-JSON body with status 200");
        RagChatError::MalformedResponse(format!("body is not JSON: {}", e))
    })?;

    let answer = match value.get("answer") {
        Some(serde_json::Value::String(answer)) => answer.clone(),
        Some(other) => {
            tracing::warn!("Endpoint returned non-string answer");
            return Err(RagChatError::MalformedResponse(format!(
                "field `answer` is not a string: {}",
                other
            ))
            .into());
        }
        None => {
            tracing::warn!("Endpoint response has no answer field");
            return Err(
                RagChatError::MalformedResponse("missing field `answer`".to_string()).into(),
            );
        }
    };

    let sources = value
        .get("docs")
        .and_then(|docs| docs.as_array())
        .map(|docs| {
            docs.iter()
                .filter_map(|doc| doc.pointer("/metadata/source"))
                .filter_map(|source| source.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ChatAnswer { answer, sources })
}
