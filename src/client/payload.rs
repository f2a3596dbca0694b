//! Request payload construction and encoding
//!
//! The remote endpoint expects the payload serialized to UTF-8 text, then
//! base64-encoded, then sent as a JSON string value. Without a session
//! identifier the serialized form is the raw user input; with one it is the
//! JSON object `{"user_input": ..., "session_id": ...}`.

use crate::error::{RagChatError, Result};
use crate::session::SessionId;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Structured payload used when a session identifier exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionPayload {
    user_input: String,
    session_id: String,
}

/// Data sent to the endpoint, before encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    /// Bare user input, serialized as plain text
    Raw(String),
    /// User input tagged with the conversation identifier, serialized as JSON
    WithSession {
        /// Text the user submitted
        user_input: String,
        /// Conversation identifier
        session_id: String,
    },
}

impl RequestPayload {
    /// Build the payload for one message
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::client::RequestPayload;
    /// use ragchat::session::SessionId;
    ///
    /// let raw = RequestPayload::build("hi", None);
    /// assert_eq!(raw, RequestPayload::Raw("hi".to_string()));
    ///
    /// let id = SessionId::new("sess-123");
    /// let tagged = RequestPayload::build("hi", Some(&id));
    /// assert_eq!(tagged.user_input(), "hi");
    /// assert_eq!(tagged.session_id(), Some("sess-123"));
    /// ```
    pub fn build(user_input: &str, session_id: Option<&SessionId>) -> Self {
        match session_id {
            Some(id) => Self::WithSession {
                user_input: user_input.to_string(),
                session_id: id.as_str().to_string(),
            },
            None => Self::Raw(user_input.to_string()),
        }
    }

    /// The user input carried by this payload
    pub fn user_input(&self) -> &str {
        match self {
            Self::Raw(text) => text,
            Self::WithSession { user_input, .. } => user_input,
        }
    }

    /// The session identifier, if this payload carries one
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::Raw(_) => None,
            Self::WithSession { session_id, .. } => Some(session_id),
        }
    }

    /// Serialize to the UTF-8 text that gets base64-encoded
    pub fn serialize(&self) -> Result<String> {
        match self {
            Self::Raw(text) => Ok(text.clone()),
            Self::WithSession {
                user_input,
                session_id,
            } => Ok(serde_json::to_string(&SessionPayload {
                user_input: user_input.clone(),
                session_id: session_id.clone(),
            })?),
        }
    }

    /// Serialize and base64-encode (standard alphabet, padded)
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::client::RequestPayload;
    ///
    /// let encoded = RequestPayload::Raw("hi".to_string()).encode().unwrap();
    /// assert_eq!(encoded, "aGk=");
    /// ```
    pub fn encode(&self) -> Result<String> {
        Ok(STANDARD.encode(self.serialize()?.as_bytes()))
    }

    /// Build the HTTP request body: the encoded payload as a JSON string
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.encode()?)?)
    }

    /// Reverse [`RequestPayload::encode`]
    ///
    /// Text that parses as a session object decodes to
    /// [`RequestPayload::WithSession`]; anything else is treated as raw input.
    ///
    /// # Errors
    ///
    /// Returns `RagChatError::Encoding` if the input is not valid base64 or
    /// does not decode to UTF-8.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| RagChatError::Encoding(format!("invalid base64: {}", e)))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| RagChatError::Encoding(format!("payload is not UTF-8: {}", e)))?;

        match serde_json::from_str::<SessionPayload>(&text) {
            Ok(payload) => Ok(Self::WithSession {
                user_input: payload.user_input,
                session_id: payload.session_id,
            }),
            Err(_) => Ok(Self::Raw(text)),
        }
    }

    /// Reverse [`RequestPayload::to_body`]
    pub fn from_body(body: &str) -> Result<Self> {
        let encoded: String = serde_json::from_str(body)?;
        Self::decode(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_payload_serializes_as_plain_text() {
        let payload = RequestPayload::build("How do I charge my car?", None);
        assert_eq!(payload.serialize().unwrap(), "How do I charge my car?");
    }

    #[test]
    fn test_session_payload_serializes_as_json_object() {
        let id = SessionId::new("sess-123");
        let payload = RequestPayload::build("hi", Some(&id));
        let value: serde_json::Value = serde_json::from_str(&payload.serialize().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"user_input": "hi", "session_id": "sess-123"})
        );
    }

    #[test]
    fn test_body_is_quoted_json_string() {
        let body = RequestPayload::Raw("hi".to_string()).to_body().unwrap();
        assert_eq!(body, "\"aGk=\"");
    }

    #[test]
    fn test_non_ascii_input_round_trips() {
        let payload = RequestPayload::build("特斯拉怎么充电？", None);
        let decoded = RequestPayload::from_body(&payload.to_body().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_session_payload_round_trips() {
        let id = SessionId::new("sess-123");
        let payload = RequestPayload::build("hi", Some(&id));
        let decoded = RequestPayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded.user_input(), "hi");
        assert_eq!(decoded.session_id(), Some("sess-123"));
    }

    #[test]
    fn test_raw_json_looking_input_stays_raw() {
        let payload = RequestPayload::build(r#"{"user_input": "hi"}"#, None);
        let decoded = RequestPayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let err = RequestPayload::decode("not base64!!").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RagChatError>(),
            Some(RagChatError::Encoding(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd]);
        let err = RequestPayload::decode(&encoded).unwrap_err();
        assert!(err.to_string().contains("not UTF-8"));
    }
}
