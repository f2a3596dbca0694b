//! Per-session state store
//!
//! [`SessionState`] holds everything one chat session remembers: the past
//! inputs, the generated outputs and the transient input value. Values are
//! keyed so that defaults can be inserted idempotently. Each session owns
//! its own store; nothing is process-wide.
//!
//! [`SessionId`] is the opaque token that identifies a conversation to the
//! remote endpoint.

pub mod transcript;

pub use transcript::{Transcript, Turn};

use crate::error::{RagChatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key holding generated outputs, one per turn
pub const GENERATED_KEY: &str = "generated";
/// Key holding past user inputs, one per turn
pub const PAST_KEY: &str = "past";
/// Key holding the transient input field value
pub const INPUT_KEY: &str = "input";
/// Key reserved for a stored copy of a previous session
pub const STORED_SESSION_KEY: &str = "stored_session";

/// A value held in the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionValue {
    /// Ordered list of strings (inputs or outputs)
    List(Vec<String>),
    /// Single string (the input field)
    Text(String),
}

impl SessionValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Text(_) => "text",
        }
    }
}

/// Defaults every new session starts with
///
/// # Examples
///
/// ```
/// use ragchat::session::{default_values, SessionValue};
///
/// let defaults = default_values();
/// assert!(defaults.contains(&("input", SessionValue::Text(String::new()))));
/// ```
pub fn default_values() -> Vec<(&'static str, SessionValue)> {
    vec![
        (GENERATED_KEY, SessionValue::List(Vec::new())),
        (PAST_KEY, SessionValue::List(Vec::new())),
        (INPUT_KEY, SessionValue::Text(String::new())),
        (STORED_SESSION_KEY, SessionValue::List(Vec::new())),
    ]
}

/// In-memory state for a single chat session
///
/// Not shared between sessions; each session owns its own instance.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    values: BTreeMap<String, SessionValue>,
}

impl SessionState {
    /// Create a store seeded with [`default_values`]
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::session::SessionState;
    ///
    /// let state = SessionState::new();
    /// assert!(state.read_all().is_empty());
    /// assert_eq!(state.input(), "");
    /// ```
    pub fn new() -> Self {
        let mut state = Self::default();
        state.initialize(default_values());
        state
    }

    /// Insert each default only if its key is absent
    ///
    /// Existing values are never overwritten, so calling this repeatedly
    /// with the same defaults is a no-op after the first call.
    ///
    /// # Arguments
    ///
    /// * `defaults` - Key/default pairs to seed
    pub fn initialize<K, I>(&mut self, defaults: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SessionValue)>,
    {
        for (key, value) in defaults {
            self.values.entry(key.into()).or_insert(value);
        }
    }

    /// Look up a raw value by key
    pub fn get(&self, key: &str) -> Option<&SessionValue> {
        self.values.get(key)
    }

    /// Record one resolved request
    ///
    /// Appends `input` to the past sequence and `output` to the generated
    /// sequence so they stay paired by index. Both slots are checked before
    /// either is touched, so a failure never leaves an unpaired input.
    ///
    /// # Errors
    ///
    /// Returns `RagChatError::Config` if either key holds a non-list value.
    pub fn append_turn(
        &mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<()> {
        self.ensure_list(PAST_KEY)?;
        self.ensure_list(GENERATED_KEY)?;

        if let Some(SessionValue::List(past)) = self.values.get_mut(PAST_KEY) {
            past.push(input.into());
        }
        if let Some(SessionValue::List(generated)) = self.values.get_mut(GENERATED_KEY) {
            generated.push(output.into());
        }

        tracing::debug!("Appended turn {}", self.list(PAST_KEY).len());
        Ok(())
    }

    /// Return the full paired transcript, oldest first
    pub fn read_all(&self) -> Transcript {
        Transcript::from_pairs(self.list(PAST_KEY), self.list(GENERATED_KEY))
    }

    /// Current value of the input field
    pub fn input(&self) -> &str {
        match self.values.get(INPUT_KEY) {
            Some(SessionValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Replace the input field value
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.values
            .insert(INPUT_KEY.to_string(), SessionValue::Text(value.into()));
    }

    fn list(&self, key: &str) -> &[String] {
        match self.values.get(key) {
            Some(SessionValue::List(items)) => items,
            _ => &[],
        }
    }

    fn ensure_list(&mut self, key: &str) -> Result<()> {
        let slot = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| SessionValue::List(Vec::new()));
        match slot {
            SessionValue::List(_) => Ok(()),
            other => Err(RagChatError::Config(format!(
                "session key `{}` holds {} instead of a list",
                key,
                other.kind()
            ))
            .into()),
        }
    }
}

/// Opaque identifier for one conversation with the remote endpoint
///
/// Generated once at session start and stable for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an existing token
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (UUID v4)
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::session::SessionId;
    ///
    /// let a = SessionId::generate();
    /// let b = SessionId::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Accept an identifier supplied by a hosting runtime
    ///
    /// # Errors
    ///
    /// Returns `RagChatError::SessionUnavailable` if the runtime supplied
    /// nothing or a blank token.
    pub fn from_runtime(id: Option<String>) -> Result<Self> {
        match id {
            Some(id) if !id.trim().is_empty() => Ok(Self(id)),
            Some(_) => Err(RagChatError::SessionUnavailable(
                "runtime supplied a blank session identifier".to_string(),
            )
            .into()),
            None => Err(RagChatError::SessionUnavailable(
                "runtime did not supply a session identifier".to_string(),
            )
            .into()),
        }
    }

    /// Borrow the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_defaults() {
        let state = SessionState::new();
        for (key, value) in default_values() {
            assert_eq!(state.get(key), Some(&value));
        }
    }

    #[test]
    fn test_initialize_does_not_overwrite_existing_values() {
        let mut state = SessionState::new();
        state.append_turn("hello", "world").unwrap();
        state.set_input("draft");

        state.initialize(default_values());
        state.initialize(default_values());

        assert_eq!(state.input(), "draft");
        assert_eq!(state.read_all().len(), 1);
    }

    #[test]
    fn test_initialize_adds_missing_keys_only() {
        let mut state = SessionState::default();
        state.initialize([(INPUT_KEY, SessionValue::Text("first".to_string()))]);
        state.initialize([
            (INPUT_KEY, SessionValue::Text("second".to_string())),
            ("extra", SessionValue::List(vec!["x".to_string()])),
        ]);

        assert_eq!(state.input(), "first");
        assert_eq!(
            state.get("extra"),
            Some(&SessionValue::List(vec!["x".to_string()]))
        );
    }

    #[test]
    fn test_append_turn_keeps_pairs_aligned() {
        let mut state = SessionState::new();
        let inputs = ["one", "two", "three"];
        for (i, input) in inputs.iter().enumerate() {
            state.append_turn(*input, format!("answer {}", i)).unwrap();
        }

        let transcript = state.read_all();
        assert_eq!(transcript.len(), inputs.len());
        for (i, turn) in transcript.turns().iter().enumerate() {
            assert_eq!(turn.input, inputs[i]);
            assert_eq!(turn.output, format!("answer {}", i));
        }
    }

    #[test]
    fn test_append_turn_without_initialize_creates_lists() {
        let mut state = SessionState::default();
        state.append_turn("q", "a").unwrap();
        assert_eq!(state.read_all().turns(), &[Turn::new("q", "a")]);
    }

    #[test]
    fn test_append_turn_rejects_non_list_slot_without_partial_write() {
        let mut state = SessionState::default();
        state.initialize([(GENERATED_KEY, SessionValue::Text("oops".to_string()))]);

        let result = state.append_turn("q", "a");
        assert!(result.is_err());
        assert_eq!(state.get(PAST_KEY), Some(&SessionValue::List(Vec::new())));
        assert!(state.read_all().is_empty());
    }

    #[test]
    fn test_read_all_has_no_side_effects() {
        let mut state = SessionState::new();
        state.append_turn("q", "a").unwrap();
        let first = state.read_all();
        let second = state.read_all();
        assert_eq!(first, second);
    }

    #[test]
    fn test_session_id_from_runtime_missing_is_unavailable() {
        let err = SessionId::from_runtime(None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RagChatError>(),
            Some(RagChatError::SessionUnavailable(_))
        ));

        let err = SessionId::from_runtime(Some("  ".to_string())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RagChatError>(),
            Some(RagChatError::SessionUnavailable(_))
        ));
    }

    #[test]
    fn test_session_id_from_runtime_accepts_token() {
        let id = SessionId::from_runtime(Some("sess-123".to_string())).unwrap();
        assert_eq!(id.as_str(), "sess-123");
        assert_eq!(id.to_string(), "sess-123");
    }

    #[test]
    fn test_generated_session_id_is_uuid() {
        let id = SessionId::generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }
}
