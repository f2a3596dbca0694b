//! Transcript types
//!
//! A [`Transcript`] is the ordered, append-only list of [`Turn`]s for one
//! session. Storage order is oldest first; rendering is newest first.

use serde::{Deserialize, Serialize};

/// One user input paired with the output it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Text the user submitted
    pub input: String,
    /// Answer text, or the error text that stood in for it
    pub output: String,
}

impl Turn {
    /// Create a turn from an input/output pair
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Ordered sequence of turns, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Build a transcript from the parallel past/generated sequences
    ///
    /// Pairs are zipped by index; the store guarantees both sequences have
    /// the same length.
    pub fn from_pairs(past: &[String], generated: &[String]) -> Self {
        let turns = past
            .iter()
            .zip(generated.iter())
            .map(|(input, output)| Turn::new(input.clone(), output.clone()))
            .collect();
        Self { turns }
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript has no turns yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns in storage order (oldest first)
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Iterate newest first, the order the history is displayed in
    pub fn newest_first(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().rev()
    }

    /// Flatten into the downloadable text blob
    ///
    /// Newest turn first, each input followed by its output, all joined with
    /// `\n`. An empty transcript flattens to an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::session::Transcript;
    ///
    /// let past = vec!["q1".to_string(), "q2".to_string()];
    /// let generated = vec!["a1".to_string(), "a2".to_string()];
    /// let transcript = Transcript::from_pairs(&past, &generated);
    /// assert_eq!(transcript.flatten(), "q2\na2\nq1\na1");
    /// ```
    pub fn flatten(&self) -> String {
        self.newest_first()
            .flat_map(|turn| [turn.input.as_str(), turn.output.as_str()])
            .collect::<Vec<_>>()
            .join("\n")
    }
}
