//! User answer value object.

use serde::{Deserialize, Serialize};

/// One accepted answer to a conversation question.
///
/// Immutable once created; re-answering the same question replaces the
/// whole value rather than mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswer {
    /// Question this answers, unique within the request.
    pub question_key: String,
    /// The raw value as submitted (callback payload or free text).
    pub raw_value: String,
    /// Human-readable rendering shown back to the user.
    pub display_value: String,
}

impl UserAnswer {
    /// Creates a new answer.
    pub fn new(
        question_key: impl Into<String>,
        raw_value: impl Into<String>,
        display_value: impl Into<String>,
    ) -> Self {
        Self {
            question_key: question_key.into(),
            raw_value: raw_value.into(),
            display_value: display_value.into(),
        }
    }
}
