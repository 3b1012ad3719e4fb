//! Error types for the domain layer.

use thiserror::Error;

/// The closed set of failures the conversation core can produce.
///
/// Validation failures (`InvalidCategory`, `InvalidAnswer`) are handled at
/// the conversation boundary and re-prompted; collaborator failures
/// (`RecommendationUnavailable`, `StateUnavailable`) escalate to the caller
/// as typed errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Category selection did not match a known travel category.
    #[error("unknown travel category '{value}'")]
    InvalidCategory { value: String },

    /// A single answer failed validation; the same question should be
    /// asked again.
    #[error("invalid answer for '{question_key}': {reason}")]
    InvalidAnswer { question_key: String, reason: String },

    /// A request reached the recommendation step without all required
    /// questions answered.
    #[error("request is incomplete, missing: {}", missing.join(", "))]
    IncompleteRequest { missing: Vec<String> },

    /// Both the primary and fallback recommendation backends failed.
    /// The conversation state is preserved and the step can be retried.
    #[error("recommendation service unavailable: {message}")]
    RecommendationUnavailable { message: String },

    /// The state repository could not be reached; no partial state was
    /// committed.
    #[error("state repository unavailable: {message}")]
    StateUnavailable { message: String },
}

impl DomainError {
    /// Creates an invalid category error.
    pub fn invalid_category(value: impl Into<String>) -> Self {
        DomainError::InvalidCategory { value: value.into() }
    }

    /// Creates an invalid answer error.
    pub fn invalid_answer(question_key: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidAnswer {
            question_key: question_key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an incomplete request error.
    pub fn incomplete(missing: Vec<String>) -> Self {
        DomainError::IncompleteRequest { missing }
    }

    /// Creates a recommendation unavailable error.
    pub fn recommendation_unavailable(message: impl Into<String>) -> Self {
        DomainError::RecommendationUnavailable { message: message.into() }
    }

    /// Creates a state unavailable error.
    pub fn state_unavailable(message: impl Into<String>) -> Self {
        DomainError::StateUnavailable { message: message.into() }
    }

    /// Returns true when the failed operation can be retried without the
    /// user re-entering any answers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::RecommendationUnavailable { .. } | DomainError::StateUnavailable { .. }
        )
    }

    /// Returns true when the error should be resolved by re-prompting the
    /// user rather than retrying the operation.
    pub fn is_user_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidCategory { .. } | DomainError::InvalidAnswer { .. }
        )
    }
}

/// Error raised when a lifecycle transition violates the state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

impl TransitionError {
    /// Creates a transition error from debug representations of the states.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_category_displays_value() {
        let err = DomainError::invalid_category("cruise");
        assert_eq!(err.to_string(), "unknown travel category 'cruise'");
    }

    #[test]
    fn incomplete_request_lists_missing_keys() {
        let err = DomainError::incomplete(vec!["budget".into(), "days".into()]);
        assert_eq!(err.to_string(), "request is incomplete, missing: budget, days");
    }

    #[test]
    fn collaborator_errors_are_retryable() {
        assert!(DomainError::recommendation_unavailable("timeout").is_retryable());
        assert!(DomainError::state_unavailable("connection refused").is_retryable());
        assert!(!DomainError::invalid_category("x").is_retryable());
    }

    #[test]
    fn validation_errors_are_user_input_errors() {
        assert!(DomainError::invalid_answer("budget", "empty").is_user_input_error());
        assert!(DomainError::invalid_category("x").is_user_input_error());
        assert!(!DomainError::state_unavailable("down").is_user_input_error());
    }

    #[test]
    fn transition_error_displays_both_states() {
        let err = TransitionError::new("Completed", "CollectingAnswers");
        assert_eq!(err.to_string(), "cannot transition from Completed to CollectingAnswers");
    }
}
