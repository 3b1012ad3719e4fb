//! Travel request aggregate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{DomainError, RequestId, Timestamp, UserId};

use super::policy::{MAX_ANSWERS_PER_REQUEST, MAX_ANSWER_LENGTH};
use super::{policy_for, TravelCategory, UserAnswer};

/// Everything collected from one user during a planning conversation.
///
/// Created when a category is selected, mutated exclusively through
/// [`add_answer`](Self::add_answer), and cleared once a recommendation has
/// been delivered or the conversation is abandoned. Holds at most one
/// answer per question key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    /// Identity of this conversation instance; a replacement conversation
    /// for the same user gets a fresh id.
    pub id: RequestId,
    /// Owner of the conversation.
    pub user_id: UserId,
    /// Trip type, fixed at creation.
    pub category: TravelCategory,
    /// Accepted answers keyed by question.
    pub answers: HashMap<String, UserAnswer>,
    /// When the conversation started.
    pub created_at: Timestamp,
}

impl TravelRequest {
    /// Starts an empty request for the given user and category.
    pub fn new(user_id: UserId, category: TravelCategory) -> Self {
        Self {
            id: RequestId::new(),
            user_id,
            category,
            answers: HashMap::new(),
            created_at: Timestamp::now(),
        }
    }

    /// Validates and records an answer, replacing any previous answer to
    /// the same question.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAnswer`] when the question key is not
    /// recognized for this request's category, the raw value is empty or
    /// over the length limit, or the request already holds the maximum
    /// number of answers.
    pub fn add_answer(
        &mut self,
        question_key: impl Into<String>,
        raw_value: impl Into<String>,
        display_value: impl Into<String>,
    ) -> Result<(), DomainError> {
        let question_key = question_key.into();
        let raw_value = raw_value.into();

        if !policy_for(self.category).recognizes(&question_key) {
            return Err(DomainError::invalid_answer(
                &question_key,
                format!("not a question for category '{}'", self.category),
            ));
        }
        if raw_value.trim().is_empty() {
            return Err(DomainError::invalid_answer(&question_key, "answer is empty"));
        }
        if raw_value.chars().count() > MAX_ANSWER_LENGTH {
            return Err(DomainError::invalid_answer(
                &question_key,
                format!("answer exceeds {MAX_ANSWER_LENGTH} characters"),
            ));
        }
        if !self.answers.contains_key(&question_key)
            && self.answers.len() >= MAX_ANSWERS_PER_REQUEST
        {
            return Err(DomainError::invalid_answer(
                &question_key,
                "too many answers in one request",
            ));
        }

        let answer = UserAnswer::new(question_key.clone(), raw_value, display_value);
        self.answers.insert(question_key, answer);
        Ok(())
    }

    /// Looks up an accepted answer.
    pub fn answer(&self, question_key: &str) -> Option<&UserAnswer> {
        self.answers.get(question_key)
    }

    /// True iff every required question has an answer. Pure.
    pub fn is_complete(&self, required_questions: &[&str]) -> bool {
        required_questions
            .iter()
            .all(|key| self.answers.contains_key(*key))
    }

    /// Unanswered keys, in the order given by `required_questions`.
    ///
    /// The first element is the next question to prompt, independent of
    /// the order earlier answers were submitted in.
    pub fn missing_questions<'a>(&self, required_questions: &[&'a str]) -> Vec<&'a str> {
        required_questions
            .iter()
            .filter(|key| !self.answers.contains_key(**key))
            .copied()
            .collect()
    }

    /// True iff the request satisfies its own category's policy.
    pub fn is_ready(&self) -> bool {
        self.is_complete(&policy_for(self.category).required_keys())
    }

    /// Next question to ask under this request's category policy, or
    /// `None` when the request is complete.
    pub fn next_question(&self) -> Option<&'static str> {
        policy_for(self.category)
            .required_questions
            .iter()
            .map(|q| q.key)
            .find(|key| !self.answers.contains_key(*key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family_request() -> TravelRequest {
        TravelRequest::new(UserId::new(1), TravelCategory::Family)
    }

    mod add_answer {
        use super::*;

        #[test]
        fn accepts_a_recognized_question() {
            let mut request = family_request();
            request.add_answer("family_size", "2+1", "2 adults + 1 child").unwrap();
            assert_eq!(request.answer("family_size").unwrap().raw_value, "2+1");
        }

        #[test]
        fn rejects_a_question_from_another_category() {
            let mut request = family_request();
            let err = request.add_answer("pet_type", "dog", "Dog").unwrap_err();
            assert!(matches!(err, DomainError::InvalidAnswer { .. }));
            assert!(request.answers.is_empty());
        }

        #[test]
        fn rejects_empty_and_whitespace_answers() {
            let mut request = family_request();
            assert!(request.add_answer("priority", "", "").is_err());
            assert!(request.add_answer("priority", "   ", "   ").is_err());
        }

        #[test]
        fn rejects_answers_over_the_length_limit() {
            let mut request = family_request();
            let long = "x".repeat(MAX_ANSWER_LENGTH + 1);
            assert!(request.add_answer("priority", long, "long").is_err());
        }

        #[test]
        fn resubmission_replaces_without_growing() {
            let mut request = family_request();
            request.add_answer("travel_time", "summer", "Summer").unwrap();
            request.add_answer("travel_time", "winter", "Winter").unwrap();
            assert_eq!(request.answers.len(), 1);
            assert_eq!(request.answer("travel_time").unwrap().raw_value, "winter");
        }

        #[test]
        fn accepts_the_optional_destination_question() {
            let mut request = family_request();
            request.add_answer("destination", "Lisbon", "Lisbon").unwrap();
            assert!(!request.is_ready());
        }
    }

    mod completeness {
        use super::*;

        #[test]
        fn family_walkthrough_reaches_completion() {
            let mut request = family_request();
            let required = ["family_size", "travel_time", "priority"];

            request.add_answer("family_size", "2+1", "2 adults + 1 child").unwrap();
            request.add_answer("travel_time", "summer", "Summer").unwrap();
            assert!(!request.is_complete(&required));
            assert_eq!(request.missing_questions(&required), vec!["priority"]);

            request.add_answer("priority", "beach", "Beach").unwrap();
            assert!(request.is_complete(&required));
            assert!(request.is_ready());
            assert!(request.missing_questions(&required).is_empty());
        }

        #[test]
        fn missing_questions_keeps_policy_order() {
            let mut request = family_request();
            // Answered out of order: the gap list still follows policy order.
            request.add_answer("priority", "beach", "Beach").unwrap();
            let required = ["family_size", "travel_time", "priority"];
            assert_eq!(
                request.missing_questions(&required),
                vec!["family_size", "travel_time"]
            );
            assert_eq!(request.next_question(), Some("family_size"));
        }

        #[test]
        fn destination_does_not_count_toward_completeness() {
            let mut request = family_request();
            request.add_answer("destination", "auto", "Pick for me").unwrap();
            assert_eq!(request.next_question(), Some("family_size"));
        }
    }

    #[test]
    fn round_trips_through_json() {
        let mut request = family_request();
        request.add_answer("family_size", "2+2", "2 adults + 2 children").unwrap();
        let json = serde_json::to_string(&request).unwrap();
        let back: TravelRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
