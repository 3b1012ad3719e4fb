//! Per-category question policy.
//!
//! The single source of truth for what makes a travel request complete:
//! which questions each category requires, in which order they are asked,
//! and the limits answers are validated against. Built once at startup
//! and never mutated.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::TravelCategory;

/// Maximum accepted length of a single raw answer value.
pub const MAX_ANSWER_LENGTH: usize = 200;

/// Defensive bound on the total number of answers one request will hold.
pub const MAX_ANSWERS_PER_REQUEST: usize = 16;

/// A question the conversation can ask, optional for completeness or not.
#[derive(Debug, Clone, Copy)]
pub struct QuestionSpec {
    /// Stable key the answer is stored under.
    pub key: &'static str,
    /// Human-readable label used when rendering answers.
    pub label: &'static str,
}

/// Static policy for one travel category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryPolicy {
    /// Name shown in category menus and prompts.
    pub display_name: &'static str,
    /// Required questions, in prompting order. The first key in this list
    /// without an answer is the next question asked.
    pub required_questions: &'static [QuestionSpec],
}

impl CategoryPolicy {
    /// Required question keys in prompting order.
    pub fn required_keys(&self) -> Vec<&'static str> {
        self.required_questions.iter().map(|q| q.key).collect()
    }

    /// Returns true if the key is answerable under this policy.
    pub fn recognizes(&self, question_key: &str) -> bool {
        question_key == DESTINATION_QUESTION.key
            || self.required_questions.iter().any(|q| q.key == question_key)
    }

    /// Label for a recognized question key.
    pub fn label_for(&self, question_key: &str) -> Option<&'static str> {
        if question_key == DESTINATION_QUESTION.key {
            return Some(DESTINATION_QUESTION.label);
        }
        self.required_questions
            .iter()
            .find(|q| q.key == question_key)
            .map(|q| q.label)
    }
}

/// Asked first in every flow but never required for completeness; the
/// recommendation backend picks a destination when it is absent.
pub const DESTINATION_QUESTION: QuestionSpec = QuestionSpec {
    key: "destination",
    label: "Destination",
};

static POLICIES: Lazy<HashMap<TravelCategory, CategoryPolicy>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        TravelCategory::Family,
        CategoryPolicy {
            display_name: "Family travel",
            required_questions: &[
                QuestionSpec { key: "family_size", label: "Family size" },
                QuestionSpec { key: "travel_time", label: "Travel time" },
                QuestionSpec { key: "priority", label: "Priority" },
            ],
        },
    );
    map.insert(
        TravelCategory::Pets,
        CategoryPolicy {
            display_name: "Travel with pets",
            required_questions: &[
                QuestionSpec { key: "pet_type", label: "Pet type" },
                QuestionSpec { key: "transport", label: "Transport" },
                QuestionSpec { key: "duration", label: "Duration" },
            ],
        },
    );
    map.insert(
        TravelCategory::Photo,
        CategoryPolicy {
            display_name: "Best photo spots",
            required_questions: &[
                QuestionSpec { key: "photo_type", label: "Photography style" },
                QuestionSpec { key: "difficulty", label: "Difficulty" },
            ],
        },
    );
    map.insert(
        TravelCategory::Budget,
        CategoryPolicy {
            display_name: "Budget travel",
            required_questions: &[
                QuestionSpec { key: "budget", label: "Budget" },
                QuestionSpec { key: "days", label: "Days" },
                QuestionSpec { key: "included", label: "What's included" },
            ],
        },
    );
    map.insert(
        TravelCategory::Active,
        CategoryPolicy {
            display_name: "Active holiday",
            required_questions: &[
                QuestionSpec { key: "activity_type", label: "Activity type" },
                QuestionSpec { key: "skill_level", label: "Skill level" },
            ],
        },
    );
    map
});

/// Looks up the policy for a category. Total: every enum member has an
/// entry in the table.
pub fn policy_for(category: TravelCategory) -> &'static CategoryPolicy {
    POLICIES
        .get(&category)
        .unwrap_or_else(|| panic!("policy table missing category {category}"))
}

/// Required question keys for a category, in prompting order.
pub fn required_questions(category: TravelCategory) -> Vec<&'static str> {
    policy_for(category).required_keys()
}
