//! Conversation lifecycle state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle phase of one planning conversation.
///
/// Conversations move from category selection to a delivered
/// recommendation, or are abandoned along the way:
/// - `CategorySelection`: nothing chosen yet
/// - `CollectingAnswers`: category fixed, answering required questions
/// - `GeneratingRecommendation`: answer set complete, backend call in flight
/// - `Completed`: recommendation delivered, stored request cleared
/// - `Abandoned`: user reset the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    /// Waiting for the user to pick a travel category.
    #[default]
    CategorySelection,

    /// Collecting answers to the category's required questions.
    CollectingAnswers,

    /// All required questions answered, recommendation call in flight.
    GeneratingRecommendation,

    /// Recommendation delivered; terminal.
    Completed,

    /// Conversation reset by the user; terminal.
    Abandoned,
}

impl ConversationPhase {
    /// Returns true if answers can be accepted in this phase.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, Self::CollectingAnswers)
    }

    /// Returns true if the conversation is finished one way or the other.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

impl StateMachine for ConversationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationPhase::*;
        matches!(
            (self, target),
            // Category picked, request created
            (CategorySelection, CollectingAnswers) |
            // Answer accepted, more questions remain
            (CollectingAnswers, CollectingAnswers) |
            // Last required answer accepted
            (CollectingAnswers, GeneratingRecommendation) |
            // Backend produced an itinerary
            (GeneratingRecommendation, Completed) |
            // Backend failed; request preserved, retryable
            (GeneratingRecommendation, CollectingAnswers) |
            // Reset from any non-terminal phase
            (CategorySelection, Abandoned) |
            (CollectingAnswers, Abandoned) |
            (GeneratingRecommendation, Abandoned)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationPhase::*;
        match self {
            CategorySelection => vec![CollectingAnswers, Abandoned],
            CollectingAnswers => {
                vec![CollectingAnswers, GeneratingRecommendation, Abandoned]
            }
            GeneratingRecommendation => vec![Completed, CollectingAnswers, Abandoned],
            Completed => vec![],
            Abandoned => vec![],
        }
    }
}
