//! Conversation domain - lifecycle of one planning dialogue.

mod phase;

pub use phase::ConversationPhase;
