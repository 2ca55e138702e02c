//! Canned-response medical assistant driven by ordered keyword rules.

pub mod intent;
pub mod knowledge;
pub mod responder;
pub mod session;

pub use intent::{classify, Disease, DiseaseAspect, FeverAspect, Intent};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use responder::{
    chat_respond, suggestions, ChatResponder, DISCLAIMER, EMERGENCY_RESPONSE, SUGGESTIONS,
};
pub use session::{ChatSession, ChatTurn, Sender};
