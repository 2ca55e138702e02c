use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use super::responder::ChatResponder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-view conversation state. The transcript is kept for display and never feeds back into
/// response selection.
pub struct ChatSession<R = StdRng> {
    responder: ChatResponder<R>,
    transcript: Vec<ChatTurn>,
}

impl<R: Rng> ChatSession<R> {
    pub fn new(responder: ChatResponder<R>) -> Self {
        Self {
            responder,
            transcript: Vec::new(),
        }
    }

    /// Records the user message and the reply. Blank input is ignored and returns `None`.
    pub fn send(&mut self, message: &str) -> Option<&ChatTurn> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.push(Sender::User, message.to_string());
        let reply = self.responder.respond(message);
        self.push(Sender::Bot, reply);
        self.transcript.last()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    fn push(&mut self, sender: Sender, content: String) {
        self.transcript.push(ChatTurn {
            sender,
            content,
            timestamp: Utc::now(),
        });
    }
}
