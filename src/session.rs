use uuid::Uuid;

use crate::providers::types::message::{Message, Role};
use crate::resolver::Resolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub total: usize,
    pub user: usize,
    pub assistant: usize,
}

/// One user's conversation. Created per chat session and cleared on reset;
/// the caller owns it and decides when turns are appended.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    history: Vec<Message>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn push(&mut self, message: Message) {
        self.history.push(message);
    }

    /// Drop the conversation but keep the session id
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Run one turn: resolve against the history so far, then record the
    /// user's raw text and the reply.
    pub fn exchange(&mut self, resolver: &Resolver, user_text: &str, context_prefix: &str) -> String {
        let reply = resolver.resolve(user_text, &self.history, context_prefix);

        self.history.push(Message::user(user_text));
        self.history.push(Message::assistant(reply.as_str()));
        reply
    }

    pub fn stats(&self) -> SessionStats {
        self.history
            .iter()
            .fold(SessionStats::default(), |mut stats, message| {
                stats.total += 1;
                match message.role() {
                    Role::User => stats.user += 1,
                    Role::Assistant => stats.assistant += 1,
                    Role::System => {}
                }
                stats
            })
    }
}
