use super::types::message::Message;
use crate::errors::ProviderResult;

/// Base trait for remote chat-completion services (OpenRouter, Gemini, etc)
pub trait Provider: Send + Sync {
    /// Short identifier used in logs and diagnostics
    fn name(&self) -> &str;

    /// Send the full outbound message list and return the reply text.
    ///
    /// Implementations make exactly one request and never retry.
    fn attempt(&self, messages: &[Message]) -> ProviderResult<String>;
}
