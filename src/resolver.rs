use tracing::{debug, info, warn};

use crate::providers::base::Provider;
use crate::providers::types::message::Message;

pub const DEFAULT_PERSONA: &str = "You are FluentBot, a friendly and patient language learning \
companion. Help the user with grammar, vocabulary, pronunciation and conversation practice. \
Keep explanations clear, give short examples, and encourage the learner.";

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// System message sent ahead of every conversation
    pub persona: String,
    /// How many of the most recent history entries are forwarded
    pub window_size: usize,
    /// A reply is accepted only when its trimmed length exceeds this
    pub min_reply_chars: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            window_size: 10,
            min_reply_chars: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    Provider(String),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub reply: String,
    pub source: ReplySource,
}

/// Produces a reply by walking an ordered list of providers and falling back
/// to static text when none of them gives an acceptable answer.
///
/// The resolver owns no conversation state: history is borrowed for the
/// duration of a call and never modified. Appending the new turn is up to
/// the caller (see [`crate::session::Session::exchange`]).
pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(providers: Vec<Box<dyn Provider>>, options: ResolverOptions) -> Self {
        Self { providers, options }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve a reply for `user_text`. Never fails; the worst case is the
    /// static fallback text.
    pub fn resolve(&self, user_text: &str, history: &[Message], context_prefix: &str) -> String {
        self.resolve_detailed(user_text, history, context_prefix).reply
    }

    /// Like [`Resolver::resolve`], but also reports who produced the reply
    pub fn resolve_detailed(
        &self,
        user_text: &str,
        history: &[Message],
        context_prefix: &str,
    ) -> Resolution {
        let messages = self.build_messages(user_text, history, context_prefix);

        for provider in &self.providers {
            debug!(
                provider = provider.name(),
                messages = messages.len(),
                "Attempting provider"
            );

            match provider.attempt(&messages) {
                Ok(reply) if self.accepts(&reply) => {
                    info!(provider = provider.name(), "Provider reply accepted");
                    return Resolution {
                        reply,
                        source: ReplySource::Provider(provider.name().to_string()),
                    };
                }
                Ok(reply) => {
                    warn!(
                        provider = provider.name(),
                        length = reply.trim().chars().count(),
                        "Rejecting degenerate reply"
                    );
                }
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "Provider attempt failed");
                }
            }
        }

        warn!("All providers exhausted, using fallback reply");
        Resolution {
            reply: fallback_reply(context_prefix),
            source: ReplySource::Fallback,
        }
    }

    /// System persona, then the history window, then the prefixed user prompt
    pub fn build_messages(
        &self,
        user_text: &str,
        history: &[Message],
        context_prefix: &str,
    ) -> Vec<Message> {
        let start = history.len().saturating_sub(self.options.window_size);
        let window = &history[start..];

        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(Message::system(self.options.persona.as_str()));
        messages.extend_from_slice(window);
        messages.push(Message::user(format!("{}{}", context_prefix, user_text)));
        messages
    }

    fn accepts(&self, reply: &str) -> bool {
        reply.trim().chars().count() > self.options.min_reply_chars
    }
}

/// Deterministic text returned when every provider has failed
pub fn fallback_reply(context_prefix: &str) -> String {
    let label = match context_prefix.trim() {
        "" => "General Chat",
        label => label,
    };

    format!(
        "🤖 **FluentBot - {label}**\n\n\
         I'm having trouble reaching the AI service right now, so I can only give \
         you a limited answer. Please check your connection or API keys and try again \
         in a moment.\n\n\
         **While you wait, you can still:**\n\
         • Review the vocabulary you practised earlier\n\
         • Write a few sentences in your target language and ask me to correct them later\n\
         • Try asking: \"How do I say 'How are you?' in French?\""
    )
}
