use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Level {
    #[default]
    Beginner,
    Elementary,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Beginner => "Beginner",
            Level::Elementary => "Elementary",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

/// The language and level the learner picked, sent ahead of each prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningContext {
    pub language: String,
    pub level: Level,
}

impl LearningContext {
    pub fn new<S: Into<String>>(language: S, level: Level) -> Self {
        Self {
            language: language.into(),
            level,
        }
    }

    /// Context prefix for the resolver, trailing space included
    pub fn prefix(&self) -> String {
        format!("[Language Learning: {} - {}] ", self.language, self.level)
    }
}

/// Prefix for an optional context; no context means plain chat
pub fn context_prefix(context: Option<&LearningContext>) -> String {
    context.map(LearningContext::prefix).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        let context = LearningContext::new("Japanese", Level::Intermediate);
        assert_eq!(
            context.prefix(),
            "[Language Learning: Japanese - Intermediate] "
        );
    }

    #[test]
    fn test_no_context() {
        assert_eq!(context_prefix(None), "");
        let context = LearningContext::new("French", Level::default());
        assert_eq!(
            context_prefix(Some(&context)),
            "[Language Learning: French - Beginner] "
        );
    }
}
