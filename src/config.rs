use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::resolver::{ResolverOptions, DEFAULT_PERSONA};

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverSettings {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_min_reply_chars")]
    pub min_reply_chars: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_persona")]
    pub persona: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            min_reply_chars: default_min_reply_chars(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            persona: default_persona(),
        }
    }
}

impl ResolverSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn options(&self) -> ResolverOptions {
        ResolverOptions {
            persona: self.persona.clone(),
            window_size: self.window_size,
            min_reply_chars: self.min_reply_chars,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub resolver: ResolverSettings,
    /// When set, a missing OpenRouter key stops the chain from being built
    #[serde(default = "default_require_primary_credential")]
    pub require_primary_credential: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolver: ResolverSettings::default(),
            require_primary_credential: default_require_primary_credential(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("resolver.window_size", default_window_size() as i64)?
            .set_default("resolver.min_reply_chars", default_min_reply_chars() as i64)?
            .set_default("resolver.timeout_secs", default_timeout_secs() as i64)?
            .set_default("resolver.temperature", default_temperature() as f64)?
            .set_default("resolver.persona", default_persona())?
            .set_default(
                "require_primary_credential",
                default_require_primary_credential(),
            )?
            // Optional fluentbot.toml in the working directory
            .add_source(File::with_name("fluentbot").required(false))
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("FLUENTBOT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize::<Self>().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::Other(err)
        })
    }
}

/// Show enough of a secret to recognise it without revealing it
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 14 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn default_window_size() -> usize {
    10
}

fn default_min_reply_chars() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.7
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}

fn default_require_primary_credential() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("FLUENTBOT_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.resolver.window_size, 10);
        assert_eq!(settings.resolver.min_reply_chars, 10);
        assert_eq!(settings.resolver.timeout(), Duration::from_secs(30));
        assert!((settings.resolver.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(settings.resolver.persona, DEFAULT_PERSONA);
        assert!(settings.require_primary_credential);
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("FLUENTBOT_RESOLVER__WINDOW_SIZE", "4");
        env::set_var("FLUENTBOT_RESOLVER__MIN_REPLY_CHARS", "0");
        env::set_var("FLUENTBOT_RESOLVER__TIMEOUT_SECS", "5");
        env::set_var("FLUENTBOT_REQUIRE_PRIMARY_CREDENTIAL", "false");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.resolver.window_size, 4);
        assert_eq!(settings.resolver.min_reply_chars, 0);
        assert_eq!(settings.resolver.timeout_secs, 5);
        assert!(!settings.require_primary_credential);

        let options = settings.resolver.options();
        assert_eq!(options.window_size, 4);
        assert_eq!(options.min_reply_chars, 0);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_invalid_value_is_reported() {
        clean_env();
        env::set_var("FLUENTBOT_RESOLVER__WINDOW_SIZE", "lots");

        assert!(matches!(Settings::new(), Err(ConfigError::Other(_))));

        clean_env();
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(
            mask_secret("sk-or-v1-abcdefghijklmnop1234"),
            "sk-or-v1-a...1234"
        );
        assert_eq!(mask_secret("short"), "*****");
        assert_eq!(mask_secret(""), "");
    }
}
