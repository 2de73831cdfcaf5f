use std::env;

use crate::errors::ConfigError;

pub trait ProviderConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>
    where
        Self: Sized;

    /// Helper function to get environment variables with error handling.
    /// Blank or non-unicode values count as unset.
    fn get_env(
        key: &str,
        required: bool,
        default: Option<String>,
    ) -> Result<Option<String>, ConfigError> {
        match env::var(key).ok().filter(|value| !value.trim().is_empty()) {
            Some(value) => Ok(Some(value)),
            None if !required => Ok(default),
            None => Err(ConfigError::MissingEnvVar {
                env_var: key.to_string(),
            }),
        }
    }
}
