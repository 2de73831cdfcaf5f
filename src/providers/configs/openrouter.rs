use std::time::Duration;

use super::base::ProviderConfig;
use crate::errors::ConfigError;

pub const OPENROUTER_HOST: &str = "https://openrouter.ai";
pub const OPENROUTER_MODEL: &str = "openai/gpt-3.5-turbo";
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Clone)]
pub struct OpenRouterProviderConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: Option<f32>,
    pub timeout: Duration,
    /// Optional attribution headers understood by OpenRouter
    pub referer: Option<String>,
    pub title: Option<String>,
}

impl OpenRouterProviderConfig {
    pub fn new(host: String, api_key: Option<String>) -> Self {
        Self {
            host,
            api_key,
            model: OPENROUTER_MODEL.to_string(),
            temperature: None,
            timeout: Duration::from_secs(30),
            referer: None,
            title: None,
        }
    }
}

impl ProviderConfig for OpenRouterProviderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        // The key is optional here, the factory decides whether its absence is fatal
        let api_key = Self::get_env(OPENROUTER_API_KEY_VAR, false, None)?;

        let host = Self::get_env("OPENROUTER_HOST", false, Some(OPENROUTER_HOST.to_string()))?
            .unwrap_or_else(|| OPENROUTER_HOST.to_string());

        let model = Self::get_env("OPENROUTER_MODEL", false, Some(OPENROUTER_MODEL.to_string()))?
            .unwrap_or_else(|| OPENROUTER_MODEL.to_string());

        let referer = Self::get_env("OPENROUTER_REFERER", false, None)?;
        let title = Self::get_env("OPENROUTER_TITLE", false, Some("FluentBot".to_string()))?;

        Ok(Self {
            model,
            referer,
            title,
            ..Self::new(host, api_key)
        })
    }
}
