use std::time::Duration;

use super::base::ProviderConfig;
use crate::errors::ConfigError;

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl GeminiProviderConfig {
    pub fn new(host: String, api_key: Option<String>) -> Self {
        Self {
            host,
            api_key,
            model: GEMINI_MODEL.to_string(),
            temperature: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ProviderConfig for GeminiProviderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = Self::get_env(GEMINI_API_KEY_VAR, false, None)?;

        let host = Self::get_env("GEMINI_HOST", false, Some(GEMINI_HOST.to_string()))?
            .unwrap_or_else(|| GEMINI_HOST.to_string());

        let model = Self::get_env("GEMINI_MODEL", false, Some(GEMINI_MODEL.to_string()))?
            .unwrap_or_else(|| GEMINI_MODEL.to_string());

        Ok(Self {
            model,
            ..Self::new(host, api_key)
        })
    }
}
