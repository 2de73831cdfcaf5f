use reqwest::blocking::Client;
use serde_json::{json, Value};

use super::{
    base::Provider,
    configs::gemini::{GeminiProviderConfig, GEMINI_API_KEY_VAR},
    types::message::Message,
    utils::{gemini_response_text, messages_to_gemini_prompt, read_json_body},
};
use crate::errors::{ProviderError, ProviderResult};

/// Gemini takes a single text prompt, so the conversation is flattened
/// before sending. The key travels as the `key` query parameter.
pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    fn post(&self, api_key: &str, payload: &Value) -> ProviderResult<Value> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.host.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(payload)
            .send()?;

        read_json_body(response)
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn attempt(&self, messages: &[Message]) -> ProviderResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential(GEMINI_API_KEY_VAR.to_string()))?;

        let mut payload = json!({
            "contents": [{
                "parts": [{"text": messages_to_gemini_prompt(messages)}]
            }]
        });
        if let Some(temp) = self.config.temperature {
            payload["generationConfig"] = json!({ "temperature": temp });
        }

        let response = self.post(api_key, &payload)?;
        gemini_response_text(&response)
    }
}
