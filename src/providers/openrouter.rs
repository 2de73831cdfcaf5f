use reqwest::blocking::Client; // blocking API, one request in flight per call
use serde_json::{json, Value};

use super::{
    base::Provider,
    configs::openrouter::{OpenRouterProviderConfig, OPENROUTER_API_KEY_VAR},
    types::message::Message,
    utils::{messages_to_openai_spec, openai_response_text, read_json_body},
};
use crate::errors::{ProviderError, ProviderResult};

pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterProviderConfig,
}

impl OpenRouterProvider {
    pub fn new(config: OpenRouterProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    fn post(&self, api_key: &str, payload: &Value) -> ProviderResult<Value> {
        let url = format!(
            "{}/api/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let mut request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(payload);

        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            request = request.header("X-Title", title);
        }

        read_json_body(request.send()?)
    }
}

impl Provider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn attempt(&self, messages: &[Message]) -> ProviderResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential(OPENROUTER_API_KEY_VAR.to_string()))?;

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages_to_openai_spec(messages),
        });
        if let Some(temp) = self.config.temperature {
            payload["temperature"] = json!(temp);
        }

        let response = self.post(api_key, &payload)?;
        openai_response_text(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn provider_for(server: &Server, api_key: Option<&str>) -> OpenRouterProvider {
        let config = OpenRouterProviderConfig {
            model: "openai/gpt-3.5-turbo".to_string(),
            temperature: Some(0.7),
            title: Some("FluentBot".to_string()),
            ..OpenRouterProviderConfig::new(server.url(), api_key.map(String::from))
        };
        OpenRouterProvider::new(config).unwrap()
    }

    #[test]
    fn test_attempt_basic() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/v1/chat/completions")
            .match_header("authorization", "Bearer test_api_key")
            .match_header("x-title", "FluentBot")
            .match_body(Matcher::PartialJson(json!({
                "model": "openai/gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "You are a tutor."},
                    {"role": "user", "content": "Hello?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "gen-123",
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": "Hello! How can I help you practise?"},
                        "finish_reason": "stop"
                    }]
                })
                .to_string(),
            )
            .expect(1)
            .create();

        let provider = provider_for(&server, Some("test_api_key"));
        let reply = provider
            .attempt(&[Message::system("You are a tutor."), Message::user("Hello?")])
            .unwrap();

        assert_eq!(reply, "Hello! How can I help you practise?");
        mock.assert();
    }

    #[test]
    fn test_attempt_error_status() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"No auth credentials found"}}"#)
            .create();

        let provider = provider_for(&server, Some("bad_key"));
        match provider.attempt(&[Message::user("Hello?")]) {
            Err(ProviderError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("No auth credentials"));
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_attempt_empty_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(200)
            .with_body("  \n")
            .create();

        let provider = provider_for(&server, Some("test_api_key"));
        assert!(matches!(
            provider.attempt(&[Message::user("Hello?")]),
            Err(ProviderError::EmptyReply)
        ));
    }

    #[test]
    fn test_attempt_without_key_skips_request() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/v1/chat/completions")
            .expect(0)
            .create();

        let provider = provider_for(&server, None);
        assert!(matches!(
            provider.attempt(&[Message::user("Hello?")]),
            Err(ProviderError::MissingCredential(_))
        ));
        mock.assert();
    }
}
