use reqwest::blocking::Response;
use serde_json::{json, Value};

use super::types::message::Message;
use crate::errors::{ProviderError, ProviderResult};

/// Longest slice of an error body kept in a `ProviderError::Status`
const ERROR_BODY_LIMIT: usize = 512;

/// Check the status, reject empty bodies and parse the rest as JSON
pub fn read_json_body(response: Response) -> ProviderResult<Value> {
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        });
    }

    if body.trim().is_empty() {
        return Err(ProviderError::EmptyReply);
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
}

/// Convert internal Message format to the OpenAI-style message array
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role(),
                "content": message.content(),
            })
        })
        .collect()
}

/// Pull the assistant text out of an OpenAI-style chat completion
pub fn openai_response_text(response: &Value) -> ProviderResult<String> {
    if let Some(error) = response.get("error") {
        return Err(ProviderError::Malformed(format!("API error: {}", error)));
    }

    let text = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| ProviderError::Malformed("No message content in choices".to_string()))?;

    non_blank(text)
}

/// Flatten a conversation into one prompt, one `Role: content` block per message
pub fn messages_to_gemini_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|message| format!("{}: {}", message.role().label(), message.content()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Concatenate the text parts of the first Gemini candidate
pub fn gemini_response_text(response: &Value) -> ProviderResult<String> {
    if let Some(error) = response.get("error") {
        return Err(ProviderError::Malformed(format!("API error: {}", error)));
    }

    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            let reason = response["promptFeedback"]["blockReason"]
                .as_str()
                .unwrap_or("no candidates");
            ProviderError::Malformed(format!("No candidate content ({})", reason))
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    non_blank(&text)
}

fn non_blank(text: &str) -> ProviderResult<String> {
    if text.trim().is_empty() {
        Err(ProviderError::EmptyReply)
    } else {
        Ok(text.to_string())
    }
}
