//! OpenAI-compatible chat completions client.
//!
//! Thin HTTP wrapper for `/chat/completions`. Pure parsing in
//! `parse_chat_response` for testability.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::LlmError;

/// Low temperature keeps reviews consistent between runs.
const REVIEW_TEMPERATURE: f32 = 0.4;

// =============================================================================
// CLIENT
// =============================================================================

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn chat(&self, model: &str, system: &str, user: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: REVIEW_TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_chat_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract `choices[0].message.content`, trimmed.
fn parse_chat_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let content = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| LlmError::ApiParse("chat completions: missing choices[0].message.content".to_string()))?;

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_response() {
        let json = serde_json::json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "  ביקורת קצרה.  " },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
        })
        .to_string();
        let reply = parse_chat_response(&json).unwrap();
        assert_eq!(reply, "ביקורת קצרה.");
    }

    #[test]
    fn parse_missing_choices() {
        let json = serde_json::json!({ "model": "gpt-4o-mini", "choices": [] }).to_string();
        assert!(parse_chat_response(&json).is_err());
    }

    #[test]
    fn parse_null_content() {
        let json = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })
        .to_string();
        assert!(parse_chat_response(&json).is_err());
    }

    #[test]
    fn parse_invalid_json() {
        assert!(parse_chat_response("not json").is_err());
    }
}
