// src/provider/openai.rs — OpenAI Chat Completions provider

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, ModelProvider, TokenUsage};
use crate::infra::errors::ToolkitError;

const PROVIDER: &str = "openai";

pub struct OpenAIProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.openai.com/v1".into())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn request_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
    });

    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::json!(temp);
    }
    body
}

/// Missing counts read as 0; counts beyond `u32` saturate.
fn token_count(v: &serde_json::Value) -> u32 {
    v.as_u64()
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn parse_response(resp: &serde_json::Value) -> Result<ChatResponse, ToolkitError> {
    let content = resp["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| ToolkitError::service(PROVIDER, "Response has no message content"))?
        .to_string();

    let usage = TokenUsage {
        input_tokens: token_count(&resp["usage"]["prompt_tokens"]),
        output_tokens: token_count(&resp["usage"]["completion_tokens"]),
    };

    Ok(ChatResponse { content, usage })
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    fn id(&self) -> &str {
        PROVIDER
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ToolkitError> {
        let body = request_body(&request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolkitError::service(PROVIDER, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ToolkitError::service(
                PROVIDER,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        let resp: serde_json::Value = response.json().await.map_err(|e| {
            ToolkitError::service(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        parse_response(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Message;

    #[test]
    fn test_request_body_shape() {
        let req = ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![Message::system("sys"), Message::user("hi")],
            max_tokens: Some(300),
            temperature: None,
        };
        let body = request_body(&req);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["max_tokens"], 300);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response_extracts_content_and_usage() {
        let resp = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "GO" }, "finish_reason": "stop" }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 40 }
        });
        let parsed = parse_response(&resp).unwrap();
        assert_eq!(parsed.content, "GO");
        assert_eq!(parsed.usage.total(), 160);
    }

    #[test]
    fn test_oversized_token_counts_saturate() {
        let resp = serde_json::json!({
            "choices": [{ "message": { "content": "ok" } }],
            "usage": { "prompt_tokens": 5_000_000_000u64, "completion_tokens": 7 }
        });
        let parsed = parse_response(&resp).unwrap();
        assert_eq!(parsed.usage.input_tokens, u32::MAX);
        assert_eq!(parsed.usage.output_tokens, 7);
    }

    #[test]
    fn test_missing_usage_reads_zero() {
        let resp = serde_json::json!({ "choices": [{ "message": { "content": "ok" } }] });
        assert_eq!(parse_response(&resp).unwrap().usage.total(), 0);
    }

    #[test]
    fn test_parse_response_without_choices_is_service_error() {
        let resp = serde_json::json!({ "error": { "message": "quota" } });
        assert!(matches!(
            parse_response(&resp),
            Err(ToolkitError::Service { .. })
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let p = OpenAIProvider::with_base_url("k".into(), "http://localhost:8080/v1/".into());
        assert_eq!(p.base_url, "http://localhost:8080/v1");
        assert_eq!(OpenAIProvider::new("k".into()).id(), "openai");
    }
}
