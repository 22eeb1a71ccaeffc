// src/provider/mod.rs — Model provider layer

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::infra::config::ModelConfig;
use crate::infra::errors::ToolkitError;

/// Remote chat-completion service. Failures surface as `ToolkitError::Service`.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> &str;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ToolkitError>;
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Model selection and sampling settings applied to every completion.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl From<&ModelConfig> for CompletionSettings {
    fn from(c: &ModelConfig) -> Self {
        Self {
            model: c.model.clone(),
            max_tokens: c.max_tokens,
            temperature: c.temperature,
        }
    }
}

/// Send one system + user exchange and return the reply text.
pub async fn complete(
    provider: &dyn ModelProvider,
    settings: &CompletionSettings,
    system: &str,
    user: &str,
) -> Result<String, ToolkitError> {
    let request = ChatRequest {
        model: settings.model.clone(),
        messages: vec![Message::system(system), Message::user(user)],
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    };
    let response = provider.chat(request).await?;
    tracing::debug!(
        provider = provider.id(),
        tokens = response.usage.total(),
        "completion received"
    );
    Ok(response.content)
}

/// Build the provider named in config. The API key must already be resolved.
pub fn from_config(
    config: &ModelConfig,
    api_key: String,
) -> Result<Arc<dyn ModelProvider>, ToolkitError> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(openai::OpenAIProvider::with_base_url(
            api_key,
            config.base_url.clone(),
        ))),
        other => Err(ToolkitError::Config(format!(
            "Unknown model provider '{other}'. Supported: openai"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl ModelProvider for Recording {
        fn id(&self) -> &str {
            "recording"
        }

        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ToolkitError> {
            self.seen.lock().unwrap().push(request);
            Ok(ChatResponse {
                content: "ok".into(),
                usage: TokenUsage {
                    input_tokens: 3,
                    output_tokens: 1,
                },
            })
        }
    }

    #[test]
    fn test_message_constructors() {
        let m = Message::system("You are helpful");
        assert_eq!(m.role, Role::System);
        assert_eq!(Message::user("hi").role.as_str(), "user");
    }

    #[test]
    fn test_token_usage_total() {
        let u = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(u.total(), 150);
        assert_eq!(TokenUsage::default().total(), 0);
    }

    #[tokio::test]
    async fn test_complete_sends_system_then_user() {
        let provider = Recording {
            seen: Mutex::new(Vec::new()),
        };
        let settings = CompletionSettings::from(&ModelConfig::default());
        let reply = complete(&provider, &settings, "persona", "question")
            .await
            .unwrap();
        assert_eq!(reply, "ok");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "gpt-4o-mini");
        assert_eq!(seen[0].messages[0].role, Role::System);
        assert_eq!(seen[0].messages[0].content, "persona");
        assert_eq!(seen[0].messages[1].role, Role::User);
        assert_eq!(seen[0].messages[1].content, "question");
    }

    #[test]
    fn test_from_config_rejects_unknown_provider() {
        let mut config = ModelConfig::default();
        config.provider = "nope".into();
        let err = from_config(&config, "k".into()).err().unwrap();
        assert!(matches!(err, ToolkitError::Config(_)));
    }

    #[test]
    fn test_from_config_openai() {
        let provider = from_config(&ModelConfig::default(), "k".into()).unwrap();
        assert_eq!(provider.id(), "openai");
    }
}
