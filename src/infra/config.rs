// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::ToolkitError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Model calls a single session may issue.
    pub max_calls: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_calls: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional bearer token required on every API request.
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8501,
            token: None,
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        match paths::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ToolkitError> {
        if self.session.max_calls == 0 {
            return Err(ToolkitError::Config(
                "session.max_calls must be at least 1".into(),
            ));
        }
        if self.model.model.trim().is_empty() {
            return Err(ToolkitError::Config("model.model cannot be empty".into()));
        }
        Ok(())
    }

    /// Resolve the API secret from the environment. Missing is fatal.
    pub fn api_key(&self) -> Result<String, ToolkitError> {
        Self::api_key_from(&self.model.api_key_env, |name| std::env::var(name).ok())
    }

    fn api_key_from(
        var: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ToolkitError> {
        match lookup(var) {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ToolkitError::Config(format!(
                "{var} is not set. Export it before starting prodkit."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.model.model, "gpt-4o-mini");
        assert_eq!(c.model.api_key_env, "OPENAI_API_KEY");
        assert_eq!(c.session.max_calls, 5);
        assert_eq!(c.server.port, 8501);
        assert!(c.server.token.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.session.max_calls, 5);
        assert_eq!(config.model.provider, "openai");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[model]
provider = "openai"
model = "gpt-4.1-mini"
base_url = "http://localhost:11434/v1"
api_key_env = "LOCAL_KEY"
max_tokens = 800
temperature = 0.2

[session]
max_calls = 8

[server]
host = "0.0.0.0"
port = 9000
token = "secret"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.model, "gpt-4.1-mini");
        assert_eq!(config.model.max_tokens, Some(800));
        assert!((config.model.temperature.unwrap() - 0.2).abs() < 0.001);
        assert_eq!(config.session.max_calls, 8);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_partial_server_section_keeps_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.token.is_none());
    }

    #[test]
    fn test_partial_model_section_keeps_defaults() {
        let config: Config = toml::from_str("[model]\nmodel = \"x\"").unwrap();
        assert_eq!(config.model.model, "x");
        assert_eq!(config.model.provider, "openai");
        assert_eq!(config.model.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_empty_session_section_keeps_defaults() {
        let config: Config = toml::from_str("[session]").unwrap();
        assert_eq!(config.session.max_calls, 5);
    }

    #[test]
    fn test_zero_max_calls_rejected() {
        let mut c = Config::default();
        c.session.max_calls = 0;
        assert!(matches!(c.validate(), Err(ToolkitError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nmax_calls = 3").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.session.max_calls, 3);
        assert_eq!(config.model.model, "gpt-4o-mini");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_missing_is_config_error() {
        let err = Config::api_key_from("OPENAI_API_KEY", |_| None).unwrap_err();
        assert!(matches!(err, ToolkitError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_api_key_blank_is_config_error() {
        let err = Config::api_key_from("K", |_| Some("   ".into())).unwrap_err();
        assert!(matches!(err, ToolkitError::Config(_)));
    }

    #[test]
    fn test_api_key_present() {
        let key = Config::api_key_from("K", |_| Some("sk-test".into())).unwrap();
        assert_eq!(key, "sk-test");
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.session.max_calls, config.session.max_calls);
        assert_eq!(deserialized.model.base_url, config.model.base_url);
    }
}
