// src/cli/serve.rs — `prodkit serve`

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::core::session::SessionStore;
use crate::core::toolkit::Toolkit;
use crate::infra::config::Config;
use crate::provider::{self, CompletionSettings};

pub async fn run_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let toolkit = build_toolkit(&config)?;
    let state = ApiState {
        store: SessionStore::new(config.session.max_calls),
        toolkit: Arc::new(toolkit),
        token: config.server.token.clone(),
    };

    tracing::info!(
        model = %config.model.model,
        max_calls = config.session.max_calls,
        auth = state.token.is_some(),
        "starting prodkit"
    );
    api::start_server(&config.server, state).await
}

/// Resolve the secret and construct the model-backed toolkit.
/// A missing API key stops startup here.
pub fn build_toolkit(config: &Config) -> anyhow::Result<Toolkit> {
    let api_key = config.api_key()?;
    let provider = provider::from_config(&config.model, api_key)?;
    Ok(Toolkit::new(provider, CompletionSettings::from(&config.model)))
}
