// src/cli/check.rs — Configuration diagnostics

use crate::infra::config::Config;
use crate::infra::paths;

pub fn run_check(config: &Config) -> anyhow::Result<()> {
    println!("prodkit v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match paths::config_file_path() {
        Some(path) if path.exists() => println!("  Config:     {} (loaded)", path.display()),
        _ => println!("  Config:     (using defaults)"),
    }
    println!(
        "  Model:      {}/{} via {}",
        config.model.provider, config.model.model, config.model.base_url
    );
    println!("  Session:    {} AI calls per session", config.session.max_calls);
    println!(
        "  Server:     {}:{} (auth {})",
        config.server.host,
        config.server.port,
        if config.server.token.is_some() { "on" } else { "off" }
    );

    config.validate()?;
    config.api_key()?;
    println!("  API key:    {} is set", config.model.api_key_env);
    println!();
    println!("Ready.");
    Ok(())
}
