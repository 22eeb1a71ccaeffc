// src/main.rs — prodkit entry point

use clap::Parser;

use prodkit::cli::{Cli, Commands};
use prodkit::infra::config::Config;
use prodkit::infra::logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Respects RUST_LOG when set
    logger::init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Some(Commands::Roi {
            tasks,
            hourly_rate,
            automation_cost,
            json,
        }) => prodkit::cli::roi::run_roi(tasks, hourly_rate, automation_cost, json),
        Some(Commands::Check) => prodkit::cli::check::run_check(&config),
        Some(Commands::Ask {
            feature,
            form,
            report,
        }) => prodkit::cli::ask::run_ask(&config, feature, &form, report.as_deref()).await,
        Some(Commands::Serve { host, port }) => {
            prodkit::cli::serve::run_serve(config, host, port).await
        }
        None => prodkit::cli::serve::run_serve(config, None, None).await,
    }
}
