mod cli;
mod commands;
mod dotenv;
mod smoke;

use std::process::ExitCode;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use henotace_config::{HenotaceConfig, LoggingConfig};

fn init_logging(logging: &LoggingConfig, override_level: Option<&str>) {
    if !logging.enabled && override_level.is_none() {
        return;
    }

    let directive = override_level.unwrap_or(logging.level.as_directive());
    let directive: Directive = directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let dotenv_path = dotenv::load_dotenv();

    let args = cli::parse();

    // An explicit --config must load; the default location falls back to defaults
    let (config, config_error) = match args.config.as_deref() {
        Some(path) => match henotace_config::load_config_from(path) {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        },
        None => match henotace_config::load_config() {
            Ok(config) => (config, None),
            Err(e) => (HenotaceConfig::default(), Some(e)),
        },
    };

    init_logging(&config.logging, args.log_level.as_deref());

    tracing::info!("henotace v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    tracing::debug!(base_url = %config.api.base_url, "Config loaded");

    match commands::run(args.command, &config, args.api_key).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
