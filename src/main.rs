use anyhow::Context;
use clap::Parser;

use hammock::cli::{Cli, Command};
use hammock::config::{Config, ConfigStore, Endpoint};
use hammock::host::SelectionKind;
use hammock::logging::init_tracing;
use hammock::runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Command::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.proxy.bind_addr = bind;
                config.validate()?;
            }
            runtime::serve(ConfigStore::new(config, config_path)).await
        }
        Command::Transform {
            operation,
            param,
            text,
            direct,
        } => {
            if direct {
                config.panel.endpoint = Endpoint::Direct;
                config.validate()?;
            }
            runtime::transform_once(&config, operation, param.as_deref(), text).await
        }
        Command::Panel {
            primary,
            direct,
            interval_ms,
        } => {
            if direct {
                config.panel.endpoint = Endpoint::Direct;
            }
            if let Some(interval_ms) = interval_ms {
                config.panel.poll_interval_ms = interval_ms;
            }
            config.validate()?;

            let kind = if primary {
                SelectionKind::Primary
            } else {
                SelectionKind::Clipboard
            };
            runtime::run_panel(&config, kind).await
        }
        Command::Presets => {
            runtime::print_presets();
            Ok(())
        }
    }
}
