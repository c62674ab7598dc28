pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::quote::QuoteRequest;
use crate::core::config::AppConfig;
use crate::core::conversion::Converter;
use anyhow::Result;
use tracing::{debug, info};

/// Commands that run against a loaded configuration.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates,
    Quote(QuoteRequest),
    Open {
        location: String,
        state_path: Option<String>,
    },
    Wizard,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!(?command, "remit starting...");
    let config = load_config(config_path)?;

    match command {
        AppCommand::Rates => {
            cli::rates::run(&config.rate_table()?);
            Ok(())
        }
        AppCommand::Quote(request) => {
            let table = config.rate_table()?;
            let converter = Converter::new(&table, config.conversion.invalid_amount);
            cli::quote::run(&request, &converter)
        }
        AppCommand::Open {
            location,
            state_path,
        } => cli::open::run(&config, &location, state_path.as_deref()),
        AppCommand::Wizard => cli::wizard::run(&config).await,
    }
}
