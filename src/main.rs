use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use remit::cli::quote::QuoteRequest;
use remit::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for remit::AppCommand {
    fn from(cmd: Commands) -> remit::AppCommand {
        match cmd {
            Commands::Rates => remit::AppCommand::Rates,
            Commands::Quote {
                amount,
                pay,
                receive,
                reverse,
            } => remit::AppCommand::Quote(QuoteRequest {
                amount,
                pay,
                receive,
                reverse,
            }),
            Commands::Open { location, state } => remit::AppCommand::Open {
                location,
                state_path: state,
            },
            Commands::Wizard => remit::AppCommand::Wizard,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the conversion rate table
    Rates,
    /// Convert an amount between two currencies
    Quote {
        /// Amount to convert, e.g. 1.5 or 2,500,000
        amount: String,
        /// Currency you pay in
        #[arg(long, default_value = "eth")]
        pay: String,
        /// Currency you receive
        #[arg(long, default_value = "ngn")]
        receive: String,
        /// Treat the amount as the receive amount
        #[arg(short, long)]
        reverse: bool,
    },
    /// Render the screen for a location such as /pay?tab=contact-info
    Open {
        location: String,
        /// JSON file with the wizard state carried to the location
        #[arg(short, long)]
        state: Option<String>,
    },
    /// Run the interactive payout wizard
    Wizard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => remit::cli::setup::setup_at_path(path),
            None => remit::cli::setup::setup(),
        },
        Some(cmd) => remit::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
