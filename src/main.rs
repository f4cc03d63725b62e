use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use currency::cli::convert::Conversion;
use currency::core::log::init_logging;

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

impl From<Commands> for currency::AppCommand {
    fn from(cmd: Commands) -> currency::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                year,
            } => currency::AppCommand::Conversion(Conversion::Convert {
                amount,
                from,
                to,
                year,
            }),
            Commands::ConvertThroughUsd {
                amount,
                from,
                to,
                base_year,
                target_year,
            } => currency::AppCommand::Conversion(Conversion::ThroughUsd {
                amount,
                from,
                to,
                base_year,
                target_year,
            }),
            Commands::Deflate {
                amount,
                currency,
                base_year,
                target_year,
            } => currency::AppCommand::Conversion(Conversion::Deflate {
                amount,
                currency,
                base_year,
                target_year,
            }),
            Commands::Currencies => currency::AppCommand::Currencies,
            Commands::Fetch => currency::AppCommand::Fetch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between currencies based on historic exchange rates
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Currency of the amount, e.g. EUR
        from: String,
        /// Currency to convert to
        to: String,
        year: i32,
    },
    /// Convert an amount between currencies and years, deflating in US Dollars
    ConvertThroughUsd {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        from: String,
        to: String,
        /// Year the amount is given in
        base_year: i32,
        /// Year to express the amount in
        target_year: i32,
    },
    /// Deflate a monetary value from one year to another based on GDP
    Deflate {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        currency: String,
        base_year: i32,
        target_year: i32,
    },
    /// List supported currencies and the years with data
    Currencies,
    /// Download exchange rates and GDP deflators from the World Bank
    Fetch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => currency::cli::setup::setup(),
        Some(cmd) => currency::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
