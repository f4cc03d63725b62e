pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

pub use crate::core::config;

use crate::cli::convert::Conversion;
use crate::providers::WorldBankProvider;
use crate::store::DataStore;
use anyhow::Result;
use tracing::{debug, info, warn};

pub enum AppCommand {
    Conversion(Conversion),
    Currencies,
    Fetch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = DataStore::from_config(&config)?;

    match command {
        AppCommand::Conversion(conversion) => {
            let rates = store.load_rates()?;
            cli::convert::run(&conversion, &rates)
        }
        AppCommand::Currencies => {
            let rates = store
                .load_rates()
                .inspect_err(|e| warn!("Listing currencies without rate data: {e:#}"))
                .ok();
            cli::currencies::run(rates.as_ref());
            Ok(())
        }
        AppCommand::Fetch => {
            let provider = WorldBankProvider::new(config.world_bank_base_url())?;
            cli::fetch::run(&provider, &store).await
        }
    }
}
