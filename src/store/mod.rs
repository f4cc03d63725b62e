pub mod csv_table;

use crate::core::config::AppConfig;
use crate::core::{Indicator, RateTable, Rates};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, info, warn};

/// The two datasets conversions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    ExchangeRates,
    Deflator,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::ExchangeRates, Dataset::Deflator];

    /// World Bank indicator code of the series.
    pub fn indicator_code(&self) -> &'static str {
        match self {
            Dataset::ExchangeRates => "PA.NUS.FCRF",
            Dataset::Deflator => "NY.GDP.DEFL.ZS",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::ExchangeRates => "exchange-rates.csv",
            Dataset::Deflator => "gdp-deflator.csv",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Dataset::ExchangeRates => "exchange rates",
            Dataset::Deflator => "GDP deflator",
        }
    }
}

/// Locations of the datasets on disk.
#[derive(Debug, Clone)]
pub struct DataStore {
    exchange_rates: PathBuf,
    deflator: PathBuf,
}

impl DataStore {
    pub fn new(exchange_rates: PathBuf, deflator: PathBuf) -> Self {
        Self {
            exchange_rates,
            deflator,
        }
    }

    /// Both datasets under `dir` with their default file names.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(Dataset::ExchangeRates.file_name()),
            dir.join(Dataset::Deflator.file_name()),
        )
    }

    /// Explicit paths from the config win over the data directory, which is
    /// only resolved when some dataset has no explicit path.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::from_config_with(config, || config.default_data_path())
    }

    fn from_config_with<F>(config: &AppConfig, data_dir: F) -> Result<Self>
    where
        F: Fn() -> Result<PathBuf>,
    {
        let resolve = |explicit: &Option<String>, dataset: Dataset| -> Result<PathBuf> {
            match explicit {
                Some(path) => Ok(PathBuf::from(path)),
                None => Ok(data_dir()?.join(dataset.file_name())),
            }
        };
        Ok(Self::new(
            resolve(&config.data.exchange_rates, Dataset::ExchangeRates)?,
            resolve(&config.data.deflator, Dataset::Deflator)?,
        ))
    }

    pub fn path(&self, dataset: Dataset) -> &Path {
        match dataset {
            Dataset::ExchangeRates => &self.exchange_rates,
            Dataset::Deflator => &self.deflator,
        }
    }

    pub fn load_table(&self, dataset: Dataset) -> Result<RateTable> {
        let path = self.path(dataset);
        debug!("Loading {} from {}", dataset.description(), path.display());
        let file = File::open(path).with_context(|| {
            format!(
                "Failed to open {} data at {}. Run `currency fetch` to download it.",
                dataset.description(),
                path.display()
            )
        })?;
        csv_table::read_table(BufReader::new(file)).with_context(|| {
            format!(
                "Failed to parse {} data at {}",
                dataset.description(),
                path.display()
            )
        })
    }

    /// Loads both tables. This is the single place rate data enters the process.
    pub fn load_rates(&self) -> Result<Rates> {
        let exchange_rates = self.load_table(Dataset::ExchangeRates)?;
        let deflator = self.load_table(Dataset::Deflator)?;
        Ok(Rates::new(exchange_rates, deflator))
    }

    /// Replaces the files of all `indicators` or none of them.
    ///
    /// Every table is first written to a temporary file next to its target.
    /// The temporaries are then renamed into place one by one, and if any rename
    /// fails the files replaced so far are restored from their backups.
    pub fn save_all(&self, indicators: &[(Dataset, Indicator)]) -> Result<Vec<PathBuf>> {
        let staged = indicators
            .iter()
            .map(|(dataset, indicator)| {
                self.stage(*dataset, indicator)
                    .map(|file| (*dataset, file))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut replaced: Vec<(PathBuf, Option<TempPath>)> = Vec::with_capacity(staged.len());
        for (dataset, file) in staged {
            let path = self.path(dataset).to_path_buf();
            match swap_in(file, &path) {
                Ok(backup) => replaced.push((path, backup)),
                Err(e) => {
                    roll_back(replaced);
                    return Err(e);
                }
            }
        }

        for (dataset, indicator) in indicators {
            info!(
                "Saved {} ({} values) to {}",
                dataset.description(),
                indicator.table.len(),
                self.path(*dataset).display()
            );
        }
        // Dropping the backups deletes them
        Ok(replaced.into_iter().map(|(path, _)| path).collect())
    }

    fn stage(&self, dataset: Dataset, indicator: &Indicator) -> Result<NamedTempFile> {
        let path = self.path(dataset);
        let dir = parent_dir(path);
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        csv_table::write_table(BufWriter::new(file.as_file_mut()), indicator)
            .with_context(|| format!("Failed to write {} data", dataset.description()))?;
        debug!(
            "Staged {} at {}",
            dataset.description(),
            file.path().display()
        );
        Ok(file)
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Moves `file` to `path`, returning a backup of the file it replaced.
fn swap_in(file: NamedTempFile, path: &Path) -> Result<Option<TempPath>> {
    let backup = if path.is_file() {
        let backup = NamedTempFile::new_in(parent_dir(path))
            .with_context(|| format!("Failed to create backup of {}", path.display()))?
            .into_temp_path();
        fs::rename(path, &backup)
            .with_context(|| format!("Failed to back up {}", path.display()))?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = file.persist(path) {
        if let Some(backup) = backup {
            restore(path, Some(backup));
        }
        return Err(e.error).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(backup)
}

fn roll_back(replaced: Vec<(PathBuf, Option<TempPath>)>) {
    for (path, backup) in replaced.into_iter().rev() {
        restore(&path, backup);
    }
}

fn restore(path: &Path, backup: Option<TempPath>) {
    let restored = match backup {
        Some(backup) => backup.persist(path).map_err(|e| e.error),
        None => fs::remove_file(path),
    };
    match restored {
        Ok(()) => debug!("Restored {}", path.display()),
        Err(e) => warn!("Failed to restore {}: {}", path.display(), e),
    }
}

#[cfg(test)]
pub(crate) fn fixture_rates() -> Rates {
    let exchange_rates = csv_table::read_table(
        include_str!("../../tests/fixtures/exchange-rates.csv").as_bytes(),
    )
    .expect("exchange rate fixture parses");
    let deflator =
        csv_table::read_table(include_str!("../../tests/fixtures/gdp-deflator.csv").as_bytes())
            .expect("deflator fixture parses");
    Rates::new(exchange_rates, deflator)
}
