use super::ui;
use crate::core::IndicatorSource;
use crate::store::{DataStore, Dataset};
use anyhow::{Context, Result};
use futures::future::join_all;

/// Downloads both datasets concurrently and replaces the files in `store`.
///
/// Nothing is written unless every download succeeds, and the files are swapped
/// in together, so a failed fetch never leaves a mix of old and new data behind.
pub async fn run(source: &dyn IndicatorSource, store: &DataStore) -> Result<()> {
    let pb = ui::new_download_bar(Dataset::ALL.len(), "Downloading indicators");

    let downloads = Dataset::ALL.into_iter().map(|dataset| {
        let pb_clone = pb.clone();
        async move {
            let result = source.fetch_indicator(dataset.indicator_code()).await;
            pb_clone.inc(1);
            (dataset, result)
        }
    });
    let results = join_all(downloads).await;
    pb.finish_and_clear();

    let mut indicators = Vec::with_capacity(results.len());
    for (dataset, result) in results {
        let indicator = result.with_context(|| {
            format!(
                "Failed to download {} ({})",
                dataset.description(),
                dataset.indicator_code()
            )
        })?;
        indicators.push((dataset, indicator));
    }

    let paths = store.save_all(&indicators)?;
    for ((dataset, indicator), path) in indicators.iter().zip(&paths) {
        let years = indicator.table.years();
        let coverage = years
            .first()
            .zip(years.last())
            .map_or("no years".to_string(), |(first, last)| {
                format!("{first}-{last}")
            });
        println!(
            "{} {} ({} countries, {}) to {}",
            ui::style_text("Saved", ui::StyleType::Success),
            dataset.description(),
            indicator.table.countries().len(),
            coverage,
            path.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Indicator, RateTable};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use tempfile::TempDir;

    // Serves a fixed table for every indicator except the one told to fail
    struct MockIndicatorSource {
        failing: Option<&'static str>,
    }

    #[async_trait]
    impl IndicatorSource for MockIndicatorSource {
        async fn fetch_indicator(&self, code: &str) -> Result<Indicator> {
            if self.failing == Some(code) {
                return Err(anyhow!("service unavailable"));
            }
            let value = if code == Dataset::Deflator.indicator_code() {
                100.0
            } else {
                1.0
            };
            Ok(Indicator {
                code: code.to_string(),
                name: code.to_string(),
                last_updated: None,
                table: RateTable::from_iter([(2009, "United States", value)]),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_writes_both_datasets() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::in_dir(dir.path());

        run(&MockIndicatorSource { failing: None }, &store)
            .await
            .unwrap();

        let rates = store.load_rates().unwrap();
        assert_eq!(rates.convert(14.0, "usd", "usd", 2009).unwrap(), 14.0);
        assert_eq!(
            rates.deflator().lookup(2009, "United States"),
            Some(100.0)
        );
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_datasets() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::in_dir(dir.path());
        std::fs::write(store.path(Dataset::ExchangeRates), "OLD").unwrap();
        std::fs::create_dir(store.path(Dataset::Deflator)).unwrap();

        let result = run(&MockIndicatorSource { failing: None }, &store).await;

        assert!(result.is_err());
        assert_eq!(
            std::fs::read_to_string(store.path(Dataset::ExchangeRates)).unwrap(),
            "OLD"
        );
    }

    #[tokio::test]
    async fn test_failed_download_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::in_dir(dir.path());

        let source = MockIndicatorSource {
            failing: Some("NY.GDP.DEFL.ZS"),
        };
        let err = run(&source, &store).await.unwrap_err();

        assert!(err.to_string().contains("GDP deflator"), "{err}");
        assert!(!store.path(Dataset::ExchangeRates).exists());
        assert!(!store.path(Dataset::Deflator).exists());
    }
}
