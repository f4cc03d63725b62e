use crate::core::currency::canonical_country;
use crate::core::{Indicator, IndicatorSource, RateTable};
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_PAGE_SIZE: usize = 20_000;

/// Downloads indicator series from the World Bank v2 API.
pub struct WorldBankProvider {
    base_url: String,
    per_page: usize,
    client: reqwest::Client,
}

impl WorldBankProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("currency/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(WorldBankProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page: DEFAULT_PAGE_SIZE,
            client,
        })
    }

    pub fn with_page_size(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    page: u32,
    pages: u32,
    lastupdated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Named {
    value: String,
}

#[derive(Debug, Deserialize)]
struct Observation {
    indicator: Named,
    country: Named,
    #[serde(default)]
    countryiso3code: String,
    date: String,
    value: Option<f64>,
}

#[async_trait]
impl IndicatorSource for WorldBankProvider {
    async fn fetch_indicator(&self, code: &str) -> Result<Indicator> {
        let client = &self.client;

        let mut table = RateTable::new();
        let mut name = None;
        let mut last_updated = None;
        let mut page = 1;
        loop {
            let url = format!(
                "{}/v2/country/all/indicator/{}?format=json&per_page={}&page={}",
                self.base_url, code, self.per_page, page
            );
            debug!("Requesting indicator data from {}", url);

            let response = with_retry(
                || async {
                    client
                        .get(&url)
                        .send()
                        .await
                        .and_then(|r| r.error_for_status())
                },
                3,
                500,
            )
            .await
            .with_context(|| format!("Failed to send request for indicator: {code}"))?;

            let response_text = response
                .text()
                .await
                .with_context(|| format!("Failed to get response text for indicator: {code}"))?;

            let (info, observations): (PageInfo, Option<Vec<Observation>>) =
                serde_json::from_str(&response_text).with_context(|| {
                    format!(
                        "Failed to parse World Bank response for indicator: {code}. Response: '{response_text}'"
                    )
                })?;

            last_updated = last_updated.or(info.lastupdated);
            for observation in observations.unwrap_or_default() {
                if name.is_none() {
                    name = Some(observation.indicator.value.clone());
                }
                let Some(value) = observation.value else {
                    continue;
                };
                let country =
                    canonical_country(&observation.countryiso3code, &observation.country.value);
                match observation.date.parse::<i32>() {
                    Ok(year) => {
                        table.insert(year, country, value as f32);
                        table.set_code(country, &observation.countryiso3code);
                    }
                    Err(_) => warn!(
                        "Skipping observation for {} with non-annual date '{}'",
                        observation.country.value, observation.date
                    ),
                }
            }

            if info.page >= info.pages {
                break;
            }
            page += 1;
        }

        if table.is_empty() {
            return Err(anyhow!("No data published for indicator: {}", code));
        }
        debug!(
            "Fetched {} values of {} for {} countries",
            table.len(),
            code,
            table.countries().len()
        );

        Ok(Indicator {
            code: code.to_string(),
            name: name.unwrap_or_else(|| code.to_string()),
            last_updated,
            table,
        })
    }
}
