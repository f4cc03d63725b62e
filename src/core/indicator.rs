//! Sources of published indicator series

use super::rates::RateTable;
use anyhow::Result;
use async_trait::async_trait;

/// A published indicator, e.g. official exchange rates or the GDP deflator.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub code: String,
    pub name: String,
    pub last_updated: Option<String>,
    pub table: RateTable,
}

#[async_trait]
pub trait IndicatorSource: Send + Sync {
    async fn fetch_indicator(&self, code: &str) -> Result<Indicator>;
}
