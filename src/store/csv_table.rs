//! World Bank style CSV tables
//!
//! The World Bank publishes indicators as one row per country and one column
//! per year, preceded by a few lines of preamble:
//!
//! ```text
//! "Data Source","World Development Indicators",
//!
//! "Last Updated Date","2017-07-01",
//!
//! "Country Name","Country Code","Indicator Name","Indicator Code","1960",...,"2016",
//! "Algeria","DZA","Official exchange rate (LCU per US$, period average)","PA.NUS.FCRF","10.6",...,
//! ```
//!
//! Empty cells mean no value was published for that year.

use crate::core::currency::canonical_country;
use crate::core::{Indicator, RateTable};
use anyhow::{Context, Result, bail};
use std::io::{Read, Write};
use tracing::{debug, warn};

const HEADER_MARKER: &str = "Country Name";
const CODE_COLUMN: &str = "Country Code";

pub fn read_table<R: Read>(reader: R) -> Result<RateTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = reader.records();

    let header = loop {
        match records.next() {
            Some(record) => {
                let record = record.context("Failed to read CSV preamble")?;
                let first = record.get(0).map(|f| f.trim_start_matches('\u{feff}'));
                if first == Some(HEADER_MARKER) {
                    break record;
                }
            }
            None => bail!("No '{HEADER_MARKER}' header row found"),
        }
    };

    let year_columns: Vec<(usize, i32)> = header
        .iter()
        .enumerate()
        .filter_map(|(idx, field)| field.parse::<i32>().ok().map(|year| (idx, year)))
        .collect();
    if year_columns.is_empty() {
        bail!("Header row has no year columns");
    }
    let code_column = header.iter().position(|field| field == CODE_COLUMN);
    debug!(
        "Found {} year columns ({}-{})",
        year_columns.len(),
        year_columns[0].1,
        year_columns[year_columns.len() - 1].1
    );

    let mut table = RateTable::new();
    for record in records {
        let record = record.context("Failed to read CSV row")?;
        let Some(name) = record.get(0).filter(|c| !c.is_empty()) else {
            warn!("Skipping row without country name: {:?}", record);
            continue;
        };
        let code = code_column
            .and_then(|idx| record.get(idx))
            .unwrap_or_default();
        let country = canonical_country(code, name);
        if country != name {
            debug!("Reading {name} ({code}) as {country}");
        }

        let mut published = false;
        for &(idx, year) in &year_columns {
            let raw = record.get(idx).unwrap_or_default();
            if raw.is_empty() {
                continue;
            }
            let rate: f32 = raw
                .parse()
                .with_context(|| format!("Invalid value '{raw}' for {country} in {year}"))?;
            table.insert(year, country, rate);
            published = true;
        }
        if published {
            table.set_code(country, code);
        }
    }

    debug!(
        "Loaded {} values for {} countries",
        table.len(),
        table.countries().len()
    );
    Ok(table)
}

/// Writes `indicator` in the layout [`read_table`] understands.
pub fn write_table<W: Write>(writer: W, indicator: &Indicator) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    writer.write_record(["Data Source", "World Development Indicators"])?;
    if let Some(last_updated) = &indicator.last_updated {
        writer.write_record(["Last Updated Date", last_updated.as_str()])?;
    }

    let published = indicator.table.years();
    let years: Vec<i32> = match (published.first(), published.last()) {
        (Some(first), Some(last)) => (*first..=*last).collect(),
        _ => Vec::new(),
    };

    let mut header = vec![
        HEADER_MARKER.to_string(),
        "Country Code".to_string(),
        "Indicator Name".to_string(),
        "Indicator Code".to_string(),
    ];
    header.extend(years.iter().map(i32::to_string));
    writer.write_record(&header)?;

    for country in indicator.table.countries() {
        let mut row = vec![
            country.to_string(),
            indicator.table.code_of(country).unwrap_or_default().to_string(),
            indicator.name.clone(),
            indicator.code.clone(),
        ];
        row.extend(years.iter().map(|&year| {
            indicator
                .table
                .lookup(year, country)
                .map(|rate| rate.to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
