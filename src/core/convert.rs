//! Conversions across currencies and years
//!
//! Exchange rates are local currency units per US Dollar, so every conversion
//! pivots through USD. Values are moved between years with the GDP deflator of
//! the currency's country.

use super::currency::{self, USD};
use super::error::{ConversionError, Operation};
use super::rates::RateTable;
use tracing::debug;

/// The loaded exchange rate and deflator tables.
///
/// Built once at startup and only read afterwards, so it can be shared across
/// threads freely.
#[derive(Debug, Clone, Default)]
pub struct Rates {
    exchange_rates: RateTable,
    deflator: RateTable,
}

impl Rates {
    pub fn new(exchange_rates: RateTable, deflator: RateTable) -> Self {
        Rates {
            exchange_rates,
            deflator,
        }
    }

    pub fn exchange_rates(&self) -> &RateTable {
        &self.exchange_rates
    }

    pub fn deflator(&self) -> &RateTable {
        &self.deflator
    }

    /// Converts `value` given in `currency` in `year` to US Dollars of the same year.
    pub fn currency_in_dollars(
        &self,
        value: f64,
        currency: &str,
        year: i32,
    ) -> Result<f64, ConversionError> {
        let country = currency::country_of(currency)?;
        let rate = self
            .exchange_rates
            .lookup(year, country)
            .ok_or_else(|| ConversionError::DataUnavailable {
                year,
                country: country.to_string(),
                amount: value,
                currency: currency.to_lowercase(),
                operation: Operation::Convert,
            })?;
        debug!(currency, year, rate, "Resolved exchange rate");
        Ok(value / f64::from(rate))
    }

    /// Converts `amount` between two currencies at the rates of a single year.
    pub fn convert(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
        year: i32,
    ) -> Result<f64, ConversionError> {
        let amount_in_dollars = self.currency_in_dollars(amount, from_currency, year)?;
        let dollars_per_target_unit = self.currency_in_dollars(1.0, to_currency, year)?;
        Ok(amount_in_dollars / dollars_per_target_unit)
    }

    /// Converts `amount` of `from_currency` in `base_year` into `to_currency` in
    /// `target_year`.
    ///
    /// The amount is converted to USD at `base_year` rates, deflated with the US
    /// GDP deflator to `target_year`, and converted to the target currency at
    /// `target_year` rates.
    pub fn convert_through_usd(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
        base_year: i32,
        target_year: i32,
    ) -> Result<f64, ConversionError> {
        let dollars = self.currency_in_dollars(amount, from_currency, base_year)?;
        let deflated =
            self.deflate_monetary_value(dollars, base_year, target_year, USD.alpha_3)?;
        let dollars_per_target_unit = self.currency_in_dollars(1.0, to_currency, target_year)?;
        Ok(deflated / dollars_per_target_unit)
    }

    /// Moves `base_value` from the price level of `base_year` to that of
    /// `target_year` using the GDP deflator of the country behind `currency`.
    pub fn deflate_monetary_value(
        &self,
        base_value: f64,
        base_year: i32,
        target_year: i32,
        currency: &str,
    ) -> Result<f64, ConversionError> {
        let country = currency::country_of(currency)?;
        let index_of = |year: i32| {
            self.deflator
                .lookup(year, country)
                .ok_or_else(|| ConversionError::DataUnavailable {
                    year,
                    country: country.to_string(),
                    amount: base_value,
                    currency: currency.to_lowercase(),
                    operation: Operation::Deflate,
                })
        };
        let base = index_of(base_year)?;
        let target = index_of(target_year)?;
        debug!(currency, base_year, base, target_year, target, "Resolved deflator");

        if base_year == target_year {
            return Ok(base_value);
        }
        Ok(base_value * f64::from(target) / f64::from(base))
    }
}
