use crate::core::{ConversionError, Rates};
use anyhow::Result;
use tracing::debug;

/// A single conversion request as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Convert {
        amount: f64,
        from: String,
        to: String,
        year: i32,
    },
    ThroughUsd {
        amount: f64,
        from: String,
        to: String,
        base_year: i32,
        target_year: i32,
    },
    Deflate {
        amount: f64,
        currency: String,
        base_year: i32,
        target_year: i32,
    },
}

impl Conversion {
    pub fn evaluate(&self, rates: &Rates) -> Result<f64, ConversionError> {
        match self {
            Conversion::Convert {
                amount,
                from,
                to,
                year,
            } => rates.convert(*amount, from, to, *year),
            Conversion::ThroughUsd {
                amount,
                from,
                to,
                base_year,
                target_year,
            } => rates.convert_through_usd(*amount, from, to, *base_year, *target_year),
            Conversion::Deflate {
                amount,
                currency,
                base_year,
                target_year,
            } => rates.deflate_monetary_value(*amount, *base_year, *target_year, currency),
        }
    }
}

/// Prints the result of `conversion` as a bare number on stdout.
pub fn run(conversion: &Conversion, rates: &Rates) -> Result<()> {
    debug!(?conversion, "Evaluating");
    let value = conversion.evaluate(rates)?;
    println!("{value}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture_rates;
    use approx::assert_relative_eq;

    #[test]
    fn test_currency_conversion() {
        let conversion = Conversion::Convert {
            amount: 14.0,
            from: "USD".to_string(),
            to: "USD".to_string(),
            year: 2009,
        };
        assert_eq!(conversion.evaluate(&fixture_rates()).unwrap(), 14.0);
    }

    #[test]
    fn test_unsupported_currency() {
        let conversion = Conversion::Convert {
            amount: 76.0,
            from: "PDB".to_string(),
            to: "USD".to_string(),
            year: 2006,
        };
        let err = run(&conversion, &fixture_rates()).unwrap_err();
        assert_eq!(err.to_string(), "Currency PDB is not supported.");
    }

    #[test]
    fn test_no_exchange_rate_available() {
        for year in [1980, 2080] {
            let conversion = Conversion::Convert {
                amount: 16.0,
                from: "EUR".to_string(),
                to: "USD".to_string(),
                year,
            };
            let err = conversion.evaluate(&fixture_rates()).unwrap_err();
            assert!(err.to_string().contains("Cannot convert"), "{err}");
        }
    }

    #[test]
    fn test_currency_deflation() {
        let conversion = Conversion::Deflate {
            amount: 15.0,
            currency: "USD".to_string(),
            base_year: 2009,
            target_year: 2009,
        };
        assert_eq!(conversion.evaluate(&fixture_rates()).unwrap(), 15.0);

        let missing = Conversion::Deflate {
            amount: 15.0,
            currency: "USD".to_string(),
            base_year: 2009,
            target_year: 2090,
        };
        assert!(missing.evaluate(&fixture_rates()).is_err());
    }

    #[test]
    fn test_convert_and_deflate_through_usd() {
        let conversion = Conversion::ThroughUsd {
            amount: 99.0,
            from: "EUR".to_string(),
            to: "EUR".to_string(),
            base_year: 2009,
            target_year: 2009,
        };
        let value = conversion.evaluate(&fixture_rates()).unwrap();
        assert_relative_eq!(value, 99.0, max_relative = 1e-9);
    }
}
