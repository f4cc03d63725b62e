//! Failures of the conversion engine

use std::fmt::Display;
use thiserror::Error;

/// What the caller attempted when data turned out to be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Convert,
    Deflate,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Operation::Convert => "convert",
                Operation::Deflate => "deflate",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Currency {} is not supported.", .0.to_uppercase())]
    UnsupportedCurrency(String),

    #[error(
        "Data of year {year} for country {country} not available. Cannot {operation} {amount} {}.",
        .currency.to_uppercase()
    )]
    DataUnavailable {
        year: i32,
        country: String,
        amount: f64,
        currency: String,
        operation: Operation,
    },
}
