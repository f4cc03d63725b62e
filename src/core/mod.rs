//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod indicator;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::Rates;
pub use currency::Currency;
pub use error::{ConversionError, Operation};
pub use indicator::{Indicator, IndicatorSource};
pub use rates::RateTable;
