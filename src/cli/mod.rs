pub mod convert;
pub mod currencies;
pub mod fetch;
pub mod setup;
pub mod ui;
