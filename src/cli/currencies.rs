use super::ui;
use crate::core::currency::SUPPORTED_CURRENCIES;
use crate::core::{RateTable, Rates};
use comfy_table::{Cell, CellAlignment};

/// Renders the supported currencies with the years each dataset covers.
pub fn display_as_table(rates: Option<&Rates>) -> String {
    let mut table = ui::new_styled_table(&[
        "Code",
        "ISO 4217",
        "Country",
        "Exchange rates",
        "GDP deflator",
    ]);

    let coverage = |table: Option<&RateTable>, country: &str| {
        ui::coverage_cell(table.and_then(|t| t.coverage(country)))
    };

    for currency in SUPPORTED_CURRENCIES {
        table.add_row(vec![
            Cell::new(currency.alpha_3.to_uppercase()),
            Cell::new(format!("{:03}", currency.iso_4217)).set_alignment(CellAlignment::Right),
            Cell::new(currency.country),
            coverage(rates.map(Rates::exchange_rates), currency.country),
            coverage(rates.map(Rates::deflator), currency.country),
        ]);
    }

    table.to_string()
}

pub fn run(rates: Option<&Rates>) {
    println!(
        "\n{}",
        ui::style_text("Supported currencies", ui::StyleType::Title)
    );
    println!("{}", display_as_table(rates));
    if rates.is_none() {
        println!(
            "{}",
            ui::style_text(
                "No rate data loaded, run `currency fetch` to download it.",
                ui::StyleType::Subtle
            )
        );
    }
}
