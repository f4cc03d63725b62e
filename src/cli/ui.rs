use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::ops::RangeInclusive;

pub enum StyleType {
    Title,
    Success,
    Subtle,
}

pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Success => style(text).green().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// A rounded table with one bold cyan header cell per column name.
pub fn new_styled_table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|name| {
            Cell::new(name)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
    table
}

/// Years a series covers as `first-last`, or a dimmed "N/A" without data.
pub fn coverage_cell(coverage: Option<RangeInclusive<i32>>) -> Cell {
    let cell = match coverage {
        Some(years) => Cell::new(format!("{}-{}", years.start(), years.end())),
        None => Cell::new("N/A").fg(Color::DarkGrey),
    };
    cell.set_alignment(CellAlignment::Right)
}

/// Spinner and bar counting finished downloads.
pub fn new_download_bar(downloads: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(downloads as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style.progress_chars("#>-"));
    pb.set_message(message);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_cell() {
        assert_eq!(coverage_cell(Some(1999..=2016)).content(), "1999-2016");
        assert_eq!(coverage_cell(None).content(), "N/A");
    }
}
