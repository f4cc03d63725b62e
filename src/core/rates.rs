//! Year by country tables of published rates

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::RangeInclusive;

/// An immutable-after-load table of `(year, country) -> rate`.
///
/// A cell holding NaN is treated exactly like an absent cell: no value was
/// published for that year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    series: HashMap<String, BTreeMap<i32, f32>>,
    codes: HashMap<String, String>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: i32, country: &str, rate: f32) {
        self.series
            .entry(country.to_string())
            .or_default()
            .insert(year, rate);
    }

    /// Records the ISO 3166 alpha-3 code published alongside `country`.
    pub fn set_code(&mut self, country: &str, code: &str) {
        if !code.is_empty() {
            self.codes.insert(country.to_string(), code.to_string());
        }
    }

    pub fn code_of(&self, country: &str) -> Option<&str> {
        self.codes.get(country).map(String::as_str)
    }

    /// Returns the published rate, or `None` when the cell is absent or NaN.
    pub fn lookup(&self, year: i32, country: &str) -> Option<f32> {
        self.series
            .get(country)
            .and_then(|years| years.get(&year))
            .copied()
            .filter(|rate| !rate.is_nan())
    }

    /// Country names in alphabetical order.
    pub fn countries(&self) -> Vec<&str> {
        let mut countries: Vec<&str> = self.series.keys().map(String::as_str).collect();
        countries.sort_unstable();
        countries
    }

    /// All years with at least one published value.
    pub fn years(&self) -> BTreeSet<i32> {
        self.series
            .values()
            .flat_map(|years| {
                years
                    .iter()
                    .filter(|(_, rate)| !rate.is_nan())
                    .map(|(year, _)| *year)
            })
            .collect()
    }

    /// First and last year with a published value for `country`.
    pub fn coverage(&self, country: &str) -> Option<RangeInclusive<i32>> {
        let mut published = self
            .series
            .get(country)?
            .iter()
            .filter(|(_, rate)| !rate.is_nan())
            .map(|(year, _)| *year);
        let first = published.next()?;
        let last = published.last().unwrap_or(first);
        Some(first..=last)
    }

    /// Number of published cells.
    pub fn len(&self) -> usize {
        self.series
            .values()
            .map(|years| years.values().filter(|rate| !rate.is_nan()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> FromIterator<(i32, &'a str, f32)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (i32, &'a str, f32)>>(iter: I) -> Self {
        let mut table = RateTable::new();
        for (year, country, rate) in iter {
            table.insert(year, country, rate);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RateTable {
        RateTable::from_iter([
            (2008, "Euro area", 0.68),
            (2009, "Euro area", 0.72),
            (2010, "Euro area", f32::NAN),
            (2011, "Euro area", 0.72),
            (2009, "United States", 1.0),
        ])
    }

    #[test]
    fn test_lookup_published_cell() {
        let table = sample();
        assert_eq!(table.lookup(2009, "Euro area"), Some(0.72));
        assert_eq!(table.lookup(2009, "United States"), Some(1.0));
    }

    #[test]
    fn test_absent_and_nan_cells_are_indistinguishable() {
        let table = sample();
        assert_eq!(table.lookup(2010, "Euro area"), None);
        assert_eq!(table.lookup(1900, "Euro area"), None);
        assert_eq!(table.lookup(2009, "Atlantis"), None);
    }

    #[test]
    fn test_coverage_ignores_nan() {
        let mut table = sample();
        assert_eq!(table.coverage("Euro area"), Some(2008..=2011));
        assert_eq!(table.coverage("United States"), Some(2009..=2009));
        assert_eq!(table.coverage("Atlantis"), None);

        table.insert(2012, "Japan", f32::NAN);
        assert_eq!(table.coverage("Japan"), None);
    }

    #[test]
    fn test_years_and_len() {
        let table = sample();
        assert_eq!(
            table.years().into_iter().collect::<Vec<_>>(),
            vec![2008, 2009, 2011]
        );
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
        assert!(RateTable::new().is_empty());
        assert_eq!(table.countries(), vec!["Euro area", "United States"]);
    }

    #[test]
    fn test_country_codes() {
        let mut table = sample();
        table.set_code("Euro area", "EMU");
        table.set_code("United States", "");
        assert_eq!(table.code_of("Euro area"), Some("EMU"));
        assert_eq!(table.code_of("United States"), None);
    }

    #[test]
    fn test_insert_replaces_cell() {
        let mut table = sample();
        table.insert(2009, "Euro area", 0.8);
        assert_eq!(table.lookup(2009, "Euro area"), Some(0.8));
    }
}
