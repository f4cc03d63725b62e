//! Registry of supported currencies

use super::error::ConversionError;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// Lowercase ISO 4217 alpha-3 code, e.g. `usd`.
    pub alpha_3: &'static str,
    pub iso_4217: u16,
    /// Country name as used by the World Bank datasets.
    pub country: &'static str,
    /// ISO 3166 alpha-3 code the World Bank files the country under. Names
    /// get revised between releases (`Czech Republic` became `Czechia`), the
    /// code does not.
    pub country_code: &'static str,
}

impl Currency {
    const fn new(
        alpha_3: &'static str,
        iso_4217: u16,
        country: &'static str,
        country_code: &'static str,
    ) -> Self {
        Currency {
            alpha_3,
            iso_4217,
            country,
            country_code,
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.alpha_3.to_uppercase())
    }
}

pub const USD: Currency = Currency::new("usd", 840, "United States", "USA");

pub static SUPPORTED_CURRENCIES: &[Currency] = &[
    Currency::new("bgn", 975, "Bulgaria", "BGR"),
    Currency::new("eur", 978, "Euro area", "EMU"),
    Currency::new("nad", 516, "Namibia", "NAM"),
    USD,
    Currency::new("dzd", 12, "Algeria", "DZA"),
    Currency::new("ars", 32, "Argentina", "ARG"),
    Currency::new("amd", 51, "Armenia", "ARM"),
    Currency::new("aud", 36, "Australia", "AUS"),
    Currency::new("azn", 944, "Azerbaijan", "AZE"),
    Currency::new("bam", 977, "Bosnia and Herzegovina", "BIH"),
    Currency::new("brl", 986, "Brazil", "BRA"),
    Currency::new("cad", 124, "Canada", "CAN"),
    Currency::new("cny", 156, "China", "CHN"),
    Currency::new("hrk", 191, "Croatia", "HRV"),
    Currency::new("czk", 203, "Czech Republic", "CZE"),
    Currency::new("dkk", 208, "Denmark", "DNK"),
    Currency::new("egp", 818, "Egypt, Arab Rep.", "EGY"),
    Currency::new("eek", 233, "Estonia", "EST"),
    Currency::new("ghs", 936, "Ghana", "GHA"),
    Currency::new("huf", 348, "Hungary", "HUN"),
    Currency::new("inr", 356, "India", "IND"),
    Currency::new("idr", 360, "Indonesia", "IDN"),
    Currency::new("irr", 364, "Iran, Islamic Rep.", "IRN"),
    Currency::new("ils", 376, "Israel", "ISR"),
    Currency::new("jpy", 392, "Japan", "JPN"),
    Currency::new("jod", 400, "Jordan", "JOR"),
    Currency::new("kzt", 398, "Kazakhstan", "KAZ"),
    Currency::new("krw", 410, "Korea, Rep.", "KOR"),
    Currency::new("chf", 756, "Switzerland", "CHE"),
    Currency::new("ltl", 440, "Lithuania", "LTU"),
    Currency::new("myr", 458, "Malaysia", "MYS"),
    Currency::new("mur", 480, "Mauritius", "MUS"),
    Currency::new("mdl", 498, "Moldova", "MDA"),
    Currency::new("mad", 504, "Morocco", "MAR"),
    Currency::new("mzn", 943, "Mozambique", "MOZ"),
    Currency::new("ngn", 566, "Nigeria", "NGA"),
    Currency::new("nok", 578, "Norway", "NOR"),
    Currency::new("pkr", 586, "Pakistan", "PAK"),
    Currency::new("php", 608, "Philippines", "PHL"),
    Currency::new("pln", 985, "Poland", "POL"),
    Currency::new("skk", 703, "Slovak Republic", "SVK"),
    Currency::new("sit", 705, "Slovenia", "SVN"),
    Currency::new("zar", 710, "South Africa", "ZAF"),
    Currency::new("esp", 724, "Spain", "ESP"),
    Currency::new("lkr", 144, "Sri Lanka", "LKA"),
    Currency::new("sek", 752, "Sweden", "SWE"),
    Currency::new("tzs", 834, "Tanzania", "TZA"),
    Currency::new("thb", 764, "Thailand", "THA"),
    Currency::new("tnd", 788, "Tunisia", "TUN"),
    Currency::new("gbp", 826, "United Kingdom", "GBR"),
    Currency::new("vuv", 548, "Vanuatu", "VUT"),
    Currency::new("vnd", 704, "Vietnam", "VNM"),
    Currency::new("dem", 276, "Germany", "DEU"),
    Currency::new("frf", 250, "France", "FRA"),
    Currency::new("sar", 682, "Saudi Arabia", "SAU"),
];

/// Finds a supported currency by its alpha-3 code, ignoring case.
pub fn find(code: &str) -> Option<&'static Currency> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|c| c.alpha_3.eq_ignore_ascii_case(code))
}

pub fn is_supported(code: &str) -> bool {
    find(code).is_some()
}

/// Resolves a currency code to the country whose series carries its rates.
pub fn country_of(code: &str) -> Result<&'static str, ConversionError> {
    find(code)
        .map(|c| c.country)
        .ok_or_else(|| ConversionError::UnsupportedCurrency(code.to_lowercase()))
}

/// Name under which rates for the country with ISO 3166 alpha-3 `code` are
/// looked up, if a supported currency is issued there.
pub fn country_by_code(code: &str) -> Option<&'static str> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|c| c.country_code.eq_ignore_ascii_case(code))
        .map(|c| c.country)
}

/// Settles the name a published series is stored under. Registry countries keep
/// their registry name whatever the source calls them today.
pub fn canonical_country<'a>(code: &str, name: &'a str) -> &'a str {
    country_by_code(code).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = SUPPORTED_CURRENCIES.iter().map(|c| c.alpha_3).collect();
        assert_eq!(codes.len(), SUPPORTED_CURRENCIES.len());
        assert_eq!(SUPPORTED_CURRENCIES.len(), 55);
    }

    #[test]
    fn test_codes_are_lowercase_alpha_3() {
        for currency in SUPPORTED_CURRENCIES {
            assert_eq!(currency.alpha_3.len(), 3, "{currency:?}");
            assert!(
                currency.alpha_3.chars().all(|c| c.is_ascii_lowercase()),
                "{currency:?}"
            );
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert!(is_supported("usd"));
        assert!(is_supported("USD"));
        assert!(is_supported("Eur"));
        assert!(!is_supported("pdb"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_country_of() {
        assert_eq!(country_of("EGP").unwrap(), "Egypt, Arab Rep.");
        assert_eq!(country_of("eur").unwrap(), "Euro area");
        assert_eq!(country_of("usd").unwrap(), USD.country);
    }

    #[test]
    fn test_country_of_unsupported() {
        let err = country_of("PDB").unwrap_err();
        assert_eq!(err, ConversionError::UnsupportedCurrency("pdb".to_string()));
        assert_eq!(err.to_string(), "Currency PDB is not supported.");
    }

    #[test]
    fn test_country_codes_are_unique() {
        let codes: HashSet<_> = SUPPORTED_CURRENCIES
            .iter()
            .map(|c| c.country_code)
            .collect();
        assert_eq!(codes.len(), SUPPORTED_CURRENCIES.len());
    }

    #[test]
    fn test_renamed_countries_resolve_by_code() {
        assert_eq!(canonical_country("CZE", "Czechia"), "Czech Republic");
        assert_eq!(canonical_country("VNM", "Viet Nam"), "Vietnam");
        assert_eq!(canonical_country("emu", "Euro area"), "Euro area");
        assert_eq!(canonical_country("WLD", "World"), "World");
        assert_eq!(canonical_country("", "Arab World"), "Arab World");
    }

    #[test]
    fn test_display_uses_uppercase_code() {
        assert_eq!(USD.to_string(), "USD");
        assert_eq!(find("thb").unwrap().iso_4217, 764);
    }
}
