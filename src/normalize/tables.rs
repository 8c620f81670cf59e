//! Closed lookup tables shared by every view.

/// Country codes present in the dataset and their display names.
///
/// Names are kept exactly as the dashboard has always shown them, since
/// selections are made by name.
pub static COUNTRIES: &[(u32, &str)] = &[
    (1, "India"),
    (14, "Australia"),
    (30, "Brazil"),
    (37, "Canada"),
    (94, "Indonesia"),
    (148, "New Zeland"),
    (162, "Philippines"),
    (166, "Qatar"),
    (184, "Singapure"),
    (189, "South Africa"),
    (191, "Sri Lanka"),
    (208, "Turkey"),
    (214, "United Arab Emirates"),
    (215, "England"),
    (216, "United States of America"),
];

/// Rating color hex codes mapped to marker color names.
pub static RATING_COLORS: &[(&str, &str)] = &[
    ("3F7E00", "darkgreen"),
    ("5BA829", "green"),
    ("9ACD32", "lightgreen"),
    ("CDD614", "orange"),
    ("FFBA00", "red"),
    ("CBCBC8", "darkred"),
    ("FF7800", "darkred"),
];

/// Currency label to USD multiplier.
pub static CURRENCY_RATES: &[(&str, f64)] = &[
    ("Botswana Pula(P)", 0.076),
    ("Brazilian Real(R$)", 0.19),
    ("Dollar($)", 1.0),
    ("Emirati Diram(AED)", 0.27),
    ("Indian Rupees(Rs.)", 0.012),
    ("Indonesian Rupiah(IDR)", 0.000066),
    ("NewZealand($)", 0.623515),
    ("Pounds(£)", 1.24),
    ("Qatari Rial(QR)", 0.27),
    ("Rand(R)", 0.056),
    ("Sri Lankan Rupee(LKR)", 0.0031),
    ("Turkish Lira(TL)", 0.0052),
];

pub fn country_name(code: u32) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn rating_color_name(code: &str) -> Option<&'static str> {
    RATING_COLORS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn usd_multiplier(currency: &str) -> Option<f64> {
    CURRENCY_RATES
        .iter()
        .find(|(c, _)| *c == currency)
        .map(|(_, rate)| *rate)
}

/// All country names in alphabetical order, as offered by the country filter.
pub fn country_names() -> Vec<&'static str> {
    let mut names: Vec<_> = COUNTRIES.iter().map(|(_, name)| *name).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_lookup() {
        assert_eq!(country_name(1), Some("India"));
        assert_eq!(country_name(30), Some("Brazil"));
        assert_eq!(country_name(216), Some("United States of America"));
        assert_eq!(country_name(2), None);
    }

    #[test]
    fn test_rating_color_lookup() {
        assert_eq!(rating_color_name("3F7E00"), Some("darkgreen"));
        assert_eq!(rating_color_name("CBCBC8"), Some("darkred"));
        assert_eq!(rating_color_name("FF7800"), Some("darkred"));
        assert_eq!(rating_color_name("3f7e00"), None);
    }

    #[test]
    fn test_usd_multiplier_lookup() {
        assert_eq!(usd_multiplier("Dollar($)"), Some(1.0));
        assert_eq!(usd_multiplier("Pounds(£)"), Some(1.24));
        assert_eq!(usd_multiplier("Euro(€)"), None);
    }

    #[test]
    fn test_tables_have_unique_keys() {
        let mut codes: Vec<_> = COUNTRIES.iter().map(|(c, _)| *c).collect();
        codes.dedup();
        assert_eq!(codes.len(), COUNTRIES.len());

        let mut currencies: Vec<_> = CURRENCY_RATES.iter().map(|(c, _)| *c).collect();
        currencies.sort_unstable();
        currencies.dedup();
        assert_eq!(currencies.len(), CURRENCY_RATES.len());
    }

    #[test]
    fn test_country_names_sorted() {
        let names = country_names();
        assert_eq!(names.len(), 15);
        assert_eq!(names.first(), Some(&"Australia"));
        assert_eq!(names.last(), Some(&"United States of America"));
    }
}
