//! Filter selections: dashboard defaults and JSON selection files.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::analyzers::filter::{FilterSpec, ResultLimit};

pub const DEFAULT_DATASET_PATH: &str = "zomato.csv";

/// Countries preselected on the overview page.
pub const OVERVIEW_COUNTRIES: &[&str] = &["Brazil", "England", "Turkey"];

/// Countries preselected on the country, city and cuisine pages.
pub const DEFAULT_COUNTRIES: &[&str] = &[
    "Brazil",
    "England",
    "India",
    "Turkey",
    "United States of America",
];

pub const DEFAULT_CUISINES: &[&str] = &["Brazilian", "BBQ", "Italian", "Japanese"];

/// Selections read from a JSON file. Missing keys fall back to page defaults.
///
/// ```json
/// {
///   "countries": ["Brazil", "India"],
///   "cuisines": ["Italian"],
///   "result_limit": 15
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionFile {
    pub countries: Option<Vec<String>>,
    pub cuisines: Option<Vec<String>>,
    pub result_limit: Option<ResultLimit>,
}

impl SelectionFile {
    /// Loads the selections from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read selection file '{}'", path.display()))?;
        let selection = serde_json::from_str(&content)
            .with_context(|| format!("invalid selection file '{}'", path.display()))?;
        Ok(selection)
    }
}

/// Resolved selections for one page render.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub countries: Vec<String>,
    pub cuisines: Option<Vec<String>>,
    pub result_limit: ResultLimit,
}

impl Selection {
    pub fn with_defaults(countries: &[&str]) -> Self {
        Selection {
            countries: countries.iter().map(|c| c.to_string()).collect(),
            cuisines: None,
            result_limit: ResultLimit::default(),
        }
    }

    /// Starts from `DEFAULT_CUISINES` as the cuisine page does.
    pub fn with_default_cuisines(mut self) -> Self {
        self.cuisines = Some(DEFAULT_CUISINES.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Replaces every selection the file sets.
    pub fn merge_file(mut self, file: SelectionFile) -> Self {
        if let Some(countries) = file.countries {
            self.countries = countries;
        }
        if let Some(cuisines) = file.cuisines {
            self.cuisines = Some(cuisines);
        }
        if let Some(limit) = file.result_limit {
            self.result_limit = limit;
        }
        self
    }

    pub fn filter(&self) -> FilterSpec {
        let spec = FilterSpec::for_countries(self.countries.iter().cloned());
        match &self.cuisines {
            Some(cuisines) => spec.with_cuisines(cuisines.iter().cloned()),
            None => spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_defaults_match_known_countries() {
        let known = crate::normalize::tables::country_names();
        for country in OVERVIEW_COUNTRIES.iter().chain(DEFAULT_COUNTRIES) {
            assert!(known.contains(country), "{country} is not a known country");
        }
    }

    #[test]
    fn test_selection_defaults() {
        let selection = Selection::with_defaults(DEFAULT_COUNTRIES);
        assert_eq!(selection.countries.len(), 5);
        assert!(selection.cuisines.is_none());
        assert_eq!(selection.result_limit.get(), 10);

        let filter = selection.with_default_cuisines().filter();
        assert!(filter.countries.contains("India"));
        assert_eq!(filter.cuisines.unwrap().len(), 4);
    }

    #[test]
    fn test_load_and_merge_selection_file() {
        let path = temp_path("restaurant_review_test_selection.json");
        fs::write(&path, r#"{"countries": ["Qatar"], "result_limit": 15}"#).unwrap();

        let file = SelectionFile::load(&path).unwrap();
        let selection = Selection::with_defaults(DEFAULT_COUNTRIES)
            .with_default_cuisines()
            .merge_file(file);

        assert_eq!(selection.countries, vec!["Qatar"]);
        assert_eq!(selection.cuisines.as_ref().map(Vec::len), Some(4));
        assert_eq!(selection.result_limit.get(), 15);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_selection_file_rejects_bad_limit() {
        let path = temp_path("restaurant_review_test_bad_limit.json");
        fs::write(&path, r#"{"result_limit": 40}"#).unwrap();

        assert!(SelectionFile::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_selection_file_rejects_unknown_keys() {
        let path = temp_path("restaurant_review_test_unknown_key.json");
        fs::write(&path, r#"{"country": ["Qatar"]}"#).unwrap();

        assert!(SelectionFile::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }
}
