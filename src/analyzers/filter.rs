//! Selection of records by country, cuisine and rating.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::normalize::NormalizedRecord;

/// Restaurants rated at or above this count as highly rated.
pub const HIGH_RATING_THRESHOLD: f64 = 4.0;
/// Restaurants rated strictly below this count as poorly rated.
pub const LOW_RATING_THRESHOLD: f64 = 2.5;

pub const MIN_RESULT_LIMIT: usize = 3;
pub const MAX_RESULT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("result limit {0} is outside 3..=20")]
    LimitOutOfRange(usize),
}

/// Size of the restaurant detail table, always within
/// [`MIN_RESULT_LIMIT`]..=[`MAX_RESULT_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultLimit(usize);

impl ResultLimit {
    pub fn new(n: usize) -> Result<Self, QueryError> {
        if (MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(QueryError::LimitOutOfRange(n))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self(10)
    }
}

impl<'de> Deserialize<'de> for ResultLimit {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = usize::deserialize(deserializer)?;
        Self::new(n).map_err(serde::de::Error::custom)
    }
}

/// Numeric rating predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingBound {
    AtLeast(f64),
    Below(f64),
}

impl RatingBound {
    pub fn high() -> Self {
        RatingBound::AtLeast(HIGH_RATING_THRESHOLD)
    }

    pub fn low() -> Self {
        RatingBound::Below(LOW_RATING_THRESHOLD)
    }

    pub fn accepts(&self, rating: f64) -> bool {
        match *self {
            RatingBound::AtLeast(t) => rating >= t,
            RatingBound::Below(t) => rating < t,
        }
    }
}

/// The filter selections behind one page render.
///
/// An empty country set selects nothing. `cuisines: None` disables cuisine
/// filtering, while `Some` of an empty set selects nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub countries: BTreeSet<String>,
    pub cuisines: Option<BTreeSet<String>>,
    pub rating: Option<RatingBound>,
}

impl FilterSpec {
    pub fn for_countries<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterSpec {
            countries: countries.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_cuisines<I, S>(mut self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisines = Some(cuisines.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_rating(mut self, bound: RatingBound) -> Self {
        self.rating = Some(bound);
        self
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        if !self.countries.contains(record.country_name) {
            return false;
        }
        if let Some(cuisines) = &self.cuisines {
            if !cuisines.contains(&record.cuisine_primary) {
                return false;
            }
        }
        self.rating.is_none_or(|bound| bound.accepts(record.rating()))
    }

    pub fn apply<'a>(&self, records: &[&'a NormalizedRecord]) -> Vec<&'a NormalizedRecord> {
        filter_by(records, |r| self.matches(r))
    }
}

/// Keeps the records accepted by `predicate`, preserving order.
pub fn filter_by<'a, P>(records: &[&'a NormalizedRecord], predicate: P) -> Vec<&'a NormalizedRecord>
where
    P: Fn(&NormalizedRecord) -> bool,
{
    records.iter().copied().filter(|r| predicate(*r)).collect()
}
