//! Record normalization.
//!
//! Turns parsed CSV rows into analysis-ready records: exact duplicates are
//! dropped, known bad values are repaired, and the country name, price tier,
//! USD price, primary cuisine and rating color name are derived from the
//! shared lookup tables.

mod error;
pub mod repairs;
pub mod tables;

pub use error::NormalizeError;

use crate::parser::RawRecord;
use repairs::{KNOWN_REPAIRS, apply_repairs};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, info, warn};

/// Coarse cost category derived from the numeric price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Cheap,
    Normal,
    Expensive,
    Gourmet,
}

impl PriceTier {
    pub fn from_price_range(price_range: u8) -> Self {
        match price_range {
            1 => PriceTier::Cheap,
            2 => PriceTier::Normal,
            3 => PriceTier::Expensive,
            _ => PriceTier::Gourmet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Cheap => "cheap",
            PriceTier::Normal => "normal",
            PriceTier::Expensive => "expensive",
            PriceTier::Gourmet => "gourmet",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deduplicated, repaired restaurant row with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    raw: RawRecord,
    pub country_name: &'static str,
    pub price_tier: PriceTier,
    pub price_usd: f64,
    pub cuisine_primary: String,
    pub rating_color_name: &'static str,
}

impl NormalizedRecord {
    /// The source row after known repairs were applied.
    pub fn raw(&self) -> &RawRecord {
        &self.raw
    }

    pub fn restaurant_id(&self) -> i64 {
        self.raw.restaurant_id
    }

    pub fn restaurant_name(&self) -> &str {
        &self.raw.restaurant_name
    }

    pub fn city(&self) -> &str {
        &self.raw.city
    }

    pub fn rating(&self) -> f64 {
        self.raw.aggregate_rating
    }

    pub fn votes(&self) -> u64 {
        self.raw.votes
    }
}

/// First comma-separated entry of a cuisine list, kept verbatim.
pub fn primary_cuisine(cuisines: &str) -> &str {
    cuisines.split(',').next().unwrap_or_default()
}

/// USD value of `cost` in `currency`; unknown currencies pass through unchanged.
pub fn convert_to_usd(currency: &str, cost: f64) -> f64 {
    cost * tables::usd_multiplier(currency).unwrap_or(1.0)
}

/// Drops rows that exactly repeat an earlier row, keeping first occurrences in order.
pub fn deduplicate(raw_records: Vec<RawRecord>) -> Vec<RawRecord> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(raw_records.len());
        raw_records.iter().map(|r| seen.insert(r.identity())).collect()
    };

    raw_records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}

/// Repair name to the number of records it touched.
type RepairHits = BTreeMap<&'static str, usize>;

fn normalize_record(
    mut raw: RawRecord,
    repair_hits: &mut RepairHits,
) -> Result<NormalizedRecord, NormalizeError> {
    let country_name =
        tables::country_name(raw.country_code).ok_or(NormalizeError::UnknownCountryCode {
            code: raw.country_code,
            restaurant_id: raw.restaurant_id,
        })?;

    for name in apply_repairs(&mut raw, KNOWN_REPAIRS) {
        *repair_hits.entry(name).or_default() += 1;
    }

    let rating_color_name = tables::rating_color_name(&raw.rating_color).ok_or_else(|| {
        NormalizeError::UnknownColorCode {
            code: raw.rating_color.clone(),
            restaurant_id: raw.restaurant_id,
        }
    })?;

    Ok(NormalizedRecord {
        country_name,
        price_tier: PriceTier::from_price_range(raw.price_range),
        price_usd: convert_to_usd(&raw.currency, raw.average_cost_for_two),
        cuisine_primary: primary_cuisine(&raw.cuisines).to_string(),
        rating_color_name,
        raw,
    })
}

/// Runs the full cleaning pipeline over a freshly loaded dataset.
///
/// # Errors
///
/// Fails on the first row whose country code or rating color is missing from
/// the lookup tables; no partially normalized output is returned.
#[tracing::instrument(skip(raw_records), fields(rows = raw_records.len()))]
pub fn normalize(raw_records: Vec<RawRecord>) -> Result<Vec<NormalizedRecord>, NormalizeError> {
    let input_rows = raw_records.len();
    let unique = deduplicate(raw_records);
    debug!(
        input_rows,
        unique_rows = unique.len(),
        "Removed duplicate rows"
    );

    let mut unknown_currencies: BTreeMap<String, usize> = BTreeMap::new();
    let mut repair_hits = RepairHits::new();
    let mut records = Vec::with_capacity(unique.len());

    for raw in unique {
        if tables::usd_multiplier(&raw.currency).is_none() {
            *unknown_currencies.entry(raw.currency.clone()).or_default() += 1;
        }
        records.push(normalize_record(raw, &mut repair_hits)?);
    }

    for (repair, count) in &repair_hits {
        debug!(repair, records = count, "Applied known repair");
    }

    for (currency, rows) in &unknown_currencies {
        warn!(currency = %currency, rows, "Unknown currency, price kept unconverted");
    }

    info!(
        input_rows,
        normalized_rows = records.len(),
        "Dataset normalized"
    );
    Ok(records)
}

/// The normalized dataset for one session. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<NormalizedRecord>,
}

impl Dataset {
    pub fn from_raw(raw_records: Vec<RawRecord>) -> Result<Self, NormalizeError> {
        Ok(Self {
            records: normalize(raw_records)?,
        })
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    /// A selection holding every record, in dataset order.
    pub fn all(&self) -> Vec<&NormalizedRecord> {
        self.records.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct country names present in the dataset.
    pub fn countries(&self) -> BTreeSet<&'static str> {
        self.records.iter().map(|r| r.country_name).collect()
    }
}
