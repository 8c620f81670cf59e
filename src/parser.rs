//! CSV loader for the restaurant listing dataset.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One restaurant row exactly as it appears in the source CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Restaurant ID")]
    pub restaurant_id: i64,
    #[serde(rename = "Restaurant Name")]
    pub restaurant_name: String,
    #[serde(rename = "Country Code")]
    pub country_code: u32,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "Locality", default)]
    pub locality: String,
    #[serde(rename = "Locality Verbose", default)]
    pub locality_verbose: String,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Cuisines", default)]
    pub cuisines: String,
    #[serde(rename = "Average Cost for two")]
    pub average_cost_for_two: f64,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Has Table booking", default)]
    pub has_table_booking: String,
    #[serde(rename = "Has Online delivery", default)]
    pub has_online_delivery: String,
    #[serde(rename = "Is delivering now", default)]
    pub is_delivering_now: String,
    #[serde(rename = "Switch to order menu", default)]
    pub switch_to_order_menu: String,
    #[serde(rename = "Price range")]
    pub price_range: u8,
    #[serde(rename = "Aggregate rating")]
    pub aggregate_rating: f64,
    #[serde(rename = "Rating color")]
    pub rating_color: String,
    #[serde(rename = "Rating text", default)]
    pub rating_text: String,
    #[serde(rename = "Votes")]
    pub votes: u64,
}

/// Full-field identity of a [`RawRecord`], usable as a hash key.
///
/// Floats compare by bit pattern so that two rows parsed from identical text
/// are always considered duplicates. Negative zero counts as zero.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct RecordIdentity<'a> {
    restaurant_id: i64,
    country_code: u32,
    price_range: u8,
    votes: u64,
    floats: [u64; 4],
    text: [&'a str; 13],
}

fn float_key(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

impl RawRecord {
    pub(crate) fn identity(&self) -> RecordIdentity<'_> {
        RecordIdentity {
            restaurant_id: self.restaurant_id,
            country_code: self.country_code,
            price_range: self.price_range,
            votes: self.votes,
            floats: [
                float_key(self.longitude),
                float_key(self.latitude),
                float_key(self.average_cost_for_two),
                float_key(self.aggregate_rating),
            ],
            text: [
                self.restaurant_name.as_str(),
                self.city.as_str(),
                self.address.as_str(),
                self.locality.as_str(),
                self.locality_verbose.as_str(),
                self.cuisines.as_str(),
                self.currency.as_str(),
                self.has_table_booking.as_str(),
                self.has_online_delivery.as_str(),
                self.is_delivering_now.as_str(),
                self.switch_to_order_menu.as_str(),
                self.rating_color.as_str(),
                self.rating_text.as_str(),
            ],
        }
    }
}

/// Parses a headered restaurant CSV from any reader.
///
/// # Errors
///
/// Returns an error if a row is missing a required column or a numeric
/// column does not parse.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: RawRecord = result?;
        rows.push(record);
    }

    debug!(rows = rows.len(), "Parsed restaurant rows");
    Ok(rows)
}

/// Loads every row of the dataset file at `path`.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open dataset '{}'", path.display()))?;
    parse_records(file).with_context(|| format!("failed to parse dataset '{}'", path.display()))
}
