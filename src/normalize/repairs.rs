//! Hardcoded corrections for individually identified bad rows.
//!
//! Each repair matches on raw field values only, so repairs never depend on
//! one another or on derived fields.

use crate::normalize::tables::country_name;
use crate::parser::RawRecord;

/// An exact-match predicate paired with the overwrite it triggers.
pub struct Repair {
    pub name: &'static str,
    pub matches: fn(&RawRecord) -> bool,
    pub apply: fn(&mut RawRecord),
}

/// Sentinel cost-for-two found on one Australian restaurant.
pub const AUSTRALIAN_COST_SENTINEL: f64 = 25000017.0;
pub const AUSTRALIAN_COST_CORRECTED: f64 = 250.0;

/// Longitude of the Kochi KFC that was recorded as zero.
pub const KOCHI_KFC_LONGITUDE: f64 = 76.349474;

pub static KNOWN_REPAIRS: &[Repair] = &[
    Repair {
        name: "australian_cost_outlier",
        matches: |r| {
            country_name(r.country_code) == Some("Australia")
                && r.average_cost_for_two == AUSTRALIAN_COST_SENTINEL
        },
        apply: |r| r.average_cost_for_two = AUSTRALIAN_COST_CORRECTED,
    },
    Repair {
        name: "kochi_kfc_longitude",
        matches: |r| r.city == "Kochi" && r.restaurant_name == "KFC" && r.longitude == 0.0,
        apply: |r| r.longitude = KOCHI_KFC_LONGITUDE,
    },
];

/// Applies every repair in `repairs` whose predicate matches `record`.
///
/// Returns the names of the repairs that fired.
pub fn apply_repairs(record: &mut RawRecord, repairs: &[Repair]) -> Vec<&'static str> {
    let mut fired = Vec::new();
    for repair in repairs {
        if (repair.matches)(record) {
            (repair.apply)(record);
            fired.push(repair.name);
        }
    }
    fired
}
