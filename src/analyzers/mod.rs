//! Filtering and aggregation over the normalized dataset.
//!
//! This module selects records by country, cuisine and rating, groups them
//! into counts, means and rankings, and assembles the per-page views that
//! chart, metric and table renderers consume.

pub mod aggregate;
pub mod filter;
pub mod types;
pub mod utility;
pub mod views;
