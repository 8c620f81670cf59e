//! Row and view types produced by the aggregation engine.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::normalize::{NormalizedRecord, PriceTier};

/// Number of records (or distinct values) in one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: usize,
}

/// Arithmetic mean of a numeric field within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: f64,
}

/// Grouping key for per-city breakdowns. Orders by country, then city.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CityKey {
    pub country: String,
    pub city: String,
}

impl CityKey {
    pub fn of(record: &NormalizedRecord) -> Self {
        CityKey {
            country: record.country_name.to_string(),
            city: record.city().to_string(),
        }
    }
}

/// One line of the restaurant detail table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantRow {
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub country: String,
    pub city: String,
    pub cuisine: String,
    pub price_tier: PriceTier,
    pub price_usd: f64,
    pub rating: f64,
    pub votes: u64,
}

impl From<&NormalizedRecord> for RestaurantRow {
    fn from(record: &NormalizedRecord) -> Self {
        RestaurantRow {
            restaurant_id: record.restaurant_id(),
            restaurant_name: record.restaurant_name().to_string(),
            country: record.country_name.to_string(),
            city: record.city().to_string(),
            cuisine: record.cuisine_primary.clone(),
            price_tier: record.price_tier,
            price_usd: record.price_usd,
            rating: record.rating(),
            votes: record.votes(),
        }
    }
}

/// A metric tile for one highly rated restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantTile {
    pub label: String,
    pub value: f64,
    pub help: String,
}

impl From<&NormalizedRecord> for RestaurantTile {
    fn from(record: &NormalizedRecord) -> Self {
        RestaurantTile {
            label: record.restaurant_name().to_string(),
            value: record.rating(),
            help: format!(
                "{} {} ({}) USD {} for two",
                record.cuisine_primary,
                record.city(),
                record.country_name,
                record.price_usd
            ),
        }
    }
}

/// Headline counters shown on the overview page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub restaurants: usize,
    pub countries: usize,
    pub cities: usize,
    pub votes: u64,
    pub cuisines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

/// One restaurant pin on the clustered map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub restaurant_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cuisine: String,
    pub city: String,
    pub country: String,
    pub average_cost_for_two: f64,
    pub currency: String,
    pub rating: f64,
    pub color: &'static str,
}

impl From<&NormalizedRecord> for MapMarker {
    fn from(record: &NormalizedRecord) -> Self {
        let raw = record.raw();
        MapMarker {
            restaurant_name: raw.restaurant_name.clone(),
            latitude: raw.latitude,
            longitude: raw.longitude,
            cuisine: record.cuisine_primary.clone(),
            city: raw.city.clone(),
            country: record.country_name.to_string(),
            average_cost_for_two: raw.average_cost_for_two,
            currency: raw.currency.clone(),
            rating: raw.aggregate_rating,
            color: record.rating_color_name,
        }
    }
}

/// Map data: markers plus the point the map opens on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Option<MapCenter>,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewView {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub map: MapView,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryView {
    pub generated_at: DateTime<Utc>,
    pub restaurants_by_country: Vec<GroupCount<String>>,
    pub cities_by_country: Vec<GroupCount<String>>,
    pub mean_votes_by_country: Vec<GroupMean<String>>,
    pub mean_price_usd_by_country: Vec<GroupMean<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityView {
    pub generated_at: DateTime<Utc>,
    pub restaurants_by_city: Vec<GroupCount<CityKey>>,
    pub high_rated_by_city: Vec<GroupCount<CityKey>>,
    pub low_rated_by_city: Vec<GroupCount<CityKey>>,
    pub cuisines_by_city: Vec<GroupCount<CityKey>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CuisineView {
    pub generated_at: DateTime<Utc>,
    pub best_restaurants: Vec<RestaurantTile>,
    pub restaurants: Vec<RestaurantRow>,
    pub best_cuisines: Vec<GroupMean<String>>,
    pub worst_cuisines: Vec<GroupMean<String>>,
}
