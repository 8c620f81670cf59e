//! Page-level views assembled from the grouping primitives.
//!
//! Each view applies the caller's [`FilterSpec`] to the dataset and returns a
//! fresh, serializable value; the dataset itself is never modified.

use chrono::Utc;
use tracing::debug;

use crate::analyzers::aggregate::{
    count_by, count_distinct_by, distinct_count, distinct_values, head, lowest_count_by,
    lowest_mean_by, mean_by, sum_by, top_n,
};
use crate::analyzers::filter::{FilterSpec, RatingBound, ResultLimit};
use crate::analyzers::types::{
    CityKey, CityView, CountryView, CuisineView, MapCenter, MapMarker, MapView, OverviewView,
    RestaurantRow, RestaurantTile, Summary,
};
use crate::analyzers::utility::mean_opt;
use crate::normalize::{Dataset, NormalizedRecord};

/// Number of metric tiles in the best restaurants row.
pub const BEST_RESTAURANT_TILES: usize = 5;
/// Number of bars in every ranked chart.
pub const TOP_GROUPS: usize = 10;

fn select<'a>(dataset: &'a Dataset, filter: &FilterSpec) -> Vec<&'a NormalizedRecord> {
    let selection = filter.apply(&dataset.all());
    debug!(
        total = dataset.len(),
        selected = selection.len(),
        "Applied filter"
    );
    selection
}

pub fn summarize(records: &[&NormalizedRecord]) -> Summary {
    Summary {
        restaurants: distinct_count(records, |r| r.restaurant_id()),
        countries: distinct_count(records, |r| r.raw().country_code),
        cities: distinct_count(records, |r| r.city().to_string()),
        votes: sum_by(records, |r| r.votes()),
        cuisines: distinct_count(records, |r| r.cuisine_primary.clone()),
    }
}

pub fn map_view(records: &[&NormalizedRecord]) -> MapView {
    let latitudes: Vec<f64> = records.iter().map(|r| r.raw().latitude).collect();
    let longitudes: Vec<f64> = records.iter().map(|r| r.raw().longitude).collect();

    let center = mean_opt(&latitudes)
        .zip(mean_opt(&longitudes))
        .map(|(latitude, longitude)| MapCenter {
            latitude,
            longitude,
        });

    MapView {
        center,
        markers: records.iter().map(|&r| MapMarker::from(r)).collect(),
    }
}

/// Headline counters and the restaurant map.
pub fn overview(dataset: &Dataset, filter: &FilterSpec) -> OverviewView {
    let records = select(dataset, filter);

    OverviewView {
        generated_at: Utc::now(),
        summary: summarize(&records),
        map: map_view(&records),
    }
}

/// Per-country restaurant counts, city counts, mean votes and mean USD price.
pub fn country_view(dataset: &Dataset, filter: &FilterSpec) -> CountryView {
    let records = select(dataset, filter);
    let country = |r: &NormalizedRecord| r.country_name.to_string();

    CountryView {
        generated_at: Utc::now(),
        restaurants_by_country: count_by(&records, country),
        cities_by_country: count_distinct_by(&records, country, |r| r.city().to_string()),
        mean_votes_by_country: mean_by(&records, country, |r| r.votes() as f64),
        mean_price_usd_by_country: mean_by(&records, country, |r| r.price_usd),
    }
}

/// Top cities by restaurant count, by rating band and by cuisine variety.
///
/// The poorly rated breakdown lists the cities with the fewest poorly rated
/// restaurants first.
pub fn city_view(dataset: &Dataset, filter: &FilterSpec) -> CityView {
    let records = select(dataset, filter);
    let high = select(dataset, &filter.clone().with_rating(RatingBound::high()));
    let low = select(dataset, &filter.clone().with_rating(RatingBound::low()));

    CityView {
        generated_at: Utc::now(),
        restaurants_by_city: head(count_by(&records, CityKey::of), TOP_GROUPS),
        high_rated_by_city: head(count_by(&high, CityKey::of), TOP_GROUPS),
        low_rated_by_city: head(lowest_count_by(&low, CityKey::of), TOP_GROUPS),
        cuisines_by_city: head(
            count_distinct_by(&records, CityKey::of, |r| r.cuisine_primary.clone()),
            TOP_GROUPS,
        ),
    }
}

/// Best restaurants, the restaurant table and the best and worst cuisines.
pub fn cuisine_view(dataset: &Dataset, filter: &FilterSpec, limit: ResultLimit) -> CuisineView {
    let records = select(dataset, filter);
    let rating = |r: &NormalizedRecord| r.rating();
    let cuisine = |r: &NormalizedRecord| r.cuisine_primary.clone();

    CuisineView {
        generated_at: Utc::now(),
        best_restaurants: top_n(&records, BEST_RESTAURANT_TILES, rating)
            .into_iter()
            .map(RestaurantTile::from)
            .collect(),
        restaurants: top_n(&records, limit.get(), rating)
            .into_iter()
            .map(RestaurantRow::from)
            .collect(),
        best_cuisines: head(mean_by(&records, cuisine, rating), TOP_GROUPS),
        worst_cuisines: head(lowest_mean_by(&records, cuisine, rating), TOP_GROUPS),
    }
}

/// Primary cuisines offered by the cuisine filter, in order of first appearance.
///
/// Only the country part of `filter` applies, so every cuisine in the selected
/// countries stays selectable.
pub fn available_cuisines(dataset: &Dataset, filter: &FilterSpec) -> Vec<String> {
    let countries_only = FilterSpec {
        countries: filter.countries.clone(),
        ..Default::default()
    };
    let records = select(dataset, &countries_only);
    distinct_values(&records, |r| r.cuisine_primary.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RawRecord;

    fn raw(id: i64, country_code: u32, city: &str, cuisines: &str, rating: f64) -> RawRecord {
        RawRecord {
            restaurant_id: id,
            restaurant_name: format!("Restaurant {id}"),
            country_code,
            city: city.to_string(),
            cuisines: cuisines.to_string(),
            latitude: id as f64,
            longitude: -(id as f64),
            average_cost_for_two: 100.0,
            currency: "Dollar($)".to_string(),
            price_range: 2,
            aggregate_rating: rating,
            rating_color: "5BA829".to_string(),
            votes: id as u64 * 10,
            ..Default::default()
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_raw(vec![
            raw(1, 1, "Goa", "Seafood", 4.2),
            raw(2, 30, "Rio de Janeiro", "Brazilian, BBQ", 4.9),
            raw(3, 30, "Rio de Janeiro", "Italian", 2.1),
            raw(4, 30, "Sao Paulo", "Brazilian", 3.5),
            raw(5, 30, "Sao Paulo", "BBQ", 4.0),
            raw(6, 216, "Boston", "Italian", 1.8),
        ])
        .unwrap()
    }

    #[test]
    fn test_brazil_only_country_count() {
        let dataset = Dataset::from_raw(vec![
            raw(1, 1, "Goa", "Seafood", 4.0),
            raw(2, 30, "Rio de Janeiro", "Brazilian", 4.0),
        ])
        .unwrap();
        let view = country_view(&dataset, &FilterSpec::for_countries(["Brazil"]));

        assert_eq!(view.restaurants_by_country.len(), 1);
        assert_eq!(view.restaurants_by_country[0].key, "Brazil");
        assert_eq!(view.restaurants_by_country[0].count, 1);
    }

    #[test]
    fn test_overview_summary_and_map() {
        let view = overview(&dataset(), &FilterSpec::for_countries(["Brazil"]));

        assert_eq!(
            view.summary,
            Summary {
                restaurants: 4,
                countries: 1,
                cities: 2,
                votes: 140,
                cuisines: 3,
            }
        );
        assert_eq!(view.map.markers.len(), 4);
        let center = view.map.center.unwrap();
        assert_eq!(center.latitude, 3.5);
        assert_eq!(center.longitude, -3.5);
        assert_eq!(view.map.markers[0].color, "green");
    }

    #[test]
    fn test_overview_empty_selection() {
        let view = overview(&dataset(), &FilterSpec::default());

        assert_eq!(view.summary, Summary::default());
        assert!(view.map.center.is_none());
        assert!(view.map.markers.is_empty());
    }

    #[test]
    fn test_country_view() {
        let view = country_view(
            &dataset(),
            &FilterSpec::for_countries(["Brazil", "India", "United States of America"]),
        );

        let counts: Vec<_> = view
            .restaurants_by_country
            .iter()
            .map(|g| (g.key.as_str(), g.count))
            .collect();
        assert_eq!(
            counts,
            vec![("Brazil", 4), ("India", 1), ("United States of America", 1)]
        );

        let cities: Vec<_> = view.cities_by_country.iter().map(|g| g.count).collect();
        assert_eq!(cities, vec![2, 1, 1]);

        assert_eq!(view.mean_votes_by_country[0].key, "United States of America");
        assert_eq!(view.mean_votes_by_country[0].mean, 60.0);

        // every row costs the same, so all means tie and sort by name
        let price_keys: Vec<_> = view
            .mean_price_usd_by_country
            .iter()
            .map(|g| g.key.as_str())
            .collect();
        assert_eq!(price_keys, vec!["Brazil", "India", "United States of America"]);
    }

    #[test]
    fn test_city_view_rating_bands() {
        let view = city_view(&dataset(), &FilterSpec::for_countries(["Brazil", "India"]));

        let top = &view.restaurants_by_city[0];
        assert_eq!(top.key.city, "Rio de Janeiro");
        assert_eq!(top.count, 2);

        let high: Vec<_> = view
            .high_rated_by_city
            .iter()
            .map(|g| (g.key.city.as_str(), g.count))
            .collect();
        assert_eq!(
            high,
            vec![("Rio de Janeiro", 1), ("Sao Paulo", 1), ("Goa", 1)]
        );

        let low: Vec<_> = view
            .low_rated_by_city
            .iter()
            .map(|g| (g.key.city.as_str(), g.count))
            .collect();
        assert_eq!(low, vec![("Rio de Janeiro", 1)]);

        let variety: Vec<_> = view
            .cuisines_by_city
            .iter()
            .map(|g| (g.key.city.as_str(), g.count))
            .collect();
        assert_eq!(
            variety,
            vec![("Rio de Janeiro", 2), ("Sao Paulo", 2), ("Goa", 1)]
        );
    }

    #[test]
    fn test_city_view_low_rated_fewest_first() {
        let dataset = Dataset::from_raw(vec![
            raw(1, 1, "Agra", "Mughlai", 1.0),
            raw(2, 1, "Agra", "Mughlai", 1.0),
            raw(3, 1, "Agra", "Mughlai", 1.0),
            raw(4, 1, "Bhopal", "Mughlai", 1.0),
            raw(5, 1, "Chennai", "Mughlai", 1.0),
            raw(6, 1, "Chennai", "Mughlai", 1.0),
            raw(7, 1, "Delhi", "Mughlai", 4.5),
        ])
        .unwrap();
        let view = city_view(&dataset, &FilterSpec::for_countries(["India"]));

        let low: Vec<_> = view
            .low_rated_by_city
            .iter()
            .map(|g| (g.key.city.as_str(), g.count))
            .collect();
        assert_eq!(low, vec![("Bhopal", 1), ("Chennai", 2), ("Agra", 3)]);

        let all: Vec<_> = view
            .restaurants_by_city
            .iter()
            .map(|g| g.key.city.as_str())
            .collect();
        assert_eq!(all, vec!["Agra", "Chennai", "Bhopal", "Delhi"]);
    }

    #[test]
    fn test_cuisine_view() {
        let filter = FilterSpec::for_countries(["Brazil", "United States of America"])
            .with_cuisines(["Brazilian", "BBQ", "Italian"]);
        let view = cuisine_view(&dataset(), &filter, ResultLimit::new(3).unwrap());

        assert_eq!(view.best_restaurants.len(), 5);
        assert_eq!(view.best_restaurants[0].label, "Restaurant 2");
        assert_eq!(view.best_restaurants[0].value, 4.9);
        assert!(view.best_restaurants[0].help.starts_with("Brazilian Rio de Janeiro (Brazil) USD"));

        let ids: Vec<_> = view.restaurants.iter().map(|r| r.restaurant_id).collect();
        assert_eq!(ids, vec![2, 5, 4]);

        let best: Vec<_> = view.best_cuisines.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(best, vec!["Brazilian", "BBQ", "Italian"]);
        let worst: Vec<_> = view.worst_cuisines.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(worst, vec!["Italian", "BBQ", "Brazilian"]);
    }

    #[test]
    fn test_cuisine_view_with_few_restaurants() {
        let filter = FilterSpec::for_countries(["India"]);
        let view = cuisine_view(&dataset(), &filter, ResultLimit::new(20).unwrap());

        assert_eq!(view.best_restaurants.len(), 1);
        assert_eq!(view.restaurants.len(), 1);
        assert_eq!(view.best_cuisines.len(), 1);
    }

    #[test]
    fn test_available_cuisines_ignore_cuisine_filter() {
        let filter = FilterSpec::for_countries(["Brazil"]).with_cuisines(["BBQ"]);
        assert_eq!(
            available_cuisines(&dataset(), &filter),
            vec!["Brazilian", "Italian", "BBQ"]
        );
    }

    #[test]
    fn test_views_do_not_touch_dataset() {
        let dataset = dataset();
        let before = dataset.records().to_vec();
        let filter = FilterSpec::for_countries(["Brazil"]);

        let _ = overview(&dataset, &filter);
        let _ = country_view(&dataset, &filter);
        let _ = city_view(&dataset, &filter);
        let _ = cuisine_view(&dataset, &filter, ResultLimit::default());

        assert_eq!(dataset.records(), before.as_slice());
    }
}
