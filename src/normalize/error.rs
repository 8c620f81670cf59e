use thiserror::Error;

/// Data-integrity failures that abort normalization of the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("restaurant {restaurant_id} has unknown country code {code}")]
    UnknownCountryCode { code: u32, restaurant_id: i64 },
    #[error("restaurant {restaurant_id} has unknown rating color '{code}'")]
    UnknownColorCode { code: String, restaurant_id: i64 },
}
