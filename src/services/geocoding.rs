use crate::{
    error::{AppError, AppResult},
    models::Coordinate,
    services::providers::PlacesProvider,
};

/// Shortest city text accepted before any provider call is made
pub const MIN_CITY_CHARS: usize = 3;

/// Trims city text and enforces the minimum length
pub fn validate_city(text: &str) -> AppResult<&str> {
    let city = text.trim();

    if city.is_empty() {
        return Err(AppError::InvalidInput("City cannot be empty".to_string()));
    }

    if city.chars().count() < MIN_CITY_CHARS {
        return Err(AppError::InvalidInput(format!(
            "City must be at least {} characters",
            MIN_CITY_CHARS
        )));
    }

    Ok(city)
}

/// Resolves a city name to a coordinate.
///
/// `AppError::NotFound` means the provider had no match; the caller must not advance.
pub async fn resolve(provider: &dyn PlacesProvider, city: &str) -> AppResult<Coordinate> {
    let city = city.trim();
    if city.is_empty() {
        return Err(AppError::InvalidInput("City cannot be empty".to_string()));
    }

    let coordinate = provider.geocode(city).await?;

    tracing::info!(
        city = %city,
        latitude = coordinate.latitude,
        longitude = coordinate.longitude,
        provider = provider.name(),
        "City geocoded"
    );

    Ok(coordinate)
}
