use serde::Deserialize;

use super::{Coordinate, RawCandidate};

// ============================================================================
// Google Maps web service types
// ============================================================================

/// Provider status strings shared by geocode, text search and details responses
pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiLatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<ApiLatLng> for Coordinate {
    fn from(location: ApiLatLng) -> Self {
        Coordinate::new(location.lat, location.lng)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGeometry {
    pub location: ApiLatLng,
}

/// Geocoding API response
#[derive(Debug, Deserialize)]
pub struct ApiGeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<ApiGeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiGeocodeResult {
    pub geometry: ApiGeometry,
    pub formatted_address: Option<String>,
}

/// Places text search response
#[derive(Debug, Deserialize)]
pub struct ApiTextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<ApiPlace>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlace {
    pub place_id: String,
    pub name: String,
    pub geometry: ApiGeometry,
    #[serde(default)]
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
}

impl From<ApiPlace> for RawCandidate {
    fn from(place: ApiPlace) -> Self {
        RawCandidate {
            id: place.place_id,
            name: place.name,
            coordinate: place.geometry.location.into(),
            tags: place.types,
            rating: place.rating,
            vicinity: place.vicinity,
            formatted_address: place.formatted_address,
        }
    }
}

/// Place details response
#[derive(Debug, Deserialize)]
pub struct ApiDetailsResponse {
    pub status: String,
    pub result: Option<ApiPlaceDetails>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPlaceDetails {
    #[serde(default)]
    pub photos: Vec<ApiPhoto>,
    #[serde(default)]
    pub types: Vec<String>,
    pub opening_hours: Option<ApiOpeningHours>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPhoto {
    pub photo_reference: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiOpeningHours {
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

// ============================================================================
// Identity token verification
// ============================================================================

/// Claims returned by the token verification endpoint
#[derive(Debug, Deserialize)]
pub struct ApiTokenInfo {
    pub aud: String,
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}
