/// Places data provider abstraction
///
/// The pipeline consumes geocoding, text search and place details as a black-box
/// capability. Each backend (Google Maps web services today) implements all three so
/// place ids returned by search are valid for detail lookups.
use crate::{
    error::AppResult,
    models::{Coordinate, Photo, RawCandidate, VenueDetails},
};

pub mod google;

pub use google::GooglePlacesProvider;

/// Detail fields requested for every candidate
pub const DETAIL_FIELDS: &[&str] = &["photos", "types", "opening_hours"];

/// Trait for geocoding and place search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Resolve free-text to a coordinate.
    ///
    /// Returns `AppError::NotFound` when the provider has no match.
    async fn geocode(&self, address: &str) -> AppResult<Coordinate>;

    /// Search for places matching `query` around `center`.
    ///
    /// An empty result set is `Ok(vec![])`, not an error.
    async fn text_search(
        &self,
        center: Coordinate,
        radius_meters: u32,
        query: &str,
    ) -> AppResult<Vec<RawCandidate>>;

    /// Fetch photo, tags and opening hours for a single place
    async fn place_details(&self, place_id: &str) -> AppResult<VenueDetails>;

    /// Fetch the image behind a photo reference returned by `place_details`
    async fn photo(&self, photo_reference: &str) -> AppResult<Photo>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
