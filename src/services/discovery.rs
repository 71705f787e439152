use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{Coordinate, RawCandidate},
    services::providers::PlacesProvider,
};

/// Fixed semantic query used for every discovery
pub const VENUE_QUERY: &str = "bars restaurants night club food";

/// Discovers candidate venues around `center`.
///
/// An empty provider result is a valid outcome and yields an empty list. Duplicate place
/// ids within the page are collapsed, keeping the first occurrence.
pub async fn search(
    provider: &dyn PlacesProvider,
    center: Coordinate,
    radius_meters: u32,
) -> AppResult<Vec<RawCandidate>> {
    let results = provider
        .text_search(center, radius_meters, VENUE_QUERY)
        .await?;
    let returned = results.len();

    let mut seen = HashSet::new();
    let candidates: Vec<RawCandidate> = results
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .collect();

    if candidates.len() != returned {
        tracing::debug!(
            returned = returned,
            unique = candidates.len(),
            "Dropped duplicate place ids from discovery"
        );
    }

    tracing::info!(
        center = %center,
        radius_meters = radius_meters,
        candidates = candidates.len(),
        provider = provider.name(),
        "Venue discovery completed"
    );

    Ok(candidates)
}
