use chrono::{Datelike, Local};
use std::sync::Arc;

use crate::{
    models::{RawCandidate, Venue},
    services::providers::PlacesProvider,
};

/// Maps a Sunday-first provider weekday (Sunday = 0) onto a Monday-first index.
///
/// Weekly hours text from the provider is ordered Monday..Sunday, so Sunday lands on 6.
pub fn monday_first_index(provider_day: u32) -> usize {
    if provider_day == 0 {
        6
    } else {
        (provider_day - 1) as usize
    }
}

/// Today's weekday in the provider's Sunday-first convention, local time
pub fn provider_weekday_today() -> u32 {
    Local::now().weekday().num_days_from_sunday()
}

/// Enriches every candidate with detail metadata, using today's local weekday
pub async fn enrich(provider: Arc<dyn PlacesProvider>, candidates: Vec<RawCandidate>) -> Vec<Venue> {
    enrich_on_day(provider, candidates, provider_weekday_today()).await
}

/// Fetches details for all candidates in parallel and waits for every attempt to settle.
///
/// Exactly one venue comes back per candidate, in input order. A failed or panicked
/// detail fetch degrades that venue (no photo, unknown open status) instead of dropping it.
pub async fn enrich_on_day(
    provider: Arc<dyn PlacesProvider>,
    candidates: Vec<RawCandidate>,
    provider_day: u32,
) -> Vec<Venue> {
    let today_index = monday_first_index(provider_day);

    tracing::info!(
        candidates = candidates.len(),
        today_index = today_index,
        provider = provider.name(),
        "Enriching venues"
    );

    let mut tasks = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let provider = Arc::clone(&provider);
        let fallback = candidate.clone();
        let task = tokio::spawn(async move {
            let result = provider.place_details(&candidate.id).await;
            match result {
                Ok(details) => (Venue::build(candidate, Some(details), today_index), true),
                Err(e) => {
                    tracing::warn!(
                        place_id = %candidate.id,
                        error = %e,
                        "Detail fetch failed, keeping degraded venue"
                    );
                    (Venue::degraded(candidate), false)
                }
            }
        });
        tasks.push((fallback, task));
    }

    let mut venues = Vec::with_capacity(tasks.len());
    let mut degraded = 0usize;

    for (fallback, task) in tasks {
        match task.await {
            Ok((venue, enriched)) => {
                if !enriched {
                    degraded += 1;
                }
                venues.push(venue);
            }
            Err(e) => {
                tracing::error!(place_id = %fallback.id, error = %e, "Enrichment task join error");
                degraded += 1;
                venues.push(Venue::degraded(fallback));
            }
        }
    }

    if degraded > 0 {
        tracing::warn!(
            enriched = venues.len() - degraded,
            degraded = degraded,
            "Partial enrichment failure"
        );
    }

    venues
}
