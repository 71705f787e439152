use crate::models::{OpenStatus, Preferences, Venue};

/// Tags that qualify a venue when the user wants to eat
pub const EAT_TAGS: &[&str] = &["restaurant", "food", "cafe", "meal_takeaway"];

/// Tags that qualify a venue when the user only wants drinks
pub const DRINK_TAGS: &[&str] = &["bar", "night_club"];

pub fn matches_category(venue: &Venue, prefs: &Preferences) -> bool {
    if prefs.wants_to_eat {
        venue.has_any_tag(EAT_TAGS)
    } else {
        venue.has_any_tag(DRINK_TAGS)
    }
}

/// Picks the itinerary from the enriched venue set.
///
/// The algorithm:
/// 1. Keep only venues in the requested category (no fallback to the full set)
/// 2. Move venues confirmed open now ahead of closed/unknown ones, keeping relative order
/// 3. Truncate to the desired spot count
///
/// An empty result is a valid outcome, not an error.
pub fn recommend(venues: &[Venue], prefs: &Preferences) -> Vec<String> {
    let (open, rest): (Vec<&Venue>, Vec<&Venue>) = venues
        .iter()
        .filter(|v| matches_category(v, prefs))
        .partition(|v| v.open_now == OpenStatus::Open);

    let suggestions: Vec<String> = open
        .into_iter()
        .chain(rest)
        .take(prefs.desired_spot_count)
        .map(|v| v.id.clone())
        .collect();

    tracing::debug!(
        wants_to_eat = prefs.wants_to_eat,
        desired = prefs.desired_spot_count,
        venues = venues.len(),
        suggested = suggestions.len(),
        "Recommendation computed"
    );

    suggestions
}
