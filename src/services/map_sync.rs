use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::models::{Bounds, MapView, MarkerVisualState, Venue};

/// Marker states plus the viewport that frames the suggested venues
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSync {
    pub markers: BTreeMap<String, MarkerVisualState>,
    /// `None` when nothing is suggested; the map keeps its current viewport
    pub viewport: Option<Bounds>,
}

/// Computes per-marker visual state for the current venues and suggestions.
///
/// Pure and idempotent: identical inputs always give identical output. Suggestion ids
/// with no matching venue are ignored.
pub fn compute_marker_state(venues: &[Venue], suggestion_ids: &[String]) -> MarkerSync {
    let suggested: HashSet<&str> = suggestion_ids.iter().map(String::as_str).collect();

    let markers = venues
        .iter()
        .map(|v| {
            (
                v.id.clone(),
                MarkerVisualState::for_membership(suggested.contains(v.id.as_str())),
            )
        })
        .collect();

    let viewport = Bounds::enclosing(
        venues
            .iter()
            .filter(|v| suggested.contains(v.id.as_str()))
            .map(|v| v.coordinate),
    );

    MarkerSync { markers, viewport }
}

/// Folds a sync result into the live map, returning the new view.
///
/// The viewport is only replaced when the sync computed one.
pub fn reconcile(view: &MapView, sync: &MarkerSync) -> MapView {
    let mut next = view.clone();
    if let Some(bounds) = sync.viewport {
        next.viewport = Some(bounds);
    }
    next
}
