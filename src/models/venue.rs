use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Coordinate;

/// Shown when the provider gives neither a vicinity nor a formatted address
pub const NO_ADDRESS: &str = "No address provided";

/// Venue stub returned by discovery, before enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
}

/// Live operating status at query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OpenStatus {
    Open,
    Closed,
    #[default]
    Unknown,
}

impl OpenStatus {
    pub fn from_open_now(open_now: Option<bool>) -> Self {
        match open_now {
            Some(true) => OpenStatus::Open,
            Some(false) => OpenStatus::Closed,
            None => OpenStatus::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, OpenStatus::Unknown)
    }
}

/// Route under which venue photos are served by this API
pub const PHOTO_PATH_PREFIX: &str = "/api/v1/photos/";

/// Client-facing URL for a provider photo reference
pub fn photo_path(photo_reference: &str) -> String {
    format!("{}{}", PHOTO_PATH_PREFIX, photo_reference)
}

/// Image bytes fetched from the provider for the photo route
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Detail metadata fetched per candidate during enrichment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueDetails {
    pub photo_url: Option<String>,
    pub tags: Vec<String>,
    pub open_now: Option<bool>,
    /// Monday-first human readable hours, one entry per weekday
    pub weekday_text: Vec<String>,
}

/// A discovered place merged with its detail metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub address: String,
    pub rating: Option<f64>,
    pub category_tags: BTreeSet<String>,
    pub photo_url: Option<String>,
    pub open_now: OpenStatus,
    pub today_hours: Option<String>,
}

impl Venue {
    /// Builds a venue from its search stub alone, with every detail field degraded
    pub fn degraded(candidate: RawCandidate) -> Self {
        Self::build(candidate, None, 0)
    }

    /// Merges a search stub with (optional) details.
    ///
    /// `today_index` is the Monday-first weekday index used to pick today's hours.
    pub fn build(candidate: RawCandidate, details: Option<VenueDetails>, today_index: usize) -> Self {
        let address = candidate
            .vicinity
            .filter(|v| !v.trim().is_empty())
            .or(candidate.formatted_address.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| NO_ADDRESS.to_string());

        let mut category_tags: BTreeSet<String> = candidate.tags.into_iter().collect();

        let (photo_url, open_now, today_hours) = match details {
            Some(details) => {
                category_tags.extend(details.tags);
                let open_now = OpenStatus::from_open_now(details.open_now);
                let today_hours = if open_now.is_known() {
                    details.weekday_text.get(today_index).cloned()
                } else {
                    None
                };
                (details.photo_url, open_now, today_hours)
            }
            None => (None, OpenStatus::Unknown, None),
        };

        Self {
            id: candidate.id,
            name: candidate.name,
            coordinate: candidate.coordinate,
            address,
            rating: candidate.rating,
            category_tags,
            photo_url,
            open_now,
            today_hours,
        }
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| self.category_tags.contains(*t))
    }
}
