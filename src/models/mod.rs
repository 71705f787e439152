use serde::{Deserialize, Serialize};

pub mod identity;
pub mod map;
pub mod places;
pub mod preferences;
pub mod venue;

pub use identity::{CachedSession, UserIdentity};
pub use map::{Bounds, MapType, MapView, MarkerColor, MarkerVisualState};
pub use preferences::{Preferences, QuestionnaireAnswers};
pub use venue::{OpenStatus, Photo, RawCandidate, Venue, VenueDetails};

/// A WGS84 point, as produced by geocoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
