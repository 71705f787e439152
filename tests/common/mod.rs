#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use itinerary_api::{
    db::MemorySessionStore,
    error::{AppError, AppResult},
    models::{venue::photo_path, Coordinate, Photo, RawCandidate, UserIdentity, VenueDetails},
    routes::AppState,
    services::{
        identity::IdentityVerifier, providers::PlacesProvider, AuthService, FlowOrchestrator,
        FlowSettings,
    },
};

pub const GOOD_TOKEN: &str = "good-token";

/// Scripted behaviour for one city
#[derive(Clone)]
pub struct CityScript {
    pub center: Coordinate,
    pub search_delay: Duration,
    /// `None` makes the text search fail with a provider error
    pub candidates: Option<Vec<RawCandidate>>,
}

/// In-memory places provider driven by per-city scripts
#[derive(Default)]
pub struct FakePlaces {
    cities: HashMap<String, CityScript>,
    details: HashMap<String, VenueDetails>,
    detail_delays: HashMap<String, Duration>,
    photos: HashMap<String, Photo>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, name: &str, script: CityScript) -> Self {
        self.cities.insert(name.to_string(), script);
        self
    }

    pub fn details(mut self, id: &str, details: VenueDetails) -> Self {
        self.details.insert(id.to_string(), details);
        self
    }

    /// Delays the detail lookup for one place id
    pub fn slow_details(mut self, id: &str, delay: Duration) -> Self {
        self.detail_delays.insert(id.to_string(), delay);
        self
    }

    pub fn with_photo(mut self, reference: &str, bytes: &[u8]) -> Self {
        self.photos.insert(
            reference.to_string(),
            Photo {
                content_type: "image/jpeg".to_string(),
                bytes: bytes.to_vec(),
            },
        );
        self
    }

    fn script_for(&self, center: Coordinate) -> Option<&CityScript> {
        self.cities.values().find(|s| s.center == center)
    }
}

#[async_trait::async_trait]
impl PlacesProvider for FakePlaces {
    async fn geocode(&self, address: &str) -> AppResult<Coordinate> {
        self.cities
            .get(address)
            .map(|s| s.center)
            .ok_or_else(|| AppError::NotFound(format!("No geocoding results for {}", address)))
    }

    async fn text_search(
        &self,
        center: Coordinate,
        _radius_meters: u32,
        _query: &str,
    ) -> AppResult<Vec<RawCandidate>> {
        let script = self
            .script_for(center)
            .cloned()
            .ok_or_else(|| AppError::ProviderUnavailable("unknown center".to_string()))?;

        tokio::time::sleep(script.search_delay).await;

        script
            .candidates
            .ok_or_else(|| AppError::ProviderUnavailable("text search failed".to_string()))
    }

    async fn place_details(&self, place_id: &str) -> AppResult<VenueDetails> {
        if let Some(delay) = self.detail_delays.get(place_id) {
            tokio::time::sleep(*delay).await;
        }

        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| AppError::ProviderUnavailable(format!("no details for {}", place_id)))
    }

    async fn photo(&self, photo_reference: &str) -> AppResult<Photo> {
        self.photos
            .get(photo_reference)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No photo for {}", photo_reference)))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Accepts `GOOD_TOKEN` and rejects everything else
pub struct FakeVerifier;

#[async_trait::async_trait]
impl IdentityVerifier for FakeVerifier {
    async fn verify(&self, token: &str) -> AppResult<UserIdentity> {
        if token == GOOD_TOKEN {
            Ok(test_user())
        } else {
            Err(AppError::Unauthorized("Invalid token".to_string()))
        }
    }
}

pub fn test_user() -> UserIdentity {
    UserIdentity {
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        picture_url: None,
        subject_id: "1234567890".to_string(),
    }
}

pub fn candidate(id: &str, tags: &[&str], lat: f64, lng: f64) -> RawCandidate {
    RawCandidate {
        id: id.to_string(),
        name: format!("Venue {}", id),
        coordinate: Coordinate::new(lat, lng),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating: Some(4.2),
        vicinity: Some(format!("{} Main St", id)),
        formatted_address: None,
    }
}

pub fn open_details(open: bool) -> VenueDetails {
    VenueDetails {
        photo_url: None,
        tags: Vec::new(),
        open_now: Some(open),
        weekday_text: (1..=7).map(|d| format!("Day {}: 9:00 AM – 11:00 PM", d)).collect(),
    }
}

/// Ottawa with a small mixed set of venues, all details available
pub fn ottawa() -> (CityScript, Vec<(&'static str, VenueDetails)>) {
    (
        CityScript {
            center: Coordinate::new(45.4215, -75.6972),
            search_delay: Duration::ZERO,
            candidates: Some(vec![
                candidate("R1", &["restaurant"], 45.42, -75.70),
                candidate("R2", &["food"], 45.43, -75.69),
                candidate("B1", &["bar"], 45.41, -75.68),
                candidate("N1", &["night_club"], 45.44, -75.71),
            ]),
        },
        vec![
            ("R1", open_details(false)),
            (
                "R2",
                VenueDetails {
                    photo_url: Some(photo_path("photo-r2")),
                    ..open_details(true)
                },
            ),
            ("B1", open_details(true)),
            ("N1", open_details(false)),
        ],
    )
}

pub fn fake_with_ottawa() -> FakePlaces {
    let (script, details) = ottawa();
    details
        .into_iter()
        .fold(FakePlaces::new().city("Ottawa", script), |fake, (id, d)| {
            fake.details(id, d)
        })
        .with_photo("photo-r2", b"jpeg-bytes")
}

pub fn settings(delay: Duration) -> FlowSettings {
    FlowSettings {
        search_radius_meters: 5000,
        processing_delay: delay,
    }
}

pub async fn app_state(places: FakePlaces, delay: Duration) -> Arc<AppState> {
    let auth = AuthService::restore(
        Arc::new(FakeVerifier),
        Arc::new(MemorySessionStore::new()),
        Duration::from_secs(600),
    )
    .await
    .unwrap();

    Arc::new(AppState {
        flow: FlowOrchestrator::new(Arc::new(places), settings(delay)),
        auth: Arc::new(auth),
    })
}
