/// Google Maps web services provider
///
/// API Flow:
/// 1. Geocode: /maps/api/geocode/json → first result's location
/// 2. Discovery: /maps/api/place/textsearch/json → one page of place stubs
/// 3. Enrichment: /maps/api/place/details/json → photos, types, opening hours
/// 4. Photos: /maps/api/place/photo, proxied so the key stays server-side
use crate::{
    error::{AppError, AppResult},
    models::{
        places::{
            ApiDetailsResponse, ApiGeocodeResponse, ApiTextSearchResponse, STATUS_OK,
            STATUS_ZERO_RESULTS,
        },
        venue::photo_path,
        Coordinate, Photo, RawCandidate, VenueDetails,
    },
    services::providers::{PlacesProvider, DETAIL_FIELDS},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const PHOTO_MAX_WIDTH: &str = "400";
const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Clone)]
pub struct GooglePlacesProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GooglePlacesProvider {
    /// Creates a provider whose every request is bounded by `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(path = %path, status = %status, body = %body, "Google API request failed");
            return Err(AppError::ProviderUnavailable(format!(
                "Google API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize Google API response"
            );
            AppError::ProviderUnavailable(format!("Failed to parse Google response: {}", e))
        })
    }
}

fn status_error(operation: &str, status: &str, message: Option<String>) -> AppError {
    AppError::ProviderUnavailable(format!(
        "{} returned status {}{}",
        operation,
        status,
        message.map(|m| format!(": {}", m)).unwrap_or_default()
    ))
}

#[async_trait::async_trait]
impl PlacesProvider for GooglePlacesProvider {
    async fn geocode(&self, address: &str) -> AppResult<Coordinate> {
        let response: ApiGeocodeResponse = self
            .get_json("/maps/api/geocode/json", &[("address", address)])
            .await?;

        match response.status.as_str() {
            STATUS_OK => {
                let first = response.results.into_iter().next().ok_or_else(|| {
                    AppError::NotFound(format!("No geocode match for '{}'", address))
                })?;

                tracing::debug!(
                    address = %address,
                    resolved = ?first.formatted_address,
                    provider = "google",
                    "Geocode resolved"
                );

                Ok(first.geometry.location.into())
            }
            STATUS_ZERO_RESULTS => Err(AppError::NotFound(format!(
                "No geocode match for '{}'",
                address
            ))),
            other => Err(status_error("Geocode", other, response.error_message)),
        }
    }

    async fn text_search(
        &self,
        center: Coordinate,
        radius_meters: u32,
        query: &str,
    ) -> AppResult<Vec<RawCandidate>> {
        let location = center.to_string();
        let radius = radius_meters.to_string();

        let response: ApiTextSearchResponse = self
            .get_json(
                "/maps/api/place/textsearch/json",
                &[
                    ("query", query),
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                ],
            )
            .await?;

        match response.status.as_str() {
            STATUS_OK => {
                let candidates: Vec<RawCandidate> =
                    response.results.into_iter().map(RawCandidate::from).collect();

                tracing::info!(
                    location = %location,
                    results = candidates.len(),
                    provider = "google",
                    "Text search completed"
                );

                Ok(candidates)
            }
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            other => Err(status_error("Text search", other, response.error_message)),
        }
    }

    async fn place_details(&self, place_id: &str) -> AppResult<VenueDetails> {
        let fields = DETAIL_FIELDS.join(",");

        let response: ApiDetailsResponse = self
            .get_json(
                "/maps/api/place/details/json",
                &[("place_id", place_id), ("fields", fields.as_str())],
            )
            .await?;

        if response.status != STATUS_OK {
            return Err(status_error(
                "Place details",
                &response.status,
                response.error_message,
            ));
        }

        let details = response.result.ok_or_else(|| {
            AppError::ProviderUnavailable(format!("Place details for {} had no result", place_id))
        })?;

        let photo_url = details
            .photos
            .first()
            .map(|photo| photo_path(&photo.photo_reference));
        let (open_now, weekday_text) = match details.opening_hours {
            Some(hours) => (hours.open_now, hours.weekday_text),
            None => (None, Vec::new()),
        };

        Ok(VenueDetails {
            photo_url,
            tags: details.types,
            open_now,
            weekday_text,
        })
    }

    async fn photo(&self, photo_reference: &str) -> AppResult<Photo> {
        let url = format!("{}/maps/api/place/photo", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("maxwidth", PHOTO_MAX_WIDTH),
                ("photo_reference", photo_reference),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::BAD_REQUEST {
            return Err(AppError::NotFound(format!("No photo for reference {}", photo_reference)));
        }
        if !status.is_success() {
            tracing::error!(status = %status, "Google photo request failed");
            return Err(AppError::ProviderUnavailable(format!(
                "Google photo returned status {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_PHOTO_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        tracing::debug!(size = bytes.len(), content_type = %content_type, "Photo fetched");

        Ok(Photo {
            content_type,
            bytes,
        })
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
