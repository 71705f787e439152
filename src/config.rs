use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Google Maps Platform API key (geocoding, text search, place details, photos)
    pub google_maps_api_key: String,

    /// Google Maps web services base URL
    #[serde(default = "default_google_maps_api_url")]
    pub google_maps_api_url: String,

    /// OAuth client id that identity tokens must be issued for
    pub google_client_id: String,

    /// Token verification endpoint
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,

    /// Redis connection URL. The session cache falls back to process memory when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Venue discovery radius around the geocoded city
    #[serde(default = "default_search_radius_meters")]
    pub search_radius_meters: u32,

    /// Length of the "processing your schedule" pause before suggestions are revealed
    #[serde(default = "default_processing_delay_secs")]
    pub processing_delay_secs: u64,

    /// Per-request timeout applied to every provider call
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// How long a cached login stays valid
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_google_maps_api_url() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_tokeninfo_url() -> String {
    "https://oauth2.googleapis.com/tokeninfo".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_search_radius_meters() -> u32 {
    5000
}

fn default_processing_delay_secs() -> u64 {
    3
}

fn default_provider_timeout_secs() -> u64 {
    10
}

fn default_session_ttl_secs() -> u64 {
    600
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?
            .validated()
    }

    /// Rejects values that deserialize fine but would leave the service unsafe to run
    pub fn validated(self) -> anyhow::Result<Self> {
        if self.google_client_id.trim().is_empty() {
            anyhow::bail!("GOOGLE_CLIENT_ID must not be empty");
        }
        Ok(self)
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_secs(self.processing_delay_secs)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
