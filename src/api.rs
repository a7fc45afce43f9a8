//! WeatherAPI.com client

use reqwest::Client;
use tracing::debug;

use crate::state::WeatherSnapshot;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Placeholder used when no key is configured; the API answers it with 401/403.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the `current.json` endpoint.
///
/// No timeout is set: the request runs until the server answers or the
/// connection fails.
#[derive(Clone)]
pub struct WeatherApiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for WeatherApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current conditions for a coordinate pair
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/current.json", self.base_url);
        let q = format!("{lat},{lon}");
        debug!(%url, %q, "requesting current weather");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", q.as_str()), ("aqi", "no")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
