//! Geolocation capability
//!
//! A terminal has no built-in position service, so the capability is a
//! [`Geolocator`] chosen at startup: a fixed position from the command line,
//! or an IP lookup. Running without one models a host with no geolocation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::state::Coordinates;

pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json";

#[derive(thiserror::Error, Debug)]
pub enum LocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("timed out waiting for position")]
    Timeout,
    #[error("lookup request failed: {0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for LocationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LocationError::Timeout
        } else {
            LocationError::Request(e)
        }
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the configured position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coords: Coordinates,
}

impl FixedLocator {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl Geolocator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// ip-api.com style lookup response
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Resolves the position from the public IP address
#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    url: String,
}

impl IpLocator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LocationError::Request)?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Geolocator for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        debug!(url = %self.url, "looking up position by IP");
        let response = self.http.get(&self.url).send().await?;

        match response.status() {
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
                return Err(LocationError::PermissionDenied);
            }
            status if !status.is_success() => {
                return Err(LocationError::Unavailable(format!("lookup returned {status}")));
            }
            _ => {}
        }

        let data: IpLookupResponse = response.json().await?;
        if data.status != "success" {
            let reason = data.message.unwrap_or_else(|| data.status.clone());
            return Err(LocationError::Unavailable(reason));
        }

        match (data.lat, data.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(LocationError::Unavailable(
                "lookup response has no coordinates".into(),
            )),
        }
    }
}
