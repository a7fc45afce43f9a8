//! Effects - side effects declared by the reducer, and the runner that performs them

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::action::Action;
use crate::api::WeatherApiClient;
use crate::error::WidgetError;
use crate::geo::Geolocator;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the host for the current position
    LocatePosition,
    /// Fetch current conditions for the given coordinates
    FetchWeather { lat: f64, lon: f64 },
}

/// Performs effects and reports the outcome as an action.
///
/// A missing locator means the host has no geolocation capability at all.
#[derive(Clone)]
pub struct EffectRunner {
    geolocator: Option<Arc<dyn Geolocator>>,
    weather: WeatherApiClient,
}

impl std::fmt::Debug for EffectRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRunner")
            .field("geolocation", &self.geolocator.is_some())
            .field("weather", &self.weather)
            .finish()
    }
}

impl EffectRunner {
    pub fn new(geolocator: Option<Arc<dyn Geolocator>>, weather: WeatherApiClient) -> Self {
        Self {
            geolocator,
            weather,
        }
    }

    pub async fn run(&self, effect: Effect) -> Action {
        match effect {
            Effect::LocatePosition => self.locate().await,
            Effect::FetchWeather { lat, lon } => self.fetch_weather(lat, lon).await,
        }
    }

    pub async fn locate(&self) -> Action {
        let Some(geolocator) = &self.geolocator else {
            let err = WidgetError::GeolocationUnsupported;
            warn!(shown = err.user_message(), "{err}");
            return Action::LocationUnsupported;
        };

        match geolocator.current_position().await {
            Ok(coords) => {
                info!(lat = coords.lat, lon = coords.lon, "position resolved");
                Action::LocationDidResolve(coords)
            }
            Err(e) => {
                let err = WidgetError::from(e);
                warn!(shown = err.user_message(), "error getting user location: {err}");
                Action::LocationDidError(err.to_string())
            }
        }
    }

    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Action {
        match self.weather.current(lat, lon).await {
            Ok(snapshot) => {
                info!(location = %snapshot.location.name, "weather loaded");
                Action::WeatherDidLoad(snapshot)
            }
            Err(e) => {
                let err = WidgetError::from(e);
                error!(shown = err.user_message(), "error fetching weather data: {err}");
                Action::WeatherDidError(err.to_string())
            }
        }
    }
}
