//! Failure kinds surfaced to the user

use crate::api::FetchError;
use crate::geo::LocationError;

pub const GEO_UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported by your browser.";
pub const LOCATION_FAILED_MESSAGE: &str =
    "Failed to get your location. Showing default location data.";
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch current weather data. Showing default information.";

/// Every way the mount chain can fall back to default data
#[derive(thiserror::Error, Debug)]
pub enum WidgetError {
    #[error("geolocation is not supported")]
    GeolocationUnsupported,
    #[error("location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),
    #[error("weather fetch failed: {0}")]
    WeatherFetchFailed(#[from] FetchError),
}

impl WidgetError {
    /// Fixed text shown in the warning banner
    pub fn user_message(&self) -> &'static str {
        match self {
            WidgetError::GeolocationUnsupported => GEO_UNSUPPORTED_MESSAGE,
            WidgetError::LocationUnavailable(_) => LOCATION_FAILED_MESSAGE,
            WidgetError::WeatherFetchFailed(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            WidgetError::GeolocationUnsupported.user_message(),
            "Geolocation is not supported by your browser."
        );
        assert_eq!(
            WidgetError::from(LocationError::PermissionDenied).user_message(),
            "Failed to get your location. Showing default location data."
        );
        assert_eq!(
            WidgetError::from(FetchError::Status {
                status: 500,
                body: "boom".into(),
            })
            .user_message(),
            "Failed to fetch current weather data. Showing default information."
        );
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = WidgetError::from(LocationError::Unavailable("no route".into()));
        assert!(err.to_string().contains("no route"));
    }
}
