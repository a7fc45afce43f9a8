//! Command line configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{DEFAULT_BASE_URL, PLACEHOLDER_API_KEY, WeatherApiClient};
use crate::effect::EffectRunner;
use crate::geo::{DEFAULT_IP_LOOKUP_URL, FixedLocator, Geolocator, IpLocator, LocationError};
use crate::state::{Coordinates, WeatherSnapshot};

#[derive(clap::Args, Debug, Clone)]
pub struct WidgetArgs {
    /// WeatherAPI.com key
    #[arg(long, env = "WEATHERAPI_KEY", default_value = PLACEHOLDER_API_KEY, hide_env_values = true)]
    pub api_key: String,

    /// WeatherAPI base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Fixed latitude instead of an IP lookup
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Fixed longitude instead of an IP lookup
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Run without any geolocation capability
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub no_geolocation: bool,

    /// IP lookup endpoint (ip-api.com compatible)
    #[arg(long, default_value = DEFAULT_IP_LOOKUP_URL)]
    pub geo_url: String,

    /// Seconds to wait for the IP lookup (minimum 1)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub geo_timeout: u64,

    /// JSON snapshot shown when live data is unavailable
    #[arg(long)]
    pub fallback_file: Option<PathBuf>,

    /// Where diagnostics are written (the terminal belongs to the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("latitude {0} is out of range (-90 to 90)")]
    Latitude(f64),
    #[error("longitude {0} is out of range (-180 to 180)")]
    Longitude(f64),
    #[error("failed to read fallback file {path}: {source}")]
    FallbackRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse fallback file {path}: {source}")]
    FallbackParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to build locator: {0}")]
    Locator(#[from] LocationError),
}

/// How the position is obtained
#[derive(Debug, Clone, PartialEq)]
pub enum LocatorConfig {
    Disabled,
    Fixed(Coordinates),
    IpLookup { url: String, timeout: Duration },
}

/// Validated settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub locator: LocatorConfig,
    pub fallback: WeatherSnapshot,
    pub log_file: PathBuf,
}

impl Settings {
    pub fn from_args(args: WidgetArgs) -> Result<Self, ConfigError> {
        let locator = if args.no_geolocation {
            LocatorConfig::Disabled
        } else {
            match (args.lat, args.lon) {
                (Some(lat), Some(lon)) => LocatorConfig::Fixed(validate(lat, lon)?),
                _ => LocatorConfig::IpLookup {
                    url: args.geo_url,
                    timeout: Duration::from_secs(args.geo_timeout),
                },
            }
        };

        let fallback = match &args.fallback_file {
            Some(path) => load_fallback(path)?,
            None => WeatherSnapshot::bundled_default(),
        };

        let log_file = args
            .log_file
            .unwrap_or_else(|| std::env::temp_dir().join("weather-widget.log"));

        Ok(Self {
            api_key: args.api_key,
            base_url: args.base_url,
            locator,
            fallback,
            log_file,
        })
    }

    pub fn geolocator(&self) -> Result<Option<Arc<dyn Geolocator>>, ConfigError> {
        let locator: Option<Arc<dyn Geolocator>> = match &self.locator {
            LocatorConfig::Disabled => None,
            LocatorConfig::Fixed(coords) => Some(Arc::new(FixedLocator::new(*coords))),
            LocatorConfig::IpLookup { url, timeout } => {
                Some(Arc::new(IpLocator::new(url.clone(), *timeout)?))
            }
        };
        Ok(locator)
    }

    pub fn effect_runner(&self) -> Result<EffectRunner, ConfigError> {
        let weather = WeatherApiClient::new(self.base_url.clone(), self.api_key.clone());
        Ok(EffectRunner::new(self.geolocator()?, weather))
    }
}

fn validate(lat: f64, lon: f64) -> Result<Coordinates, ConfigError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ConfigError::Latitude(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ConfigError::Longitude(lon));
    }
    Ok(Coordinates { lat, lon })
}

fn load_fallback(path: &Path) -> Result<WeatherSnapshot, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::FallbackRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| ConfigError::FallbackParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        args: WidgetArgs,
    }

    fn parse(argv: &[&str]) -> Result<WidgetArgs, clap::Error> {
        let mut full = vec!["weather-widget"];
        full.extend_from_slice(argv);
        Cli::try_parse_from(full).map(|cli| cli.args)
    }

    #[test]
    fn test_defaults_use_ip_lookup() {
        let settings = Settings::from_args(parse(&["--api-key", "KEY"]).unwrap()).unwrap();

        assert_eq!(settings.api_key, "KEY");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            settings.locator,
            LocatorConfig::IpLookup {
                url: DEFAULT_IP_LOOKUP_URL.into(),
                timeout: Duration::from_secs(10),
            }
        );
        assert_eq!(settings.fallback, WeatherSnapshot::bundled_default());
        assert!(settings.log_file.ends_with("weather-widget.log"));
    }

    #[test]
    fn test_fixed_position() {
        let args = parse(&["--lat", "-33.87", "--lon", "151.21"]).unwrap();
        let settings = Settings::from_args(args).unwrap();

        assert_eq!(
            settings.locator,
            LocatorConfig::Fixed(Coordinates {
                lat: -33.87,
                lon: 151.21
            })
        );
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(parse(&["--lat", "10"]).is_err());
    }

    #[test]
    fn test_no_geolocation_conflicts_with_position() {
        assert!(parse(&["--no-geolocation", "--lat", "1", "--lon", "2"]).is_err());

        let settings = Settings::from_args(parse(&["--no-geolocation"]).unwrap()).unwrap();
        assert_eq!(settings.locator, LocatorConfig::Disabled);
        assert!(settings.geolocator().unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let err = Settings::from_args(parse(&["--lat", "91", "--lon", "0"]).unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Latitude(_)));

        let err =
            Settings::from_args(parse(&["--lat", "0", "--lon", "-181"]).unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Longitude(_)));
    }

    #[test]
    fn test_geo_timeout_minimum() {
        assert!(parse(&["--geo-timeout", "0"]).is_err());
    }

    #[test]
    fn test_fallback_file_replaces_bundled_default() {
        let mut snapshot = WeatherSnapshot::bundled_default();
        snapshot.location.name = "Reykjavik".into();
        let path = std::env::temp_dir().join(format!(
            "weather-widget-fallback-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let args = parse(&["--fallback-file", path.to_str().unwrap()]).unwrap();
        let settings = Settings::from_args(args).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.fallback.location.name, "Reykjavik");
    }

    #[test]
    fn test_missing_fallback_file_is_an_error() {
        let args = parse(&["--fallback-file", "/nonexistent/fallback.json"]).unwrap();
        let err = Settings::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::FallbackRead { .. }));
    }
}
