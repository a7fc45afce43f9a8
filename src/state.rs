//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the reading was taken, as reported by WeatherAPI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub localtime: String,
}

/// Condition classifier attached to a reading
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub humidity: u8,
    pub wind_kph: f64,
    pub condition: Condition,
}

/// A complete weather reading for one location at one time.
///
/// Field names follow the `current.json` response body so the snapshot
/// deserializes straight from the API. Extra fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
}

impl WeatherSnapshot {
    /// The snapshot shipped with the widget, shown whenever live data is unavailable
    pub fn bundled_default() -> Self {
        Self {
            location: Location {
                name: "Bamenda".into(),
                region: "Nord-Ouest".into(),
                country: "Cameroon".into(),
                localtime: "2024-10-15 10:26".into(),
            },
            current: CurrentConditions {
                temp_c: 21.1,
                feelslike_c: 21.2,
                humidity: 67,
                wind_kph: 3.6,
                condition: Condition {
                    text: "Patchy rain nearby".into(),
                    icon: "//cdn.weatherapi.com/weather/64x64/day/176.png".into(),
                    code: 1063,
                },
            },
        }
    }
}

/// Geographic position handed from the locator to the weather fetch
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Position in the mount chain.
///
/// `Init → Locating → {Fetching → {Success, FetchFailed}, LocationFailed, GeoUnsupported}`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Phase {
    #[default]
    Init,
    Locating,
    Fetching,
    Success,
    FetchFailed,
    LocationFailed,
    GeoUnsupported,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Phase::Success | Phase::FetchFailed | Phase::LocationFailed | Phase::GeoUnsupported
        )
    }
}

/// Spinner frame period while loading.
pub const SPINNER_TICK_MS: u64 = 80;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Reading currently on screen
    #[debug(section = "Weather", label = "Snapshot", debug_fmt)]
    pub snapshot: WeatherSnapshot,

    /// True until the mount chain settles
    #[debug(section = "Weather", label = "Loading")]
    pub loading: bool,

    /// User-facing failure message, shown next to the fallback content
    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub error: Option<String>,

    #[debug(section = "Mount", label = "Phase", debug_fmt)]
    pub phase: Phase,

    /// Technical detail of the last failure (logged, never rendered in the card)
    #[debug(section = "Mount", label = "Diagnostic", debug_fmt)]
    pub diagnostic: Option<String>,

    /// Reading restored on any failure. Owned per instance, never mutated.
    #[debug(skip)]
    pub fallback: WeatherSnapshot,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create mount-time state around the given fallback reading
    pub fn new(fallback: WeatherSnapshot) -> Self {
        Self {
            snapshot: fallback.clone(),
            loading: true,
            error: None,
            phase: Phase::Init,
            diagnostic: None,
            fallback,
            tick_count: 0,
        }
    }

    pub fn restore_fallback(&mut self) {
        self.snapshot = self.fallback.clone();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(WeatherSnapshot::bundled_default())
    }
}
