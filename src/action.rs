//! Actions: the mount intent and the results of its async chain

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Coordinates, WeatherSnapshot};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Intent: start the locate-then-fetch chain (dispatched once at startup)
    Mount,

    // ===== Location category =====
    /// Result: the locator produced a position
    LocationDidResolve(Coordinates),

    /// Result: the locator failed (permission, unavailable, timeout)
    LocationDidError(String),

    /// No locator is configured; the request was never issued
    LocationUnsupported,

    // ===== Weather category =====
    /// Result: current conditions loaded
    WeatherDidLoad(WeatherSnapshot),

    /// Result: the fetch failed (transport, status, or body)
    WeatherDidError(String),

    // ===== Uncategorized (global) =====
    /// Spinner frame
    Tick,

    /// Exit the application
    Quit,
}
