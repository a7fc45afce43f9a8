//! Weather widget
//!
//! Locates the user once at startup, fetches current conditions from
//! WeatherAPI.com and renders them, falling back to a bundled reading on
//! any failure. The library exposes the modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod geo;
pub mod icons;
pub mod logging;
pub mod reducer;
pub mod state;
