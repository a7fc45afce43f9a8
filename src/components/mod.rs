pub mod location_header;
pub mod weather_card;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use location_header::{LocationHeader, LocationHeaderProps};
pub use weather_card::{CardView, WeatherCard, WeatherCardProps, round_half_up};
pub use weather_display::{ERROR_ICON, WeatherDisplay, WeatherDisplayProps};
