//! Condition icons
//!
//! WeatherAPI condition text is matched case-insensitively against a small
//! table. Anything not in the table gets the plain cloud.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Thunder,
    DefaultCloud,
}

impl IconCategory {
    pub fn from_condition(text: &str) -> Self {
        match text.to_lowercase().as_str() {
            "sunny" | "clear" => IconCategory::Clear,
            "partly cloudy" | "cloudy" | "overcast" => IconCategory::Cloudy,
            "patchy rain nearby" | "light rain" | "moderate rain" | "heavy rain" => {
                IconCategory::Rain
            }
            "snow" | "light snow" | "heavy snow" => IconCategory::Snow,
            "thundery outbreaks possible" | "thunderstorm" => IconCategory::Thunder,
            _ => IconCategory::DefaultCloud,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            IconCategory::Clear => "\u{2600}\u{fe0f}",
            IconCategory::Cloudy | IconCategory::DefaultCloud => "\u{2601}\u{fe0f}",
            IconCategory::Rain => "\u{1f327}\u{fe0f}",
            IconCategory::Snow => "\u{1f328}\u{fe0f}",
            IconCategory::Thunder => "\u{1f329}\u{fe0f}",
        }
    }

    /// Multi-line glyph: a cloud (or sun) with an optional precipitation row
    pub fn art(self) -> Text<'static> {
        let cloud = Style::default().fg(Color::Gray);
        match self {
            IconCategory::Clear => colored(SUN, Style::default().fg(Color::Yellow)),
            IconCategory::Cloudy | IconCategory::DefaultCloud => colored(CLOUD, cloud),
            IconCategory::Rain => {
                with_precipitation(cloud, "  ' ' ' '  ", Style::default().fg(Color::Blue))
            }
            IconCategory::Snow => {
                with_precipitation(cloud, "  * * * *  ", Style::default().fg(Color::White))
            }
            IconCategory::Thunder => {
                with_precipitation(cloud, "    /_/    ", Style::default().fg(Color::Yellow))
            }
        }
    }

    pub fn art_height(self) -> u16 {
        self.art().lines.len() as u16
    }
}

const SUN: &[&str] = &["   \\   /   ", "    .-.    ", " - (   ) - ", "    `-'    ", "   /   \\   "];

const CLOUD: &[&str] = &["    .--.   ", " .-(    ). ", "(___.__)__)"];

fn colored(rows: &[&'static str], style: Style) -> Text<'static> {
    Text::from(
        rows.iter()
            .map(|row| Line::from(Span::styled(*row, style)))
            .collect::<Vec<_>>(),
    )
}

fn with_precipitation(cloud: Style, drops: &'static str, drop_style: Style) -> Text<'static> {
    let mut text = colored(CLOUD, cloud);
    text.lines.push(Line::from(Span::styled(drops, drop_style)));
    text.lines.push(Line::from(Span::styled(drops, drop_style)));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_conditions() {
        let cases = [
            ("Sunny", IconCategory::Clear),
            ("clear", IconCategory::Clear),
            ("Partly cloudy", IconCategory::Cloudy),
            ("Overcast", IconCategory::Cloudy),
            ("Patchy rain nearby", IconCategory::Rain),
            ("HEAVY RAIN", IconCategory::Rain),
            ("Light snow", IconCategory::Snow),
            ("Thundery outbreaks possible", IconCategory::Thunder),
            ("Thunderstorm", IconCategory::Thunder),
        ];
        for (text, expected) in cases {
            assert_eq!(IconCategory::from_condition(text), expected, "{text}");
        }
    }

    #[test]
    fn test_unknown_conditions_use_default_cloud() {
        for text in ["Fog", "Mist", "", "Patchy light drizzle", "sunny "] {
            assert_eq!(IconCategory::from_condition(text), IconCategory::DefaultCloud);
        }
    }

    #[test]
    fn test_art_heights() {
        assert_eq!(IconCategory::Clear.art_height(), 5);
        assert_eq!(IconCategory::Cloudy.art_height(), 3);
        assert_eq!(IconCategory::Rain.art_height(), 5);
    }
}
