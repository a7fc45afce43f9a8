use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::Location;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub location: &'a Location,
    pub temperature: f64,
}

/// Rows under the FIGlet name: "region, country" and local time.
/// The name gets `area.height - HEADER_OVERHEAD`.
pub const HEADER_OVERHEAD: u16 = 2;

/// Horizontal gradient keyed on temperature, cold blues to hot reds
pub(crate) fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255), // Light ice
        ),
        t if t < 15.0 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200), // Teal
        ),
        t if t < 25.0 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100), // Yellow
        ),
        t if t < 35.0 => (
            ArtColor::rgb(255, 180, 80),  // Orange
            ArtColor::rgb(255, 120, 80),  // Deep orange
        ),
        _ => (
            ArtColor::rgb(255, 100, 80), // Red-orange
            ArtColor::rgb(255, 60, 60),  // Hot red
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

pub(crate) fn font_stack() -> Vec<artbox::Font> {
    fonts::stack(&["terminus", "miniwi"])
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet city name
            Constraint::Length(1), // Region, country
            Constraint::Length(1), // Local time
        ])
        .split(area);

        let renderer = Renderer::new(font_stack())
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(props.temperature));
        frame.render_widget(ArtBox::new(&renderer, &props.location.name), chunks[0]);

        let region = Line::from(vec![Span::styled(
            format!("{}, {}", props.location.region, props.location.country),
            Style::default().fg(Color::White),
        )])
        .centered();
        frame.render_widget(Paragraph::new(region), chunks[1]);

        let localtime = Line::from(vec![Span::styled(
            props.location.localtime.clone(),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(localtime), chunks[2]);
    }
}
