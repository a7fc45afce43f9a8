use artbox::{Alignment as ArtAlignment, Renderer, integrations::ratatui::ArtBox};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::location_header::{HEADER_OVERHEAD, font_stack, temperature_gradient};
use super::{Component, ERROR_ICON, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::icons::IconCategory;
use crate::state::{AppState, WeatherSnapshot};

pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub state: &'a AppState,
}

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const LOADING_MESSAGE: &str = "Loading weather data...";

/// Half-up rounding: `15.5 -> 16`, `-2.5 -> -2`.
///
/// Compares the exact fractional part instead of adding 0.5, which would
/// round values just below a half upwards.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Display strings derived from a snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct CardView<'a> {
    pub icon: IconCategory,
    pub temperature: String,
    pub feels_like: String,
    pub description: &'a str,
    pub humidity: String,
    pub wind: String,
    pub error: Option<&'a str>,
}

impl<'a> CardView<'a> {
    pub fn new(snapshot: &'a WeatherSnapshot, error: Option<&'a str>) -> Self {
        let current = &snapshot.current;
        Self {
            icon: IconCategory::from_condition(&current.condition.text),
            temperature: format!("{}°C", round_half_up(current.temp_c)),
            feels_like: format!("Feels like {}°C", round_half_up(current.feelslike_c)),
            description: &current.condition.text,
            humidity: format!("Humidity: {}%", current.humidity),
            wind: format!("Wind: {} km/h", round_half_up(current.wind_kph)),
            error,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.snapshot, state.error.as_deref())
    }
}

/// Fixed rows: blank, blank, feels-like, description, blank, readouts.
const LAYOUT_FIXED: u16 = 6;

/// Text cap tiers: (header_cap, temp_cap).
/// terminus(6), miniwi(4), plain(1), with HEADER_OVERHEAD added to the header.
const TEXT_TIERS: [(u16, u16); 3] = [
    (6 + HEADER_OVERHEAD, 6),
    (4 + HEADER_OVERHEAD, 4),
    (1 + HEADER_OVERHEAD, 1),
];

struct LayoutSizing {
    art: bool,
    icon_h: u16,
    header_cap: u16,
    temp_cap: u16,
}

/// Shrink the text before giving up the multi-line icon for an emoji.
fn compute_layout(area_height: u16, icon: IconCategory, banner: bool) -> LayoutSizing {
    let fixed = LAYOUT_FIXED + u16::from(banner);
    let art_h = icon.art_height();
    for &(hcap, tcap) in &TEXT_TIERS {
        if hcap + tcap + fixed + art_h <= area_height {
            return LayoutSizing {
                art: true,
                icon_h: art_h,
                header_cap: hcap,
                temp_cap: tcap,
            };
        }
    }
    let (hcap, tcap) = TEXT_TIERS[TEXT_TIERS.len() - 1];
    LayoutSizing {
        art: false,
        icon_h: 1,
        header_cap: hcap,
        temp_cap: tcap,
    }
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.state.loading {
            render_spinner(frame, area, props.state.tick_count);
        } else {
            render_content(frame, area, props.state);
        }
    }
}

fn render_spinner(frame: &mut Frame, area: Rect, tick_count: u32) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let spinner = SPINNER_FRAMES[tick_count as usize % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(LOADING_MESSAGE, Style::default().fg(Color::Gray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_content(frame: &mut Frame, area: Rect, state: &AppState) {
    let view = CardView::from_state(state);
    let sizing = compute_layout(area.height, view.icon, view.error.is_some());

    let chunks = Layout::vertical([
        Constraint::Max(sizing.header_cap),
        Constraint::Length(1),
        Constraint::Length(sizing.icon_h),
        Constraint::Length(1),
        Constraint::Max(sizing.temp_cap),
        Constraint::Length(1), // Feels like
        Constraint::Length(1), // Description
        Constraint::Length(1),
        Constraint::Length(1), // Humidity / wind
        Constraint::Length(u16::from(view.error.is_some())),
    ])
    .flex(Flex::Center)
    .split(area);

    let mut header = LocationHeader;
    header.render(
        frame,
        chunks[0],
        LocationHeaderProps {
            location: &state.snapshot.location,
            temperature: state.snapshot.current.temp_c,
        },
    );

    if sizing.art {
        frame.render_widget(
            Paragraph::new(view.icon.art()).alignment(Alignment::Center),
            chunks[2],
        );
    } else {
        let emoji = Line::from(view.icon.emoji()).centered();
        frame.render_widget(Paragraph::new(emoji), chunks[2]);
    }

    let renderer = Renderer::new(font_stack())
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(state.snapshot.current.temp_c));
    frame.render_widget(ArtBox::new(&renderer, &view.temperature), chunks[4]);

    let feels = Line::from(vec![Span::styled(
        view.feels_like.clone(),
        Style::default().fg(Color::White),
    )])
    .centered();
    frame.render_widget(Paragraph::new(feels), chunks[5]);

    let desc = Line::from(vec![Span::styled(
        view.description.to_string(),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(desc), chunks[6]);

    let readouts = Line::from(vec![
        Span::styled(view.humidity.clone(), Style::default().fg(Color::LightBlue)),
        Span::raw("    "),
        Span::styled(view.wind.clone(), Style::default().fg(Color::LightBlue)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(readouts), chunks[8]);

    if let Some(error) = view.error {
        let banner = Line::from(vec![
            Span::raw(ERROR_ICON),
            Span::raw(" "),
            Span::styled(error.to_string(), Style::default().fg(Color::Yellow)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(banner), chunks[9]);
    }
}
