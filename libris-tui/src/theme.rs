//! Color palettes and semantic color helpers.

use crate::notifications::NotificationLevel;
use libris_core::{FieldMatchType, ViewState};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct LibrisTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl LibrisTheme {
    /// Theme by configured name; unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 22),
            bg_highlight: Color::Rgb(44, 44, 52),
            primary: Color::Rgb(120, 200, 255),
            primary_dim: Color::Rgb(60, 110, 150),
            secondary: Color::Rgb(230, 160, 90),
            tertiary: Color::Rgb(200, 200, 120),
            success: Color::Rgb(110, 210, 120),
            warning: Color::Rgb(240, 200, 80),
            error: Color::Rgb(240, 90, 90),
            info: Color::Rgb(120, 200, 255),
            text: Color::Rgb(235, 235, 235),
            text_dim: Color::Rgb(140, 140, 150),
            border: Color::Rgb(70, 70, 80),
            border_focus: Color::Rgb(120, 200, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 248, 242),
            bg_highlight: Color::Rgb(225, 222, 210),
            primary: Color::Rgb(20, 90, 160),
            primary_dim: Color::Rgb(90, 130, 170),
            secondary: Color::Rgb(170, 90, 20),
            tertiary: Color::Rgb(120, 110, 30),
            success: Color::Rgb(30, 130, 50),
            warning: Color::Rgb(170, 120, 0),
            error: Color::Rgb(180, 30, 30),
            info: Color::Rgb(20, 90, 160),
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(110, 110, 110),
            border: Color::Rgb(180, 175, 165),
            border_focus: Color::Rgb(20, 90, 160),
        }
    }
}

pub fn view_state_color(state: ViewState, theme: &LibrisTheme) -> Color {
    match state {
        ViewState::Initial => theme.text_dim,
        ViewState::Loading => theme.warning,
        ViewState::HasResults => theme.success,
        ViewState::HasSuggestionsOnly => theme.secondary,
        ViewState::Empty => theme.text_dim,
    }
}

pub fn match_type_color(match_type: FieldMatchType, theme: &LibrisTheme) -> Color {
    match match_type {
        FieldMatchType::Literal => theme.primary_dim,
        FieldMatchType::Regex => theme.tertiary,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &LibrisTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
    }
}
