//! Styling utilities and color schemes

use crate::types::Tone;
use ratatui::style::{Color, Modifier, Style};

/// Get the color for an HTTP method
pub fn get_method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Blue,
        "PUT" => Color::Yellow,
        "DELETE" => Color::Red,
        "PATCH" => Color::Cyan,
        "ANY" => Color::Magenta,
        _ => Color::White,
    }
}

/// Color for an HTTP status code by class
pub fn get_status_color(status: u16) -> Color {
    match status {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Yellow,
        500..=599 => Color::Red,
        _ => Color::Gray,
    }
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Info => Color::Cyan,
        Tone::Success => Color::Green,
        Tone::Error => Color::Red,
    }
}

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn unfocused_border() -> Color {
    Color::DarkGray
}

/// Background and border shared by all modals
pub fn modal_style() -> Style {
    Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White)
}

pub fn modal_border(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Color::Rgb(150, 150, 150))
}

/// Method column width for consistent formatting
pub const METHOD_COLUMN_WIDTH: usize = 7;
