//! Color palette and style constants for the podcast browser.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(240, 120, 90);
pub const C_MUTED: Color = Color::Rgb(78, 78, 94);
pub const C_SECONDARY: Color = Color::Rgb(120, 120, 140);
pub const C_PRIMARY: Color = Color::Rgb(214, 214, 228);
pub const C_SELECTION_BG: Color = Color::Rgb(30, 30, 44);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 44, 56);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_CARD_BORDER_SELECTED: Color = Color::Rgb(240, 120, 90);
pub const C_FILTER_BG: Color = Color::Rgb(22, 22, 34);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_TAG: Color = Color::Rgb(80, 140, 200);
pub const C_DATE: Color = Color::Rgb(100, 160, 130);
pub const C_LINK: Color = Color::Rgb(150, 120, 200);
pub const C_OVERLAY_BG: Color = Color::Rgb(18, 18, 26);
pub const C_BACKDROP: Color = Color::Rgb(8, 8, 12);
pub const C_MODE_NORMAL: Color = Color::Rgb(120, 120, 140);
pub const C_MODE_SEARCH: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_DETAIL: Color = Color::Rgb(240, 120, 90);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_heading() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_label() -> Style {
    Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
