//! Duskline palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const AMBER: Color = Color::Rgb(255, 179, 71); // #ffb347
pub const PERIWINKLE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
pub const SUCCESS_GREEN: Color = Color::Rgb(115, 218, 132); // #73da84
pub const ERROR_RED: Color = Color::Rgb(247, 118, 142); // #f7768e
pub const WARNING_GOLD: Color = Color::Rgb(224, 175, 104); // #e0af68

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_TEXT: Color = Color::Rgb(154, 165, 206); // #9aa5ce
pub const BORDER_SLATE: Color = Color::Rgb(59, 66, 97); // #3b4261
pub const BG_HIGHLIGHT: Color = Color::Rgb(41, 46, 66); // #292e42
pub const BG_PANEL: Color = Color::Rgb(26, 27, 38); // #1a1b26

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(PERIWINKLE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_SLATE)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(AMBER)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_TEXT)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(PERIWINKLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(PERIWINKLE).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_TEXT)
}

/// A form field currently receiving keystrokes.
pub fn input_focused() -> Style {
    Style::default().fg(PERIWINKLE).add_modifier(Modifier::BOLD)
}

/// A form field not receiving keystrokes.
pub fn input_idle() -> Style {
    Style::default().fg(DIM_TEXT)
}

/// Form controls while the loading flag disables them.
pub fn input_disabled() -> Style {
    Style::default().fg(BORDER_SLATE).add_modifier(Modifier::DIM)
}

/// Key hint text (e.g., "q quit  tab focus").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}
