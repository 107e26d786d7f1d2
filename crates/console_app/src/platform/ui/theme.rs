use console_core::AlertKind;
use ratatui::style::{Color, Modifier, Style};

/// Maps a row's status class (e.g. `status-valid`) to its color.
pub fn status_color(class: &str) -> Color {
    match class {
        "status-valid" => Color::Green,
        "status-risky" => Color::Yellow,
        "status-invalid" | "status-error" => Color::Red,
        _ => Color::Gray,
    }
}

pub fn status_style(class: &str) -> Style {
    Style::default()
        .fg(status_color(class))
        .add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn details() -> Style {
    Style::default().fg(Color::Rgb(0x94, 0xa3, 0xb8))
}

pub fn hint_key() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn header() -> Style {
    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn alert_color(kind: AlertKind) -> Color {
    match kind {
        AlertKind::Validation => Color::Yellow,
        AlertKind::Quota => Color::Magenta,
        AlertKind::Failure | AlertKind::Export => Color::Red,
    }
}
