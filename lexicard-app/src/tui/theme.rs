use lexicard_core::Tier;
use ratatui::style::{Color, Modifier, Style};

pub fn heading() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn highlighted() -> Style {
    Style::default().fg(Color::Black).bg(Color::Yellow)
}

pub fn status_bar() -> Style {
    Style::default().fg(Color::Gray).bg(Color::Black)
}

pub fn revealed_answer() -> Style {
    Style::default().fg(Color::Green)
}

pub fn correction_flag() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC)
}

/// Colour of a tier's counter in the session box.
pub fn tier(t: Tier) -> Style {
    match t {
        Tier::Learn => Style::default().fg(Color::LightRed),
        Tier::Review => Style::default().fg(Color::LightYellow),
        Tier::Known => Style::default().fg(Color::LightGreen),
    }
}
