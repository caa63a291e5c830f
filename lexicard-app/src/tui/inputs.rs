use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    Up,
    Down,
    Enter,
    ToggleReveal,
    Correct,
    Wrong,
    Skip,
    Flag,
    None,
}

pub fn map_event(ev: Event) -> Action {
    if let Event::Key(KeyEvent {
        code, modifiers, kind, ..
    }) = ev
    {
        if kind == KeyEventKind::Release {
            return Action::None;
        }
        match (code, modifiers) {
            (KeyCode::Char('q'), _) => Action::Quit,
            (KeyCode::Esc, _) => Action::Back,
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::Down,
            (KeyCode::Enter, _) => Action::Enter,
            (KeyCode::Char(' '), _) => Action::ToggleReveal,
            (KeyCode::Char('1'), _) | (KeyCode::Char('y'), _) => Action::Correct,
            (KeyCode::Char('2'), _) | (KeyCode::Char('n'), _) => Action::Wrong,
            (KeyCode::Char('s'), KeyModifiers::NONE) => Action::Skip,
            (KeyCode::Char('f'), KeyModifiers::NONE) => Action::Flag,
            _ => Action::None,
        }
    } else {
        Action::None
    }
}
