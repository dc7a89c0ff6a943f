use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Select,
    FocusSearch,
    Filter,
    CycleReadmeFilter,
    InputChar(char),
    InputBackspace,
    InputConfirm,
    InputCancel,
    Help,
    ClosePopup,
    Quit,
    None,
}

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    Browse,
    Filter,
    Reader,
}

pub fn map_key(key: KeyEvent, mode: InputMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match mode {
        InputMode::Search | InputMode::Filter => match key.code {
            KeyCode::Esc => Action::InputCancel,
            KeyCode::Enter => Action::InputConfirm,
            KeyCode::Backspace => Action::InputBackspace,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::None,
        },
        InputMode::Reader => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Char('g') | KeyCode::Home => Action::Top,
            KeyCode::Char('G') | KeyCode::End => Action::Bottom,
            KeyCode::Esc | KeyCode::Char('q') => Action::ClosePopup,
            _ => Action::None,
        },
        InputMode::Browse => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Char('g') | KeyCode::Home => Action::Top,
            KeyCode::Char('G') | KeyCode::End => Action::Bottom,
            KeyCode::Enter => Action::Select,
            KeyCode::Char('s') | KeyCode::Char('i') => Action::FocusSearch,
            KeyCode::Char('/') => Action::Filter,
            KeyCode::Char('f') => Action::CycleReadmeFilter,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Esc => Action::ClosePopup,
            _ => Action::None,
        },
    }
}
