//! Keybinding definitions for the TUI.
//!
//! Plain characters always type into the focused field, so every command
//! sits on a control chord or a non-printing key.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextMode,
    PrevMode,
    MoveUp,
    MoveDown,
    CycleForward,
    CycleBack,
    ToggleMatchType,
    Input(char),
    Backspace,
    ClearField,
    Confirm,
    Cancel,
    Retry,
    OpenHelp,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::ToggleMatchType),
            KeyCode::Char('r') => Some(Action::Retry),
            KeyCode::Char('u') => Some(Action::ClearField),
            _ => None,
        };
    }
    if modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match code {
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextMode),
        KeyCode::BackTab => Some(Action::PrevMode),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Left => Some(Action::CycleBack),
        KeyCode::Right => Some(Action::CycleForward),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::F(1) => Some(Action::OpenHelp),
        KeyCode::Char(c) if !c.is_control() => Some(Action::Input(c)),
        _ => None,
    }
}

/// Lines shown in the help overlay.
pub const HELP_LINES: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "switch search mode"),
    ("Up / Down", "move between fields and results"),
    ("Left / Right", "change language, sort or order"),
    ("Ctrl-T", "toggle literal/regex for the field"),
    ("Enter", "search, or open the selected book"),
    ("Esc", "close popup, back to the form"),
    ("Ctrl-U", "clear the field"),
    ("Ctrl-R", "retry the last search"),
    ("Ctrl-C / Ctrl-Q", "quit"),
];
