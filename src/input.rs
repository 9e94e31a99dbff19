//! Key bindings: arrows plus vim-style hjkl.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AimLeft,
    AimRight,
    PowerUp,
    PowerDown,
    Fire,
    ToggleHints,
    ToggleZen,
    Pause,
    Restart,
    Quit,
    None,
}

/// Map key event to game action. `H` (shift-h) toggles hints so plain `h` stays free for aiming.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Char('H') => Action::ToggleHints,
        KeyCode::Char('z' | 'Z') => Action::ToggleZen,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Left | KeyCode::Char('h') => Action::AimLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::AimRight,
        KeyCode::Up | KeyCode::Char('k') => Action::PowerUp,
        KeyCode::Down | KeyCode::Char('j') => Action::PowerDown,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Fire,
        _ => Action::None,
    }
}
