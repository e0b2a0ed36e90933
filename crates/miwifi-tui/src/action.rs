//! Actions the coordinator loop reacts to.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Resize(u16, u16),
    Render,
}

/// Map a key press to an action. Only the quit keys do anything.
pub fn from_key(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q' | 'Q') | KeyCode::Esc, _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        for key in [
            KeyEvent::from(KeyCode::Char('q')),
            KeyEvent::from(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(from_key(key), Some(Action::Quit), "{key:?}");
        }
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(from_key(KeyEvent::from(KeyCode::Char('c'))), None);
        assert_eq!(from_key(KeyEvent::from(KeyCode::Enter)), None);
        assert_eq!(from_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }
}
