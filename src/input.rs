//! Key handling for the few runtime controls.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action requested by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the session.
    Quit,
    /// Toggle horizontal mirroring of the mosaic.
    ToggleMirror,
    /// Manual reset: accumulated time, motion baseline, blackout, HUD.
    Reset,
    /// Key not bound to anything.
    None,
}

/// Map a key event to its action.
pub fn map_key(event: KeyEvent) -> KeyAction {
    // Ignore key release/repeat events on platforms that report them
    if event.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('m') => KeyAction::ToggleMirror,
        KeyCode::Char('r') => KeyAction::Reset,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_mirror_and_reset_keys() {
        assert_eq!(map_key(press(KeyCode::Char('m'))), KeyAction::ToggleMirror);
        assert_eq!(map_key(press(KeyCode::Char('r'))), KeyAction::Reset);
    }

    #[test]
    fn test_unbound_key_is_none() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(map_key(press(KeyCode::Enter)), KeyAction::None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = press(KeyCode::Char('q'));
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(event), KeyAction::None);
    }
}
