//! Key mapping from terminal events to session commands.

use crate::types::InputAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Forwarded to the session as part of the next tick's input.
    Action(InputAction),
    /// Reset the session ("play again").
    Restart,
    Quit,
}

/// Map a key event to a command.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }
    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            InputAction::MoveLeft
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            InputAction::MoveRight
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            InputAction::MoveDown
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => InputAction::Rotate,

        KeyCode::Char(' ') => InputAction::HardDrop,

        KeyCode::Char('r') | KeyCode::Char('R') => return Some(KeyCommand::Restart),

        _ => return None,
    };
    Some(KeyCommand::Action(action))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn action(code: KeyCode) -> Option<InputAction> {
        match handle_key_event(KeyEvent::from(code)) {
            Some(KeyCommand::Action(action)) => Some(action),
            _ => None,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(action(KeyCode::Left), Some(InputAction::MoveLeft));
        assert_eq!(action(KeyCode::Right), Some(InputAction::MoveRight));
        assert_eq!(action(KeyCode::Down), Some(InputAction::MoveDown));

        assert_eq!(action(KeyCode::Char('H')), Some(InputAction::MoveLeft));
        assert_eq!(action(KeyCode::Char('d')), Some(InputAction::MoveRight));
        assert_eq!(action(KeyCode::Char('J')), Some(InputAction::MoveDown));
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        assert_eq!(action(KeyCode::Up), Some(InputAction::Rotate));
        assert_eq!(action(KeyCode::Char('W')), Some(InputAction::Rotate));
        assert_eq!(action(KeyCode::Char(' ')), Some(InputAction::HardDrop));
        assert_eq!(action(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(KeyCommand::Restart)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(KeyCommand::Restart)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyCommand::Quit)
        );
    }
}
