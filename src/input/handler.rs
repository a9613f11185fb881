use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, InputEvent, Phase};

/// Turns key presses into game input events.
///
/// The arrow keys steer while playing and pick the speed on the menu, so the
/// current phase is part of the lookup.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> Option<InputEvent> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(InputEvent::Quit);
        }

        if phase == Phase::Menu {
            match key.code {
                KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                    return Some(InputEvent::SpeedUp);
                }
                KeyCode::Down | KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('_') => {
                    return Some(InputEvent::SpeedDown);
                }
                _ => {}
            }
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
            KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
            KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
            KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Some(InputEvent::Turn(Direction::Up)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::Turn(Direction::Down)),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(InputEvent::Turn(Direction::Left)),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(InputEvent::Turn(Direction::Right)),

            // Controls
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Confirm),
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                Some(InputEvent::Pause)
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Cancel),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &InputHandler, code: KeyCode, phase: Phase) -> Option<InputEvent> {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), phase)
    }

    #[test]
    fn test_arrow_keys_steer_while_playing() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Up, Phase::Playing),
            Some(InputEvent::Turn(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Down, Phase::Playing),
            Some(InputEvent::Turn(Direction::Down))
        );
        assert_eq!(
            press(&handler, KeyCode::Left, Phase::Playing),
            Some(InputEvent::Turn(Direction::Left))
        );
        assert_eq!(
            press(&handler, KeyCode::Right, Phase::Playing),
            Some(InputEvent::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('w'), Phase::Playing),
            Some(InputEvent::Turn(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('a'), Phase::Playing),
            Some(InputEvent::Turn(Direction::Left))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('s'), Phase::Playing),
            Some(InputEvent::Turn(Direction::Down))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('d'), Phase::Playing),
            Some(InputEvent::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper, Phase::Playing),
            Some(InputEvent::Turn(Direction::Up))
        );
    }

    #[test]
    fn test_arrow_keys_pick_speed_on_menu() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Up, Phase::Menu),
            Some(InputEvent::SpeedUp)
        );
        assert_eq!(
            press(&handler, KeyCode::Down, Phase::Menu),
            Some(InputEvent::SpeedDown)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('+'), Phase::Menu),
            Some(InputEvent::SpeedUp)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('-'), Phase::Menu),
            Some(InputEvent::SpeedDown)
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Enter, Phase::Menu),
            Some(InputEvent::Confirm)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('r'), Phase::GameOver),
            Some(InputEvent::Confirm)
        );
        assert_eq!(
            press(&handler, KeyCode::Char(' '), Phase::Playing),
            Some(InputEvent::Pause)
        );
        assert_eq!(
            press(&handler, KeyCode::Esc, Phase::Paused),
            Some(InputEvent::Cancel)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('q'), Phase::Menu),
            Some(InputEvent::Cancel)
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(press(&handler, KeyCode::Char('x'), Phase::Playing), None);
        assert_eq!(press(&handler, KeyCode::Tab, Phase::Menu), None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handler.handle_key_event(ctrl_c, Phase::Playing),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            handler.handle_key_event(ctrl_c, Phase::Menu),
            Some(InputEvent::Quit)
        );
    }
}
