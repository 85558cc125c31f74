use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

use crate::game::{Direction, InputEvent};

/// Maps terminal key presses onto game input events
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// `None` for keys the game does not use
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<InputEvent> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(InputEvent::Quit);
        }

        let event = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputEvent::Turn(Direction::Up),
            KeyCode::Down => InputEvent::Turn(Direction::Down),
            KeyCode::Left => InputEvent::Turn(Direction::Left),
            KeyCode::Right => InputEvent::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputEvent::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputEvent::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputEvent::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputEvent::Turn(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') => InputEvent::PauseToggle,
            KeyCode::Char(' ') | KeyCode::Enter => InputEvent::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Replay,
            // Bare Shift is only reported by terminals with keyboard enhancement
            KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
                InputEvent::Replay
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,

            _ => return None,
        };

        Some(event)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
