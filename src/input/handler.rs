use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// Command produced by one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Restart,
    Quit,
    None,
}

/// Maps terminal keys to game commands
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a terminal event; releases, repeats and non-key events are ignored
    pub fn handle_event(&self, event: &Event) -> KeyAction {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(*key),
            _ => KeyAction::None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Move(direction);
        }

        match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }

    /// Arrow keys, WASD and vi-style hjkl
    fn direction_for(code: KeyCode) -> Option<Direction> {
        let direction = match code {
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' | 'k' => Direction::Up,
                's' | 'j' => Direction::Down,
                'a' | 'h' => Direction::Left,
                'd' | 'l' => Direction::Right,
                _ => return None,
            },
            _ => return None,
        };
        Some(direction)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
