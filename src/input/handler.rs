use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::render::Speed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    SetSpeed(Speed),
    Quit,
    None,
}

/// Maps key presses in the terminal frontend to actions
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            KeyCode::Char('1') => KeyAction::SetSpeed(Speed::Slow),
            KeyCode::Char('2') => KeyAction::SetSpeed(Speed::Normal),
            KeyCode::Char('3') => KeyAction::SetSpeed(Speed::Fast),
            KeyCode::Char('4') => KeyAction::SetSpeed(Speed::Max),

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
