use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, Intent};

/// Maps terminal key presses to game intents
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Only key presses count; releases, repeats and other events are dropped.
    pub fn handle_event(&self, event: &Event) -> Option<Intent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(self.handle_key_event(*key)),
            _ => None,
        }
    }

    /// Any key press acknowledges a finished game, so every intent produced
    /// here carries a restart request.
    pub fn handle_key_event(&self, key: KeyEvent) -> Intent {
        let mut intent = Intent::restart();

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            intent.quit_requested = true;
            return intent;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => intent.direction = Some(Direction::Up),
            KeyCode::Down => intent.direction = Some(Direction::Down),
            KeyCode::Left => intent.direction = Some(Direction::Left),
            KeyCode::Right => intent.direction = Some(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => intent.direction = Some(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => intent.direction = Some(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => intent.direction = Some(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => intent.direction = Some(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => intent.quit_requested = true,

            _ => {}
        }

        intent
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
