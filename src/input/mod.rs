//! Where player intents come from

pub mod handler;
pub mod terminal;

use anyhow::Result;

use crate::game::Intent;

pub use handler::InputHandler;
pub use terminal::TerminalInput;

/// Source of player input, polled once per tick
pub trait InputSource {
    /// Everything the player asked for since the previous poll, folded into a
    /// single intent. Must not block.
    fn poll(&mut self) -> Result<Intent>;
}
