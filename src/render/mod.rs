//! Drawing the game

pub mod renderer;

use anyhow::Result;

use crate::game::Snapshot;
use crate::metrics::GameMetrics;

pub use renderer::{headline, BoardView, TerminalRenderer};

/// Anything that can show a game snapshot. Never mutates game state.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot, metrics: &GameMetrics) -> Result<()>;
}
