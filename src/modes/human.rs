use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tracing::{info, warn};

use super::game_loop::GameLoop;
use crate::game::{GameConfig, GameEngine};
use crate::input::TerminalInput;
use crate::render::TerminalRenderer;

type TerminalBackend = CrosstermBackend<Stderr>;

/// Keyboard play in the current terminal
pub struct HumanMode {
    engine: GameEngine,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        };
        Self { engine }
    }

    pub async fn run(self) -> Result<()> {
        let terminal = setup_terminal()?;
        let renderer = TerminalRenderer::new(terminal, self.engine.config());
        let mut game = GameLoop::new(self.engine, TerminalInput::spawn(), renderer);
        info!("terminal ready");

        // Run game loop with cleanup
        let result = game.run().await;

        // Cleanup terminal
        let cleanup = cleanup_terminal(game.renderer_mut().terminal_mut());
        info!(
            games = game.metrics().games_played,
            high_score = game.metrics().high_score,
            "session finished"
        );

        result.and(cleanup)
    }
}

fn setup_terminal() -> Result<Terminal<TerminalBackend>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    or_rollback(open_terminal, release_terminal)
}

fn open_terminal() -> Result<Terminal<TerminalBackend>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Runs `open`, calling `rollback` before handing back its error.
fn or_rollback<T>(open: impl FnOnce() -> Result<T>, rollback: impl FnOnce()) -> Result<T> {
    open().inspect_err(|_| rollback())
}

/// Best-effort undo of a half-finished setup.
fn release_terminal() {
    if let Err(err) = execute!(stderr(), LeaveAlternateScreen) {
        warn!(error = %err, "failed to leave alternate screen");
    }
    if let Err(err) = disable_raw_mode() {
        warn!(error = %err, "failed to disable raw mode");
    }
}

fn cleanup_terminal(terminal: &mut Terminal<TerminalBackend>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
