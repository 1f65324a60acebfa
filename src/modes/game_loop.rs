use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{GameEngine, SnakeState, StepInfo};
use crate::input::InputSource;
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// What the loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Fixed-rate driver: one input poll, one engine step and one render per tick
pub struct GameLoop<I, R, G = StdRng> {
    engine: GameEngine<G>,
    input: I,
    renderer: R,
    metrics: GameMetrics,
    tick_interval: Duration,
}

impl<I: InputSource, R: Renderer, G: Rng> GameLoop<I, R, G> {
    pub fn new(engine: GameEngine<G>, input: I, renderer: R) -> Self {
        let tick_interval = engine.config().tick_interval();
        Self {
            engine,
            input,
            renderer,
            metrics: GameMetrics::new(),
            tick_interval,
        }
    }

    /// Run until the player quits or Ctrl+C arrives
    pub async fn run(&mut self) -> Result<()> {
        self.render()?;

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately.
        tick_timer.tick().await;

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    if self.tick()? == LoopControl::Quit {
                        break;
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Advance the game by exactly one tick
    pub fn tick(&mut self) -> Result<LoopControl> {
        let intent = self.input.poll()?;
        if intent.quit_requested {
            info!(score = self.engine.score(), "quit requested");
            return Ok(LoopControl::Quit);
        }

        let step = self.engine.tick(intent);
        self.record(step);
        self.render()?;
        Ok(LoopControl::Continue)
    }

    fn record(&mut self, step: StepInfo) {
        if step.restarted {
            self.metrics.on_reset();
        }
        if step.state == SnakeState::Playing && !self.metrics.running {
            self.metrics.on_game_start();
        }
        if step.game_over {
            self.metrics.on_game_over(self.engine.score());
        }
        self.metrics.update();
    }

    fn render(&mut self) -> Result<()> {
        let snapshot = self.engine.snapshot();
        self.renderer.render(&snapshot, &self.metrics)
    }

    pub fn engine(&self) -> &GameEngine<G> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<G> {
        &mut self.engine
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
