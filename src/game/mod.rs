//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end and the headless tests both drive it through
//! [`GameEngine::tick`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;
pub mod snapshot;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::{ConfigError, DisplayConfig, GameConfig, Palette, Rgb};
pub use engine::{GameEngine, StepInfo};
pub use food::{Food, FoodPlacement};
pub use grid::{Coordinate, Grid};
pub use snake::{BodyElement, Snake, SnakeState};
pub use snapshot::Snapshot;
