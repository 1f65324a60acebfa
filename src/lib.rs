//! Grid Snake - classic snake on a wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Terminal input and rendering behind the `InputSource` and `Renderer` traits
//! - The fixed-rate game loop and terminal play mode (modes module)
//! - Session statistics (metrics module) and log setup (logging module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
