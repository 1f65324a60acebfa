pub mod game_loop;
pub mod human;

pub use game_loop::{GameLoop, LoopControl};
pub use human::HumanMode;
