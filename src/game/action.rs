use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the unit delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Everything the input side can tell the game during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    /// At most one direction per tick
    pub direction: Option<Direction>,
    pub quit_requested: bool,
    /// Only honored while the game is over
    pub restart_requested: bool,
}

impl Intent {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn steer(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit_requested: true,
            ..Self::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart_requested: true,
            ..Self::default()
        }
    }

    /// Folds a later intent from the same tick into this one.
    ///
    /// The last direction seen wins; quit and restart are sticky.
    pub fn merge(&mut self, later: Intent) {
        if later.direction.is_some() {
            self.direction = later.direction;
        }
        self.quit_requested |= later.quit_requested;
        self.restart_requested |= later.restart_requested;
    }
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        Intent::steer(direction)
    }
}
