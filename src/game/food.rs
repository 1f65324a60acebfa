use rand::seq::IteratorRandom;
use rand::Rng;

use super::config::{GameConfig, Rgb};
use super::grid::{Coordinate, Grid};
use super::snake::{BodyElement, Snake};

/// Outcome of looking for a new food cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodPlacement {
    Placed(Coordinate),
    /// The snake covers every cell
    Exhausted,
}

/// The single food item on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    position: Option<Coordinate>,
    color: Rgb,
    grid: Grid,
    max_attempts: usize,
}

impl Food {
    /// Food that has not been placed yet
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: None,
            color: config.colors.food,
            grid: config.grid(),
            max_attempts: config.max_food_attempts,
        }
    }

    /// Move the food to a random cell the snake does not cover.
    ///
    /// Random draws are tried first; once they run out the choice is made
    /// among the free cells directly. With no free cell the food is removed.
    pub fn place_new_food<R: Rng + ?Sized>(&mut self, snake: &Snake, rng: &mut R) -> FoodPlacement {
        let size = self.grid.size();
        for _ in 0..self.max_attempts {
            let candidate = Coordinate::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if !snake.in_body(candidate) {
                self.position = Some(candidate);
                return FoodPlacement::Placed(candidate);
            }
        }

        self.position = self
            .grid
            .cells()
            .filter(|&cell| !snake.in_body(cell))
            .choose(rng);
        match self.position {
            Some(cell) => FoodPlacement::Placed(cell),
            None => FoodPlacement::Exhausted,
        }
    }

    /// Put the food on a specific cell
    pub fn set_position(&mut self, position: Coordinate) {
        self.position = Some(position);
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn element(&self) -> Option<BodyElement> {
        self.position.map(|pos| BodyElement::new(pos, self.color))
    }
}
