use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::Intent,
    config::GameConfig,
    food::{Food, FoodPlacement},
    snake::{Snake, SnakeState},
    snapshot::Snapshot,
};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the game ended (lost or won) during this step
    pub game_over: bool,
    /// Whether a finished game was reset at the start of this step
    pub restarted: bool,
    /// Snake state after the step
    pub state: SnakeState,
}

/// Owns one game session: the snake, the food, the score and the RNG
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    score: u32,
    steps: u32,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as [`GameEngine::new`] but with a reproducible food sequence
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let snake = Snake::new(&config);
        let food = Food::new(&config);
        let mut engine = Self {
            config,
            snake,
            food,
            score: 0,
            steps: 0,
            rng,
        };
        engine.respawn_food();
        engine
    }

    /// Start a fresh game in place
    pub fn reset(&mut self) {
        self.snake.reset();
        self.score = 0;
        self.steps = 0;

        let food_blocked = match self.food.position() {
            Some(pos) => self.snake.in_body(pos),
            None => true,
        };
        if food_blocked {
            self.respawn_food();
        }
        info!(num_rows = self.config.num_rows, "new game");
    }

    /// Execute one tick of the game
    pub fn tick(&mut self, intent: Intent) -> StepInfo {
        let mut restarted = false;
        if intent.restart_requested && self.snake.state().is_over() {
            self.reset();
            restarted = true;
        }
        let was_over = self.snake.state().is_over();

        self.snake.set_direction(intent.direction);
        self.snake.advance();
        if self.snake.state() == SnakeState::Playing {
            self.steps += 1;
        }

        let ate_food = self.try_eat();

        let state = self.snake.state();
        let game_over = !was_over && state.is_over();
        if game_over {
            info!(
                score = self.score,
                length = self.snake.len(),
                steps = self.steps,
                outcome = ?state,
                "game over"
            );
        }

        StepInfo {
            ate_food,
            game_over,
            restarted,
            state,
        }
    }

    fn try_eat(&mut self) -> bool {
        if self.snake.state() != SnakeState::Playing {
            return false;
        }
        let Some(food) = self.food.position() else {
            return false;
        };
        if !self.snake.eat(food) {
            return false;
        }

        self.score += self.config.score_increment;
        debug!(score = self.score, length = self.snake.len(), "food eaten");
        self.respawn_food();
        true
    }

    /// Place the food on a free cell, or end the game as won when there is none
    fn respawn_food(&mut self) {
        match self.food.place_new_food(&self.snake, &mut self.rng) {
            FoodPlacement::Placed(pos) => {
                debug!(x = pos.x, y = pos.y, "food placed");
            }
            FoodPlacement::Exhausted => {
                info!(length = self.snake.len(), "no free cell left for food");
                self.snake.declare_won();
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.body().to_vec(),
            food: self.food.element(),
            score: self.score,
            state: self.snake.state(),
            grid_size: self.snake.grid().size(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Direct access for setting up positions, e.g. in tests
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Moves made in the current game
    pub fn steps(&self) -> u32 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coordinate, Direction};

    fn engine() -> GameEngine {
        GameEngine::seeded(GameConfig::default(), 42)
    }

    #[test]
    fn test_new_engine() {
        let engine = engine();

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.steps(), 0);
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.snake().state(), SnakeState::Idle);

        let food = engine.food().position().unwrap();
        assert!(!engine.snake().in_body(food));
    }

    #[test]
    fn test_idle_until_first_direction() {
        let mut engine = engine();
        let info = engine.tick(Intent::none());

        assert_eq!(info.state, SnakeState::Idle);
        assert_eq!(engine.snake().head(), Coordinate::new(10, 10));

        engine.tick(Intent::steer(Direction::Down));
        assert_eq!(engine.snake().head(), Coordinate::new(10, 11));
        assert_eq!(engine.steps(), 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        engine.food_mut().set_position(Coordinate::new(11, 10));

        let info = engine.tick(Intent::steer(Direction::Right));

        assert!(info.ate_food);
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.snake().len(), 2);

        let food = engine.food().position().unwrap();
        assert!(!engine.snake().in_body(food));
    }

    #[test]
    fn test_no_food_no_growth() {
        let mut engine = engine();
        engine.food_mut().set_position(Coordinate::new(0, 0));

        let info = engine.tick(Intent::steer(Direction::Right));

        assert!(!info.ate_food);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().len(), 1);
    }

    #[test]
    fn test_collision_ends_game_once() {
        let mut engine = engine();
        let snake = Snake::with_body(
            engine.config(),
            &[
                Coordinate::new(5, 5),
                Coordinate::new(4, 5),
                Coordinate::new(4, 6),
                Coordinate::new(5, 6),
                Coordinate::new(6, 6),
            ],
            Direction::Right,
        );
        *engine.snake_mut() = snake;
        engine.food_mut().set_position(Coordinate::new(0, 0));

        let info = engine.tick(Intent::steer(Direction::Down));
        assert!(info.game_over);
        assert_eq!(info.state, SnakeState::Lost);

        let info = engine.tick(Intent::steer(Direction::Left));
        assert!(!info.game_over);
        assert_eq!(info.state, SnakeState::Lost);
        assert_eq!(engine.snake().head(), Coordinate::new(5, 6));
    }

    #[test]
    fn test_restart_only_when_over() {
        let mut engine = engine();
        engine.tick(Intent::steer(Direction::Up));

        let info = engine.tick(Intent::restart());
        assert!(!info.restarted);
        assert_eq!(engine.snake().head(), Coordinate::new(10, 8));
    }

    #[test]
    fn test_restart_after_loss() {
        let mut engine = engine();
        let snake = Snake::with_body(
            engine.config(),
            &[
                Coordinate::new(5, 5),
                Coordinate::new(4, 5),
                Coordinate::new(4, 6),
                Coordinate::new(5, 6),
                Coordinate::new(6, 6),
            ],
            Direction::Right,
        );
        *engine.snake_mut() = snake;
        engine.food_mut().set_position(Coordinate::new(0, 0));
        engine.tick(Intent::steer(Direction::Down));
        assert_eq!(engine.snake().state(), SnakeState::Lost);

        let info = engine.tick(Intent::restart());
        assert!(info.restarted);
        assert_eq!(info.state, SnakeState::Idle);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.snake().head(), Coordinate::new(10, 10));
    }

    #[test]
    fn test_restart_key_can_also_steer() {
        let mut engine = engine();
        engine.snake_mut().declare_won();

        let mut intent = Intent::restart();
        intent.direction = Some(Direction::Left);
        let info = engine.tick(intent);

        assert!(info.restarted);
        assert_eq!(info.state, SnakeState::Playing);
        assert_eq!(engine.snake().head(), Coordinate::new(9, 10));
    }

    #[test]
    fn test_reset_moves_food_off_center() {
        let mut engine = engine();
        engine.tick(Intent::steer(Direction::Right));
        engine.food_mut().set_position(Coordinate::new(10, 10));

        engine.reset();

        let food = engine.food().position().unwrap();
        assert_ne!(food, Coordinate::new(10, 10));
    }

    #[test]
    fn test_filling_grid_wins() {
        let config = GameConfig {
            num_rows: 2,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::seeded(config, 5);
        // Length four with the last segment still stacked on the tail: the
        // next move covers every cell and lands on the food.
        let snake = Snake::with_body(
            engine.config(),
            &[
                Coordinate::new(1, 0),
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(0, 1),
            ],
            Direction::Down,
        );
        *engine.snake_mut() = snake;
        engine.food_mut().set_position(Coordinate::new(1, 1));

        let info = engine.tick(Intent::none());

        assert!(info.ate_food);
        assert!(info.game_over);
        assert_eq!(info.state, SnakeState::Won);
        assert_eq!(engine.food().position(), None);
        assert_eq!(engine.snapshot().food, None);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = engine();
        engine.food_mut().set_position(Coordinate::new(3, 4));
        engine.tick(Intent::steer(Direction::Up));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.grid_size, 20);
        assert_eq!(snapshot.state, SnakeState::Playing);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.head().unwrap().position, Coordinate::new(10, 9));
        assert_eq!(snapshot.food.unwrap().position, Coordinate::new(3, 4));
    }
}
