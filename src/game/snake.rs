use super::action::Direction;
use super::config::{GameConfig, Rgb};
use super::grid::{Coordinate, Grid};

/// One cell-sized piece of the snake, or the food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyElement {
    pub position: Coordinate,
    pub color: Rgb,
}

impl BodyElement {
    pub fn new(position: Coordinate, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    /// Waiting for the first direction
    Idle,
    Playing,
    /// Ran into itself
    Lost,
    /// Filled the grid
    Won,
}

impl SnakeState {
    /// Lost and Won only leave through a reset
    pub fn is_over(&self) -> bool {
        matches!(self, SnakeState::Lost | SnakeState::Won)
    }
}

/// The player-controlled snake
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<BodyElement>,
    direction: Option<Direction>,
    /// Cells per tick along (x, y)
    velocity: (i32, i32),
    state: SnakeState,
    grid: Grid,
    color: Rgb,
    speed: i32,
    growth: usize,
}

impl Snake {
    /// Create an idle snake with a single segment at the grid center
    pub fn new(config: &GameConfig) -> Self {
        let grid = config.grid();
        let color = config.colors.snake;
        Self {
            body: vec![BodyElement::new(grid.center(), color)],
            direction: None,
            velocity: (0, 0),
            state: SnakeState::Idle,
            grid,
            color,
            speed: config.speed,
            growth: config.growth_per_food,
        }
    }

    /// Build a snake already moving in `direction` with the given segments.
    ///
    /// `segments[0]` becomes the head. An empty slice gives a fresh idle snake.
    pub fn with_body(config: &GameConfig, segments: &[Coordinate], direction: Direction) -> Self {
        let mut snake = Self::new(config);
        if segments.is_empty() {
            return snake;
        }
        snake.body = segments
            .iter()
            .map(|&pos| BodyElement::new(pos, snake.color))
            .collect();
        snake.set_direction(Some(direction));
        snake
    }

    /// Back to a single idle segment at the grid center
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push(BodyElement::new(self.grid.center(), self.color));
        self.direction = None;
        self.velocity = (0, 0);
        self.state = SnakeState::Idle;
    }

    /// Steer the snake. Returns whether the direction was taken.
    ///
    /// Repeats and 180-degree turns are ignored, as is anything after the
    /// game is over. The first direction always starts the game.
    pub fn set_direction(&mut self, direction: Option<Direction>) -> bool {
        let Some(direction) = direction else {
            return false;
        };
        if self.state.is_over() {
            return false;
        }
        if let Some(current) = self.direction {
            if current == direction || current.is_opposite(direction) {
                return false;
            }
        }

        let (dx, dy) = direction.delta();
        self.direction = Some(direction);
        self.velocity = (dx * self.speed, dy * self.speed);
        if self.state == SnakeState::Idle {
            self.state = SnakeState::Playing;
        }
        true
    }

    /// Move one tick: every segment takes its predecessor's cell, then the
    /// head steps forward with wraparound.
    pub fn advance(&mut self) {
        if self.state != SnakeState::Playing {
            return;
        }

        // Tail first so each segment still sees its predecessor's old cell.
        for i in (1..self.body.len()).rev() {
            self.body[i].position = self.body[i - 1].position;
        }
        let (dx, dy) = self.velocity;
        let head = self.grid.step(self.body[0].position, dx, dy);
        self.body[0].position = head;

        if self.collides_with_body(head) {
            self.state = SnakeState::Lost;
        }
    }

    /// Grow if the head sits on `food`.
    ///
    /// New segments stack on the current tail until the next move spreads
    /// them out.
    pub fn eat(&mut self, food: Coordinate) -> bool {
        if self.head() != food {
            return false;
        }
        let tail = BodyElement::new(self.tail(), self.color);
        self.body.extend(std::iter::repeat(tail).take(self.growth));
        true
    }

    /// Whether any segment, head included, occupies `pos`
    pub fn in_body(&self, pos: Coordinate) -> bool {
        self.body.iter().any(|segment| segment.position == pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Coordinate) -> bool {
        self.body[1..].iter().any(|segment| segment.position == pos)
    }

    /// Ends a running game as a win; terminal snakes are left alone.
    pub fn declare_won(&mut self) {
        if !self.state.is_over() {
            self.state = SnakeState::Won;
        }
    }

    pub fn head(&self) -> Coordinate {
        self.body[0].position
    }

    pub fn tail(&self) -> Coordinate {
        self.body[self.body.len() - 1].position
    }

    pub fn body(&self) -> &[BodyElement] {
        &self.body
    }

    pub fn positions(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.body.iter().map(|segment| segment.position)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn velocity(&self) -> (i32, i32) {
        self.velocity
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true; the body always keeps its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(snake: &Snake) -> Vec<Coordinate> {
        snake.positions().collect()
    }

    #[test]
    fn test_new_snake_is_idle_at_center() {
        let snake = Snake::new(&GameConfig::default());
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Coordinate::new(10, 10));
        assert_eq!(snake.state(), SnakeState::Idle);
        assert_eq!(snake.direction(), None);
        assert_eq!(snake.velocity(), (0, 0));
    }

    #[test]
    fn test_idle_snake_does_not_move() {
        let mut snake = Snake::new(&GameConfig::default());
        snake.advance();
        assert_eq!(snake.head(), Coordinate::new(10, 10));
    }

    #[test]
    fn test_first_direction_starts_game() {
        let mut snake = Snake::new(&GameConfig::default());
        assert!(!snake.set_direction(None));
        assert_eq!(snake.state(), SnakeState::Idle);

        assert!(snake.set_direction(Some(Direction::Left)));
        assert_eq!(snake.state(), SnakeState::Playing);
        assert_eq!(snake.velocity(), (-1, 0));
    }

    #[test]
    fn test_direction_vectors() {
        let cases = [
            (Direction::Right, (1, 0)),
            (Direction::Left, (-1, 0)),
            (Direction::Up, (0, -1)),
            (Direction::Down, (0, 1)),
        ];
        for (direction, velocity) in cases {
            let mut snake = Snake::new(&GameConfig::default());
            snake.set_direction(Some(direction));
            assert_eq!(snake.velocity(), velocity);
        }
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut snake = Snake::new(&GameConfig::default());
        snake.set_direction(Some(Direction::Right));

        assert!(!snake.set_direction(Some(Direction::Left)));
        assert_eq!(snake.direction(), Some(Direction::Right));
        assert_eq!(snake.velocity(), (1, 0));

        assert!(!snake.set_direction(Some(Direction::Right)));
        assert!(snake.set_direction(Some(Direction::Up)));
        assert_eq!(snake.velocity(), (0, -1));
    }

    #[test]
    fn test_speed_scales_velocity() {
        let config = GameConfig {
            speed: 2,
            ..GameConfig::small()
        };
        let mut snake = Snake::new(&config);
        snake.set_direction(Some(Direction::Left));
        assert_eq!(snake.velocity(), (-2, 0));

        // 5 -> 3 -> 1 -> wraps to 10 - 2
        snake.advance();
        snake.advance();
        snake.advance();
        assert_eq!(snake.head(), Coordinate::new(8, 5));
    }

    #[test]
    fn test_wraparound_on_move() {
        let config = GameConfig::small();
        let mut snake = Snake::with_body(&config, &[Coordinate::new(9, 5)], Direction::Right);
        snake.advance();
        assert_eq!(snake.head(), Coordinate::new(0, 5));

        let mut snake = Snake::with_body(&config, &[Coordinate::new(0, 5)], Direction::Left);
        snake.advance();
        assert_eq!(snake.head(), Coordinate::new(9, 5));
    }

    #[test]
    fn test_shift_propagates_positions() {
        let config = GameConfig::small();
        let mut snake = Snake::with_body(
            &config,
            &[
                Coordinate::new(5, 5),
                Coordinate::new(4, 5),
                Coordinate::new(3, 5),
            ],
            Direction::Right,
        );
        snake.set_direction(Some(Direction::Down));
        snake.advance();

        assert_eq!(
            coords(&snake),
            vec![
                Coordinate::new(5, 6),
                Coordinate::new(5, 5),
                Coordinate::new(4, 5),
            ]
        );
        assert_eq!(snake.state(), SnakeState::Playing);
    }

    #[test]
    fn test_eat_grows_by_one() {
        let mut snake = Snake::new(&GameConfig::default());
        assert!(!snake.eat(Coordinate::new(0, 0)));
        assert_eq!(snake.len(), 1);

        assert!(snake.eat(Coordinate::new(10, 10)));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_eat_uses_configured_growth() {
        let config = GameConfig {
            growth_per_food: 3,
            ..GameConfig::default()
        };
        let mut snake = Snake::new(&config);
        assert!(snake.eat(snake.head()));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_new_segment_follows_after_next_move() {
        let mut snake = Snake::new(&GameConfig::default());
        snake.set_direction(Some(Direction::Right));
        snake.advance();
        assert!(snake.eat(Coordinate::new(11, 10)));

        snake.advance();
        assert_eq!(
            coords(&snake),
            vec![Coordinate::new(12, 10), Coordinate::new(11, 10)]
        );
        assert_eq!(snake.state(), SnakeState::Playing);
    }

    #[test]
    fn test_self_collision_is_terminal() {
        // Head at (5,5) heading down into a loop whose tail will sit at (5,6)
        // after the shift.
        let config = GameConfig::small();
        let mut snake = Snake::with_body(
            &config,
            &[
                Coordinate::new(5, 5),
                Coordinate::new(4, 5),
                Coordinate::new(4, 6),
                Coordinate::new(5, 6),
                Coordinate::new(6, 6),
            ],
            Direction::Up,
        );
        snake.set_direction(Some(Direction::Right));
        snake.set_direction(Some(Direction::Down));
        snake.advance();

        assert_eq!(snake.head(), Coordinate::new(5, 6));
        assert_eq!(snake.state(), SnakeState::Lost);

        let frozen = coords(&snake);
        snake.advance();
        assert_eq!(coords(&snake), frozen);

        assert!(!snake.set_direction(Some(Direction::Left)));
    }

    #[test]
    fn test_moving_into_old_tail_is_safe() {
        // A 2x2 loop: the tail vacates the cell the head moves into.
        let config = GameConfig::small();
        let mut snake = Snake::with_body(
            &config,
            &[
                Coordinate::new(5, 5),
                Coordinate::new(5, 6),
                Coordinate::new(4, 6),
                Coordinate::new(4, 5),
            ],
            Direction::Up,
        );
        snake.set_direction(Some(Direction::Left));
        snake.advance();

        assert_eq!(snake.head(), Coordinate::new(4, 5));
        assert_eq!(snake.state(), SnakeState::Playing);
    }

    #[test]
    fn test_in_body() {
        let config = GameConfig::small();
        let snake = Snake::with_body(
            &config,
            &[Coordinate::new(5, 5), Coordinate::new(4, 5)],
            Direction::Right,
        );
        assert!(snake.in_body(Coordinate::new(5, 5)));
        assert!(snake.in_body(Coordinate::new(4, 5)));
        assert!(!snake.in_body(Coordinate::new(3, 5)));

        assert!(!snake.collides_with_body(Coordinate::new(5, 5)));
        assert!(snake.collides_with_body(Coordinate::new(4, 5)));
    }

    #[test]
    fn test_reset_from_any_state() {
        let config = GameConfig::small();
        let mut snake = Snake::with_body(
            &config,
            &[Coordinate::new(1, 1), Coordinate::new(1, 2)],
            Direction::Up,
        );
        snake.declare_won();
        assert_eq!(snake.state(), SnakeState::Won);

        snake.reset();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Coordinate::new(5, 5));
        assert_eq!(snake.state(), SnakeState::Idle);
        assert_eq!(snake.direction(), None);
        assert_eq!(snake.velocity(), (0, 0));

        snake.reset();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.state(), SnakeState::Idle);
    }

    #[test]
    fn test_declare_won_from_idle() {
        let config = GameConfig::small();
        let mut snake = Snake::new(&config);
        snake.declare_won();
        assert_eq!(snake.state(), SnakeState::Won);
        assert!(snake.state().is_over());
    }
}
