use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::GridSize;
use crate::food;
use crate::point::{Direction, Point};

/// Terminal collision raised by a movement step.
///
/// Both variants end the game; the engine makes no attempt to recover and
/// the caller must stop issuing moves.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum CollisionError {
    #[error("snake head left the board")]
    Wall,
    #[error("snake head ran into its own body")]
    Body,
}

/// What a successful movement step did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Advanced one cell without eating.
    Moved,
    /// Ate the food and grew; a replacement food has been placed.
    Ate,
    /// Ate the food and now covers every cell of the board.
    Victory,
    /// The step reversed the current direction and was ignored; nothing
    /// changed this tick.
    Reversed,
}

/// Mutable snake, food, and score state for one game.
///
/// Constructed once per run and mutated only through [`Snake::advance`];
/// after a collision it is discarded, never reset in place.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Point,
    /// Trailing cells from most recently vacated to oldest. Never contains
    /// the head.
    body: VecDeque<Point>,
    /// Cell popped off the back by the last non-growing step, `None` right
    /// after a food pickup. Closes the one-tick detection gap when the head
    /// re-enters the cell the tail just left.
    tail: Option<Point>,
    direction: Direction,
    food: Point,
    score: u32,
    bounds: GridSize,
    rng: StdRng,
}

impl Snake {
    /// Creates a snake with an entropy-seeded RNG.
    #[must_use]
    pub fn new(bounds: GridSize, random_init: bool) -> Self {
        Self::with_rng(bounds, random_init, StdRng::from_entropy())
    }

    /// Creates a deterministic snake for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, random_init: bool, seed: u64) -> Self {
        Self::with_rng(bounds, random_init, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, random_init: bool, mut rng: StdRng) -> Self {
        let (head, direction) = if random_init {
            let head = Point::new(
                rng.gen_range(0..i32::from(bounds.width)),
                rng.gen_range(0..i32::from(bounds.height)),
            );
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            (head, direction)
        } else {
            let center = Point::new(i32::from(bounds.width) / 2, i32::from(bounds.height) / 2);
            (center, Direction::Right)
        };

        let body = VecDeque::new();
        let food = food::place_food(&mut rng, bounds, head, &body);

        Self {
            head,
            body,
            tail: None,
            direction,
            food,
            score: 1,
            bounds,
            rng,
        }
    }

    /// Builds an explicit state for tests and scripted scenarios.
    ///
    /// `body` is ordered front (most recently vacated) to back (oldest).
    #[must_use]
    pub fn from_layout(
        bounds: GridSize,
        head: Point,
        direction: Direction,
        body: Vec<Point>,
        food: Point,
    ) -> Self {
        let body = VecDeque::from(body);
        let score = u32::try_from(body.len()).unwrap_or(u32::MAX).saturating_add(1);

        Self {
            head,
            body,
            tail: None,
            direction,
            food,
            score,
            bounds,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Applies one movement step.
    ///
    /// A step that exactly reverses the current direction is ignored:
    /// geometry and direction stay untouched and the tick reports
    /// [`StepOutcome::Reversed`]. Collisions leave the state mutated up to
    /// the point of detection; the game is over either way.
    pub fn advance(&mut self, direction: Direction) -> Result<StepOutcome, CollisionError> {
        if direction == self.direction.opposite() {
            return Ok(StepOutcome::Reversed);
        }

        self.direction = direction;
        self.body.push_front(self.head);
        self.head = self.head + direction.offset();

        if !self.head.is_within_bounds(self.bounds) {
            return Err(CollisionError::Wall);
        }

        let outcome = if self.head == self.food {
            self.score += 1;
            self.tail = None;

            if self.body.len() + 1 == self.bounds.total_cells() {
                return Ok(StepOutcome::Victory);
            }

            self.food = food::place_food(&mut self.rng, self.bounds, self.head, &self.body);
            StepOutcome::Ate
        } else {
            self.tail = self.body.pop_back();
            StepOutcome::Moved
        };

        if self.body.contains(&self.head) || self.tail == Some(self.head) {
            return Err(CollisionError::Body);
        }

        Ok(outcome)
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Point {
        self.head
    }

    /// Iterates over trailing cells from most recently vacated to oldest.
    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// Returns the cell vacated by the last non-growing step.
    #[must_use]
    pub fn tail(&self) -> Option<Point> {
        self.tail
    }

    /// Returns the last applied direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the current food cell.
    #[must_use]
    pub fn food(&self) -> Point {
        self.food
    }

    /// Returns the score: total cells ever added to the snake.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the board dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Returns the number of cells the snake covers, head included.
    #[must_use]
    pub fn length(&self) -> usize {
        self.body.len() + 1
    }

    /// Returns true if the head or any body segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Point) -> bool {
        self.head == cell || self.body.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::point::{Direction, Point};

    use super::{CollisionError, Snake, StepOutcome};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 10,
    };

    fn snake_at(head: Point, direction: Direction, body: Vec<Point>) -> Snake {
        Snake::from_layout(BOUNDS, head, direction, body, Point::new(8, 8))
    }

    #[test]
    fn fixed_start_is_centered_facing_right() {
        let snake = Snake::new_with_seed(BOUNDS, false, 1);

        assert_eq!(snake.head(), Point::new(5, 5));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.score(), 1);
        assert_eq!(snake.tail(), None);
    }

    #[test]
    fn random_start_is_in_bounds() {
        for seed in 0..50 {
            let snake = Snake::new_with_seed(BOUNDS, true, seed);
            assert!(snake.head().is_within_bounds(BOUNDS));
        }
    }

    #[test]
    fn step_moves_one_cell_and_tracks_the_vacated_tail() {
        let mut snake = snake_at(Point::new(4, 4), Direction::Right, vec![]);

        let outcome = snake.advance(Direction::Right);

        assert_eq!(outcome, Ok(StepOutcome::Moved));
        assert_eq!(snake.head(), Point::new(5, 4));
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.tail(), Some(Point::new(4, 4)));
    }

    #[test]
    fn reversal_is_ignored_without_touching_state() {
        for direction in Direction::ALL {
            let mut snake = snake_at(Point::new(4, 4), direction, vec![Point::new(5, 4)]);

            let outcome = snake.advance(direction.opposite());

            assert_eq!(outcome, Ok(StepOutcome::Reversed));
            assert_eq!(snake.head(), Point::new(4, 4));
            assert_eq!(snake.direction(), direction);
            assert_eq!(snake.segments().count(), 1);
        }
    }

    #[test]
    fn wall_collision_is_raised_on_every_edge() {
        let cases = [
            (Point::new(0, 4), Direction::Left),
            (Point::new(9, 4), Direction::Right),
            (Point::new(4, 0), Direction::Up),
            (Point::new(4, 9), Direction::Down),
        ];

        for (head, direction) in cases {
            let mut snake = snake_at(head, direction, vec![]);
            assert_eq!(snake.advance(direction), Err(CollisionError::Wall));
        }
    }

    #[test]
    fn eating_grows_the_body_and_bumps_the_score() {
        let mut snake = Snake::from_layout(
            BOUNDS,
            Point::new(4, 4),
            Direction::Right,
            vec![],
            Point::new(5, 4),
        );

        let outcome = snake.advance(Direction::Right);

        assert_eq!(outcome, Ok(StepOutcome::Ate));
        assert_eq!(snake.score(), 2);
        assert_eq!(snake.length(), 2);
        assert_eq!(snake.tail(), None);
        assert_ne!(snake.food(), snake.head());
        assert!(!snake.segments().any(|s| *s == snake.food()));
    }

    #[test]
    fn score_tracks_length_except_at_pickup() {
        let mut snake = Snake::from_layout(
            BOUNDS,
            Point::new(2, 2),
            Direction::Right,
            vec![],
            Point::new(5, 2),
        );

        assert_eq!(snake.score(), 1);
        assert_eq!(snake.length(), 1);

        snake.advance(Direction::Right).expect("open row");
        snake.advance(Direction::Right).expect("open row");
        assert_eq!(snake.score(), 1);
        assert_eq!(snake.length(), 1);

        snake.advance(Direction::Right).expect("open row");
        assert_eq!(snake.score(), 2);
        assert_eq!(snake.length(), 2);
    }

    #[test]
    fn head_entering_a_body_cell_collides() {
        let mut snake = snake_at(
            Point::new(1, 1),
            Direction::Up,
            vec![
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(3, 1),
            ],
        );

        assert_eq!(snake.advance(Direction::Right), Err(CollisionError::Body));
    }

    #[test]
    fn head_entering_the_just_vacated_tail_cell_collides() {
        // The back cell (2, 1) pops this tick; stepping onto it must still
        // count as a body hit.
        let mut snake = snake_at(
            Point::new(1, 1),
            Direction::Up,
            vec![Point::new(1, 2), Point::new(2, 2), Point::new(2, 1)],
        );

        assert_eq!(snake.advance(Direction::Right), Err(CollisionError::Body));
    }

    #[test]
    fn covering_the_board_reports_victory_without_placing_food() {
        let bounds = GridSize {
            width: 4,
            height: 4,
        };
        // 15 cells of snake on a 16-cell board, food on the last free cell.
        let mut snake = Snake::from_layout(
            bounds,
            Point::new(2, 1),
            Direction::Left,
            vec![
                Point::new(3, 1),
                Point::new(3, 0),
                Point::new(2, 0),
                Point::new(1, 0),
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(3, 2),
                Point::new(3, 3),
                Point::new(2, 3),
                Point::new(1, 3),
                Point::new(0, 3),
            ],
            Point::new(1, 1),
        );

        assert_eq!(snake.advance(Direction::Left), Ok(StepOutcome::Victory));
        assert_eq!(snake.length(), 16);
    }
}
