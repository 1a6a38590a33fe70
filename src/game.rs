use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::pathfinder::Pilot;
use crate::point::Direction;
use crate::snake::{CollisionError, Snake, StepOutcome};

/// How the snake is steered.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ControlMode {
    /// The built-in route planner picks every step.
    Autopilot,
    /// Buffered keyboard input picks the step; the snake holds course when
    /// no input is pending.
    Manual,
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    BodyCollision,
    /// The planner found no route to the food; no legal strategy remains.
    NoPath,
}

/// One game session: the engine plus the driver state around it.
///
/// All sequencing is single-threaded and tick-driven: plan or reuse, move,
/// settle. Rendering happens strictly between ticks.
#[derive(Debug)]
pub struct Game {
    pub snake: Snake,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub tick_count: u64,
    control: ControlMode,
    pilot: Pilot,
    pending: Option<Direction>,
}

impl Game {
    #[must_use]
    pub fn new(config: &GameConfig, control: ControlMode) -> Self {
        let snake = match config.seed {
            Some(seed) => Snake::new_with_seed(config.grid, config.random_init, seed),
            None => Snake::new(config.grid, config.random_init),
        };

        info!(
            "new game: {}x{} board, head {}, heading {:?}, food {}, {:?} control",
            config.grid.width,
            config.grid.height,
            snake.head(),
            snake.direction(),
            snake.food(),
            control,
        );

        Self {
            snake,
            status: GameStatus::Playing,
            end_reason: None,
            tick_count: 0,
            control,
            pilot: Pilot::new(),
            pending: None,
        }
    }

    /// Advances one tick: choose a direction, step the engine, settle.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.tick_count += 1;

        let direction = match self.control {
            ControlMode::Autopilot => match self.pilot_direction() {
                Some(direction) => direction,
                None => {
                    warn!(
                        "no route from {} to food at {}, ending run",
                        self.snake.head(),
                        self.snake.food(),
                    );
                    self.finish(GameStatus::GameOver, Some(EndReason::NoPath));
                    return;
                }
            },
            ControlMode::Manual => self.pending.take().unwrap_or(self.snake.direction()),
        };

        let outcome = self.snake.advance(direction);

        if outcome == Ok(StepOutcome::Reversed) && self.control == ControlMode::Autopilot {
            // Only happens when the food sat directly behind a fresh snake:
            // the planned step was ignored, so sidestep and replan.
            self.pilot.invalidate();
            let Some(side) = self.open_side() else {
                return;
            };
            debug!("planned step reversed the heading, sidestepping {side:?}");
            let outcome = self.snake.advance(side);
            self.settle(outcome);
            return;
        }

        self.settle(outcome);
    }

    /// Buffers a manual steering input. Ignored under autopilot.
    pub fn steer(&mut self, direction: Direction) {
        if self.control == ControlMode::Manual && self.status == GameStatus::Playing {
            self.pending = Some(direction);
        }
    }

    /// Toggles between playing and paused.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            other => other,
        };
    }

    /// True once the run has ended, by collision, exhaustion, or victory.
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::Victory)
    }

    #[must_use]
    pub fn control(&self) -> ControlMode {
        self.control
    }

    fn pilot_direction(&mut self) -> Option<Direction> {
        if self.pilot.needs_plan() {
            debug!(
                "planning route {} -> {}",
                self.snake.head(),
                self.snake.food()
            );
            let steps = self.pilot.replan(&self.snake);
            if steps == 0 {
                return None;
            }
            debug!("route found, {steps} steps");
        }

        self.pilot.next_step(self.snake.head())
    }

    fn settle(&mut self, outcome: Result<StepOutcome, CollisionError>) {
        match outcome {
            Ok(StepOutcome::Moved | StepOutcome::Reversed) => {}
            Ok(StepOutcome::Ate) => {
                debug!(
                    "food eaten at {}, next food at {}, score {}",
                    self.snake.head(),
                    self.snake.food(),
                    self.snake.score(),
                );
            }
            Ok(StepOutcome::Victory) => {
                info!("board covered, final score {}", self.snake.score());
                self.finish(GameStatus::Victory, None);
            }
            Err(CollisionError::Wall) => {
                info!("wall collision at {}", self.snake.head());
                self.finish(GameStatus::GameOver, Some(EndReason::WallCollision));
            }
            Err(CollisionError::Body) => {
                info!("body collision at {}", self.snake.head());
                self.finish(GameStatus::GameOver, Some(EndReason::BodyCollision));
            }
        }
    }

    fn finish(&mut self, status: GameStatus, reason: Option<EndReason>) {
        self.status = status;
        self.end_reason = reason;
        info!(
            "game over after {} ticks, final score {}",
            self.tick_count,
            self.snake.score(),
        );
    }

    /// Picks an open cell next to the head, avoiding the ignored reversal.
    fn open_side(&self) -> Option<Direction> {
        let blocked = self.snake.direction().opposite();
        Direction::ALL.into_iter().find(|&direction| {
            if direction == blocked {
                return false;
            }
            let target = self.snake.head() + direction.offset();
            target.is_within_bounds(self.snake.bounds()) && !self.snake.occupies(target)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{GameConfig, GridSize};
    use crate::point::{Direction, Point};
    use crate::snake::Snake;

    use super::{ControlMode, EndReason, Game, GameStatus};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 10,
    };

    fn test_config() -> GameConfig {
        GameConfig {
            grid: BOUNDS,
            random_init: false,
            seed: Some(7),
            tick_interval: Duration::from_millis(1),
        }
    }

    fn autopilot_game(snake: Snake) -> Game {
        let mut game = Game::new(&test_config(), ControlMode::Autopilot);
        game.snake = snake;
        game
    }

    #[test]
    fn autopilot_walks_the_shortest_route_to_food() {
        let mut game = autopilot_game(Snake::from_layout(
            BOUNDS,
            Point::new(5, 5),
            Direction::Right,
            vec![],
            Point::new(7, 5),
        ));

        game.tick();
        assert_eq!(game.snake.head(), Point::new(6, 5));
        assert_eq!(game.snake.score(), 1);

        game.tick();
        assert_eq!(game.snake.head(), Point::new(7, 5));
        assert_eq!(game.snake.score(), 2);
        assert_ne!(game.snake.food(), Point::new(7, 5));
        assert_eq!(game.status, GameStatus::Playing);
    }

    #[test]
    fn unreachable_food_ends_the_run_without_a_collision() {
        // Food in the corner, walled off by body cells.
        let mut game = autopilot_game(Snake::from_layout(
            BOUNDS,
            Point::new(5, 5),
            Direction::Right,
            vec![
                Point::new(4, 5),
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
            ],
            Point::new(1, 1),
        ));

        game.tick();

        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(game.end_reason, Some(EndReason::NoPath));
        assert_eq!(game.snake.head(), Point::new(5, 5));
    }

    #[test]
    fn food_directly_behind_a_fresh_snake_is_collected_via_a_sidestep() {
        let mut game = autopilot_game(Snake::from_layout(
            BOUNDS,
            Point::new(5, 5),
            Direction::Right,
            vec![],
            Point::new(4, 5),
        ));

        for _ in 0..3 {
            game.tick();
        }

        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.snake.score(), 2);
        assert_eq!(game.snake.head(), Point::new(4, 5));
    }

    #[test]
    fn manual_steering_buffers_one_direction_per_tick() {
        let mut game = Game::new(&test_config(), ControlMode::Manual);
        game.snake = Snake::from_layout(
            BOUNDS,
            Point::new(5, 5),
            Direction::Right,
            vec![],
            Point::new(8, 8),
        );

        game.tick();
        assert_eq!(game.snake.head(), Point::new(6, 5));

        game.steer(Direction::Down);
        game.tick();
        assert_eq!(game.snake.head(), Point::new(6, 6));

        // No pending input: the snake holds its course.
        game.tick();
        assert_eq!(game.snake.head(), Point::new(6, 7));
    }

    #[test]
    fn manual_reversal_is_a_no_op_tick() {
        let mut game = Game::new(&test_config(), ControlMode::Manual);
        game.snake = Snake::from_layout(
            BOUNDS,
            Point::new(5, 5),
            Direction::Right,
            vec![],
            Point::new(8, 8),
        );

        game.steer(Direction::Left);
        game.tick();

        assert_eq!(game.snake.head(), Point::new(5, 5));
        assert_eq!(game.snake.direction(), Direction::Right);
        assert_eq!(game.status, GameStatus::Playing);
    }

    #[test]
    fn wall_collision_ends_a_manual_run() {
        let mut game = Game::new(&test_config(), ControlMode::Manual);
        game.snake = Snake::from_layout(
            BOUNDS,
            Point::new(9, 5),
            Direction::Right,
            vec![],
            Point::new(2, 2),
        );

        game.tick();

        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(game.end_reason, Some(EndReason::WallCollision));
    }

    #[test]
    fn pause_freezes_ticks() {
        let mut game = Game::new(&test_config(), ControlMode::Autopilot);
        let head = game.snake.head();

        game.toggle_pause();
        game.tick();
        assert_eq!(game.snake.head(), head);
        assert_eq!(game.tick_count, 0);

        game.toggle_pause();
        game.tick();
        assert_eq!(game.tick_count, 1);
    }

    #[test]
    fn finished_games_ignore_pause_and_steering() {
        let mut game = Game::new(&test_config(), ControlMode::Manual);
        game.snake = Snake::from_layout(
            BOUNDS,
            Point::new(9, 5),
            Direction::Right,
            vec![],
            Point::new(2, 2),
        );
        game.tick();
        assert!(game.is_over());

        game.toggle_pause();
        assert_eq!(game.status, GameStatus::GameOver);

        game.steer(Direction::Up);
        game.tick();
        assert_eq!(game.snake.head(), Point::new(10, 5));
    }
}
