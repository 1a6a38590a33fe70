use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::GridSize;
use crate::point::{Direction, Point};
use crate::snake::Snake;

/// Neighbor expansion order. Fixed so equally short routes resolve the same
/// way on every run.
const SEARCH_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// A precomputed route to food.
///
/// Maps each cell on the route (goal excluded) to the direction that
/// advances toward the goal. Consumed one entry per tick; while entries
/// remain, following them from the current head reaches the goal without
/// revisiting a consumed cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: HashMap<Point, Direction>,
}

impl Plan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Removes and returns the step for `head`.
    pub fn take_step(&mut self, head: Point) -> Option<Direction> {
        self.steps.remove(&head)
    }

    /// Returns the step for `cell` without consuming it.
    #[must_use]
    pub fn step_at(&self, cell: Point) -> Option<Direction> {
        self.steps.get(&cell).copied()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

/// Breadth-first shortest route from `start` to `goal` over free cells.
///
/// Searches the 4-neighborhood restricted to in-bounds cells outside
/// `obstacles`; `start` is the origin and `goal` is reachable even when
/// listed as an obstacle. Returns an empty plan when no route exists, which
/// the caller must treat as a terminal condition rather than retrying.
#[must_use]
pub fn find_path(
    start: Point,
    goal: Point,
    obstacles: &HashSet<Point>,
    bounds: GridSize,
) -> Plan {
    if start == goal {
        return Plan::default();
    }

    let mut came_from: HashMap<Point, (Point, Direction)> = HashMap::new();
    let mut visited: HashSet<Point> = HashSet::new();
    let mut frontier: VecDeque<Point> = VecDeque::new();

    visited.insert(start);
    frontier.push_back(start);

    'search: while let Some(cell) = frontier.pop_front() {
        for direction in SEARCH_ORDER {
            let next = cell + direction.offset();

            if !next.is_within_bounds(bounds)
                || visited.contains(&next)
                || (obstacles.contains(&next) && next != goal)
            {
                continue;
            }

            visited.insert(next);
            came_from.insert(next, (cell, direction));

            if next == goal {
                break 'search;
            }
            frontier.push_back(next);
        }
    }

    if !came_from.contains_key(&goal) {
        return Plan::default();
    }

    // Walk parent links back from the goal, recording for each cell the
    // direction that leaves it.
    let mut steps = HashMap::new();
    let mut cursor = goal;
    while cursor != start {
        let (previous, direction) = came_from[&cursor];
        steps.insert(previous, direction);
        cursor = previous;
    }

    Plan { steps }
}

/// Plans routes to food and hands the driver one step per tick.
///
/// The cached plan is reused across ticks until drained, even though the
/// body shifts under it; a drained plan triggers a fresh search from the
/// engine's current read-only state.
#[derive(Debug, Default)]
pub struct Pilot {
    plan: Plan,
}

impl Pilot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the cached plan is drained and a new search is needed.
    #[must_use]
    pub fn needs_plan(&self) -> bool {
        self.plan.is_empty()
    }

    /// Recomputes the route from the snake's current state.
    ///
    /// Returns the number of steps in the new plan; zero means the food is
    /// unreachable and no legal strategy remains.
    pub fn replan(&mut self, snake: &Snake) -> usize {
        let mut obstacles: HashSet<Point> = snake.segments().copied().collect();

        // The engine ignores a step that reverses the current direction.
        // With no body, the cell behind the head is open to the search, so
        // block it to keep the route free of ignored steps. The food itself
        // stays reachable; the driver sidesteps that one case.
        if snake.length() == 1 {
            let behind = snake.head() + snake.direction().opposite().offset();
            if behind != snake.food() {
                obstacles.insert(behind);
            }
        }

        self.plan = find_path(snake.head(), snake.food(), &obstacles, snake.bounds());
        self.plan.len()
    }

    /// Consumes and returns the planned step for the current head cell.
    pub fn next_step(&mut self, head: Point) -> Option<Direction> {
        self.plan.take_step(head)
    }

    /// Drops the cached plan so the next tick searches from scratch.
    pub fn invalidate(&mut self) {
        self.plan.clear();
    }
}
