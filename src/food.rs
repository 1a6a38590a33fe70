use std::collections::VecDeque;

use rand::Rng;

use crate::config::GridSize;
use crate::point::Point;

/// Cells kept clear between food and the outer wall.
pub const FOOD_WALL_MARGIN: i32 = 1;

/// Samples a food cell strictly inside the wall margin, avoiding the snake.
///
/// Keeps drawing until a free cell comes up, so the caller must guarantee at
/// least one margin cell is unoccupied.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    head: Point,
    body: &VecDeque<Point>,
) -> Point {
    loop {
        let candidate = Point::new(
            rng.gen_range(FOOD_WALL_MARGIN..i32::from(bounds.width) - FOOD_WALL_MARGIN),
            rng.gen_range(FOOD_WALL_MARGIN..i32::from(bounds.height) - FOOD_WALL_MARGIN),
        );

        if candidate != head && !body.contains(&candidate) {
            return candidate;
        }
    }
}
