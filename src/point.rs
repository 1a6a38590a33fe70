use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::config::GridSize;

/// Grid position in logical cell coordinates.
///
/// A pure value type: component-wise arithmetic, structural equality and
/// hashing. Negative coordinates are representable so that out-of-bounds
/// head positions can be inspected after a wall collision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the point lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Canonical movement directions for snake steps.
///
/// These are the only moves the simulation accepts, so the type itself
/// rules out anything but a cardinal step.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All cardinal directions in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step offset of this direction. Up is negative y; the grid grows
    /// downward, matching terminal row order.
    #[must_use]
    pub const fn offset(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// Maps a unit offset back to a direction.
    #[must_use]
    pub fn from_offset(offset: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }
}

/// Diagonal unit steps, for route planners that search an eight-way grid.
pub const DIAGONAL_OFFSETS: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(1, 1),
];

/// Knight-jump steps, for route planners that allow leaps over cells.
pub const KNIGHT_OFFSETS: [Point; 8] = [
    Point::new(-1, -2),
    Point::new(1, -2),
    Point::new(-2, -1),
    Point::new(2, -1),
    Point::new(-1, 2),
    Point::new(1, 2),
    Point::new(-2, 1),
    Point::new(2, 1),
];

#[cfg(test)]
mod tests {
    use crate::config::GridSize;

    use super::{Direction, Point};

    #[test]
    fn point_arithmetic_is_component_wise() {
        let a = Point::new(3, -1);
        let b = Point::new(1, 4);

        assert_eq!(a + b, Point::new(4, 3));
        assert_eq!(a - b, Point::new(2, -5));
        assert_eq!(-a, Point::new(-3, 1));
        assert_eq!(a * 3, Point::new(9, -3));
    }

    #[test]
    fn point_equality_is_structural() {
        assert_eq!(Point::new(2, 7), Point::new(2, 7));
        assert_ne!(Point::new(2, 7), Point::new(7, 2));
    }

    #[test]
    fn bounds_check_covers_all_edges() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert!(Point::new(0, 0).is_within_bounds(bounds));
        assert!(Point::new(9, 7).is_within_bounds(bounds));
        assert!(!Point::new(-1, 3).is_within_bounds(bounds));
        assert!(!Point::new(10, 3).is_within_bounds(bounds));
        assert!(!Point::new(4, -1).is_within_bounds(bounds));
        assert!(!Point::new(4, 8).is_within_bounds(bounds));
    }

    #[test]
    fn opposite_negates_the_offset() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().offset(), -direction.offset());
        }
    }

    #[test]
    fn offsets_round_trip_through_from_offset() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_offset(direction.offset()), Some(direction));
        }
        assert_eq!(Direction::from_offset(Point::new(1, 1)), None);
    }
}
