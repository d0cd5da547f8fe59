//! Capped-rate interpolation helpers
//!
//! Both animated quantities in the map UI (screen/popup opacity and the icon
//! shelf offset) move toward a goal by at most a fixed amount per tick and
//! land on the goal exactly, so completion can be detected with `==`.

use serde::{Deserialize, Serialize};

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
///
/// # Example
///
/// ```rust
/// use mapnav::motion::move_towards;
///
/// assert_eq!(move_towards(0.0, 1.0, 0.25), 0.25);
/// assert_eq!(move_towards(0.9, 1.0, 0.25), 1.0);
/// ```
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// A screen-space position in logical pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Vector equivalent of [`move_towards`]: straight-line movement capped
    /// at `max_delta` pixels, snapping onto `target` when within reach.
    pub fn move_towards(self, target: Point, max_delta: f32) -> Point {
        let distance = self.distance(target);
        if distance <= max_delta || distance == 0.0 {
            target
        } else {
            let ratio = max_delta / distance;
            Point::new(
                self.x + (target.x - self.x) * ratio,
                self.y + (target.y - self.y) * ratio,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_towards_never_overshoots() {
        assert_eq!(move_towards(0.95, 1.0, 0.1), 1.0);
        assert_eq!(move_towards(0.05, 0.0, 0.1), 0.0);
    }

    #[test]
    fn test_move_towards_partial_step() {
        let next = move_towards(1.0, 0.0, 0.3);
        assert!((next - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_delta_does_not_move() {
        assert_eq!(move_towards(0.4, 1.0, 0.0), 0.4);
    }

    #[test]
    fn test_point_move_towards_snaps_to_target() {
        let start = Point::new(0.0, 0.0);
        let target = Point::new(-50.0, 0.0);

        let step = start.move_towards(target, 20.0);
        assert_eq!(step, Point::new(-20.0, 0.0));

        let landed = Point::new(-45.0, 0.0).move_towards(target, 20.0);
        assert_eq!(landed, target);
    }
}
