//! Geometry primitives
//!
//! Offsets, viewport and content sizes all live in the same logical pixel
//! space. Every type offers per-[`Axis`] accessors so scrolling logic can be
//! written once and applied to both directions.

use std::ops::{Add, Mul, Neg, Sub};

/// A scroll axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`
    #[inline]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Replace the component along `axis`
    #[inline]
    pub fn set_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }

    /// Copy of this point with the component along `axis` replaced
    #[inline]
    pub fn with_along(mut self, axis: Axis, value: f32) -> Self {
        self.set_along(axis, value);
        self
    }

    /// Component-wise clamp between `min` and `max`
    pub fn clamp(self, min: Point, max: Point) -> Point {
        Point::new(
            clamp_lenient(self.x, min.x, max.x),
            clamp_lenient(self.y, min.y, max.y),
        )
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    fn sub(self, rhs: Vec2) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`
    #[inline]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// How far content of this size overflows `viewport`, floored at zero
    pub fn overflow(self, viewport: Size) -> Point {
        Point::new(
            (self.width - viewport.width).max(0.0),
            (self.height - viewport.height).max(0.0),
        )
    }
}

/// A rectangle defined by origin and size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Leading edge along `axis`
    pub fn start(&self, axis: Axis) -> f32 {
        self.origin.along(axis)
    }

    /// Extent along `axis`
    pub fn extent(&self, axis: Axis) -> f32 {
        self.size.along(axis)
    }
}

/// A 2D vector, used for deltas and velocities
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    #[inline]
    pub fn set_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Clamp that tolerates `min > max` by preferring `min`
///
/// Happens when content is smaller than the viewport and the computed
/// maximum falls below the minimum.
#[inline]
pub fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    if value > max {
        max.max(min)
    } else if value < min {
        min
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_floors_at_zero() {
        let viewport = Size::new(300.0, 300.0);
        assert_eq!(Size::new(900.0, 300.0).overflow(viewport), Point::new(600.0, 0.0));
        assert_eq!(Size::new(100.0, 50.0).overflow(viewport), Point::ZERO);
    }

    #[test]
    fn test_axis_access() {
        let mut p = Point::new(1.0, 2.0);
        assert_eq!(p.along(Axis::Horizontal), 1.0);
        assert_eq!(p.along(Axis::Vertical), 2.0);

        p.set_along(Axis::Vertical, 5.0);
        assert_eq!(p, Point::new(1.0, 5.0));
    }

    #[test]
    fn test_point_vector_ops() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, 8.0);
        assert_eq!(a - b, Vec2::new(6.0, 12.0));
        assert_eq!(b + (a - b), a);
        assert_eq!((a - b) * 0.5, Vec2::new(3.0, 6.0));
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_clamp_lenient_inverted_range() {
        assert_eq!(clamp_lenient(50.0, 0.0, -10.0), 0.0);
        assert_eq!(clamp_lenient(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp_lenient(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp_lenient(42.0, 0.0, 100.0), 42.0);
    }

    #[test]
    fn test_rect_axis_access() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.start(Axis::Horizontal), 10.0);
        assert_eq!(rect.start(Axis::Vertical), 20.0);
        assert_eq!(rect.extent(Axis::Vertical), 50.0);
    }
}
