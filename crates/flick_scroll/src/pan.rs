//! Pan adapter
//!
//! The engine never touches content directly. It reads and writes the
//! content offset through [`Pan`], which also reports the content and
//! viewport sizes the legal offset range is derived from.

use flick_core::{Axis, Point, Size};

/// Uniform access to a scrolled content object
pub trait Pan {
    /// Current content offset
    fn offset(&self) -> Point;

    /// Move the content to `offset`; the engine has already applied policy
    fn set_offset(&mut self, offset: Point);

    fn content_size(&self) -> Size;

    fn viewport_size(&self) -> Size;

    /// Smallest legal offset
    fn min_offset(&self) -> Point {
        Point::ZERO
    }

    /// Largest legal offset, never below [`Pan::min_offset`]
    fn max_offset(&self) -> Point {
        let min = self.min_offset();
        let overflow = self.content_size().overflow(self.viewport_size());
        Point::new(min.x + overflow.x, min.y + overflow.y)
    }
}

/// A plain pan over a content rectangle, with gravity anchoring
///
/// Gravity keeps the view pinned relative to the end of the content when the
/// content grows: `0.0` anchors to the start (nothing moves), `1.0` anchors
/// to the end (the offset follows the growth). A chat log that keeps the
/// latest message in view uses a vertical gravity of `1.0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentPan {
    offset: Point,
    content: Size,
    viewport: Size,
    gravity: Point,
}

impl ContentPan {
    pub fn new(viewport: Size, content: Size) -> Self {
        Self {
            offset: Point::ZERO,
            content,
            viewport,
            gravity: Point::ZERO,
        }
    }

    /// Set gravity per axis, each clamped to `0.0..=1.0`
    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.gravity = Point::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
    }

    pub fn gravity(&self) -> Point {
        self.gravity
    }

    /// Resize the content, shifting the offset by `growth * gravity`
    pub fn set_content_size(&mut self, content: Size) {
        let previous = self.content;
        self.content = content;

        for axis in Axis::BOTH {
            let gravity = self.gravity.along(axis);
            if gravity == 0.0 {
                continue;
            }
            let growth = content.along(axis) - previous.along(axis);
            let shifted = self.offset.along(axis) + growth * gravity;
            self.offset.set_along(axis, shifted);
        }
        self.offset = self.offset.clamp(self.min_offset(), self.max_offset());
        tracing::trace!(
            "content resized {:?} -> {:?}, offset {:?}",
            previous,
            content,
            self.offset
        );
    }

    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport = viewport;
    }
}

impl Pan for ContentPan {
    fn offset(&self) -> Point {
        self.offset
    }

    fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn content_size(&self) -> Size {
        self.content
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_range() {
        let pan = ContentPan::new(Size::new(300.0, 300.0), Size::new(900.0, 300.0));
        assert_eq!(pan.min_offset(), Point::ZERO);
        assert_eq!(pan.max_offset(), Point::new(600.0, 0.0));
    }

    #[test]
    fn test_small_content_has_no_range() {
        let pan = ContentPan::new(Size::new(300.0, 300.0), Size::new(100.0, 50.0));
        assert_eq!(pan.max_offset(), Point::ZERO);
    }

    #[test]
    fn test_gravity_follows_growth() {
        let mut pan = ContentPan::new(Size::new(100.0, 100.0), Size::new(100.0, 400.0));
        pan.set_gravity(0.0, 1.0);
        pan.set_offset(Point::new(0.0, 300.0));

        pan.set_content_size(Size::new(100.0, 450.0));
        assert_eq!(pan.offset(), Point::new(0.0, 350.0));
    }

    #[test]
    fn test_no_gravity_keeps_offset() {
        let mut pan = ContentPan::new(Size::new(100.0, 100.0), Size::new(100.0, 400.0));
        pan.set_offset(Point::new(0.0, 120.0));

        pan.set_content_size(Size::new(100.0, 800.0));
        assert_eq!(pan.offset(), Point::new(0.0, 120.0));
    }

    #[test]
    fn test_shrink_clamps_offset() {
        let mut pan = ContentPan::new(Size::new(100.0, 100.0), Size::new(100.0, 400.0));
        pan.set_offset(Point::new(0.0, 300.0));

        pan.set_content_size(Size::new(100.0, 200.0));
        assert_eq!(pan.offset(), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_gravity_clamped() {
        let mut pan = ContentPan::default();
        pan.set_gravity(-1.0, 4.0);
        assert_eq!(pan.gravity(), Point::new(0.0, 1.0));
    }
}
