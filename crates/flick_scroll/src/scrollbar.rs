//! Scrollbar sync
//!
//! Maps offsets to normalized indicator values and back, and decides whether
//! an indicator is shown and how large its thumb is.

use flick_core::{Axis, Point, Size};
use smallvec::SmallVec;

/// Indicator visibility policy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollbarPolicy {
    /// Shown only when the content overflows the viewport
    #[default]
    Auto,
    /// Always shown
    On,
    /// Never shown
    Off,
}

/// Offset to indicator value in `0.0..=1.0`
pub fn indicator_value(offset: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range <= 0.0 {
        return 0.0;
    }
    ((offset - min) / range).clamp(0.0, 1.0)
}

/// Indicator value back to an offset
pub fn offset_for_value(value: f32, min: f32, max: f32) -> f32 {
    let range = (max - min).max(0.0);
    value.clamp(0.0, 1.0) * range + min
}

/// Thumb size as a fraction of the track
pub fn indicator_size(viewport_extent: f32, content_extent: f32) -> f32 {
    if content_extent <= 0.0 {
        return 1.0;
    }
    (viewport_extent / content_extent).clamp(0.0, 1.0)
}

pub fn indicator_visible(
    policy: ScrollbarPolicy,
    viewport_extent: f32,
    content_extent: f32,
) -> bool {
    match policy {
        ScrollbarPolicy::On => true,
        ScrollbarPolicy::Off => false,
        ScrollbarPolicy::Auto => content_extent > viewport_extent,
    }
}

/// Indicator state for one axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Indicator {
    pub policy: ScrollbarPolicy,
    pub visible: bool,
    pub value: f32,
    pub size: f32,
    /// The user is dragging this indicator
    pub dragging: bool,
}

/// Both indicators of a surface
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scrollbars {
    pub horizontal: Indicator,
    pub vertical: Indicator,
}

impl Scrollbars {
    pub fn axis(&self, axis: Axis) -> &Indicator {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut Indicator {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Recompute values, sizes and visibility
    ///
    /// Returns the axes whose visibility flipped, with the new state.
    pub fn sync(
        &mut self,
        offset: Point,
        min: Point,
        max: Point,
        viewport: Size,
        content: Size,
    ) -> SmallVec<[(Axis, bool); 2]> {
        let mut changed = SmallVec::new();
        for axis in Axis::BOTH {
            let indicator = self.axis_mut(axis);
            indicator.value = indicator_value(offset.along(axis), min.along(axis), max.along(axis));
            indicator.size = indicator_size(viewport.along(axis), content.along(axis));

            let visible =
                indicator_visible(indicator.policy, viewport.along(axis), content.along(axis));
            if visible != indicator.visible {
                indicator.visible = visible;
                changed.push((axis, visible));
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_mapping() {
        assert_eq!(indicator_value(0.0, 0.0, 600.0), 0.0);
        assert_eq!(indicator_value(300.0, 0.0, 600.0), 0.5);
        assert_eq!(indicator_value(600.0, 0.0, 600.0), 1.0);
        // Overscroll pins the indicator to its ends
        assert_eq!(indicator_value(650.0, 0.0, 600.0), 1.0);
        assert_eq!(indicator_value(-20.0, 0.0, 600.0), 0.0);
    }

    #[test]
    fn test_value_without_range() {
        assert_eq!(indicator_value(0.0, 0.0, 0.0), 0.0);
        assert_eq!(offset_for_value(0.7, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_round_trip() {
        for i in 0..=20 {
            let value = i as f32 / 20.0;
            let offset = offset_for_value(value, 0.0, 600.0);
            assert!((indicator_value(offset, 0.0, 600.0) - value).abs() < 1e-6);

            let offset = offset_for_value(value, 40.0, 640.0);
            assert!((indicator_value(offset, 40.0, 640.0) - value).abs() < 1e-6);
        }
    }

    #[test]
    fn test_thumb_size() {
        assert_eq!(indicator_size(300.0, 900.0), 300.0 / 900.0);
        assert_eq!(indicator_size(300.0, 100.0), 1.0);
        assert_eq!(indicator_size(300.0, 0.0), 1.0);
    }

    #[test]
    fn test_visibility_policy() {
        assert!(indicator_visible(ScrollbarPolicy::Auto, 300.0, 900.0));
        assert!(!indicator_visible(ScrollbarPolicy::Auto, 300.0, 300.0));
        assert!(indicator_visible(ScrollbarPolicy::On, 300.0, 100.0));
        assert!(!indicator_visible(ScrollbarPolicy::Off, 300.0, 900.0));
    }

    #[test]
    fn test_sync_reports_flips_once() {
        let mut bars = Scrollbars::default();
        let viewport = Size::new(300.0, 300.0);
        let content = Size::new(900.0, 300.0);
        let max = Point::new(600.0, 0.0);

        let changed = bars.sync(Point::new(150.0, 0.0), Point::ZERO, max, viewport, content);
        assert_eq!(changed.as_slice(), &[(Axis::Horizontal, true)]);
        assert_eq!(bars.horizontal.value, 0.25);
        assert!(!bars.vertical.visible);

        let changed = bars.sync(Point::new(300.0, 0.0), Point::ZERO, max, viewport, content);
        assert!(changed.is_empty());
    }
}
