//! Page snap engine
//!
//! Quantizes offsets to page boundaries. A page size comes from a fraction
//! of the viewport, an absolute size, or the content split into a fixed
//! number of pages; a zero page size disables paging on that axis.

use flick_core::{Axis, Size};

/// Paging policy for one axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageAxis {
    /// Page size as a fraction of the viewport, 0 to disable
    pub relative: f32,
    /// Absolute page size in pixels, 0 to disable
    pub size: f32,
    /// Split the content into this many pages, 0 to disable
    pub count: u32,
    /// Most pages a single flick may advance, 0 for unlimited
    pub limit: u32,
}

impl PageAxis {
    pub fn is_enabled(&self) -> bool {
        self.relative > 0.0 || self.size > 0.0
    }

    /// Effective page size in pixels
    pub fn page_size(&self, viewport_extent: f32, content_extent: f32) -> f32 {
        if !self.is_enabled() {
            return 0.0;
        }
        if self.count > 0 && content_extent > 0.0 {
            content_extent / self.count as f32
        } else if self.size > 0.0 {
            self.size
        } else {
            (viewport_extent * self.relative).max(0.0)
        }
    }

    /// Largest flick displacement allowed by the page limit
    pub fn flick_limit(&self, page_size: f32) -> f32 {
        if self.limit == 0 {
            f32::INFINITY
        } else {
            page_size * (self.limit as f32 - 0.5)
        }
    }
}

/// Paging policy for a surface
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageConfig {
    pub horizontal: PageAxis,
    pub vertical: PageAxis,
}

impl PageConfig {
    pub fn axis(&self, axis: Axis) -> &PageAxis {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut PageAxis {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.horizontal.is_enabled() || self.vertical.is_enabled()
    }

    /// Page size per axis for the given geometry
    pub fn page_size(&self, axis: Axis, viewport: Size, content: Size) -> f32 {
        self.axis(axis)
            .page_size(viewport.along(axis), content.along(axis))
    }
}

/// Range an axis may settle in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapBounds {
    pub min: f32,
    pub max: f32,
    pub looping: bool,
}

/// Snap `current + delta` to a page boundary
///
/// `delta` is first limited to `limit` (see [`PageAxis::flick_limit`]), then
/// the result rounds to the nearest page and is clamped to `bounds` unless
/// the axis loops. Backward flicks get one extra pixel of reach so that a
/// limited flick lands below the half-page rounding point. With no page size
/// the result is only clamped.
pub fn snap(current: f32, delta: f32, page_size: f32, limit: f32, bounds: SnapBounds) -> f32 {
    let clamp = |v: f32| {
        if bounds.looping {
            v
        } else {
            flick_core::geometry::clamp_lenient(v, bounds.min, bounds.max)
        }
    };

    if page_size <= 0.0 {
        return clamp(current + delta);
    }

    let delta = delta.clamp(-(limit + 1.0), limit);
    let target = current + delta;
    let snapped = ((target + page_size * 0.5) / page_size).floor() * page_size;
    let result = clamp(snapped);
    tracing::trace!(
        "page snap {} {:+} -> {} (page {})",
        current,
        delta,
        result,
        page_size
    );
    result
}

/// Displacement that biases a snap in the flick direction
///
/// `direction` is the sign of the offset change the flick asks for and
/// `travel` the offset change the drag already made. A flick that reinforces
/// the drag completes the page; a flick against it reaches half a page past
/// the current position so rounding still lands on the neighbouring page.
pub fn flick_bias(direction: f32, travel: f32, page_size: f32) -> f32 {
    if direction > 0.0 {
        if travel > 0.0 {
            (page_size - travel).max(0.0)
        } else {
            page_size * 0.5
        }
    } else if direction < 0.0 {
        if travel < 0.0 {
            -(page_size + travel).max(0.0)
        } else {
            -(page_size * 0.5 + 1.0)
        }
    } else {
        0.0
    }
}

/// Page index containing `offset`, rounding to the nearest page
pub fn page_index(offset: f32, page_size: f32) -> i32 {
    if page_size <= 0.0 {
        return 0;
    }
    ((offset + page_size * 0.5) / page_size).floor() as i32
}

/// Index of the last page for a content extent
pub fn last_page(content_extent: f32, page_size: f32) -> i32 {
    if page_size <= 0.0 {
        return 0;
    }
    ((content_extent / page_size).floor() as i32 - 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: SnapBounds = SnapBounds {
        min: 0.0,
        max: 1000.0,
        looping: false,
    };

    #[test]
    fn test_snap_back_to_lower_page() {
        assert_eq!(snap(130.0, -40.0, 100.0, f32::INFINITY, BOUNDS), 100.0);
        // A tiny flick does not skip a page
        assert_eq!(snap(100.0, -5.0, 100.0, f32::INFINITY, BOUNDS), 100.0);
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap(149.0, 0.0, 100.0, f32::INFINITY, BOUNDS), 100.0);
        assert_eq!(snap(150.0, 0.0, 100.0, f32::INFINITY, BOUNDS), 200.0);
    }

    #[test]
    fn test_snap_respects_limit() {
        let axis = PageAxis {
            relative: 1.0,
            limit: 1,
            ..Default::default()
        };
        let limit = axis.flick_limit(100.0);
        // A huge flick still advances a single page
        assert_eq!(snap(200.0, 5000.0, 100.0, limit, BOUNDS), 300.0);
        assert_eq!(snap(200.0, -5000.0, 100.0, limit, BOUNDS), 100.0);
    }

    #[test]
    fn test_snap_clamped_to_bounds() {
        assert_eq!(snap(990.0, 400.0, 100.0, f32::INFINITY, BOUNDS), 1000.0);
        assert_eq!(snap(10.0, -400.0, 100.0, f32::INFINITY, BOUNDS), 0.0);
    }

    #[test]
    fn test_snap_loop_unclamped() {
        let bounds = SnapBounds {
            looping: true,
            ..BOUNDS
        };
        assert_eq!(snap(990.0, 400.0, 100.0, f32::INFINITY, bounds), 1400.0);
    }

    #[test]
    fn test_zero_page_size_only_clamps() {
        assert_eq!(snap(130.0, -40.0, 0.0, f32::INFINITY, BOUNDS), 90.0);
        assert_eq!(snap(130.0, 2000.0, 0.0, f32::INFINITY, BOUNDS), 1000.0);
    }

    #[test]
    fn test_flick_bias_completes_page() {
        // Dragged 30px toward the next page and flicked on: bias covers the rest
        assert_eq!(flick_bias(1.0, 30.0, 100.0), 70.0);
        assert_eq!(snap(130.0, flick_bias(1.0, 30.0, 100.0), 100.0, 50.0, BOUNDS), 200.0);

        assert_eq!(flick_bias(-1.0, -30.0, 100.0), -70.0);
        assert_eq!(flick_bias(0.0, 30.0, 100.0), 0.0);
    }

    #[test]
    fn test_page_size_sources() {
        let relative = PageAxis {
            relative: 0.5,
            ..Default::default()
        };
        assert_eq!(relative.page_size(300.0, 900.0), 150.0);

        let absolute = PageAxis {
            size: 120.0,
            ..Default::default()
        };
        assert_eq!(absolute.page_size(300.0, 900.0), 120.0);

        let counted = PageAxis {
            relative: 1.0,
            count: 3,
            ..Default::default()
        };
        assert_eq!(counted.page_size(250.0, 900.0), 300.0);

        assert_eq!(PageAxis::default().page_size(300.0, 900.0), 0.0);
    }

    #[test]
    fn test_page_indices() {
        assert_eq!(page_index(0.0, 300.0), 0);
        assert_eq!(page_index(149.0, 300.0), 0);
        assert_eq!(page_index(150.0, 300.0), 1);
        assert_eq!(page_index(600.0, 300.0), 2);
        assert_eq!(last_page(900.0, 300.0), 2);
        assert_eq!(last_page(950.0, 300.0), 2);
        assert_eq!(last_page(100.0, 0.0), 0);
    }
}
