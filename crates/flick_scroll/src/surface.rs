//! Scroll surface
//!
//! [`ScrollSurface`] owns the scroll state of one viewport/content pairing.
//! Input handlers live in `input.rs` and per-frame animation in
//! `animate.rs`; this file holds the state, the host-facing API, and the
//! single offset entry point every movement goes through.

use std::cell::Cell;

use flick_animation::{AnimatorHandle, AnimatorSet};
use flick_core::geometry::clamp_lenient;
use flick_core::{Axis, Point, Rect, Size};
use smallvec::SmallVec;

use crate::bounce::BounceAnimator;
use crate::config::ScrollConfig;
use crate::context::ScrollContext;
use crate::error::{Result, ScrollError};
use crate::gesture::{GestureSession, MovementBlock, SingleDirection};
use crate::listener::{ScrollEvent, ScrollListener};
use crate::momentum::{FlickMemory, MomentumAnimator};
use crate::paging::{self, PageConfig, SnapBounds};
use crate::pan::Pan;
use crate::scroll_to::ScrollToAnimator;
use crate::scrollbar::{ScrollbarPolicy, Scrollbars};
use crate::velocity::VelocityEstimator;

// ============================================================================
// Animator bookkeeping
// ============================================================================

/// Kinds of animator a surface can run, one live handle each
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatorKind {
    Momentum,
    BounceX,
    BounceY,
    ScrollToX,
    ScrollToY,
}

impl AnimatorKind {
    /// Every kind, in per-frame tick order
    pub const ALL: [AnimatorKind; 5] = [
        AnimatorKind::Momentum,
        AnimatorKind::BounceX,
        AnimatorKind::BounceY,
        AnimatorKind::ScrollToX,
        AnimatorKind::ScrollToY,
    ];

    pub fn bounce(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => AnimatorKind::BounceX,
            Axis::Vertical => AnimatorKind::BounceY,
        }
    }

    pub fn scroll_to(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => AnimatorKind::ScrollToX,
            Axis::Vertical => AnimatorKind::ScrollToY,
        }
    }

    /// Axis this kind is bound to, `None` for momentum
    pub fn axis(self) -> Option<Axis> {
        match self {
            AnimatorKind::Momentum => None,
            AnimatorKind::BounceX | AnimatorKind::ScrollToX => Some(Axis::Horizontal),
            AnimatorKind::BounceY | AnimatorKind::ScrollToY => Some(Axis::Vertical),
        }
    }
}

/// State of one running animator
#[derive(Clone, Copy, Debug)]
pub enum AnimatorState {
    Momentum(MomentumAnimator),
    Bounce(BounceAnimator),
    ScrollTo(ScrollToAnimator),
}

impl AnimatorState {
    pub(crate) fn delay(&mut self, by: f64) {
        match self {
            AnimatorState::Momentum(m) => m.delay(by),
            AnimatorState::Bounce(b) => b.delay(by),
            AnimatorState::ScrollTo(s) => s.delay(by),
        }
    }
}

// ============================================================================
// State
// ============================================================================

/// Per-surface scroll state
#[derive(Default)]
pub struct ScrollState {
    pub(crate) loop_h: bool,
    pub(crate) loop_v: bool,
    pub(crate) bounce_h: bool,
    pub(crate) bounce_v: bool,
    pub(crate) single_direction: SingleDirection,
    pub(crate) block: MovementBlock,
    pub(crate) paging: PageConfig,
    pub(crate) hold: bool,
    pub(crate) hold_since: Option<f64>,
    pub(crate) freeze: bool,
    pub(crate) momentum_disabled: bool,
    /// Out-of-range offsets jump back instead of animating
    pub(crate) bounce_animator_disabled: bool,
    pub(crate) wheel_disabled: bool,
    /// Per-surface wheel step, overriding `ScrollConfig::wheel_step`
    pub(crate) step: Option<[f32; 2]>,
    /// Whether release velocity biases the page snap
    pub(crate) page_flick: bool,
    pub(crate) animators: AnimatorSet<AnimatorKind, AnimatorState>,
    pub(crate) scrollbars: Scrollbars,
    /// Whether `AnimateStart` was the last animation notification sent
    pub(crate) animating: bool,
    pub(crate) page: (i32, i32),
    pub(crate) indicator_drag: Option<Axis>,
}

/// Legal offset range and sizes, read from the pan once per operation
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bounds {
    pub min: Point,
    pub max: Point,
    pub viewport: Size,
    pub content: Size,
}

/// A scrollable viewport driven by pointer input and frame ticks
///
/// # Example
///
/// ```rust
/// use flick_core::{PointerEvent, Size};
/// use flick_scroll::{ContentPan, ScrollConfig, ScrollEvent, ScrollSurface};
///
/// let pan = ContentPan::new(Size::new(300.0, 300.0), Size::new(900.0, 300.0));
/// let mut surface = ScrollSurface::new(pan, ScrollConfig::default(), Vec::<ScrollEvent>::new());
///
/// surface.on_pointer_down(&mut PointerEvent::new(250.0, 150.0, 0.0));
/// surface.on_pointer_move(&mut PointerEvent::new(150.0, 150.0, 0.016));
/// surface.on_pointer_up(&mut PointerEvent::new(150.0, 150.0, 0.5));
///
/// assert_eq!(surface.offset().x, 100.0);
/// ```
pub struct ScrollSurface<P, L = ()> {
    pub(crate) config: ScrollConfig,
    pub(crate) pan: Option<P>,
    pub(crate) listener: L,
    pub(crate) state: ScrollState,
    pub(crate) gesture: Option<GestureSession>,
    pub(crate) estimator: VelocityEstimator,
    pub(crate) flicks: FlickMemory,
    pub(crate) context: ScrollContext,
    /// Latest timestamp seen from input or ticks
    pub(crate) now: f64,
    pending: SmallVec<[ScrollEvent; 8]>,
    missing_pan_logged: Cell<bool>,
}

impl<P: Pan, L: ScrollListener> ScrollSurface<P, L> {
    pub fn new(pan: P, config: ScrollConfig, listener: L) -> Self {
        let mut surface = Self::without_pan(config, listener);
        surface.pan = Some(pan);
        surface.sync_geometry();
        surface
    }

    /// A surface with no content yet; everything is a no-op until
    /// [`attach_pan`](Self::attach_pan)
    pub fn without_pan(config: ScrollConfig, listener: L) -> Self {
        let config = config.sanitized();
        Self {
            estimator: VelocityEstimator::new(&config),
            config,
            pan: None,
            listener,
            state: ScrollState {
                bounce_h: true,
                bounce_v: true,
                page_flick: true,
                ..Default::default()
            },
            gesture: None,
            flicks: FlickMemory::default(),
            context: ScrollContext::root(),
            now: 0.0,
            pending: SmallVec::new(),
            missing_pan_logged: Cell::new(false),
        }
    }

    /// Place this surface inside a nested scroller hierarchy
    pub fn with_context(mut self, context: ScrollContext) -> Self {
        self.context = context;
        self
    }

    pub fn attach_pan(&mut self, pan: P) {
        self.pan = Some(pan);
        self.missing_pan_logged.set(false);
        self.sync_geometry();
    }

    pub fn detach_pan(&mut self) -> Option<P> {
        self.cancel_animators();
        self.finish_call();
        self.pan.take()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn pan(&self) -> Option<&P> {
        self.pan.as_ref()
    }

    /// Mutable pan access; call [`sync_geometry`](Self::sync_geometry)
    /// after resizing content or viewport through it
    pub fn pan_mut(&mut self) -> Option<&mut P> {
        self.pan.as_mut()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn context(&self) -> &ScrollContext {
        &self.context
    }

    /// Current offset, zero without a pan
    pub fn offset(&self) -> Point {
        self.pan.as_ref().map(|p| p.offset()).unwrap_or(Point::ZERO)
    }

    pub fn try_offset(&self) -> Result<Point> {
        self.pan
            .as_ref()
            .map(|p| p.offset())
            .ok_or(ScrollError::MissingPan)
    }

    pub fn min_offset(&self) -> Point {
        self.pan.as_ref().map(|p| p.min_offset()).unwrap_or(Point::ZERO)
    }

    pub fn max_offset(&self) -> Point {
        self.bounds().map(|b| b.max).unwrap_or(Point::ZERO)
    }

    pub fn content_size(&self) -> Size {
        self.pan.as_ref().map(|p| p.content_size()).unwrap_or(Size::ZERO)
    }

    pub fn viewport_size(&self) -> Size {
        self.pan.as_ref().map(|p| p.viewport_size()).unwrap_or(Size::ZERO)
    }

    pub fn scrollbars(&self) -> &Scrollbars {
        &self.state.scrollbars
    }

    pub fn paging(&self) -> &PageConfig {
        &self.state.paging
    }

    pub fn is_looping(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.state.loop_h,
            Axis::Vertical => self.state.loop_v,
        }
    }

    /// Whether `axis` may currently overscroll and bounce back
    pub fn is_bounce_allowed(&self, axis: Axis) -> bool {
        let per_axis = match axis {
            Axis::Horizontal => self.state.bounce_h,
            Axis::Vertical => self.state.bounce_v,
        };
        self.config.bounce_enabled && per_axis && !self.is_looping(axis)
    }

    pub fn single_direction(&self) -> SingleDirection {
        self.state.single_direction
    }

    pub fn movement_block(&self) -> MovementBlock {
        self.state.block
    }

    pub fn is_held(&self) -> bool {
        self.state.hold
    }

    pub fn is_frozen(&self) -> bool {
        self.state.freeze
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.as_ref().map(|g| g.is_dragging()).unwrap_or(false)
            || self.state.indicator_drag.is_some()
    }

    pub fn is_animating(&self) -> bool {
        !self.state.animators.is_empty()
    }

    /// Animators currently running
    pub fn active_animators(&self) -> impl Iterator<Item = AnimatorKind> + '_ {
        self.state.animators.kinds()
    }

    pub fn animator_handle(&self, kind: AnimatorKind) -> Option<AnimatorHandle> {
        self.state.animators.handle(kind)
    }

    pub fn is_momentum_disabled(&self) -> bool {
        self.state.momentum_disabled
    }

    pub fn is_bounce_animator_disabled(&self) -> bool {
        self.state.bounce_animator_disabled
    }

    pub fn is_wheel_disabled(&self) -> bool {
        self.state.wheel_disabled
    }

    /// Wheel step per notch, `[horizontal, vertical]`
    pub fn step_size(&self) -> [f32; 2] {
        self.state.step.unwrap_or(self.config.wheel_step)
    }

    pub fn is_page_flick(&self) -> bool {
        self.state.page_flick
    }

    // ========================================================================
    // Host API
    // ========================================================================

    /// Move to `(x, y)`, immediately or through the scroll-to animator
    ///
    /// While held or frozen an out-of-range offset is kept as is; the bounce
    /// back starts when the hold or freeze is lifted.
    pub fn set_offset(&mut self, x: f32, y: f32, animate: bool) {
        if animate {
            let duration = self.config.bring_in_scroll_friction;
            self.scroll_to_axis(Axis::Horizontal, duration, x);
            self.scroll_to_axis(Axis::Vertical, duration, y);
        } else {
            self.cancel_animators();
            self.flicks.forget();
            self.commit_offset(Point::new(x, y));
        }
        self.finish_call();
    }

    /// Jump so that `region` is visible, with the smallest movement
    pub fn show_region(&mut self, region: Rect) {
        self.cancel_animators();
        if let Some(target) = self.region_target(region) {
            self.commit_offset(target);
        }
        self.finish_call();
    }

    /// Animate so that `region` becomes visible, with the smallest movement
    pub fn bring_region_into_view(&mut self, region: Rect) {
        self.cancel_animators();
        if let Some(target) = self.region_target(region) {
            let duration = self.config.bring_in_scroll_friction;
            self.scroll_to_axis(Axis::Horizontal, duration, target.x);
            self.scroll_to_axis(Axis::Vertical, duration, target.y);
        }
        self.finish_call();
    }

    /// Configure paging: relative page size (fraction of the viewport) and
    /// absolute page size per axis; zero disables that source
    pub fn set_paging(&mut self, rel_h: f32, rel_v: f32, size_h: f32, size_v: f32) {
        let sane = |name: &str, v: f32| {
            if v.is_finite() && v >= 0.0 {
                v
            } else {
                tracing::debug!("paging {} {} out of range, disabled", name, v);
                0.0
            }
        };
        let paging = &mut self.state.paging;
        paging.horizontal.relative = sane("rel_h", rel_h);
        paging.vertical.relative = sane("rel_v", rel_v);
        paging.horizontal.size = sane("size_h", size_h);
        paging.vertical.size = sane("size_v", size_v);
        self.state.page = self.current_page();
        self.finish_call();
    }

    /// Split the content into a fixed number of pages, 0 to disable
    pub fn set_page_count(&mut self, h: u32, v: u32) {
        self.state.paging.horizontal.count = h;
        self.state.paging.vertical.count = v;
        self.state.page = self.current_page();
    }

    /// Most pages one flick may advance, 0 for unlimited
    pub fn set_page_limit(&mut self, h: u32, v: u32) {
        self.state.paging.horizontal.limit = h;
        self.state.paging.vertical.limit = v;
    }

    /// Effective page size per axis, 0 where paging is off
    pub fn page_size(&self) -> (f32, f32) {
        let viewport = self.viewport_size();
        let content = self.content_size();
        (
            self.state.paging.page_size(Axis::Horizontal, viewport, content),
            self.state.paging.page_size(Axis::Vertical, viewport, content),
        )
    }

    pub fn current_page(&self) -> (i32, i32) {
        let (w, h) = self.page_size();
        let offset = self.offset();
        (paging::page_index(offset.x, w), paging::page_index(offset.y, h))
    }

    pub fn last_page(&self) -> (i32, i32) {
        let (w, h) = self.page_size();
        let content = self.content_size();
        (
            paging::last_page(content.width, w),
            paging::last_page(content.height, h),
        )
    }

    /// Jump to page `(h, v)`
    pub fn show_page(&mut self, h: i32, v: i32) {
        self.cancel_animators();
        if let Some(target) = self.page_target(h, v) {
            self.commit_offset(target);
        }
        self.finish_call();
    }

    /// Animate to page `(h, v)`
    pub fn bring_in_page(&mut self, h: i32, v: i32) {
        if let Some(target) = self.page_target(h, v) {
            let duration = self.config.bring_in_scroll_friction;
            self.scroll_to_axis(Axis::Horizontal, duration, target.x);
            self.scroll_to_axis(Axis::Vertical, duration, target.y);
        }
        self.finish_call();
    }

    pub fn set_loop(&mut self, h: bool, v: bool) {
        self.state.loop_h = h;
        self.state.loop_v = v;
        self.evaluate_bounce();
        self.finish_call();
    }

    pub fn set_bounce_allowed(&mut self, h: bool, v: bool) {
        self.state.bounce_h = h;
        self.state.bounce_v = v;
        self.evaluate_bounce();
        self.finish_call();
    }

    pub fn set_policy(&mut self, hbar: ScrollbarPolicy, vbar: ScrollbarPolicy) {
        self.state.scrollbars.horizontal.policy = hbar;
        self.state.scrollbars.vertical.policy = vbar;
        self.sync_scrollbars();
        self.finish_call();
    }

    /// Stop releases and flings from starting momentum; a running one is
    /// cancelled
    pub fn set_momentum_disabled(&mut self, disabled: bool) {
        self.state.momentum_disabled = disabled;
        if disabled {
            if let Some(AnimatorState::Momentum(mut momentum)) =
                self.state.animators.cancel(AnimatorKind::Momentum)
            {
                momentum.cancel();
                tracing::debug!("momentum disabled, running flick cancelled");
            }
            self.evaluate_bounce();
        }
        self.finish_call();
    }

    /// Settle overscroll by jumping to the edge instead of animating
    pub fn set_bounce_animator_disabled(&mut self, disabled: bool) {
        self.state.bounce_animator_disabled = disabled;
        if disabled {
            for axis in Axis::BOTH {
                self.state.animators.cancel(AnimatorKind::bounce(axis));
            }
            self.evaluate_bounce();
        }
        self.finish_call();
    }

    /// Ignore wheel events, leaving them unconsumed for an enclosing scroller
    pub fn set_wheel_disabled(&mut self, disabled: bool) {
        self.state.wheel_disabled = disabled;
    }

    /// Wheel step per notch; values under one pixel are raised to one
    pub fn set_step_size(&mut self, x: f32, y: f32) {
        let sane = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        self.state.step = Some([sane(x), sane(y)]);
    }

    /// Whether a fast release may carry a paged surface past the nearest page
    pub fn set_page_flick(&mut self, enabled: bool) {
        self.state.page_flick = enabled;
    }

    pub fn set_single_direction(&mut self, mode: SingleDirection) {
        self.state.single_direction = mode;
    }

    pub fn set_movement_block(&mut self, block: MovementBlock) {
        self.state.block = block;
    }

    /// Suspend drag and animators without cancelling them
    pub fn set_hold(&mut self, hold: bool) {
        if self.state.hold == hold {
            return;
        }
        self.state.hold = hold;
        if hold {
            self.state.hold_since = Some(self.now);
            if let Some(session) = self.gesture.as_mut() {
                session.request_rebase();
            }
            tracing::debug!("hold on at {:.3}", self.now);
        } else {
            if let Some(since) = self.state.hold_since.take() {
                let paused = (self.now - since).max(0.0);
                for state in self.state.animators.states_mut() {
                    state.delay(paused);
                }
                tracing::debug!("hold off, resumed after {:.3}s", paused);
            }
            self.evaluate_bounce();
        }
        self.finish_call();
    }

    /// Cancel all animators and block new ones until unfrozen
    pub fn set_freeze(&mut self, freeze: bool) {
        if self.state.freeze == freeze {
            return;
        }
        self.state.freeze = freeze;
        if freeze {
            self.cancel_animators();
            if let Some(session) = self.gesture.as_mut() {
                session.request_rebase();
            }
        } else {
            self.evaluate_bounce();
        }
        tracing::debug!("freeze {}", freeze);
        self.finish_call();
    }

    /// Cancel every running animator
    pub fn stop(&mut self) {
        self.cancel_animators();
        self.finish_call();
    }

    /// Re-read pan geometry after a content or viewport resize
    pub fn sync_geometry(&mut self) {
        if self.bounds().is_none() {
            return;
        }
        self.sync_scrollbars();
        if self.gesture.is_none() {
            // Re-apply policy to the current offset, then settle anything
            // the resize left out of range
            self.commit_offset(self.offset());
            self.evaluate_bounce();
        }
        self.sync_page();
        self.finish_call();
    }

    // ========================================================================
    // Offset entry point
    // ========================================================================

    /// The single path every offset change takes
    ///
    /// Applies loop wrap and clamping policy, moves the pan, then updates
    /// scrollbars and queues notifications. Notifications reach the
    /// listener only at the end of the public call, after all state is
    /// consistent. Setting the current offset again is a no-op.
    pub(crate) fn commit_offset(&mut self, target: Point) {
        let Some(b) = self.bounds() else {
            return;
        };
        let current = self.offset();

        let mut next = target;
        for axis in Axis::BOTH {
            let v = next.along(axis);
            let (min, max) = (b.min.along(axis), b.max.along(axis));
            let v = if self.is_looping(axis) {
                wrap(v, b.content.along(axis))
            } else if self.is_bounce_allowed(axis) {
                let margin = self.config.overscroll_margin(b.viewport.along(axis));
                clamp_lenient(v, min - margin, max + margin)
            } else {
                clamp_lenient(v, min, max)
            };
            next.set_along(axis, v);
        }

        if next == current {
            return;
        }
        if let Some(pan) = self.pan.as_mut() {
            pan.set_offset(next);
        }
        tracing::trace!("offset {:?} -> {:?}", current, next);

        self.sync_scrollbars();
        self.emit(ScrollEvent::Scroll(next));
        if next.x < current.x {
            self.emit(ScrollEvent::ScrollLeft);
        } else if next.x > current.x {
            self.emit(ScrollEvent::ScrollRight);
        }
        if next.y < current.y {
            self.emit(ScrollEvent::ScrollUp);
        } else if next.y > current.y {
            self.emit(ScrollEvent::ScrollDown);
        }

        for axis in Axis::BOTH {
            let (min, max) = (b.min.along(axis), b.max.along(axis));
            if max <= min || self.is_looping(axis) {
                continue;
            }
            let (from, to) = (current.along(axis), next.along(axis));
            let (start_edge, end_edge) = match axis {
                Axis::Horizontal => (ScrollEvent::EdgeLeft, ScrollEvent::EdgeRight),
                Axis::Vertical => (ScrollEvent::EdgeTop, ScrollEvent::EdgeBottom),
            };
            if to <= min && from > min {
                self.emit(start_edge);
            }
            if to >= max && from < max {
                self.emit(end_edge);
            }
        }

        self.sync_page();

        let out_of_range = Axis::BOTH.iter().any(|&axis| {
            !self.is_looping(axis)
                && clamp_lenient(next.along(axis), b.min.along(axis), b.max.along(axis))
                    != next.along(axis)
        });
        if out_of_range {
            self.evaluate_bounce();
        }
    }

    /// Commit a change on one axis only
    pub(crate) fn commit_axis(&mut self, axis: Axis, value: f32) {
        let target = self.offset().with_along(axis, value);
        self.commit_offset(target);
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    pub(crate) fn bounds(&self) -> Option<Bounds> {
        let Some(pan) = self.pan.as_ref() else {
            if !self.missing_pan_logged.replace(true) {
                tracing::warn!("scroll surface has no pan adapter; ignoring operations");
            }
            return None;
        };
        let min = pan.min_offset();
        let max = pan.max_offset();
        Some(Bounds {
            min,
            max: Point::new(max.x.max(min.x), max.y.max(min.y)),
            viewport: pan.viewport_size(),
            content: pan.content_size(),
        })
    }

    pub(crate) fn snap_bounds(&self, b: &Bounds, axis: Axis) -> SnapBounds {
        SnapBounds {
            min: b.min.along(axis),
            max: b.max.along(axis),
            looping: self.is_looping(axis),
        }
    }

    pub(crate) fn axis_page_size(&self, b: &Bounds, axis: Axis) -> f32 {
        self.state.paging.page_size(axis, b.viewport, b.content)
    }

    /// Minimal, page-aligned offset that shows `region`
    fn region_target(&self, region: Rect) -> Option<Point> {
        let b = self.bounds()?;
        let current = self.offset();
        let mut target = current;

        for axis in Axis::BOTH {
            let p = current.along(axis);
            let start = region.start(axis);
            let end = start + region.extent(axis);
            let visible = b.content.along(axis) - (b.max.along(axis) - b.min.along(axis));

            let mut wanted = p;
            if start < p && end < p + visible {
                wanted = start;
            } else if start > p && end > p + visible {
                wanted = end - visible;
            }

            let bounds = self.snap_bounds(&b, axis);
            let page = self.axis_page_size(&b, axis);
            let v = paging::snap(p, wanted - p, page, f32::INFINITY, bounds);
            target.set_along(axis, v);
        }

        (target != current).then_some(target)
    }

    fn page_target(&self, h: i32, v: i32) -> Option<Point> {
        let b = self.bounds()?;
        let mut target = self.offset();
        for (axis, index) in [(Axis::Horizontal, h), (Axis::Vertical, v)] {
            let page = self.axis_page_size(&b, axis);
            if page <= 0.0 {
                continue;
            }
            let wanted = index as f32 * page;
            let value = if self.is_looping(axis) {
                wanted
            } else {
                clamp_lenient(wanted, b.min.along(axis), b.max.along(axis))
            };
            target.set_along(axis, value);
        }
        Some(target)
    }

    pub(crate) fn sync_scrollbars(&mut self) {
        let Some(b) = self.bounds() else {
            return;
        };
        let offset = self.offset();
        let flips = self
            .state
            .scrollbars
            .sync(offset, b.min, b.max, b.viewport, b.content);
        for (axis, visible) in flips {
            self.emit(ScrollEvent::IndicatorVisibility(axis, visible));
        }
    }

    fn sync_page(&mut self) {
        if !self.state.paging.is_enabled() {
            return;
        }
        let page = self.current_page();
        if page != self.state.page {
            self.state.page = page;
            self.emit(ScrollEvent::PageChanged {
                horizontal: page.0,
                vertical: page.1,
            });
        }
    }

    pub(crate) fn emit(&mut self, event: ScrollEvent) {
        self.pending.push(event);
    }

    /// Close out a public call: animation notifications, invariant check,
    /// then listener delivery
    pub(crate) fn finish_call(&mut self) {
        let active = !self.state.animators.is_empty();
        if active != self.state.animating {
            self.state.animating = active;
            self.emit(if active {
                ScrollEvent::AnimateStart
            } else {
                ScrollEvent::AnimateStop
            });
        }
        debug_assert!(
            self.state.animators.check_invariant(),
            "duplicate animator kind"
        );

        let events = std::mem::take(&mut self.pending);
        for event in events {
            self.listener.notify(event);
        }
    }
}

impl<P, L> Drop for ScrollSurface<P, L> {
    fn drop(&mut self) {
        let cancelled = self.state.animators.clear();
        if let Some(session) = self.gesture.take() {
            if session.is_dragging() {
                for axis in Axis::BOTH {
                    if session.intent().along(axis) {
                        self.context.lock(axis, false);
                    }
                }
            }
        }
        if !cancelled.is_empty() {
            tracing::debug!("surface dropped, cancelled {:?}", cancelled);
        }
    }
}

/// Wrap `v` into `0..extent`
fn wrap(v: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        v
    } else {
        v.rem_euclid(extent)
    }
}
