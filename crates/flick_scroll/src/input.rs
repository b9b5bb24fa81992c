//! Input handling
//!
//! Pointer, wheel and scrollbar-indicator input for [`ScrollSurface`].
//! Handlers take the event mutably and set `consumed` when the surface used
//! it, so an enclosing scroller can skip it.

use flick_core::geometry::clamp_lenient;
use flick_core::{Axis, MouseButton, Point, PointerEvent, Vec2, WheelDirection, WheelEvent};

use crate::gesture::{
    axis_intent, border_friction, AxisIntent, GestureSession, MovementBlock, SingleDirection,
};
use crate::listener::{ScrollEvent, ScrollListener};
use crate::momentum::stack_flick;
use crate::paging;
use crate::pan::Pan;
use crate::scrollbar::offset_for_value;
use crate::surface::{AnimatorKind, ScrollSurface};

impl<P: Pan, L: ScrollListener> ScrollSurface<P, L> {
    // ========================================================================
    // Pointer
    // ========================================================================

    pub fn on_pointer_down(&mut self, event: &mut PointerEvent) {
        self.now = event.timestamp;
        if self.state.block == MovementBlock::Both
            || event.button != MouseButton::Primary
            || event.on_hold
        {
            return;
        }
        if self.bounds().is_none() {
            return;
        }

        // A down without the matching up
        if let Some(stale) = self.gesture.take() {
            self.end_drag_locks(&stale);
        }

        self.cancel_unlocked_animators();
        let mut session = GestureSession::begin(event.position, self.offset(), event.timestamp);
        if self.state.hold || self.state.freeze {
            session.request_rebase();
        }
        self.estimator.reset();
        self.gesture = Some(session);
        tracing::trace!("pointer down at {:?}", event.position);
        self.finish_call();
    }

    pub fn on_pointer_move(&mut self, event: &mut PointerEvent) {
        self.now = event.timestamp;
        let Some(mut session) = self.gesture.take() else {
            return;
        };
        if session.is_cancelled() {
            self.gesture = Some(session);
            return;
        }
        session.record(event.position, event.timestamp);

        if self.state.hold || self.state.freeze || self.state.indicator_drag.is_some() {
            session.request_rebase();
            self.gesture = Some(session);
            return;
        }

        if !session.is_dragging() {
            if !session.passed_threshold(event.position, self.config.thumbscroll_threshold) {
                self.gesture = Some(session);
                return;
            }
            if event.on_hold || event.consumed {
                // Claimed by a nested scroller
                session.cancel();
                self.gesture = Some(session);
                return;
            }

            let delta = event.position - session.origin();
            let mut intent = axis_intent(delta, self.state.single_direction, self.state.block);
            for axis in Axis::BOTH {
                if self.context.is_locked_by_descendant(axis) {
                    match axis {
                        Axis::Horizontal => intent.x = false,
                        Axis::Vertical => intent.y = false,
                    }
                }
            }

            if !intent.any() {
                let ambiguous = self.state.single_direction == SingleDirection::Hard
                    && delta.x.abs() == delta.y.abs();
                if !ambiguous {
                    tracing::trace!("drag claimed elsewhere, gesture cancelled");
                    session.cancel();
                }
                self.gesture = Some(session);
                return;
            }

            session.begin_drag(intent);
            for axis in Axis::BOTH {
                if intent.along(axis) {
                    self.context.lock(axis, true);
                }
            }
            self.emit(ScrollEvent::DragStart);
            tracing::debug!("drag start {:?}", intent);
        }

        event.consumed = true;
        for axis in Axis::BOTH {
            self.state.animators.cancel(AnimatorKind::scroll_to(axis));
        }

        session.rebase_if_needed(event.position, self.offset());
        let pointer = if self.config.smooth_drag {
            self.estimator
                .estimate(session.history(), event.timestamp, session.intent())
                .anchor
        } else {
            event.position
        };
        let candidate = session.candidate_offset(pointer);
        let origin_offset = session.origin_offset();

        // Back in place before committing, so no bounce starts mid-drag
        self.gesture = Some(session);
        let target = self.drag_target(candidate, origin_offset);
        self.commit_offset(target);
        self.finish_call();
    }

    pub fn on_pointer_up(&mut self, event: &mut PointerEvent) {
        self.now = event.timestamp;
        if event.button != MouseButton::Primary {
            return;
        }
        let Some(mut session) = self.gesture.take() else {
            return;
        };
        let was_dragging = session.is_dragging();
        let was_cancelled = session.is_cancelled();
        session.release();

        let settle = !self.state.hold && !self.state.freeze;
        if was_dragging {
            self.end_drag_locks_for(session.intent());
            self.emit(ScrollEvent::DragStop);
            event.consumed = true;
            tracing::debug!("drag stop at {:?}", self.offset());
            if settle {
                self.release_drag(&session, event.timestamp);
            }
        } else if !was_cancelled && settle && self.state.paging.is_enabled() {
            self.snap_to_page(Vec2::ZERO, Vec2::ZERO, AxisIntent::BOTH);
        }

        if !self.state.animators.is_active(AnimatorKind::Momentum) {
            self.evaluate_bounce();
        }
        self.finish_call();
    }

    /// Turn a finished drag into momentum or a page snap
    fn release_drag(&mut self, session: &GestureSession, now: f64) {
        let Some(b) = self.bounds() else {
            return;
        };
        let intent = session.intent();
        let estimate = self.estimator.estimate(session.history(), now, intent);
        let velocity = estimate.velocity;
        let fast = velocity.length() > self.config.momentum_threshold;

        if self.state.paging.is_enabled() {
            // Offset moves against the pointer
            let direction = if fast && self.state.page_flick {
                -velocity
            } else {
                Vec2::ZERO
            };
            let travel = self.offset() - session.origin_offset();
            self.snap_to_page(direction, travel, intent);
            return;
        }

        if fast && self.config.friction > 0.0 {
            let flick = stack_flick(
                &self.config,
                velocity,
                &self.flicks,
                now,
                self.inside_range(&b),
                b.viewport,
            );
            self.flicks.remember(flick.velocity, now);
            self.start_momentum(flick.distance(&self.config));
        }
    }

    /// Animate to the page boundary the release points at
    fn snap_to_page(&mut self, direction: Vec2, travel: Vec2, intent: AxisIntent) {
        let Some(b) = self.bounds() else {
            return;
        };
        let current = self.offset();
        for axis in Axis::BOTH {
            let page = self.axis_page_size(&b, axis);
            if page <= 0.0 || !intent.along(axis) {
                continue;
            }
            let bias = paging::flick_bias(direction.along(axis), travel.along(axis), page);
            let limit = self.state.paging.axis(axis).flick_limit(page);
            let bounds = self.snap_bounds(&b, axis);
            let target = paging::snap(current.along(axis), bias, page, limit, bounds);
            if target != current.along(axis) {
                self.scroll_to_axis(axis, self.config.page_scroll_friction, target);
            }
        }
    }

    /// Rubber-banded drag target for a candidate offset
    fn drag_target(&self, candidate: Point, origin_offset: Point) -> Point {
        let Some(b) = self.bounds() else {
            return candidate;
        };
        let mut target = candidate;
        for axis in Axis::BOTH {
            if self.is_looping(axis) {
                continue;
            }
            let (min, max) = (b.min.along(axis), b.max.along(axis));
            let v = candidate.along(axis);
            let v = if self.is_bounce_allowed(axis) {
                let friction = self.config.border_friction;
                let banded = border_friction(v, origin_offset.along(axis), min, max, friction);
                let margin = self.config.overscroll_margin(b.viewport.along(axis));
                clamp_lenient(banded, min - margin, max + margin)
            } else {
                clamp_lenient(v, min, max)
            };
            target.set_along(axis, v);
        }
        target
    }

    fn end_drag_locks(&mut self, session: &GestureSession) {
        if session.is_dragging() {
            self.end_drag_locks_for(session.intent());
            self.emit(ScrollEvent::DragStop);
        }
    }

    fn end_drag_locks_for(&mut self, intent: AxisIntent) {
        for axis in Axis::BOTH {
            if intent.along(axis) {
                self.context.lock(axis, false);
            }
        }
    }

    // ========================================================================
    // Wheel
    // ========================================================================

    /// Step the offset by wheel notches, or by pages when paging is on
    pub fn on_wheel(&mut self, event: &mut WheelEvent) {
        self.now = event.timestamp;
        if self.state.wheel_disabled
            || self.state.block.blocks_y()
            || event.on_hold
            || event.modifiers.has_command()
        {
            return;
        }
        let Some(b) = self.bounds() else {
            return;
        };

        let direction = if event.modifiers.shift {
            event.direction.swapped()
        } else {
            event.direction
        };
        // Fall over to the other axis when the asked one cannot move
        let overflows = |axis: Axis| b.content.along(axis) > b.viewport.along(axis);
        let axis = match direction {
            WheelDirection::Vertical => {
                if overflows(Axis::Vertical) || !overflows(Axis::Horizontal) {
                    Axis::Vertical
                } else {
                    Axis::Horizontal
                }
            }
            WheelDirection::Horizontal => {
                if overflows(Axis::Horizontal) || !overflows(Axis::Vertical) {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                }
            }
        };

        for axis in Axis::BOTH {
            self.state.animators.cancel(AnimatorKind::scroll_to(axis));
            self.state.animators.cancel(AnimatorKind::bounce(axis));
        }
        event.consumed = true;

        if self.state.hold || self.state.freeze {
            self.finish_call();
            return;
        }

        let current = self.offset().along(axis);
        let notches = event.notches as f32;
        let page = self.axis_page_size(&b, axis);
        if page > 0.0 {
            let index = paging::page_index(current, page) + event.notches;
            let target = index as f32 * page;
            self.scroll_to_axis(axis, self.config.bring_in_scroll_friction, target);
        } else {
            let [step_x, step_y] = self.step_size();
            let step = match axis {
                Axis::Horizontal => step_x,
                Axis::Vertical => step_y,
            };
            let wanted = current + notches * step;
            let target = if self.is_looping(axis) {
                wanted
            } else {
                clamp_lenient(wanted, b.min.along(axis), b.max.along(axis))
            };
            self.commit_axis(axis, target);
        }
        tracing::trace!("wheel {:?} x{} on {:?}", direction, event.notches, axis);
        self.finish_call();
    }

    // ========================================================================
    // Scrollbar indicators
    // ========================================================================

    /// The user grabbed the indicator of `axis`
    pub fn begin_indicator_drag(&mut self, axis: Axis) {
        if self.bounds().is_none() || self.state.indicator_drag.is_some() {
            return;
        }
        self.cancel_animators();
        self.state.scrollbars.axis_mut(axis).dragging = true;
        self.state.indicator_drag = Some(axis);
        self.emit(ScrollEvent::DragStart);
        self.finish_call();
    }

    /// Move the dragged indicator to `value` in `0.0..=1.0`
    pub fn drag_indicator(&mut self, axis: Axis, value: f32) {
        if self.state.indicator_drag != Some(axis) {
            return;
        }
        let Some(b) = self.bounds() else {
            return;
        };
        let mut target = offset_for_value(value, b.min.along(axis), b.max.along(axis));
        let page = self.axis_page_size(&b, axis);
        if page > 0.0 {
            let bounds = self.snap_bounds(&b, axis);
            target = paging::snap(target, 0.0, page, f32::INFINITY, bounds);
        }
        self.commit_axis(axis, target);
        self.finish_call();
    }

    pub fn end_indicator_drag(&mut self, axis: Axis) {
        if self.state.indicator_drag != Some(axis) {
            return;
        }
        self.state.indicator_drag = None;
        self.state.scrollbars.axis_mut(axis).dragging = false;
        self.emit(ScrollEvent::DragStop);
        self.evaluate_bounce();
        self.finish_call();
    }
}
