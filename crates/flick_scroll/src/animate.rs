//! Per-frame animation
//!
//! The host calls [`ScrollSurface::tick`] once per frame. Each live animator
//! is sampled in a fixed order and its result goes through the same offset
//! entry point as input does. Any step may cancel another animator as a side
//! effect (a momentum step that crosses an edge starts a bounce, for
//! example), so each step re-checks its handle before touching its state.

use flick_animation::AnimatorHandle;
use flick_core::geometry::clamp_lenient;
use flick_core::{Axis, Vec2};

use crate::bounce::BounceAnimator;
use crate::listener::ScrollListener;
use crate::momentum::{MomentumAnimator, MomentumPhase};
use crate::pan::Pan;
use crate::scroll_to::ScrollToAnimator;
use crate::surface::{AnimatorKind, AnimatorState, ScrollSurface};

impl<P: Pan, L: ScrollListener> ScrollSurface<P, L> {
    /// Advance every animator to `now`
    ///
    /// Returns whether anything is still animating.
    pub fn tick(&mut self, now: f64) -> bool {
        self.now = now;
        if self.state.hold || self.bounds().is_none() {
            self.finish_call();
            return self.is_animating();
        }

        for kind in AnimatorKind::ALL {
            let Some(handle) = self.state.animators.handle(kind) else {
                continue;
            };
            let Some(state) = self.state.animators.get(kind).copied() else {
                continue;
            };
            match state {
                AnimatorState::Momentum(momentum) => self.step_momentum(handle, momentum, now),
                AnimatorState::Bounce(bounce) => self.step_bounce(handle, bounce, now),
                AnimatorState::ScrollTo(scroll) => self.step_scroll_to(handle, scroll, now),
            }
        }

        self.finish_call();
        self.is_animating()
    }

    /// Start momentum for a synthetic swipe
    ///
    /// `velocity` is in pointer space (px/s), like a release velocity: a
    /// leftward swipe scrolls toward the end of the content. Stacks with a
    /// recent flick the same way a real release does.
    pub fn fling(&mut self, velocity: Vec2, now: f64) {
        self.now = now;
        if let Some(b) = self.bounds() {
            if !self.state.freeze && !self.state.hold {
                let flick = crate::momentum::stack_flick(
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
        self.finish_call();
    }

    fn step_momentum(&mut self, handle: AnimatorHandle, momentum: MomentumAnimator, now: f64) {
        let Some(b) = self.bounds() else {
            return;
        };
        let current = self.offset();
        let sampled = momentum.sample(now);

        let mut target = current;
        for axis in Axis::BOTH {
            let bouncing = self.state.animators.is_active(AnimatorKind::bounce(axis));
            if momentum.drives(axis) && !bouncing {
                target.set_along(axis, sampled.along(axis));
            }
        }
        self.commit_offset(target);

        // The commit may have started a bounce, which holds axes on the
        // live state; never write the stale copy back
        if !self.state.animators.is_live(handle) {
            return;
        }
        let Some(AnimatorState::Momentum(live)) = self.state.animators.state_mut(handle).copied()
        else {
            return;
        };

        let offset = self.offset();
        let ended = |axis: Axis| {
            let v = offset.along(axis);
            // An edge only stops the axis when the flick pushes further past it
            let heading = live.heading(axis);
            let at_bound = (v <= b.min.along(axis) && heading < 0.0)
                || (v >= b.max.along(axis) && heading > 0.0);
            !live.drives(axis)
                || self.state.animators.is_active(AnimatorKind::bounce(axis))
                || (!self.is_bounce_allowed(axis) && !self.is_looping(axis) && at_bound)
        };

        if live.is_expired(now) || (ended(Axis::Horizontal) && ended(Axis::Vertical)) {
            if let Some(AnimatorState::Momentum(m)) = self.state.animators.state_mut(handle) {
                m.settle();
            }
            self.state.animators.finish(handle);
            tracing::debug!("momentum settled at {:?}", offset);
            self.evaluate_bounce();
        }
    }

    fn step_bounce(&mut self, handle: AnimatorHandle, bounce: BounceAnimator, now: f64) {
        let (value, done) = bounce.sample(now);
        if done {
            self.state.animators.finish(handle);
        }
        self.commit_axis(bounce.axis, value);
    }

    fn step_scroll_to(&mut self, handle: AnimatorHandle, scroll: ScrollToAnimator, now: f64) {
        let (value, done) = scroll.sample(now);
        if done {
            self.state.animators.finish(handle);
        }
        self.commit_axis(scroll.axis, value);
    }

    // ========================================================================
    // Starting and stopping
    // ========================================================================

    /// Start momentum covering `distance` (pointer space)
    pub(crate) fn start_momentum(&mut self, distance: Vec2) {
        if self.state.freeze || self.state.momentum_disabled {
            return;
        }
        for axis in Axis::BOTH {
            self.state.animators.cancel(AnimatorKind::scroll_to(axis));
        }
        let momentum = MomentumAnimator::new(self.offset(), distance, self.now, &self.config);
        let (_, replaced) = self
            .state
            .animators
            .start(AnimatorKind::Momentum, AnimatorState::Momentum(momentum));
        if let Some(AnimatorState::Momentum(mut old)) = replaced {
            old.cancel();
        }
        tracing::debug!("momentum start, distance {:?}", distance);
    }

    /// Animate `axis` to `target` over `duration` seconds
    pub(crate) fn scroll_to_axis(&mut self, axis: Axis, duration: f64, target: f32) {
        if self.state.freeze {
            return;
        }
        let Some(b) = self.bounds() else {
            return;
        };
        let target = if self.is_looping(axis) {
            target
        } else {
            clamp_lenient(target, b.min.along(axis), b.max.along(axis))
        };
        let current = self.offset().along(axis);

        self.state.animators.cancel(AnimatorKind::bounce(axis));
        if duration <= 0.0 || target == current {
            self.state.animators.cancel(AnimatorKind::scroll_to(axis));
            self.commit_axis(axis, target);
            return;
        }
        let scroll = ScrollToAnimator::new(axis, current, target, self.now, duration);
        self.state
            .animators
            .start(AnimatorKind::scroll_to(axis), AnimatorState::ScrollTo(scroll));
    }

    /// Cancel every animator, marking a running momentum as cancelled
    pub(crate) fn cancel_animators(&mut self) {
        if let Some(AnimatorState::Momentum(mut momentum)) =
            self.state.animators.cancel(AnimatorKind::Momentum)
        {
            if momentum.cancel() == MomentumPhase::Cancelled {
                tracing::debug!("momentum cancelled");
            }
        }
        let kinds = self.state.animators.clear();
        if !kinds.is_empty() {
            tracing::trace!("cancelled {:?}", kinds);
        }
    }

    /// Cancel animators on axes no nested scroller owns
    pub(crate) fn cancel_unlocked_animators(&mut self) {
        for kind in AnimatorKind::ALL {
            let locked = kind
                .axis()
                .map(|axis| self.context.is_locked_by_descendant(axis))
                .unwrap_or(false);
            if locked {
                continue;
            }
            if let Some(AnimatorState::Momentum(mut momentum)) = self.state.animators.cancel(kind) {
                momentum.cancel();
            }
        }
    }

    // ========================================================================
    // Bounce
    // ========================================================================

    /// Start a bounce on every axis resting out of range
    ///
    /// Does nothing while the pointer is down, an indicator is dragged, or
    /// the surface is held or frozen; those call back here once they end.
    pub(crate) fn evaluate_bounce(&mut self) {
        if self.state.freeze || self.state.hold || self.state.indicator_drag.is_some() {
            return;
        }
        if self.gesture.is_some() {
            return;
        }
        let Some(b) = self.bounds() else {
            return;
        };

        for axis in Axis::BOTH {
            if self.is_looping(axis) || self.state.animators.is_active(AnimatorKind::bounce(axis)) {
                continue;
            }
            let offset = self.offset();
            let v = offset.along(axis);
            let target = clamp_lenient(v, b.min.along(axis), b.max.along(axis));
            if target == v {
                continue;
            }

            // Momentum already heading back into range keeps the axis
            if let Some(AnimatorState::Momentum(momentum)) =
                self.state.animators.get(AnimatorKind::Momentum)
            {
                if momentum.drives(axis) && momentum.heading(axis) * (target - v) > 0.0 {
                    continue;
                }
            }

            self.state.animators.cancel(AnimatorKind::scroll_to(axis));
            if let Some(AnimatorState::Momentum(momentum)) =
                self.state.animators.get_mut(AnimatorKind::Momentum)
            {
                momentum.hold(axis);
            }

            if !self.is_bounce_allowed(axis) || self.state.bounce_animator_disabled {
                self.commit_axis(axis, target);
                continue;
            }
            let bounce = BounceAnimator::new(
                axis,
                v,
                target,
                self.now,
                self.config.bounce_friction,
                b.viewport.along(axis),
            );
            self.state
                .animators
                .start(AnimatorKind::bounce(axis), AnimatorState::Bounce(bounce));
        }
    }

    /// Whether the offset is strictly inside its range, per axis
    pub(crate) fn inside_range(&self, b: &crate::surface::Bounds) -> [bool; 2] {
        let offset = self.offset();
        Axis::BOTH.map(|axis| {
            let v = offset.along(axis);
            v > b.min.along(axis) && v < b.max.along(axis)
        })
    }
}

#[cfg(test)]
mod tests {
    use flick_core::{Point, Size};

    use crate::config::ScrollConfig;
    use crate::listener::ScrollEvent;
    use crate::pan::ContentPan;
    use crate::surface::{AnimatorKind, ScrollSurface};

    use super::*;

    fn surface() -> ScrollSurface<ContentPan, Vec<ScrollEvent>> {
        let pan = ContentPan::new(Size::new(300.0, 300.0), Size::new(900.0, 300.0));
        let mut surface = ScrollSurface::new(pan, ScrollConfig::default(), Vec::new());
        surface.listener_mut().clear();
        surface
    }

    fn run(surface: &mut ScrollSurface<ContentPan, Vec<ScrollEvent>>, from: f64, to: f64) {
        let mut t = from;
        while t <= to {
            surface.tick(t);
            t += 1.0 / 60.0;
        }
        surface.tick(to);
    }

    #[test]
    fn test_bounce_returns_monotonically() {
        let mut surface = surface();
        surface.set_offset(650.0, 0.0, false);
        assert!(surface.active_animators().any(|k| k == AnimatorKind::BounceX));

        let mut last = surface.offset().x;
        let mut t = 0.0;
        while surface.tick(t) {
            let x = surface.offset().x;
            assert!(x <= last, "bounce moved away from the edge: {} > {}", x, last);
            last = x;
            t += 1.0 / 60.0;
            assert!(t < 5.0);
        }
        assert_eq!(surface.offset().x, 600.0);
    }

    #[test]
    fn test_zero_fling_settles_in_one_tick() {
        let mut surface = surface();
        surface.set_offset(300.0, 0.0, false);
        surface.fling(Vec2::ZERO, 1.0);
        assert!(surface.is_animating());

        assert!(!surface.tick(1.0));
        assert_eq!(surface.offset().x, 300.0);
        assert!(!surface.listener().iter().any(|e| matches!(e, ScrollEvent::EdgeLeft)));
    }

    #[test]
    fn test_fling_hands_over_to_bounce() {
        let mut surface = surface();
        surface.set_offset(500.0, 0.0, false);
        // A leftward swipe scrolls toward the end
        surface.fling(Vec2::new(-1000.0, 0.0), 0.0);
        run(&mut surface, 0.0, 3.0);

        assert!(!surface.is_animating());
        assert_eq!(surface.offset(), Point::new(600.0, 0.0));
        assert!(surface.listener().contains(&ScrollEvent::EdgeRight));
        let stops = surface
            .listener()
            .iter()
            .filter(|e| **e == ScrollEvent::AnimateStop)
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_fling_from_edge_without_bounce() {
        let mut surface = surface();
        surface.set_bounce_allowed(false, false);
        surface.fling(Vec2::new(-1000.0, 0.0), 0.0);

        // Sampled in the same frame the flick started
        assert!(surface.tick(0.0));
        assert!(surface.active_animators().any(|k| k == AnimatorKind::Momentum));

        run(&mut surface, 0.0, 3.0);
        assert!(!surface.is_animating());
        assert!(surface.offset().x > 0.0);
    }

    #[test]
    fn test_fling_into_edge_without_bounce_ends() {
        let mut surface = surface();
        surface.set_bounce_allowed(false, false);
        surface.set_offset(600.0, 0.0, false);
        surface.fling(Vec2::new(-1000.0, 0.0), 1.0);

        // Already pinned at the end it is pushed toward
        assert!(!surface.tick(1.0));
        assert_eq!(surface.offset().x, 600.0);
    }

    #[test]
    fn test_bounce_animator_disabled_jumps_back() {
        let mut surface = surface();
        surface.set_bounce_animator_disabled(true);
        surface.set_offset(650.0, 0.0, false);

        assert!(!surface.is_animating());
        assert_eq!(surface.offset().x, 600.0);
        assert!(surface.listener().contains(&ScrollEvent::EdgeRight));
    }

    #[test]
    fn test_disabling_bounce_animator_settles_running_bounce() {
        let mut surface = surface();
        surface.set_offset(650.0, 0.0, false);
        assert!(surface.active_animators().any(|k| k == AnimatorKind::BounceX));

        surface.set_bounce_animator_disabled(true);
        assert!(!surface.is_animating());
        assert_eq!(surface.offset().x, 600.0);
    }

    #[test]
    fn test_disabling_momentum_cancels_flick() {
        let mut surface = surface();
        surface.fling(Vec2::new(-800.0, 0.0), 0.0);
        surface.tick(0.1);
        assert!(surface.is_animating());

        surface.set_momentum_disabled(true);
        assert!(!surface.is_animating());
        assert_eq!(surface.listener().last(), Some(&ScrollEvent::AnimateStop));

        surface.fling(Vec2::new(-800.0, 0.0), 1.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_animated_set_offset() {
        let mut surface = surface();
        surface.set_offset(400.0, 0.0, true);
        assert!(surface.active_animators().any(|k| k == AnimatorKind::ScrollToX));

        run(&mut surface, 0.0, 1.0);
        assert_eq!(surface.offset().x, 400.0);
        assert_eq!(
            surface.listener().first(),
            Some(&ScrollEvent::AnimateStart)
        );
        assert_eq!(surface.listener().last(), Some(&ScrollEvent::AnimateStop));
    }

    #[test]
    fn test_hold_pauses_and_resumes() {
        let mut surface = surface();
        surface.set_offset(600.0, 0.0, true);
        surface.tick(0.1);
        let paused_at = surface.offset().x;

        surface.set_hold(true);
        surface.tick(5.0);
        assert_eq!(surface.offset().x, paused_at);
        assert!(surface.is_animating());

        surface.set_hold(false);
        surface.tick(5.0);
        assert!((surface.offset().x - paused_at).abs() < 1e-3);
        run(&mut surface, 5.0, 6.0);
        assert_eq!(surface.offset().x, 600.0);
    }

    #[test]
    fn test_freeze_cancels() {
        let mut surface = surface();
        surface.set_offset(600.0, 0.0, true);
        surface.set_freeze(true);
        assert!(!surface.is_animating());
        assert_eq!(surface.listener().last(), Some(&ScrollEvent::AnimateStop));

        // Frozen surfaces do not start animations
        surface.set_offset(300.0, 0.0, true);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_one_handle_per_kind() {
        let mut surface = surface();
        surface.set_offset(100.0, 0.0, true);
        let first = surface.animator_handle(AnimatorKind::ScrollToX);
        surface.set_offset(200.0, 0.0, true);
        let second = surface.animator_handle(AnimatorKind::ScrollToX);

        assert!(first.is_some());
        assert_ne!(first, second);
        assert_eq!(surface.active_animators().count(), 1);
    }
}
