//! Momentum animator
//!
//! After a flick, the offset keeps travelling along the release velocity and
//! decelerates on a cubic-bezier curve. Consecutive flicks in the same
//! direction stack: the new flick gets the unspent time of the previous one,
//! and a fast follow-up flick also inherits part of its velocity.

use flick_animation::Easing;
use flick_core::events::event_types::*;
use flick_core::{Axis, EventId, Machine, Point, Size, StateTransitions, Vec2};

use crate::config::ScrollConfig;

/// Momentum lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MomentumPhase {
    Running,
    /// Finished moving; remaining overscroll is handed to bounce
    Settling,
    /// Interrupted by a new gesture or an explicit stop
    Cancelled,
}

impl StateTransitions for MomentumPhase {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use MomentumPhase::*;
        match (self, event) {
            (Running, ANIMATION_SETTLE) => Some(Settling),
            (Running | Settling, ANIMATION_CANCEL) => Some(Cancelled),
            _ => None,
        }
    }
}

/// One running flick
#[derive(Clone, Copy, Debug)]
pub struct MomentumAnimator {
    pub start_time: f64,
    pub start_offset: Point,
    /// Total pointer-space travel over the whole animation
    pub distance: Vec2,
    duration: f64,
    easing: Easing,
    phase: Machine<MomentumPhase>,
    /// Axes handed over to bounce; momentum stops driving them
    held_x: bool,
    held_y: bool,
}

impl MomentumAnimator {
    pub fn new(
        start_offset: Point,
        distance: Vec2,
        start_time: f64,
        config: &ScrollConfig,
    ) -> Self {
        Self {
            start_time,
            start_offset,
            distance,
            duration: config.momentum_duration,
            easing: config.momentum_easing(),
            phase: Machine::new(MomentumPhase::Running),
            held_x: false,
            held_y: false,
        }
    }

    /// Raw elapsed fraction, unclamped
    pub fn elapsed_fraction(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (now - self.start_time) / self.duration
    }

    /// Offset the flick puts the content at by `now`
    pub fn sample(&self, now: f64) -> Point {
        let p = self.easing.apply(self.elapsed_fraction(now)) as f32;
        self.start_offset - self.distance * p
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.elapsed_fraction(now) >= 1.0 || self.distance.is_zero()
    }

    pub fn hold(&mut self, axis: Axis) {
        match axis {
            Axis::Horizontal => self.held_x = true,
            Axis::Vertical => self.held_y = true,
        }
    }

    pub fn is_held(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.held_x,
            Axis::Vertical => self.held_y,
        }
    }

    /// Offset-space travel along `axis`; offsets move against the pointer
    pub fn heading(&self, axis: Axis) -> f32 {
        -self.distance.along(axis)
    }

    /// Whether `axis` still has travel left to contribute
    pub fn drives(&self, axis: Axis) -> bool {
        !self.is_held(axis) && self.distance.along(axis) != 0.0
    }

    pub fn settle(&mut self) -> MomentumPhase {
        self.phase.send(ANIMATION_SETTLE)
    }

    pub fn cancel(&mut self) -> MomentumPhase {
        self.phase.send(ANIMATION_CANCEL)
    }

    pub fn phase(&self) -> MomentumPhase {
        self.phase.current()
    }

    /// Shift the timeline after a hold
    pub fn delay(&mut self, by: f64) {
        self.start_time += by;
    }
}

/// The previous flick, remembered for acceleration stacking
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlickMemory {
    pub velocity: Vec2,
    pub started_at: Option<f64>,
}

impl FlickMemory {
    pub fn remember(&mut self, velocity: Vec2, now: f64) {
        self.velocity = velocity;
        self.started_at = Some(now);
    }

    pub fn forget(&mut self) {
        *self = Self::default();
    }
}

/// Release velocity after stacking and capping
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flick {
    pub velocity: Vec2,
    /// Unspent time of the previous flick, added to the friction
    pub extra_time: f32,
}

impl Flick {
    /// Total pointer-space travel for this flick
    pub fn distance(&self, config: &ScrollConfig) -> Vec2 {
        self.velocity * (config.friction + self.extra_time)
    }
}

/// Apply acceleration stacking and the viewport-proportional cap
///
/// `inside` tells, per axis, whether the offset is strictly inside its
/// legal range; a flick that starts at an edge never gains the velocity
/// bonus.
pub fn stack_flick(
    config: &ScrollConfig,
    velocity: Vec2,
    previous: &FlickMemory,
    now: f64,
    inside: [bool; 2],
    viewport: Size,
) -> Flick {
    let mut flick = Flick {
        velocity,
        extra_time: 0.0,
    };

    if let Some(started_at) = previous.started_at {
        let since = (now - started_at).max(0.0);
        for (i, axis) in Axis::BOTH.into_iter().enumerate() {
            let v = velocity.along(axis);
            let prev = previous.velocity.along(axis);
            if v == 0.0 || prev == 0.0 || v.signum() != prev.signum() {
                continue;
            }

            let friction = config.friction as f64;
            if since < friction {
                flick.extra_time = flick.extra_time.max((friction - since) as f32);
            }
            if v.abs() > config.acceleration_threshold
                && since < config.acceleration_time_limit
                && inside[i]
            {
                flick
                    .velocity
                    .set_along(axis, v + prev * config.acceleration_weight);
            }
        }
    }

    for axis in Axis::BOTH {
        let cap = viewport.along(axis) * config.max_velocity_viewports;
        let v = flick.velocity.along(axis);
        if v.abs() > cap {
            flick.velocity.set_along(axis, cap.copysign(v));
        }
    }

    tracing::debug!(
        "flick {:?} -> {:?} (+{:.3}s)",
        velocity,
        flick.velocity,
        flick.extra_time
    );
    flick
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScrollConfig {
        ScrollConfig::default()
    }

    #[test]
    fn test_travel_follows_curve() {
        let start = Point::new(100.0, 0.0);
        let anim = MomentumAnimator::new(start, Vec2::new(-500.0, 0.0), 0.0, &config());

        assert_eq!(anim.sample(0.0), Point::new(100.0, 0.0));
        let end = anim.sample(1.0);
        assert!((end.x - 600.0).abs() < 1e-3);

        // Decelerating: the first half covers more than half the distance
        let mid = anim.sample(0.5);
        assert!(mid.x - 100.0 > 250.0);
        assert!(anim.is_expired(1.0));
        assert!(!anim.is_expired(0.5));
    }

    #[test]
    fn test_zero_distance_expires_immediately() {
        let anim = MomentumAnimator::new(Point::ZERO, Vec2::ZERO, 0.0, &config());
        assert!(anim.is_expired(0.0));
        assert!(!anim.drives(Axis::Horizontal));
    }

    #[test]
    fn test_phases() {
        let mut anim = MomentumAnimator::new(Point::ZERO, Vec2::new(1.0, 0.0), 0.0, &config());
        assert_eq!(anim.phase(), MomentumPhase::Running);
        assert_eq!(anim.settle(), MomentumPhase::Settling);
        assert_eq!(anim.cancel(), MomentumPhase::Cancelled);
        assert_eq!(anim.settle(), MomentumPhase::Cancelled);
    }

    #[test]
    fn test_hold_axis() {
        let mut anim = MomentumAnimator::new(Point::ZERO, Vec2::new(10.0, 10.0), 0.0, &config());
        anim.hold(Axis::Vertical);
        assert!(anim.drives(Axis::Horizontal));
        assert!(!anim.drives(Axis::Vertical));
    }

    #[test]
    fn test_delay_shifts_timeline() {
        let mut anim = MomentumAnimator::new(Point::ZERO, Vec2::new(-100.0, 0.0), 0.0, &config());
        let before = anim.sample(0.25);
        anim.delay(2.0);
        assert_eq!(anim.sample(2.25), before);
    }

    #[test]
    fn test_no_stacking_without_history() {
        let flick = stack_flick(
            &config(),
            Vec2::new(-800.0, 0.0),
            &FlickMemory::default(),
            1.0,
            [true, true],
            Size::new(300.0, 300.0),
        );
        assert_eq!(flick.velocity, Vec2::new(-800.0, 0.0));
        assert_eq!(flick.extra_time, 0.0);
    }

    #[test]
    fn test_same_direction_gains_extra_time() {
        let mut memory = FlickMemory::default();
        memory.remember(Vec2::new(-800.0, 0.0), 1.0);

        let flick = stack_flick(
            &config(),
            Vec2::new(-600.0, 0.0),
            &memory,
            1.4,
            [true, true],
            Size::new(300.0, 300.0),
        );
        assert!((flick.extra_time - 0.6).abs() < 1e-4);
        // Below the acceleration threshold the velocity is untouched
        assert_eq!(flick.velocity.x, -600.0);
    }

    #[test]
    fn test_opposite_direction_resets() {
        let mut memory = FlickMemory::default();
        memory.remember(Vec2::new(800.0, 0.0), 1.0);

        let flick = stack_flick(
            &config(),
            Vec2::new(-600.0, 0.0),
            &memory,
            1.1,
            [true, true],
            Size::new(300.0, 300.0),
        );
        assert_eq!(flick.extra_time, 0.0);
    }

    #[test]
    fn test_fast_repeat_adds_weighted_velocity() {
        let mut memory = FlickMemory::default();
        memory.remember(Vec2::new(0.0, -1000.0), 1.0);

        let flick = stack_flick(
            &config(),
            Vec2::new(0.0, -2500.0),
            &memory,
            1.2,
            [true, true],
            Size::new(1000.0, 1000.0),
        );
        assert!((flick.velocity.y + 4000.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_bonus_at_edge() {
        let mut memory = FlickMemory::default();
        memory.remember(Vec2::new(0.0, -1000.0), 1.0);

        let flick = stack_flick(
            &config(),
            Vec2::new(0.0, -2500.0),
            &memory,
            1.2,
            [true, false],
            Size::new(1000.0, 1000.0),
        );
        assert_eq!(flick.velocity.y, -2500.0);
    }

    #[test]
    fn test_velocity_capped_by_viewport() {
        let flick = stack_flick(
            &config(),
            Vec2::new(-5000.0, 300.0),
            &FlickMemory::default(),
            0.0,
            [true, true],
            Size::new(300.0, 300.0),
        );
        assert_eq!(flick.velocity, Vec2::new(-1200.0, 300.0));
    }
}
