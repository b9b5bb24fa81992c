//! Bounce animator
//!
//! Pulls one over-scrolled axis back to its nearest legal bound. Small
//! overshoots settle faster: the base duration is scaled by an ease-out of
//! the overshoot relative to the viewport extent.

use flick_animation::Easing;
use flick_core::Axis;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BounceAnimator {
    pub axis: Axis,
    /// Out-of-bound offset at start
    pub from: f32,
    /// Clamped target
    pub to: f32,
    pub start_time: f64,
    duration: f64,
}

impl BounceAnimator {
    /// Bounce from `from` back to `to`
    ///
    /// `friction` is the base duration in seconds and `viewport_extent` the
    /// viewport size along `axis`.
    pub fn new(
        axis: Axis,
        from: f32,
        to: f32,
        start_time: f64,
        friction: f64,
        viewport_extent: f32,
    ) -> Self {
        let overshoot = (from - to).abs();
        let mut duration = friction.max(0.0);
        if viewport_extent > overshoot && overshoot > 0.0 {
            let ratio = (overshoot / viewport_extent) as f64;
            duration *= Easing::EaseOutQuad.apply(ratio);
        }
        if overshoot == 0.0 {
            duration = 0.0;
        }
        tracing::debug!(
            "bounce {:?} {} -> {} over {:.3}s",
            axis,
            from,
            to,
            duration
        );
        Self {
            axis,
            from,
            to,
            start_time,
            duration,
        }
    }

    /// Eased progress at `now`, 1.0 once settled
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        Easing::EaseOutQuad.apply((now - self.start_time) / self.duration)
    }

    /// Offset at `now` and whether the bounce has finished
    pub fn sample(&self, now: f64) -> (f32, bool) {
        let p = self.progress(now);
        if p >= 1.0 {
            return (self.to, true);
        }
        (self.from + (self.to - self.from) * p as f32, false)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn delay(&mut self, by: f64) {
        self.start_time += by;
    }
}
