//! Scroll-to animator
//!
//! Programmatic, time-bounded travel to an explicit offset on one axis.

use flick_animation::Easing;
use flick_core::Axis;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollToAnimator {
    pub axis: Axis,
    pub from: f32,
    pub to: f32,
    pub start_time: f64,
    pub end_time: f64,
}

impl ScrollToAnimator {
    pub fn new(axis: Axis, from: f32, to: f32, start_time: f64, duration: f64) -> Self {
        tracing::debug!("scroll-to {:?} {} -> {} over {:.3}s", axis, from, to, duration);
        Self {
            axis,
            from,
            to,
            start_time,
            end_time: start_time + duration.max(0.0),
        }
    }

    /// Offset at `now` and whether the target was reached
    pub fn sample(&self, now: f64) -> (f32, bool) {
        let span = self.end_time - self.start_time;
        if span <= 0.0 || now >= self.end_time {
            return (self.to, true);
        }
        let p = Easing::EaseOutQuad.apply((now - self.start_time) / span);
        (self.from + (self.to - self.from) * p as f32, false)
    }

    pub fn delay(&mut self, by: f64) {
        self.start_time += by;
        self.end_time += by;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eases_out_to_target() {
        let anim = ScrollToAnimator::new(Axis::Vertical, 0.0, 400.0, 1.0, 0.5);

        assert_eq!(anim.sample(1.0), (0.0, false));
        let (mid, done) = anim.sample(1.25);
        assert!(!done);
        assert!((mid - 300.0).abs() < 1e-3);
        assert_eq!(anim.sample(1.5), (400.0, true));
        assert_eq!(anim.sample(9.0), (400.0, true));
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let anim = ScrollToAnimator::new(Axis::Horizontal, 10.0, 20.0, 0.0, 0.0);
        assert_eq!(anim.sample(0.0), (20.0, true));
    }

    #[test]
    fn test_delay() {
        let mut anim = ScrollToAnimator::new(Axis::Horizontal, 0.0, 100.0, 0.0, 1.0);
        let before = anim.sample(0.5);
        anim.delay(0.25);
        assert_eq!(anim.sample(0.75), before);
    }
}
