//! Velocity estimation
//!
//! Turns the most recent gesture samples into a velocity and a predicted
//! pointer anchor. Only samples inside the smoothing window count, and the
//! window stops at the first direction reversal, so a pause or a wiggle at
//! release does not produce a phantom flick.

use flick_core::{Axis, Point, Vec2};
use smallvec::SmallVec;

use crate::config::ScrollConfig;
use crate::gesture::{AxisIntent, Sample, SampleHistory};

/// Most samples used for one estimate
const WINDOW_SAMPLES: usize = 3;

/// Result of one estimation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Estimate {
    /// Pointer velocity in px/s
    pub velocity: Vec2,
    /// Predicted pointer position
    pub anchor: Point,
    /// Samples that contributed
    pub samples: usize,
}

/// Deterministic velocity estimator with reversal clamping
#[derive(Clone, Debug)]
pub struct VelocityEstimator {
    window: f64,
    lookahead: f64,
    min_frame_time: f64,
    previous: Option<Estimate>,
}

impl VelocityEstimator {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            window: config.smooth_time_window,
            lookahead: config.prediction_lookahead,
            min_frame_time: config.min_frame_time,
            previous: None,
        }
    }

    /// Forget the previous output; called at the start of each gesture
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Estimate velocity and anchor at time `now` along the `intent` axes
    pub fn estimate(&mut self, history: &SampleHistory, now: f64, intent: AxisIntent) -> Estimate {
        let Some(latest) = history.latest() else {
            return Estimate::default();
        };

        let window = self.recent_samples(history, now);
        let mut estimate = match window.as_slice() {
            [] | [_] => Estimate {
                velocity: Vec2::ZERO,
                anchor: latest.position,
                samples: window.len(),
            },
            [s0, s1] => self.extrapolate(s0, s1, now, 2),
            // Span the whole window so uneven sample spacing averages out
            [s0, _, s2, ..] => self.extrapolate(s0, s2, now, 3),
        };
        estimate.velocity = intent.mask(estimate.velocity);

        if let Some(previous) = self.previous {
            for axis in Axis::BOTH {
                if !intent.along(axis) {
                    continue;
                }
                let v = estimate.velocity.along(axis);
                let prev_v = previous.velocity.along(axis);
                let prev_anchor = previous.anchor.along(axis);
                let anchor = estimate.anchor.along(axis);

                let reversed = prev_v != 0.0 && (v == 0.0 || v * prev_v < 0.0);
                let backtracked =
                    (v > 0.0 && anchor < prev_anchor) || (v < 0.0 && anchor > prev_anchor);
                if reversed || (prev_v != 0.0 && backtracked) {
                    estimate.anchor.set_along(axis, prev_anchor);
                }
            }
        }

        tracing::trace!(
            "velocity estimate {:?} from {} samples, anchor {:?}",
            estimate.velocity,
            estimate.samples,
            estimate.anchor
        );
        self.previous = Some(estimate);
        estimate
    }

    /// Samples inside the time window, newest first, cut at a direction change
    fn recent_samples(
        &self,
        history: &SampleHistory,
        now: f64,
    ) -> SmallVec<[Sample; WINDOW_SAMPLES]> {
        let mut picked: SmallVec<[Sample; WINDOW_SAMPLES]> = SmallVec::new();
        let mut direction: Option<Vec2> = None;

        for sample in history.iter() {
            if now - sample.time > self.window {
                break;
            }
            if let Some(&newer) = picked.last() {
                let step = newer.position - sample.position;
                if let Some(dir) = direction {
                    if dir.x * step.x < 0.0 || dir.y * step.y < 0.0 {
                        break;
                    }
                } else {
                    direction = Some(step);
                }
            }
            picked.push(sample);
            if picked.len() == WINDOW_SAMPLES {
                break;
            }
        }
        picked
    }

    /// Velocity over `newest - oldest`, projected ahead of `newest`
    fn extrapolate(&self, newest: &Sample, oldest: &Sample, now: f64, samples: usize) -> Estimate {
        let dt = newest.time - oldest.time;
        let dt = if dt > 0.0 { dt } else { self.min_frame_time };
        let diff = newest.position - oldest.position;
        let velocity = Vec2::new((diff.x as f64 / dt) as f32, (diff.y as f64 / dt) as f32);
        let ahead = ((now - newest.time) + self.lookahead) as f32;
        Estimate {
            velocity,
            anchor: newest.position + velocity * ahead,
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(samples: &[(f32, f64)]) -> SampleHistory {
        let mut history = SampleHistory::new();
        for &(x, t) in samples {
            history.push(Sample::new(Point::new(x, 0.0), t));
        }
        history
    }

    fn estimator() -> VelocityEstimator {
        VelocityEstimator::new(&ScrollConfig::default())
    }

    const X_ONLY: AxisIntent = AxisIntent { x: true, y: false };

    #[test]
    fn test_single_sample_has_zero_velocity() {
        let h = history(&[(42.0, 0.0)]);
        let est = estimator().estimate(&h, 0.0, X_ONLY);
        assert_eq!(est.velocity, Vec2::ZERO);
        assert_eq!(est.anchor, Point::new(42.0, 0.0));
        assert_eq!(est.samples, 1);
    }

    #[test]
    fn test_two_samples() {
        let h = history(&[(0.0, 0.0), (-20.0, 0.01)]);
        let est = estimator().estimate(&h, 0.01, X_ONLY);
        assert!((est.velocity.x + 2000.0).abs() < 1e-2);
        assert_eq!(est.samples, 2);
        // Anchor is pushed ahead of the pointer by the lookahead
        assert!(est.anchor.x < -20.0);
    }

    #[test]
    fn test_three_sample_average() {
        let h = history(&[(380.0, 0.016), (340.0, 0.032), (300.0, 0.048)]);
        let est = estimator().estimate(&h, 0.05, X_ONLY);
        // (300 - 380) / (0.048 - 0.016)
        assert!((est.velocity.x + 2500.0).abs() < 1.0);
        assert_eq!(est.samples, 3);
    }

    #[test]
    fn test_three_samples_uneven_spacing() {
        // A steady 1000 px/s drag whose last frame arrives 1 ms after the one before
        let h = history(&[(300.0, 0.0), (200.0, 0.1), (199.0, 0.101)]);
        let est = estimator().estimate(&h, 0.101, X_ONLY);
        assert_eq!(est.samples, 3);
        assert!((est.velocity.x + 1000.0).abs() < 1.0, "{:?}", est.velocity);

        // Skewed the other way: a long gap last must not inflate the speed
        let h = history(&[(300.0, 0.0), (299.0, 0.001), (200.0, 0.1)]);
        let est = estimator().estimate(&h, 0.1, X_ONLY);
        assert!((est.velocity.x + 1000.0).abs() < 1.0, "{:?}", est.velocity);
    }

    #[test]
    fn test_zero_elapsed_uses_floor() {
        let h = history(&[(0.0, 1.0), (10.0, 1.0)]);
        let est = estimator().estimate(&h, 1.0, X_ONLY);
        assert!(est.velocity.x.is_finite());
        assert!((est.velocity.x - 907.5).abs() < 0.5);
    }

    #[test]
    fn test_stale_samples_ignored() {
        let h = history(&[(0.0, 0.0), (-600.0, 0.05)]);
        let est = estimator().estimate(&h, 1.0, X_ONLY);
        assert_eq!(est.velocity, Vec2::ZERO);
        assert_eq!(est.anchor, Point::new(-600.0, 0.0));
    }

    #[test]
    fn test_reversal_cuts_window() {
        // Moving left, then a small twitch right just before release
        let h = history(&[(100.0, 0.00), (60.0, 0.01), (20.0, 0.02), (24.0, 0.03)]);
        let est = estimator().estimate(&h, 0.03, X_ONLY);
        assert_eq!(est.samples, 2);
        assert!(est.velocity.x > 0.0);
    }

    #[test]
    fn test_masked_axis() {
        let mut h = SampleHistory::new();
        h.push(Sample::new(Point::new(0.0, 0.0), 0.0));
        h.push(Sample::new(Point::new(10.0, 30.0), 0.01));
        let est = estimator().estimate(&h, 0.01, X_ONLY);
        assert_eq!(est.velocity.y, 0.0);
        assert!(est.velocity.x > 0.0);
    }

    #[test]
    fn test_no_backtrack_past_previous_anchor() {
        let mut est = estimator();
        let first = est.estimate(&history(&[(0.0, 0.0), (-40.0, 0.01)]), 0.01, X_ONLY);

        // Same direction, but the new prediction lands behind the last one
        let h = history(&[(0.0, 0.0), (-40.0, 0.01), (-41.0, 0.05)]);
        let second = est.estimate(&h, 0.05, X_ONLY);
        assert!(second.velocity.x < 0.0);
        assert_eq!(second.anchor.x, first.anchor.x);
    }

    #[test]
    fn test_deterministic() {
        let h = history(&[(0.0, 0.0), (-12.0, 0.016), (-30.0, 0.033)]);
        let a = estimator().estimate(&h, 0.04, X_ONLY);
        let b = estimator().estimate(&h, 0.04, X_ONLY);
        assert_eq!(a, b);
    }
}
