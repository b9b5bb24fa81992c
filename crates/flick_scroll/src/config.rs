//! Scroll physics configuration
//!
//! Every tunable lives in [`ScrollConfig`]. Values can come from the
//! defaults, a TOML document, and `FLICK_THUMBSCROLL_*` environment
//! overrides, applied in that order.
//!
//! ```toml
//! thumbscroll_threshold = 16.0
//! bounce_enabled = false
//! momentum_curve = [0.0, 0.23, 0.18, 1.0]
//! ```

use std::fs;
use std::path::Path;

use flick_animation::Easing;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollError};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "FLICK_THUMBSCROLL_";

/// Kinetic scrolling tunables
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScrollConfig {
    /// Distance in pixels the pointer must travel before a drag begins
    #[serde(default = "default_threshold")]
    pub thumbscroll_threshold: f32,
    /// Minimum release speed (px/s) that starts momentum
    #[serde(default = "default_momentum_threshold")]
    pub momentum_threshold: f32,
    /// Seconds of travel per unit of release velocity
    #[serde(default = "default_friction")]
    pub friction: f32,
    /// Momentum animation length in seconds
    #[serde(default = "default_momentum_duration")]
    pub momentum_duration: f64,
    /// Cubic-bezier control points for momentum deceleration
    #[serde(default = "default_momentum_curve")]
    pub momentum_curve: [f64; 4],
    /// Base duration of a bounce back to the edge
    #[serde(default = "default_half")]
    pub bounce_friction: f64,
    /// Global switch for edge bounce
    #[serde(default = "default_true")]
    pub bounce_enabled: bool,
    /// Fraction of overshoot kept while dragging past an edge
    #[serde(default = "default_half_f32")]
    pub border_friction: f32,
    /// Overscroll margin as a fraction of the viewport extent
    #[serde(default = "default_max_overscroll")]
    pub max_overscroll: f32,
    /// Release speed above which a repeated flick gains the stacking bonus
    #[serde(default = "default_acceleration_threshold")]
    pub acceleration_threshold: f32,
    /// Maximum gap between flicks for the stacking bonus
    #[serde(default = "default_half")]
    pub acceleration_time_limit: f64,
    /// Weight of the previous flick velocity added by stacking
    #[serde(default = "default_acceleration_weight")]
    pub acceleration_weight: f32,
    /// Velocity cap in viewports per second
    #[serde(default = "default_max_velocity_viewports")]
    pub max_velocity_viewports: f32,
    /// Scroll-to duration used when snapping to a page
    #[serde(default = "default_half")]
    pub page_scroll_friction: f64,
    /// Scroll-to duration used by bring-in and paged wheel steps
    #[serde(default = "default_half")]
    pub bring_in_scroll_friction: f64,
    /// Samples older than this (seconds) are ignored when estimating velocity
    #[serde(default = "default_smooth_time_window")]
    pub smooth_time_window: f64,
    /// Forward extrapolation of the drag anchor in seconds
    #[serde(default = "default_prediction_lookahead")]
    pub prediction_lookahead: f64,
    /// Elapsed-time floor used when two samples share a timestamp
    #[serde(default = "default_min_frame_time")]
    pub min_frame_time: f64,
    /// Follow the estimator's predicted anchor while dragging
    #[serde(default)]
    pub smooth_drag: bool,
    /// Wheel step per notch, horizontal then vertical
    #[serde(default = "default_wheel_step")]
    pub wheel_step: [f32; 2],
}

fn default_threshold() -> f32 {
    24.0
}

fn default_momentum_threshold() -> f32 {
    100.0
}

fn default_friction() -> f32 {
    1.0
}

fn default_momentum_duration() -> f64 {
    1.0
}

fn default_momentum_curve() -> [f64; 4] {
    [0.0, 0.23, 0.18, 1.0]
}

fn default_half() -> f64 {
    0.5
}

fn default_half_f32() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_max_overscroll() -> f32 {
    0.3
}

fn default_acceleration_threshold() -> f32 {
    2000.0
}

fn default_acceleration_weight() -> f32 {
    1.5
}

fn default_max_velocity_viewports() -> f32 {
    4.0
}

fn default_smooth_time_window() -> f64 {
    0.2
}

fn default_prediction_lookahead() -> f64 {
    0.005
}

fn default_min_frame_time() -> f64 {
    1.0 / 90.75
}

fn default_wheel_step() -> [f32; 2] {
    [32.0, 32.0]
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            thumbscroll_threshold: default_threshold(),
            momentum_threshold: default_momentum_threshold(),
            friction: default_friction(),
            momentum_duration: default_momentum_duration(),
            momentum_curve: default_momentum_curve(),
            bounce_friction: default_half(),
            bounce_enabled: true,
            border_friction: default_half_f32(),
            max_overscroll: default_max_overscroll(),
            acceleration_threshold: default_acceleration_threshold(),
            acceleration_time_limit: default_half(),
            acceleration_weight: default_acceleration_weight(),
            max_velocity_viewports: default_max_velocity_viewports(),
            page_scroll_friction: default_half(),
            bring_in_scroll_friction: default_half(),
            smooth_time_window: default_smooth_time_window(),
            prediction_lookahead: default_prediction_lookahead(),
            min_frame_time: default_min_frame_time(),
            smooth_drag: false,
            wheel_step: default_wheel_step(),
        }
    }
}

impl ScrollConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ScrollConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config.sanitized())
    }

    /// Load a TOML file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        tracing::debug!("loading scroll config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ScrollError::InvalidConfig(e.to_string()))
    }

    /// Apply `FLICK_THUMBSCROLL_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Unparsable values are ignored and logged.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, value)) = read("THRESHOLD") {
            override_value(&key, &value, &mut self.thumbscroll_threshold);
        }
        if let Some((key, value)) = read("MOMENTUM_THRESHOLD") {
            override_value(&key, &value, &mut self.momentum_threshold);
        }
        if let Some((key, value)) = read("FRICTION") {
            override_value(&key, &value, &mut self.friction);
        }
        if let Some((key, value)) = read("BOUNCE_FRICTION") {
            override_value(&key, &value, &mut self.bounce_friction);
        }
        if let Some((key, value)) = read("BORDER_FRICTION") {
            override_value(&key, &value, &mut self.border_friction);
        }
        if let Some((key, value)) = read("BOUNCE_ENABLE") {
            match value.trim() {
                "1" | "true" => self.bounce_enabled = true,
                "0" | "false" => self.bounce_enabled = false,
                other => tracing::warn!("ignoring {}={:?}: expected 0/1", key, other),
            }
        }

        self.sanitized()
    }

    /// Reject values that cannot be clamped into something meaningful
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("thumbscroll_threshold", self.thumbscroll_threshold as f64),
            ("momentum_threshold", self.momentum_threshold as f64),
            ("friction", self.friction as f64),
            ("momentum_duration", self.momentum_duration),
            ("bounce_friction", self.bounce_friction),
            ("border_friction", self.border_friction as f64),
            ("max_overscroll", self.max_overscroll as f64),
            ("acceleration_threshold", self.acceleration_threshold as f64),
            ("acceleration_time_limit", self.acceleration_time_limit),
            ("acceleration_weight", self.acceleration_weight as f64),
            ("max_velocity_viewports", self.max_velocity_viewports as f64),
            ("page_scroll_friction", self.page_scroll_friction),
            ("bring_in_scroll_friction", self.bring_in_scroll_friction),
            ("smooth_time_window", self.smooth_time_window),
            ("prediction_lookahead", self.prediction_lookahead),
            ("min_frame_time", self.min_frame_time),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ScrollError::InvalidConfig(format!("{} must be finite", name)));
            }
        }
        if self.momentum_curve.iter().any(|v| !v.is_finite()) {
            return Err(ScrollError::InvalidConfig(
                "momentum_curve must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamp every value into its usable range
    pub fn sanitized(mut self) -> Self {
        clamp_field("thumbscroll_threshold", &mut self.thumbscroll_threshold, 0.0, f32::MAX);
        clamp_field("momentum_threshold", &mut self.momentum_threshold, 0.0, f32::MAX);
        clamp_field("friction", &mut self.friction, 0.0, f32::MAX);
        clamp_field("momentum_duration", &mut self.momentum_duration, 0.0, f64::MAX);
        clamp_field("bounce_friction", &mut self.bounce_friction, 0.0, f64::MAX);
        clamp_field("border_friction", &mut self.border_friction, 0.0, 1.0);
        clamp_field("max_overscroll", &mut self.max_overscroll, 0.0, f32::MAX);
        clamp_field("acceleration_weight", &mut self.acceleration_weight, 0.0, f32::MAX);
        clamp_field("max_velocity_viewports", &mut self.max_velocity_viewports, 0.0, f32::MAX);
        clamp_field("smooth_time_window", &mut self.smooth_time_window, 0.0, f64::MAX);
        clamp_field("min_frame_time", &mut self.min_frame_time, 1e-4, 1.0);
        // The x coordinates of a timing curve must stay inside the unit interval
        clamp_field("momentum_curve[0]", &mut self.momentum_curve[0], 0.0, 1.0);
        clamp_field("momentum_curve[2]", &mut self.momentum_curve[2], 0.0, 1.0);
        self
    }

    /// Easing used by the momentum animator
    pub fn momentum_easing(&self) -> Easing {
        let [x1, y1, x2, y2] = self.momentum_curve;
        Easing::CubicBezier(x1, y1, x2, y2)
    }

    /// Overscroll margin in pixels for a viewport extent
    pub fn overscroll_margin(&self, viewport_extent: f32) -> f32 {
        (viewport_extent * self.max_overscroll).max(0.0)
    }
}

fn override_value<T: std::str::FromStr>(key: &str, value: &str, slot: &mut T) {
    match value.trim().parse::<T>() {
        Ok(parsed) => {
            tracing::debug!("config override {}={}", key, value);
            *slot = parsed;
        }
        Err(_) => tracing::warn!("ignoring unparsable {}={:?}", key, value),
    }
}

fn clamp_field<T>(name: &str, value: &mut T, min: T, max: T)
where
    T: PartialOrd + Copy + std::fmt::Debug,
{
    let clamped = if *value < min {
        min
    } else if *value > max {
        max
    } else {
        *value
    };
    if clamped != *value {
        tracing::debug!("config {} clamped from {:?} to {:?}", name, value, clamped);
        *value = clamped;
    }
}
