//! Flick Animation
//!
//! Time-based easing and animator bookkeeping for kinetic scrolling.
//!
//! # Features
//!
//! - **Easing Curves**: ease-out quadratic for settling, CSS-style cubic
//!   bezier for momentum deceleration
//! - **Animator Registry**: slotmap handles with at most one live animator
//!   per kind, replaced by cancel-then-install

pub mod easing;
pub mod scheduler;

pub use easing::Easing;
pub use scheduler::{Animator, AnimatorHandle, AnimatorSet};
