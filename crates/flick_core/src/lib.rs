//! Flick Core
//!
//! Foundational primitives shared by the Flick scrolling crates:
//!
//! - **Geometry**: points, sizes, rectangles, and per-axis access
//! - **Input Events**: pointer and wheel samples with a `consumed` claim flag
//! - **State Transitions**: small event-driven state machines
//!
//! # Example
//!
//! ```rust
//! use flick_core::{Axis, Point, Size};
//!
//! let viewport = Size::new(300.0, 300.0);
//! let content = Size::new(900.0, 300.0);
//! let max = content.overflow(viewport);
//!
//! assert_eq!(max, Point::new(600.0, 0.0));
//! assert_eq!(max.along(Axis::Horizontal), 600.0);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Modifiers, MouseButton, PointerEvent, WheelDirection, WheelEvent};
pub use fsm::{EventId, Machine, StateTransitions};
pub use geometry::{Axis, Point, Rect, Size, Vec2};
