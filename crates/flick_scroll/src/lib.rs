//! Flick Scroll
//!
//! A kinetic scrolling engine: it turns pointer drags, wheel steps and frame
//! ticks into a content offset, the way touch platforms scroll.
//!
//! # Features
//!
//! - **Drag**: threshold detection, axis locking, rubber-banded overscroll
//! - **Momentum**: release-velocity flicks on a deceleration curve, with
//!   stacking for repeated flicks
//! - **Bounce**: overscrolled axes spring back to the nearest bound
//! - **Paging**: snapping to page boundaries, page limits and page queries
//! - **Scrollbars**: normalized indicator values, visibility and dragging
//! - **Nesting**: inner scrollers claim axes from their ancestors
//!
//! The host owns the clock. It forwards input to a [`ScrollSurface`] and
//! calls [`ScrollSurface::tick`] once per frame while it reports activity.
//!
//! # Example
//!
//! ```rust
//! use flick_core::{Size, Vec2};
//! use flick_scroll::{ContentPan, ScrollConfig, ScrollSurface};
//!
//! let pan = ContentPan::new(Size::new(300.0, 300.0), Size::new(900.0, 300.0));
//! let mut surface: ScrollSurface<_> = ScrollSurface::new(pan, ScrollConfig::default(), ());
//!
//! surface.fling(Vec2::new(-600.0, 0.0), 0.0);
//! let mut t = 0.0;
//! while surface.tick(t) {
//!     t += 1.0 / 60.0;
//! }
//! assert!(surface.offset().x > 0.0);
//! ```

mod animate;
mod input;

pub mod bounce;
pub mod config;
pub mod context;
pub mod error;
pub mod gesture;
pub mod listener;
pub mod momentum;
pub mod pan;
pub mod paging;
pub mod scroll_to;
pub mod scrollbar;
pub mod surface;
pub mod velocity;

pub use config::ScrollConfig;
pub use context::ScrollContext;
pub use error::{Result, ScrollError};
pub use gesture::{MovementBlock, SingleDirection};
pub use listener::{ScrollEvent, ScrollListener};
pub use pan::{ContentPan, Pan};
pub use paging::{PageAxis, PageConfig};
pub use scrollbar::{Indicator, ScrollbarPolicy, Scrollbars};
pub use surface::{AnimatorKind, AnimatorState, ScrollState, ScrollSurface};
