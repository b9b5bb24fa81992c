//! Host input events
//!
//! Pointer and wheel samples delivered by the host toolkit. Every event
//! carries a `consumed` flag that a scroller sets once it claims the gesture
//! so that outer containers can ignore it.

use crate::geometry::Point;

/// Event type identifier used by the engine's state machines
pub type EventType = u32;

/// Event identifiers fed to [`StateTransitions`](crate::fsm::StateTransitions)
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    /// Pointer travelled past the drag threshold
    pub const DRAG_THRESHOLD: EventType = 6;
    /// Gesture stolen by hold, freeze, or a nested scroller
    pub const GESTURE_CANCEL: EventType = 7;

    pub const ANIMATION_SETTLE: EventType = 20;
    pub const ANIMATION_CANCEL: EventType = 21;
}

/// Pointer button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Primary,
    Secondary,
    Middle,
    Other(u8),
}

/// Keyboard modifiers active while the event was generated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub hyper: bool,
    pub super_key: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
        hyper: false,
        super_key: false,
    };

    /// True when a modifier other than shift is held
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta || self.hyper || self.super_key
    }
}

/// A pointer down/move/up sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in the surface's coordinate space
    pub position: Point,
    pub button: MouseButton,
    /// Seconds, monotonic
    pub timestamp: f64,
    /// Another handler already owns this gesture
    pub on_hold: bool,
    /// Set by the scroller once it claims the gesture
    pub consumed: bool,
}

impl PointerEvent {
    /// Primary-button sample at `(x, y)`
    pub fn new(x: f32, y: f32, timestamp: f64) -> Self {
        Self {
            position: Point::new(x, y),
            button: MouseButton::Primary,
            timestamp,
            on_hold: false,
            consumed: false,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn on_hold(mut self) -> Self {
        self.on_hold = true;
        self
    }
}

/// Wheel rotation direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WheelDirection {
    #[default]
    Vertical,
    Horizontal,
}

impl WheelDirection {
    pub fn swapped(self) -> Self {
        match self {
            WheelDirection::Vertical => WheelDirection::Horizontal,
            WheelDirection::Horizontal => WheelDirection::Vertical,
        }
    }
}

/// A mouse wheel notch event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    pub direction: WheelDirection,
    /// Signed notch count, positive scrolls toward the content end
    pub notches: i32,
    pub modifiers: Modifiers,
    pub timestamp: f64,
    pub on_hold: bool,
    pub consumed: bool,
}

impl WheelEvent {
    pub fn new(direction: WheelDirection, notches: i32, timestamp: f64) -> Self {
        Self {
            direction,
            notches,
            modifiers: Modifiers::NONE,
            timestamp,
            on_hold: false,
            consumed: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
