//! State transitions
//!
//! Gesture sessions and animators move through small, flat state machines.
//! States implement [`StateTransitions`] to map an event to the next state;
//! [`Machine`] holds the current state and applies events to it.

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Identifier for an event fed to a state machine
pub type EventId = EventType;

/// A state that knows its own transitions
///
/// # Example
///
/// ```rust
/// use flick_core::events::event_types::*;
/// use flick_core::StateTransitions;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Press {
///     Idle,
///     Down,
/// }
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Press::Idle, POINTER_DOWN) => Some(Press::Down),
///             (Press::Down, POINTER_UP) => Some(Press::Idle),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Press::Idle.on_event(POINTER_DOWN), Some(Press::Down));
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A running state machine over `S`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Machine<S: StateTransitions> {
    current: S,
}

impl<S: StateTransitions> Machine<S> {
    pub fn new(initial: S) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn is(&self, state: S) -> bool {
        self.current == state
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: EventId) -> S {
        if let Some(next) = self.current.on_event(event) {
            tracing::trace!("transition {:?} --{}--> {:?}", self.current, event, next);
            self.current = next;
        }
        self.current
    }
}
