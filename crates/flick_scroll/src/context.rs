//! Nested scroller context
//!
//! When scrollers nest, the innermost one that starts dragging an axis owns
//! it for the rest of the gesture. It locks that axis on every ancestor's
//! context; an ancestor sees the lock and leaves that axis alone.
//!
//! Surfaces are single-threaded, so the shared state is reference counted
//! with interior mutability.

use std::cell::Cell;
use std::rc::Rc;

use flick_core::Axis;

#[derive(Debug, Default)]
struct ContextNode {
    parent: Option<Rc<ContextNode>>,
    /// Descendant drags holding each axis
    locked_x: Cell<u32>,
    locked_y: Cell<u32>,
}

impl ContextNode {
    fn counter(&self, axis: Axis) -> &Cell<u32> {
        match axis {
            Axis::Horizontal => &self.locked_x,
            Axis::Vertical => &self.locked_y,
        }
    }
}

/// Handle to a surface's position in the scroller nesting
#[derive(Clone, Debug, Default)]
pub struct ScrollContext {
    node: Rc<ContextNode>,
}

impl ScrollContext {
    /// Context for an outermost scroller
    pub fn root() -> Self {
        Self::default()
    }

    /// Context for a scroller nested inside this one
    pub fn child(&self) -> Self {
        Self {
            node: Rc::new(ContextNode {
                parent: Some(self.node.clone()),
                ..Default::default()
            }),
        }
    }

    /// Claim or release `axis` on every ancestor
    pub fn lock(&self, axis: Axis, locked: bool) {
        let mut ancestor = self.node.parent.clone();
        while let Some(node) = ancestor {
            let counter = node.counter(axis);
            let value = if locked {
                counter.get().saturating_add(1)
            } else {
                counter.get().saturating_sub(1)
            };
            counter.set(value);
            ancestor = node.parent.clone();
        }
        tracing::trace!("context {:?} lock {}", axis, locked);
    }

    /// True while a nested scroller is dragging `axis`
    pub fn is_locked_by_descendant(&self, axis: Axis) -> bool {
        self.node.counter(axis).get() > 0
    }
}
