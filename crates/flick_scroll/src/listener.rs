//! Scroll notifications
//!
//! Hosts observe a surface through [`ScrollListener`]. Every method has a
//! no-op default so a host only implements what it cares about.
//!
//! Notifications are delivered after the surface has finished updating its
//! own state for the current call, so a listener always sees a consistent
//! surface. A listener cannot call back into the surface that owns it; hosts
//! that need to react (stop an animation when an edge is hit, for example)
//! record the event and act on it after the call returns.

use flick_core::{Axis, Point};

/// One notification
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEvent {
    DragStart,
    DragStop,
    AnimateStart,
    AnimateStop,
    /// The offset changed
    Scroll(Point),
    ScrollLeft,
    ScrollRight,
    ScrollUp,
    ScrollDown,
    EdgeLeft,
    EdgeRight,
    EdgeTop,
    EdgeBottom,
    /// An indicator was shown or hidden
    IndicatorVisibility(Axis, bool),
    /// The current page changed
    PageChanged { horizontal: i32, vertical: i32 },
}

/// Observer of a scroll surface
pub trait ScrollListener {
    /// Entry point for every notification
    ///
    /// The default routes to the dedicated methods below; override this to
    /// receive everything in one place.
    fn notify(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::DragStart => self.on_drag_start(),
            ScrollEvent::DragStop => self.on_drag_stop(),
            ScrollEvent::AnimateStart => self.on_animate_start(),
            ScrollEvent::AnimateStop => self.on_animate_stop(),
            ScrollEvent::Scroll(offset) => self.on_scroll(offset),
            ScrollEvent::ScrollLeft => self.on_scroll_left(),
            ScrollEvent::ScrollRight => self.on_scroll_right(),
            ScrollEvent::ScrollUp => self.on_scroll_up(),
            ScrollEvent::ScrollDown => self.on_scroll_down(),
            ScrollEvent::EdgeLeft => self.on_edge_left(),
            ScrollEvent::EdgeRight => self.on_edge_right(),
            ScrollEvent::EdgeTop => self.on_edge_top(),
            ScrollEvent::EdgeBottom => self.on_edge_bottom(),
            ScrollEvent::IndicatorVisibility(axis, visible) => {
                self.on_indicator_visibility(axis, visible)
            }
            ScrollEvent::PageChanged {
                horizontal,
                vertical,
            } => self.on_page_changed(horizontal, vertical),
        }
    }

    fn on_drag_start(&mut self) {}
    fn on_drag_stop(&mut self) {}
    fn on_animate_start(&mut self) {}
    fn on_animate_stop(&mut self) {}
    fn on_scroll(&mut self, _offset: Point) {}
    fn on_scroll_left(&mut self) {}
    fn on_scroll_right(&mut self) {}
    fn on_scroll_up(&mut self) {}
    fn on_scroll_down(&mut self) {}
    fn on_edge_left(&mut self) {}
    fn on_edge_right(&mut self) {}
    fn on_edge_top(&mut self) {}
    fn on_edge_bottom(&mut self) {}
    fn on_indicator_visibility(&mut self, _axis: Axis, _visible: bool) {}
    fn on_page_changed(&mut self, _horizontal: i32, _vertical: i32) {}
}

/// A listener that ignores everything
impl ScrollListener for () {}

/// Collects every notification, mostly for tests and tooling
impl ScrollListener for Vec<ScrollEvent> {
    fn notify(&mut self, event: ScrollEvent) {
        self.push(event);
    }
}
