//! Gesture capture
//!
//! A [`GestureSession`] lives from pointer-down to pointer-up. It keeps the
//! drag origin, the axes the drag is allowed to move, and a bounded history
//! of recent samples for velocity estimation.

use flick_core::events::event_types::*;
use flick_core::{EventId, Machine, Point, StateTransitions, Vec2};

/// Number of samples kept per gesture
pub const HISTORY_CAPACITY: usize = 60;

// ============================================================================
// Samples
// ============================================================================

/// A pointer position at a point in time
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub position: Point,
    /// Seconds
    pub time: f64,
}

impl Sample {
    pub fn new(position: Point, time: f64) -> Self {
        Self { position, time }
    }
}

/// Fixed-capacity sample ring, iterated most recent first
///
/// Once full, each push overwrites the oldest sample.
#[derive(Clone, Debug)]
pub struct SampleHistory {
    samples: [Sample; HISTORY_CAPACITY],
    /// Index of the most recent sample
    head: usize,
    len: usize,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self {
            samples: [Sample::default(); HISTORY_CAPACITY],
            head: 0,
            len: 0,
        }
    }
}

impl SampleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.head = (self.head + 1) % HISTORY_CAPACITY;
        self.samples[self.head] = sample;
        self.len = (self.len + 1).min(HISTORY_CAPACITY);
    }

    /// Sample `age` pushes ago, `0` being the latest
    pub fn get(&self, age: usize) -> Option<Sample> {
        if age >= self.len {
            return None;
        }
        let idx = (self.head + HISTORY_CAPACITY - age) % HISTORY_CAPACITY;
        Some(self.samples[idx])
    }

    pub fn latest(&self) -> Option<Sample> {
        self.get(0)
    }

    /// Most recent first
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len).filter_map(move |age| self.get(age))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

// ============================================================================
// Axis policy
// ============================================================================

/// How a drag picks its axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SingleDirection {
    /// Both axes follow the pointer
    None,
    /// One axis when its delta is more than twice the other, else both
    #[default]
    Soft,
    /// Always the axis with the larger delta
    Hard,
}

/// Axes a surface refuses to move along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementBlock {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl MovementBlock {
    pub fn blocks_x(self) -> bool {
        matches!(self, MovementBlock::Horizontal | MovementBlock::Both)
    }

    pub fn blocks_y(self) -> bool {
        matches!(self, MovementBlock::Vertical | MovementBlock::Both)
    }
}

/// Per-axis drag intent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisIntent {
    pub x: bool,
    pub y: bool,
}

impl AxisIntent {
    pub const NONE: AxisIntent = AxisIntent { x: false, y: false };
    pub const BOTH: AxisIntent = AxisIntent { x: true, y: true };

    pub fn any(self) -> bool {
        self.x || self.y
    }

    pub fn along(self, axis: flick_core::Axis) -> bool {
        match axis {
            flick_core::Axis::Horizontal => self.x,
            flick_core::Axis::Vertical => self.y,
        }
    }

    /// Zero the components of `v` on axes without intent
    pub fn mask(self, v: Vec2) -> Vec2 {
        Vec2::new(
            if self.x { v.x } else { 0.0 },
            if self.y { v.y } else { 0.0 },
        )
    }
}

/// Decide which axes a drag of `delta` moves
///
/// Returns [`AxisIntent::NONE`] when the direction is still ambiguous
/// (equal deltas in hard mode); the caller retries on the next sample.
pub fn axis_intent(delta: Vec2, mode: SingleDirection, block: MovementBlock) -> AxisIntent {
    let dx = delta.x.abs();
    let dy = delta.y.abs();

    let intent = match mode {
        SingleDirection::None => AxisIntent::BOTH,
        SingleDirection::Soft => {
            if dx > dy * 2.0 {
                AxisIntent { x: true, y: false }
            } else if dy > dx * 2.0 {
                AxisIntent { x: false, y: true }
            } else {
                AxisIntent::BOTH
            }
        }
        SingleDirection::Hard => {
            if dx > dy {
                AxisIntent { x: true, y: false }
            } else if dy > dx {
                AxisIntent { x: false, y: true }
            } else {
                AxisIntent::NONE
            }
        }
    };

    AxisIntent {
        x: intent.x && !block.blocks_x(),
        y: intent.y && !block.blocks_y(),
    }
}

/// Rubber-band a candidate offset on one axis
///
/// Past a bound, the excess is pulled back toward the bound by `friction`
/// (0 keeps the full excess, 1 removes it). When the axis has no scroll
/// range at all, movement is damped toward the drag origin instead.
pub fn border_friction(candidate: f32, origin: f32, min: f32, max: f32, friction: f32) -> f32 {
    if candidate < min {
        candidate + (min - candidate) * friction
    } else if max <= min {
        candidate + (origin - candidate) * friction
    } else if candidate > max {
        candidate + (max - candidate) * friction
    } else {
        candidate
    }
}

// ============================================================================
// Session
// ============================================================================

/// Lifecycle of one pointer interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// Down, but still inside the drag threshold
    Pressed,
    Dragging,
    Released,
    /// Claimed by someone else; remaining samples are ignored
    Cancelled,
}

impl StateTransitions for GesturePhase {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use GesturePhase::*;
        match (self, event) {
            (Pressed, DRAG_THRESHOLD) => Some(Dragging),
            (Pressed | Dragging, POINTER_UP) => Some(Released),
            (Pressed | Dragging, GESTURE_CANCEL) => Some(Cancelled),
            _ => None,
        }
    }
}

/// Transient state for one pointer-down .. pointer-up interaction
#[derive(Clone, Debug)]
pub struct GestureSession {
    origin: Point,
    origin_offset: Point,
    phase: Machine<GesturePhase>,
    intent: AxisIntent,
    history: SampleHistory,
    /// Origin must be re-anchored before the next drag step
    rebase: bool,
}

impl GestureSession {
    /// Start a session at `position` with the surface at `offset`
    pub fn begin(position: Point, offset: Point, time: f64) -> Self {
        let mut history = SampleHistory::new();
        history.push(Sample::new(position, time));
        Self {
            origin: position,
            origin_offset: offset,
            phase: Machine::new(GesturePhase::Pressed),
            intent: AxisIntent::NONE,
            history,
            rebase: false,
        }
    }

    pub fn record(&mut self, position: Point, time: f64) {
        self.history.push(Sample::new(position, time));
    }

    /// Squared-distance check against the drag threshold
    pub fn passed_threshold(&self, position: Point, threshold: f32) -> bool {
        (position - self.origin).length_squared() > threshold * threshold
    }

    /// Enter the dragging phase along `intent`
    pub fn begin_drag(&mut self, intent: AxisIntent) {
        self.intent = intent;
        self.phase.send(DRAG_THRESHOLD);
    }

    pub fn cancel(&mut self) {
        self.phase.send(GESTURE_CANCEL);
    }

    pub fn release(&mut self) -> GesturePhase {
        self.phase.send(POINTER_UP)
    }

    /// Offset that puts the content under `pointer` where it was at down
    ///
    /// Axes without intent stay at the origin offset.
    pub fn candidate_offset(&self, pointer: Point) -> Point {
        let moved = self.intent.mask(pointer - self.origin);
        self.origin_offset - moved
    }

    /// Mark the origin stale, e.g. after a hold interrupted the drag
    pub fn request_rebase(&mut self) {
        self.rebase = true;
    }

    /// Re-anchor at `position`/`offset` if a rebase was requested
    pub fn rebase_if_needed(&mut self, position: Point, offset: Point) {
        if self.rebase {
            self.origin = position;
            self.origin_offset = offset;
            self.rebase = false;
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase.current()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase.is(GesturePhase::Dragging)
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase.is(GesturePhase::Cancelled)
    }

    pub fn intent(&self) -> AxisIntent {
        self.intent
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn origin_offset(&self) -> Point {
        self.origin_offset
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }
}
