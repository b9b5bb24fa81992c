//! Animator registry
//!
//! Tracks the animators currently running on one scrollable surface. Each
//! animator belongs to a *kind*; installing an animator of a kind that is
//! already live cancels and releases the previous handle first, so the set
//! never holds two handles of the same kind.
//!
//! Handles are slotmap keys: a handle that was cancelled (or replaced) stays
//! invalid forever, which lets a caller detect that its animator was torn
//! down by a side effect of its own frame callback.

use std::fmt::Debug;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Opaque lifetime token for one running animator
    pub struct AnimatorHandle;
}

/// A live animator entry
#[derive(Clone, Copy, Debug)]
pub struct Animator<K, S> {
    pub kind: K,
    pub state: S,
}

/// Set of live animators, at most one per kind
pub struct AnimatorSet<K, S> {
    animators: SlotMap<AnimatorHandle, Animator<K, S>>,
    by_kind: SmallVec<[(K, AnimatorHandle); 6]>,
}

impl<K, S> Default for AnimatorSet<K, S>
where
    K: Copy + Eq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> AnimatorSet<K, S>
where
    K: Copy + Eq + Debug,
{
    pub fn new() -> Self {
        Self {
            animators: SlotMap::with_key(),
            by_kind: SmallVec::new(),
        }
    }

    /// Install an animator, cancelling any live animator of the same kind
    ///
    /// Returns the new handle and the replaced animator's state, if any.
    pub fn start(&mut self, kind: K, state: S) -> (AnimatorHandle, Option<S>) {
        let replaced = self.cancel(kind);
        let handle = self.animators.insert(Animator { kind, state });
        self.by_kind.push((kind, handle));
        tracing::trace!("animator {:?} started ({:?})", kind, handle);
        (handle, replaced)
    }

    /// Cancel the live animator of `kind`, returning its state
    pub fn cancel(&mut self, kind: K) -> Option<S> {
        let idx = self.by_kind.iter().position(|(k, _)| *k == kind)?;
        let (_, handle) = self.by_kind.swap_remove(idx);
        let animator = self.animators.remove(handle)?;
        tracing::trace!("animator {:?} released ({:?})", kind, handle);
        Some(animator.state)
    }

    /// Cancel every live animator, returning the kinds that were running
    pub fn clear(&mut self) -> SmallVec<[K; 6]> {
        let kinds = self.by_kind.iter().map(|(k, _)| *k).collect();
        self.by_kind.clear();
        self.animators.clear();
        kinds
    }

    /// Handle of the live animator of `kind`
    pub fn handle(&self, kind: K) -> Option<AnimatorHandle> {
        self.by_kind
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, handle)| *handle)
    }

    /// Whether `handle` still refers to a live animator
    pub fn is_live(&self, handle: AnimatorHandle) -> bool {
        self.animators.contains_key(handle)
    }

    pub fn is_active(&self, kind: K) -> bool {
        self.handle(kind).is_some()
    }

    pub fn get(&self, kind: K) -> Option<&S> {
        let handle = self.handle(kind)?;
        self.animators.get(handle).map(|a| &a.state)
    }

    pub fn get_mut(&mut self, kind: K) -> Option<&mut S> {
        let handle = self.handle(kind)?;
        self.animators.get_mut(handle).map(|a| &mut a.state)
    }

    /// State behind a specific handle
    pub fn state_mut(&mut self, handle: AnimatorHandle) -> Option<&mut S> {
        self.animators.get_mut(handle).map(|a| &mut a.state)
    }

    /// Remove the animator behind `handle` once it finished on its own
    pub fn finish(&mut self, handle: AnimatorHandle) -> Option<S> {
        let animator = self.animators.remove(handle)?;
        self.by_kind.retain(|(_, h)| *h != handle);
        tracing::trace!("animator {:?} finished ({:?})", animator.kind, handle);
        Some(animator.state)
    }

    /// Kinds currently running, in installation order
    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.by_kind.iter().map(|(k, _)| *k)
    }

    /// Iterate over all live animator states (mutable)
    pub fn states_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.animators.values_mut().map(|a| &mut a.state)
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    /// True when no kind has more than one handle and the index agrees with
    /// the slot storage
    pub fn check_invariant(&self) -> bool {
        if self.by_kind.len() != self.animators.len() {
            return false;
        }
        self.by_kind.iter().enumerate().all(|(i, (kind, handle))| {
            self.animators.get(*handle).map(|a| a.kind == *kind).unwrap_or(false)
                && self.by_kind[i + 1..].iter().all(|(k, _)| k != kind)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Kind {
        Momentum,
        BounceX,
        BounceY,
    }

    #[test]
    fn test_one_handle_per_kind() {
        let mut set: AnimatorSet<Kind, u32> = AnimatorSet::new();

        let (first, replaced) = set.start(Kind::Momentum, 1);
        assert!(replaced.is_none());

        let (second, replaced) = set.start(Kind::Momentum, 2);
        assert_eq!(replaced, Some(1));
        assert_ne!(first, second);
        assert!(!set.is_live(first));
        assert!(set.is_live(second));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(Kind::Momentum), Some(&2));
        assert!(set.check_invariant());
    }

    #[test]
    fn test_independent_kinds() {
        let mut set: AnimatorSet<Kind, u32> = AnimatorSet::new();
        set.start(Kind::BounceX, 10);
        set.start(Kind::BounceY, 20);

        assert_eq!(set.len(), 2);
        assert_eq!(set.cancel(Kind::BounceX), Some(10));
        assert!(!set.is_active(Kind::BounceX));
        assert!(set.is_active(Kind::BounceY));
        assert!(set.check_invariant());
    }

    #[test]
    fn test_finish_releases_handle() {
        let mut set: AnimatorSet<Kind, u32> = AnimatorSet::new();
        let (handle, _) = set.start(Kind::BounceY, 5);

        if let Some(state) = set.state_mut(handle) {
            *state += 1;
        }
        assert_eq!(set.finish(handle), Some(6));
        assert!(set.is_empty());
        assert_eq!(set.finish(handle), None);
        assert!(set.check_invariant());
    }

    #[test]
    fn test_stale_handle_after_replacement() {
        let mut set: AnimatorSet<Kind, u32> = AnimatorSet::new();
        let (old, _) = set.start(Kind::BounceX, 1);
        set.start(Kind::BounceX, 2);

        // A replaced handle can no longer finish the new animator
        assert_eq!(set.finish(old), None);
        assert_eq!(set.get(Kind::BounceX), Some(&2));
    }

    #[test]
    fn test_clear_reports_kinds() {
        let mut set: AnimatorSet<Kind, u32> = AnimatorSet::new();
        set.start(Kind::Momentum, 0);
        set.start(Kind::BounceY, 0);

        let kinds = set.clear();
        assert_eq!(kinds.as_slice(), &[Kind::Momentum, Kind::BounceY]);
        assert!(set.is_empty());
        assert_eq!(set.kinds().count(), 0);
    }
}
