use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Ticket identifying one rebuild request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Orders concurrent rebuilds so a slow, stale result never replaces a newer one
///
/// Call [`begin`](Self::begin) when a rebuild is requested and
/// [`publish`](Self::publish) with the finished value. Only the most
/// recently issued generation is accepted.
#[derive(Debug)]
pub struct RebuildSequencer<T> {
    issued: AtomicU64,
    slot: Mutex<Option<(Generation, T)>>,
}

impl<T> Default for RebuildSequencer<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            slot: Mutex::new(None),
        }
    }
}

impl<T> RebuildSequencer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation; every earlier one becomes stale
    pub fn begin(&self) -> Generation {
        Generation(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.issued.load(Ordering::SeqCst) == generation.0
    }

    /// Store `value` if `generation` is still the latest request.
    ///
    /// Returns `false` and drops the value when it is stale.
    pub fn publish(&self, generation: Generation, value: T) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let newer_published = slot.as_ref().is_some_and(|(stored, _)| *stored >= generation);
        if newer_published || !self.is_current(generation) {
            tracing::debug!(
                generation = generation.0,
                latest = self.issued.load(Ordering::SeqCst),
                "discarding stale rebuild"
            );
            return false;
        }
        *slot = Some((generation, value));
        true
    }

    /// Generation of the value currently held, if any
    pub fn published_generation(&self) -> Option<Generation> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(generation, _)| *generation)
    }
}

impl<T: Clone> RebuildSequencer<T> {
    /// Clone of the most recently accepted value
    pub fn latest(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, value)| value.clone())
    }
}
