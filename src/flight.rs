//! Single-flight execution slot.
//!
//! [`SingleFlight`] guarantees at most one climate sequence runs at a time
//! system-wide. Acquisition never blocks: a trigger arriving while a
//! sequence is in flight is dropped, not queued. The permit is an RAII
//! guard, so the slot is released on every exit path of the holding task,
//! including panics and early returns on error.
//!
//! # Thread Safety
//!
//! The slot is a `tokio::sync::Mutex` rather than `std::sync::Mutex`
//! because the holder keeps the permit across await points (the climate
//! wait). Clones share the same slot.
//!
//! # Example
//!
//! ```rust
//! use climate_button::SingleFlight;
//!
//! let flights = SingleFlight::new();
//!
//! let permit = flights.try_begin().expect("slot free");
//! assert!(flights.try_begin().is_none());
//!
//! drop(permit);
//! assert!(flights.try_begin().is_some());
//! ```

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Process-wide exclusive slot for the climate sequence.
///
/// Cheap to clone; all clones contend for the same slot.
#[derive(Clone, Debug, Default)]
pub struct SingleFlight {
    slot: Arc<Mutex<()>>,
}

/// Exclusive permit to run one sequence.
///
/// Dropping the permit frees the slot.
#[derive(Debug)]
pub struct FlightPermit {
    _guard: OwnedMutexGuard<()>,
}

impl SingleFlight {
    /// Creates a new, free slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to claim the slot without blocking.
    ///
    /// Returns `None` when a sequence is already in flight; the caller is
    /// expected to drop the trigger (never queue it).
    pub fn try_begin(&self) -> Option<FlightPermit> {
        Arc::clone(&self.slot)
            .try_lock_owned()
            .ok()
            .map(|guard| FlightPermit { _guard: guard })
    }

    /// Whether a sequence currently holds the slot.
    pub fn is_in_flight(&self) -> bool {
        match self.slot.try_lock() {
            Ok(_guard) => false,
            Err(_) => true,
        }
    }
}
