//! Shared tick counter between the sampling and dispatch contexts.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::phase::Direction;

/// Signed tick counter shared between a sampling context and a dispatch
/// context.
///
/// The sampling side calls [`record`](Self::record) or [`add`](Self::add);
/// the dispatch side calls [`drain`](Self::drain), which reads and zeroes
/// the counter inside one lock so a concurrent increment can be neither
/// lost nor double-counted. The counter may grow past ±1 between drains
/// when dispatch runs slower than sampling.
///
/// The mutex flavor *is* the concurrency model:
///
/// - [`NoopRawMutex`] when sampling and dispatch share one execution
///   context (a plain poll loop) — the lock compiles away and this is a
///   local cell.
/// - [`CriticalSectionRawMutex`] when sampling runs from pin-change
///   wakeups — preemption is suspended for exactly the read-modify-write.
///
/// Share it by reference with both sides (typically `&'static` out of a
/// `StaticCell`); all methods take `&self`.
///
/// [`NoopRawMutex`]: embassy_sync::blocking_mutex::raw::NoopRawMutex
/// [`CriticalSectionRawMutex`]: embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex
pub struct TickAccumulator<M: RawMutex> {
    ticks: Mutex<M, Cell<i32>>,
}

impl<M: RawMutex> TickAccumulator<M> {
    /// Create an empty accumulator.
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Record a decoded direction. [`Direction::None`] is a no-op.
    pub fn record(&self, direction: Direction) {
        self.add(direction.delta());
    }

    /// Add a signed tick delta. A zero delta does not take the lock.
    pub fn add(&self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.ticks.lock(|t| t.set(t.get().saturating_add(delta)));
    }

    /// Read and zero the counter, returning the pre-reset sum.
    pub fn drain(&self) -> i32 {
        self.ticks.lock(|t| t.replace(0))
    }
}

impl<M: RawMutex> Default for TickAccumulator<M> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
