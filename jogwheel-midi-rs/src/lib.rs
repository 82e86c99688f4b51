//! USB-MIDI Control-Change dispatch for the jog wheel encoder.
//!
//! This crate maps drained encoder ticks onto an outbound Control-Change
//! message stream: either one relative ±1 message per tick, or an absolute
//! 0–127 controller value that emits only when it changes.
//!
//! # Architecture
//!
//! - **[`UsbMidiPacket`] / [`Channel`]** — the fixed 4-byte Control-Change
//!   event and its channel encoding.
//! - **[`MidiSink`]** — the opaque outbound transport. Delivery is
//!   fire-and-forget; a sink that cannot deliver swallows the failure.
//! - **[`CcEmitter`]** — builds and queues one Control-Change per call,
//!   never flushes.
//! - **[`CcDispatcher`]** — one dispatch cycle: drain the shared
//!   accumulator, queue the policy's messages, flush once if anything was
//!   queued.
//! - **[`dispatch_loop`]** *(feature `task`)* — the periodic dispatch task.
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging and `Format` derives via [`defmt`].
//! - **`task`** — the [`dispatch_loop`] periodic task (pulls in
//!   `embassy-time`).

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "task")]
mod dispatch_task;
mod dispatcher;
mod emitter;
mod message;
mod sink;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use dispatch_task::dispatch_loop;
pub use dispatcher::{CcDispatcher, DispatchPolicy};
pub use emitter::CcEmitter;
pub use message::{Channel, UsbMidiPacket, TICK_CLOCKWISE, TICK_COUNTER_CLOCKWISE};
pub use sink::MidiSink;
