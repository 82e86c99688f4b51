//! Quadrature decoding and tick accumulation for a mechanical rotary encoder.
//!
//! This crate turns the raw, noisy transitions on an encoder's A/B channels
//! into signed tick counts, and provides the shared counter that carries
//! those ticks from the sampling context to the dispatch context.
//!
//! # Architecture
//!
//! The crate is split into small, independently testable layers:
//!
//! - **`phase`** — The pure Gray-code state machine: [`PhaseState`],
//!   [`Direction`], and the [`decode`] transition classifier. No I/O.
//! - **[`PolledEncoder`]** — Samples two input pins directly and decodes
//!   each transition. Where the pins support async edge waits, it also
//!   provides interrupt-driven sampling via
//!   [`wait_for_tick`](PolledEncoder::wait_for_tick).
//! - **[`CountingEncoder`]** — Delegates decoding to an external
//!   [`PositionCounter`] (a counting peripheral or breakout board) and
//!   reports position differences as ticks.
//! - **[`TickSource`]** — The common interface over both front-ends.
//! - **[`TickAccumulator`]** — The shared signed counter drained by the
//!   dispatch side; its `RawMutex` parameter selects the concurrency model.
//!
//! # Quick start
//!
//! A single-context poll loop needs no synchronization at all:
//!
//! ```ignore
//! use jogwheel_encoder::{PolledEncoder, TickSource};
//!
//! // `pin_a` and `pin_b` are any `embedded-hal` input pins
//! let mut encoder = PolledEncoder::new(pin_a, pin_b)?;
//!
//! loop {
//!     let ticks = encoder.poll_delta()?;
//!     // hand `ticks` to the dispatch side
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   for embedded logging.

#![cfg_attr(not(test), no_std)]

pub use accumulator::TickAccumulator;
pub use counting::{CountingEncoder, PositionCounter};
pub use error::EncoderError;
pub use phase::{decode, Direction, PhaseState};
pub use polled::PolledEncoder;
pub use source::TickSource;

mod accumulator;
mod counting;
mod error;
mod phase;
mod polled;
mod source;
