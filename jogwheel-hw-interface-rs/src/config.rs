//! Build-time configuration.
//!
//! Everything here is a compile-time constant; the device has no runtime
//! configuration surface. Pin assignments live next to the pin setup in
//! `main`.

use jogwheel_midi::{Channel, DispatchPolicy};

/// MIDI channel the jog wheel transmits on (user-facing channel 1).
pub const MIDI_CHANNEL: Channel = Channel::from_user(1);

/// Control-Change number carrying jog movement (CC 16).
pub const JOG_CC: u8 = 0x10;

/// How drained ticks become messages.
///
/// `RelativeTick` sends one ±1 message per detent, which is what scratch
/// and scrub consumers map. Switch to
/// `DispatchPolicy::AbsoluteValue { initial: INITIAL_VALUE }` to drive a
/// clamped 0–127 parameter instead.
pub const DISPATCH_POLICY: DispatchPolicy = DispatchPolicy::RelativeTick;

/// Startup controller value for the absolute policy (mid-range).
#[allow(dead_code)]
pub const INITIAL_VALUE: u8 = 64;

/// Dispatch task period in milliseconds.
///
/// 1 ms keeps per-detent latency well under anything a hand can produce
/// while leaving the encoder task free to run on every pin edge.
pub const DISPATCH_PERIOD_MS: u64 = 1;

/// USB identity. Test-device IDs; replace for production hardware.
pub const USB_VID: u16 = 0xc0de;
pub const USB_PID: u16 = 0xcafe;
