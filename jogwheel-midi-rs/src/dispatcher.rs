//! Tick-to-message dispatch policies.

use embassy_sync::blocking_mutex::raw::RawMutex;
use jogwheel_encoder::TickAccumulator;

use crate::emitter::CcEmitter;
use crate::message::{Channel, TICK_CLOCKWISE, TICK_COUNTER_CLOCKWISE};
use crate::sink::MidiSink;

/// How drained ticks become Control-Change messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchPolicy {
    /// One message per tick: value `0x01` clockwise, `0x7F`
    /// counter-clockwise. Relative-CC consumers expect per-tick
    /// granularity, so a multi-tick delta becomes that many single-tick
    /// messages.
    RelativeTick,

    /// Maintain a 0–127 controller value, stepped ±1 per tick with
    /// clamping, emitting only values that differ from the last one sent.
    /// Pushing against a range boundary emits nothing.
    AbsoluteValue {
        /// Controller value at startup; masked to 7 bits.
        initial: u8,
    },
}

/// Per-policy dispatch state.
enum Policy {
    Relative,
    Absolute { value: u8, last_sent: u8 },
}

/// Drains accumulated ticks and turns them into Control-Change messages.
///
/// One [`dispatch`](Self::dispatch) call is one dispatch cycle: drain the
/// shared accumulator, queue zero or more messages under the configured
/// policy, and flush the sink once if anything was queued. A zero drain
/// queues nothing and does not flush.
pub struct CcDispatcher {
    emitter: CcEmitter,
    policy: Policy,
}

impl CcDispatcher {
    /// Dispatcher for `controller` on `channel` under the given policy.
    pub const fn new(channel: Channel, controller: u8, policy: DispatchPolicy) -> Self {
        let policy = match policy {
            DispatchPolicy::RelativeTick => Policy::Relative,
            DispatchPolicy::AbsoluteValue { initial } => Policy::Absolute {
                value: initial & 0x7F,
                last_sent: initial & 0x7F,
            },
        };
        Self {
            emitter: CcEmitter::new(channel, controller),
            policy,
        }
    }

    /// Run one dispatch cycle against the shared accumulator.
    ///
    /// Returns the number of messages queued (and flushed).
    pub async fn dispatch<M, S>(&mut self, ticks: &TickAccumulator<M>, sink: &mut S) -> usize
    where
        M: RawMutex,
        S: MidiSink,
    {
        let delta = ticks.drain();
        self.apply_delta(delta, sink).await
    }

    /// Apply an already-drained tick delta.
    ///
    /// This is the policy logic without the drain, for single-context poll
    /// loops that own their delta directly. Zero queues nothing and does
    /// not flush.
    pub async fn apply_delta<S: MidiSink>(&mut self, delta: i32, sink: &mut S) -> usize {
        if delta == 0 {
            return 0;
        }

        let emitter = self.emitter;
        let mut sent = 0;

        match &mut self.policy {
            Policy::Relative => {
                let value = if delta > 0 {
                    TICK_CLOCKWISE
                } else {
                    TICK_COUNTER_CLOCKWISE
                };
                for _ in 0..delta.unsigned_abs() {
                    emitter.emit(sink, value).await;
                    sent += 1;
                }
            }
            Policy::Absolute { value, last_sent } => {
                let step: i32 = if delta > 0 { 1 } else { -1 };
                for _ in 0..delta.unsigned_abs() {
                    let stepped = (*value as i32 + step).clamp(0, 127) as u8;
                    *value = stepped;
                    if stepped != *last_sent {
                        emitter.emit(sink, stepped).await;
                        *last_sent = stepped;
                        sent += 1;
                    }
                }
            }
        }

        if sent > 0 {
            sink.flush().await;
        }
        sent
    }

    /// Current absolute controller value; `None` under the relative policy.
    pub fn value(&self) -> Option<u8> {
        match self.policy {
            Policy::Relative => None,
            Policy::Absolute { value, .. } => Some(value),
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use jogwheel_encoder::TickAccumulator;

    use crate::message::UsbMidiPacket;

    const JOG_CC: u8 = 0x10;

    #[derive(Default)]
    struct RecordingSink {
        packets: Vec<[u8; 4]>,
        flushes: usize,
    }

    impl RecordingSink {
        fn values(&self) -> Vec<u8> {
            self.packets.iter().map(|p| p[3]).collect()
        }
    }

    impl MidiSink for RecordingSink {
        async fn send(&mut self, packet: UsbMidiPacket) {
            self.packets.push(*packet.bytes());
        }

        async fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    fn relative() -> CcDispatcher {
        CcDispatcher::new(Channel::new(0), JOG_CC, DispatchPolicy::RelativeTick)
    }

    fn absolute(initial: u8) -> CcDispatcher {
        CcDispatcher::new(
            Channel::new(0),
            JOG_CC,
            DispatchPolicy::AbsoluteValue { initial },
        )
    }

    // ── Relative policy ──────────────────────────────────────────────

    #[test]
    fn relative_emits_one_message_per_clockwise_tick() {
        let mut dispatcher = relative();
        let mut sink = RecordingSink::default();

        let sent = block_on(dispatcher.apply_delta(3, &mut sink));

        assert_eq!(sent, 3);
        assert_eq!(
            sink.packets,
            vec![[0x0B, 0xB0, JOG_CC, 0x01]; 3],
        );
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn relative_emits_one_message_per_counter_clockwise_tick() {
        let mut dispatcher = relative();
        let mut sink = RecordingSink::default();

        let sent = block_on(dispatcher.apply_delta(-2, &mut sink));

        assert_eq!(sent, 2);
        assert_eq!(
            sink.packets,
            vec![[0x0B, 0xB0, JOG_CC, 0x7F]; 2],
        );
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn relative_carries_configured_channel() {
        let mut dispatcher =
            CcDispatcher::new(Channel::from_user(3), JOG_CC, DispatchPolicy::RelativeTick);
        let mut sink = RecordingSink::default();

        block_on(dispatcher.apply_delta(1, &mut sink));

        assert_eq!(sink.packets, vec![[0x0B, 0xB2, JOG_CC, 0x01]]);
    }

    // ── Zero delta ───────────────────────────────────────────────────

    #[test]
    fn zero_delta_emits_nothing_and_skips_the_flush() {
        for mut dispatcher in [relative(), absolute(64)] {
            let mut sink = RecordingSink::default();
            let sent = block_on(dispatcher.apply_delta(0, &mut sink));

            assert_eq!(sent, 0);
            assert!(sink.packets.is_empty());
            assert_eq!(sink.flushes, 0);
        }
    }

    // ── Absolute policy ──────────────────────────────────────────────

    #[test]
    fn absolute_steps_once_per_tick() {
        let mut dispatcher = absolute(64);
        let mut sink = RecordingSink::default();

        block_on(dispatcher.apply_delta(3, &mut sink));

        assert_eq!(sink.values(), vec![65, 66, 67]);
        assert_eq!(sink.flushes, 1);
        assert_eq!(dispatcher.value(), Some(67));
    }

    #[test]
    fn absolute_caps_at_ceiling_and_emits_the_cap_once() {
        let mut dispatcher = absolute(64);
        let mut sink = RecordingSink::default();

        // 70 single-tick dispatch cycles push well past the ceiling.
        for _ in 0..70 {
            block_on(dispatcher.apply_delta(1, &mut sink));
        }

        // 65..=127 emitted once each, nothing while pinned at 127.
        let values = sink.values();
        assert_eq!(values.len(), 63);
        assert_eq!(*values.last().unwrap(), 127);
        assert_eq!(values.iter().filter(|&&v| v == 127).count(), 1);
        assert_eq!(dispatcher.value(), Some(127));
    }

    #[test]
    fn absolute_at_floor_emits_nothing() {
        let mut dispatcher = absolute(0);
        let mut sink = RecordingSink::default();

        let sent = block_on(dispatcher.apply_delta(-1, &mut sink));

        assert_eq!(sent, 0);
        assert!(sink.packets.is_empty());
        assert_eq!(sink.flushes, 0);
        assert_eq!(dispatcher.value(), Some(0));
    }

    #[test]
    fn absolute_recovers_from_the_ceiling() {
        let mut dispatcher = absolute(126);
        let mut sink = RecordingSink::default();

        // Up to the cap and past it, then one tick back down.
        block_on(dispatcher.apply_delta(3, &mut sink));
        block_on(dispatcher.apply_delta(-1, &mut sink));

        assert_eq!(sink.values(), vec![127, 126]);
    }

    #[test]
    fn absolute_oscillation_emits_each_distinct_value() {
        let mut dispatcher = absolute(64);
        let mut sink = RecordingSink::default();

        block_on(dispatcher.apply_delta(1, &mut sink));
        block_on(dispatcher.apply_delta(-1, &mut sink));

        assert_eq!(sink.values(), vec![65, 64]);
        assert_eq!(sink.flushes, 2);
    }

    // ── Drain integration ────────────────────────────────────────────

    #[test]
    fn dispatch_drains_the_accumulator() {
        let ticks: TickAccumulator<NoopRawMutex> = TickAccumulator::new();
        let mut dispatcher = relative();
        let mut sink = RecordingSink::default();

        ticks.add(2);
        let sent = block_on(dispatcher.dispatch(&ticks, &mut sink));
        assert_eq!(sent, 2);
        assert_eq!(ticks.drain(), 0);

        // A second cycle with nothing accumulated is silent.
        let sent = block_on(dispatcher.dispatch(&ticks, &mut sink));
        assert_eq!(sent, 0);
        assert_eq!(sink.flushes, 1);
    }
}
