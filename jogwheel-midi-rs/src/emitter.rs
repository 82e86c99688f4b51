//! Control-Change emitter.

use crate::message::{Channel, UsbMidiPacket};
use crate::sink::MidiSink;

/// Emits Control-Change events for one configured channel and controller.
///
/// [`emit`](Self::emit) queues exactly one packet and never flushes —
/// flushing is the dispatcher's job, batched after all messages of a
/// dispatch cycle.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CcEmitter {
    channel: Channel,
    controller: u8,
}

impl CcEmitter {
    /// Emitter for `controller` on `channel`. The controller number is
    /// masked to 7 bits at packet build time.
    pub const fn new(channel: Channel, controller: u8) -> Self {
        Self {
            channel,
            controller,
        }
    }

    /// Queue one Control-Change carrying the given 7-bit value.
    pub async fn emit<S: MidiSink>(&self, sink: &mut S, value: u8) {
        let packet = UsbMidiPacket::control_change(self.channel, self.controller, value);
        sink.send(packet).await;
    }
}
