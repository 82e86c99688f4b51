//! Outbound MIDI transport seam.

use crate::message::UsbMidiPacket;

/// The outbound MIDI transport.
///
/// Delivery is fire-and-forget by contract: an implementation that cannot
/// deliver (host absent, endpoint stalled) swallows the failure instead of
/// surfacing it. A dropped message is a dropped turn of the knob, not an
/// error the dispatch side can act on — there is no retry and no buffering
/// beyond the transport's own queue.
#[allow(async_fn_in_trait)]
pub trait MidiSink {
    /// Queue one event packet for delivery.
    ///
    /// Must not force delivery itself; [`flush`](Self::flush) does that,
    /// batched once per dispatch cycle.
    async fn send(&mut self, packet: UsbMidiPacket);

    /// Force immediate delivery of all queued packets.
    async fn flush(&mut self);
}
