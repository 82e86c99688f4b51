//! USB-MIDI transport sink.
//!
//! Wraps the embassy-usb MIDI class sender behind [`MidiSink`]. Queued
//! packets batch into one endpoint's worth of bytes; `flush` writes the
//! batch out (as does a batch filling mid-cycle). A host that is absent or
//! not reading drops the batch after a short timeout instead of stalling
//! the dispatch task — delivery is fire-and-forget.

use defmt::warn;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{with_timeout, Duration};
use embassy_usb::class::midi::Sender;
use heapless::Vec;
use jogwheel_midi::{MidiSink, UsbMidiPacket};

/// Longest we wait for the host to accept a batch before dropping it.
const WRITE_TIMEOUT: Duration = Duration::from_millis(5);

/// One bulk endpoint's worth of 4-byte events.
const BATCH_CAPACITY: usize = 64;

/// MIDI sink over the RP2350 USB device peripheral.
pub struct UsbMidiSink {
    sender: Sender<'static, Driver<'static, USB>>,
    batch: Vec<u8, BATCH_CAPACITY>,
}

impl UsbMidiSink {
    pub fn new(sender: Sender<'static, Driver<'static, USB>>) -> Self {
        Self {
            sender,
            batch: Vec::new(),
        }
    }

    async fn write_batch(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        match with_timeout(WRITE_TIMEOUT, self.sender.write_packet(&self.batch)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("USB write failed: {}", e),
            Err(_) => warn!("USB write timed out; dropping {} byte(s)", self.batch.len()),
        }

        // Delivered or dropped, the batch is gone either way.
        self.batch.clear();
    }
}

impl MidiSink for UsbMidiSink {
    async fn send(&mut self, packet: UsbMidiPacket) {
        if self.batch.extend_from_slice(packet.bytes()).is_err() {
            // Batch full: push it out and requeue. The second extend cannot
            // fail on an empty batch.
            self.write_batch().await;
            let _ = self.batch.extend_from_slice(packet.bytes());
        }
    }

    async fn flush(&mut self) {
        self.write_batch().await;
    }
}
