//! Periodic dispatch loop.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use jogwheel_encoder::TickAccumulator;

use crate::dispatcher::CcDispatcher;
use crate::sink::MidiSink;

/// Periodic dispatch loop.
///
/// This is a regular `async fn` — **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn midi_task(
///     dispatcher: CcDispatcher,
///     ticks: &'static TickAccumulator<CriticalSectionRawMutex>,
///     sink: UsbMidiSink,
/// ) {
///     dispatch_loop(dispatcher, ticks, sink, Duration::from_millis(1)).await;
/// }
/// ```
///
/// Every `period`, one dispatch cycle runs: drain the accumulator, queue
/// the policy's messages, flush once if anything was queued. An idle knob
/// costs one lock per period and produces no transport traffic.
pub async fn dispatch_loop<M, S>(
    mut dispatcher: CcDispatcher,
    ticks: &'static TickAccumulator<M>,
    mut sink: S,
    period: Duration,
) -> !
where
    M: RawMutex,
    S: MidiSink,
{
    loop {
        Timer::after(period).await;

        let _sent = dispatcher.dispatch(ticks, &mut sink).await;

        #[cfg(feature = "defmt")]
        if _sent > 0 {
            defmt::trace!("dispatched {} message(s)", _sent);
        }
    }
}
