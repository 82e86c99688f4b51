//! jogwheel-hw-interface
//!
//! USB-MIDI jog wheel firmware for the Raspberry Pi Pico 2. Wires the two
//! library crates into a running device:
//!
//! 1. The knob turns; one of the encoder pins changes level.
//! 2. The encoder task wakes on the edge, decodes the Gray-code transition,
//!    and records the tick in the shared accumulator. Bounce decodes to
//!    no-movement and is dropped here.
//! 3. The dispatch task drains the accumulator at its own 1 kHz cadence and
//!    queues Control-Change messages under the configured policy.
//! 4. The USB task services the device; the dispatch task flushes the
//!    transport once per cycle that produced messages.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{self, Driver};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use embassy_usb::class::midi::MidiClass;
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use jogwheel_encoder::{PolledEncoder, TickAccumulator};
use jogwheel_midi::{dispatch_loop, CcDispatcher};

mod config;
mod usb_midi;

use usb_midi::UsbMidiSink;

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the USB peripheral interrupt to Embassy's async handler.
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Shared tick counter — written by the encoder task, drained by the
/// dispatch task. Drain runs in a critical section, so a pin-edge wakeup
/// landing between its read and reset can neither lose a tick nor count
/// one twice.
static TICKS: StaticCell<TickAccumulator<CriticalSectionRawMutex>> = StaticCell::new();

/// USB descriptor and control buffers, owned by the device for its lifetime.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Runs the USB device state machine.
#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, Driver<'static, USB>>) -> ! {
    usb.run().await
}

/// Edge-driven encoder sampling task.
///
/// Sleeps until either channel changes level, decodes the transition, and
/// records the tick. Invalid transitions (bounce, missed samples) decode
/// to no-movement and never touch the counter.
#[embassy_executor::task]
async fn encoder_task(
    mut encoder: PolledEncoder<Input<'static>, Input<'static>>,
    ticks: &'static TickAccumulator<CriticalSectionRawMutex>,
) {
    info!("Encoder task started");

    loop {
        match encoder.wait_for_tick().await {
            Ok(direction) => ticks.record(direction),
            // Pin reads on this part are infallible; the arm stays so the
            // task holds up if the pin type ever changes.
            Err(_) => warn!("Encoder sample failed"),
        }
    }
}

/// Thin wrapper that monomorphises the generic `dispatch_loop` so it can
/// be spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn midi_task(
    dispatcher: CcDispatcher,
    ticks: &'static TickAccumulator<CriticalSectionRawMutex>,
    sink: UsbMidiSink,
) {
    dispatch_loop(
        dispatcher,
        ticks,
        sink,
        Duration::from_millis(config::DISPATCH_PERIOD_MS),
    )
    .await
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("jogwheel-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // ENC_A → GP2  (p.PIN_2)  pull-up, high when open
    // ENC_B → GP3  (p.PIN_3)  pull-up, high when open
    // Encoder common → GND; hardware RC debounce recommended on both pins.
    // ———————————————————————————————————————————————————————————————————————

    let pin_a = Input::new(p.PIN_2, Pull::Up);
    let pin_b = Input::new(p.PIN_3, Pull::Up);

    // The baseline phase state is sampled inside new(), so whatever detent
    // the knob powered on in produces no spurious first tick. Pin reads on
    // this part are infallible.
    let encoder = PolledEncoder::new(pin_a, pin_b).unwrap();

    // —— USB device + MIDI class ————————————————————————————————————————————

    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some("jogwheel");
    usb_config.product = Some("Jog Wheel");
    usb_config.serial_number = Some("0001");

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );

    // One virtual cable each way; this device only ever transmits, so the
    // receive half is parked.
    let class = MidiClass::new(&mut builder, 1, 1, 64);
    let (sender, _receiver) = class.split();

    let usb = builder.build();

    // —— Shared state and dispatch ——————————————————————————————————————————

    let ticks = TICKS.init(TickAccumulator::new());

    let dispatcher = CcDispatcher::new(
        config::MIDI_CHANNEL,
        config::JOG_CC,
        config::DISPATCH_POLICY,
    );
    let sink = UsbMidiSink::new(sender);

    // —— Spawn tasks ————————————————————————————————————————————————————————

    spawner.spawn(usb_task(usb)).unwrap();
    spawner.spawn(encoder_task(encoder, ticks)).unwrap();
    spawner.spawn(midi_task(dispatcher, ticks, sink)).unwrap();

    info!("All tasks spawned");
}
