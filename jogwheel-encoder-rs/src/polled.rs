//! Two-pin quadrature sampler.

use embassy_futures::select::{select, Either};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::error::EncoderError;
use crate::phase::{decode, Direction, PhaseState};
use crate::source::TickSource;

/// Samples the encoder's A/B pins directly and decodes each transition.
///
/// Both pins are expected to be pull-up biased (logically high when open).
/// The previous phase state is seeded from the pins at construction, so the
/// first poll reports movement only if the shaft actually moved.
///
/// With pins that implement [`Wait`],
/// [`wait_for_tick`](PolledEncoder::wait_for_tick) turns this into an
/// interrupt-driven sampler: the task sleeps until a channel changes level.
pub struct PolledEncoder<A, B> {
    pin_a: A,
    pin_b: B,
    last_state: PhaseState,
}

impl<A, B, E> PolledEncoder<A, B>
where
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
{
    /// Create a sampler over the channel A and channel B pins.
    ///
    /// Reads both pins once to establish the baseline phase state.
    ///
    /// # Errors
    /// [`EncoderError::Pin`] if the baseline read fails.
    pub fn new(mut pin_a: A, mut pin_b: B) -> Result<Self, EncoderError<E>> {
        let last_state = sample(&mut pin_a, &mut pin_b)?;
        Ok(Self {
            pin_a,
            pin_b,
            last_state,
        })
    }

    /// Sample both pins and classify the transition since the last sample.
    ///
    /// An unchanged state or an illegal two-bit jump yields
    /// [`Direction::None`]. The baseline is updated unconditionally, so a
    /// bounce that lands back on the old state cancels itself out instead
    /// of replaying.
    ///
    /// # Errors
    /// [`EncoderError::Pin`] if either pin read fails; the baseline keeps
    /// its previous value in that case.
    pub fn poll(&mut self) -> Result<Direction, EncoderError<E>> {
        let current = sample(&mut self.pin_a, &mut self.pin_b)?;
        let direction = decode(self.last_state, current);
        self.last_state = current;
        Ok(direction)
    }

    /// The most recently sampled phase state.
    pub fn state(&self) -> PhaseState {
        self.last_state
    }

    /// Release the pins.
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}

impl<A, B, E> PolledEncoder<A, B>
where
    A: InputPin<Error = E> + Wait,
    B: InputPin<Error = E> + Wait,
{
    /// Sleep until either channel changes level, then poll.
    ///
    /// This is the interrupt-driven sampling strategy: the future is woken
    /// by a hardware pin-change event, so no code runs between detents.
    /// Contact bounce produces extra wakeups whose transitions decode to
    /// [`Direction::None`].
    ///
    /// # Errors
    /// [`EncoderError::Pin`] if the edge wait or the following pin reads
    /// fail.
    pub async fn wait_for_tick(&mut self) -> Result<Direction, EncoderError<E>> {
        let edge = match select(
            self.pin_a.wait_for_any_edge(),
            self.pin_b.wait_for_any_edge(),
        )
        .await
        {
            Either::First(edge) | Either::Second(edge) => edge,
        };
        edge?;

        self.poll()
    }
}

impl<A, B, E> TickSource for PolledEncoder<A, B>
where
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
{
    type Error = EncoderError<E>;

    fn poll_delta(&mut self) -> Result<i32, Self::Error> {
        Ok(self.poll()?.delta())
    }
}

/// Read both channels at one instant (bit 1 = A, bit 0 = B).
fn sample<A, B, E>(pin_a: &mut A, pin_b: &mut B) -> Result<PhaseState, EncoderError<E>>
where
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
{
    Ok(PhaseState::from_pins(pin_a.is_high()?, pin_b.is_high()?))
}

// ── Unit Tests ───────────────────────────────────────────────────────
