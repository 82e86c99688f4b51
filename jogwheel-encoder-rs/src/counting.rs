//! Position-counter tick source.
//!
//! Some encoder setups do the Gray-code work elsewhere: a counting
//! peripheral, an I/O expander, or a breakout board that accumulates an
//! absolute signed position in firmware. [`CountingEncoder`] turns any such
//! counter into a tick source by differencing consecutive readings.

use crate::source::TickSource;

/// An external counter accumulating an absolute signed encoder position.
pub trait PositionCounter {
    /// Error produced by a failed read.
    type Error;

    /// Read the current accumulated position.
    fn position(&mut self) -> Result<i32, Self::Error>;
}

/// Tick source backed by a [`PositionCounter`].
///
/// Keeps the last observed position and reports the wrapping difference on
/// each poll. The baseline advances to every successfully read position,
/// even when the difference is zero; a failed read leaves it untouched, so
/// movement spanning the failure is picked up whole by the next successful
/// poll.
pub struct CountingEncoder<C> {
    counter: C,
    last_position: i32,
}

impl<C: PositionCounter> CountingEncoder<C> {
    /// Wrap a counter, reading it once to establish the position baseline.
    ///
    /// # Errors
    /// The counter's error if the baseline read fails.
    pub fn new(mut counter: C) -> Result<Self, C::Error> {
        let last_position = counter.position()?;
        Ok(Self {
            counter,
            last_position,
        })
    }

    /// Release the underlying counter.
    pub fn release(self) -> C {
        self.counter
    }
}

impl<C: PositionCounter> TickSource for CountingEncoder<C> {
    type Error = C::Error;

    fn poll_delta(&mut self) -> Result<i32, Self::Error> {
        let position = self.counter.position()?;
        // Wrapping difference: a counter that overflows i32 mid-interval
        // still yields the short-path delta.
        let delta = position.wrapping_sub(self.last_position);
        self.last_position = position;
        Ok(delta)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter replaying a scripted sequence of readings.
    struct ScriptedCounter {
        readings: std::vec::IntoIter<Result<i32, ()>>,
    }

    impl ScriptedCounter {
        fn new(readings: Vec<Result<i32, ()>>) -> Self {
            Self {
                readings: readings.into_iter(),
            }
        }
    }

    impl PositionCounter for ScriptedCounter {
        type Error = ();

        fn position(&mut self) -> Result<i32, ()> {
            self.readings.next().expect("script exhausted")
        }
    }

    #[test]
    fn baseline_consumes_first_reading() {
        let counter = ScriptedCounter::new(vec![Ok(40), Ok(40)]);
        let mut encoder = CountingEncoder::new(counter).unwrap();
        assert_eq!(encoder.poll_delta().unwrap(), 0);
    }

    #[test]
    fn deltas_follow_position_differences() {
        let counter = ScriptedCounter::new(vec![Ok(0), Ok(3), Ok(3), Ok(1)]);
        let mut encoder = CountingEncoder::new(counter).unwrap();
        assert_eq!(encoder.poll_delta().unwrap(), 3);
        assert_eq!(encoder.poll_delta().unwrap(), 0);
        assert_eq!(encoder.poll_delta().unwrap(), -2);
    }

    #[test]
    fn counter_overflow_takes_the_short_path() {
        let counter = ScriptedCounter::new(vec![Ok(i32::MAX), Ok(i32::MIN)]);
        let mut encoder = CountingEncoder::new(counter).unwrap();
        assert_eq!(encoder.poll_delta().unwrap(), 1);
    }

    #[test]
    fn failed_read_preserves_movement() {
        let counter = ScriptedCounter::new(vec![Ok(10), Err(()), Ok(14)]);
        let mut encoder = CountingEncoder::new(counter).unwrap();

        assert_eq!(encoder.poll_delta(), Err(()));
        // The ticks from the failed interval arrive with the next read.
        assert_eq!(encoder.poll_delta().unwrap(), 4);
    }

    #[test]
    fn failed_baseline_read_propagates() {
        let counter = ScriptedCounter::new(vec![Err(())]);
        assert!(CountingEncoder::new(counter).is_err());
    }
}
