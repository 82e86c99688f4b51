//! Unified interface over the encoder front-ends.

/// Anything that can report signed encoder ticks.
///
/// One call reports the movement observed since the previous call, so
/// callers own the sampling cadence. Implemented by
/// [`PolledEncoder`](crate::PolledEncoder) (direct two-pin decoding, at most
/// one tick per poll) and [`CountingEncoder`](crate::CountingEncoder)
/// (differencing an external counter, unbounded delta per poll).
pub trait TickSource {
    /// Error produced by a failed sample.
    type Error;

    /// Signed tick count since the previous call; positive is clockwise.
    fn poll_delta(&mut self) -> Result<i32, Self::Error>;
}
