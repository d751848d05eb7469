//! Range sensor trait and error taxonomy

pub use soundline_protocol::Reading;

/// Errors that can occur during a trigger/response cycle
///
/// All variants are non-fatal and recoverable by a later call; none of
/// them terminates anything. The caller decides retry cadence and when
/// repeated failures become a user-visible fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Trigger requested before the prior turnaround budget elapsed.
    /// No transport I/O was performed.
    TooSoon,
    /// Fewer than a full frame's worth of bytes buffered.
    /// Nothing was consumed; a later call may see more.
    InsufficientData,
    /// Leading byte is not the header sentinel.
    /// Exactly one byte was discarded to resynchronize.
    Framing,
    /// Header matched but the payload failed its checksum.
    /// The entire frame was discarded.
    Checksum,
}

/// Trait for distance range sensors
///
/// Implementations own their transport and drive the full
/// trigger/wait/decode cycle. One instance per transport; the call is
/// blocking and returns a terminal result, never a partial one.
pub trait RangeSensor {
    /// Trigger a measurement and decode one response frame
    ///
    /// `now_ms` is the caller's monotonic clock in milliseconds, used to
    /// enforce the minimum inter-request interval. One trigger yields at
    /// most one synchronization attempt; repetition is the caller's job.
    fn read_distance(&mut self, now_ms: u64) -> Result<Reading, RangeError>;

    /// Like [`read_distance`](Self::read_distance), collapsing every error
    /// into an invalid reading
    ///
    /// For consumers that only care about the `{valid, distance}` surface.
    fn read_or_invalid(&mut self, now_ms: u64) -> Reading {
        self.read_distance(now_ms).unwrap_or(Reading::invalid())
    }
}
