//! A02YYUW waterproof ultrasonic ranger
//!
//! Half-duplex UART sensor: the host writes one trigger byte, waits out the
//! sensor's turnaround time, then decodes one 4-byte response frame. The
//! driver owns the link and the last-trigger timestamp, so one instance per
//! transport is the concurrency model; readings are whole transactions.

use embedded_hal::delay::DelayNs;

use soundline_core::traits::{RangeError, RangeSensor, Reading, SensorLink};
use soundline_protocol::{Frame, FrameError, FRAME_HEADER, FRAME_LEN, TRIGGER_BYTE};

/// Time the sensor needs between trigger and response
///
/// The vendor examples wait 50 ms; no tolerance is documented, which is why
/// [`RangerConfig`] keeps it adjustable.
pub const TURNAROUND_MS: u32 = 50;

/// Ranger configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangerConfig {
    /// Byte written to request a measurement
    pub trigger_byte: u8,
    /// Wait between trigger and response readout, in milliseconds.
    /// Doubles as the minimum inter-request interval.
    pub turnaround_ms: u32,
}

impl Default for RangerConfig {
    fn default() -> Self {
        Self {
            trigger_byte: TRIGGER_BYTE,
            turnaround_ms: TURNAROUND_MS,
        }
    }
}

/// Decode progress within one synchronization attempt
///
/// Never outlives the attempt; the only state carried between calls is the
/// link's receive cursor and the last-trigger timestamp.
enum SyncState {
    /// Looking for the header sentinel at the stream cursor
    SeekHeader,
    /// Header peeked and a full frame is buffered; consume it
    HaveEnoughBytes,
    /// Frame consumed and checksum verified
    Validated(Reading),
    /// Frame consumed but rejected
    Rejected(RangeError),
}

/// Driver for the A02YYUW ultrasonic ranging transducer
///
/// Generic over the serial link and a delay provider so the full cycle can
/// run against real hardware or a scripted mock.
pub struct A02yyuw<L, D> {
    link: L,
    delay: D,
    config: RangerConfig,
    /// Timestamp of the most recent trigger write
    last_trigger_ms: Option<u64>,
}

impl<L: SensorLink, D: DelayNs> A02yyuw<L, D> {
    /// Create a driver with the stock sensor timing
    pub fn new(link: L, delay: D) -> Self {
        Self::with_config(link, delay, RangerConfig::default())
    }

    /// Create a driver with custom trigger byte or turnaround budget
    pub fn with_config(link: L, delay: D, config: RangerConfig) -> Self {
        Self {
            link,
            delay,
            config,
            last_trigger_ms: None,
        }
    }

    /// Get access to the underlying link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Tear the driver down, returning the link and delay provider
    pub fn release(self) -> (L, D) {
        (self.link, self.delay)
    }

    /// Write the trigger byte, requesting a new measurement
    ///
    /// Rejected with `TooSoon` (and without touching the transport) when
    /// called before the previous trigger's turnaround budget elapsed;
    /// overlapping requests would interleave two echo responses on the
    /// half-duplex line.
    pub fn trigger(&mut self, now_ms: u64) -> Result<(), RangeError> {
        if let Some(last) = self.last_trigger_ms {
            if now_ms.saturating_sub(last) < u64::from(self.config.turnaround_ms) {
                return Err(RangeError::TooSoon);
            }
        }

        self.link.write(self.config.trigger_byte);
        self.last_trigger_ms = Some(now_ms);
        Ok(())
    }

    /// Run one frame synchronization attempt against the buffered stream
    ///
    /// Call after the turnaround budget has elapsed since [`trigger`]
    /// (cooperative hosts await their own timer in between; blocking hosts
    /// use [`RangeSensor::read_distance`] which does both).
    ///
    /// Consumes nothing when fewer than 4 bytes are buffered, exactly one
    /// byte when the lead byte is not the header, and the whole frame
    /// otherwise - so every call with a full frame buffered makes forward
    /// progress, and recovery after noise costs one call per junk byte.
    ///
    /// [`trigger`]: Self::trigger
    pub fn try_sync(&mut self) -> Result<Reading, RangeError> {
        let mut state = SyncState::SeekHeader;

        loop {
            state = match state {
                SyncState::SeekHeader => {
                    if self.link.available() < FRAME_LEN {
                        return Err(RangeError::InsufficientData);
                    }
                    match self.link.peek() {
                        Some(FRAME_HEADER) => SyncState::HaveEnoughBytes,
                        _ => {
                            // Discard one byte and report; the next call
                            // re-enters SeekHeader one byte further on.
                            let _ = self.link.read();
                            return Err(RangeError::Framing);
                        }
                    }
                }
                SyncState::HaveEnoughBytes => {
                    let mut raw = [0u8; FRAME_LEN];
                    for slot in raw.iter_mut() {
                        *slot = self.link.read().ok_or(RangeError::InsufficientData)?;
                    }
                    // A corrupted byte inside a matched header makes partial
                    // retention unsafe; the frame is dropped whole.
                    match Frame::parse(raw) {
                        Ok(frame) => SyncState::Validated(Reading::valid(frame.distance_mm())),
                        Err(FrameError::InvalidHeader) => SyncState::Rejected(RangeError::Framing),
                        Err(FrameError::ChecksumMismatch) => {
                            SyncState::Rejected(RangeError::Checksum)
                        }
                    }
                }
                SyncState::Validated(reading) => return Ok(reading),
                SyncState::Rejected(error) => return Err(error),
            };
        }
    }
}

impl<L: SensorLink, D: DelayNs> RangeSensor for A02yyuw<L, D> {
    fn read_distance(&mut self, now_ms: u64) -> Result<Reading, RangeError> {
        self.trigger(now_ms)?;
        self.delay.delay_ms(self.config.turnaround_ms);
        self.try_sync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{Deque, Vec};

    /// Scripted in-memory link for testing
    struct MockLink {
        rx: Deque<u8, 64>,
        tx: Vec<u8, 16>,
    }

    impl MockLink {
        fn new() -> Self {
            Self {
                rx: Deque::new(),
                tx: Vec::new(),
            }
        }

        fn preload(&mut self, bytes: &[u8]) {
            for &byte in bytes {
                self.rx.push_back(byte).unwrap();
            }
        }
    }

    impl SensorLink for MockLink {
        fn available(&self) -> usize {
            self.rx.len()
        }

        fn peek(&mut self) -> Option<u8> {
            self.rx.front().copied()
        }

        fn read(&mut self) -> Option<u8> {
            self.rx.pop_front()
        }

        fn write(&mut self, byte: u8) {
            self.tx.push(byte).unwrap();
        }
    }

    /// Delay provider that returns immediately
    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn ranger() -> A02yyuw<MockLink, NoopDelay> {
        A02yyuw::new(MockLink::new(), NoopDelay)
    }

    // Reference frame: 400 mm
    const GOOD_FRAME: [u8; 4] = [0xFF, 0x01, 0x90, 0x90];

    #[test]
    fn test_trigger_writes_trigger_byte() {
        let mut ranger = ranger();
        ranger.trigger(0).unwrap();
        assert_eq!(&ranger.link().tx[..], &[0x55]);
    }

    #[test]
    fn test_custom_trigger_byte() {
        let config = RangerConfig {
            trigger_byte: 0xA5,
            turnaround_ms: 30,
        };
        let mut ranger = A02yyuw::with_config(MockLink::new(), NoopDelay, config);
        ranger.trigger(0).unwrap();
        assert_eq!(&ranger.link().tx[..], &[0xA5]);
    }

    #[test]
    fn test_read_distance_happy_path() {
        let mut ranger = ranger();
        ranger.link.preload(&GOOD_FRAME);

        let reading = ranger.read_distance(1_000).unwrap();
        assert!(reading.valid);
        assert_eq!(reading.distance_mm, 400);
        assert_eq!(reading.distance_cm(), 40.0);
        assert_eq!(ranger.link().available(), 0);
    }

    #[test]
    fn test_insufficient_data_consumes_nothing() {
        let mut ranger = ranger();
        ranger.link.preload(&GOOD_FRAME[..3]);

        assert_eq!(ranger.read_distance(1_000), Err(RangeError::InsufficientData));
        assert_eq!(ranger.link().available(), 3);

        // Retry after the last byte arrives yields a normal result.
        ranger.link.preload(&GOOD_FRAME[3..]);
        let reading = ranger.read_distance(2_000).unwrap();
        assert_eq!(reading.distance_mm, 400);
    }

    #[test]
    fn test_noise_byte_then_frame() {
        let mut ranger = ranger();
        ranger.link.preload(&[0x12, 0xFF, 0x01, 0x90, 0x90]);

        // First call discards exactly the noise byte.
        assert_eq!(ranger.read_distance(1_000), Err(RangeError::Framing));
        assert_eq!(ranger.link().available(), 4);

        // Second call decodes the frame behind it.
        let reading = ranger.read_distance(2_000).unwrap();
        assert_eq!(reading.distance_mm, 400);
    }

    #[test]
    fn test_checksum_failure_discards_whole_frame() {
        let mut ranger = ranger();
        ranger.link.preload(&[0xFF, 0x01, 0x90, 0x13]);

        assert_eq!(ranger.read_distance(1_000), Err(RangeError::Checksum));
        assert_eq!(ranger.link().available(), 0);
    }

    #[test]
    fn test_resynchronization_terminates() {
        let mut ranger = ranger();
        let noise = [0x00, 0x42, 0xAA, 0x13, 0x37];
        ranger.link.preload(&noise);
        ranger.link.preload(&GOOD_FRAME);

        // Exactly one framing error per noise byte, then a validated frame.
        for _ in 0..noise.len() {
            assert_eq!(ranger.try_sync(), Err(RangeError::Framing));
        }
        let reading = ranger.try_sync().unwrap();
        assert_eq!(reading.distance_mm, 400);
    }

    #[test]
    fn test_too_soon_rejected_without_io() {
        let mut ranger = ranger();

        ranger.read_distance(1_000).unwrap_err(); // no data yet, but triggered
        assert_eq!(ranger.link().tx.len(), 1);

        // 20 ms later: inside the 50 ms budget, no second trigger byte.
        assert_eq!(ranger.read_distance(1_020), Err(RangeError::TooSoon));
        assert_eq!(ranger.link().tx.len(), 1);

        // At the budget boundary the request goes through again.
        ranger.link.preload(&GOOD_FRAME);
        let reading = ranger.read_distance(1_050).unwrap();
        assert_eq!(reading.distance_mm, 400);
        assert_eq!(ranger.link().tx.len(), 2);
    }

    #[test]
    fn test_first_trigger_always_allowed() {
        let mut ranger = ranger();
        assert_eq!(ranger.trigger(0), Ok(()));
    }

    #[test]
    fn test_try_sync_on_empty_link() {
        let mut ranger = ranger();
        assert_eq!(ranger.try_sync(), Err(RangeError::InsufficientData));
    }

    #[test]
    fn test_read_or_invalid_collapses_errors() {
        let mut ranger = ranger();
        let reading = ranger.read_or_invalid(1_000);
        assert!(!reading.valid);

        ranger.link.preload(&GOOD_FRAME);
        let reading = ranger.read_or_invalid(2_000);
        assert!(reading.valid);
        assert_eq!(reading.distance_mm, 400);
    }

    #[test]
    fn test_sans_io_split() {
        let mut ranger = ranger();

        // Cooperative host: trigger now, await its own timer, sync later.
        ranger.trigger(5_000).unwrap();
        assert_eq!(ranger.try_sync(), Err(RangeError::InsufficientData));

        ranger.link.preload(&GOOD_FRAME);
        let reading = ranger.try_sync().unwrap();
        assert_eq!(reading.distance_mm, 400);
    }
}
