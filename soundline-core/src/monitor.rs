//! Reading-health monitor
//!
//! Tracks the outcomes of successive measurement cycles and decides when
//! repeated failures become a user-visible sensor fault. Individual errors
//! are ordinary and expected on a noisy link; only a run of them matters.

use crate::traits::{RangeError, Reading};

/// Consecutive failed cycles before the sensor is considered faulted
pub const DEFAULT_FAULT_THRESHOLD: u8 = 5;

/// Sensor health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorHealth {
    /// Readings are arriving normally
    Ok,
    /// Too many consecutive cycles failed to produce a valid reading
    Fault,
}

/// Monitor for consecutive reading failures
#[derive(Debug, Clone)]
pub struct ReadingMonitor {
    /// Failed cycles since the last valid reading
    consecutive_invalid: u8,
    /// Most recent valid distance, if any
    last_valid_mm: Option<u16>,
    /// Failure run length that trips the fault
    fault_threshold: u8,
}

impl Default for ReadingMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingMonitor {
    /// Create a monitor with the default fault threshold
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_FAULT_THRESHOLD)
    }

    /// Create a monitor that faults after `threshold` consecutive failures
    pub fn with_threshold(threshold: u8) -> Self {
        Self {
            consecutive_invalid: 0,
            last_valid_mm: None,
            fault_threshold: threshold,
        }
    }

    /// Record the outcome of one measurement cycle
    ///
    /// `TooSoon` is a caller pacing error, not a sensor response, and does
    /// not count against the sensor.
    pub fn record(&mut self, outcome: Result<Reading, RangeError>) {
        match outcome {
            Ok(reading) if reading.valid => {
                self.consecutive_invalid = 0;
                self.last_valid_mm = Some(reading.distance_mm);
            }
            Err(RangeError::TooSoon) => {}
            _ => {
                self.consecutive_invalid = self.consecutive_invalid.saturating_add(1);
            }
        }
    }

    /// Check the current health status
    pub fn check(&self) -> SensorHealth {
        if self.consecutive_invalid >= self.fault_threshold {
            SensorHealth::Fault
        } else {
            SensorHealth::Ok
        }
    }

    /// Number of failed cycles since the last valid reading
    pub fn consecutive_invalid(&self) -> u8 {
        self.consecutive_invalid
    }

    /// Most recent valid distance in millimeters, if any
    pub fn last_valid_mm(&self) -> Option<u16> {
        self.last_valid_mm
    }
}
