//! Tank calibration bounds
//!
//! Two reference distances relate raw sensor readings to tank level: the
//! distance measured when the tank is full and when it is empty. The host
//! persists these however it likes and supplies them on every estimation
//! call; the core never stores them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default full-tank reference distance in centimeters
pub const DEFAULT_FULL_CM: f32 = 30.0;

/// Default empty-tank reference distance in centimeters
pub const DEFAULT_EMPTY_CM: f32 = 200.0;

/// Problems with a pair of calibration bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Both bounds are equal; the level formula would divide by zero
    Degenerate,
    /// Full distance is greater than empty distance
    ///
    /// Physically impossible: a full tank puts the surface closer to the
    /// sensor than an empty one.
    Inverted,
}

/// Calibration bounds for level estimation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TankCalibration {
    /// Distance to the water surface when the tank is full (cm)
    pub full_cm: f32,
    /// Distance to the water surface when the tank is empty (cm)
    pub empty_cm: f32,
}

impl Default for TankCalibration {
    fn default() -> Self {
        Self {
            full_cm: DEFAULT_FULL_CM,
            empty_cm: DEFAULT_EMPTY_CM,
        }
    }
}

impl TankCalibration {
    /// Create calibration bounds from two reference distances
    pub const fn new(full_cm: f32, empty_cm: f32) -> Self {
        Self { full_cm, empty_cm }
    }

    /// Check the bounds for physical plausibility
    ///
    /// Hosts should gate calibration writes on this before accepting
    /// user-supplied values.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.full_cm == self.empty_cm {
            return Err(CalibrationError::Degenerate);
        }
        if self.full_cm > self.empty_cm {
            return Err(CalibrationError::Inverted);
        }
        Ok(())
    }

    /// Distance span between the empty and full references (cm)
    pub fn span_cm(&self) -> f32 {
        self.empty_cm - self.full_cm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cal = TankCalibration::default();
        assert_eq!(cal.full_cm, 30.0);
        assert_eq!(cal.empty_cm, 200.0);
        assert!(cal.validate().is_ok());
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let cal = TankCalibration::new(50.0, 50.0);
        assert_eq!(cal.validate(), Err(CalibrationError::Degenerate));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let cal = TankCalibration::new(200.0, 30.0);
        assert_eq!(cal.validate(), Err(CalibrationError::Inverted));
    }

    #[test]
    fn test_span() {
        let cal = TankCalibration::new(30.0, 200.0);
        assert_eq!(cal.span_cm(), 170.0);
    }
}
