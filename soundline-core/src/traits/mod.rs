//! Hardware abstraction traits
//!
//! These traits define the interface between the decoding logic
//! and hardware-specific implementations.

pub mod link;
pub mod ranger;

pub use link::{DataBits, LinkConfig, Parity, SensorLink, StopBits};
pub use ranger::{RangeError, RangeSensor, Reading};
