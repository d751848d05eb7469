//! Configuration types
//!
//! Board-agnostic configuration structures. Persistence is the host's
//! responsibility; this crate only defines the types and their validation.

pub mod calibration;

pub use calibration::*;
