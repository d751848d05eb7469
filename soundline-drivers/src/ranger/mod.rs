//! Ultrasonic ranger drivers and reading filters

pub mod a02yyuw;
pub mod filter;

pub use a02yyuw::{A02yyuw, RangerConfig, TURNAROUND_MS};
pub use filter::MedianFilter;
