//! A02YYUW Ultrasonic Ranging Protocol
//!
//! This crate defines the UART-based request/response protocol spoken by the
//! A02YYUW family of waterproof ultrasonic transducers. The link is
//! half-duplex: the host writes a single trigger byte, the sensor answers
//! with one fixed-length frame.
//!
//! # Protocol Overview
//!
//! Request is the single byte `0x55`. Every response uses the same 4-byte
//! frame format:
//! ```text
//! ┌────────┬────────┬────────┬──────────┐
//! │ HEADER │ DIST_H │ DIST_L │ CHECKSUM │
//! │ 1B     │ 1B     │ 1B     │ 1B       │
//! └────────┴────────┴────────┴──────────┘
//! ```
//!
//! Distance is big-endian millimeters; the checksum is the byte sum of the
//! first three bytes. Anything on the wire that does not validate against
//! this format is noise to be resynchronized past, never payload.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod reading;

pub use frame::{checksum, Frame, FrameError, FRAME_HEADER, FRAME_LEN, TRIGGER_BYTE};
pub use reading::Reading;
