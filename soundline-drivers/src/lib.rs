//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in soundline-core:
//!
//! - Ultrasonic rangers (A02YYUW) with frame synchronization
//! - Reading filters (moving median)

#![no_std]
#![deny(unsafe_code)]

pub mod ranger;
