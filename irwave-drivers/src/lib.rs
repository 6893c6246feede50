//! IR driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in irwave-hal:
//!
//! - Emitters (software carrier on a GPIO, in-memory recorder)
//! - Capture (edge-timestamp state machine fed from a pin interrupt)

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod emitter;

pub use capture::{CaptureState, EdgeCapture};
pub use emitter::{BitBangEmitter, CarrierConfig, PulseRecorder};
