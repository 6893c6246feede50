//! irwave Hardware Abstraction Layer
//!
//! This crate defines the collaborators an infrared protocol runs on: the
//! modulated emitter that turns marks and spaces into light, and the capture
//! side that turns demodulated edges back into durations. Protocol crates
//! depend only on these traits, drivers implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  irwave-protocol (encoder / decoder)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  irwave-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ BitBangEmitter│       │  EdgeCapture  │
//! │ PulseRecorder │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`emitter::IrEmitter`] - Carrier-modulated mark/space output
//! - [`receiver::IrReceiver`] - Completed raw captures
//!
//! [`capture::RawCapture`] is the buffer both sides agree on: microsecond
//! durations, one leading gap entry, then alternating mark/space.

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod emitter;
pub mod receiver;

// Re-export key items at crate root for convenience
pub use capture::{CaptureError, RawCapture, RAW_BUFFER_LEN};
pub use emitter::IrEmitter;
pub use receiver::IrReceiver;
