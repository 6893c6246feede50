//! Haier 112-bit IR protocol
//!
//! Bit-level encoder and decoder for the Haier air conditioner remote
//! protocol: a two-part header followed by 112 pulse-distance coded bits.
//!
//! # Frame Overview
//!
//! ```text
//! ┌───────────┬───────────┬──────────────────────┬────────┐
//! │ HDR 1     │ HDR 2     │ DATA × 112, MSB 1st  │ FOOTER │
//! │ 3050/3050 │ 3050/4350 │ 600 + 1690 (1)       │ 600    │
//! │ mark/spc  │ mark/spc  │ 600 + 600  (0)       │ mark   │
//! └───────────┴───────────┴──────────────────────┴────────┘
//! ```
//!
//! Carrier is 38 kHz. All durations in microseconds.
//!
//! The encoder drives an [`irwave_hal::IrEmitter`]; the decoder reads a raw
//! capture (gap entry first) and either returns the payload or says why the
//! capture is not a Haier frame. Neither keeps any state between calls.
//!
//! ```ignore
//! let mut led = BitBangEmitter::new(pin, delay);
//! Encoder::HAIER.send(&mut led, 0x19_0000_4000_0000_0000_0020_8001)?;
//!
//! if let Some(raw) = receiver.capture() {
//!     match Decoder::HAIER.decode(raw) {
//!         Ok(result) => handle(result.value),
//!         Err(_) => { /* not ours, try the next protocol */ }
//!     }
//!     receiver.resume();
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod result;
pub mod timing;
pub mod tolerance;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, DecoderConfig, IrConfig, CONFIG_VERSION};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use result::{DecodeResult, NoMatch, ProtocolTag};
pub use timing::{HeaderSegment, TimingTable};
pub use tolerance::{DurationMatcher, TolerancePolicy};
