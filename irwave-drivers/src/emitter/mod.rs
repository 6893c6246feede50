//! IR emitter implementations

pub mod bitbang;
pub mod recorder;

pub use bitbang::{BitBangEmitter, BitBangError, CarrierConfig, DEFAULT_CARRIER_KHZ};
pub use recorder::{Level, PulseRecorder, RecorderError, Segment};
