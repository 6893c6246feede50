//! IR capture implementations

pub mod edge;

pub use edge::{CaptureState, EdgeCapture, DEFAULT_GAP_THRESHOLD_US};
