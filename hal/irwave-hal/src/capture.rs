//! Raw capture buffer
//!
//! Layout of a captured frame:
//! - `[0]`: gap, the idle time before the first mark (not part of the signal)
//! - `[1]`: first mark
//! - `[2]`: first space
//! - ... alternating, ending with a mark
//!
//! All entries are in microseconds.

use core::fmt;

use heapless::Vec;

/// Default capture capacity
///
/// Large enough for a 112-bit frame with a two-part header (230 entries).
pub const RAW_BUFFER_LEN: usize = 256;

/// Errors that can occur while filling a capture buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Buffer is full, the duration was dropped
    Overflow,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Overflow => f.write_str("capture buffer overflow"),
        }
    }
}

/// Fixed-capacity buffer of captured durations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCapture<const N: usize = RAW_BUFFER_LEN> {
    durations: Vec<u32, N>,
    overflow: bool,
}

impl<const N: usize> Default for RawCapture<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RawCapture<N> {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self {
            durations: Vec::new(),
            overflow: false,
        }
    }

    /// Build a capture from raw durations (gap first)
    pub fn from_slice(durations: &[u32]) -> Result<Self, CaptureError> {
        let mut capture = Self::new();
        for &us in durations {
            capture.push(us)?;
        }
        Ok(capture)
    }

    /// Append a duration
    ///
    /// On overflow the duration is dropped and the overflow flag stays set
    /// until [`RawCapture::clear`].
    pub fn push(&mut self, us: u32) -> Result<(), CaptureError> {
        self.durations.push(us).map_err(|_| {
            self.overflow = true;
            CaptureError::Overflow
        })
    }

    /// Remove all durations and reset the overflow flag
    pub fn clear(&mut self) {
        self.durations.clear();
        self.overflow = false;
    }

    /// Whether any duration was dropped
    pub fn is_overflow(&self) -> bool {
        self.overflow
    }

    /// Number of stored entries, gap included
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Check if nothing has been captured
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// The leading gap entry
    pub fn gap(&self) -> Option<u32> {
        self.durations.first().copied()
    }

    /// The signal entries, gap excluded
    pub fn pulses(&self) -> &[u32] {
        self.durations.get(1..).unwrap_or(&[])
    }

    /// All entries, gap first
    ///
    /// This is the form decoders consume.
    pub fn as_slice(&self) -> &[u32] {
        &self.durations
    }

    /// Maximum number of entries
    pub const fn capacity(&self) -> usize {
        N
    }
}
