//! Recording emitter
//!
//! An [`IrEmitter`] with no hardware behind it: every mark and space is
//! stored instead of transmitted. The result can be turned into a
//! [`RawCapture`], which is what a perfect receiver would have seen, so an
//! encoder can be checked against a decoder without an LED in the loop.

use heapless::Vec;
use irwave_hal::{CaptureError, IrEmitter, RawCapture};

/// Carrier state of a recorded segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Carrier on
    Mark,
    /// Carrier off
    Space,
}

/// One recorded segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// Carrier state
    pub level: Level,
    /// Duration (µs)
    pub us: u32,
}

/// Recorder errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecorderError {
    /// No room for another segment
    Full,
}

/// Emitter that records segments into a fixed-size buffer
///
/// Adjacent segments with the same level are merged and zero-length
/// segments are dropped, so the recording is always a strict alternation.
#[derive(Debug, Clone, Default)]
pub struct PulseRecorder<const N: usize> {
    segments: Vec<Segment, N>,
    carrier_khz: Option<u16>,
}

impl<const N: usize> PulseRecorder<N> {
    /// Create an empty recorder
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            carrier_khz: None,
        }
    }

    /// Forget everything recorded
    pub fn clear(&mut self) {
        self.segments.clear();
        self.carrier_khz = None;
    }

    /// Last carrier frequency requested
    pub fn carrier_khz(&self) -> Option<u16> {
        self.carrier_khz
    }

    /// Recorded segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total recorded time (µs)
    pub fn duration_us(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.us)).sum()
    }

    /// What a receiver would capture, preceded by `gap_us`
    ///
    /// Leading and trailing spaces are not part of a capture and are left out.
    pub fn to_capture<const M: usize>(&self, gap_us: u32) -> Result<RawCapture<M>, CaptureError> {
        let start = self
            .segments
            .iter()
            .position(|s| s.level == Level::Mark)
            .unwrap_or(self.segments.len());
        let end = self
            .segments
            .iter()
            .rposition(|s| s.level == Level::Mark)
            .map_or(start, |i| i + 1);

        let mut capture = RawCapture::new();
        capture.push(gap_us)?;
        for segment in &self.segments[start..end] {
            capture.push(segment.us)?;
        }
        Ok(capture)
    }

    fn record(&mut self, level: Level, us: u32) -> Result<(), RecorderError> {
        if us == 0 {
            return Ok(());
        }
        if let Some(last) = self.segments.last_mut() {
            if last.level == level {
                last.us = last.us.saturating_add(us);
                return Ok(());
            }
        }
        self.segments
            .push(Segment { level, us })
            .map_err(|_| RecorderError::Full)
    }
}

impl<const N: usize> IrEmitter for PulseRecorder<N> {
    type Error = RecorderError;

    fn enable_carrier(&mut self, khz: u16) -> Result<(), Self::Error> {
        self.carrier_khz = Some(khz);
        Ok(())
    }

    fn mark(&mut self, us: u32) -> Result<(), Self::Error> {
        self.record(Level::Mark, us)
    }

    fn space(&mut self, us: u32) -> Result<(), Self::Error> {
        self.record(Level::Space, us)
    }
}
