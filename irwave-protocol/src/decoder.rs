//! Frame decoder
//!
//! Single forward pass over a raw capture, no backtracking:
//!
//! 1. Length: the signal (gap excluded) must be exactly
//!    `4 + 2 × bits + 1` entries, nothing else is read otherwise
//! 2. Header: four entries against the two header mark/space pairs
//! 3. Bits: per cell, the mark (optionally validated) then the space, which
//!    must match either the one-space or the zero-space
//!
//! Timing tables wider than [`MAX_BITS`] are refused up front rather than
//! truncated into the accumulator.
//!
//! The trailing mark is accounted for by the length check; its duration is
//! not inspected. Any mismatch returns [`NoMatch`] and no partial value.

use crate::config::DecoderConfig;
use crate::result::{DecodeResult, NoMatch, ProtocolTag};
use crate::timing::{HeaderSegment, TimingTable, HEADER_LEN, MAX_BITS};
use crate::tolerance::{DurationMatcher, TolerancePolicy};

/// Stateless frame decoder
///
/// Generic over the duration predicate so tests can inject exact bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder<M = TolerancePolicy> {
    timing: TimingTable,
    matcher: M,
    validate_bit_mark_duration: bool,
}

impl Decoder<TolerancePolicy> {
    /// Decoder for the Haier protocol with default settings
    pub const HAIER: Decoder = Decoder::new(TimingTable::HAIER, DecoderConfig::DEFAULT);

    /// Create a decoder from timings and settings
    pub const fn new(timing: TimingTable, config: DecoderConfig) -> Self {
        Self {
            timing,
            matcher: config.tolerance,
            validate_bit_mark_duration: config.validate_bit_mark_duration,
        }
    }
}

impl Default for Decoder<TolerancePolicy> {
    fn default() -> Self {
        Self::HAIER
    }
}

impl<M: DurationMatcher> Decoder<M> {
    /// Create a decoder with a custom duration predicate
    pub const fn with_matcher(
        timing: TimingTable,
        matcher: M,
        validate_bit_mark_duration: bool,
    ) -> Self {
        Self {
            timing,
            matcher,
            validate_bit_mark_duration,
        }
    }

    /// Timings this decoder expects
    pub const fn timing(&self) -> &TimingTable {
        &self.timing
    }

    /// Whether bit-cell marks are checked
    pub const fn validates_bit_marks(&self) -> bool {
        self.validate_bit_mark_duration
    }

    /// Try to decode `raw` as one frame
    ///
    /// `raw[0]` is the gap before the frame and is skipped.
    pub fn decode(&self, raw: &[u32]) -> Result<DecodeResult, NoMatch> {
        let t = &self.timing;

        if t.bits > MAX_BITS {
            ir_warn!("No match: {} bit payload exceeds {} bits", t.bits, MAX_BITS);
            return Err(NoMatch::Width { bits: t.bits });
        }

        // State 0: length
        let signal = raw.get(1..).unwrap_or(&[]);
        let expected = t.signal_len();
        if signal.len() != expected {
            ir_debug!(
                "No match: expected {} entries, got {}",
                expected,
                signal.len()
            );
            return Err(NoMatch::Length {
                expected,
                actual: signal.len(),
            });
        }

        // State 1: header
        let (header, data) = signal.split_at(HEADER_LEN);
        for (&actual, segment) in header.iter().zip(HeaderSegment::ALL) {
            let nominal = t.header(segment);
            let ok = if segment.is_mark() {
                self.matcher.matches_mark(actual, nominal)
            } else {
                self.matcher.matches_space(actual, nominal)
            };
            if !ok {
                ir_debug!("No match: header {:?} was {} us", segment, actual);
                return Err(NoMatch::Header { segment, actual });
            }
        }
        ir_trace!("Header matched");

        // State 2: bits
        let mut value: u128 = 0;
        for (index, cell) in (0..t.bits).zip(data.chunks_exact(2)) {
            let (mark, space) = (cell[0], cell[1]);

            if self.validate_bit_mark_duration && !self.matcher.matches_mark(mark, t.bit_mark) {
                ir_debug!("No match: bit {} mark was {} us", index, mark);
                return Err(NoMatch::BitMark {
                    index,
                    actual: mark,
                });
            }

            let bit = if self.matcher.matches_space(space, t.one_space) {
                1
            } else if self.matcher.matches_space(space, t.zero_space) {
                0
            } else {
                ir_debug!("No match: bit {} space was {} us", index, space);
                return Err(NoMatch::BitSpace {
                    index,
                    actual: space,
                });
            };

            value = (value << 1) | bit;
        }

        ir_debug!("Decoded {} bits", t.bits);
        Ok(DecodeResult {
            value,
            bits: t.bits,
            protocol: ProtocolTag::Haier,
        })
    }
}
