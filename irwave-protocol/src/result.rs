//! Decode results and rejection reasons

use core::fmt;

use crate::timing::{HeaderSegment, MAX_BITS};

/// Identifies which protocol produced a decode result
///
/// A dispatcher trying several decoders in turn reports this tag to the
/// application alongside the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolTag {
    /// No protocol matched
    #[default]
    Unknown,
    /// Haier air conditioner, 112-bit frames
    Haier,
}

impl fmt::Display for ProtocolTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolTag::Unknown => f.write_str("UNKNOWN"),
            ProtocolTag::Haier => f.write_str("HAIER"),
        }
    }
}

/// A successfully decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeResult {
    /// Payload, most significant bit first on the wire
    pub value: u128,
    /// Number of payload bits
    pub bits: u8,
    /// Protocol that matched
    pub protocol: ProtocolTag,
}

/// Why a capture is not a frame of this protocol
///
/// This is the ordinary outcome when a dispatcher offers a capture to the
/// wrong decoder; nothing about it is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoMatch {
    /// Payload width does not fit the `u128` accumulator
    Width {
        /// Width the timing table asks for
        bits: u8,
    },
    /// Signal has the wrong number of entries (gap excluded)
    Length {
        /// Entries a frame must have
        expected: usize,
        /// Entries the capture has
        actual: usize,
    },
    /// A header entry is out of tolerance
    Header {
        /// Which header entry failed
        segment: HeaderSegment,
        /// Measured duration (µs)
        actual: u32,
    },
    /// The mark of bit cell `index` is out of tolerance
    BitMark {
        /// Bit position in transmission order (0 = most significant)
        index: u8,
        /// Measured duration (µs)
        actual: u32,
    },
    /// The space of bit cell `index` matches neither the one nor the zero space
    BitSpace {
        /// Bit position in transmission order (0 = most significant)
        index: u8,
        /// Measured duration (µs)
        actual: u32,
    },
}

impl NoMatch {
    /// Bit position the rejection happened at, if it was inside the data
    pub fn bit_index(&self) -> Option<u8> {
        match self {
            NoMatch::BitMark { index, .. } | NoMatch::BitSpace { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoMatch::Width { bits } => {
                write!(f, "unsupported width: {bits} bits (max {MAX_BITS})")
            }
            NoMatch::Length { expected, actual } => {
                write!(f, "wrong length: expected {expected} entries, got {actual}")
            }
            NoMatch::Header { segment, actual } => {
                write!(f, "header {segment:?} mismatch ({actual} us)")
            }
            NoMatch::BitMark { index, actual } => {
                write!(f, "bit {index} mark mismatch ({actual} us)")
            }
            NoMatch::BitSpace { index, actual } => {
                write!(f, "bit {index} space mismatch ({actual} us)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_index() {
        assert_eq!(NoMatch::BitMark { index: 3, actual: 0 }.bit_index(), Some(3));
        assert_eq!(NoMatch::BitSpace { index: 7, actual: 0 }.bit_index(), Some(7));
        assert_eq!(
            NoMatch::Length {
                expected: 229,
                actual: 0
            }
            .bit_index(),
            None
        );
    }

    #[test]
    fn test_display() {
        let err = NoMatch::BitSpace {
            index: 12,
            actual: 2000,
        };
        assert_eq!(err.to_string(), "bit 12 space mismatch (2000 us)");
        assert_eq!(ProtocolTag::Haier.to_string(), "HAIER");
        assert_eq!(
            NoMatch::Width { bits: 200 }.to_string(),
            "unsupported width: 200 bits (max 128)"
        );
    }
}
