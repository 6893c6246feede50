//! Protocol timing table
//!
//! Frame layout (all durations in µs):
//!
//! ```text
//!  ┌──────┬───────┬──────┬───────┬──────────────────────────┬──────┐
//!  │ MARK │ SPACE │ MARK │ SPACE │ 112 × (MARK + SPACE_0/1) │ MARK │
//!  │ 3050 │ 3050  │ 3050 │ 4350  │   600 + 600 / 1690       │ 600  │
//!  └──────┴───────┴──────┴───────┴──────────────────────────┴──────┘
//!    header part 1  header part 2        data, MSB first       footer
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of header entries (two mark/space pairs)
pub const HEADER_LEN: usize = 4;

/// Number of footer entries (one trailing mark)
pub const FOOTER_LEN: usize = 1;

/// Widest payload the protocol types can carry
pub const MAX_BITS: u8 = 128;

/// Which of the four header entries is being referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderSegment {
    /// First header mark
    Mark1,
    /// First header space
    Space1,
    /// Second header mark
    Mark2,
    /// Second header space
    Space2,
}

impl HeaderSegment {
    /// All segments in transmission order
    pub const ALL: [HeaderSegment; HEADER_LEN] = [
        HeaderSegment::Mark1,
        HeaderSegment::Space1,
        HeaderSegment::Mark2,
        HeaderSegment::Space2,
    ];

    /// Whether this segment is a mark (carrier on)
    pub const fn is_mark(self) -> bool {
        matches!(self, HeaderSegment::Mark1 | HeaderSegment::Mark2)
    }
}

/// Nominal durations and frame shape for one protocol
///
/// Values are fixed at construction; encoder and decoder only ever read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingTable {
    /// Carrier frequency (kHz)
    pub carrier_khz: u16,
    /// First header mark (µs)
    pub header_mark_1: u32,
    /// First header space (µs)
    pub header_space_1: u32,
    /// Second header mark (µs)
    pub header_mark_2: u32,
    /// Second header space (µs)
    pub header_space_2: u32,
    /// Mark leading every bit cell and the footer (µs)
    pub bit_mark: u32,
    /// Space encoding a 1 bit (µs)
    pub one_space: u32,
    /// Space encoding a 0 bit (µs)
    pub zero_space: u32,
    /// Payload width in bits
    pub bits: u8,
}

impl TimingTable {
    /// Haier air conditioner, 112-bit frames
    pub const HAIER: TimingTable = TimingTable {
        carrier_khz: 38,
        header_mark_1: 3050,
        header_space_1: 3050,
        header_mark_2: 3050,
        header_space_2: 4350,
        bit_mark: 600,
        one_space: 1690,
        zero_space: 600,
        bits: 112,
    };

    /// Nominal duration of a header segment
    pub const fn header(&self, segment: HeaderSegment) -> u32 {
        match segment {
            HeaderSegment::Mark1 => self.header_mark_1,
            HeaderSegment::Space1 => self.header_space_1,
            HeaderSegment::Mark2 => self.header_mark_2,
            HeaderSegment::Space2 => self.header_space_2,
        }
    }

    /// Nominal space for a bit value
    pub const fn space_for(&self, bit: bool) -> u32 {
        if bit {
            self.one_space
        } else {
            self.zero_space
        }
    }

    /// Number of signal entries in a frame, gap excluded
    ///
    /// Header, one mark/space pair per bit, trailing mark.
    pub const fn signal_len(&self) -> usize {
        HEADER_LEN + 2 * self.bits as usize + FOOTER_LEN
    }

    /// Number of entries in a raw capture of a frame, gap included
    pub const fn raw_len(&self) -> usize {
        1 + self.signal_len()
    }

    /// Total on-air time of a frame carrying `value` (µs)
    pub fn frame_duration_us(&self, value: u128) -> u64 {
        let header = self.header_mark_1 as u64
            + self.header_space_1 as u64
            + self.header_mark_2 as u64
            + self.header_space_2 as u64;
        let data: u64 = (0..self.bits)
            .map(|i| self.bit_mark as u64 + self.space_for(bit_at(value, i)) as u64)
            .sum();
        header + data + self.bit_mark as u64
    }
}

impl Default for TimingTable {
    fn default() -> Self {
        Self::HAIER
    }
}

/// Bit `index` of `value`, reading zero past the top of the integer
pub(crate) fn bit_at(value: u128, index: u8) -> bool {
    value
        .checked_shr(u32::from(index))
        .map_or(false, |shifted| shifted & 1 == 1)
}
