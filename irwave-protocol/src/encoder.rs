//! Frame encoder
//!
//! Drives an [`IrEmitter`] through one complete frame: carrier setup, the
//! two-part header, one mark/space cell per bit (MSB first), and a trailing
//! mark followed by `space(0)` so the LED is always left off.

use irwave_hal::IrEmitter;

use crate::timing::{bit_at, HeaderSegment, TimingTable};

/// Stateless frame encoder over a timing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Encoder {
    timing: TimingTable,
}

impl Encoder {
    /// Encoder for the Haier protocol
    pub const HAIER: Encoder = Encoder::new(TimingTable::HAIER);

    /// Create an encoder for the given timings
    pub const fn new(timing: TimingTable) -> Self {
        Self { timing }
    }

    /// Timings this encoder emits
    pub const fn timing(&self) -> &TimingTable {
        &self.timing
    }

    /// Transmit the low `nbits` bits of `data`, most significant first
    ///
    /// Inputs are not validated; positions at or above 128 are sent as 0.
    /// The only failure is the emitter's own.
    pub fn encode<E: IrEmitter>(
        &self,
        emitter: &mut E,
        data: u128,
        nbits: u8,
    ) -> Result<(), E::Error> {
        let t = &self.timing;

        ir_trace!("Encoding {} bits at {} kHz", nbits, t.carrier_khz);
        emitter.enable_carrier(t.carrier_khz)?;

        // Header
        for segment in HeaderSegment::ALL {
            if segment.is_mark() {
                emitter.mark(t.header(segment))?;
            } else {
                emitter.space(t.header(segment))?;
            }
        }

        // Data
        for index in (0..nbits).rev() {
            emitter.mark(t.bit_mark)?;
            emitter.space(t.space_for(bit_at(data, index)))?;
        }

        // Footer
        emitter.mark(t.bit_mark)?;
        emitter.space(0)
    }

    /// Transmit a full-width frame (`timing.bits` bits)
    pub fn send<E: IrEmitter>(&self, emitter: &mut E, data: u128) -> Result<(), E::Error> {
        self.encode(emitter, data, self.timing.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Pulse, RecordingEmitter};

    #[test]
    fn test_header_and_footer() {
        let mut emitter = RecordingEmitter::new();
        Encoder::HAIER.encode(&mut emitter, 0, 0).unwrap();

        assert_eq!(emitter.carrier_khz, Some(38));
        assert_eq!(
            emitter.pulses,
            vec![
                Pulse::Mark(3050),
                Pulse::Space(3050),
                Pulse::Mark(3050),
                Pulse::Space(4350),
                Pulse::Mark(600),
                Pulse::Space(0),
            ]
        );
    }

    #[test]
    fn test_bits_msb_first() {
        let mut emitter = RecordingEmitter::new();
        Encoder::HAIER.encode(&mut emitter, 0b110, 3).unwrap();

        let data = &emitter.pulses[4..10];
        assert_eq!(
            data,
            &[
                Pulse::Mark(600),
                Pulse::Space(1690),
                Pulse::Mark(600),
                Pulse::Space(1690),
                Pulse::Mark(600),
                Pulse::Space(600),
            ]
        );
    }

    #[test]
    fn test_full_frame_length() {
        let mut emitter = RecordingEmitter::new();
        Encoder::HAIER.send(&mut emitter, u128::MAX).unwrap();

        // header + 112 cells + footer mark + closing space(0)
        assert_eq!(emitter.pulses.len(), 4 + 2 * 112 + 2);
        assert_eq!(emitter.pulses.last(), Some(&Pulse::Space(0)));
    }

    #[test]
    fn test_only_low_bits_sent() {
        let mut emitter = RecordingEmitter::new();
        Encoder::HAIER.encode(&mut emitter, 0xF0, 4).unwrap();

        let spaces: Vec<_> = emitter.pulses[4..12]
            .iter()
            .filter_map(|p| match p {
                Pulse::Space(us) => Some(*us),
                Pulse::Mark(_) => None,
            })
            .collect();
        assert_eq!(spaces, vec![600, 600, 600, 600]);
    }

    #[test]
    fn test_width_past_integer_reads_zero() {
        let mut emitter = RecordingEmitter::new();
        Encoder::HAIER.encode(&mut emitter, u128::MAX, 130).unwrap();

        // bits 129 and 128 do not exist and go out as zeros
        assert_eq!(emitter.pulses[5], Pulse::Space(600));
        assert_eq!(emitter.pulses[7], Pulse::Space(600));
        assert_eq!(emitter.pulses[9], Pulse::Space(1690));
    }

    #[test]
    fn test_emitter_error_propagates() {
        let mut emitter = RecordingEmitter::failing_after(3);
        let result = Encoder::HAIER.send(&mut emitter, 0);

        assert_eq!(result, Err(()));
        assert_eq!(emitter.pulses.len(), 2);
    }
}
