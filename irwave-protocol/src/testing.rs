//! Test doubles shared by the unit tests
//!
//! `RecordingEmitter` overlaps with `irwave_drivers::PulseRecorder`, but this
//! crate sits below the drivers crate and cannot depend on it. This one keeps
//! every call unmerged (including `space(0)`) and can inject emitter failures.

use std::vec::Vec;

use irwave_hal::IrEmitter;

/// Gap placed in front of synthesized captures
pub const TEST_GAP_US: u32 = 20_000;

/// One emitted segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    Mark(u32),
    Space(u32),
}

/// Emitter that records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    pub carrier_khz: Option<u16>,
    pub pulses: Vec<Pulse>,
    ops: usize,
    fail_after: Option<usize>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed for `ops` calls, then fail every call
    pub fn failing_after(ops: usize) -> Self {
        Self {
            fail_after: Some(ops),
            ..Self::default()
        }
    }

    fn tick(&mut self) -> Result<(), ()> {
        self.ops += 1;
        match self.fail_after {
            Some(limit) if self.ops > limit => Err(()),
            _ => Ok(()),
        }
    }

    /// Render as a raw capture: gap first, zero-length spaces dropped
    pub fn to_raw(&self) -> Vec<u32> {
        let mut raw = vec![TEST_GAP_US];
        raw.extend(self.pulses.iter().filter_map(|p| match *p {
            Pulse::Space(0) => None,
            Pulse::Mark(us) | Pulse::Space(us) => Some(us),
        }));
        raw
    }
}

impl IrEmitter for RecordingEmitter {
    type Error = ();

    fn enable_carrier(&mut self, khz: u16) -> Result<(), ()> {
        self.tick()?;
        self.carrier_khz = Some(khz);
        Ok(())
    }

    fn mark(&mut self, us: u32) -> Result<(), ()> {
        self.tick()?;
        self.pulses.push(Pulse::Mark(us));
        Ok(())
    }

    fn space(&mut self, us: u32) -> Result<(), ()> {
        self.tick()?;
        self.pulses.push(Pulse::Space(us));
        Ok(())
    }
}
