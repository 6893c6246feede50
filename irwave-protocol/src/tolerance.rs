//! Duration matching with tolerance
//!
//! A demodulating receiver never reports the nominal durations exactly: its
//! output lags the carrier on both edges, so marks come out long and spaces
//! short. Matching therefore shifts the target by `mark_excess_us` before
//! applying a symmetric percentage band:
//!
//! ```text
//! mark:  accept (n + excess) × (1 ± pct)
//! space: accept (n − excess) × (1 ± pct)
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mark/space comparison used by decoders
///
/// Injectable so tests and unusual receivers can pin exact bounds.
pub trait DurationMatcher {
    /// Check a measured mark against its nominal duration
    fn matches_mark(&self, actual_us: u32, nominal_us: u32) -> bool;

    /// Check a measured space against its nominal duration
    fn matches_space(&self, actual_us: u32, nominal_us: u32) -> bool;
}

/// Percentage band plus receiver mark excess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TolerancePolicy {
    /// Allowed deviation from the target in percent
    pub percent: u8,
    /// Amount receivers stretch marks and shorten spaces (µs)
    pub mark_excess_us: u16,
}

impl TolerancePolicy {
    /// Typical demodulating receiver: ±25 %, 100 µs mark excess
    pub const DEFAULT: TolerancePolicy = TolerancePolicy {
        percent: 25,
        mark_excess_us: 100,
    };

    /// Only the nominal value matches
    pub const EXACT: TolerancePolicy = TolerancePolicy {
        percent: 0,
        mark_excess_us: 0,
    };

    /// Create a policy
    pub const fn new(percent: u8, mark_excess_us: u16) -> Self {
        Self {
            percent,
            mark_excess_us,
        }
    }

    /// Inclusive acceptance band around `target_us`
    pub fn bounds(&self, target_us: u32) -> (u64, u64) {
        let target = target_us as u64;
        let pct = self.percent as u64;
        let low = target * 100u64.saturating_sub(pct) / 100;
        let high = target * (100 + pct) / 100;
        (low, high)
    }

    /// Check `actual_us` against `target_us` within the percentage band
    pub fn matches(&self, actual_us: u32, target_us: u32) -> bool {
        let (low, high) = self.bounds(target_us);
        let actual = actual_us as u64;
        low <= actual && actual <= high
    }

    /// Target a measured mark should be compared with
    pub fn mark_target(&self, nominal_us: u32) -> u32 {
        nominal_us.saturating_add(u32::from(self.mark_excess_us))
    }

    /// Target a measured space should be compared with
    pub fn space_target(&self, nominal_us: u32) -> u32 {
        nominal_us.saturating_sub(u32::from(self.mark_excess_us))
    }
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DurationMatcher for TolerancePolicy {
    fn matches_mark(&self, actual_us: u32, nominal_us: u32) -> bool {
        self.matches(actual_us, self.mark_target(nominal_us))
    }

    fn matches_space(&self, actual_us: u32, nominal_us: u32) -> bool {
        self.matches(actual_us, self.space_target(nominal_us))
    }
}

impl<M: DurationMatcher + ?Sized> DurationMatcher for &M {
    fn matches_mark(&self, actual_us: u32, nominal_us: u32) -> bool {
        M::matches_mark(self, actual_us, nominal_us)
    }

    fn matches_space(&self, actual_us: u32, nominal_us: u32) -> bool {
        M::matches_space(self, actual_us, nominal_us)
    }
}
