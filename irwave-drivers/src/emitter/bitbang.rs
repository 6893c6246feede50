//! Bit-banged IR emitter
//!
//! Generates the carrier in software on any GPIO: each mark is a run of
//! whole carrier cycles (pin on for `duty`, off for the rest of the period),
//! each space holds the pin off. Timing accuracy is bounded by the delay
//! implementation and loop overhead, which is fine for the ±25 % windows IR
//! receivers accept.
//!
//! # Usage
//!
//! ```ignore
//! let mut led = BitBangEmitter::new(pin, delay, CarrierConfig::default())?;
//! Encoder::HAIER.send(&mut led, payload)?;
//! ```

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use irwave_hal::IrEmitter;

/// Carrier used until `enable_carrier` is called (kHz)
pub const DEFAULT_CARRIER_KHZ: u16 = 38;

/// Errors from the bit-banged emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitBangError<E> {
    /// The GPIO refused a level change
    Pin(E),
    /// Carrier frequency of zero was requested
    InvalidCarrier,
}

impl<E> From<E> for BitBangError<E> {
    fn from(e: E) -> Self {
        BitBangError::Pin(e)
    }
}

impl<E: fmt::Debug> fmt::Display for BitBangError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBangError::Pin(e) => write!(f, "IR pin error: {e:?}"),
            BitBangError::InvalidCarrier => f.write_str("carrier frequency must be non-zero"),
        }
    }
}

/// Carrier waveform settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CarrierConfig {
    /// Portion of each carrier period the LED is on (percent, clamped to 100)
    pub duty_percent: u8,
    /// LED is on when the pin is LOW
    pub active_low: bool,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            duty_percent: 33,
            active_low: false,
        }
    }
}

/// Software-modulated IR LED
pub struct BitBangEmitter<P, D> {
    pin: P,
    delay: D,
    config: CarrierConfig,
    /// Carrier period (ns)
    period_ns: u32,
    /// On-time within one period (ns)
    on_ns: u32,
}

impl<P: OutputPin, D: DelayNs> BitBangEmitter<P, D> {
    /// Create a new emitter and drive the LED off
    pub fn new(pin: P, delay: D, config: CarrierConfig) -> Result<Self, BitBangError<P::Error>> {
        let mut emitter = Self {
            pin,
            delay,
            config,
            period_ns: 0,
            on_ns: 0,
        };
        emitter.set_timing(DEFAULT_CARRIER_KHZ)?;
        emitter.set_led(false)?;
        Ok(emitter)
    }

    /// Release the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Current carrier period (ns)
    pub fn period_ns(&self) -> u32 {
        self.period_ns
    }

    /// Current on-time per carrier period (ns)
    pub fn on_ns(&self) -> u32 {
        self.on_ns
    }

    fn set_timing(&mut self, khz: u16) -> Result<(), BitBangError<P::Error>> {
        if khz == 0 {
            return Err(BitBangError::InvalidCarrier);
        }
        let duty = u32::from(self.config.duty_percent.min(100));
        self.period_ns = 1_000_000 / u32::from(khz);
        self.on_ns = self.period_ns * duty / 100;
        Ok(())
    }

    fn set_led(&mut self, on: bool) -> Result<(), P::Error> {
        if on != self.config.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}

impl<P: OutputPin, D: DelayNs> IrEmitter for BitBangEmitter<P, D> {
    type Error = BitBangError<P::Error>;

    fn enable_carrier(&mut self, khz: u16) -> Result<(), Self::Error> {
        self.set_timing(khz)?;
        self.set_led(false)?;
        Ok(())
    }

    fn mark(&mut self, us: u32) -> Result<(), Self::Error> {
        let total_ns = u64::from(us) * 1000;
        let period = u64::from(self.period_ns);
        let cycles = total_ns / period;
        let off_ns = self.period_ns - self.on_ns;

        for _ in 0..cycles {
            self.set_led(true)?;
            self.delay.delay_ns(self.on_ns);
            self.set_led(false)?;
            if off_ns > 0 {
                self.delay.delay_ns(off_ns);
            }
        }

        // Partial cycle: stay off rather than emit a runt pulse
        let rest = total_ns - cycles * period;
        if rest > 0 {
            self.delay.delay_ns(rest as u32);
        }
        Ok(())
    }

    fn space(&mut self, us: u32) -> Result<(), Self::Error> {
        self.set_led(false)?;
        if us > 0 {
            self.delay.delay_us(us);
        }
        Ok(())
    }
}
