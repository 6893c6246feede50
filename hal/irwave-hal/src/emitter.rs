//! IR emitter abstraction
//!
//! An emitter drives an IR LED with a modulated carrier. The protocol layer
//! only ever asks for "carrier on for N µs" (mark) and "carrier off for N µs"
//! (space); how that is achieved (PWM peripheral, PIO, bit-banging) is up to
//! the implementation.

/// Carrier-modulated IR output
///
/// Calls are blocking: `mark` and `space` return once the requested
/// duration has elapsed.
pub trait IrEmitter {
    /// Error type for emitter operations
    type Error;

    /// Configure the carrier frequency in kHz
    ///
    /// Called once at the start of every transmission.
    fn enable_carrier(&mut self, khz: u16) -> Result<(), Self::Error>;

    /// Emit the carrier for `us` microseconds
    fn mark(&mut self, us: u32) -> Result<(), Self::Error>;

    /// Hold the output off for `us` microseconds
    ///
    /// `space(0)` forces the output off and returns immediately.
    fn space(&mut self, us: u32) -> Result<(), Self::Error>;
}

impl<T: IrEmitter + ?Sized> IrEmitter for &mut T {
    type Error = T::Error;

    fn enable_carrier(&mut self, khz: u16) -> Result<(), Self::Error> {
        T::enable_carrier(self, khz)
    }

    fn mark(&mut self, us: u32) -> Result<(), Self::Error> {
        T::mark(self, us)
    }

    fn space(&mut self, us: u32) -> Result<(), Self::Error> {
        T::space(self, us)
    }
}
