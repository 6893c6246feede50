//! IR receiver abstraction

/// Source of completed raw captures
///
/// Implementations collect durations in the background (usually from a pin
/// interrupt) and expose a frame once the line has gone idle. The frame stays
/// available, and capture stays paused, until [`IrReceiver::resume`] is called.
pub trait IrReceiver {
    /// The completed capture, gap entry first, if one is ready
    fn capture(&self) -> Option<&[u32]>;

    /// Discard the current capture and start listening for the next frame
    fn resume(&mut self);

    /// Check if a completed capture is waiting
    fn is_ready(&self) -> bool {
        self.capture().is_some()
    }
}
