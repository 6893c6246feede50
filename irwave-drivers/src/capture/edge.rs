//! Edge-timestamp capture
//!
//! Turns demodulator edges into a [`RawCapture`]. The receive pin interrupt
//! calls [`EdgeCapture::on_edge`] with a free-running microsecond timestamp
//! and the new line state; a periodic task calls [`EdgeCapture::poll`] to
//! notice that the line has gone quiet and the frame is over.
//!
//! ```text
//!   Idle ──mark after long gap──▶ Mark ◀──────────┐
//!                                  │ space edge    │ mark edge
//!                                  ▼               │
//!                                 Space ───────────┘
//!                                  │ poll: space > gap threshold
//!                                  ▼
//!                                 Stop ──resume()──▶ Idle
//! ```
//!
//! A full buffer also moves to Stop; the capture is still handed out and
//! decoders will reject it on length.

use irwave_hal::{IrReceiver, RawCapture, RAW_BUFFER_LEN};

/// Minimum idle time that separates two frames (µs)
pub const DEFAULT_GAP_THRESHOLD_US: u32 = 5000;

/// Capture state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureState {
    /// Waiting for the first mark of a frame
    Idle,
    /// Timing a mark
    Mark,
    /// Timing a space
    Space,
    /// Frame complete, waiting for `resume`
    Stop,
}

/// Interrupt-fed IR capture
#[derive(Debug, Clone)]
pub struct EdgeCapture<const N: usize = RAW_BUFFER_LEN> {
    buffer: RawCapture<N>,
    state: CaptureState,
    /// Timestamp of the last accepted edge
    last_edge_us: Option<u32>,
    gap_threshold_us: u32,
}

impl<const N: usize> Default for EdgeCapture<N> {
    fn default() -> Self {
        Self::new(DEFAULT_GAP_THRESHOLD_US)
    }
}

impl<const N: usize> EdgeCapture<N> {
    /// Create a capture that ends frames after `gap_threshold_us` of silence
    pub const fn new(gap_threshold_us: u32) -> Self {
        Self {
            buffer: RawCapture::new(),
            state: CaptureState::Idle,
            last_edge_us: None,
            gap_threshold_us,
        }
    }

    /// Current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Whether the buffer filled up during this frame
    pub fn is_overflow(&self) -> bool {
        self.buffer.is_overflow()
    }

    /// The buffer being filled (complete or not)
    pub fn buffer(&self) -> &RawCapture<N> {
        &self.buffer
    }

    /// Record a line transition
    ///
    /// `is_mark` is the new state: true when the demodulator now reports
    /// carrier. Repeated reports of the same state are ignored.
    pub fn on_edge(&mut self, now_us: u32, is_mark: bool) {
        let elapsed = self.last_edge_us.map(|t| now_us.wrapping_sub(t));

        match (self.state, is_mark) {
            (CaptureState::Idle, true) => {
                // A mark shortly after the previous activity is the tail of
                // a frame we started listening to halfway through.
                if elapsed.map_or(false, |gap| gap < self.gap_threshold_us) {
                    self.last_edge_us = Some(now_us);
                    return;
                }
                self.record(elapsed.unwrap_or(0), CaptureState::Mark);
            }
            (CaptureState::Mark, false) => {
                self.record(elapsed.unwrap_or(0), CaptureState::Space);
            }
            (CaptureState::Space, true) => {
                self.record(elapsed.unwrap_or(0), CaptureState::Mark);
            }
            (CaptureState::Stop, _) | (CaptureState::Idle, false) => {}
            // Duplicate edge report, keep timing from the real transition
            (CaptureState::Mark, true) | (CaptureState::Space, false) => return,
        }

        self.last_edge_us = Some(now_us);
    }

    /// Close the frame if the line has been quiet long enough
    ///
    /// Returns true once a complete capture is available.
    pub fn poll(&mut self, now_us: u32) -> bool {
        if self.state == CaptureState::Space {
            let quiet = self
                .last_edge_us
                .map_or(0, |t| now_us.wrapping_sub(t));
            if quiet > self.gap_threshold_us {
                self.state = CaptureState::Stop;
            }
        }
        self.state == CaptureState::Stop
    }

    fn record(&mut self, us: u32, next: CaptureState) {
        if self.buffer.push(us).is_ok() {
            self.state = next;
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("IR capture overflow after {} entries", N);
            self.state = CaptureState::Stop;
        }
    }
}

impl<const N: usize> IrReceiver for EdgeCapture<N> {
    fn capture(&self) -> Option<&[u32]> {
        (self.state == CaptureState::Stop).then(|| self.buffer.as_slice())
    }

    fn resume(&mut self) {
        self.buffer.clear();
        self.state = CaptureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::PulseRecorder;
    use irwave_protocol::{Decoder, Encoder};

    /// Replay alternating mark/space durations as edges starting at `start`
    ///
    /// Returns the timestamp of the last edge.
    fn replay<const N: usize>(capture: &mut EdgeCapture<N>, start: u32, pulses: &[u32]) -> u32 {
        let mut now = start;
        capture.on_edge(now, true);
        for (i, &us) in pulses.iter().enumerate() {
            now = now.wrapping_add(us);
            // After an even index a mark ends, after an odd one a space ends
            capture.on_edge(now, i % 2 == 1);
        }
        now
    }

    #[test]
    fn test_simple_frame() {
        let mut capture = EdgeCapture::<16>::default();
        let end = replay(&mut capture, 100_000, &[900, 450, 560]);

        assert_eq!(capture.state(), CaptureState::Space);
        assert!(!capture.poll(end + 1000));
        assert!(capture.poll(end + 6000));

        // First frame since boot has no previous edge, gap reads 0
        assert_eq!(capture.capture(), Some(&[0, 900, 450, 560][..]));
    }

    #[test]
    fn test_gap_measured_from_previous_frame() {
        let mut capture = EdgeCapture::<16>::default();
        let end = replay(&mut capture, 0, &[500]);
        assert!(capture.poll(end + 5001));
        capture.resume();

        replay(&mut capture, end + 20_000, &[700]);
        assert!(capture.poll(end + 40_000));
        assert_eq!(capture.capture(), Some(&[20_000, 700][..]));
    }

    #[test]
    fn test_not_ready_until_quiet() {
        let mut capture = EdgeCapture::<16>::default();
        replay(&mut capture, 0, &[500, 500, 500]);

        assert!(!capture.is_ready());
        assert_eq!(capture.capture(), None);
    }

    #[test]
    fn test_edges_ignored_while_stopped() {
        let mut capture = EdgeCapture::<16>::default();
        let end = replay(&mut capture, 0, &[500]);
        capture.poll(end + 6000);

        capture.on_edge(end + 7000, true);
        capture.on_edge(end + 7500, false);
        assert_eq!(capture.capture(), Some(&[0, 500][..]));
    }

    #[test]
    fn test_mid_frame_start_skipped() {
        let mut capture = EdgeCapture::<16>::default();
        let end = replay(&mut capture, 0, &[500]);
        capture.poll(end + 6000);

        // Another frame starts before the application resumes
        capture.on_edge(end + 7000, true);
        capture.on_edge(end + 7500, false);
        capture.resume();

        // Its next mark is only 500 µs after the last edge: not a frame start
        capture.on_edge(end + 8000, true);
        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.buffer().is_empty());

        // After a real gap the next mark opens a frame
        capture.on_edge(end + 20_000, true);
        assert_eq!(capture.state(), CaptureState::Mark);
        assert_eq!(capture.buffer().as_slice(), &[12_000]);
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut capture = EdgeCapture::<16>::default();
        capture.on_edge(0, true);
        capture.on_edge(300, true);
        capture.on_edge(600, false);

        assert_eq!(capture.buffer().as_slice(), &[0, 600]);
    }

    #[test]
    fn test_overflow_stops_capture() {
        let mut capture = EdgeCapture::<3>::default();
        replay(&mut capture, 0, &[100, 200, 300, 400]);

        assert!(capture.is_overflow());
        assert_eq!(capture.state(), CaptureState::Stop);
        assert_eq!(capture.capture(), Some(&[0, 100, 200][..]));

        capture.resume();
        assert!(!capture.is_overflow());
    }

    #[test]
    fn test_timestamp_wraparound() {
        let mut capture = EdgeCapture::<16>::default();
        let end = replay(&mut capture, u32::MAX - 300, &[600]);
        assert!(capture.poll(end.wrapping_add(6000)));
        assert_eq!(capture.capture(), Some(&[0, 600][..]));
    }

    #[test]
    fn test_captured_frame_decodes() {
        let payload: u128 = 0xA5A5_0000_FFFF_1234_5678_9ABC_DEF0;
        let mut rec = PulseRecorder::<RAW_BUFFER_LEN>::new();
        Encoder::HAIER.send(&mut rec, payload).unwrap();
        let sent = rec.to_capture::<RAW_BUFFER_LEN>(0).unwrap();

        let mut capture = EdgeCapture::<RAW_BUFFER_LEN>::default();
        let end = replay(&mut capture, 1_000_000, sent.pulses());
        assert!(capture.poll(end + 10_000));

        let raw = capture.capture().unwrap();
        assert_eq!(raw.len(), 230);
        assert_eq!(Decoder::HAIER.decode(raw).unwrap().value, payload);

        capture.resume();
        assert!(!capture.is_ready());
    }
}
