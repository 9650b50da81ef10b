//! Host ports: the callbacks the engine invokes synchronously while it runs.
//! The engine only ever borrows a port for the duration of a call.

use crate::constants::KEY_COUNT;

/// Refreshes the pressed status of keys 0..F. Called once per interpreter cycle.
pub trait InputSampler {
    fn sample(&mut self, keys: &mut [bool; KEY_COUNT]);
}

/// Receives the frame buffer as packed 32-bit colors, row major.
/// Called once for every cycle that left a redraw pending.
pub trait FrameSink {
    fn render(&mut self, frame: &[u32], width: usize, height: usize);
}

/// Receives human readable diagnostics: one line per executed opcode, beeps and faults.
pub trait EventSink {
    fn event(&mut self, message: &str);
}

impl<F> InputSampler for F
where
    F: FnMut(&mut [bool; KEY_COUNT]),
{
    fn sample(&mut self, keys: &mut [bool; KEY_COUNT]) {
        self(keys)
    }
}

impl<F> FrameSink for F
where
    F: FnMut(&[u32], usize, usize),
{
    fn render(&mut self, frame: &[u32], width: usize, height: usize) {
        self(frame, width, height)
    }
}

impl<F> EventSink for F
where
    F: FnMut(&str),
{
    fn event(&mut self, message: &str) {
        self(message)
    }
}

/// An `EventSink` that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Quiet;

impl EventSink for Quiet {
    fn event(&mut self, _message: &str) {}
}
