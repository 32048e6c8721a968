//! Fixed-capacity, append-only event log.

use crate::event::LoopEvent;

/// Append-only log of up to `E` events, kept in recording order.
///
/// Once full, further appends are refused and the retained prefix is left
/// untouched.
#[derive(Clone, Debug)]
pub struct EventLog<const E: usize> {
    events: [LoopEvent; E],
    len: usize,
}

impl<const E: usize> EventLog<E> {
    /// An empty log.
    pub fn new() -> Self {
        Self {
            events: [LoopEvent::default(); E],
            len: 0,
        }
    }

    /// Append `event`. Returns `false`, dropping it, when the log is full.
    pub fn push(&mut self, event: LoopEvent) -> bool {
        let Some(slot) = self.events.get_mut(self.len) else {
            return false;
        };
        *slot = event;
        self.len += 1;
        true
    }

    /// Forget every event.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Recorded events, oldest first.
    pub fn as_slice(&self) -> &[LoopEvent] {
        &self.events[..self.len]
    }

    /// Event at `index`, if recorded.
    pub fn get(&self, index: usize) -> Option<&LoopEvent> {
        self.as_slice().get(index)
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when no further event fits.
    pub fn is_full(&self) -> bool {
        self.len >= E
    }

    /// Maximum number of events.
    pub const fn capacity(&self) -> usize {
        E
    }
}

impl<const E: usize> Default for EventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}
