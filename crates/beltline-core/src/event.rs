//! Simulation events with a bounded buffer.
//!
//! Events are recorded during the emit and work phases and drained by the
//! harness (or a stats consumer) between ticks. The buffer is
//! capacity-bounded: once full, further events are counted as dropped
//! rather than grown, so a long unobserved run cannot balloon memory.

use crate::code::Code;
use crate::sim::Ticks;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A simulation event. All events carry the tick at which they occurred.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    // -- Belt ends --
    /// The feeder supplied `code` to the input end of the belt.
    CodeFed { code: Code, tick: Ticks },
    /// `code` fell off the output end into the receiver.
    CodeDelivered { code: Code, tick: Ticks },

    // -- Workers --
    /// A worker reserved its slot and began picking up `code`.
    PickupStarted {
        station: usize,
        side: u8,
        code: Code,
        tick: Ticks,
    },
    /// A worker collected its full required set and began assembling.
    BuildStarted { station: usize, side: u8, tick: Ticks },
    /// An assembly finished; the worker now waits for an empty slot.
    BuildCompleted { station: usize, side: u8, tick: Ticks },
    /// A finished product was placed on the belt.
    ProductDropped { station: usize, side: u8, tick: Ticks },
}

// ---------------------------------------------------------------------------
// Event buffer
// ---------------------------------------------------------------------------

/// Default capacity of the engine's event buffer, in events.
pub const DEFAULT_EVENT_CAPACITY: usize = 4096;

/// Capacity-bounded event store with drop accounting.
#[derive(Debug, Clone)]
pub struct EventBuffer {
    events: Vec<Event>,
    capacity: usize,
    dropped: u64,
}

impl EventBuffer {
    /// Create a buffer that holds at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Record an event, or count it as dropped when the buffer is full.
    pub fn record(&mut self, event: Event) {
        if self.events.len() < self.capacity {
            self.events.push(event);
        } else {
            self.dropped += 1;
        }
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events dropped since the last drain.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Take all buffered events in recording order and reset the drop
    /// counter.
    pub fn drain(&mut self) -> Vec<Event> {
        self.dropped = 0;
        std::mem::take(&mut self.events)
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fed(tick: Ticks) -> Event {
        Event::CodeFed {
            code: Code::COMPONENT_A,
            tick,
        }
    }

    #[test]
    fn record_and_drain_in_order() {
        let mut buf = EventBuffer::new(8);
        buf.record(fed(0));
        buf.record(fed(1));
        assert_eq!(buf.len(), 2);

        let events = buf.drain();
        assert_eq!(events, vec![fed(0), fed(1)]);
        assert!(buf.is_empty());
    }

    #[test]
    fn overflow_counts_drops_instead_of_growing() {
        let mut buf = EventBuffer::new(2);
        buf.record(fed(0));
        buf.record(fed(1));
        buf.record(fed(2));
        buf.record(fed(3));

        assert_eq!(buf.len(), 2);
        assert_eq!(buf.dropped(), 2);
    }

    #[test]
    fn drain_resets_drop_counter() {
        let mut buf = EventBuffer::new(1);
        buf.record(fed(0));
        buf.record(fed(1));
        assert_eq!(buf.dropped(), 1);

        buf.drain();
        assert_eq!(buf.dropped(), 0);

        buf.record(fed(2));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.dropped(), 0);
    }
}
