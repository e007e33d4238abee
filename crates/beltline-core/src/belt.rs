//! The conveyor belt: a fixed-length run of slots with per-tick
//! reservation flags.
//!
//! Each slot always holds exactly one [`Code`] (the configured empty code
//! when nothing is there) plus a FREE/BUSY availability flag. The combined
//! reserve-and-mutate operations flip the flag in the same call that
//! touches the content, which enforces the at-most-one-mutation-per-tick
//! rule by construction: whichever worker reserves first wins the slot for
//! the rest of the tick. Peeks never reserve, so both workers at a station
//! may observe a slot before either acts.

use crate::code::Code;

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Per-tick reservation state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Availability {
    /// No worker has touched the slot this tick.
    Free,
    /// A worker has already initiated a mutation or pick-up here this tick.
    Busy,
}

/// One addressable position on the belt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    pub content: Code,
    pub availability: Availability,
}

// ---------------------------------------------------------------------------
// Belt
// ---------------------------------------------------------------------------

/// A fixed-length ordered run of slots. Slot 0 is the input end; slot
/// `len() - 1` is the output end.
///
/// All slot indices must be in `[0, len())`; an out-of-range index is a
/// programmer error and panics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Belt {
    slots: Vec<Slot>,
    empty_code: Code,
}

impl Belt {
    /// Create a belt of `len` slots, every slot empty and FREE.
    pub fn new(len: usize, empty_code: Code) -> Self {
        Self {
            slots: vec![
                Slot {
                    content: empty_code,
                    availability: Availability::Free,
                };
                len
            ],
            empty_code,
        }
    }

    /// Number of slots. Constant for the life of the belt.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The code that marks a vacant slot.
    pub fn empty_code(&self) -> Code {
        self.empty_code
    }

    /// Return the content of slot `i` without side effects.
    pub fn peek(&self, i: usize) -> Code {
        self.slots[i].content
    }

    /// True when slot `i` has not been reserved this tick.
    pub fn is_free(&self, i: usize) -> bool {
        self.slots[i].availability == Availability::Free
    }

    /// True when slot `i` holds the empty code.
    pub fn is_empty(&self, i: usize) -> bool {
        self.slots[i].content == self.empty_code
    }

    /// Place `code` in slot `i` and mark the slot BUSY for the rest of the
    /// tick. The slot must be FREE.
    pub fn reserve_and_put(&mut self, i: usize, code: Code) {
        debug_assert!(self.is_free(i), "reserve_and_put on a busy slot");
        self.slots[i] = Slot {
            content: code,
            availability: Availability::Busy,
        };
    }

    /// Take the content of slot `i`, leaving it empty and BUSY for the rest
    /// of the tick. The slot must be FREE.
    pub fn reserve_and_take(&mut self, i: usize) -> Code {
        debug_assert!(self.is_free(i), "reserve_and_take on a busy slot");
        let taken = self.slots[i].content;
        self.slots[i] = Slot {
            content: self.empty_code,
            availability: Availability::Busy,
        };
        taken
    }

    /// Clear every reservation. Called exactly once per tick, after all
    /// workers have acted. Idempotent.
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.availability = Availability::Free;
        }
    }

    /// Shift every slot one position toward the output end: the content of
    /// the output slot is returned, and `input` lands in slot 0.
    /// Availability flags are untouched; releasing is a separate phase.
    pub fn advance(&mut self, input: Code) -> Code {
        let last = self.slots.len() - 1;
        let out = self.slots[last].content;
        for i in (1..=last).rev() {
            self.slots[i].content = self.slots[i - 1].content;
        }
        self.slots[0].content = input;
        out
    }

    /// Ordered slot contents, input end first.
    pub fn codes(&self) -> impl Iterator<Item = Code> + '_ {
        self.slots.iter().map(|s| s.content)
    }

    /// Number of slots currently holding `code`.
    pub fn count_of(&self, code: Code) -> usize {
        self.slots.iter().filter(|s| s.content == code).count()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
