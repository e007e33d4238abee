//! The per-station worker state machine.
//!
//! A worker is bound to one belt slot and advances through five states:
//! `Idle`, `PickingUp`, `Building`, `FinishedBuilding`, `Dropping`. The
//! three timed states carry their own `remaining` tick counter, so
//! "remaining is positive exactly in a timed state" holds by construction.
//!
//! Each `tick()` call runs three phases in order:
//!
//! 1. **Decrement** -- a running operation loses one tick.
//! 2. **Completion** -- an operation that reached zero resolves:
//!    pick-up and drop return to `Idle`, a build becomes
//!    `FinishedBuilding`.
//! 3. **Decision** -- an `Idle` worker may reserve its slot to pick up a
//!    needed component, or start building once it holds the full required
//!    set; a `FinishedBuilding` worker may drop its product into a free,
//!    empty slot.
//!
//! Completion runs before decision, so a worker whose operation finishes
//! this tick can act again in the same tick. A worker that starts building
//! cannot finish in the same tick: the counter was just set and the next
//! decrement happens a tick later.
//!
//! Blocked decisions (slot busy, code not needed, slot not empty) are
//! ordinary no-ops that leave the worker in its current state.

use crate::belt::Belt;
use crate::code::Code;
use crate::config::LineConfig;
use crate::event::{Event, EventBuffer};
use crate::sim::Ticks;

// ---------------------------------------------------------------------------
// Worker state
// ---------------------------------------------------------------------------

/// The worker's position in its operation cycle. Timed variants carry the
/// ticks left in the running operation, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WorkerState {
    /// Waiting for a needed component or for a full set to build with.
    Idle,
    /// Transferring a component from the slot into the worker's hands.
    PickingUp { remaining: Ticks },
    /// Assembling the collected components into a product.
    Building { remaining: Ticks },
    /// Holding a finished product, waiting for a free empty slot.
    FinishedBuilding,
    /// Placing the product into the slot.
    Dropping { remaining: Ticks },
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// A single worker, identified by its station (= slot index) and side.
/// Side 0 always acts before side 1 within a tick.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Worker {
    pub station: usize,
    pub side: u8,
    pub state: WorkerState,
    holding: Vec<Code>,
}

impl Worker {
    pub fn new(station: usize, side: u8) -> Self {
        Self {
            station,
            side,
            state: WorkerState::Idle,
            holding: Vec::with_capacity(2),
        }
    }

    /// Components currently in hand. Always distinct members of the
    /// required set, never more than the set's size.
    pub fn holding(&self) -> &[Code] {
        &self.holding
    }

    /// Ticks left in the running operation; zero in untimed states.
    pub fn remaining(&self) -> Ticks {
        match self.state {
            WorkerState::PickingUp { remaining }
            | WorkerState::Building { remaining }
            | WorkerState::Dropping { remaining } => remaining,
            WorkerState::Idle | WorkerState::FinishedBuilding => 0,
        }
    }

    /// True when `code` is a required component the worker does not hold.
    fn needs(&self, code: Code, required: &[Code]) -> bool {
        required.contains(&code) && !self.holding.contains(&code)
    }

    /// Set equality between the hand and the required set. Holding is kept
    /// duplicate-free, so matching lengths means matching sets.
    fn has_required_set(&self, required: &[Code]) -> bool {
        self.holding.len() == required.len()
            && required.iter().all(|c| self.holding.contains(c))
    }

    /// Run one tick of the state machine against the shared belt.
    pub fn tick(
        &mut self,
        belt: &mut Belt,
        config: &LineConfig,
        now: Ticks,
        events: &mut EventBuffer,
    ) {
        // Phases 1-2: decrement and resolve a completed operation.
        self.state = match self.state {
            WorkerState::PickingUp { remaining } => match remaining - 1 {
                0 => WorkerState::Idle,
                remaining => WorkerState::PickingUp { remaining },
            },
            WorkerState::Dropping { remaining } => match remaining - 1 {
                0 => WorkerState::Idle,
                remaining => WorkerState::Dropping { remaining },
            },
            WorkerState::Building { remaining } => match remaining - 1 {
                0 => {
                    events.record(Event::BuildCompleted {
                        station: self.station,
                        side: self.side,
                        tick: now,
                    });
                    WorkerState::FinishedBuilding
                }
                remaining => WorkerState::Building { remaining },
            },
            state => state,
        };

        // Phase 3: decide based on the post-completion state.
        match self.state {
            WorkerState::Idle => self.decide_idle(belt, config, now, events),
            WorkerState::FinishedBuilding => self.decide_drop(belt, config, now, events),
            WorkerState::PickingUp { .. }
            | WorkerState::Building { .. }
            | WorkerState::Dropping { .. } => {}
        }
    }

    fn decide_idle(
        &mut self,
        belt: &mut Belt,
        config: &LineConfig,
        now: Ticks,
        events: &mut EventBuffer,
    ) {
        let slot = self.station;
        let code = belt.peek(slot);
        if belt.is_free(slot) && self.needs(code, &config.required_components) {
            belt.reserve_and_take(slot);
            self.holding.push(code);
            self.state = WorkerState::PickingUp {
                remaining: config.op_durations.pickup,
            };
            events.record(Event::PickupStarted {
                station: self.station,
                side: self.side,
                code,
                tick: now,
            });
        } else if self.has_required_set(&config.required_components) {
            self.state = WorkerState::Building {
                remaining: config.op_durations.build,
            };
            events.record(Event::BuildStarted {
                station: self.station,
                side: self.side,
                tick: now,
            });
        }
    }

    fn decide_drop(
        &mut self,
        belt: &mut Belt,
        config: &LineConfig,
        now: Ticks,
        events: &mut EventBuffer,
    ) {
        let slot = self.station;
        if belt.is_free(slot) && belt.is_empty(slot) {
            belt.reserve_and_put(slot, config.product_code);
            self.holding.clear();
            self.state = WorkerState::Dropping {
                remaining: config.op_durations.drop,
            };
            events.record(Event::ProductDropped {
                station: self.station,
                side: self.side,
                tick: now,
            });
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
