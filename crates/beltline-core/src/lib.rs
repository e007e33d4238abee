//! Beltline Core -- a deterministic, tick-driven simulation of a linear
//! assembly line.
//!
//! A fixed-length conveyor belt carries codes from a [`feeder::Feeder`] at
//! the input end past two-worker stations to a [`receiver::Receiver`] at
//! the output end. Workers pick required components off the belt, spend
//! ticks assembling them, and drop finished products back into their slot.
//!
//! # Four-Phase Tick Pipeline
//!
//! Each call to [`engine::Engine::step`] advances the simulation by one
//! tick through the following phases:
//!
//! 1. **Emit** -- the feeder supplies one code, the belt shifts one slot
//!    toward the output, and the displaced code lands in the receiver.
//! 2. **Work** -- every worker runs once: stations in ascending slot
//!    order, side 0 before side 1 within a station.
//! 3. **Release** -- all per-tick slot reservations are cleared.
//! 4. **Bookkeeping** -- the tick counter advances and the state hash is
//!    recomputed.
//!
//! # Slot Arbitration
//!
//! The two workers of a station share one belt slot. The belt's
//! reserve-and-mutate operations ([`belt::Belt::reserve_and_take`],
//! [`belt::Belt::reserve_and_put`]) flip the slot's availability to BUSY
//! in the same call that mutates it, so whichever worker acts first owns
//! the slot for the remainder of the tick. The fixed side-0-first tick
//! order makes the tie-break deterministic.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- the tick loop and pipeline orchestrator.
//! - [`belt::Belt`] -- fixed-length slots with per-tick reservations.
//! - [`worker::Worker`] -- the five-state pick/build/drop state machine.
//! - [`feeder::Feeder`] -- explicit-sequence or seeded-random feed.
//! - [`config::LineConfig`] -- full run configuration with validation.
//! - [`event::EventBuffer`] -- bounded buffer of simulation events.
//! - [`sim::StateHash`] -- FNV-1a digest for divergence detection.
//!
//! Given an explicit feed sequence and a fixed configuration, the entire
//! output trace is a pure function of its inputs; the random feed mode is
//! reproducible from its seed.

pub mod belt;
pub mod code;
pub mod config;
pub mod engine;
pub mod event;
pub mod feeder;
pub mod receiver;
pub mod rng;
pub mod sim;
pub mod validation;
pub mod worker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
