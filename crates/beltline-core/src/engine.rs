//! The simulation engine: owns the belt, feeder, receiver, and workers,
//! and orchestrates the four-phase tick pipeline.
//!
//! # Architecture
//!
//! The `Engine` owns:
//! - A [`Belt`] of `belt_slots` slots
//! - The [`Feeder`] (input end) and [`Receiver`] (output end)
//! - A flat worker list, two per station, in tick order
//! - A [`SimState`] (tick counter) and an [`EventBuffer`]
//!
//! # Four-Phase Pipeline
//!
//! Each `step()` runs:
//! 1. **Emit** -- draw from the feeder, advance the belt, deliver the
//!    displaced code to the receiver. An exhausted feeder aborts the step
//!    here, before the belt moves.
//! 2. **Work** -- tick every worker: stations in ascending slot order,
//!    side 0 before side 1.
//! 3. **Release** -- clear all slot reservations.
//! 4. **Bookkeeping** -- increment the tick counter, recompute the state
//!    hash.
//!
//! Advancing before the work phase means a worker sees the freshly
//! arrived content of its slot within the same tick. Releasing after the
//! work phase means a reservation blocks the station's other worker for
//! the rest of the tick but never leaks into the next one.

use crate::belt::Belt;
use crate::code::Code;
use crate::config::{ConfigError, LineConfig};
use crate::event::{Event, EventBuffer};
use crate::feeder::Feeder;
use crate::receiver::Receiver;
use crate::sim::{SimState, StateHash, Ticks};
use crate::worker::{Worker, WorkerState};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that abort a run. All are fatal; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A finite feeder ran dry before the simulation horizon. The
    /// receiver keeps everything delivered before the failing tick.
    #[error("feed exhausted at tick {tick} before the simulation horizon")]
    InsufficientFeed { tick: Ticks },

    /// Invalid configuration at construction.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The core simulation engine. Drives the line through the four-phase
/// tick pipeline for a bounded number of ticks.
#[derive(Debug)]
pub struct Engine {
    config: LineConfig,
    belt: Belt,
    feeder: Feeder,
    receiver: Receiver,
    /// Two workers per station, station-major, side 0 ahead of side 1.
    /// This ordering IS the arbitration rule: earlier workers reserve
    /// slots first.
    workers: Vec<Worker>,
    /// Simulation state (tick counter).
    pub sim_state: SimState,
    events: EventBuffer,
    last_state_hash: u64,
}

impl Engine {
    /// Build an engine from a validated configuration and its two
    /// collaborators.
    pub fn new(
        config: LineConfig,
        feeder: Feeder,
        receiver: Receiver,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let belt = Belt::new(config.belt_slots, config.empty_code);
        let workers = (0..config.num_stations)
            .flat_map(|station| (0..2u8).map(move |side| Worker::new(station, side)))
            .collect();

        let mut engine = Self {
            config,
            belt,
            feeder,
            receiver,
            workers,
            sim_state: SimState::new(),
            events: EventBuffer::default(),
            last_state_hash: 0,
        };
        engine.last_state_hash = engine.compute_state_hash();
        Ok(engine)
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    pub fn belt(&self) -> &Belt {
        &self.belt
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn feeder(&self) -> &Feeder {
        &self.feeder
    }

    /// The most recently computed state hash.
    pub fn state_hash(&self) -> u64 {
        self.last_state_hash
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Events discarded because the buffer was full since the last drain.
    pub fn events_dropped(&self) -> u64 {
        self.events.dropped()
    }

    // -----------------------------------------------------------------------
    // Advance
    // -----------------------------------------------------------------------

    /// Run ticks until the configured horizon is reached. Resumes cleanly
    /// after manual `step()` calls; a no-op once the horizon is met.
    pub fn run(&mut self) -> Result<(), EngineError> {
        while self.sim_state.tick < self.config.num_steps {
            self.step()?;
        }
        Ok(())
    }

    /// Run a single tick and return the code delivered to the receiver.
    pub fn step(&mut self) -> Result<Code, EngineError> {
        let delivered = self.phase_emit()?;
        self.phase_work();
        self.phase_release();
        self.phase_bookkeeping();
        Ok(delivered)
    }

    // -----------------------------------------------------------------------
    // Phase 1: Emit
    // -----------------------------------------------------------------------

    fn phase_emit(&mut self) -> Result<Code, EngineError> {
        let tick = self.sim_state.tick;
        let input = self
            .feeder
            .next()
            .ok_or(EngineError::InsufficientFeed { tick })?;
        self.events.record(Event::CodeFed { code: input, tick });

        let delivered = self.belt.advance(input);
        self.receiver.receive(delivered);
        self.events.record(Event::CodeDelivered {
            code: delivered,
            tick,
        });
        Ok(delivered)
    }

    // -----------------------------------------------------------------------
    // Phase 2: Work
    // -----------------------------------------------------------------------

    fn phase_work(&mut self) {
        let tick = self.sim_state.tick;
        for worker in &mut self.workers {
            worker.tick(&mut self.belt, &self.config, tick, &mut self.events);
        }
    }

    // -----------------------------------------------------------------------
    // Phase 3: Release
    // -----------------------------------------------------------------------

    fn phase_release(&mut self) {
        self.belt.release_all();
    }

    // -----------------------------------------------------------------------
    // Phase 4: Bookkeeping
    // -----------------------------------------------------------------------

    fn phase_bookkeeping(&mut self) {
        self.sim_state.tick += 1;
        self.last_state_hash = self.compute_state_hash();
    }

    /// Compute a deterministic hash of the current simulation state.
    fn compute_state_hash(&self) -> u64 {
        let mut hasher = StateHash::new();

        hasher.write_u64(self.sim_state.tick);

        for i in 0..self.belt.len() {
            hasher.write_u32(self.belt.peek(i).0);
            hasher.write_u32(self.belt.is_free(i) as u32);
        }

        for worker in &self.workers {
            let (tag, remaining) = match worker.state {
                WorkerState::Idle => (0, 0),
                WorkerState::PickingUp { remaining } => (1, remaining),
                WorkerState::Building { remaining } => (2, remaining),
                WorkerState::FinishedBuilding => (3, 0),
                WorkerState::Dropping { remaining } => (4, remaining),
            };
            hasher.write_u32(tag);
            hasher.write_u64(remaining);
            for code in worker.holding() {
                hasher.write_u32(code.0);
            }
        }

        for &code in self.receiver.items() {
            hasher.write_u32(code.0);
        }

        hasher.finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
