//! Determinism tooling: compare two engine states and locate divergences.
//!
//! A deterministic run is a pure function of configuration and feed, so
//! two engines driven identically must agree tick for tick. These helpers
//! find out where they stopped agreeing.

use crate::engine::Engine;

// ---------------------------------------------------------------------------
// State diff types
// ---------------------------------------------------------------------------

/// A worker whose state differs between the two engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerDiff {
    pub station: usize,
    pub side: u8,
    pub description: String,
}

/// Per-subsystem match results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemDiff {
    pub belt_matches: bool,
    pub workers_match: bool,
    pub receiver_matches: bool,
    pub tick_matches: bool,
}

/// Full state diff between two engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDiff {
    pub is_identical: bool,
    pub subsystem_diffs: SubsystemDiff,
    pub worker_diffs: Vec<WorkerDiff>,
}

// ---------------------------------------------------------------------------
// Quick compare
// ---------------------------------------------------------------------------

/// Hash-level equality check. Cheap; use before a full diff.
pub fn quick_compare(a: &Engine, b: &Engine) -> bool {
    a.state_hash() == b.state_hash()
}

// ---------------------------------------------------------------------------
// Full diff
// ---------------------------------------------------------------------------

/// Compute a detailed diff between two engine states.
pub fn diff_engines(a: &Engine, b: &Engine) -> StateDiff {
    let belt_matches = a.belt() == b.belt();
    let receiver_matches = a.receiver() == b.receiver();
    let tick_matches = a.sim_state.tick == b.sim_state.tick;

    let mut worker_diffs = Vec::new();
    if a.workers().len() != b.workers().len() {
        worker_diffs.push(WorkerDiff {
            station: usize::MAX,
            side: u8::MAX,
            description: format!(
                "worker count mismatch: {} vs {}",
                a.workers().len(),
                b.workers().len()
            ),
        });
    } else {
        for (wa, wb) in a.workers().iter().zip(b.workers()) {
            if wa != wb {
                worker_diffs.push(WorkerDiff {
                    station: wa.station,
                    side: wa.side,
                    description: format!(
                        "state {:?} holding {:?} vs state {:?} holding {:?}",
                        wa.state,
                        wa.holding(),
                        wb.state,
                        wb.holding()
                    ),
                });
            }
        }
    }

    let subsystem_diffs = SubsystemDiff {
        belt_matches,
        workers_match: worker_diffs.is_empty(),
        receiver_matches,
        tick_matches,
    };
    StateDiff {
        is_identical: belt_matches
            && receiver_matches
            && tick_matches
            && worker_diffs.is_empty(),
        subsystem_diffs,
        worker_diffs,
    }
}
