//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these
//! helpers are available in unit tests, integration tests, and benchmarks
//! (via the `test-utils` feature).

use crate::code::Code;
use crate::config::LineConfig;
use crate::engine::{Engine, EngineError};
use crate::feeder::Feeder;
use crate::receiver::Receiver;

// ===========================================================================
// Code constructors
// ===========================================================================

pub fn component_a() -> Code {
    Code::COMPONENT_A
}

pub fn component_b() -> Code {
    Code::COMPONENT_B
}

pub fn product() -> Code {
    Code::PRODUCT
}

pub fn empty() -> Code {
    Code::EMPTY
}

/// An opaque payload code that is neither a component, the product, nor
/// the empty marker. Distinct payloads for distinct `n`.
pub fn payload(n: u32) -> Code {
    Code(100 + n)
}

// ===========================================================================
// Feed builders
// ===========================================================================

/// An explicit feeder over the given codes.
pub fn feed(codes: &[Code]) -> Feeder {
    Feeder::from_sequence(codes.iter().copied())
}

/// An explicit feeder of `len` empty codes.
pub fn empty_feed(len: usize) -> Feeder {
    Feeder::from_sequence(std::iter::repeat_n(Code::EMPTY, len))
}

/// `[A, B]` repeated `pairs` times, then `tail` empty codes.
pub fn alternating_feed(pairs: usize, tail: usize) -> Feeder {
    let mut codes = Vec::with_capacity(pairs * 2 + tail);
    for _ in 0..pairs {
        codes.push(Code::COMPONENT_A);
        codes.push(Code::COMPONENT_B);
    }
    codes.extend(std::iter::repeat_n(Code::EMPTY, tail));
    Feeder::from_sequence(codes)
}

// ===========================================================================
// Engine builders
// ===========================================================================

/// An engine over the default config with the given horizon and feed.
pub fn engine(num_steps: u64, feeder: Feeder) -> Engine {
    let config = LineConfig {
        num_steps,
        ..LineConfig::default()
    };
    Engine::new(config, feeder, Receiver::new()).unwrap()
}

/// An engine over a custom config and feed.
pub fn engine_with(config: LineConfig, feeder: Feeder) -> Engine {
    Engine::new(config, feeder, Receiver::new()).unwrap()
}

/// Run to the horizon and hand back the received codes.
pub fn run_to_completion(engine: &mut Engine) -> Result<Vec<Code>, EngineError> {
    engine.run()?;
    Ok(engine.receiver().items().to_vec())
}
