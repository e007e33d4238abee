//! Deterministic PRNG for the random feed mode.
//!
//! Uses the SplitMix64 algorithm: fast, 8 bytes of state, excellent
//! statistical properties, and trivially serializable.

/// SplitMix64 pseudo-random number generator.
///
/// Deterministic across platforms, so a run with a random feeder is fully
/// reproducible from its seed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Draw a uniform index in `[0, n)`.
    ///
    /// Uses a widening multiply on the high 32 bits of the next draw; for
    /// the small `n` used by feed alphabets the bias is negligible.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn next_below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "next_below requires n > 0");
        let upper = self.next_u64() >> 32;
        ((upper * n as u64) >> 32) as u32
    }

    /// Get the internal state (for hashing/serialization).
    pub fn state(&self) -> u64 {
        self.state
    }
}
