//! Simulation time and state hashing.
//!
//! Ticks are the atomic unit of simulated time; the engine advances the
//! [`SimState`] counter once per completed step. [`StateHash`] is a cheap
//! digest of engine state for spotting divergence between runs that
//! should be identical.

/// Ticks are the atomic unit of simulation time.
pub type Ticks = u64;

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Mutable simulation state tracked by the engine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimState {
    /// Steps completed since construction.
    pub tick: Ticks,
}

impl SimState {
    pub fn new() -> Self {
        Self { tick: 0 }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// Running FNV-1a digest of engine state.
///
/// Divergence detection needs speed and byte-order stability, not
/// collision resistance: each field's little-endian bytes are folded
/// through the digest and the resulting `u64`s are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(u64);

impl StateHash {
    /// Fresh digest, seeded with the FNV offset basis.
    pub fn new() -> Self {
        Self(0xcbf2_9ce4_8422_2325)
    }

    fn fold(&mut self, byte: u8) {
        // FNV-1a: xor the byte in, then multiply by the 64-bit FNV prime.
        self.0 = (self.0 ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3);
    }

    /// Mix in a `u64`, low byte first.
    pub fn write_u64(&mut self, v: u64) {
        for byte in v.to_le_bytes() {
            self.fold(byte);
        }
    }

    /// Mix in a `u32`, low byte first.
    pub fn write_u32(&mut self, v: u32) {
        for byte in v.to_le_bytes() {
            self.fold(byte);
        }
    }

    /// The digest accumulated so far.
    pub fn finish(self) -> u64 {
        self.0
    }
}
