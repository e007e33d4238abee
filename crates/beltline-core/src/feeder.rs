//! Feed sources for the input end of the belt.
//!
//! A [`Feeder`] is either an explicit finite sequence (deterministic,
//! used by every test) or a seeded uniform draw over a configured
//! alphabet (never exhausts). The two modes share one `next()` contract;
//! dispatch is by enum match, not trait objects.

use std::collections::VecDeque;

use crate::code::Code;
use crate::rng::SimRng;

/// Errors raised when constructing a [`Feeder`].
#[derive(Debug, thiserror::Error)]
pub enum FeederError {
    /// A random source needs at least one code to draw from.
    #[error("random feed source requires a non-empty alphabet")]
    EmptyAlphabet,
}

// ---------------------------------------------------------------------------
// Feed source
// ---------------------------------------------------------------------------

/// Where fed codes come from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
enum FeedSource {
    /// A finite ordered sequence; exhausts when empty.
    Explicit(VecDeque<Code>),
    /// Uniform draws over `alphabet`; never exhausts.
    Random { alphabet: Vec<Code>, rng: SimRng },
}

/// Produces one code per tick for the belt's input end.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Feeder {
    source: FeedSource,
}

impl Feeder {
    /// A feeder that yields `codes` in order and then exhausts.
    pub fn from_sequence(codes: impl IntoIterator<Item = Code>) -> Self {
        Self {
            source: FeedSource::Explicit(codes.into_iter().collect()),
        }
    }

    /// A feeder that draws uniformly from `alphabet`, seeded for
    /// reproducibility.
    pub fn random(alphabet: Vec<Code>, seed: u64) -> Result<Self, FeederError> {
        if alphabet.is_empty() {
            return Err(FeederError::EmptyAlphabet);
        }
        Ok(Self {
            source: FeedSource::Random {
                alphabet,
                rng: SimRng::new(seed),
            },
        })
    }

    /// The next code, or `None` when a finite source is exhausted.
    pub fn next(&mut self) -> Option<Code> {
        match &mut self.source {
            FeedSource::Explicit(codes) => codes.pop_front(),
            FeedSource::Random { alphabet, rng } => {
                let i = rng.next_below(alphabet.len() as u32) as usize;
                Some(alphabet[i])
            }
        }
    }

    /// Codes left in an explicit source; `None` for the unbounded random
    /// mode.
    pub fn remaining(&self) -> Option<usize> {
        match &self.source {
            FeedSource::Explicit(codes) => Some(codes.len()),
            FeedSource::Random { .. } => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_preserves_order() {
        let mut feeder = Feeder::from_sequence([Code(5), Code(6), Code(7)]);
        assert_eq!(feeder.next(), Some(Code(5)));
        assert_eq!(feeder.next(), Some(Code(6)));
        assert_eq!(feeder.next(), Some(Code(7)));
    }

    #[test]
    fn explicit_exhausts() {
        let mut feeder = Feeder::from_sequence([Code(1)]);
        assert_eq!(feeder.remaining(), Some(1));
        assert_eq!(feeder.next(), Some(Code(1)));
        assert_eq!(feeder.next(), None);
        assert_eq!(feeder.next(), None);
        assert_eq!(feeder.remaining(), Some(0));
    }

    #[test]
    fn empty_explicit_exhausts_immediately() {
        let mut feeder = Feeder::from_sequence([]);
        assert_eq!(feeder.next(), None);
    }

    #[test]
    fn random_never_exhausts_and_stays_in_alphabet() {
        let alphabet = vec![Code::COMPONENT_A, Code::COMPONENT_B, Code::EMPTY];
        let mut feeder = Feeder::random(alphabet.clone(), 42).unwrap();
        assert_eq!(feeder.remaining(), None);
        for _ in 0..1_000 {
            let code = feeder.next().unwrap();
            assert!(alphabet.contains(&code));
        }
    }

    #[test]
    fn random_is_reproducible_from_seed() {
        let alphabet = vec![Code::COMPONENT_A, Code::COMPONENT_B, Code::EMPTY];
        let mut a = Feeder::random(alphabet.clone(), 7).unwrap();
        let mut b = Feeder::random(alphabet, 7).unwrap();
        for _ in 0..200 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn random_rejects_empty_alphabet() {
        let err = Feeder::random(vec![], 0).unwrap_err();
        assert!(matches!(err, FeederError::EmptyAlphabet));
    }
}
