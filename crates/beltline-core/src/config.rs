//! Line configuration and construction-time validation.

use crate::code::Code;
use crate::sim::Ticks;

/// Errors raised when a [`LineConfig`] fails validation. All are fatal at
/// engine construction; no run starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("belt must have at least one slot")]
    NoSlots,

    #[error("num_stations ({stations}) cannot exceed belt_slots ({slots})")]
    TooManyStations { stations: usize, slots: usize },

    #[error("required component set must not be empty")]
    EmptyRequiredSet,

    #[error("duplicate required component {0:?}")]
    DuplicateRequiredComponent(Code),

    #[error("required component {0:?} collides with the empty or product code")]
    ComponentCodeCollision(Code),

    #[error("product code and empty code must differ")]
    ProductEmptyCollision,

    #[error("operation durations must be at least one tick")]
    ZeroOpDuration,
}

// ---------------------------------------------------------------------------
// Operation durations
// ---------------------------------------------------------------------------

/// Whole-tick durations of the three timed worker operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpDurations {
    pub pickup: Ticks,
    pub drop: Ticks,
    pub build: Ticks,
}

impl Default for OpDurations {
    fn default() -> Self {
        Self {
            pickup: 1,
            drop: 1,
            build: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Line configuration
// ---------------------------------------------------------------------------

/// Full configuration of a production line. Passed to the engine at
/// construction; immutable for the run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LineConfig {
    /// Number of belt slots (N). Slot 0 is the input end.
    pub belt_slots: usize,

    /// The component codes a worker must collect, one of each, before it
    /// can build. Order is irrelevant; entries must be distinct.
    pub required_components: Vec<Code>,

    /// The code workers drop when an assembly finishes.
    pub product_code: Code,

    /// The code meaning "nothing in this slot".
    pub empty_code: Code,

    /// Alphabet for the random feed mode.
    pub feed_alphabet: Vec<Code>,

    /// Simulation horizon in ticks.
    pub num_steps: Ticks,

    /// Number of worker stations; station `i` is bound to slot `i`.
    /// May be zero (a bare belt that only conveys).
    pub num_stations: usize,

    /// Tick counts for the timed worker operations.
    pub op_durations: OpDurations,
}

impl LineConfig {
    /// A config with the default alphabet and durations, `belt_slots`
    /// slots, and a station on every slot.
    pub fn with_belt_slots(belt_slots: usize) -> Self {
        Self {
            belt_slots,
            required_components: vec![Code::COMPONENT_A, Code::COMPONENT_B],
            product_code: Code::PRODUCT,
            empty_code: Code::EMPTY,
            feed_alphabet: vec![Code::COMPONENT_A, Code::COMPONENT_B, Code::EMPTY],
            num_steps: 100,
            num_stations: belt_slots,
            op_durations: OpDurations::default(),
        }
    }

    /// Check every construction-time rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.belt_slots == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.num_stations > self.belt_slots {
            return Err(ConfigError::TooManyStations {
                stations: self.num_stations,
                slots: self.belt_slots,
            });
        }
        if self.required_components.is_empty() {
            return Err(ConfigError::EmptyRequiredSet);
        }
        if self.product_code == self.empty_code {
            return Err(ConfigError::ProductEmptyCollision);
        }
        for (i, &code) in self.required_components.iter().enumerate() {
            if self.required_components[..i].contains(&code) {
                return Err(ConfigError::DuplicateRequiredComponent(code));
            }
            if code == self.empty_code || code == self.product_code {
                return Err(ConfigError::ComponentCodeCollision(code));
            }
        }
        let ops = self.op_durations;
        if ops.pickup == 0 || ops.drop == 0 || ops.build == 0 {
            return Err(ConfigError::ZeroOpDuration);
        }
        Ok(())
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::with_belt_slots(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LineConfig::default();
        assert_eq!(config.belt_slots, 3);
        assert_eq!(config.num_stations, 3);
        assert_eq!(config.op_durations, OpDurations::default());
        config.validate().unwrap();
    }

    #[test]
    fn stations_default_to_one_per_slot() {
        let config = LineConfig::with_belt_slots(7);
        assert_eq!(config.num_stations, 7);
        config.validate().unwrap();
    }

    #[test]
    fn zero_stations_is_valid() {
        let config = LineConfig {
            num_stations: 0,
            ..LineConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn rejects_zero_slots() {
        let config = LineConfig {
            belt_slots: 0,
            num_stations: 0,
            ..LineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoSlots)));
    }

    #[test]
    fn rejects_more_stations_than_slots() {
        let config = LineConfig {
            num_stations: 4,
            ..LineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyStations {
                stations: 4,
                slots: 3
            })
        ));
    }

    #[test]
    fn rejects_empty_required_set() {
        let config = LineConfig {
            required_components: vec![],
            ..LineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRequiredSet)
        ));
    }

    #[test]
    fn rejects_duplicate_required_component() {
        let config = LineConfig {
            required_components: vec![Code::COMPONENT_A, Code::COMPONENT_A],
            ..LineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateRequiredComponent(Code::COMPONENT_A))
        ));
    }

    #[test]
    fn rejects_component_colliding_with_empty() {
        let config = LineConfig {
            required_components: vec![Code::COMPONENT_A, Code::EMPTY],
            ..LineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ComponentCodeCollision(Code::EMPTY))
        ));
    }

    #[test]
    fn rejects_component_colliding_with_product() {
        let config = LineConfig {
            required_components: vec![Code::PRODUCT, Code::COMPONENT_B],
            ..LineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ComponentCodeCollision(Code::PRODUCT))
        ));
    }

    #[test]
    fn rejects_product_equal_to_empty() {
        let config = LineConfig {
            product_code: Code::EMPTY,
            ..LineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProductEmptyCollision)
        ));
    }

    #[test]
    fn rejects_zero_durations() {
        for ops in [
            OpDurations {
                pickup: 0,
                drop: 1,
                build: 4,
            },
            OpDurations {
                pickup: 1,
                drop: 0,
                build: 4,
            },
            OpDurations {
                pickup: 1,
                drop: 1,
                build: 0,
            },
        ] {
            let config = LineConfig {
                op_durations: ops,
                ..LineConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ZeroOpDuration)
            ));
        }
    }

    #[test]
    fn serde_round_trip() {
        let config = LineConfig::with_belt_slots(5);
        let json = serde_json::to_string(&config).unwrap();
        let restored: LineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
