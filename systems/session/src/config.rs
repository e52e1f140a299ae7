use elemental_defence_core::ConfigError;
use serde::{Deserialize, Serialize};

const DEFAULT_STARTING_MONEY: u32 = 50;
const DEFAULT_STARTING_HEALTH: u32 = 100;
const DEFAULT_AREA_EXTENT: f64 = 700.0;

/// Tunable parameters of a play session.
///
/// Missing fields fall back to their defaults when deserialising.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Money the player starts with.
    pub starting_money: u32,
    /// Base health the player starts with.
    pub starting_health: u32,
    /// Side of the square play area in world units.
    pub area_extent: f64,
}

impl SessionConfig {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub const fn new(starting_money: u32, starting_health: u32, area_extent: f64) -> Self {
        Self {
            starting_money,
            starting_health,
            area_extent,
        }
    }

    /// Rejects settings the simulation cannot run with.
    ///
    /// The play-area extent scales every tower position, so it must be a
    /// finite positive number.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        if !self.area_extent.is_finite() || self.area_extent <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                origin: origin.to_owned(),
                setting: "area_extent".to_owned(),
                value: self.area_extent.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_STARTING_MONEY,
            DEFAULT_STARTING_HEALTH,
            DEFAULT_AREA_EXTENT,
        )
    }
}
