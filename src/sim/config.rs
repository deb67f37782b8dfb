//! Match configuration
//!
//! One engine, two historical rule sets: power-ups either fire the moment they
//! are caught or go into a three-slot inventory for later use.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LIVES, STARTING_LIVES};

/// How caught power-ups reach the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpDelivery {
    /// Activate immediately on catch
    Instant,
    /// Store in the first free inventory slot
    #[default]
    Inventory,
}

/// Score-to-difficulty policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DifficultyCurve {
    /// Linear ramp capped at a reference score
    Continuous,
    /// Fixed increments every score interval
    #[default]
    Stepped,
}

/// Runtime rules for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub delivery: PowerUpDelivery,
    pub difficulty: DifficultyCurve,
    pub starting_lives: u32,
    /// Hearts never raise lives above this
    pub max_lives: u32,
    /// Debug/admin: catches and misses never cost a life
    #[serde(default)]
    pub invulnerable: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            delivery: PowerUpDelivery::Inventory,
            difficulty: DifficultyCurve::Stepped,
            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,
            invulnerable: false,
        }
    }
}

impl GameConfig {
    /// Instant power-ups on a continuous difficulty ramp, no magnet items
    pub fn classic() -> Self {
        Self {
            delivery: PowerUpDelivery::Instant,
            difficulty: DifficultyCurve::Continuous,
            ..Self::default()
        }
    }

    /// Admin profile: large life pool that never drains
    pub fn admin() -> Self {
        Self {
            starting_lives: 99,
            max_lives: 99,
            invulnerable: true,
            ..Self::default()
        }
    }
}
