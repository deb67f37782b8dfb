//! Discrete game events emitted by the simulation step
//!
//! Consumers (audio, UI, effects) read these; they never feed back into the sim.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::item::{ItemKind, PowerUpKind};
use super::state::GameStats;

/// Final numbers of a finished match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u64,
    pub stats: GameStats,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Item landed in the basket
    Catch { kind: ItemKind, pos: Vec2 },
    /// Point-awarding item fell past the bottom
    Miss { kind: ItemKind, pos: Vec2 },
    /// Points added to the score
    ScoreAdded { amount: u64, pos: Vec2 },
    /// Power-up went into an inventory slot
    PowerUpStored { kind: PowerUpKind, slot: usize },
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    ComboStarted,
    /// Streak dropped by a hazard, a miss or the idle countdown
    ComboBroken,
    GameOver { report: MatchReport },
}
