//! Game state and core simulation types
//!
//! Everything a match mutates lives in one `GameState`, owned by the caller and
//! passed by `&mut` into `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::item::{FallingItem, ItemKind};
use super::powerup::{ActiveEffects, ComboState, Inventory};
use crate::consts::*;

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Fresh state, waiting for start
    Ready,
    /// Simulation advances every frame
    Running,
    /// Lives ran out (terminal)
    Over,
}

/// Per-match counters handed to the game-over screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub golden_caught: u32,
    pub bombs_hit: u32,
    pub rotten_hit: u32,
    pub stars_caught: u32,
    pub magnets_caught: u32,
}

/// The player; only the horizontal position moves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYFIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// Item kind the burst came from, for color lookup
    pub kind: ItemKind,
    /// Seconds left; opacity follows it
    pub life: f32,
    pub radius: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Rising text such as "+5"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub pos: Vec2,
    pub vel_y: f32,
    pub life: f32,
}

/// Camera shake request
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub magnitude: f32,
    pub remaining_ms: f32,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub phase: MatchPhase,
    pub score: u64,
    pub lives: u32,
    pub stats: GameStats,
    pub player: Player,
    /// Falling items (sorted by id)
    pub items: Vec<FallingItem>,
    pub effects: ActiveEffects,
    pub combo: ComboState,
    pub inventory: Inventory,
    /// Logic seconds since the last spawn
    pub spawn_timer: f32,
    /// Frames simulated this match
    pub time_ticks: u64,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub floating_texts: Vec<FloatingText>,
    pub screen_shake: ScreenShake,
    /// Gameplay randomness (spawns)
    pub(crate) rng: Pcg32,
    /// Cosmetic randomness, kept apart so effects never shift the spawn sequence
    pub(crate) fx_rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh match state in the `Ready` phase
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            seed,
            phase: MatchPhase::Ready,
            score: 0,
            lives: config.starting_lives,
            stats: GameStats::default(),
            player: Player::default(),
            items: Vec::new(),
            effects: ActiveEffects::default(),
            combo: ComboState::default(),
            inventory: Inventory::default(),
            spawn_timer: 0.0,
            time_ticks: 0,
            particles: Vec::new(),
            floating_texts: Vec::new(),
            screen_shake: ScreenShake::default(),
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
            next_id: 1,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an item with a fresh id and return that id
    pub fn push_item(&mut self, kind: ItemKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.items.push(FallingItem::new(id, kind, pos, vel));
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Lose one life unless invulnerable
    pub(crate) fn lose_life(&mut self) {
        if !self.config.invulnerable {
            self.lives = self.lives.saturating_sub(1);
        }
    }

    /// Gain one life up to the cap. Returns true if lives changed.
    pub(crate) fn gain_life(&mut self) -> bool {
        if self.config.invulnerable || self.lives >= self.config.max_lives {
            return false;
        }
        self.lives += 1;
        true
    }

    /// Ensure items are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.items.sort_by_key(|i| i.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready_and_empty() {
        let state = GameState::new(7, GameConfig::default());
        assert_eq!(state.phase, MatchPhase::Ready);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, 0);
        assert!(state.items.is_empty());
        assert_eq!(state.player.x, 360.0);
    }

    #[test]
    fn test_lives_respect_cap_and_invulnerability() {
        let mut state = GameState::new(7, GameConfig::default());
        assert!(!state.gain_life());
        state.lose_life();
        assert_eq!(state.lives, 2);
        assert!(state.gain_life());
        assert_eq!(state.lives, 3);

        let mut admin = GameState::new(7, GameConfig::admin());
        admin.lose_life();
        assert_eq!(admin.lives, 99);
    }

    #[test]
    fn test_entity_ids_are_monotonic() {
        let mut state = GameState::new(1, GameConfig::default());
        let a = state.push_item(ItemKind::Normal, Vec2::ZERO, Vec2::ZERO);
        let b = state.push_item(ItemKind::Bomb, Vec2::ZERO, Vec2::ZERO);
        assert!(b > a);
        assert_eq!(state.items[1].size, ItemKind::Bomb.size());
    }
}
