//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, config, inputs and
//! frame deltas, a match plays out identically:
//! - Seeded RNG only (effects draw from a separate stream)
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod config;
pub mod difficulty;
pub mod effects;
pub mod event;
pub mod item;
pub mod powerup;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Outcome, Rect, basket_rect, classify};
pub use config::{DifficultyCurve, GameConfig, PowerUpDelivery};
pub use difficulty::{Difficulty, difficulty_for, difficulty_level};
pub use event::{GameEvent, MatchReport};
pub use item::{FallingItem, ItemKind, PowerUpKind};
pub use powerup::{ActiveEffects, ComboState, Countdown, Inventory};
pub use state::{FloatingText, GameState, GameStats, MatchPhase, Particle, Player, ScreenShake};
pub use tick::{InputState, activate_slot, tick};
