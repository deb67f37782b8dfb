//! Egg Catcher - A single-screen arcade catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, catches, power-ups, combo)
//! - `engine`: Match lifecycle, frame clock, pause gate and game-over hand-off
//! - `persistence`: Key-value store, player profiles and leaderboard records
//! - `audio`: Event-to-cue mapping (plus Web Audio playback on wasm32)
//! - `settings`: Persisted user preferences

pub mod audio;
pub mod clock;
pub mod engine;
pub mod leaderboard;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use engine::{Engine, GameOverHandler, MatchReport, TickOutput};
pub use leaderboard::Leaderboard;
pub use settings::Settings;
pub use snapshot::RenderableState;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player sprite box; the basket hangs inside it
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Keyboard movement speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 500.0;
    /// Fraction of the remaining distance covered per frame when following a pointer
    pub const POINTER_SMOOTHING: f32 = 0.2;

    /// Basket hitbox, offset from the player's top edge
    pub const BASKET_OFFSET_Y: f32 = 60.0;
    pub const BASKET_WIDTH: f32 = 90.0;
    pub const BASKET_HEIGHT: f32 = 20.0;

    /// Falling item geometry
    pub const EGG_WIDTH: f32 = 30.0;
    pub const EGG_HEIGHT: f32 = 40.0;
    pub const BOMB_RADIUS: f32 = 20.0;
    pub const HEART_WIDTH: f32 = 35.0;
    pub const HEART_HEIGHT: f32 = 35.0;
    pub const CLOCK_RADIUS: f32 = 20.0;
    pub const STAR_WIDTH: f32 = 35.0;
    pub const STAR_HEIGHT: f32 = 35.0;
    pub const MAGNET_WIDTH: f32 = 40.0;
    pub const MAGNET_HEIGHT: f32 = 35.0;
    /// Sideways drift at spawn is uniform in [-MAX_DRIFT, MAX_DRIFT)
    pub const MAX_DRIFT: f32 = 30.0;

    /// Difficulty baseline
    pub const INITIAL_FALL_SPEED: f32 = 120.0;
    /// Seconds between spawns at score 0
    pub const INITIAL_SPAWN_INTERVAL: f32 = 1.1;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.3;
    /// Continuous curve: difficulty saturates at this score
    pub const MAX_DIFFICULTY_SCORE: u64 = 500;
    pub const CONTINUOUS_SPEED_GAIN: f32 = 300.0;
    /// Stepped curve: one level per interval
    pub const DIFFICULTY_SCORE_INTERVAL: u64 = 100;
    pub const SPEED_INCREASE_PER_LEVEL: f32 = 25.0;
    pub const SPAWN_INTERVAL_DECREASE_PER_LEVEL: f32 = 0.05;
    /// Level at which the stepped spawn interval hits its floor
    pub const MAX_DIFFICULTY_LEVEL: u64 = 16;

    /// Power-ups (durations in milliseconds)
    pub const SLOW_MOTION_DURATION: f32 = 5000.0;
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;
    pub const MULTIPLIER_DURATION: f32 = 7000.0;
    pub const SCORE_MULTIPLIER: u64 = 2;
    pub const MAGNET_DURATION: f32 = 5000.0;
    pub const MAGNET_ATTRACTION_FORCE: f32 = 300.0;
    /// No magnet pull inside this range (pixels)
    pub const MAGNET_MIN_DISTANCE: f32 = 10.0;

    /// Scoring
    pub const SCORE_NORMAL: u64 = 1;
    pub const SCORE_GOLDEN: u64 = 5;
    pub const COIN_CONVERSION_RATE: u64 = 10;

    /// Combo
    pub const COMBO_THRESHOLD: u32 = 5;
    pub const COMBO_DURATION: f32 = 5000.0;

    /// Lives
    pub const STARTING_LIVES: u32 = 3;
    pub const MAX_LIVES: u32 = 3;

    /// Inventory slots for deferred power-ups
    pub const INVENTORY_SIZE: usize = 3;

    /// Leaderboard length
    pub const LEADERBOARD_SIZE: usize = 5;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Top edge of the basket hitbox (constant, the player never moves vertically)
#[inline]
pub fn basket_top() -> f32 {
    consts::PLAYFIELD_HEIGHT - consts::PLAYER_HEIGHT + consts::BASKET_OFFSET_Y
}

/// Centre of the basket opening for a player at `player_x`
#[inline]
pub fn basket_center(player_x: f32) -> Vec2 {
    Vec2::new(player_x + consts::PLAYER_WIDTH / 2.0, basket_top())
}

/// Clamp a player x so the sprite stays inside the playfield
#[inline]
pub fn clamp_player_x(x: f32) -> f32 {
    x.clamp(0.0, consts::PLAYFIELD_WIDTH - consts::PLAYER_WIDTH)
}
