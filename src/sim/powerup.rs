//! Power-up timers, combo tracking and the deferred-use inventory

use serde::{Deserialize, Serialize};

use super::item::PowerUpKind;
use crate::consts::*;

/// Millisecond countdown that reports the positive-to-zero crossing once
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f32,
}

impl Countdown {
    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    /// (Re)start at full duration; never accumulates
    pub fn start(&mut self, duration_ms: f32) {
        self.remaining_ms = duration_ms.max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining_ms = 0.0;
    }

    /// Advance by `elapsed_ms`. Returns true only on the tick that reaches zero.
    pub fn advance(&mut self, elapsed_ms: f32) -> bool {
        if self.remaining_ms <= 0.0 {
            return false;
        }
        self.remaining_ms = (self.remaining_ms - elapsed_ms.max(0.0)).max(0.0);
        self.remaining_ms == 0.0
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub slow_motion: Countdown,
    pub multiplier: Countdown,
    pub magnet: Countdown,
    /// Current score multiplier (1 when no star is active)
    pub score_multiplier: u64,
}

impl Default for ActiveEffects {
    fn default() -> Self {
        Self {
            slow_motion: Countdown::default(),
            multiplier: Countdown::default(),
            magnet: Countdown::default(),
            score_multiplier: 1,
        }
    }
}

impl ActiveEffects {
    /// Apply a power-up. Re-activation refreshes duration, never magnitude.
    pub fn activate(&mut self, kind: PowerUpKind) {
        let duration = kind.duration_ms();
        match kind {
            PowerUpKind::SlowMotion => self.slow_motion.start(duration),
            PowerUpKind::ScoreMultiplier => {
                self.multiplier.start(duration);
                self.score_multiplier = SCORE_MULTIPLIER;
            }
            PowerUpKind::Magnet => self.magnet.start(duration),
        }
    }

    /// Advance all timers by real elapsed time; returns the effects that just ended
    pub fn advance(&mut self, elapsed_ms: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        if self.slow_motion.advance(elapsed_ms) {
            expired.push(PowerUpKind::SlowMotion);
        }
        if self.multiplier.advance(elapsed_ms) {
            self.score_multiplier = 1;
            expired.push(PowerUpKind::ScoreMultiplier);
        }
        if self.magnet.advance(elapsed_ms) {
            expired.push(PowerUpKind::Magnet);
        }
        expired
    }

    /// Logic time scale for this frame
    pub fn time_scale(&self) -> f32 {
        if self.slow_motion.is_active() {
            SLOW_MOTION_FACTOR
        } else {
            1.0
        }
    }

    pub fn magnet_active(&self) -> bool {
        self.magnet.is_active()
    }
}

/// Streak of consecutive point-awarding catches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboState {
    /// Saturates at `COMBO_THRESHOLD`
    pub counter: u32,
    pub active: bool,
    pub countdown: Countdown,
}

impl ComboState {
    /// Register a scoring catch. Returns true when the combo just became active.
    pub fn register_catch(&mut self) -> bool {
        self.counter = (self.counter + 1).min(COMBO_THRESHOLD);
        if self.counter >= COMBO_THRESHOLD {
            let started = !self.active;
            self.active = true;
            self.countdown.start(COMBO_DURATION);
            return started;
        }
        false
    }

    /// Drop the streak immediately. Returns true if there was anything to drop.
    pub fn reset(&mut self) -> bool {
        let had_streak = self.counter > 0 || self.active;
        self.counter = 0;
        self.active = false;
        self.countdown.clear();
        had_streak
    }

    /// Age the idle countdown. Returns true when an active combo just lapsed.
    pub fn advance(&mut self, elapsed_ms: f32) -> bool {
        if !self.active {
            return false;
        }
        if self.countdown.advance(elapsed_ms) {
            self.counter = 0;
            self.active = false;
            return true;
        }
        false
    }

    /// 2 while the combo is active, else 1
    pub fn multiplier(&self) -> u64 {
        if self.active { 2 } else { 1 }
    }
}

/// Fixed slots for collected power-ups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: [Option<PowerUpKind>; INVENTORY_SIZE],
}

impl Inventory {
    pub fn slots(&self) -> &[Option<PowerUpKind>; INVENTORY_SIZE] {
        &self.slots
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Put `kind` in the first empty slot; returns the slot index or None when full
    pub fn insert(&mut self, kind: PowerUpKind) -> Option<usize> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(kind);
        Some(slot)
    }

    /// Empty a slot, returning what it held. Out-of-range slots yield None.
    pub fn take(&mut self, slot: usize) -> Option<PowerUpKind> {
        self.slots.get_mut(slot)?.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut c = Countdown::default();
        c.start(100.0);
        assert!(!c.advance(60.0));
        assert!(c.advance(60.0));
        assert_eq!(c.remaining_ms(), 0.0);
        assert!(!c.advance(60.0));
        assert!(!c.is_active());
    }

    #[test]
    fn test_countdown_ignores_negative_elapsed() {
        let mut c = Countdown::default();
        c.start(50.0);
        assert!(!c.advance(-20.0));
        assert_eq!(c.remaining_ms(), 50.0);
    }

    #[test]
    fn test_multiplier_resets_on_expiry() {
        let mut fx = ActiveEffects::default();
        fx.activate(PowerUpKind::ScoreMultiplier);
        assert_eq!(fx.score_multiplier, SCORE_MULTIPLIER);
        let expired = fx.advance(MULTIPLIER_DURATION + 1.0);
        assert_eq!(expired, vec![PowerUpKind::ScoreMultiplier]);
        assert_eq!(fx.score_multiplier, 1);
        assert!(fx.advance(1000.0).is_empty());
    }

    #[test]
    fn test_reactivation_refreshes_duration_only() {
        let mut fx = ActiveEffects::default();
        fx.activate(PowerUpKind::ScoreMultiplier);
        fx.advance(3000.0);
        fx.activate(PowerUpKind::ScoreMultiplier);
        assert_eq!(fx.multiplier.remaining_ms(), MULTIPLIER_DURATION);
        assert_eq!(fx.score_multiplier, SCORE_MULTIPLIER);
    }

    #[test]
    fn test_slow_motion_scales_time() {
        let mut fx = ActiveEffects::default();
        assert_eq!(fx.time_scale(), 1.0);
        fx.activate(PowerUpKind::SlowMotion);
        assert_eq!(fx.time_scale(), SLOW_MOTION_FACTOR);
    }

    #[test]
    fn test_combo_activates_at_threshold_and_saturates() {
        let mut combo = ComboState::default();
        for _ in 0..COMBO_THRESHOLD - 1 {
            assert!(!combo.register_catch());
        }
        assert!(!combo.active);
        assert!(combo.register_catch());
        assert!(combo.active);
        assert!(!combo.register_catch());
        assert_eq!(combo.counter, COMBO_THRESHOLD);
        assert_eq!(combo.multiplier(), 2);
    }

    #[test]
    fn test_combo_lapses_with_counter_reset() {
        let mut combo = ComboState::default();
        for _ in 0..COMBO_THRESHOLD {
            combo.register_catch();
        }
        assert!(!combo.advance(COMBO_DURATION - 1.0));
        assert!(combo.advance(1.0));
        assert_eq!(combo.counter, 0);
        assert!(!combo.active);
    }

    #[test]
    fn test_inventory_fills_first_empty_slot() {
        let mut inv = Inventory::default();
        assert_eq!(inv.insert(PowerUpKind::Magnet), Some(0));
        assert_eq!(inv.insert(PowerUpKind::SlowMotion), Some(1));
        assert_eq!(inv.take(0), Some(PowerUpKind::Magnet));
        assert_eq!(inv.insert(PowerUpKind::ScoreMultiplier), Some(0));
        assert_eq!(inv.insert(PowerUpKind::Magnet), Some(2));
        assert!(inv.is_full());
        assert_eq!(inv.insert(PowerUpKind::Magnet), None);
    }

    #[test]
    fn test_inventory_take_out_of_range() {
        let mut inv = Inventory::default();
        assert_eq!(inv.take(INVENTORY_SIZE), None);
        assert_eq!(inv.take(0), None);
    }
}
