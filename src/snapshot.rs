//! Read-only view of a match for renderers and HUDs

use serde::Serialize;

use crate::sim::{
    FallingItem, FloatingText, GameState, GameStats, MatchPhase, Particle, PowerUpKind,
    ScreenShake, difficulty_level,
};

/// Remaining time of each timed effect (0 when inactive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EffectTimers {
    pub slow_motion_ms: f32,
    pub multiplier_ms: f32,
    pub magnet_ms: f32,
    pub combo_ms: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderableState {
    pub phase: MatchPhase,
    pub paused: bool,
    pub score: u64,
    pub lives: u32,
    pub stats: GameStats,
    pub level: u64,
    pub player_x: f32,
    pub items: Vec<FallingItem>,
    pub inventory: Vec<Option<PowerUpKind>>,
    pub timers: EffectTimers,
    pub score_multiplier: u64,
    pub combo_counter: u32,
    pub combo_active: bool,
    pub particles: Vec<Particle>,
    pub floating_texts: Vec<FloatingText>,
    pub screen_shake: ScreenShake,
}

impl RenderableState {
    pub fn capture(state: &GameState, paused: bool) -> Self {
        Self {
            phase: state.phase,
            paused,
            score: state.score,
            lives: state.lives,
            stats: state.stats,
            level: difficulty_level(state.score),
            player_x: state.player.x,
            items: state.items.clone(),
            inventory: state.inventory.slots().to_vec(),
            timers: EffectTimers {
                slow_motion_ms: state.effects.slow_motion.remaining_ms(),
                multiplier_ms: state.effects.multiplier.remaining_ms(),
                magnet_ms: state.effects.magnet.remaining_ms(),
                combo_ms: state.combo.countdown.remaining_ms(),
            },
            score_multiplier: state.effects.score_multiplier,
            combo_counter: state.combo.counter,
            combo_active: state.combo.active,
            particles: state.particles.clone(),
            floating_texts: state.floating_texts.clone(),
            screen_shake: state.screen_shake,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::Over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameConfig, ItemKind};
    use glam::Vec2;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(9, GameConfig::default());
        state.score = 250;
        state.push_item(ItemKind::Golden, Vec2::new(10.0, 20.0), Vec2::ZERO);
        state.inventory.insert(PowerUpKind::Magnet);

        let snap = RenderableState::capture(&state, true);
        assert!(snap.paused);
        assert_eq!(snap.level, 2);
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].kind, ItemKind::Golden);
        assert_eq!(snap.inventory, vec![Some(PowerUpKind::Magnet), None, None]);
        assert_eq!(snap.timers, EffectTimers::default());
        assert!(!snap.is_over());
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(9, GameConfig::default());
        let json = serde_json::to_string(&RenderableState::capture(&state, false)).unwrap();
        assert!(json.contains("\"phase\":\"Ready\""));
    }
}
