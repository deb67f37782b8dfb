//! Cosmetic entities: particle bursts, floating score text and screen shake
//!
//! Nothing here affects gameplay. Randomness comes from the state's effect RNG.

use glam::Vec2;
use rand::Rng;

use super::item::ItemKind;
use super::state::{FloatingText, GameState, MAX_PARTICLES, Particle, ScreenShake};

/// Floating text rise speed (pixels/s, negative is up)
const TEXT_RISE_SPEED: f32 = -50.0;

/// Burst of particles around `pos`
pub fn spawn_particles(state: &mut GameState, pos: Vec2, kind: ItemKind, count: usize) {
    for _ in 0..count {
        if state.particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = state.fx_rng.random::<f32>() * std::f32::consts::TAU;
        let speed = state.fx_rng.random::<f32>() * 3.0 + 1.0;
        let radius = state.fx_rng.random::<f32>() * 3.0 + 2.0;
        let life = state.fx_rng.random::<f32>() * 0.5 + 0.5;
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            kind,
            life,
            radius,
        });
    }
}

pub fn add_floating_text(state: &mut GameState, text: String, pos: Vec2) {
    state.floating_texts.push(FloatingText {
        text,
        pos,
        vel_y: TEXT_RISE_SPEED,
        life: 1.0,
    });
}

/// Replace the current shake (latest impact wins)
pub fn trigger_screen_shake(state: &mut GameState, magnitude: f32, duration_ms: f32) {
    state.screen_shake = ScreenShake {
        magnitude,
        remaining_ms: duration_ms,
    };
}

/// Age particles, texts and shake by real elapsed seconds
pub fn update_effects(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= dt;
    }
    // Remove dead particles
    state.particles.retain(|p| p.life > 0.0);

    for text in state.floating_texts.iter_mut() {
        text.pos.y += text.vel_y * dt;
        text.life -= dt;
    }
    state.floating_texts.retain(|t| t.life > 0.0);

    if state.screen_shake.remaining_ms > 0.0 {
        state.screen_shake.remaining_ms -= dt * 1000.0;
        if state.screen_shake.remaining_ms <= 0.0 {
            state.screen_shake = ScreenShake::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::GameConfig;

    #[test]
    fn test_particles_expire() {
        let mut state = GameState::new(3, GameConfig::default());
        spawn_particles(&mut state, Vec2::new(100.0, 100.0), ItemKind::Golden, 12);
        assert_eq!(state.particles.len(), 12);
        update_effects(&mut state, 1.01);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(3, GameConfig::default());
        spawn_particles(&mut state, Vec2::ZERO, ItemKind::Normal, MAX_PARTICLES + 50);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_floating_text_rises_and_fades() {
        let mut state = GameState::new(3, GameConfig::default());
        add_floating_text(&mut state, "+5".into(), Vec2::new(10.0, 200.0));
        update_effects(&mut state, 0.5);
        assert_eq!(state.floating_texts.len(), 1);
        assert!(state.floating_texts[0].pos.y < 200.0);
        update_effects(&mut state, 0.6);
        assert!(state.floating_texts.is_empty());
    }

    #[test]
    fn test_screen_shake_clears() {
        let mut state = GameState::new(3, GameConfig::default());
        trigger_screen_shake(&mut state, 20.0, 500.0);
        update_effects(&mut state, 0.3);
        assert_eq!(state.screen_shake.magnitude, 20.0);
        update_effects(&mut state, 0.3);
        assert_eq!(state.screen_shake.magnitude, 0.0);
    }
}
