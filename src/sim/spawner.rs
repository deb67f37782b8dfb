//! Item spawning
//!
//! A single uniform roll is walked through contiguous probability bands; the
//! last (most likely) kind is the fallback.

use glam::Vec2;
use rand::Rng;

use super::config::PowerUpDelivery;
use super::item::ItemKind;
use super::state::GameState;
use crate::consts::*;

/// Band widths per kind, rarest first. `Normal` takes the remainder.
type SpawnTable = &'static [(ItemKind, f32)];

const INVENTORY_TABLE: SpawnTable = &[
    (ItemKind::Heart, 0.02),
    (ItemKind::Clock, 0.03),
    (ItemKind::Star, 0.03),
    (ItemKind::Magnet, 0.03),
    (ItemKind::Bomb, 0.07),
    (ItemKind::Golden, 0.10),
    (ItemKind::Rotten, 0.17),
];

/// Instant delivery never drops magnets
const INSTANT_TABLE: SpawnTable = &[
    (ItemKind::Heart, 0.02),
    (ItemKind::Clock, 0.03),
    (ItemKind::Star, 0.04),
    (ItemKind::Bomb, 0.06),
    (ItemKind::Golden, 0.10),
    (ItemKind::Rotten, 0.15),
];

fn spawn_table(delivery: PowerUpDelivery) -> SpawnTable {
    match delivery {
        PowerUpDelivery::Inventory => INVENTORY_TABLE,
        PowerUpDelivery::Instant => INSTANT_TABLE,
    }
}

/// Map a roll in [0, 1) to an item kind
pub fn choose_kind(roll: f32, delivery: PowerUpDelivery) -> ItemKind {
    let mut upper = 0.0;
    for &(kind, weight) in spawn_table(delivery) {
        upper += weight;
        if roll < upper {
            return kind;
        }
    }
    ItemKind::Normal
}

/// Accumulate logic time and spawn one item once the interval is exceeded.
///
/// The timer restarts from zero on spawn; time past the interval is dropped.
/// Returns the new item's id when one was spawned.
pub fn update_spawner(state: &mut GameState, logic_dt: f32, spawn_interval: f32) -> Option<u32> {
    state.spawn_timer += logic_dt;
    if state.spawn_timer > spawn_interval {
        state.spawn_timer = 0.0;
        return Some(spawn_item(state));
    }
    None
}

/// Append one randomly chosen item just above the visible area
pub fn spawn_item(state: &mut GameState) -> u32 {
    let roll: f32 = state.rng.random();
    let kind = choose_kind(roll, state.config.delivery);
    let size = kind.size();

    let x = state.rng.random::<f32>() * (PLAYFIELD_WIDTH - size.x);
    let drift = (state.rng.random::<f32>() - 0.5) * 2.0 * MAX_DRIFT;

    let id = state.push_item(kind, Vec2::new(x, -size.y), Vec2::new(drift, 0.0));
    log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
    id
}
