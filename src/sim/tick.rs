//! Per-frame simulation step
//!
//! Core game loop: moves the player, spawns and integrates items, resolves
//! catches and misses, ages power-up timers and reports what happened as a
//! list of events.

use super::collision::{Outcome, basket_rect, bounce_off_walls, classify};
use super::config::PowerUpDelivery;
use super::difficulty::difficulty_for;
use super::effects::{add_floating_text, spawn_particles, trigger_screen_shake, update_effects};
use super::event::{GameEvent, MatchReport};
use super::item::{FallingItem, ItemKind, PowerUpKind};
use super::spawner::update_spawner;
use super::state::{GameState, MatchPhase, Player};
use crate::consts::*;
use crate::{basket_center, clamp_player_x};

/// Player intent for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Absolute pointer/touch x; overrides the keys when present
    pub pointer_x: Option<f32>,
}

/// Life changes already applied this tick (at most one of each)
#[derive(Debug, Default)]
struct LifeLedger {
    lost: bool,
    gained: bool,
}

/// Advance the match by one frame of `dt` real seconds.
///
/// Does nothing unless the match is running. Returns the events produced.
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != MatchPhase::Running {
        return events;
    }

    let dt = dt.max(0.0);
    // Slow motion is sampled before timers age so its last frame is still slowed
    let logic_dt = dt * state.effects.time_scale();
    state.time_ticks += 1;

    move_player(&mut state.player, input, dt);

    let difficulty = difficulty_for(state.score, state.config.difficulty);
    update_spawner(state, logic_dt, difficulty.spawn_interval);

    // Timers run on real time so slow motion does not stretch itself
    let elapsed_ms = dt * 1000.0;
    for kind in state.effects.advance(elapsed_ms) {
        log::debug!("{:?} expired", kind);
        events.push(GameEvent::PowerUpExpired { kind });
    }
    if state.combo.advance(elapsed_ms) {
        events.push(GameEvent::ComboBroken);
    }

    integrate_items(state, difficulty.fall_speed, dt, logic_dt);
    resolve_collisions(state, &mut events);
    update_effects(state, dt);

    if state.lives == 0 {
        state.phase = MatchPhase::Over;
        let report = MatchReport {
            score: state.score,
            stats: state.stats,
        };
        log::info!(
            "Match over: score {} after {} ticks ({:?})",
            report.score,
            state.time_ticks,
            report.stats
        );
        events.push(GameEvent::GameOver { report });
    }

    state.normalize_order();
    events
}

/// Keys move at constant speed; a pointer pulls the sprite centre toward it
fn move_player(player: &mut Player, input: &InputState, dt: f32) {
    if let Some(pointer_x) = input.pointer_x {
        player.x += (pointer_x - PLAYER_WIDTH / 2.0 - player.x) * POINTER_SMOOTHING;
    } else {
        if input.left {
            player.x -= PLAYER_SPEED * dt;
        }
        if input.right {
            player.x += PLAYER_SPEED * dt;
        }
    }
    player.x = clamp_player_x(player.x);
}

/// Global fall speed, optional magnet pull, then position update
fn integrate_items(state: &mut GameState, fall_speed: f32, dt: f32, logic_dt: f32) {
    let magnet = state.effects.magnet_active();
    let target = basket_center(state.player.x);

    for item in state.items.iter_mut() {
        item.vel.y = fall_speed;

        if magnet && item.kind.is_magnetic() {
            let to_basket = target - item.center();
            let dist = to_basket.length();
            if dist > MAGNET_MIN_DISTANCE {
                item.vel += to_basket / dist * MAGNET_ATTRACTION_FORCE * dt;
            }
        }

        item.pos += item.vel * logic_dt;
        bounce_off_walls(item);
    }
}

/// Classify every item first, then resolve; each item resolves at most once
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let basket = basket_rect(state.player.x);

    let mut resolved: Vec<(FallingItem, Outcome)> = Vec::new();
    let mut remaining = Vec::with_capacity(state.items.len());
    for item in std::mem::take(&mut state.items) {
        match classify(&item, &basket) {
            Some(outcome) => resolved.push((item, outcome)),
            None => remaining.push(item),
        }
    }
    state.items = remaining;

    let mut ledger = LifeLedger::default();
    for (item, outcome) in resolved {
        match outcome {
            Outcome::Caught => resolve_catch(state, &item, &mut ledger, events),
            Outcome::Missed => resolve_miss(state, &item, &mut ledger, events),
        }
        // The match ends the instant lives run out
        if state.lives == 0 {
            break;
        }
    }
}

fn resolve_catch(
    state: &mut GameState,
    item: &FallingItem,
    ledger: &mut LifeLedger,
    events: &mut Vec<GameEvent>,
) {
    let pos = item.pos;
    let kind = item.kind;

    match kind {
        ItemKind::Normal => {
            events.push(GameEvent::Catch { kind, pos });
            award_points(state, item, events);
        }
        ItemKind::Golden => {
            state.stats.golden_caught += 1;
            events.push(GameEvent::Catch { kind, pos });
            award_points(state, item, events);
            spawn_particles(state, item.center(), kind, 10);
        }
        ItemKind::Rotten => {
            state.stats.rotten_hit += 1;
            take_hit(state, ledger);
            events.push(GameEvent::Catch { kind, pos });
            break_combo(state, events);
            trigger_screen_shake(state, 8.0, 200.0);
            spawn_particles(state, item.center(), kind, 8);
        }
        ItemKind::Bomb => {
            state.stats.bombs_hit += 1;
            take_hit(state, ledger);
            events.push(GameEvent::Catch { kind, pos });
            break_combo(state, events);
            trigger_screen_shake(state, 20.0, 500.0);
            spawn_particles(state, item.center(), kind, 20);
        }
        ItemKind::Heart => {
            if !ledger.gained && state.gain_life() {
                ledger.gained = true;
            }
            events.push(GameEvent::Catch { kind, pos });
            break_combo(state, events);
            spawn_particles(state, item.center(), kind, 10);
        }
        ItemKind::Clock => deliver_power_up(state, item, PowerUpKind::SlowMotion, events),
        ItemKind::Star => deliver_power_up(state, item, PowerUpKind::ScoreMultiplier, events),
        ItemKind::Magnet => deliver_power_up(state, item, PowerUpKind::Magnet, events),
    }
    log::debug!("Caught {:?} #{} (score {}, lives {})", kind, item.id, state.score, state.lives);
}

/// Only point-awarding items are penalised when they fall out
fn resolve_miss(
    state: &mut GameState,
    item: &FallingItem,
    ledger: &mut LifeLedger,
    events: &mut Vec<GameEvent>,
) {
    if !item.kind.awards_points() {
        return;
    }
    take_hit(state, ledger);
    events.push(GameEvent::Miss {
        kind: item.kind,
        pos: item.pos,
    });
    break_combo(state, events);
    log::debug!("Missed {:?} #{} (lives {})", item.kind, item.id, state.lives);
}

/// At most one life is lost per tick
fn take_hit(state: &mut GameState, ledger: &mut LifeLedger) {
    if !ledger.lost {
        state.lose_life();
        ledger.lost = true;
    }
}

fn break_combo(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.combo.reset() {
        events.push(GameEvent::ComboBroken);
    }
}

/// base × combo × multiplier
fn award_points(state: &mut GameState, item: &FallingItem, events: &mut Vec<GameEvent>) {
    if state.combo.register_catch() {
        events.push(GameEvent::ComboStarted);
    }
    let amount =
        item.kind.base_points() * state.combo.multiplier() * state.effects.score_multiplier;
    state.score += amount;
    events.push(GameEvent::ScoreAdded {
        amount,
        pos: item.pos,
    });
    add_floating_text(state, format!("+{}", amount), item.pos);
}

fn bump_power_up_stat(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::ScoreMultiplier => state.stats.stars_caught += 1,
        PowerUpKind::Magnet => state.stats.magnets_caught += 1,
        PowerUpKind::SlowMotion => {}
    }
}

/// Activate now or stash in the inventory. A full inventory absorbs the item.
///
/// Either way the catch scores nothing, so any streak ends here.
fn deliver_power_up(
    state: &mut GameState,
    item: &FallingItem,
    power: PowerUpKind,
    events: &mut Vec<GameEvent>,
) {
    break_combo(state, events);
    match state.config.delivery {
        PowerUpDelivery::Instant => {
            state.effects.activate(power);
            bump_power_up_stat(state, power);
            events.push(GameEvent::Catch {
                kind: item.kind,
                pos: item.pos,
            });
            events.push(GameEvent::PowerUpActivated { kind: power });
        }
        PowerUpDelivery::Inventory => match state.inventory.insert(power) {
            Some(slot) => {
                bump_power_up_stat(state, power);
                events.push(GameEvent::Catch {
                    kind: item.kind,
                    pos: item.pos,
                });
                events.push(GameEvent::PowerUpStored { kind: power, slot });
            }
            None => {
                log::debug!("Inventory full, {:?} #{} absorbed", item.kind, item.id);
                return;
            }
        },
    }
    spawn_particles(state, item.center(), item.kind, 12);
}

/// Use the power-up in `slot`. Empty or out-of-range slots are ignored.
pub fn activate_slot(state: &mut GameState, slot: usize) -> Option<GameEvent> {
    if state.phase != MatchPhase::Running {
        return None;
    }
    let kind = state.inventory.take(slot)?;
    state.effects.activate(kind);
    log::debug!("Activated {:?} from slot {}", kind, slot);
    Some(GameEvent::PowerUpActivated { kind })
}
