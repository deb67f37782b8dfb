//! Match driver
//!
//! Owns the `GameState`, turns display timestamps into frame deltas, gates the
//! simulation while paused and hands the final report to a game-over handler.

use crate::clock::FrameClock;
use crate::sim::{self, GameConfig, GameEvent, GameState, InputState, MatchPhase};
use crate::snapshot::RenderableState;

pub use crate::sim::MatchReport;

/// Receives the report of a finished match, exactly once per match
pub trait GameOverHandler {
    fn on_game_over(&mut self, report: &MatchReport);
}

impl<F> GameOverHandler for F
where
    F: FnMut(&MatchReport),
{
    fn on_game_over(&mut self, report: &MatchReport) {
        self(report)
    }
}

/// Result of one `Engine::tick`
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub events: Vec<GameEvent>,
    pub snapshot: RenderableState,
}

/// Runs matches back to back with one config
pub struct Engine {
    config: GameConfig,
    state: GameState,
    clock: FrameClock,
    input: InputState,
    paused: bool,
    /// Events raised between ticks, delivered with the next tick
    pending: Vec<GameEvent>,
    game_over: Option<Box<dyn GameOverHandler>>,
    /// Seed for the next `start`
    next_seed: u64,
}

impl Engine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            state: GameState::new(seed, config.clone()),
            config,
            clock: FrameClock::new(),
            input: InputState::default(),
            paused: false,
            pending: Vec::new(),
            game_over: None,
            next_seed: seed,
        }
    }

    pub fn with_game_over_handler(mut self, handler: impl GameOverHandler + 'static) -> Self {
        self.set_game_over_handler(handler);
        self
    }

    pub fn set_game_over_handler(&mut self, handler: impl GameOverHandler + 'static) {
        self.game_over = Some(Box::new(handler));
    }

    /// Config used from the next `start` on
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset everything and begin a new running match
    pub fn start(&mut self) {
        let seed = self.next_seed;
        self.next_seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.start_with_seed(seed);
    }

    pub fn start_with_seed(&mut self, seed: u64) {
        self.state = GameState::new(seed, self.config.clone());
        self.state.phase = MatchPhase::Running;
        self.clock.reset();
        self.input = InputState::default();
        self.paused = false;
        self.pending.clear();
        log::info!(
            "Match started with seed {} ({:?}, {:?})",
            seed,
            self.config.delivery,
            self.config.difficulty
        );
    }

    /// Stop advancing the simulation; ticks still produce snapshots
    pub fn pause(&mut self) {
        if self.state.is_running() && !self.paused {
            self.paused = true;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace the input read by the next tick
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Use the power-up stored in `slot`. Ignored while paused.
    pub fn activate_power_up(&mut self, slot: usize) {
        if self.paused {
            return;
        }
        if let Some(event) = sim::activate_slot(&mut self.state, slot) {
            self.pending.push(event);
        }
    }

    /// Advance one display frame stamped `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> TickOutput {
        let dt = self.clock.advance(now_ms);
        let mut events = std::mem::take(&mut self.pending);

        if !self.paused {
            let stepped = sim::tick(&mut self.state, &self.input, dt);
            for event in &stepped {
                if let GameEvent::GameOver { report } = event {
                    if let Some(handler) = self.game_over.as_mut() {
                        handler.on_game_over(report);
                    }
                }
            }
            events.extend(stepped);
        }

        TickOutput {
            events,
            snapshot: self.snapshot(),
        }
    }

    pub fn snapshot(&self) -> RenderableState {
        RenderableState::capture(&self.state, self.paused)
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
