//! Sound effects
//!
//! Every cue is a short list of synthesized tones, so no audio files are
//! needed. Mapping events to cues works everywhere; playback uses the Web
//! Audio API and exists only on wasm32.

use crate::sim::{GameEvent, ItemKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Catch,
    GoldenCatch,
    RottenCatch,
    Bomb,
    HeartCatch,
    ClockCatch,
    StarCatch,
    MagnetCatch,
    /// Point item fell out
    Miss,
    /// Power-up used from the inventory
    PowerUp,
    ComboStart,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Exponential glide target, reached at 90% of the duration
    pub end_freq: Option<f32>,
    pub wave: Waveform,
    /// Seconds
    pub duration: f64,
    /// Seconds after the cue starts
    pub delay: f64,
    pub volume: f32,
}

const fn tone(freq: f32, wave: Waveform, duration: f64, volume: f32) -> Tone {
    Tone {
        freq,
        end_freq: None,
        wave,
        duration,
        delay: 0.0,
        volume,
    }
}

const fn glide(freq: f32, end: f32, wave: Waveform, duration: f64, volume: f32) -> Tone {
    Tone {
        end_freq: Some(end),
        ..tone(freq, wave, duration, volume)
    }
}

const fn later(t: Tone, delay: f64) -> Tone {
    Tone { delay, ..t }
}

use Waveform::*;

const CATCH: &[Tone] = &[tone(850.0, Sine, 0.1, 0.2)];
const GOLDEN: &[Tone] = &[
    tone(1000.0, Triangle, 0.1, 0.3),
    later(tone(1500.0, Triangle, 0.15, 0.3), 0.06),
];
const ROTTEN: &[Tone] = &[
    tone(300.0, Sawtooth, 0.2, 0.25),
    tone(335.0, Sawtooth, 0.2, 0.25),
];
const BOMB: &[Tone] = &[
    glide(160.0, 40.0, Square, 0.5, 0.4),
    glide(90.0, 30.0, Sawtooth, 0.5, 0.3),
];
const HEART: &[Tone] = &[
    tone(900.0, Sine, 0.2, 0.3),
    later(tone(1200.0, Sine, 0.2, 0.3), 0.08),
];
const CLOCK: &[Tone] = &[
    tone(2000.0, Triangle, 0.08, 0.25),
    later(tone(2000.0, Triangle, 0.08, 0.25), 0.1),
];
const STAR: &[Tone] = &[
    tone(1200.0, Sine, 0.1, 0.3),
    later(tone(1600.0, Sine, 0.1, 0.3), 0.08),
    later(tone(2000.0, Sine, 0.15, 0.3), 0.16),
];
const MAGNET: &[Tone] = &[glide(400.0, 800.0, Sawtooth, 0.2, 0.3)];
const MISS: &[Tone] = &[glide(250.0, 100.0, Sawtooth, 0.25, 0.3)];
const POWER_UP: &[Tone] = &[
    glide(1000.0, 2000.0, Sawtooth, 0.3, 0.3),
    glide(1200.0, 2200.0, Sawtooth, 0.3, 0.3),
];
const COMBO: &[Tone] = &[
    tone(600.0, Triangle, 0.12, 0.25),
    later(tone(800.0, Triangle, 0.12, 0.25), 0.08),
    later(tone(1000.0, Triangle, 0.2, 0.25), 0.16),
];
const GAME_OVER: &[Tone] = &[
    tone(400.0, Sine, 0.3, 0.3),
    later(tone(350.0, Sine, 0.3, 0.3), 0.2),
    later(tone(300.0, Sine, 0.3, 0.3), 0.4),
    later(tone(200.0, Sine, 0.4, 0.3), 0.6),
];

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Catch { kind, .. } => Some(match kind {
                ItemKind::Normal => SoundEffect::Catch,
                ItemKind::Golden => SoundEffect::GoldenCatch,
                ItemKind::Rotten => SoundEffect::RottenCatch,
                ItemKind::Bomb => SoundEffect::Bomb,
                ItemKind::Heart => SoundEffect::HeartCatch,
                ItemKind::Clock => SoundEffect::ClockCatch,
                ItemKind::Star => SoundEffect::StarCatch,
                ItemKind::Magnet => SoundEffect::MagnetCatch,
            }),
            GameEvent::Miss { .. } => Some(SoundEffect::Miss),
            // Stored power-ups already played their catch cue
            GameEvent::PowerUpActivated { .. } => Some(SoundEffect::PowerUp),
            GameEvent::ComboStarted => Some(SoundEffect::ComboStart),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::ScoreAdded { .. }
            | GameEvent::PowerUpStored { .. }
            | GameEvent::PowerUpExpired { .. }
            | GameEvent::ComboBroken => None,
        }
    }

    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Catch => CATCH,
            SoundEffect::GoldenCatch => GOLDEN,
            SoundEffect::RottenCatch => ROTTEN,
            SoundEffect::Bomb => BOMB,
            SoundEffect::HeartCatch => HEART,
            SoundEffect::ClockCatch => CLOCK,
            SoundEffect::StarCatch => STAR,
            SoundEffect::MagnetCatch => MAGNET,
            SoundEffect::Miss => MISS,
            SoundEffect::PowerUp => POWER_UP,
            SoundEffect::ComboStart => COMBO,
            SoundEffect::GameOver => GAME_OVER,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};

    impl From<Waveform> for OscillatorType {
        fn from(wave: Waveform) -> Self {
            match wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Web Audio playback
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                self.play_tone(ctx, tone, vol);
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short attack, exponential decay, optional pitch glide
        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.wave.into()) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(tone.volume * vol, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.00001, t + tone.duration)
                .ok();

            osc.frequency().set_value_at_time(tone.freq, t).ok();
            if let Some(end) = tone.end_freq {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end, t + tone.duration * 0.9)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameStats, MatchReport, PowerUpKind};
    use glam::Vec2;

    #[test]
    fn test_every_catch_has_a_cue() {
        for kind in ItemKind::ALL {
            let event = GameEvent::Catch {
                kind,
                pos: Vec2::ZERO,
            };
            assert!(SoundEffect::for_event(&event).is_some(), "{:?}", kind);
        }
    }

    #[test]
    fn test_silent_events() {
        assert_eq!(SoundEffect::for_event(&GameEvent::ComboBroken), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ScoreAdded {
                amount: 1,
                pos: Vec2::ZERO
            }),
            None
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpExpired {
                kind: PowerUpKind::Magnet
            }),
            None
        );
    }

    #[test]
    fn test_game_over_cue() {
        let event = GameEvent::GameOver {
            report: MatchReport {
                score: 3,
                stats: GameStats::default(),
            },
        };
        assert_eq!(SoundEffect::for_event(&event), Some(SoundEffect::GameOver));
    }

    #[test]
    fn test_tones_are_audible() {
        let all = [
            SoundEffect::Catch,
            SoundEffect::GoldenCatch,
            SoundEffect::RottenCatch,
            SoundEffect::Bomb,
            SoundEffect::HeartCatch,
            SoundEffect::ClockCatch,
            SoundEffect::StarCatch,
            SoundEffect::MagnetCatch,
            SoundEffect::Miss,
            SoundEffect::PowerUp,
            SoundEffect::ComboStart,
            SoundEffect::GameOver,
        ];
        for effect in all {
            let tones = effect.tones();
            assert!(!tones.is_empty());
            for t in tones {
                assert!(t.freq > 0.0 && t.duration > 0.0 && t.volume > 0.0);
            }
        }
    }
}
