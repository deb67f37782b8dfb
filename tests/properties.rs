//! Invariants that hold for any input sequence

use egg_catcher::consts::*;
use egg_catcher::sim::{
    DifficultyCurve, GameConfig, GameEvent, GameState, InputState, ItemKind, MatchPhase,
    PowerUpDelivery, tick,
};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = InputState> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::option::of(0.0f32..PLAYFIELD_WIDTH),
    )
        .prop_map(|(left, right, pointer_x)| InputState {
            left,
            right,
            pointer_x,
        })
}

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(instant, continuous)| GameConfig {
        delivery: if instant {
            PowerUpDelivery::Instant
        } else {
            PowerUpDelivery::Inventory
        },
        difficulty: if continuous {
            DifficultyCurve::Continuous
        } else {
            DifficultyCurve::Stepped
        },
        ..GameConfig::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_tick_invariants(
        seed in any::<u64>(),
        config in config_strategy(),
        frames in prop::collection::vec((input_strategy(), 0.0f32..MAX_FRAME_DT), 1..1500),
    ) {
        let mut state = GameState::new(seed, config);
        state.phase = MatchPhase::Running;
        let mut game_overs = 0;

        for (input, dt) in frames {
            let (score, lives, phase) = (state.score, state.lives, state.phase);
            let events = tick(&mut state, &input, dt);

            prop_assert!(state.score >= score);
            prop_assert!(state.lives + 1 >= lives && state.lives <= lives + 1);
            prop_assert!(state.lives <= MAX_LIVES);
            if state.lives > lives {
                // Only a heart caught below the cap restores a life
                prop_assert!(lives < MAX_LIVES);
                prop_assert!(events
                    .iter()
                    .any(|e| matches!(e, GameEvent::Catch { kind: ItemKind::Heart, .. })),
                    "life gained without a heart catch");
            }
            prop_assert!(state.combo.counter <= COMBO_THRESHOLD);
            prop_assert!(state.player.x >= 0.0 && state.player.x <= PLAYFIELD_WIDTH - PLAYER_WIDTH);
            prop_assert!(state.inventory.slots().len() == INVENTORY_SIZE);

            if phase == MatchPhase::Over {
                prop_assert!(events.is_empty());
                prop_assert_eq!(state.score, score);
                prop_assert_eq!(state.lives, lives);
            }
            game_overs += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
        }

        prop_assert!(game_overs <= 1);
        prop_assert_eq!(game_overs == 1, state.phase == MatchPhase::Over);
    }

    #[test]
    fn prop_items_stay_between_walls(
        seed in any::<u64>(),
        frames in 1usize..900,
    ) {
        let mut state = GameState::new(seed, GameConfig::default());
        state.phase = MatchPhase::Running;
        let input = InputState::default();
        for _ in 0..frames {
            tick(&mut state, &input, 1.0 / 60.0);
            for item in &state.items {
                prop_assert!(item.pos.x >= 0.0);
                prop_assert!(item.pos.x + item.size.x <= PLAYFIELD_WIDTH + 1e-3);
            }
            let ids: Vec<u32> = state.items.iter().map(|i| i.id).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            prop_assert_eq!(ids, sorted);
        }
    }
}
