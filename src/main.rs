//! Egg Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop. In the
//! browser the loop feeds DOM input into the engine and hands each snapshot to
//! a JavaScript renderer; natively it plays one headless autopilot match.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent, MouseEvent, TouchEvent};

    use egg_catcher::audio::{AudioManager, SoundEffect};
    use egg_catcher::consts::*;
    use egg_catcher::persistence::{
        KeyValueStore, LocalStorage, MatchRecorder, PlayerProfile, ProfileStore, ShopItemId,
    };
    use egg_catcher::sim::{GameConfig, InputState, MatchPhase, PowerUpDelivery};
    use egg_catcher::{Engine, Leaderboard, RenderableState, Settings};

    const PLAYER_NAME_KEY: &str = "egg_catcher_player";

    // Drawing is done by the page; it receives one JSON snapshot per frame
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (typeof window.renderEggCatcher === 'function') {
                window.renderEggCatcher(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
    }

    // Skin and accessories for the basket sprite
    #[wasm_bindgen(inline_js = "
        export function set_cosmetics(skin, accessories) {
            window.eggCatcherCosmetics = { skin, accessories: JSON.parse(accessories) };
        }
    ")]
    extern "C" {
        fn set_cosmetics(skin: &str, accessories: &str);
    }

    struct Game {
        engine: Engine,
        audio: AudioManager,
        settings: Settings,
        input: InputState,
        last_phase: MatchPhase,
        is_admin: bool,
    }

    impl Game {
        fn new(engine: Engine, settings: Settings, is_admin: bool) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);
            Self {
                engine,
                audio,
                settings,
                input: InputState::default(),
                last_phase: MatchPhase::Ready,
                is_admin,
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.audio.set_muted(muted);
            if let Err(e) = self.settings.save(&mut LocalStorage) {
                log::warn!("Could not save settings: {}", e);
            }
        }

        /// Admin only: switch power-up delivery for the next match
        fn toggle_delivery(&mut self) {
            if !self.is_admin {
                return;
            }
            let mut config = self.engine.config().clone();
            config.delivery = match config.delivery {
                PowerUpDelivery::Instant => PowerUpDelivery::Inventory,
                PowerUpDelivery::Inventory => PowerUpDelivery::Instant,
            };
            log::info!("Next match uses {:?} power-ups", config.delivery);
            self.engine.set_config(config);
        }

        fn frame(&mut self, time: f64) {
            self.engine.set_input(self.input.clone());
            let out = self.engine.tick(time);

            for event in &out.events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }

            let mut snapshot = out.snapshot;
            if !self.settings.effective_screen_shake() {
                snapshot.screen_shake = Default::default();
            }
            if !self.settings.particles {
                snapshot.particles.clear();
            }
            match serde_json::to_string(&snapshot) {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Snapshot encode failed: {}", e),
            }

            self.update_hud(&snapshot);
            self.last_phase = snapshot.phase;
        }

        fn start(&mut self) {
            self.audio.resume();
            self.engine.start();
            set_hidden("game-over", true);
            set_hidden("start-prompt", true);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, snap: &RenderableState) {
            let Some(document) = document() else { return };

            set_value(&document, "#hud-score .hud-value", &snap.score.to_string());
            set_value(&document, "#hud-lives .hud-value", &snap.lives.to_string());
            set_value(&document, "#hud-level .hud-value", &(snap.level + 1).to_string());

            if let Some(el) = document.get_element_by_id("hud-combo") {
                if snap.combo_active {
                    let _ = el.set_attribute("class", "hud-item");
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            for (i, slot) in snap.inventory.iter().enumerate() {
                let label = slot.map(|k| format!("{:?}", k)).unwrap_or_default();
                set_value(&document, &format!("#slot-{} .slot-label", i + 1), &label);
            }

            set_hidden("pause-menu", !snap.paused);

            if snap.phase == MatchPhase::Over && self.last_phase != MatchPhase::Over {
                set_hidden("game-over", false);
                set_value(&document, "#final-score", &snap.score.to_string());
                set_value(&document, "#final-golden", &snap.stats.golden_caught.to_string());
                set_value(&document, "#final-bombs", &snap.stats.bombs_hit.to_string());
                show_leaderboard(&document);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_value(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    fn apply_cosmetics(profile: &PlayerProfile) {
        let skin = ShopItemId::Skin(profile.equipped_skin).as_str();
        match serde_json::to_string(&profile.equipped_accessories) {
            Ok(accessories) => set_cosmetics(skin, &accessories),
            Err(e) => log::warn!("Cosmetics encode failed: {}", e),
        }
    }

    fn show_leaderboard(document: &Document) {
        let board = Leaderboard::load(&LocalStorage);
        let Some(list) = document.get_element_by_id("leaderboard") else {
            return;
        };
        list.set_inner_html("");
        for (i, entry) in board.entries.iter().enumerate() {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(&format!("{}. {} - {}", i + 1, entry.name, entry.score)));
                let _ = list.append_child(&item);
            }
        }
    }

    /// Canvas-relative x converted to playfield units
    fn playfield_x(canvas: &Element, client_x: f64) -> f32 {
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 {
            return 0.0;
        }
        ((client_x - rect.left()) / rect.width()) as f32 * PLAYFIELD_WIDTH
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Egg Catcher starting...");

        let Some(document) = document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document.get_element_by_id("canvas") else {
            log::error!("No #canvas element");
            return;
        };

        let settings = Settings::load(&LocalStorage);
        let player = LocalStorage
            .get(PLAYER_NAME_KEY)
            .unwrap_or_else(|| "player".to_string());

        let mut profiles = ProfileStore::new(LocalStorage);
        let (config, is_admin) = match profiles.login_or_register(&player) {
            Ok(profile) => {
                apply_cosmetics(&profile);
                if profile.is_admin {
                    (GameConfig::admin(), true)
                } else {
                    (GameConfig::default(), false)
                }
            }
            Err(e) => {
                log::warn!("Profile unavailable: {}", e);
                (GameConfig::default(), false)
            }
        };

        let seed = js_sys::Date::now() as u64;
        let engine =
            Engine::new(config, seed).with_game_over_handler(MatchRecorder::new(profiles, player));
        let game = Rc::new(RefCell::new(Game::new(engine, settings, is_admin)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());
        set_hidden("loading", true);
        set_hidden("hud", false);

        request_animation_frame(game);

        log::info!("Egg Catcher running!");
    }

    fn setup_input_handlers(canvas: &Element, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Mouse follows the pointer
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let x = playfield_x(&canvas_clone, event.client_x() as f64);
                game.borrow_mut().input.pointer_x = Some(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let x = playfield_x(&canvas_clone, touch.client_x() as f64);
                    game.borrow_mut().input.pointer_x = Some(x);
                }
            });
            for name in ["touchstart", "touchmove"] {
                let _ = canvas
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Tap or click starts a match when none is running
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.engine.phase() != MatchPhase::Running {
                    g.start();
                }
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        g.input.left = true;
                        g.input.pointer_x = None;
                    }
                    "ArrowRight" | "d" | "D" => {
                        g.input.right = true;
                        g.input.pointer_x = None;
                    }
                    "p" | "P" | "Escape" => g.engine.toggle_pause(),
                    "m" | "M" => g.toggle_mute(),
                    "i" | "I" => g.toggle_delivery(),
                    "1" => g.engine.activate_power_up(0),
                    "2" => g.engine.activate_power_up(1),
                    "3" => g.engine.activate_power_up(2),
                    "Enter" | " " => {
                        if g.engine.phase() != MatchPhase::Running {
                            g.start();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().engine.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.engine.phase() == MatchPhase::Running {
                    g.engine.pause();
                    g.input = InputState::default();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Egg Catcher (native) starting...");
    log::info!("Native mode runs a headless autopilot match - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    autoplay(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one match steering toward the lowest catchable item
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use egg_catcher::persistence::{MatchRecorder, MemoryStore, ProfileStore, SHOP_ITEMS};
    use egg_catcher::sim::{GameConfig, InputState, MatchPhase};
    use egg_catcher::{Engine, MatchReport};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    let mut profiles = ProfileStore::new(MemoryStore::new());
    if let Err(e) = profiles.login_or_register("autopilot") {
        log::warn!("Could not register autopilot: {}", e);
    }
    let mut recorder = MatchRecorder::new(profiles, "autopilot");

    let finished: Rc<RefCell<Option<MatchReport>>> = Rc::new(RefCell::new(None));
    let sink = finished.clone();
    let mut engine = Engine::new(GameConfig::default(), seed)
        .with_game_over_handler(move |report: &MatchReport| *sink.borrow_mut() = Some(report.clone()));
    engine.start();

    let mut now = 0.0;
    for _ in 0..MAX_FRAMES {
        let state = engine.state();
        let target = state
            .items
            .iter()
            .filter(|i| !i.kind.is_hazard())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|i| i.center().x);
        engine.set_input(InputState {
            pointer_x: target,
            ..Default::default()
        });

        for slot in 0..egg_catcher::consts::INVENTORY_SIZE {
            engine.activate_power_up(slot);
        }

        engine.tick(now);
        now += FRAME_MS;
        if engine.phase() == MatchPhase::Over {
            break;
        }
    }

    let report = finished.borrow().clone();
    match report {
        Some(report) => {
            use egg_catcher::GameOverHandler;
            recorder.on_game_over(&report);
            println!("Final score: {}", report.score);
            println!("Stats: {:?}", report.stats);
        }
        None => println!(
            "Autopilot survived {} frames with score {}",
            MAX_FRAMES,
            engine.state().score
        ),
    }

    for (i, entry) in recorder.profiles().leaderboard().entries.iter().enumerate() {
        println!("{}. {} - {}", i + 1, entry.name, entry.score);
    }

    // Spend the winnings on whatever the autopilot can afford
    let mut profiles = recorder.into_profiles();
    for item in &SHOP_ITEMS {
        match profiles.purchase_item("autopilot", item.id) {
            Ok(profile) => {
                if let Err(e) = profiles.equip_item("autopilot", item.id) {
                    log::debug!("Could not equip {}: {}", item.name, e);
                }
                println!("Owns {} ({} coins left)", item.name, profile.coins);
            }
            Err(e) => log::info!("Skipped {}: {}", item.name, e),
        }
    }
}
