//! Parachute Pilot entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use parachute_pilot::audio::AudioManager;
    use parachute_pilot::input::{FrameInput, HeldKeys, Key};
    use parachute_pilot::renderer::{CanvasRenderer, Renderer};
    use parachute_pilot::{SceneController, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        controller: SceneController,
        renderer: CanvasRenderer,
        audio: AudioManager,
        held: HeldKeys,
        /// Discrete presses since the last frame
        pressed: Vec<Key>,
        last_time: f64,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let dt_ms = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            let input = FrameInput {
                held: self.held,
                pressed: std::mem::take(&mut self.pressed),
                dt_ms,
            };
            self.controller.frame(&input);

            self.audio.apply_settings(self.controller.settings());
            self.controller.drain_sounds(&mut self.audio);
            self.renderer.render(&self.controller.snapshot());
        }

        fn key_down(&mut self, key: Key, repeat: bool) {
            self.held.set(key, true);
            if !repeat {
                self.pressed.push(key);
            }
            // Browsers only start audio after a gesture
            self.audio.resume();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Parachute Pilot starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::from_json_or_default(canvas.get_attribute("data-tuning").as_deref());
        let mut settings =
            Settings::from_json_or_default(canvas.get_attribute("data-settings").as_deref());
        if prefers_reduced_motion(&window) {
            settings.reduced_motion = true;
        }
        let renderer = CanvasRenderer::new(&canvas).expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            controller: SceneController::new(seed, tuning, settings),
            renderer,
            audio: AudioManager::new(),
            held: HeldKeys::default(),
            pressed: Vec::new(),
            last_time: 0.0,
        }));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Parachute Pilot running!");
    }

    fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
        window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                // Arrows and space would scroll the page
                event.prevent_default();
                game.borrow_mut().key_down(key, event.repeat());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().held.set(key, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur drops held keys, otherwise keyup is never seen
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().held = HeldKeys::default();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
    use parachute_pilot::autopilot::run_session;
    use parachute_pilot::renderer::DrawListRenderer;
    use parachute_pilot::{SceneController, Settings, Tuning};

    env_logger::init();
    log::info!("Parachute Pilot (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` to play");

    let tuning = Tuning::from_json_or_default(std::env::var("PARACHUTE_TUNING").ok().as_deref());
    let seed = env_number("PARACHUTE_SEED", 42);
    let frames = env_number("PARACHUTE_TICKS", 3600);
    log::info!("Seed: {}, frames: {}", seed, frames);

    let settings = Settings {
        music_enabled: false,
        ..Settings::default()
    };
    let mut controller = SceneController::new(seed, tuning, settings);
    let mut renderer = DrawListRenderer::default();
    let summary = run_session(&mut controller, &mut renderer, frames);

    let weather: Vec<&str> = summary.weather_seen.iter().map(|w| w.name()).collect();
    log::info!(
        "Session over: {} frames, {} runs, {} crashes, best score {}, {} pickups, weather [{}]",
        summary.frames,
        summary.runs,
        summary.crashes,
        summary.best_score,
        summary.pickups,
        weather.join(", ")
    );
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize summary: {e}"),
    }
}

/// Read a numeric environment variable, falling back on absence or garbage
#[cfg(not(target_arch = "wasm32"))]
fn env_number(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}: not a number", name, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
