//! Orb Shooter entry point
//!
//! Browser builds wire the canvas, DOM overlay and input into the game loop.
//! Native builds run a seeded headless session for balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use orb_shooter::audio::{AudioManager, SoundEffect};
    use orb_shooter::consts::*;
    use orb_shooter::renderer::{CanvasSurface, draw_frame};
    use orb_shooter::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use orb_shooter::{Settings, Tuning};

    /// Longest frame gap fed to the accumulator (tab switches, breakpoints)
    const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        audio: AudioManager,
        surface: CanvasSurface,
        document: Document,
        accumulator: f64,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        /// Run simulation steps for the elapsed time
        fn update(&mut self, dt_ms: f64) {
            self.accumulator += dt_ms.min(MAX_FRAME_GAP_MS);

            let mut substeps = 0;
            while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, FRAME_MS);
                self.accumulator -= FRAME_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire_at = None;
                self.input.start = false;
                self.input.resize = None;
            }

            for event in self.state.drain_events() {
                self.handle_event(event);
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }

            match event {
                GameEvent::Started => {
                    self.surface.clear();
                    set_class(&self.document, "modalEl", "hidden");
                }
                GameEvent::ScoreChanged { score } => {
                    if let Some(el) = self.document.get_element_by_id("scoreEl") {
                        el.set_text_content(Some(&score.to_string()));
                    }
                }
                GameEvent::GameOver { final_score } => {
                    if let Some(el) = self.document.get_element_by_id("bigScore") {
                        el.set_text_content(Some(&final_score.to_string()));
                    }
                    set_class(&self.document, "modalEl", "");
                }
                _ => {}
            }
        }

        fn render(&mut self) {
            draw_frame(&mut self.surface, &self.state, &self.settings);
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as u32, h as u32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Orb Shooter starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        let (width, height) = window_size(&window);
        let Some(mut surface) = CanvasSurface::new(canvas) else {
            log::error!("Canvas has no 2D context");
            return;
        };
        surface.resize(width, height);

        let settings = Settings::load();
        let tuning = Tuning {
            max_particles: settings.max_particles(),
            ..Tuning::default()
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, width as f32, height as f32, tuning),
            audio: AudioManager::new(&settings),
            settings,
            surface,
            document: document.clone(),
            accumulator: 0.0,
            last_time: 0.0,
            input: TickInput::default(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone());
        setup_start_button(&document, game.clone());

        request_animation_frame(game);
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Click anywhere fires toward the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.is_active() {
                    g.input.fire_at = Some(Vec2::new(event.client_x() as f32, event.client_y() as f32));
                }
            });
            let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize keeps the canvas filling the window
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else { return };
                let (width, height) = window_size(&window);
                let mut g = game.borrow_mut();
                g.surface.resize(width, height);
                g.input.resize = Some((width as f32, height as f32));
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if matches!(event.key().as_str(), "i" | "I") {
                    g.input.auto_aim = !g.input.auto_aim;
                    log::info!("Auto-aim: {}", g.input.auto_aim);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("startGameBtn") else {
            log::warn!("No start button; starting immediately");
            game.borrow_mut().input.start = true;
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Keep the window click handler from firing a shot
            event.stop_propagation();
            let mut g = game.borrow_mut();
            g.audio.resume();
            g.input.start = true;
            g.input.fire_at = None;
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                FRAME_MS
            };
            g.last_time = time;

            let was_active = g.state.is_active();
            g.update(dt_ms);

            // The final frame of a run stays on screen under the modal
            if was_active || g.state.phase == GamePhase::Active {
                g.render();
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the headless runner (two minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u64 = 7200;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use orb_shooter::Tuning;
    use orb_shooter::consts::FRAME_MS;
    use orb_shooter::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Orb Shooter (native) starting headless session...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => Tuning::from_json(&text).unwrap_or_else(|e| {
                log::warn!("Invalid tuning in {}: {}; using defaults", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}; using defaults", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut state = GameState::new(seed, 800.0, 600.0, tuning);
    let mut input = TickInput {
        start: true,
        auto_aim: true,
        ..TickInput::default()
    };

    let mut kills = 0u32;
    let mut shots = 0u32;
    while state.frame < HEADLESS_FRAMES {
        tick(&mut state, &input, FRAME_MS);
        input.start = false;

        for event in state.drain_events() {
            match event {
                GameEvent::Fired { shots: n } => shots += n as u32,
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                _ => {}
            }
        }

        if !state.is_active() {
            break;
        }
    }

    println!(
        "seed {}: score {} | level {} | {} kills from {} shots | {:.1}s survived",
        seed,
        state.score(),
        state.level(),
        kills,
        shots,
        state.now() / 1000.0
    );
}
