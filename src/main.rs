//! Circletris entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build draws into `#canvas`; the native build plays a headless game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use circletris::consts::*;
    use circletris::platform::KeyAction;
    use circletris::renderer::vertex::colors;
    use circletris::renderer::{RenderState, Scene, build_scene, shapes, tessellate};
    use circletris::sim::{GameEvent, GamePhase, GameState, TickInput, apply_command, tick};
    use circletris::{Settings, StartupError};

    const CANVAS_ID: &str = "canvas";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Whether an animation frame is scheduled
        running: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::with_rules(seed, settings.rules),
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                running: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pause = false;
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::RingsCleared { rings, points } => {
                        log::info!("{} ring(s) cleared, +{}", rings, points);
                    }
                    GameEvent::GameOver { score } => log::info!("Final score: {}", score),
                    GameEvent::Settled { .. } | GameEvent::Spawned => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, scene: &Scene) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = tessellate(scene);
                let clear = shapes::clear_color(scene).unwrap_or(colors::BACKGROUND);
                match render_state.render(&vertices, clear) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, scene: &Scene) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&scene.score_label));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if self.state.phase == GamePhase::Paused {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match scene.message {
                    Some(message) => {
                        let _ = el.set_attribute("class", "");
                        if let Some(msg_el) = document.get_element_by_id("game-over-message") {
                            msg_el.set_text_content(Some(message));
                        }
                        if let Some(score_el) = document.get_element_by_id("final-score") {
                            score_el.set_text_content(Some(&self.state.score.to_string()));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::with_rules(seed, self.settings.rules);
            self.accumulator = 0.0;
            self.last_time = 0.0;
            self.input = TickInput::default();
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        log::info!("Circletris starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| StartupError::NoCanvas(CANVAS_ID.into()))?
            .dyn_into()
            .map_err(|_| StartupError::NotACanvas(CANVAS_ID.into()))?;

        // Fixed logical size, scaled for the display
        let dpr = window.device_pixel_ratio();
        let side = (CANVAS_SIZE as f64 * dpr) as u32;
        canvas.set_width(side);
        canvas.set_height(side);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, side, side, CANVAS_SIZE / 2.0).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        start_loop(game);

        log::info!("Circletris running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(action) = KeyAction::from_key(&event.key()) else {
                return;
            };
            if action.prevents_default() {
                event.prevent_default();
            }

            match action {
                KeyAction::Piece(command) => {
                    apply_command(&mut game.borrow_mut().state, command);
                }
                KeyAction::Pause => game.borrow_mut().input.pause = true,
                KeyAction::Restart => restart_if_over(&game),
                KeyAction::ToggleFps => {
                    let mut g = game.borrow_mut();
                    g.settings.show_fps = !g.settings.show_fps;
                    g.settings.save();
                }
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start a fresh game once the current one has ended
    fn restart_if_over(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if !g.state.is_game_over() {
                return;
            }
            let seed = js_sys::Date::now() as u64;
            g.restart(seed);
            log::info!("Game restarted with seed: {}", seed);
        }
        start_loop(game.clone());
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.running {
                return;
            }
            g.running = true;
        }
        request_animation_frame(game);
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
        let keep_running = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            let scene = build_scene(&g.state);
            g.render(&scene);
            g.update_hud(&scene);

            // The game-over frame stays on screen; stop scheduling
            let keep_running = !g.state.is_game_over();
            g.running = keep_running;
            keep_running
        };

        if keep_running {
            request_animation_frame(game);
        } else {
            log::info!("Frame loop stopped");
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                restart_if_over(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        fn request_pause(game: &Rc<RefCell<Game>>, reason: &str) {
            let mut g = game.borrow_mut();
            if g.settings.pause_on_blur && g.state.phase == GamePhase::Playing {
                g.input.pause = true;
                log::info!("Auto-paused ({})", reason);
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    request_pause(&game, "tab hidden");
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
                request_pause(&game, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(headless::DEFAULT_SEED);

    log::info!("Circletris (native) starting headless game, seed {}", seed);
    log::info!("Run with `trunk serve` for the playable web version");

    let summary = headless::autoplay(seed, headless::MAX_TICKS);
    println!("seed:           {}", seed);
    println!("ticks:          {}", summary.ticks);
    println!("pieces settled: {}", summary.settled);
    println!("rings cleared:  {}", summary.rings_cleared);
    println!("score:          {}", summary.score);
    println!("game over:      {}", summary.game_over);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use circletris::sim::{Command, GameEvent, GameState, TickInput, apply_command, tick};

    pub const DEFAULT_SEED: u64 = 2024;
    /// Ten minutes of play at 60 ticks per second
    pub const MAX_TICKS: u64 = 60 * 60 * 10;

    pub struct Summary {
        pub ticks: u64,
        pub settled: u32,
        pub rings_cleared: u32,
        pub score: u64,
        pub game_over: bool,
    }

    /// Play with random key presses until game over or `max_ticks`
    pub fn autoplay(seed: u64, max_ticks: u64) -> Summary {
        let mut state = GameState::new(seed);
        let mut player = Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
        let input = TickInput::default();
        let mut settled = 0;

        while !state.is_game_over() && state.time_ticks < max_ticks {
            // Roughly one key press every five frames
            if player.random_ratio(1, 5) {
                let command = match player.random_range(0..4) {
                    0 => Command::RotateRingLeft,
                    1 => Command::RotateRingRight,
                    2 => Command::SpeedUp,
                    _ => Command::RotatePiece,
                };
                apply_command(&mut state, command);
            }
            tick(&mut state, &input);

            settled += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Settled { .. }))
                .count() as u32;
        }

        Summary {
            ticks: state.time_ticks,
            settled,
            rings_cleared: state.rings_cleared,
            score: state.score,
            game_over: state.is_game_over(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autoplay_is_deterministic() {
            let a = autoplay(11, 5_000);
            let b = autoplay(11, 5_000);
            assert_eq!(a.ticks, b.ticks);
            assert_eq!(a.settled, b.settled);
            assert_eq!(a.score, b.score);
        }

        #[test]
        fn test_autoplay_settles_pieces() {
            let summary = autoplay(3, 5_000);
            assert!(summary.settled > 0);
            assert!(summary.ticks <= 5_000);
        }
    }
}
