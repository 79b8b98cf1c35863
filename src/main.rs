//! Coeur Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use coeur_rush::consts::*;
    use coeur_rush::renderer::HeartRenderState;
    use coeur_rush::sim::{rank_for_score, tick, GamePhase, GameState, TickInput};
    use coeur_rush::Settings;
    use glam::Vec2;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<HeartRenderState>,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase to drive screen transitions once
        last_phase: GamePhase,
        // Toast ids currently mirrored into the DOM
        shown_toasts: Vec<u32>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                settings: Settings::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Idle,
                shown_toasts: Vec::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.reveal = false;
                self.input.click = None;
                self.input.cursor = None;
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
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings, time) {
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
        fn update_hud(&mut self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{}s", self.state.time_left)));
            }
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.level.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            // Combo counter only shows from 3 up
            if let Some(el) = document.get_element_by_id("hud-combo") {
                if self.state.combo > 2 {
                    if let Some(val) = document.query_selector("#hud-combo .hud-value").ok().flatten()
                    {
                        let old_text = val.text_content().unwrap_or_default();
                        let new_text = format!("x{}", self.state.combo);
                        if old_text != new_text {
                            val.set_text_content(Some(&new_text));
                            let _ = el.set_attribute("class", "hud-item pop");
                        } else {
                            let _ = el.set_attribute("class", "hud-item");
                        }
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Active power-up indicator
            if let Some(el) = document.get_element_by_id("power-up-indicator") {
                match self.state.active_power_up {
                    Some(kind) if self.state.phase == GamePhase::Playing => {
                        el.set_text_content(Some(kind.label()));
                        let _ = el.set_attribute("class", "");
                    }
                    _ => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            self.sync_toasts(&document);
            self.sync_screens(&document);
        }

        /// Mirror toast state into the DOM only when the set changes
        fn sync_toasts(&mut self, document: &web_sys::Document) {
            let ids: Vec<u32> = self.state.toasts.iter().map(|t| t.id).collect();
            if ids == self.shown_toasts {
                return;
            }
            if let Some(el) = document.get_element_by_id("toasts") {
                let html: String = self
                    .state
                    .toasts
                    .iter()
                    .map(|t| format!("<div class=\"toast\">{}</div>", t.text))
                    .collect();
                el.set_inner_html(&html);
            }
            self.shown_toasts = ids;
        }

        /// Show the screen matching the current phase
        fn sync_screens(&mut self, document: &web_sys::Document) {
            if self.state.phase == self.last_phase {
                return;
            }
            self.last_phase = self.state.phase;

            let set = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute(
                        "class",
                        if visible { "screen" } else { "screen hidden" },
                    );
                }
            };
            set("intro-screen", self.state.phase == GamePhase::Idle);
            set("game-over", self.state.phase == GamePhase::Finished);
            set("message-screen", self.state.phase == GamePhase::Revealed);
            if let Some(el) = document.get_element_by_id("hud") {
                let _ = el.set_attribute(
                    "class",
                    if self.state.phase == GamePhase::Playing {
                        ""
                    } else {
                        "hidden"
                    },
                );
            }

            if self.state.phase == GamePhase::Finished {
                self.fill_results(document);
            }
        }

        /// Final score, best combo and rank on the results screen
        fn fill_results(&self, document: &web_sys::Document) {
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("final-combo") {
                el.set_text_content(Some(&format!("x{}", self.state.best_combo)));
            }
            let rank = rank_for_score(self.state.score);
            if let Some(el) = document.get_element_by_id("rank-emoji") {
                el.set_text_content(Some(rank.emoji));
            }
            if let Some(el) = document.get_element_by_id("rank-label") {
                el.set_text_content(Some(rank.label));
                let _ = el.set_attribute("style", &format!("color: {}", rank.color));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Coeur Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().state.area = Vec2::new(client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = HeartRenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        // Intro screen is visible until the first start
        if let Some(el) = document.get_element_by_id("intro-screen") {
            let _ = el.set_attribute("class", "screen");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Coeur Rush running!");
    }

    /// Position of a pointer event in play-area (canvas client) coordinates
    fn event_pos(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - cursor tracking for the glow and trail
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.state.area = Vec2::new(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                g.input.cursor =
                    Some(event_pos(&canvas_clone, event.client_x(), event.client_y()));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - catch attempt
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.click =
                    Some(event_pos(&canvas_clone, event.client_x(), event.client_y()));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.input.cursor =
                        Some(event_pos(&canvas_clone, touch.client_x(), touch.client_y()));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - catch attempt
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = event_pos(&canvas_clone, touch.client_x(), touch.client_y());
                    g.input.cursor = Some(pos);
                    g.input.click = Some(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => match g.state.phase {
                        GamePhase::Idle | GamePhase::Revealed => g.input.start = true,
                        GamePhase::Finished => g.input.reveal = true,
                        GamePhase::Playing => {}
                    },
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Start button on the intro screen
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Gift box on the results screen
        if let Some(btn) = document.get_element_by_id("reveal-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.reveal = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Replay button on the message card
        if let Some(btn) = document.get_element_by_id("replay-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.start = true;
                log::info!("Replay requested");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Coeur Rush (native) starting...");
    log::info!("Run with `trunk serve` for the web version");

    println!("\nRunning headless session check...");
    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use coeur_rush::consts::{SESSION_SECS, SIM_DT, TICKS_PER_SEC};
    use coeur_rush::sim::{tick, GamePhase, GameState, TickInput};

    let mut state = GameState::new(42);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, SIM_DT);

    let idle = TickInput::default();
    for _ in 0..(SESSION_SECS as u64 + 5) * TICKS_PER_SEC {
        tick(&mut state, &idle, SIM_DT);
    }
    assert!(state.phase == GamePhase::Finished, "session should finish");
    println!("✓ Headless session finished, score {}", state.score);
}
