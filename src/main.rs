//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use breakout::platform::FrameClock;
    use breakout::platform::input::web_key_event;
    use breakout::renderer::{RenderState, SpriteBatch, scene};
    use breakout::sim::{
        Autopilot, ClickEvent, Flow, GameEvent, GameMode, GameState, KeyEvent, handle_click,
        handle_key, update,
    };
    use breakout::{GameConfig, GameError};

    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        batch: SpriteBatch,
        clock: FrameClock,
        /// Demo player, toggled with "I"
        autopilot: Option<Autopilot>,
        seed: u64,
        running: bool,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
            let max_dt = config.max_frame_dt;
            let mut batch = SpriteBatch::new();
            let state = GameState::new(config, &mut batch)?;
            Ok(Self {
                state,
                render_state: None,
                batch,
                clock: FrameClock::new(max_dt),
                autopilot: None,
                seed,
                running: true,
            })
        }

        /// Feed one input event; stops the game on exit
        fn key(&mut self, event: KeyEvent) {
            if !self.running {
                return;
            }
            if handle_key(&mut self.state, event) == Flow::Exit {
                self.exit();
            }
        }

        fn toggle_autopilot(&mut self) {
            self.autopilot = match self.autopilot {
                Some(_) => None,
                None => Some(Autopilot::new(self.seed)),
            };
            log::info!("Autopilot: {}", self.autopilot.is_some());
        }

        fn update(&mut self, time: f64) {
            let dt = self.clock.tick(time);

            if let Some(pilot) = self.autopilot.as_mut() {
                for event in pilot.next_events(&self.state) {
                    if handle_key(&mut self.state, event) == Flow::Exit {
                        self.exit();
                        return;
                    }
                }
            }

            update(&mut self.state, dt);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::BallLost { lives_left } => log::info!("Ball lost, {} left", lives_left),
                    GameEvent::GemCollected { gem } => log::info!("Gem {} collected", gem),
                    other => log::debug!("{:?}", other),
                }
            }
        }

        fn render(&mut self) {
            self.batch.clear();
            scene::draw(&self.state, &mut self.batch);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch.vertices) {
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

        /// Write this frame's text lines into the DOM overlay
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(hud) = document.get_element_by_id("hud") else {
                return;
            };

            hud.set_inner_html("");
            let (w, h) = (self.state.config.field_width, self.state.config.field_height);
            for line in &self.batch.text {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                let _ = el.set_attribute("class", "hud-line");
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left: {:.2}%; top: {:.2}%;",
                        line.pos.x / w * 100.0,
                        line.pos.y / h * 100.0
                    ),
                );
                el.set_text_content(Some(&line.text));
                let _ = hud.append_child(&el);
            }
        }

        fn exit(&mut self) {
            self.running = false;
            log::info!("Exiting with score {}", self.state.score);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            for id in ["canvas", "hud"] {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
            if let Some(el) = document.get_element_by_id("exited") {
                let _ = el.set_attribute("class", "");
            }
        }
    }

    fn document() -> Result<Document, GameError> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GameError::Host("no document".to_string()))
    }

    pub async fn run() -> Result<(), GameError> {
        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or_else(|| GameError::Host("no window".to_string()))?;
        let document = document()?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| GameError::Host("no #canvas element".to_string()))?
            .dyn_into()
            .map_err(|_| GameError::Host("#canvas is not a canvas".to_string()))?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = GameConfig::load()?;
        let field = glam::Vec2::new(config.field_width, config.field_height);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed)?));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::Graphics(format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Graphics(format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(&document, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Breakout running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        for (name, is_down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                if matches!(key.as_str(), " " | "ArrowLeft" | "ArrowRight") {
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                if is_down && !event.repeat() && matches!(key.as_str(), "i" | "I") {
                    g.toggle_autopilot();
                    return;
                }
                g.key(web_key_event(&key, is_down, event.repeat()));
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let g = game.borrow();
                handle_click(
                    &g.state,
                    ClickEvent {
                        x: event.offset_x() as f64,
                        y: event.offset_y() as f64,
                    },
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause when the tab is hidden; restart frame timing when it comes back
    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                if g.state.mode == GameMode::Playing {
                    g.state.set_mode(GameMode::Paused);
                    log::info!("Auto-paused (tab hidden)");
                }
            } else {
                g.clock.reset();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();
            if !g.running {
                return;
            }

            g.update(time);
            if !g.running {
                return;
            }
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    if let Err(e) = wasm_game::run().await {
        log::error!("{}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use breakout::GameConfig;
    use breakout::GameError;
    use breakout::platform::HeadlessBackend;
    use breakout::renderer::scene;
    use breakout::sim::{Autopilot, Flow, GameEvent, GameMode, GameState, handle_key, update};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Five minutes of game time
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    /// Play one autopilot game without a window
    pub fn run() -> Result<(), GameError> {
        let config = GameConfig::load()?;
        let mut backend = HeadlessBackend::new();
        let mut state = GameState::new(config, &mut backend)?;
        log::info!("Created {} visuals", backend.visuals_created);

        let seed = std::env::var("BREAKOUT_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let mut pilot = Autopilot::new(seed);
        log::info!("Running headless demo with seed {}", seed);

        let mut frames = 0;
        'frames: while frames < MAX_FRAMES {
            for event in pilot.next_events(&state) {
                if handle_key(&mut state, event) == Flow::Exit {
                    break 'frames;
                }
            }

            update(&mut state, FRAME_DT);
            frames += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::BallLost { lives_left } => {
                        log::info!("Ball lost, {} left", lives_left)
                    }
                    GameEvent::GemCollected { gem } => log::info!("Gem {} collected", gem),
                    other => log::debug!("{:?}", other),
                }
            }

            if matches!(state.mode, GameMode::GameOver | GameMode::Win) {
                break;
            }
        }

        backend.clear();
        scene::draw(&state, &mut backend);
        let screen: Vec<&str> = backend.texts().collect();
        log::info!(
            "Finished after {} frames: {:?}, score {}, {} bricks left [{}]",
            frames,
            state.mode,
            state.score,
            state.visible_bricks(),
            screen.join(" | ")
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
