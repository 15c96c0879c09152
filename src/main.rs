//! Vector Drift entry point
//!
//! Handles platform-specific initialization and runs the frame loop: a
//! winit event loop on native, a requestAnimationFrame callback on the web.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use vector_drift::consts::SIM_DT;
    use vector_drift::platform::FpsCounter;
    use vector_drift::renderer::RenderState;
    use vector_drift::sim::{FrameClock, GameState, TickInput};
    use vector_drift::Settings;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        clock: FrameClock,
        input: TickInput,
        settings: Settings,
        last_time: f64,
        fps: FpsCounter,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                clock: FrameClock::new(),
                input: TickInput::default(),
                settings: Settings::load(),
                last_time: 0.0,
                fps: FpsCounter::new(),
            }
        }

        /// Run simulation ticks for this frame's wall time
        fn update(&mut self, dt: f32) {
            self.clock.advance(&mut self.state, &self.input, dt);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        render_state.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Vector Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the canvas backing store to its CSS size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

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

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Vector Drift running!");
    }

    /// keydown/keyup listeners maintaining held-key state; the simulation
    /// samples the flags every tick rather than reacting to key events
    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if apply_key(&mut game.borrow_mut().input, &event.key(), true) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                apply_key(&mut game.borrow_mut().input, &event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Update one held-key flag; returns whether the key was one of ours
    fn apply_key(input: &mut TickInput, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowUp" | "w" | "W" => input.thrust = pressed,
            "ArrowLeft" | "a" | "A" => input.turn_left = pressed,
            "ArrowRight" | "d" | "D" => input.turn_right = pressed,
            _ => return false,
        }
        true
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

            // RAF timestamps are in milliseconds
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();

            if g.settings.log_fps {
                let secs = time / 1000.0;
                let _ = g.fps.record(secs);
                g.fps.log_periodic(secs);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::sync::Arc;
    use std::time::Instant;

    use winit::application::ApplicationHandler;
    use winit::event::{KeyEvent, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::keyboard::{KeyCode, PhysicalKey};
    use winit::window::{Window, WindowId};

    use vector_drift::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use vector_drift::platform::FpsCounter;
    use vector_drift::renderer::RenderState;
    use vector_drift::sim::{FrameClock, GameState, TickInput};
    use vector_drift::Settings;

    struct App {
        window: Option<Arc<Window>>,
        render_state: Option<RenderState>,
        state: GameState,
        clock: FrameClock,
        input: TickInput,
        settings: Settings,
        started: Instant,
        last_frame: Option<Instant>,
        fps: FpsCounter,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                window: None,
                render_state: None,
                state: GameState::new(seed),
                clock: FrameClock::new(),
                input: TickInput::default(),
                settings: Settings::load(),
                started: Instant::now(),
                last_frame: None,
                fps: FpsCounter::new(),
            }
        }

        fn handle_key(&mut self, event: KeyEvent) {
            let pressed = event.state.is_pressed();
            if let PhysicalKey::Code(code) = event.physical_key {
                match code {
                    KeyCode::ArrowUp | KeyCode::KeyW => self.input.thrust = pressed,
                    KeyCode::ArrowLeft | KeyCode::KeyA => self.input.turn_left = pressed,
                    KeyCode::ArrowRight | KeyCode::KeyD => self.input.turn_right = pressed,
                    _ => {}
                }
            }
        }

        fn redraw(&mut self) {
            let now = Instant::now();
            let dt = self
                .last_frame
                .map(|last| (now - last).as_secs_f32())
                .unwrap_or(vector_drift::consts::SIM_DT);
            self.last_frame = Some(now);

            self.clock.advance(&mut self.state, &self.input, dt);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        render_state.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if self.settings.log_fps {
                let secs = self.started.elapsed().as_secs_f64();
                let _ = self.fps.record(secs);
                self.fps.log_periodic(secs);
            }
        }
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_some() {
                return;
            }

            let attributes = Window::default_attributes()
                .with_title("Vector Drift")
                .with_inner_size(winit::dpi::LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT));
            let window = Arc::new(
                event_loop
                    .create_window(attributes)
                    .expect("Failed to create window"),
            );
            let size = window.inner_size();

            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
            let surface = instance
                .create_surface(window.clone())
                .expect("Failed to create surface");

            let adapter = pollster::block_on(instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                },
            ))
            .expect("Failed to get adapter");
            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let render_state = pollster::block_on(RenderState::new(
                surface,
                &adapter,
                size.width,
                size.height,
            ));

            self.render_state = Some(render_state);
            self.window = Some(window);
        }

        fn window_event(
            &mut self,
            event_loop: &ActiveEventLoop,
            _window_id: WindowId,
            event: WindowEvent,
        ) {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Close requested");
                    event_loop.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Some(ref mut render_state) = self.render_state {
                        render_state.resize(new_size.width, new_size.height);
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    self.handle_key(event);
                }
                WindowEvent::RedrawRequested => {
                    self.redraw();
                }
                _ => {}
            }
        }

        fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    pub fn run() {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        event_loop.set_control_flow(ControlFlow::Poll);

        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let mut app = App::new(seed);
        event_loop.run_app(&mut app).expect("Event loop error");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Vector Drift (native) starting...");
    native_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
