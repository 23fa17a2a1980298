//! Scrolling Platformer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use scrolling_platformer::audio::AudioManager;
    use scrolling_platformer::consts::*;
    use scrolling_platformer::platform::{Key, Keyboard};
    use scrolling_platformer::renderer::{Frame, RenderState};
    use scrolling_platformer::{Game, Settings, Tuning};

    /// Browser-side wrapper: simulation plus everything that touches the DOM
    struct App {
        game: Game,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        keyboard: Keyboard,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Last overlay markup, to skip redundant DOM writes
        overlay_html: String,
    }

    impl App {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                game: Game::new(seed, Tuning::default(), &settings),
                settings,
                render_state: None,
                audio,
                keyboard: Keyboard::new(),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                overlay_html: String::new(),
            }
        }

        /// Run simulation ticks for this display frame
        fn update(&mut self, dt: f32, time: f64) {
            let input = self.keyboard.take_input();
            self.game.push_input(&input);

            let events = self.game.update(dt);
            for event in &events {
                log::debug!("Event: {:?}", event);
            }
            self.audio.play_events(&events);

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
        fn render(&mut self, frame: &Frame) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(frame) {
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

        /// Text labels and FPS counter live in the DOM on top of the canvas
        fn update_overlay(&mut self, frame: &Frame, canvas: &HtmlCanvasElement) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let scale_x = canvas.client_width() as f32 / SCREEN_WIDTH;
            let scale_y = canvas.client_height() as f32 / SCREEN_HEIGHT;
            let mut html = String::new();
            for label in &frame.labels {
                let c = label.color;
                html.push_str(&format!(
                    "<span class=\"label\" style=\"left:{:.0}px;top:{:.0}px;font-size:{:.0}px;color:rgba({},{},{},{:.3})\">{}</span>",
                    label.pos.x * scale_x,
                    label.pos.y * scale_y,
                    label.font_size * scale_y,
                    c.r,
                    c.g,
                    c.b,
                    c.a as f32 / 255.0,
                    label.text,
                ));
            }
            if html != self.overlay_html {
                if let Some(el) = document.get_element_by_id("labels") {
                    el.set_inner_html(&html);
                }
                self.overlay_html = html;
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }
            if self.settings.show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("{} starting...", WINDOW_TITLE);

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        document.set_title(WINDOW_TITLE);

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
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let app = Rc::new(RefCell::new(App::new(seed, settings)));

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

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        setup_input_handlers(app.clone());
        setup_focus_handlers(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app, canvas);

        log::info!("{} running!", WINDOW_TITLE);
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                // Keep space and arrows from scrolling the page
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.keyboard.key_down(key, event.repeat());
                // Browsers only allow audio after a user gesture
                a.audio.resume();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    app.borrow_mut().keyboard.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Window blur (click outside): release keys so the player doesn't run off
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                a.keyboard.release_all();
                if a.settings.mute_on_blur {
                    a.audio.set_muted(true);
                    log::info!("Muted (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, canvas: HtmlCanvasElement) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, canvas, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, canvas: HtmlCanvasElement, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            let frame = a.game.frame();
            a.render(&frame);
            a.update_overlay(&frame, &canvas);
        }

        request_animation_frame(app, canvas);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use scrolling_platformer::consts::WINDOW_TITLE;
    use scrolling_platformer::{Settings, Tuning};

    env_logger::init();
    log::info!("{} (native) starting...", WINDOW_TITLE);
    log::info!("Native mode runs headless - build for wasm32 to play in the browser");

    let tuning = match Tuning::load_or_default(Path::new("tuning.json")) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Invalid tuning.json: {e}");
            std::process::exit(1);
        }
    };
    let settings = Settings::load();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    headless::playthrough(seed, tuning, &settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use scrolling_platformer::consts::SIM_DT;
    use scrolling_platformer::sim::{GameEvent, GamePhase, TickInput};
    use scrolling_platformer::{Game, Settings, Tuning};

    /// Length of the scripted run in ticks
    const RUN_TICKS: u64 = 20 * 60;

    /// Canned input: run right, jump and double jump, dash across gaps
    fn scripted_input(tick: u64) -> TickInput {
        let cycle = tick % 90;
        TickInput {
            left: false,
            right: true,
            jump: cycle == 0 || cycle == 20,
            dash: cycle == 25,
            respawn: false,
        }
    }

    /// Drive the simulation without a window and report what happened
    pub fn playthrough(seed: u64, tuning: Tuning, settings: &Settings) {
        let mut game = Game::new(seed, tuning, settings);
        let mut jumps = 0u32;
        let mut air_jumps = 0u32;
        let mut dashes = 0u32;
        let mut falls = 0u32;

        for tick in 0..RUN_TICKS {
            game.push_input(&scripted_input(tick));
            for event in game.update(SIM_DT) {
                log::info!("tick {}: {:?}", game.state.time_ticks, event);
                match event {
                    GameEvent::Jumped { air } => {
                        jumps += 1;
                        if air {
                            air_jumps += 1;
                        }
                    }
                    GameEvent::DashStarted => dashes += 1,
                    GameEvent::FellOut => falls += 1,
                    _ => {}
                }
            }
            if game.state.phase != GamePhase::Playing {
                break;
            }
        }

        let state = &game.state;
        println!("\nHeadless run (seed {seed}):");
        println!("  ticks:      {}", state.time_ticks);
        println!("  phase:      {:?}", state.phase);
        println!("  position:   ({:.1}, {:.1})", state.player.pos.x, state.player.pos.y);
        println!("  jumps:      {jumps} ({air_jumps} in the air)");
        println!("  dashes:     {dashes}");
        println!("  falls:      {falls}");
        println!("  particles:  {}", state.particles.len());
    }
}
