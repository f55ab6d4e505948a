//! Funnel Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use funnel_drop::Settings;
    use funnel_drop::audio::WebAudio;
    use funnel_drop::consts::{SIM_DT, WORLD_HEIGHT, WORLD_WIDTH};
    use funnel_drop::platform::{CanvasPointer, find_canvas, find_spawn_target};
    use funnel_drop::renderer::CanvasRenderer;
    use funnel_drop::sim::{Game, GameEvent, PhysicsEngine, RapierWorld, TickInput};

    /// Game instance holding all state
    struct App {
        game: Game<RapierWorld, WebAudio>,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        input: TickInput,
        last_time: f64,
    }

    impl App {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let events = self.game.update(&self.input, dt);
            // The game holds the spawn request until a step takes it
            self.input.spawn = false;

            for event in events {
                match event {
                    GameEvent::Spawned { count } => log::info!("Dropped {} grains", count),
                    GameEvent::GameOver { settled } => {
                        log::info!("gameover ({} grains below the line)", settled)
                    }
                }
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.game.audio.set_muted(muted);
            self.settings.save();
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut renderer) = self.renderer {
                renderer.render(self.game.engine.bodies());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Funnel Drop starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; nothing to do");
            return;
        };

        let settings = Settings::load();

        let canvas = match find_canvas(&document) {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };

        let seed = settings.seed_or(js_sys::Date::now() as u64);
        let mut pointer = CanvasPointer::new(canvas.clone());
        let audio = WebAudio::new(&settings);
        let game = match Game::new(RapierWorld::new(), audio, &mut pointer, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Initialization failed: {}", e);
                return;
            }
        };
        let Some(canvas) = canvas else {
            return;
        };

        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);

        let renderer = match CanvasRenderer::new(&canvas, settings.show_threshold) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::warn!("Rendering disabled: {}", e);
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            settings,
            input: TickInput::default(),
            last_time: 0.0,
        }));

        setup_pointer_handlers(&canvas, app.clone());
        setup_spawn_trigger(&document, app.clone());
        setup_keyboard_handler(&document, app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Funnel Drop running (seed {})", seed);
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Press - grab whatever is under the pointer
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = CanvasPointer::to_world(
                    &canvas_clone,
                    event.client_x() as f64,
                    event.client_y() as f64,
                );
                app.borrow_mut().input.pointer = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move - only matters while held
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.input.pointer.is_some() {
                    a.input.pointer = Some(CanvasPointer::to_world(
                        &canvas_clone,
                        event.client_x() as f64,
                        event.client_y() as f64,
                    ));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release
        for name in ["mouseup", "mouseleave"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().input.pointer = None;
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_spawn_trigger(document: &Document, app: Rc<RefCell<App>>) {
        let Some(target) = find_spawn_target(document) else {
            log::warn!("Spawn target not found; sand will never drop");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().input.spawn = true;
        });
        let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard_handler(document: &Document, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.key().eq_ignore_ascii_case("m") {
                app.borrow_mut().toggle_mute();
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use funnel_drop::consts::SIM_DT;
    use funnel_drop::sim::{Game, GameEvent, NoPointer, RapierWorld, TickInput};
    use funnel_drop::{HeadlessAudio, Settings};

    env_logger::init();
    log::info!("Funnel Drop (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build to play");

    let settings = Settings::load();
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let seed = settings.seed_or(now);

    let mut game = match Game::new(RapierWorld::new(), HeadlessAudio::new(), &mut NoPointer, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    // Drop the sand immediately and simulate up to 30 seconds
    let max_ticks = (30.0 / SIM_DT) as u64;
    let mut input = TickInput {
        spawn: true,
        ..Default::default()
    };
    while game.state.time_ticks < max_ticks && !game.state.is_game_over() {
        for event in game.tick(&input, SIM_DT) {
            match event {
                GameEvent::Spawned { count } => log::info!("Dropped {} grains", count),
                GameEvent::GameOver { settled } => {
                    log::info!("gameover ({} grains below the line)", settled)
                }
            }
        }
        input.spawn = false;
    }

    println!(
        "seed {}: {} grains below the line after {:.2}s ({:?})",
        seed,
        game.state.settled,
        game.state.time_ticks as f32 * SIM_DT,
        game.state.phase(),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
