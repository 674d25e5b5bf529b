//! hal9000 entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use hal9000::platform::Platform;
    use hal9000::platform::web::WebPlatform;
    use hal9000::sim::Control;
    use hal9000::{App, GameError, Tuning};

    struct Game {
        app: App,
        platform: WebPlatform,
        start_ms: f64,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("hal9000 starting...");
        log::info!("{}", hal9000::INSTRUCTIONS);

        let platform = WebPlatform::new("canvas").map_err(to_js)?;
        let (width, height) = platform.surface_size();
        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::load().map_err(to_js)?;
        let app = App::new(seed, width, height, tuning, 0).map_err(to_js)?;

        let game = Rc::new(RefCell::new(Game {
            app,
            platform,
            start_ms: js_sys::Date::now(),
        }));
        request_animation_frame(game);
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let control = {
            let mut g = game.borrow_mut();
            let now_ms = (js_sys::Date::now() - g.start_ms).max(0.0) as u64;
            let Game { app, platform, .. } = &mut *g;
            match app.frame(platform, now_ms) {
                Ok(control) => {
                    if let Some(fps) = app.take_fps_report() {
                        log::info!("FPS: {}", fps);
                    }
                    control
                }
                Err(e) => {
                    log::error!("Frame failed: {}", e);
                    Control::Quit
                }
            }
        };

        if control == Control::Continue {
            request_animation_frame(game);
        } else {
            log::info!("hal9000 stopped");
        }
    }

    fn to_js(err: GameError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use hal9000::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, FRAME_PERIOD_MS};
    use hal9000::platform::{HeadlessPlatform, Platform};
    use hal9000::sim::{Autopilot, Control, InputEvent};
    use hal9000::{App, GameError, Tuning};

    /// Frames the demo plays before giving up on hal (about five minutes)
    const DEMO_FRAME_LIMIT: u64 = 5 * 60 * 60;

    /// Headless attract-mode run: the autopilot plays until hal falls or time runs out
    pub fn run() -> Result<(), GameError> {
        let tuning = Tuning::load()?;
        let mut platform = HeadlessPlatform::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
        let (width, height) = platform.surface_size();
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        let clock = Instant::now();
        let mut app = App::new(seed, width, height, tuning, 0)?;
        let mut pilot = Autopilot::new();
        log::info!("No window toolkit linked; running the headless demo");

        for frame in 0u64.. {
            if app.state().is_halted() || frame >= DEMO_FRAME_LIMIT {
                platform.push(InputEvent::Quit);
            } else {
                platform.extend(pilot.plan(app.state()));
            }

            let now_ms = clock.elapsed().as_millis() as u64;
            if app.frame(&mut platform, now_ms)? == Control::Quit {
                break;
            }
            if let Some(fps) = app.take_fps_report() {
                println!("FPS: {}", fps);
            }

            std::thread::sleep(Duration::from_millis(FRAME_PERIOD_MS));
        }

        log::info!(
            "Demo over after {} frames, hal health {}",
            platform.frames_presented(),
            app.state().hal.health
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    println!("hal9000\n");
    println!("{}\n", hal9000::INSTRUCTIONS);

    if let Err(err) = native::run() {
        log::error!("{}", err);
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
