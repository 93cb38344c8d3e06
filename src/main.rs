//! Fruit Slash entry point
//!
//! In the browser: loads images, wires DOM events and runs the frame loop.
//! On native: plays one headless demo session against a simulated clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use anyhow::anyhow;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use fruit_slash::consts::*;
    use fruit_slash::platform::assets::all_assets;
    use fruit_slash::platform::{Clock, RenderGateway};
    use fruit_slash::renderer::{CanvasRenderer, build_scene};
    use fruit_slash::runner::Runner;
    use fruit_slash::sim::{GameState, InputEvent, Key};
    use fruit_slash::{HighScores, Settings};

    const ASSET_ROOT: &str = "assets/";

    /// `performance.now()`
    struct PerformanceClock {
        performance: Option<web_sys::Performance>,
    }

    impl Clock for PerformanceClock {
        fn now_ms(&self) -> f64 {
            self.performance
                .as_ref()
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now)
        }
    }

    struct Game {
        runner: Runner,
        renderer: CanvasRenderer,
        settings: Settings,
        highscores: HighScores,
        clock: PerformanceClock,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Map client coordinates into the play area, whatever the CSS size
        fn to_play_area(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let sx = if rect.width() > 0.0 { WIDTH as f64 / rect.width() } else { 1.0 };
            let sy = if rect.height() > 0.0 { HEIGHT as f64 / rect.height() } else { 1.0 };
            Vec2::new(
                ((client_x as f64 - rect.left()) * sx) as f32,
                ((client_y as f64 - rect.top()) * sy) as f32,
            )
        }

        fn input(&mut self, event: InputEvent) {
            let now = self.clock.now_ms();
            let report = self.runner.input(event, now);
            if !report.sliced.is_empty() {
                log::debug!("Sliced {:?} (+{})", report.sliced, report.points);
            }
        }

        fn frame(&mut self, time: f64) {
            let report = self.runner.update(time);

            if let Some(done) = report.finished {
                let stamp = js_sys::Date::now();
                if let Some(rank) = self.highscores.add_score(done.score, done.theme, stamp) {
                    log::info!("New high score #{rank}: {}", done.score);
                    if let Err(e) = self.highscores.save() {
                        log::warn!("Could not save high scores: {e:#}");
                    }
                }
            }

            if self.settings.theme != self.runner.state.theme {
                self.settings.theme = self.runner.state.theme;
                self.save_settings();
            }

            self.renderer.fps = self.settings.show_fps.then(|| self.runner.fps());
            let scene = build_scene(&self.runner.state, &self.settings, &self.highscores);
            self.renderer.present(&scene);
        }

        fn save_settings(&self) {
            if let Err(e) = self.settings.save() {
                log::warn!("Could not save settings: {e:#}");
            }
        }
    }

    async fn load_images() -> anyhow::Result<HashMap<String, HtmlImageElement>> {
        let mut images = HashMap::new();
        for path in all_assets() {
            let img = HtmlImageElement::new().map_err(|e| anyhow!("cannot create image: {e:?}"))?;
            img.set_src(&format!("{ASSET_ROOT}{path}"));
            JsFuture::from(img.decode())
                .await
                .map_err(|e| anyhow!("cannot load {path}: {e:?}"))?;
            images.insert(path, img);
        }
        log::info!("Loaded {} images", images.len());
        Ok(images)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Fruit Slash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(WIDTH as u32);
        canvas.set_height(HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let highscores = HighScores::load();
        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.theme = settings.theme;
        log::info!("Game initialized with seed: {}", seed);

        // Show the loading screen while images arrive
        let mut renderer = CanvasRenderer::new(ctx.clone(), HashMap::new());
        renderer.present(&build_scene(&state, &settings, &highscores));

        let images = load_images().await;
        let images = match images {
            Ok(images) => {
                state.finish_loading(Ok(()));
                images
            }
            Err(e) => {
                state.finish_loading(Err(e));
                renderer.present(&build_scene(&state, &settings, &highscores));
                return Ok(());
            }
        };

        let game = Rc::new(RefCell::new(Game {
            runner: Runner::new(state),
            renderer: CanvasRenderer::new(ctx, images),
            settings,
            highscores,
            clock: PerformanceClock {
                performance: window.performance(),
            },
            canvas: canvas.clone(),
        }));

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Fruit Slash running!");
        Ok(())
    }

    fn listen(
        target: &web_sys::EventTarget,
        name: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn first_touch(game: &Game, event: &TouchEvent) -> Option<Vec2> {
        event
            .touches()
            .get(0)
            .map(|t| game.to_play_area(t.client_x(), t.client_y()))
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        for name in ["mousedown", "mousemove"] {
            let game = game.clone();
            listen(canvas, name, move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                let pos = g.to_play_area(mouse.client_x(), mouse.client_y());
                let input = if event.type_() == "mousedown" {
                    InputEvent::PointerDown(pos)
                } else {
                    InputEvent::PointerMove(pos)
                };
                g.input(input);
            })?;
        }

        {
            let game = game.clone();
            listen(canvas, "mouseup", move |_| game.borrow_mut().input(InputEvent::PointerUp))?;
        }
        {
            let game = game.clone();
            listen(canvas, "mouseleave", move |_| {
                game.borrow_mut().input(InputEvent::PointerLeave)
            })?;
        }

        for name in ["touchstart", "touchmove"] {
            let game = game.clone();
            listen(canvas, name, move |event| {
                event.prevent_default();
                let Some(touch) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                let pos = first_touch(&g, touch);
                let input = if event.type_() == "touchstart" {
                    InputEvent::TouchStart(pos)
                } else {
                    InputEvent::TouchMove(pos)
                };
                g.input(input);
            })?;
        }

        {
            let game = game.clone();
            listen(canvas, "touchend", move |event| {
                event.prevent_default();
                game.borrow_mut().input(InputEvent::TouchEnd);
            })?;
        }

        let window = web_sys::window().ok_or("no window")?;
        listen(&window, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut g = game.borrow_mut();
            match key.key().as_str() {
                "Enter" => g.input(InputEvent::Key(Key::Enter)),
                "i" | "I" => {
                    g.runner.demo = !g.runner.demo;
                    log::info!("Demo mode: {}", g.runner.demo);
                }
                "f" | "F" => {
                    g.settings.show_fps = !g.settings.show_fps;
                    g.save_settings();
                }
                "t" | "T" => {
                    g.settings.show_trail = !g.settings.show_trail;
                    g.save_settings();
                }
                _ => g.input(InputEvent::Key(Key::Other)),
            }
        })?;

        Ok(())
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
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    headless::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::Context;

    use fruit_slash::platform::{
        AssetGateway, Clock, FsAssets, LogRenderer, ManualClock, RenderGateway,
    };
    use fruit_slash::renderer::build_scene;
    use fruit_slash::runner::Runner;
    use fruit_slash::sim::{GameState, InputEvent, theme_button};
    use fruit_slash::{HighScores, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up if a session somehow runs past this much simulated time
    const MAX_SIM_MS: f64 = 120_000.0;

    fn seed() -> anyhow::Result<u64> {
        match std::env::var("FRUIT_SLASH_SEED") {
            Ok(s) => s.parse().with_context(|| format!("bad FRUIT_SLASH_SEED {s:?}")),
            Err(_) => Ok(std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)),
        }
    }

    fn tuning() -> anyhow::Result<Tuning> {
        match std::env::var_os("FRUIT_SLASH_TUNING") {
            Some(path) => {
                let json = std::fs::read_to_string(&path).with_context(|| {
                    format!("cannot read tuning file {}", path.to_string_lossy())
                })?;
                Tuning::from_json(&json)
            }
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> anyhow::Result<()> {
        log::info!("Fruit Slash (native) starting...");

        let seed = seed()?;
        let settings = Settings::load();
        let mut state = GameState::with_tuning(seed, tuning()?);
        state.theme = settings.theme;
        log::info!("Headless demo with seed {seed}");

        let load = match std::env::var_os("FRUIT_SLASH_ASSETS") {
            Some(root) => FsAssets::new(root).load_all(),
            None => Ok(()),
        };
        state.finish_loading(load);
        if let Some(err) = &state.load_error {
            anyhow::bail!("{err}");
        }

        let mut highscores = HighScores::load();
        let mut clock = ManualClock::default();
        let mut renderer = LogRenderer::default();
        let mut runner = Runner::new(state);
        runner.demo = true;

        let button = theme_button(settings.theme).center();
        runner.input(InputEvent::PointerDown(button), clock.now_ms());
        runner.input(InputEvent::PointerUp, clock.now_ms());

        let finished = loop {
            clock.advance(FRAME_MS);
            let report = runner.update(clock.now_ms());
            renderer.present(&build_scene(&runner.state, &settings, &highscores));
            if let Some(done) = report.finished {
                break done;
            }
            if clock.now_ms() > MAX_SIM_MS {
                anyhow::bail!("session did not finish after {MAX_SIM_MS} ms");
            }
        };

        log::info!(
            "Demo finished ({:?}): score {}, {} frames",
            finished.reason,
            finished.score,
            renderer.frames
        );

        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        if let Some(rank) = highscores.add_score(finished.score, finished.theme, stamp) {
            log::info!("New high score #{rank}");
            highscores.save()?;
        }

        println!("score {} ({:?})", finished.score, finished.reason);
        Ok(())
    }
}
