//! Hop Dodge entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

    use hop_dodge::platform::{SystemClock, TimeSource};
    use hop_dodge::renderer::canvas::CanvasRenderer;
    use hop_dodge::renderer::{Frame, Renderer};
    use hop_dodge::sim::{FrameToken, GameEvent, Session, SessionPhase};
    use hop_dodge::ui::{EndMessage, Encouragement, pause_label};
    use hop_dodge::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: CanvasRenderer,
        clock: SystemClock,
        settings: Settings,
        encouragement: Encouragement,
        document: Document,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn now(&self) -> f64 {
            self.clock.now_ms()
        }

        /// Draw the current state and refresh the HUD
        fn present(&mut self) {
            let frame = Frame::build(self.session.state());
            if let Err(e) = self.renderer.draw(&frame) {
                log::warn!("Render error: {:?}", e);
            }

            self.set_text("time", &frame.hud.time);
            self.set_text("score", &frame.hud.score);
            self.set_text("obstacles", &frame.hud.obstacles);
            self.set_text("pauseBtn", pause_label(frame.phase));
            if self.settings.show_fps {
                self.set_text("fps", &self.fps.to_string());
            }

            for event in self.session.drain_events() {
                if let GameEvent::SessionEnded(result) = event {
                    let line = self
                        .settings
                        .show_encouragement
                        .then(|| self.encouragement.pick());
                    self.show_end_message(&EndMessage::compose(&result, line));
                }
            }
            self.sync_buttons();
        }

        fn track_fps(&mut self, time: f64) {
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

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_display(&self, id: &str, display: &str) {
            if let Some(el) = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el.style().set_property("display", display);
            }
        }

        fn sync_buttons(&self) {
            let phase = self.session.phase();
            let idle = phase == SessionPhase::Idle;
            let playing = matches!(phase, SessionPhase::Running | SessionPhase::Paused);
            self.set_display("startBtn", if idle { "inline-block" } else { "none" });
            self.set_display("pauseBtn", if playing { "inline-block" } else { "none" });
            self.set_display("restartBtn", if idle { "none" } else { "inline-block" });
        }

        fn show_end_message(&self, message: &EndMessage) {
            if let Some(el) = self.document.get_element_by_id("finalScore") {
                let mut text = message.headline.to_string();
                for line in &message.lines {
                    text.push('\n');
                    text.push_str(line);
                }
                el.set_text_content(Some(&text));
            }
            self.set_display("gameOverModal", "flex");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hop Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(Tuning::default()),
            renderer: CanvasRenderer::new(canvas.clone(), ctx),
            clock: SystemClock::new(),
            settings,
            encouragement: Encouragement::new(seed),
            document,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        {
            let mut g = game.borrow_mut();
            let display = if g.settings.show_fps { "inline" } else { "none" };
            g.set_display("fps", display);
            g.present();
        }
        log::info!("Hop Dodge ready");
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: FrameToken) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, token: FrameToken, time: f64) {
        let next = {
            let mut g = game.borrow_mut();
            let now = g.now();
            let next = g.session.frame(token, now);
            if next.is_some() || g.session.phase() == SessionPhase::Ended {
                g.track_fps(time);
                g.present();
            }
            next
        };

        if let Some(token) = next {
            request_animation_frame(game, token);
        }
    }

    /// Start a fresh session and kick off its frame chain
    fn start(game: &Rc<RefCell<Game>>) {
        let token = {
            let mut g = game.borrow_mut();
            let now = g.now();
            g.session.start(now)
        };
        if let Some(token) = token {
            game.borrow().sync_buttons();
            request_animation_frame(game.clone(), token);
        }
    }

    fn toggle_pause(game: &Rc<RefCell<Game>>) {
        let token = {
            let mut g = game.borrow_mut();
            let now = g.now();
            let token = g.session.toggle_pause(now);
            // Draw the overlay (or clear it) right away
            g.present();
            token
        };
        if let Some(token) = token {
            request_animation_frame(game.clone(), token);
        }
    }

    fn reset(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.session.reset();
        g.set_display("gameOverModal", "none");
        g.present();
    }

    fn toggle_fps(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.settings.show_fps = !g.settings.show_fps;
        g.settings.save();
        let display = if g.settings.show_fps { "inline" } else { "none" };
        g.set_display("fps", display);
    }

    fn jump(game: &Rc<RefCell<Game>>) {
        game.borrow_mut().session.request_jump();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click / tap to jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                jump(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                jump(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        jump(&game);
                    }
                    "Enter" => start(&game),
                    "Escape" | "KeyP" => toggle_pause(&game),
                    "KeyR" => reset(&game),
                    "KeyF" => toggle_fps(&game),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, action: fn(&Rc<RefCell<Game>>)) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                action(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        on_click("startBtn", game.clone(), start);
        on_click("pauseBtn", game.clone(), toggle_pause);
        on_click("restartBtn", game.clone(), reset);
        on_click("playAgainBtn", game, |game| {
            reset(game);
            start(game);
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let should_pause = {
                        let g = game.borrow();
                        g.settings.pause_on_blur && g.session.phase() == SessionPhase::Running
                    };
                    if should_pause {
                        toggle_pause(&game);
                        log::info!("Auto-paused (tab hidden)");
                    }
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
                let should_pause = {
                    let g = game.borrow();
                    g.settings.pause_on_blur && g.session.phase() == SessionPhase::Running
                };
                if should_pause {
                    toggle_pause(&game);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::fs::File;
    use std::io::{self, Stdout, stdout};
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use crossterm::{
        cursor,
        event::{self, Event, KeyCode, KeyEventKind},
        execute, terminal,
    };

    use hop_dodge::platform::{SystemClock, TimeSource};
    use hop_dodge::renderer::terminal::TerminalRenderer;
    use hop_dodge::renderer::{Frame, Renderer};
    use hop_dodge::sim::{FrameToken, GameEvent, Session, SessionPhase};
    use hop_dodge::ui::{EndMessage, Encouragement};
    use hop_dodge::{Settings, Tuning};

    const IDLE_BANNER: &str =
        " Enter: start  Space: jump  P: pause  R: reset  Q: quit";

    const LOG_FILE: &str = "hop-dodge.log";

    /// Where log output goes while the terminal holds the game screen.
    ///
    /// Logging stays off unless `RUST_LOG` asks for it; stderr would draw over
    /// the pixel grid, so records go to a file instead.
    pub fn log_path(rust_log: Option<&str>) -> Option<PathBuf> {
        rust_log
            .filter(|filter| !filter.is_empty())
            .map(|_| PathBuf::from(LOG_FILE))
    }

    pub fn init_logging() {
        let rust_log = std::env::var("RUST_LOG").ok();
        let Some(path) = log_path(rust_log.as_deref()) else {
            return;
        };
        match File::create(&path) {
            Ok(file) => env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init(),
            Err(e) => eprintln!("Logging disabled, cannot create {}: {}", path.display(), e),
        }
    }

    /// Tuning from the JSON file named on the command line, or the defaults
    fn load_tuning() -> Tuning {
        let Some(path) = std::env::args().nth(1) else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning, {} rejected: {}", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> io::Result<()> {
        let tuning = load_tuning();
        let settings = Settings::load();

        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        let result = play(out, tuning, settings);

        let mut out = stdout();
        execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()?;
        result
    }

    fn play(out: Stdout, tuning: Tuning, settings: Settings) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = TerminalRenderer::new(out, cols, rows);
        renderer.set_banner(Some(IDLE_BANNER.to_string()));

        let clock = SystemClock::new();
        let mut session = Session::new(tuning);
        let mut encouragement = Encouragement::new(clock.now_ms().to_bits() ^ 0x9e37_79b9);
        let mut token: Option<FrameToken> = None;
        let frame_dur = Duration::from_millis(settings.frame_interval_ms());

        loop {
            let frame_start = Instant::now();

            // Input
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char(' ') | KeyCode::Up => {
                            session.request_jump();
                        }
                        KeyCode::Enter | KeyCode::Char('s') => {
                            if session.phase() == SessionPhase::Ended {
                                session.reset();
                            }
                            if let Some(t) = session.start(clock.now_ms()) {
                                token = Some(t);
                                renderer.set_banner(None);
                            }
                        }
                        KeyCode::Char('p') => {
                            if let Some(t) = session.toggle_pause(clock.now_ms()) {
                                token = Some(t);
                            }
                        }
                        KeyCode::Char('r') => {
                            session.reset();
                            token = None;
                            renderer.set_banner(Some(IDLE_BANNER.to_string()));
                        }
                        _ => {}
                    },
                    Event::Resize(c, r) => renderer.resize(c, r),
                    _ => {}
                }
            }

            // Update
            if let Some(t) = token {
                token = session.frame(t, clock.now_ms());
            }
            for event in session.drain_events() {
                if let GameEvent::SessionEnded(result) = event {
                    let line = settings.show_encouragement.then(|| encouragement.pick());
                    let message = EndMessage::compose(&result, line);
                    renderer.set_banner(Some(format!(
                        " {} {}  (Enter: play again)",
                        message.headline,
                        message.lines.join("  ")
                    )));
                }
            }

            // Render
            renderer.draw(&Frame::build(session.state()))?;

            // Frame pacing
            let elapsed = frame_start.elapsed();
            if elapsed < frame_dur {
                std::thread::sleep(frame_dur - elapsed);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    native_game::init_logging();
    log::info!("Hop Dodge (terminal) starting...");
    native_game::run()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::path::PathBuf;

    use super::native_game::log_path;

    #[test]
    fn test_logging_off_without_rust_log() {
        assert_eq!(log_path(None), None);
        assert_eq!(log_path(Some("")), None);
    }

    #[test]
    fn test_log_goes_to_file() {
        assert_eq!(log_path(Some("info")), Some(PathBuf::from("hop-dodge.log")));
    }
}
