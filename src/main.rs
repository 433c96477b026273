//! Wrap Snake entry point
//!
//! On wasm32 this wires the canvas, keyboard, buttons and `setInterval` clock
//! to a session. Natively it plays a headless demo game with a simple
//! autopilot on a virtual clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use wrap_snake::audio::AudioManager;
    use wrap_snake::clock::IntervalClock;
    use wrap_snake::highscores::LocalStorageStore;
    use wrap_snake::renderer::CanvasRenderer;
    use wrap_snake::sim::{Direction, GameConfig, GamePhase};
    use wrap_snake::{Command, Runner, Session, Settings};

    type SharedRunner = Rc<Runner<IntervalClock>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Wrap Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut session = Session::new(GameConfig::default(), seed, Box::new(LocalStorageStore))
            .with_audio(Box::new(AudioManager::new(&settings)));
        match CanvasRenderer::new(canvas, settings.clone()) {
            Some(renderer) => session = session.with_renderer(Box::new(renderer)),
            None => log::warn!("Canvas has no 2D context - rendering disabled"),
        }
        session.draw();

        let session = Rc::new(RefCell::new(session));
        let runner: SharedRunner = Rc::new(Runner::attach(session, IntervalClock::new()));

        let auto_pause = settings.auto_pause;
        setup_keyboard(runner.clone(), Rc::new(RefCell::new(settings)));
        setup_buttons(runner.clone());
        if auto_pause {
            setup_auto_pause(runner);
        }

        log::info!("Wrap Snake running (seed {})", seed);
    }

    fn key_command(key: &str, phase: GamePhase) -> Option<Command> {
        let command = match key {
            "ArrowUp" | "w" | "W" => Command::Steer(Direction::Up),
            "ArrowDown" | "s" | "S" => Command::Steer(Direction::Down),
            "ArrowLeft" | "a" | "A" => Command::Steer(Direction::Left),
            "ArrowRight" | "d" | "D" => Command::Steer(Direction::Right),
            " " | "p" | "P" => Command::TogglePause,
            "Enter" => match phase {
                GamePhase::Idle | GamePhase::Over => Command::Start,
                _ => Command::Restart,
            },
            _ => return None,
        };
        Some(command)
    }

    /// `m` toggles mute, `c` switches palette; both are saved
    fn change_settings(key: &str, settings: &mut Settings) -> bool {
        match key {
            "m" | "M" => {
                let muted = settings.toggle_mute();
                log::info!("Muted: {}", muted);
            }
            "c" | "C" => {
                let palette = settings.cycle_palette();
                log::info!("Palette: {}", palette.as_str());
            }
            _ => return false,
        }
        settings.save();
        true
    }

    fn setup_keyboard(runner: SharedRunner, settings: Rc<RefCell<Settings>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut current = settings.borrow_mut();
            if change_settings(&event.key(), &mut current) {
                runner.session().borrow_mut().apply_settings(&current);
                return;
            }
            drop(current);

            let phase = runner.session().borrow().phase();
            if let Some(command) = key_command(&event.key(), phase) {
                event.prevent_default();
                runner.command(command);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(runner: SharedRunner) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for (id, command) in [
            ("start-btn", Command::Start),
            ("pause-btn", Command::TogglePause),
            ("restart-btn", Command::Restart),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                runner.command(command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(runner: SharedRunner) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let pause_if_running = {
            let runner = runner.clone();
            move |why: &str| {
                if runner.session().borrow().phase() == GamePhase::Running {
                    runner.command(Command::TogglePause);
                    log::info!("Auto-paused ({})", why);
                }
            }
        };

        // Visibility change (tab switch, minimize)
        {
            let pause = pause_if_running.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    pause("tab hidden");
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
                pause_if_running("window blur");
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

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::error::Error;
    use std::rc::Rc;

    use wrap_snake::clock::ManualClock;
    use wrap_snake::highscores::{HighScoreStore, JsonFileStore, MemoryStore};
    use wrap_snake::sim::{Cell, Direction, GameConfig, GamePhase, GameState, Snapshot};
    use wrap_snake::{Command, Runner, Session};

    /// Command-line options
    #[derive(Debug)]
    struct Options {
        seed: u64,
        max_ticks: u64,
        config: GameConfig,
        scores: Option<String>,
    }

    impl Options {
        fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn Error>> {
            let mut options = Options {
                seed: 42,
                max_ticks: 5_000,
                config: GameConfig::default(),
                scores: None,
            };
            while let Some(arg) = args.next() {
                let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
                match arg.as_str() {
                    "--seed" => options.seed = value()?.parse()?,
                    "--ticks" => options.max_ticks = value()?.parse()?,
                    "--config" => {
                        let json = std::fs::read_to_string(value()?)?;
                        options.config = GameConfig::from_json(&json)?;
                    }
                    "--scores" => options.scores = Some(value()?),
                    other => return Err(format!("unknown argument {}", other).into()),
                }
            }
            Ok(options)
        }
    }

    /// Shortest wrap-around distance between two cells
    fn torus_distance(a: Cell, b: Cell, tiles: i32) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.min(tiles - dx) + dy.min(tiles - dy)
    }

    /// Greedy step toward the food that does not die this tick
    fn autopilot(state: &GameState) -> Direction {
        let tiles = state.config.grid_tiles;
        let head = state.snake.head();
        let candidates: Vec<Direction> = Direction::CARDINALS
            .into_iter()
            .filter(|d| !state.last_moved.is_opposite(*d))
            .collect();
        let safe = |d: &Direction| {
            let next = head.stepped(*d, tiles);
            !state.snake.contains(next) && !state.obstacles.contains(&next)
        };
        let target = state.food.unwrap_or(head);

        candidates
            .iter()
            .copied()
            .filter(safe)
            .min_by_key(|d| torus_distance(head.stepped(*d, tiles), target, tiles))
            .or_else(|| candidates.first().copied())
            .unwrap_or(Direction::Right)
    }

    fn ascii_board(snapshot: &Snapshot) -> String {
        let mut out = String::new();
        for y in 0..snapshot.grid_tiles {
            for x in 0..snapshot.grid_tiles {
                let cell = Cell::new(x, y);
                let ch = if snapshot.snake.first() == Some(&cell) {
                    '@'
                } else if snapshot.snake.contains(&cell) {
                    'o'
                } else if snapshot.obstacles.contains(&cell) {
                    '#'
                } else if snapshot.food == Some(cell) {
                    '*'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    pub fn run(args: impl Iterator<Item = String>) -> Result<(), Box<dyn Error>> {
        let options = Options::parse(args)?;
        options.config.validate()?;
        log::info!("Wrap Snake (native) demo, seed {}", options.seed);

        let store: Box<dyn HighScoreStore> = match &options.scores {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let session = Rc::new(RefCell::new(Session::new(
            options.config.clone(),
            options.seed,
            store,
        )));
        let clock = ManualClock::new();
        let runner = Runner::attach(session.clone(), clock.clone());
        runner.command(Command::Start);

        let mut ticks = 0;
        while ticks < options.max_ticks && session.borrow().phase() == GamePhase::Running {
            let direction = autopilot(session.borrow().state());
            runner.command(Command::Steer(direction));
            let period = session.borrow().period_ms();
            ticks += clock.advance(u64::from(period)) as u64;
        }
        runner.detach();

        let session = session.borrow();
        let state = session.state();
        print!("{}", ascii_board(&state.snapshot()));
        println!(
            "phase={:?} end={:?} score={} high={} length={} obstacles={} ticks={} virtual_ms={}",
            state.phase,
            state.end,
            state.score,
            state.high_score,
            state.snake.len(),
            state.obstacles.len(),
            state.time_ticks,
            clock.now_ms()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_torus_distance() {
            assert_eq!(torus_distance(Cell::new(0, 0), Cell::new(19, 0), 20), 1);
            assert_eq!(torus_distance(Cell::new(2, 3), Cell::new(5, 1), 20), 5);
        }

        #[test]
        fn test_autopilot_avoids_obstacle() {
            let mut rng = rand_pcg::Pcg32::new(1, 1);
            let mut state = GameState::new(GameConfig::default(), 0, &mut rng);
            state.food = Some(Cell::new(15, 10));
            state.obstacles = vec![Cell::new(11, 10)];
            let d = autopilot(&state);
            assert_ne!(d, Direction::Right);
        }

        #[test]
        fn test_options_parse() {
            let args = ["--seed", "7", "--ticks", "10"].iter().map(|s| s.to_string());
            let options = Options::parse(args).expect("valid args");
            assert_eq!(options.seed, 7);
            assert_eq!(options.max_ticks, 10);
            assert!(Options::parse(["--bogus".to_string()].into_iter()).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
