//! A playing session: engine state plus its collaborators
//!
//! The session is the single owner of the game state. Input and lifecycle
//! commands are queued into it between ticks; each tick fans events out to
//! audio, persistence and rendering, and reports period changes so the
//! driving clock can be rescheduled.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clock::Clock;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{self, Direction, GameConfig, GameEvent, GamePhase, GameState, Snapshot};

/// Sound cues the game emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    FoodEaten,
    GameOver,
    NewHighScore,
}

/// Consumer of per-tick snapshots; must not feed back into the game
pub trait RenderSink {
    fn render(&mut self, snapshot: &Snapshot);

    /// Pick up changed palette / grid preferences
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Consumer of sound cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);

    /// Pick up changed volume / mute preferences
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    TogglePause,
    Restart,
}

/// What a tick or command changed that the driver must act on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// New clock period, when it changed
    pub period_ms: Option<u32>,
}

pub struct Session {
    state: GameState,
    rng: Pcg32,
    store: Box<dyn HighScoreStore>,
    audio: Option<Box<dyn AudioSink>>,
    render: Option<Box<dyn RenderSink>>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let high_score = store.load_high_score();
        let state = GameState::new(config, high_score, &mut rng);
        log::info!("Session seeded with {} (high score {})", seed, high_score);
        Self {
            state,
            rng,
            store,
            audio: None,
            render: None,
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_renderer(mut self, render: Box<dyn RenderSink>) -> Self {
        self.render = Some(render);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Current clock period
    pub fn period_ms(&self) -> u32 {
        self.state.tick_interval_ms
    }

    /// Apply a command between ticks
    pub fn apply(&mut self, command: Command) -> TickReport {
        let before = self.state.tick_interval_ms;
        match command {
            Command::Steer(direction) => {
                if self.state.is_running() {
                    sim::steer(&mut self.state, direction);
                }
            }
            Command::Start => {
                sim::start(&mut self.state, &mut self.rng);
            }
            Command::TogglePause => {
                sim::toggle_pause(&mut self.state);
            }
            Command::Restart => sim::restart(&mut self.state, &mut self.rng),
        }
        self.draw();
        TickReport {
            events: Vec::new(),
            period_ms: (self.state.tick_interval_ms != before).then_some(self.state.tick_interval_ms),
        }
    }

    /// Clock callback body
    pub fn tick(&mut self) -> TickReport {
        let events = sim::tick(&mut self.state, &mut self.rng);
        let mut report = TickReport::default();

        for event in &events {
            match event {
                GameEvent::FoodEaten { .. } => self.play(AudioCue::FoodEaten),
                GameEvent::NewHighScore(score) => {
                    self.store.save_high_score(*score);
                    self.play(AudioCue::NewHighScore);
                }
                GameEvent::SpeedChanged { interval_ms } => report.period_ms = Some(*interval_ms),
                GameEvent::GameOver { .. } => self.play(AudioCue::GameOver),
                GameEvent::ObstacleSpawned(_) | GameEvent::ObstaclesMoved(_) => {}
            }
        }

        if self.state.is_running() || !events.is_empty() {
            self.draw();
        }
        report.events = events;
        report
    }

    fn play(&mut self, cue: AudioCue) {
        if let Some(audio) = self.audio.as_mut() {
            audio.play(cue);
        }
    }

    /// Hand changed preferences to the sinks and redraw
    pub fn apply_settings(&mut self, settings: &Settings) {
        if let Some(audio) = self.audio.as_mut() {
            audio.apply_settings(settings);
        }
        if let Some(render) = self.render.as_mut() {
            render.apply_settings(settings);
        }
        self.draw();
    }

    /// Push the current snapshot to the renderer
    pub fn draw(&mut self) {
        if let Some(render) = self.render.as_mut() {
            render.render(&self.state.snapshot());
        }
    }
}

/// Drives a shared session from a [`Clock`]
pub struct Runner<C: Clock> {
    session: Rc<RefCell<Session>>,
    clock: C,
    handle: Rc<Cell<Option<C::Handle>>>,
}

impl<C: Clock + Clone + 'static> Runner<C> {
    /// Schedule ticks at the session's current period
    pub fn attach(session: Rc<RefCell<Session>>, clock: C) -> Self {
        let handle: Rc<Cell<Option<C::Handle>>> = Rc::new(Cell::new(None));
        let period = session.borrow().period_ms();

        let callback = {
            let session = session.clone();
            let clock = clock.clone();
            let handle = handle.clone();
            Box::new(move || {
                let report = session.borrow_mut().tick();
                if let (Some(period), Some(h)) = (report.period_ms, handle.get()) {
                    log::debug!("Speed up: rescheduling to {}ms", period);
                    clock.reschedule(h, period);
                }
            })
        };
        handle.set(Some(clock.schedule(period, callback)));

        Self {
            session,
            clock,
            handle,
        }
    }

    pub fn session(&self) -> &Rc<RefCell<Session>> {
        &self.session
    }

    /// Apply a command, rescheduling if it reset the speed
    pub fn command(&self, command: Command) {
        let report = self.session.borrow_mut().apply(command);
        if let (Some(period), Some(h)) = (report.period_ms, self.handle.get()) {
            self.clock.reschedule(h, period);
        }
    }

    /// Stop ticking
    pub fn detach(&self) {
        if let Some(h) = self.handle.take() {
            self.clock.cancel(h);
        }
    }
}
