//=========================================================================
// Game
//
// Main entry point: owns the display, the scenes and the frame loop.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──init(scenes)──>  ready
//         │                        │
//         ├─ with_fps()            └─ start()
//         ├─ with_exit_key()          ├─ spawns the input thread
//         └─ with_log_file()          └─ step() per tick until exit key
// ```
//
// Frame (step):
//   1. delta since the previous frame
//   2. take the pending key (None if nothing arrived)
//   3. exit key → release the display, stop
//   4. adopt a new screen size reported by the input thread
//   5. scene update, then entity updates in insertion order
//   6. scene draw (skipped unless something changed)
//   7. apply scene switches requested during the frame
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{tick, Receiver};
use log::{debug, error, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::context::Context;
use crate::core::input::{input_slot, KeyCode, KeyEvent, SlotReceiver, SlotSender};
use crate::core::platform_bridge::input_pump::{self, SharedSize};
use crate::core::platform_bridge::{Display, DisplayError};
use crate::core::scene::{Scene, SceneSwitch, SwitchQueue};
use crate::core::FrameControl;
use crate::logging;

/// Frame rate used when none (or a non-positive one) is configured.
pub const DEFAULT_FPS: f64 = 60.0;

//=== GameError ===========================================================

/// Errors returned by [`Game::init`], [`Game::start`] and [`Game::step`].
#[derive(Debug, Error)]
pub enum GameError {
    /// `init` was given an empty scene list.
    #[error("a game needs at least one scene")]
    NoScenes,

    /// The display could not be acquired or failed while drawing.
    #[error("display error: {0}")]
    Display(#[from] DisplayError),

    #[error("game is already initialized")]
    AlreadyInitialized,

    /// `start` or `step` called before `init` (or after exit).
    #[error("game is not initialized")]
    NotInitialized,

    /// The configured log file could not be opened.
    #[error("cannot open log file {}: {source}", path.display())]
    Logging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn input thread: {0}")]
    InputThread(#[source] std::io::Error),
}

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **FPS**: 60.0
/// - **Exit key**: Escape
/// - **Log file**: none (records go to whatever logger is installed)
///
/// # Examples
///
/// ```no_run
/// use terminus::prelude::*;
///
/// let mut game = GameBuilder::new()
///     .with_fps(30.0)
///     .with_exit_key(KeyCode::Char('q'))
///     .with_log_file("terminus.log")
///     .build(TerminalDisplay::new());
///
/// let mut title = SceneBase::new();
/// title.add(Text::new(2, 2, "Hello"));
///
/// game.init(vec![Box::new(title)]).unwrap();
/// game.start().unwrap();
/// ```
pub struct GameBuilder {
    fps: f64,
    exit_key: KeyCode,
    log_file: Option<PathBuf>,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fps: DEFAULT_FPS,
            exit_key: KeyCode::Escape,
            log_file: None,
        }
    }

    /// Sets the target frames per second.
    ///
    /// Non-positive or non-finite values fall back to 60 with a warning.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = sanitize_fps(fps);
        self
    }

    /// Sets the key that ends the game loop.
    pub fn with_exit_key(mut self, key: KeyCode) -> Self {
        self.exit_key = key;
        self
    }

    /// Routes log records to `path` once the game is initialized.
    ///
    /// Relative paths are resolved against the executable's directory.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Builds the game around `display`. Nothing is acquired until `init`.
    pub fn build<D>(self, display: D) -> Game
    where
        D: Display + 'static,
    {
        debug!("Building game (FPS: {}, exit key: {:?})", self.fps, self.exit_key);

        let (sender, receiver) = input_slot();
        let (width, height) = display.size();

        Game {
            display: Box::new(display),
            scenes: Vec::new(),
            active: 0,
            exit_key: self.exit_key,
            fps: self.fps,
            input: None,
            screen: (width, height),
            shared_size: Arc::new(SharedSize::new(width, height)),
            sender: Some(sender),
            receiver,
            ticker: None,
            switches: SwitchQueue::new(),
            log_file: self.log_file,
            phase: Phase::Uninitialized,
            running: Arc::new(AtomicBool::new(false)),
            clock: Instant::now(),
        }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_fps(fps: f64) -> f64 {
    if fps > 0.0 && fps.is_finite() {
        fps
    } else {
        warn!("Invalid FPS {}, using {}", fps, DEFAULT_FPS);
        DEFAULT_FPS
    }
}

//=== Phase ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Ready,
    Running,
    Terminated,
}

//=== Game ================================================================

/// Terminal game runtime.
///
/// Create via [`GameBuilder`], hand it the scenes with [`Game::init`] and
/// run it with [`Game::start`], which blocks until the exit key.
pub struct Game {
    display: Box<dyn Display>,
    scenes: Vec<Box<dyn Scene>>,
    active: usize,
    exit_key: KeyCode,
    fps: f64,

    /// Key taken this frame; replaced every frame.
    input: Option<KeyEvent>,

    /// Size the game loop last acted on.
    screen: (u16, u16),

    /// Size as last reported by the input thread.
    shared_size: Arc<SharedSize>,

    /// Moved onto the input thread by `start`.
    sender: Option<SlotSender>,
    receiver: SlotReceiver,

    ticker: Option<Receiver<Instant>>,
    switches: SwitchQueue,
    log_file: Option<PathBuf>,
    phase: Phase,

    /// Lowered on shutdown; the input thread stops when it sees it.
    running: Arc<AtomicBool>,
    clock: Instant,
}

impl Game {
    //--- Initialization ---------------------------------------------------

    /// Acquires the display and activates the first scene.
    ///
    /// Runs `setup` then `init` on scene 0 and `init` on its entities.
    ///
    /// # Errors
    ///
    /// - [`GameError::NoScenes`] if `scenes` is empty
    /// - [`GameError::Display`] if the display cannot be acquired
    /// - [`GameError::Logging`] if the configured log file cannot be opened
    /// - [`GameError::AlreadyInitialized`] on a second call
    pub fn init(&mut self, scenes: Vec<Box<dyn Scene>>) -> Result<(), GameError> {
        if self.phase != Phase::Uninitialized {
            return Err(GameError::AlreadyInitialized);
        }
        if scenes.is_empty() {
            return Err(GameError::NoScenes);
        }

        if let Some(path) = &self.log_file {
            let path = logging::resolve_log_path(path);
            match logging::init_file_logger(&path) {
                Ok(true) => info!("Logging to {}", path.display()),
                Ok(false) => debug!("Logger already installed, {} unused", path.display()),
                Err(source) => return Err(GameError::Logging { path, source }),
            }
        }

        self.display.init()?;

        let (width, height) = self.display.size();
        self.screen = (width, height);
        self.shared_size.store(width, height);

        self.scenes = scenes;
        self.active = 0;
        self.activate();

        self.ticker = Some(tick(self.frame_duration()));
        self.running.store(true, Ordering::Release);
        self.phase = Phase::Ready;

        info!("Game init finished ({} scenes)", self.scenes.len());
        Ok(())
    }

    //--- Execution --------------------------------------------------------

    /// Runs the game loop until the exit key is pressed.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the input thread on the display's event source
    /// 2. Runs one `step` per frame-ticker tick
    /// 3. On the exit key: stops the input thread, releases the display
    ///
    /// The input thread is not joined; it exits on its next poll.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Ready {
            return Err(GameError::NotInitialized);
        }
        let sender = self.sender.take().ok_or(GameError::NotInitialized)?;

        let source = self.display.events();
        if let Err(e) = input_pump::spawn(
            source,
            sender,
            self.shared_size.clone(),
            self.running.clone(),
        ) {
            error!("Failed to spawn input thread: {}", e);
            self.shutdown();
            return Err(GameError::InputThread(e));
        }

        self.phase = Phase::Running;
        self.clock = Instant::now();
        info!("Game loop running at {} FPS", self.fps);

        loop {
            if self.step()? == FrameControl::Exit {
                break;
            }

            if let Some(ticker) = &self.ticker {
                // tick() channels never disconnect
                let _ = ticker.recv();
            }
        }

        info!("Game loop exited");
        Ok(())
    }

    /// Runs a single frame without waiting for the ticker.
    ///
    /// `start` calls this once per tick; tools and tests may drive the
    /// loop by hand instead.
    pub fn step(&mut self) -> Result<FrameControl, GameError> {
        match self.phase {
            Phase::Ready | Phase::Running => {}
            Phase::Uninitialized => return Err(GameError::NotInitialized),
            Phase::Terminated => return Ok(FrameControl::Exit),
        }

        if !self.running.load(Ordering::Acquire) {
            warn!("Input thread stopped, shutting down");
            self.shutdown();
            return Ok(FrameControl::Exit);
        }

        //--- 1. Timing ----------------------------------------------------
        let now = Instant::now();
        let delta = now.duration_since(self.clock).as_secs_f64();
        self.clock = now;

        //--- 2. Input -----------------------------------------------------
        self.input = self.receiver.take();

        //--- 3. Exit key --------------------------------------------------
        if self.input.map(|key| key.code) == Some(self.exit_key) {
            info!("Exit key {:?} pressed", self.exit_key);
            self.shutdown();
            return Ok(FrameControl::Exit);
        }

        //--- 4. Resize ----------------------------------------------------
        let reported = self.shared_size.load();
        if reported != self.screen {
            debug!("Screen resized to {}x{}", reported.0, reported.1);
            self.screen = reported;
            self.display.resize(reported.0, reported.1);
            if let Some(scene) = self.scenes.get_mut(self.active) {
                scene.base_mut().set_redraw(true);
            }
        }

        //--- 5. Update ----------------------------------------------------
        let screen = self.screen_size();
        let Some(scene) = self.scenes.get_mut(self.active) else {
            return Ok(FrameControl::Continue);
        };

        {
            let mut ctx = Context::new(self.input, screen, &mut self.switches);
            scene.base_mut().init_entities(&mut ctx);
            scene.update(&mut ctx, delta);
            scene.base_mut().update_entities(&mut ctx, delta);
        }

        //--- 6. Draw ------------------------------------------------------
        if let Err(e) = scene.draw(self.display.as_mut()) {
            error!("Draw failed: {}", e);
            self.shutdown();
            return Err(e.into());
        }

        //--- 7. Scene switches --------------------------------------------
        self.apply_switches();

        Ok(FrameControl::Continue)
    }

    /// Stops the input thread and releases the display (once).
    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);

        if matches!(self.phase, Phase::Ready | Phase::Running) {
            self.display.fini();
            debug!("Display released");
        }
        self.phase = Phase::Terminated;
    }

    //--- Scene Switching --------------------------------------------------

    /// Activates the next scene. No-op on the last scene.
    pub fn next_scene(&mut self) {
        if self.active + 1 < self.scenes.len() {
            self.active += 1;
            debug!("Switched to scene {}", self.active);
            self.activate();
        }
    }

    /// Activates the previous scene. No-op on the first scene.
    pub fn prev_scene(&mut self) {
        if self.active > 0 {
            self.active -= 1;
            debug!("Switched to scene {}", self.active);
            self.activate();
        }
    }

    fn apply_switches(&mut self) {
        for switch in self.switches.take() {
            match switch {
                SceneSwitch::Next => self.next_scene(),
                SceneSwitch::Previous => self.prev_scene(),
            }
        }
    }

    /// Runs `setup` (first activation only), `init` and entity `init` on
    /// the active scene.
    fn activate(&mut self) {
        let screen = self.screen_size();
        let Some(scene) = self.scenes.get_mut(self.active) else {
            return;
        };

        let mut ctx = Context::new(self.input, screen, &mut self.switches);

        if !scene.base().is_set_up() {
            scene.setup(&mut ctx);
            scene.base_mut().mark_set_up();
        }
        scene.init(self.display.as_mut());
        scene.base_mut().init_entities(&mut ctx);
    }

    //--- Accessors --------------------------------------------------------

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Changes the target frame rate; takes effect on the next tick.
    pub fn set_fps(&mut self, fps: f64) {
        self.fps = sanitize_fps(fps);
        if self.ticker.is_some() {
            self.ticker = Some(tick(self.frame_duration()));
        }
    }

    pub fn exit_key(&self) -> KeyCode {
        self.exit_key
    }

    pub fn set_exit_key(&mut self, key: KeyCode) {
        self.exit_key = key;
    }

    /// The key taken this frame, `None` if nothing arrived.
    pub fn input(&self) -> Option<KeyEvent> {
        self.input
    }

    /// Screen size in cells as `(width, height)`.
    pub fn screen_size(&self) -> (i32, i32) {
        (i32::from(self.screen.0), i32::from(self.screen.1))
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_scene(&self) -> Option<&dyn Scene> {
        self.scenes.get(self.active).map(|scene| scene.as_ref())
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
