//=========================================================================
// Headless Display
//=========================================================================
//
// In-memory Display for tests and tools that run without a terminal.
//
// Architecture:
// ```text
//   HeadlessDisplay ──writes──> Arc<Mutex<Recording>> <──reads── HeadlessProbe
//   HeadlessEvents  <──────── crossbeam channel ─────────────── HeadlessProbe::send()
// ```
//
// The display is moved into the Game; the probe stays with the test and
// observes every call from any thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};

//=== Internal Dependencies ===============================================

use crate::core::input::{Event, KeyCode, KeyEvent};
use crate::core::platform_bridge::{Display, DisplayError, EventSource};
use crate::core::style::Style;

type Cells = HashMap<(i32, i32), (char, Style)>;

//=== DisplayCalls ========================================================

/// Call counters and last style seen by a headless display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayCalls {
    pub init_calls: usize,
    pub fini_calls: usize,
    pub show_calls: usize,
    pub clear_calls: usize,
    pub resize_calls: usize,
    pub cell_writes: usize,
    pub style: Option<Style>,
}

//=== Recording ===========================================================

#[derive(Debug, Default)]
struct Recording {
    calls: DisplayCalls,
    size: (u16, u16),
    pending: Cells,
    shown: Cells,
}

fn lock(recording: &Mutex<Recording>) -> MutexGuard<'_, Recording> {
    recording.lock().unwrap_or_else(PoisonError::into_inner)
}

//=== HeadlessDisplay =====================================================

/// Display that records into memory instead of drawing.
pub struct HeadlessDisplay {
    recording: Arc<Mutex<Recording>>,
    events: Receiver<Event>,
    fail_init: bool,
}

impl HeadlessDisplay {
    /// Creates a `width` x `height` display and its probe.
    pub fn new(width: u16, height: u16) -> (Self, HeadlessProbe) {
        let recording = Arc::new(Mutex::new(Recording {
            size: (width, height),
            ..Recording::default()
        }));
        let (tx, rx) = unbounded();

        (
            Self {
                recording: recording.clone(),
                events: rx,
                fail_init: false,
            },
            HeadlessProbe {
                recording,
                events: tx,
            },
        )
    }

    /// Creates a display whose `init` fails as if no terminal were attached.
    pub fn failing() -> (Self, HeadlessProbe) {
        let (mut display, probe) = Self::new(0, 0);
        display.fail_init = true;
        (display, probe)
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        let (width, height) = lock(&self.recording).size;
        x >= 0 && y >= 0 && x < i32::from(width) && y < i32::from(height)
    }
}

impl Display for HeadlessDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        let mut recording = lock(&self.recording);
        recording.calls.init_calls += 1;

        if self.fail_init {
            return Err(DisplayError::NotATerminal);
        }
        Ok(())
    }

    fn fini(&mut self) {
        lock(&self.recording).calls.fini_calls += 1;
    }

    fn size(&self) -> (u16, u16) {
        lock(&self.recording).size
    }

    fn resize(&mut self, width: u16, height: u16) {
        let mut recording = lock(&self.recording);
        recording.calls.resize_calls += 1;
        recording.size = (width, height);
    }

    fn set_style(&mut self, style: Style) {
        lock(&self.recording).calls.style = Some(style);
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        if !self.contains(x, y) {
            return;
        }

        let mut recording = lock(&self.recording);
        recording.calls.cell_writes += 1;
        recording.pending.insert((x, y), (glyph, style));
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        let mut recording = lock(&self.recording);
        recording.calls.show_calls += 1;
        recording.shown = recording.pending.clone();
        Ok(())
    }

    fn clear(&mut self) {
        let mut recording = lock(&self.recording);
        recording.calls.clear_calls += 1;
        recording.pending.clear();
    }

    fn events(&mut self) -> Box<dyn EventSource> {
        Box::new(HeadlessEvents {
            events: self.events.clone(),
        })
    }
}

//=== HeadlessEvents ======================================================

/// Event source fed by [`HeadlessProbe::send`].
pub struct HeadlessEvents {
    events: Receiver<Event>,
}

impl EventSource for HeadlessEvents {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>, DisplayError> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(DisplayError::EventSourceClosed),
        }
    }
}

//=== HeadlessProbe =======================================================

/// Test-side handle: inspects what was drawn and injects events.
///
/// Dropping the probe closes the event source.
#[derive(Clone)]
pub struct HeadlessProbe {
    recording: Arc<Mutex<Recording>>,
    events: Sender<Event>,
}

impl HeadlessProbe {
    //--- Inspection -------------------------------------------------------

    /// Copy of the call counters.
    pub fn snapshot(&self) -> DisplayCalls {
        lock(&self.recording).calls.clone()
    }

    /// Cell in the back buffer (written since the last `clear`).
    pub fn pending_cell(&self, x: i32, y: i32) -> Option<(char, Style)> {
        lock(&self.recording).pending.get(&(x, y)).copied()
    }

    /// Cell in the last presented frame.
    pub fn shown_cell(&self, x: i32, y: i32) -> Option<(char, Style)> {
        lock(&self.recording).shown.get(&(x, y)).copied()
    }

    /// `len` glyphs of the back buffer starting at `(x, y)`; blanks read as spaces.
    pub fn pending_text(&self, x: i32, y: i32, len: usize) -> String {
        read_row(&lock(&self.recording).pending, x, y, len)
    }

    /// `len` glyphs of the last presented frame starting at `(x, y)`.
    pub fn shown_text(&self, x: i32, y: i32, len: usize) -> String {
        read_row(&lock(&self.recording).shown, x, y, len)
    }

    /// Every glyph in the last presented frame.
    pub fn shown_glyphs(&self) -> Vec<char> {
        lock(&self.recording).shown.values().map(|(glyph, _)| *glyph).collect()
    }

    /// Blocks until at least `frames` frames were presented or `timeout` passes.
    pub fn wait_for_frames(&self, frames: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.snapshot().show_calls >= frames {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    //--- Injection --------------------------------------------------------

    /// Queues a raw event for the input thread.
    pub fn send(&self, event: Event) {
        // The display side keeps its receiver for as long as it exists.
        let _ = self.events.send(event);
    }

    pub fn send_key(&self, code: KeyCode) {
        self.send(Event::Key(KeyEvent::new(code)));
    }

    pub fn send_resize(&self, width: u16, height: u16) {
        self.send(Event::Resize { width, height });
    }
}

fn read_row(cells: &Cells, x: i32, y: i32, len: usize) -> String {
    (0..len as i32)
        .map(|dx| cells.get(&(x + dx, y)).map_or(' ', |(glyph, _)| *glyph))
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================
