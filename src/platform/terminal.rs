//=========================================================================
// Terminal Display
//=========================================================================
//
// Display backed by crossterm.
//
// Lifecycle:
//   init()  → raw mode, alternate screen, hidden cursor, size query
//   show()  → every cell queued row by row, flushed once
//   fini()  → cursor shown, main screen restored, raw mode off
//
// Dropping an initialized display restores the terminal as well, so a
// panic on the game thread does not leave the shell in raw mode.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::{self, BufWriter, IsTerminal, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event;
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::event_mapper::map_event;
use super::frame_buffer::FrameBuffer;
use crate::core::input::Event;
use crate::core::platform_bridge::{Display, DisplayError, EventSource};
use crate::core::style::Style;

/// Size assumed until the terminal has been queried.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

//=== TerminalDisplay =====================================================

pub struct TerminalDisplay {
    out: BufWriter<Stdout>,
    buffer: FrameBuffer,
    style: Style,
    active: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        let (width, height) = FALLBACK_SIZE;
        Self {
            out: BufWriter::new(io::stdout()),
            buffer: FrameBuffer::new(width, height, Style::DEFAULT),
            style: Style::DEFAULT,
            active: false,
        }
    }

    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        let (width, height) = terminal::size()?;
        self.buffer.resize(width, height, self.style);
        Ok(())
    }

    fn restore(&mut self) {
        if let Err(e) = execute!(self.out, ResetColor, Show, LeaveAlternateScreen) {
            warn!(target: "platform", "Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(target: "platform", "Failed to disable raw mode: {}", e);
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TerminalDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        if !io::stdout().is_terminal() {
            return Err(DisplayError::NotATerminal);
        }

        if let Err(e) = self.enter() {
            self.restore();
            return Err(e.into());
        }

        self.active = true;
        let (width, height) = self.buffer.size();
        info!(target: "platform", "Terminal acquired ({}x{})", width, height);
        Ok(())
    }

    fn fini(&mut self) {
        if self.active {
            self.restore();
            self.active = false;
            info!(target: "platform", "Terminal released");
        }
    }

    fn size(&self) -> (u16, u16) {
        self.buffer.size()
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height, self.style);
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        self.buffer.set(x, y, glyph, style);
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        let mut current: Option<Style> = None;

        for (y, row) in self.buffer.rows().enumerate() {
            queue!(self.out, MoveTo(0, y as u16))?;

            for cell in row {
                if current != Some(cell.style) {
                    queue!(
                        self.out,
                        SetForegroundColor(cell.style.fg.into()),
                        SetBackgroundColor(cell.style.bg.into())
                    )?;
                    current = Some(cell.style);
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn clear(&mut self) {
        self.buffer.fill(self.style);
    }

    fn events(&mut self) -> Box<dyn EventSource> {
        Box::new(TerminalEvents)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        self.fini();
    }
}

//=== TerminalEvents ======================================================

/// Reads crossterm's global event queue.
struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>, DisplayError> {
        if event::poll(timeout)? {
            Ok(map_event(event::read()?))
        } else {
            Ok(None)
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
