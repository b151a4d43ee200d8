//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Display and event-source contracts plus their error type.
//
// The core only ever talks to a terminal through these traits. The
// crossterm backend and the headless backend in `platform` implement
// them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::Event;
use crate::core::style::Style;

//=== DisplayError ========================================================

/// Display acquisition and I/O errors.
///
/// Acquisition failures are fatal: the game cannot draw a single frame.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Standard output is not attached to a terminal.
    #[error("output is not a terminal")]
    NotATerminal,

    /// The event source has no more events to give.
    #[error("event source closed")]
    EventSourceClosed,

    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

//=== EventSource =========================================================

/// Blocking source of raw events, moved onto the input thread.
pub trait EventSource: Send {
    /// Waits up to `timeout` for the next event.
    ///
    /// Returns `Ok(None)` when nothing arrived in time. The bounded wait
    /// lets the input thread notice shutdown between events.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>, DisplayError>;
}

//=== Display =============================================================

/// Character-grid surface the game draws on.
///
/// Cell writes go to a back buffer; `show` presents it and `clear`
/// resets it for the next frame.
pub trait Display {
    /// Acquires the terminal (raw mode, alternate screen, ...).
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Releases the terminal. Called exactly once, on the exit path.
    fn fini(&mut self);

    /// Current size in cells as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Adopts a new size reported by a resize event.
    fn resize(&mut self, width: u16, height: u16);

    /// Sets the style used for blank cells.
    fn set_style(&mut self, style: Style);

    /// Writes one glyph to the back buffer. Out-of-range cells are ignored.
    fn set_cell(&mut self, x: i32, y: i32, glyph: char, style: Style);

    /// Presents the back buffer.
    fn show(&mut self) -> Result<(), DisplayError>;

    /// Clears the back buffer to the current style.
    fn clear(&mut self);

    /// Opens the event source read by the input thread.
    fn events(&mut self) -> Box<dyn EventSource>;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_error_is_error_trait() {
        fn assert_error<T: std::error::Error + Send + Sync>() {}
        assert_error::<DisplayError>();
    }

    #[test]
    fn display_error_display_format() {
        assert_eq!(DisplayError::NotATerminal.to_string(), "output is not a terminal");

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err = DisplayError::from(io);
        assert!(err.to_string().starts_with("terminal I/O failed"));
    }
}
