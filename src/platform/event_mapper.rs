//=========================================================================
// Platform Event Mapper
//
// Converts crossterm events and colors to and from engine types.
// Keeps crossterm out of the core: only `platform` names it.
//
// Responsibilities:
// - Translate key presses (and repeats) into `KeyEvent`
// - Translate terminal resizes
// - Map the engine's closed color table onto terminal colors
// - Provide fallbacks (`Unidentified`) for unmapped inputs
//
//=========================================================================

use crossterm::event::{
    Event as CtEvent, KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind,
    KeyModifiers as CtModifiers,
};
use crossterm::style::Color as CtColor;

use crate::core::input::{Event, KeyCode, KeyEvent, Modifiers};
use crate::core::style::Color;

//=== Key Conversion ======================================================
//
// Maps crossterm key codes to the engine's `KeyCode` enum. Anything the
// engine has no name for becomes `Unidentified`.
//

impl From<CtKeyCode> for KeyCode {
    fn from(code: CtKeyCode) -> Self {
        match code {
            //--- Editing / control keys -------------------------------------------
            CtKeyCode::Esc => KeyCode::Escape,
            CtKeyCode::Enter => KeyCode::Enter,
            CtKeyCode::Tab => KeyCode::Tab,
            CtKeyCode::Backspace => KeyCode::Backspace,
            CtKeyCode::Delete => KeyCode::Delete,
            CtKeyCode::Insert => KeyCode::Insert,

            //--- Navigation -------------------------------------------------------
            CtKeyCode::Up => KeyCode::Up,
            CtKeyCode::Down => KeyCode::Down,
            CtKeyCode::Left => KeyCode::Left,
            CtKeyCode::Right => KeyCode::Right,
            CtKeyCode::Home => KeyCode::Home,
            CtKeyCode::End => KeyCode::End,
            CtKeyCode::PageUp => KeyCode::PageUp,
            CtKeyCode::PageDown => KeyCode::PageDown,

            //--- Function and character keys --------------------------------------
            CtKeyCode::F(n) => KeyCode::F(n),
            CtKeyCode::Char(c) => KeyCode::Char(c),

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

impl From<CtModifiers> for Modifiers {
    fn from(modifiers: CtModifiers) -> Self {
        Self {
            shift: modifiers.contains(CtModifiers::SHIFT),
            ctrl: modifiers.contains(CtModifiers::CONTROL),
            alt: modifiers.contains(CtModifiers::ALT),
        }
    }
}

/// Converts a key event; releases are dropped.
pub(crate) fn map_key(event: CtKeyEvent) -> Option<KeyEvent> {
    match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(KeyEvent::with_modifiers(
            KeyCode::from(event.code),
            Modifiers::from(event.modifiers),
        )),
        KeyEventKind::Release => None,
    }
}

//=== Full Event Conversion ===============================================
//
// Only keys and resizes reach the engine. Mouse, focus and paste events
// are ignored.
//

pub(crate) fn map_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(key) => map_key(key).map(Event::Key),
        CtEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

//=== Color Conversion ====================================================
//
// Colors without a named ANSI counterpart are sent as RGB.
//

impl From<Color> for CtColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Reset => CtColor::Reset,
            Color::White => CtColor::White,
            Color::Black => CtColor::Black,
            Color::Gray => CtColor::Grey,
            Color::Red => CtColor::Red,
            Color::DarkRed => CtColor::DarkRed,
            Color::Green => CtColor::Green,
            Color::DarkGreen => CtColor::DarkGreen,
            Color::Blue => CtColor::Blue,
            Color::DarkBlue => CtColor::DarkBlue,
            Color::Yellow => CtColor::Yellow,
            Color::Pink => CtColor::Rgb { r: 255, g: 192, b: 203 },
            Color::LightGreen => CtColor::Rgb { r: 144, g: 238, b: 144 },
            Color::LightBlue => CtColor::Rgb { r: 173, g: 216, b: 230 },
            Color::Orange => CtColor::Rgb { r: 255, g: 165, b: 0 },
            Color::Purple => CtColor::Rgb { r: 128, g: 0, b: 128 },
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
