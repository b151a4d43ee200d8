//=========================================================================
// Input Event Types
//
// Engine-side representation of terminal input.
//
// This module abstracts away the terminal backend (crossterm, a headless
// test display, ...) into a small, portable set of events.
//
// Event Flow:
// ```text
// Display event source (input thread)
//         ↓
//    Event (this module)
//         ├─ Resize → shared screen size
//         └─ Key    → InputSlot (latest wins)
//                       ↓
//                  Game loop (one KeyEvent per frame)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Logical key identifier.
///
/// Printable keys arrive as `Char`; everything the engine treats
/// specially has its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Control Keys -----------------------------------------------------

    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Insert,

    //--- Navigation -------------------------------------------------------

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    //--- Function & Character Keys ----------------------------------------

    /// Function key `F1`..`F12` (number carried as-is).
    F(u8),

    /// Key producing a literal character.
    Char(char),

    /// Fallback for keys the backend could not map.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Terminals only report modifiers together with a key, so there is no
/// sticky modifier tracking here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Returns true if no modifier is held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

//=== KeyEvent ============================================================

/// A single key press delivered to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Literal character carried by the key, if any.
    pub fn rune(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

//=== Event ===============================================================

/// Raw event produced by a display's event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed (or auto-repeated).
    Key(KeyEvent),

    /// The terminal changed size (new width and height in cells).
    Resize { width: u16, height: u16 },

    /// Anything the engine does not consume (mouse, focus, paste, ...).
    Unidentified,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rune_only_for_char_keys() {
        assert_eq!(KeyEvent::new(KeyCode::Char('p')).rune(), Some('p'));
        assert_eq!(KeyEvent::new(KeyCode::Enter).rune(), None);
        assert_eq!(KeyEvent::new(KeyCode::F(3)).rune(), None);
    }

    #[test]
    fn key_events_compare_modifiers() {
        let plain = KeyEvent::new(KeyCode::Char('c'));
        let ctrl = KeyEvent::with_modifiers(KeyCode::Char('c'), Modifiers::CTRL);

        assert_ne!(plain, ctrl);
        assert_eq!(plain, KeyEvent::from(KeyCode::Char('c')));
    }

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert!(Modifiers::default().is_empty());
        assert!(!Modifiers::CTRL.is_empty());
    }
}
