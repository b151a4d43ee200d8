//=========================================================================
// Style
//
// Closed color palette and the foreground/background pair used for
// every glyph written to the display.
//
// Notes:
// Colors are plain values. Backends translate them to whatever their
// terminal library understands (see `platform::event_mapper`).
//
//=========================================================================

//=== Color ===============================================================

/// Palette of colors understood by every display backend.
///
/// `Reset` means "whatever the terminal uses by default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Reset,
    White,
    Black,
    Gray,
    Red,
    Pink,
    DarkRed,
    Green,
    LightGreen,
    DarkGreen,
    Blue,
    LightBlue,
    DarkBlue,
    Orange,
    Purple,
    Yellow,
}

//=== Style ===============================================================

/// Foreground/background color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

impl Style {
    /// White on black, the default for new scenes.
    pub const DEFAULT: Self = Self {
        fg: Color::White,
        bg: Color::Black,
    };

    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Returns a copy with each set override replacing the matching color.
    pub fn patched(self, fg: Option<Color>, bg: Option<Color>) -> Self {
        Self {
            fg: fg.unwrap_or(self.fg),
            bg: bg.unwrap_or(self.bg),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_white_on_black() {
        assert_eq!(Style::default(), Style::new(Color::White, Color::Black));
    }

    #[test]
    fn patched_only_replaces_set_colors() {
        let base = Style::new(Color::White, Color::Black);

        assert_eq!(base.patched(None, None), base);
        assert_eq!(
            base.patched(Some(Color::Orange), None),
            Style::new(Color::Orange, Color::Black)
        );
        assert_eq!(
            base.patched(None, Some(Color::Blue)),
            Style::new(Color::White, Color::Blue)
        );
    }
}
