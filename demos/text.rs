//=========================================================================
// Text Demo
//=========================================================================
//
// Plain text with and without its own colors, plus two composed text
// entities: one cycling through color pairs, one whose letters bob up
// and down on alternate beats.
//
//   cargo run --example text
//
//=========================================================================

use std::any::Any;

use terminus::prelude::*;

const BEAT: f64 = 0.5;

//=== Color Cycling Text ==================================================

struct CyclingText {
    text: Text,
    palette: Vec<(Color, Color)>,
    index: usize,
    elapsed: f64,
}

impl CyclingText {
    fn new(x: i32, y: i32, text: &str, palette: Vec<(Color, Color)>) -> Self {
        let mut text = Text::new(x, y, text);
        if let Some(&(fg, bg)) = palette.first() {
            text = text.with_colors(fg, bg);
        }

        Self {
            text,
            palette,
            index: 0,
            elapsed: 0.0,
        }
    }
}

impl Entity for CyclingText {
    fn update(&mut self, _ctx: &mut Context, delta: f64) {
        self.elapsed += delta;
        if self.elapsed <= BEAT || self.palette.is_empty() {
            return;
        }

        self.index = (self.index + 1) % self.palette.len();
        let (fg, bg) = self.palette[self.index];
        self.text.base_mut().set_colors(Some(fg), Some(bg));
        self.elapsed = 0.0;
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.text.draw(canvas);
    }

    fn is_dirty(&self) -> bool {
        self.text.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.text.mark_clean();
    }

    fn base(&self) -> &EntityBase {
        self.text.base()
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        self.text.base_mut()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Dancing Text ========================================================

struct DancingText {
    text: Text,
    phase: usize,
    elapsed: f64,
}

impl DancingText {
    fn new(x: i32, y: i32, text: &str) -> Self {
        Self {
            text: Text::new(x, y, text),
            phase: 0,
            elapsed: 0.0,
        }
    }
}

impl Entity for DancingText {
    fn init(&mut self, _ctx: &mut Context) {
        // Room for the letters to drop one row.
        self.text.group_mut().set_height(2);

        for (i, letter) in self.text.group_mut().children_mut().iter_mut().enumerate() {
            if i % 2 == 0 {
                letter.base_mut().translate(0, 1);
            }
        }
        self.phase = 1;
    }

    fn update(&mut self, _ctx: &mut Context, delta: f64) {
        self.elapsed += delta;
        if self.elapsed <= BEAT {
            return;
        }

        let phase = self.phase;
        for (i, letter) in self.text.group_mut().children_mut().iter_mut().enumerate() {
            let dy = if i % 2 == phase { 1 } else { -1 };
            letter.base_mut().translate(0, dy);
        }

        self.phase = 1 - phase;
        self.elapsed = 0.0;
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.text.draw(canvas);
    }

    fn is_dirty(&self) -> bool {
        self.text.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.text.mark_clean();
    }

    fn base(&self) -> &EntityBase {
        self.text.base()
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        self.text.base_mut()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Entry Point =========================================================

fn main() -> Result<(), GameError> {
    let mut scene = SceneBase::with_colors(Color::Black, Color::Gray);

    scene.add(Text::new(2, 2, "Press ESC to quit").with_colors(Color::White, Color::Black));
    scene.add(Text::new(5, 5, "Hello World"));
    scene.add(CyclingText::new(
        10,
        10,
        "Color Changing",
        vec![
            (Color::DarkBlue, Color::Green),
            (Color::Black, Color::Gray),
            (Color::DarkRed, Color::White),
            (Color::White, Color::Black),
        ],
    ));
    scene.add(DancingText::new(20, 20, "MovingText"));

    let mut game = GameBuilder::new().build(TerminalDisplay::new());
    game.init(vec![Box::new(scene)])?;
    game.start()
}
