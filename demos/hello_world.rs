//=========================================================================
// Hello World Demo
//=========================================================================
//
// One scene, two lines of text. The first overrides the scene colors,
// the second inherits them.
//
//   cargo run --example hello_world
//
//=========================================================================

use terminus::prelude::*;

fn main() -> Result<(), GameError> {
    let mut scene = SceneBase::with_colors(Color::Black, Color::Gray);
    scene.add(Text::new(2, 2, "Press ESC to quit").with_colors(Color::White, Color::Black));
    scene.add(Text::new(5, 5, "Hello World"));

    let mut game = GameBuilder::new().build(TerminalDisplay::new());
    game.init(vec![Box::new(scene)])?;
    game.start()
}
