//=========================================================================
// Entity Groups Demo
//=========================================================================
//
// A 5x5 group of sprites drifts right once a second and wraps at the
// screen edge. Each step also moves the first child inside the group;
// children outside the group's bounds are clipped.
//
//   cargo run --example entity_groups
//
//=========================================================================

use std::any::Any;

use terminus::prelude::*;

//=== Drifter =============================================================

struct Drifter {
    group: EntityGroup,
    elapsed: f64,
}

impl Drifter {
    fn new(group: EntityGroup) -> Self {
        Self { group, elapsed: 0.0 }
    }
}

impl Entity for Drifter {
    fn init(&mut self, ctx: &mut Context) {
        self.group.init(ctx);
    }

    fn update(&mut self, ctx: &mut Context, delta: f64) {
        self.elapsed += delta;

        if self.elapsed >= 1.0 {
            // The whole group moves as one entity.
            self.group.base_mut().translate(1, 0);

            if let Some(first) = self.group.children_mut().first_mut() {
                first.base_mut().set_position(5, 5);
            }
            self.elapsed = 0.0;
        }

        let (width, _) = ctx.screen_size();
        if self.group.base().x() >= width {
            let y = self.group.base().y();
            self.group.base_mut().set_position(0, y);
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.group.draw(canvas);
    }

    fn is_dirty(&self) -> bool {
        self.group.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.group.mark_clean();
    }

    fn base(&self) -> &EntityBase {
        self.group.base()
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        self.group.base_mut()
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
    let layout = [
        (1, 1, '*'),
        (2, 1, '.'),
        (3, 1, '*'),
        (4, 1, '.'),
        (1, 2, '*'),
        (2, 5, '.'),
        (3, 3, '*'),
        (4, 3, '.'),
    ];
    let sprites: Vec<Box<dyn Entity>> = layout
        .into_iter()
        .map(|(x, y, glyph)| Box::new(EntityBase::with_sprite(x, y, glyph)) as Box<dyn Entity>)
        .collect();

    let mut scene = SceneBase::with_colors(Color::Black, Color::Gray);
    scene.add(Drifter::new(EntityGroup::new(10, 10, 5, 5, sprites)));
    scene.add(Text::new(2, 2, "Press ESC to quit").with_colors(Color::White, Color::Black));

    let mut game = GameBuilder::new().build(TerminalDisplay::new());
    game.init(vec![Box::new(scene)])?;
    game.start()
}
