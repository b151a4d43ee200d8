//=========================================================================
// Pause Demo
//=========================================================================
//
// Two scenes: a title screen and a playfield with a movable '@' that
// bumps into a walled box. The playfield runs a two-state machine:
//
//   Running ──'p'──> Paused ──'p'──> Running
//
// Controls: arrows move, 'p' pauses, Enter starts, Backspace returns to
// the title, Esc quits. Logs go to `terminus.log` next to the binary.
//
//   cargo run --example pause
//
//=========================================================================

use std::any::Any;

use log::info;
use terminus::prelude::*;

//=== Title Scene =========================================================

struct Title {
    base: SceneBase,
}

impl Title {
    fn new() -> Self {
        Self {
            base: SceneBase::with_colors(Color::Yellow, Color::DarkBlue),
        }
    }
}

impl Scene for Title {
    fn setup(&mut self, _ctx: &mut Context) {
        self.base.add(Text::new(4, 2, "terminus"));
        self.base.add(Text::new(4, 4, "Press Enter to play, Esc to quit"));
    }

    fn update(&mut self, ctx: &mut Context, _delta: f64) {
        if ctx.pressed(KeyCode::Enter) {
            ctx.next_scene();
        }
    }

    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }
}

//=== Mover ===============================================================

/// Arrow-key controlled glyph that wraps around the screen edges.
struct Mover {
    base: EntityBase,
    walls: Vec<EntityBase>,
    frozen: bool,
}

impl Mover {
    fn new(x: i32, y: i32, walls: Vec<EntityBase>) -> Self {
        Self {
            base: EntityBase::with_sprite(x, y, '@').with_colors(Color::LightGreen, Color::Black),
            walls,
            frozen: false,
        }
    }

    fn wrap(&mut self, (width, height): (i32, i32)) {
        let (x, y) = self.base.position();
        let x = if x >= width { 0 } else if x < 0 { width - 1 } else { x };
        let y = if y >= height { 0 } else if y < 0 { height - 1 } else { y };
        self.base.set_position(x, y);
    }
}

impl Entity for Mover {
    fn update(&mut self, ctx: &mut Context, _delta: f64) {
        if self.frozen {
            return;
        }

        let (dx, dy) = match ctx.key() {
            Some(KeyCode::Left) => (-1, 0),
            Some(KeyCode::Right) => (1, 0),
            Some(KeyCode::Up) => (0, -1),
            Some(KeyCode::Down) => (0, 1),
            _ => (0, 0),
        };

        let blocked = self.walls.iter().any(|wall| self.base.would_collide(dx, dy, wall));
        if !blocked {
            self.base.translate(dx, dy);
        }

        self.wrap(ctx.screen_size());
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.base.draw(canvas);
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Playfield ===========================================================

/// Scene data the play states operate on.
struct Playfield {
    base: SceneBase,
    player: Option<EntityId>,
    pause_label: Option<EntityId>,
}

impl Playfield {
    fn set_frozen(&mut self, frozen: bool) {
        if let Some(mover) = self.player.and_then(|id| self.base.get_mut::<Mover>(id)) {
            mover.frozen = frozen;
        }
    }
}

//=== States ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Mode {
    Running,
    Paused,
}

impl StateKey for Mode {}

struct Running;

impl State<Mode, Playfield> for Running {
    fn tick(&mut self, _field: &mut Playfield, ctx: &mut Context, _delta: f64) -> Transition<Mode> {
        match ctx.input().and_then(KeyEvent::rune) {
            Some('p') => Transition::Change(Mode::Paused),
            _ => {
                if ctx.pressed(KeyCode::Backspace) {
                    ctx.prev_scene();
                }
                Transition::Stay
            }
        }
    }
}

struct Paused;

impl State<Mode, Playfield> for Paused {
    fn on_enter(&mut self, field: &mut Playfield, ctx: &mut Context) {
        let (width, height) = ctx.screen_size();
        let label = Text::new(width / 2 - 3, height / 2, "PAUSED").with_colors(Color::Black, Color::Yellow);

        field.pause_label = Some(field.base.add(label));
        field.set_frozen(true);
        info!("Paused");
    }

    fn on_exit(&mut self, field: &mut Playfield, _ctx: &mut Context) {
        if let Some(label) = field.pause_label.take() {
            field.base.remove(label);
        }
        field.set_frozen(false);
        info!("Resumed");
    }

    fn tick(&mut self, _field: &mut Playfield, ctx: &mut Context, _delta: f64) -> Transition<Mode> {
        match ctx.input().and_then(KeyEvent::rune) {
            Some('p') => Transition::BackToPrevious,
            _ => Transition::Stay,
        }
    }
}

//=== Play Scene ==========================================================

struct Play {
    field: Playfield,
    states: StateManager<Mode, Playfield>,
}

impl Play {
    fn new() -> Self {
        Self {
            field: Playfield {
                base: SceneBase::new(),
                player: None,
                pause_label: None,
            },
            states: StateManager::new(Mode::Running, Running).with_state(Mode::Paused, Paused),
        }
    }
}

impl Scene for Play {
    fn setup(&mut self, _ctx: &mut Context) {
        let mut walls = Vec::new();
        for y in 5..10 {
            for x in 25..30 {
                let edge = x == 25 || x == 29 || y == 5 || y == 9;
                let wall = if edge {
                    EntityBase::with_sprite(x, y, '#')
                } else {
                    EntityBase::with_sprite(x, y, '*').with_colors(Color::Orange, Color::Black)
                };
                walls.push(wall.clone());
                self.field.base.add(wall);
            }
        }

        self.field.player = Some(self.field.base.add(Mover::new(2, 2, walls)));
        self.field.base.add(Text::new(0, 0, "Arrows move, p pauses, Backspace for title, Esc quits"));
    }

    fn update(&mut self, ctx: &mut Context, delta: f64) {
        self.states.update(&mut self.field, ctx, delta);
    }

    fn base(&self) -> &SceneBase {
        &self.field.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.field.base
    }
}

//=== Entry Point =========================================================

fn main() -> Result<(), GameError> {
    let mut game = GameBuilder::new()
        .with_fps(30.0)
        .with_log_file("terminus.log")
        .build(TerminalDisplay::new());

    game.init(vec![Box::new(Title::new()), Box::new(Play::new())])?;
    game.start()
}
