//=========================================================================
// Scene Base
//=========================================================================
//
// Ordered entity collection with dirty-redraw tracking.
//
// Entities are initialized, updated and drawn in the order they were
// added; removal never reorders the survivors. Drawing is skipped
// entirely while nothing visible has changed.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::canvas::Canvas;
use crate::core::context::Context;
use crate::core::entity::{Entity, EntityId, SceneBinding, SceneId};
use crate::core::platform_bridge::{Display, DisplayError};
use crate::core::style::{Color, Style};

//=== Slot ================================================================

struct Slot {
    id: EntityId,
    initialized: bool,
    entity: Box<dyn Entity>,
}

impl Slot {
    fn ensure_init(&mut self, ctx: &mut Context) {
        if !self.initialized {
            self.entity.init(ctx);
            self.initialized = true;
        }
    }
}

//=== SceneBase ===========================================================

/// The default scene: colors, entities and the redraw flag.
///
/// Custom scenes hold one of these and return it from
/// [`Scene::base`] / [`Scene::base_mut`].
pub struct SceneBase {
    id: SceneId,
    foreground: Color,
    background: Color,
    style: Style,
    entities: Vec<Slot>,
    redraw: bool,
    set_up: bool,
}

impl SceneBase {
    //--- Construction -----------------------------------------------------

    /// Creates a white-on-black scene.
    pub fn new() -> Self {
        Self::with_colors(Color::White, Color::Black)
    }

    /// Creates a scene with custom default colors.
    pub fn with_colors(foreground: Color, background: Color) -> Self {
        Self {
            id: SceneId::next(),
            foreground,
            background,
            style: Style::new(foreground, background),
            entities: Vec::new(),
            redraw: true,
            set_up: false,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    //--- Style ------------------------------------------------------------

    /// Style computed at the last `init`.
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn colors(&self) -> (Color, Color) {
        (self.foreground, self.background)
    }

    /// Changes the default colors; takes effect at the next `init`.
    pub fn set_colors(&mut self, foreground: Color, background: Color) {
        self.foreground = foreground;
        self.background = background;
        self.redraw = true;
    }

    //--- Lifecycle --------------------------------------------------------

    /// Recomputes the style, pushes it to the display and forces a redraw.
    ///
    /// Runs every time the scene becomes active.
    pub fn init(&mut self, display: &mut dyn Display) {
        self.style = Style::new(self.foreground, self.background);
        display.set_style(self.style);
        self.redraw = true;
    }

    /// Draws every entity if anything changed since the last draw.
    ///
    /// Returns whether a frame was presented.
    pub fn draw(&mut self, display: &mut dyn Display) -> Result<bool, DisplayError> {
        if !self.needs_redraw() {
            return Ok(false);
        }

        let mut canvas = Canvas::new(display, self.style);
        for slot in &self.entities {
            slot.entity.draw(&mut canvas);
        }
        trace!("Scene {:?} drew {} glyphs", self.id, canvas.writes());

        display.show()?;
        display.clear();

        for slot in &mut self.entities {
            slot.entity.mark_clean();
        }
        self.redraw = false;

        Ok(true)
    }

    pub(crate) fn is_set_up(&self) -> bool {
        self.set_up
    }

    pub(crate) fn mark_set_up(&mut self) {
        self.set_up = true;
    }

    /// Runs `init` on every entity that has not been initialized yet.
    pub(crate) fn init_entities(&mut self, ctx: &mut Context) {
        for slot in &mut self.entities {
            slot.ensure_init(ctx);
        }
    }

    /// Updates every entity in insertion order.
    ///
    /// Entities added during this frame's scene update are initialized
    /// right before their first `update`.
    pub(crate) fn update_entities(&mut self, ctx: &mut Context, delta: f64) {
        for slot in &mut self.entities {
            slot.ensure_init(ctx);
            slot.entity.update(ctx, delta);
        }
    }

    //--- Entity Collection ------------------------------------------------

    /// Appends an entity and returns its id.
    pub fn add<E: Entity>(&mut self, entity: E) -> EntityId {
        self.add_boxed(Box::new(entity))
    }

    /// Appends an already boxed entity and returns its id.
    pub fn add_boxed(&mut self, mut entity: Box<dyn Entity>) -> EntityId {
        let id = EntityId::next();
        entity.add_to_scene(SceneBinding {
            scene: self.id,
            entity: id,
        });

        self.entities.push(Slot {
            id,
            initialized: false,
            entity,
        });
        self.redraw = true;

        debug!("Added entity {:?} to scene {:?}", id, self.id);
        id
    }

    /// Removes an entity, handing it back to the caller.
    ///
    /// Unknown ids are ignored.
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        let index = self.entities.iter().position(|slot| slot.id == id)?;

        let mut entity = self.entities.remove(index).entity;
        entity.remove_from_scene();
        self.redraw = true;

        debug!("Removed entity {:?} from scene {:?}", id, self.id);
        Some(entity)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|slot| slot.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity ids in update/draw order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|slot| slot.id)
    }

    /// Entities in update/draw order.
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> + '_ {
        self.entities.iter().map(|slot| slot.entity.as_ref())
    }

    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.entity.as_ref())
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity> {
        let slot = self.entities.iter_mut().find(|slot| slot.id == id)?;
        let entity: &mut dyn Entity = slot.entity.as_mut();
        Some(entity)
    }

    /// Typed lookup; `None` if absent or of another type.
    pub fn get<T: Entity>(&self, id: EntityId) -> Option<&T> {
        self.entity(id)?.as_any().downcast_ref::<T>()
    }

    /// Typed mutable lookup; `None` if absent or of another type.
    pub fn get_mut<T: Entity>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entity_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    //--- Redraw Tracking --------------------------------------------------

    /// True if the next `draw` will present a frame.
    pub fn needs_redraw(&self) -> bool {
        self.redraw || self.entities.iter().any(|slot| slot.entity.is_dirty())
    }

    /// Forces (or cancels) a redraw on the next frame.
    pub fn set_redraw(&mut self, redraw: bool) {
        self.redraw = redraw;
    }
}

impl Default for SceneBase {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene Implementation ================================================

impl Scene for SceneBase {
    fn base(&self) -> &SceneBase {
        self
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::core::entity::{EntityBase, Text};
    use crate::core::scene::SwitchQueue;
    use crate::platform::HeadlessDisplay;

    fn sprite(x: i32, y: i32, c: char) -> EntityBase {
        EntityBase::with_sprite(x, y, c)
    }

    fn glyphs(scene: &SceneBase) -> Vec<char> {
        scene
            .entities()
            .filter_map(|entity| entity.base().sprite())
            .collect()
    }

    //--- Redraw Invariant -------------------------------------------------

    #[test]
    fn new_scene_needs_redraw() {
        assert!(SceneBase::new().needs_redraw());
    }

    #[test]
    fn draw_clears_redraw_and_second_draw_is_silent() {
        let (mut display, probe) = HeadlessDisplay::new(20, 10);
        let mut scene = SceneBase::new();
        scene.add(sprite(1, 1, 'A'));

        assert!(scene.draw(&mut display).unwrap());
        assert!(!scene.needs_redraw());

        let before = probe.snapshot();
        assert!(!scene.draw(&mut display).unwrap());
        let after = probe.snapshot();

        assert_eq!(after.cell_writes, before.cell_writes, "No cell writes");
        assert_eq!(after.show_calls, before.show_calls, "No present");
        assert_eq!(after.clear_calls, before.clear_calls, "No clear");
    }

    #[test]
    fn add_and_remove_set_redraw() {
        let (mut display, _probe) = HeadlessDisplay::new(20, 10);
        let mut scene = SceneBase::new();
        scene.draw(&mut display).unwrap();

        let id = scene.add(sprite(0, 0, 'a'));
        assert!(scene.needs_redraw());

        scene.draw(&mut display).unwrap();
        scene.remove(id);
        assert!(scene.needs_redraw());
    }

    #[test]
    fn entity_mutations_set_redraw() {
        let (mut display, _probe) = HeadlessDisplay::new(20, 10);
        let mut scene = SceneBase::new();
        let id = scene.add(sprite(0, 0, 'a'));
        scene.draw(&mut display).unwrap();

        scene.get_mut::<EntityBase>(id).unwrap().set_position(3, 3);
        assert!(scene.needs_redraw(), "Position change");
        scene.draw(&mut display).unwrap();

        scene.get_mut::<EntityBase>(id).unwrap().set_sprite(Some('b'));
        assert!(scene.needs_redraw(), "Sprite change");
        scene.draw(&mut display).unwrap();

        scene
            .get_mut::<EntityBase>(id)
            .unwrap()
            .set_colors(Some(Color::Red), None);
        assert!(scene.needs_redraw(), "Color change");
        scene.draw(&mut display).unwrap();

        scene.set_colors(Color::Yellow, Color::Blue);
        assert!(scene.needs_redraw(), "Scene color change");
    }

    #[test]
    fn init_forces_redraw_and_pushes_style() {
        let (mut display, probe) = HeadlessDisplay::new(20, 10);
        let mut scene = SceneBase::with_colors(Color::Green, Color::Black);
        scene.draw(&mut display).unwrap();

        scene.init(&mut display);

        assert!(scene.needs_redraw());
        assert_eq!(scene.style(), Style::new(Color::Green, Color::Black));
        assert_eq!(probe.snapshot().style, Some(Style::new(Color::Green, Color::Black)));

        // Re-running init is harmless.
        scene.init(&mut display);
        assert_eq!(scene.style(), Style::new(Color::Green, Color::Black));
    }

    #[test]
    fn draw_presents_entities_then_clears() {
        let (mut display, probe) = HeadlessDisplay::new(20, 10);
        let mut scene = SceneBase::new();
        scene.add(sprite(1, 1, 'A'));
        scene.add(Text::new(0, 3, "hey"));

        scene.draw(&mut display).unwrap();

        assert_eq!(probe.shown_cell(1, 1).map(|c| c.0), Some('A'));
        assert_eq!(probe.shown_text(0, 3, 3), "hey");
        assert_eq!(probe.pending_cell(1, 1), None, "Back buffer cleared after show");
    }

    //--- Ordering ---------------------------------------------------------

    #[test]
    fn remove_preserves_relative_order() {
        for victim in 0..5 {
            let mut scene = SceneBase::new();
            let ids: Vec<EntityId> = "abcde"
                .chars()
                .enumerate()
                .map(|(i, c)| scene.add(sprite(i as i32, 0, c)))
                .collect();

            let removed = scene.remove(ids[victim]).unwrap();

            let mut expected: Vec<char> = "abcde".chars().collect();
            let gone = expected.remove(victim);
            assert_eq!(removed.base().sprite(), Some(gone));
            assert_eq!(glyphs(&scene), expected);
            assert_eq!(scene.ids().count(), 4);
        }
    }

    #[test]
    fn removing_absent_entity_is_noop() {
        let mut scene = SceneBase::new();
        let id = scene.add(sprite(0, 0, 'a'));
        scene.remove(id);

        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn removing_entity_of_other_scene_is_noop() {
        let mut first = SceneBase::new();
        let mut second = SceneBase::new();
        let id = first.add(sprite(0, 0, 'a'));
        second.add(sprite(0, 0, 'a'));

        assert!(second.remove(id).is_none());
        assert_eq!(second.len(), 1);
        assert!(first.contains(id));
    }

    //--- Binding ----------------------------------------------------------

    #[test]
    fn add_stamps_binding_and_remove_clears_it() {
        let mut scene = SceneBase::new();
        let id = scene.add(sprite(0, 0, 'a'));

        let entity = scene.entity(id).unwrap();
        assert_eq!(entity.base().id(), Some(id));
        assert_eq!(entity.base().scene(), Some(scene.id()));

        let removed = scene.remove(id).unwrap();
        assert_eq!(removed.base().id(), None);
    }

    #[test]
    fn equal_entities_keep_distinct_identity() {
        let mut scene = SceneBase::new();
        let a = scene.add(sprite(1, 1, 'x'));
        let b = scene.add(sprite(1, 1, 'x'));

        assert_ne!(a, b);
        scene.remove(a);
        assert!(scene.contains(b));
    }

    #[test]
    fn typed_lookup_rejects_other_types() {
        let mut scene = SceneBase::new();
        let id = scene.add(Text::new(0, 0, "t"));

        assert!(scene.get::<EntityBase>(id).is_none());
        assert_eq!(scene.get::<Text>(id).unwrap().text(), "t");
    }

    //--- Entity Lifecycle -------------------------------------------------

    #[test]
    fn entities_are_initialized_once() {
        struct Counter {
            base: EntityBase,
            inits: u32,
        }

        impl Entity for Counter {
            fn init(&mut self, _ctx: &mut Context) {
                self.inits += 1;
            }
            fn draw(&self, _canvas: &mut Canvas) {}
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

        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (10, 10), &mut queue);
        let mut scene = SceneBase::new();
        let id = scene.add(Counter {
            base: EntityBase::new(0, 0),
            inits: 0,
        });

        scene.init_entities(&mut ctx);
        scene.init_entities(&mut ctx);

        assert_eq!(scene.get::<Counter>(id).unwrap().inits, 1);
    }
}
