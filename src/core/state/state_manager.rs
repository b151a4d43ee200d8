//=========================================================================
// State Manager
//=========================================================================
//
// Registers states by key and keeps exactly one of them current.
//
// States are stored in a HashMap by key, so each state keeps its own
// data between activations. The manager is generic over the owner `W`
// that the hooks are allowed to mutate (usually the scene's data).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::State;
use crate::core::context::Context;

//=== Transition ==========================================================

/// A change requested by a state's `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<K: StateKey> {
    /// Keep the current state.
    Stay,

    /// Switch to the given state.
    Change(K),

    /// Switch to the default state.
    BackToDefault,

    /// Switch to the state that was current before this one.
    BackToPrevious,
}

impl<K: StateKey> Default for Transition<K> {
    fn default() -> Self {
        Self::Stay
    }
}

//=== State Key Trait =====================================================

/// Marker trait for state identifiers.
///
/// Typically implemented by a small game-specific enum.
pub trait StateKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== State Manager =======================================================

/// Finite-state machine with a fixed default state.
///
/// Nothing is entered at construction; the first `update` enters the
/// default state before ticking it.
pub struct StateManager<K: StateKey, W: ?Sized> {
    states: HashMap<K, Box<dyn State<K, W>>>,
    current: Option<K>,
    previous: K,
    default: K,
}

impl<K: StateKey, W: ?Sized> StateManager<K, W> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager whose default state is `state`, registered as `key`.
    pub fn new<T>(key: K, state: T) -> Self
    where
        T: State<K, W> + 'static,
    {
        let mut states: HashMap<K, Box<dyn State<K, W>>> = HashMap::new();
        states.insert(key, Box::new(state));

        Self {
            states,
            current: None,
            previous: key,
            default: key,
        }
    }

    /// Registers another state.
    ///
    /// Registering an existing key replaces the stored state.
    pub fn register<T>(&mut self, key: K, state: T)
    where
        T: State<K, W> + 'static,
    {
        if self.states.insert(key, Box::new(state)).is_some() {
            warn!("State {:?} was already registered and has been replaced", key);
        }
    }

    /// Builder-style `register`.
    pub fn with_state<T>(mut self, key: K, state: T) -> Self
    where
        T: State<K, W> + 'static,
    {
        self.register(key, state);
        self
    }

    //--- Queries ----------------------------------------------------------

    /// The current state; `None` until something has been entered.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// The state that was current before the last change.
    ///
    /// Equals the default state until the first change away from it.
    pub fn previous(&self) -> K {
        self.previous
    }

    pub fn default_key(&self) -> K {
        self.default
    }

    pub fn is_registered(&self, key: K) -> bool {
        self.states.contains_key(&key)
    }

    //--- Transitions ------------------------------------------------------

    /// Leaves the current state (if any) and enters `next`.
    ///
    /// `on_exit` of the old state always runs before `on_enter` of the
    /// new one. Unregistered keys are ignored with a warning.
    pub fn change_state(&mut self, next: K, owner: &mut W, ctx: &mut Context) {
        if !self.states.contains_key(&next) {
            warn!("Attempted to change to unregistered state {:?}", next);
            return;
        }

        if let Some(current) = self.current {
            self.previous = current;
            if let Some(state) = self.states.get_mut(&current) {
                state.on_exit(owner, ctx);
            }
        }

        debug!("State change {:?} -> {:?}", self.current, next);
        self.current = Some(next);

        if let Some(state) = self.states.get_mut(&next) {
            state.on_enter(owner, ctx);
        }
    }

    pub fn back_to_default(&mut self, owner: &mut W, ctx: &mut Context) {
        self.change_state(self.default, owner, ctx);
    }

    pub fn back_to_previous(&mut self, owner: &mut W, ctx: &mut Context) {
        self.change_state(self.previous, owner, ctx);
    }

    //--- Update Loop ------------------------------------------------------

    /// Ticks the current state and applies the transition it returns.
    ///
    /// Enters the default state first if nothing was ever entered.
    pub fn update(&mut self, owner: &mut W, ctx: &mut Context, delta: f64) {
        let current = match self.current {
            Some(current) => current,
            None => {
                debug!("Entering default state {:?}", self.default);
                self.change_state(self.default, owner, ctx);
                self.default
            }
        };

        let transition = match self.states.get_mut(&current) {
            Some(state) => state.tick(owner, ctx, delta),
            None => Transition::Stay,
        };

        self.apply(transition, owner, ctx);
    }

    fn apply(&mut self, transition: Transition<K>, owner: &mut W, ctx: &mut Context) {
        match transition {
            Transition::Stay => {}
            Transition::Change(next) => self.change_state(next, owner, ctx),
            Transition::BackToDefault => self.back_to_default(owner, ctx),
            Transition::BackToPrevious => self.back_to_previous(owner, ctx),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SwitchQueue;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Mode {
        A,
        B,
        C,
    }

    impl StateKey for Mode {}

    /// Records every hook call into the owner's journal.
    struct Journaled {
        name: &'static str,
        next: Transition<Mode>,
    }

    impl Journaled {
        fn staying(name: &'static str) -> Self {
            Self {
                name,
                next: Transition::Stay,
            }
        }
    }

    impl State<Mode, Vec<String>> for Journaled {
        fn on_enter(&mut self, journal: &mut Vec<String>, _ctx: &mut Context) {
            journal.push(format!("{}.enter", self.name));
        }

        fn on_exit(&mut self, journal: &mut Vec<String>, _ctx: &mut Context) {
            journal.push(format!("{}.exit", self.name));
        }

        fn tick(
            &mut self,
            journal: &mut Vec<String>,
            _ctx: &mut Context,
            _delta: f64,
        ) -> Transition<Mode> {
            journal.push(format!("{}.tick", self.name));
            std::mem::take(&mut self.next)
        }
    }

    fn manager() -> StateManager<Mode, Vec<String>> {
        StateManager::new(Mode::A, Journaled::staying("A"))
            .with_state(Mode::B, Journaled::staying("B"))
            .with_state(Mode::C, Journaled::staying("C"))
    }

    //--- Transition Tests -------------------------------------------------

    #[test]
    fn transition_default_is_stay() {
        assert_eq!(Transition::<Mode>::default(), Transition::Stay);
    }

    #[test]
    fn exit_runs_before_enter() {
        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (80, 24), &mut queue);
        let mut journal = Vec::new();
        let mut states = manager();

        states.change_state(Mode::A, &mut journal, &mut ctx);
        states.change_state(Mode::B, &mut journal, &mut ctx);

        assert_eq!(journal, ["A.enter", "A.exit", "B.enter"]);
        assert_eq!(states.current(), Some(Mode::B));
        assert_eq!(states.previous(), Mode::A);
    }

    #[test]
    fn first_change_has_no_exit() {
        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (80, 24), &mut queue);
        let mut journal = Vec::new();
        let mut states = manager();

        states.change_state(Mode::C, &mut journal, &mut ctx);

        assert_eq!(journal, ["C.enter"]);
        assert_eq!(states.previous(), Mode::A, "Previous starts at the default");
    }

    //--- Lazy Default Entry -----------------------------------------------

    #[test]
    fn default_is_entered_on_first_update_only() {
        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (80, 24), &mut queue);
        let mut journal = Vec::new();
        let mut states = manager();
        assert_eq!(states.current(), None);

        states.update(&mut journal, &mut ctx, 0.016);
        states.update(&mut journal, &mut ctx, 0.016);

        assert_eq!(journal, ["A.enter", "A.tick", "A.tick"]);
        assert_eq!(states.current(), Some(Mode::A));
    }

    #[test]
    fn update_after_explicit_change_skips_default() {
        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (80, 24), &mut queue);
        let mut journal = Vec::new();
        let mut states = manager();

        states.change_state(Mode::B, &mut journal, &mut ctx);
        states.update(&mut journal, &mut ctx, 0.016);

        assert_eq!(journal, ["B.enter", "B.tick"]);
    }

    //--- Back Navigation --------------------------------------------------

    #[test]
    fn back_to_previous_and_default() {
        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (80, 24), &mut queue);
        let mut journal = Vec::new();
        let mut states = manager();

        states.change_state(Mode::B, &mut journal, &mut ctx);
        states.change_state(Mode::C, &mut journal, &mut ctx);
        states.back_to_previous(&mut journal, &mut ctx);

        assert_eq!(states.current(), Some(Mode::B));
        assert_eq!(states.previous(), Mode::C);

        states.back_to_default(&mut journal, &mut ctx);
        assert_eq!(states.current(), Some(Mode::A));
        assert_eq!(states.previous(), Mode::B);
    }

    #[test]
    fn tick_transitions_are_applied() {
        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (80, 24), &mut queue);
        let mut journal = Vec::new();
        let mut states = StateManager::new(
            Mode::A,
            Journaled {
                name: "A",
                next: Transition::Change(Mode::B),
            },
        )
        .with_state(
            Mode::B,
            Journaled {
                name: "B",
                next: Transition::BackToPrevious,
            },
        );

        states.update(&mut journal, &mut ctx, 0.0);
        assert_eq!(states.current(), Some(Mode::B));

        states.update(&mut journal, &mut ctx, 0.0);
        assert_eq!(states.current(), Some(Mode::A));

        assert_eq!(
            journal,
            ["A.enter", "A.tick", "A.exit", "B.enter", "B.tick", "B.exit", "A.enter"]
        );
    }

    #[test]
    fn unregistered_state_is_ignored() {
        let mut queue = SwitchQueue::new();
        let mut ctx = Context::new(None, (80, 24), &mut queue);
        let mut journal = Vec::new();
        let mut states: StateManager<Mode, Vec<String>> =
            StateManager::new(Mode::A, Journaled::staying("A"));

        states.change_state(Mode::A, &mut journal, &mut ctx);
        states.change_state(Mode::B, &mut journal, &mut ctx);

        assert_eq!(journal, ["A.enter"]);
        assert_eq!(states.current(), Some(Mode::A));
        assert!(!states.is_registered(Mode::B));
    }

    #[test]
    fn states_can_request_scene_switches() {
        struct Leaver;

        impl State<Mode, ()> for Leaver {
            fn tick(&mut self, _owner: &mut (), ctx: &mut Context, _delta: f64) -> Transition<Mode> {
                ctx.next_scene();
                Transition::Stay
            }
        }

        let mut queue = SwitchQueue::new();
        {
            let mut ctx = Context::new(None, (80, 24), &mut queue);
            let mut states: StateManager<Mode, ()> = StateManager::new(Mode::A, Leaver);
            states.update(&mut (), &mut ctx, 0.0);
        }

        assert_eq!(queue.len(), 1);
    }
}
