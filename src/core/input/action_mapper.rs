//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps keyboard edges to race actions based on configured bindings.
//
// Architecture:
//   (key, Edge) → HashMap → RaceAction
//
// Press and release bindings are kept apart so one key can carry an
// action on each edge (boost: press → BoostPressed, release → BoostReleased).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::RaceAction,
    event::{InputEvent, KeyCode},
};

//=== Edge ================================================================

/// Which key transition a binding reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Press,
    Release,
}

//=== ActionMapper ========================================================

/// Maps input events to actions via `(key, edge)` lookups.
pub(crate) struct ActionMapper {
    bindings: HashMap<(KeyCode, Edge), RaceAction>,
}

impl ActionMapper {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Creates a mapper with the standard racer layout.
    ///
    /// ```text
    /// Enter      press   → Begin
    /// ArrowLeft  press   → LaneLeft
    /// ArrowRight press   → LaneRight
    /// ArrowUp    press   → BoostPressed
    /// ArrowUp    release → BoostReleased
    /// R          press   → Restart
    /// ```
    pub(crate) fn with_default_bindings() -> Self {
        let mut mapper = Self::new();
        mapper.bind(KeyCode::Enter, Edge::Press, RaceAction::Begin);
        mapper.bind(KeyCode::ArrowLeft, Edge::Press, RaceAction::LaneLeft);
        mapper.bind(KeyCode::ArrowRight, Edge::Press, RaceAction::LaneRight);
        mapper.bind(KeyCode::ArrowUp, Edge::Press, RaceAction::BoostPressed);
        mapper.bind(KeyCode::ArrowUp, Edge::Release, RaceAction::BoostReleased);
        mapper.bind(KeyCode::KeyR, Edge::Press, RaceAction::Restart);
        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key edge to an action, replacing any previous binding.
    pub(crate) fn bind(&mut self, key: KeyCode, edge: Edge, action: RaceAction) {
        self.bindings.insert((key, edge), action);
    }

    /// Removes the binding for a key edge.
    pub(crate) fn unbind(&mut self, key: KeyCode, edge: Edge) {
        self.bindings.remove(&(key, edge));
    }

    /// Number of active bindings.
    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps an input event to an action.
    ///
    /// Auto-repeat presses resolve like fresh presses.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<RaceAction> {
        let binding_key = match *event {
            InputEvent::KeyDown { key, .. } => (key, Edge::Press),
            InputEvent::KeyUp { key } => (key, Edge::Release),
        };
        self.bindings.get(&binding_key).copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
