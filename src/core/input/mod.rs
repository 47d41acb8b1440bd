//=========================================================================
// Input System
//
// High-level interface for input handling on the logic thread.
// Turns batches of raw keyboard events into an ordered list of race
// actions each tick.
//
// Responsibilities:
// - Own the key → action bindings
// - Translate every batch received this tick, preserving arrival order
// - Expose the actions produced during the last update
//
// Notes:
// This system is owned by the RaceSession. It never touches race state
// directly; the session applies the produced actions.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub(crate) mod action_mapper;
pub mod event;

//=== Public API ==========================================================

pub use action::RaceAction;
pub use action_mapper::Edge;
pub use event::{InputEvent, KeyCode};

//=== Internal Imports ====================================================

use action_mapper::ActionMapper;

//=== External Crates =====================================================

use log::trace;

//=== InputSystem =========================================================

/// Converts raw input batches into race actions.
pub struct InputSystem {
    mapper: ActionMapper,
    actions: Vec<RaceAction>,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates an input system with the standard racer bindings.
    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::with_default_bindings(),
            actions: Vec::with_capacity(8),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key edge to an action.
    pub fn bind(&mut self, key: KeyCode, edge: Edge, action: RaceAction) {
        self.mapper.bind(key, edge, action);
    }

    /// Removes the binding for a key edge.
    pub fn unbind(&mut self, key: KeyCode, edge: Edge) {
        self.mapper.unbind(key, edge);
    }

    //--- process_frame() --------------------------------------------------
    //
    // Consumes all input batches received during the current tick and
    // replaces the action list with what they map to, in order.
    //
    pub fn process_frame(&mut self, input_batches: &[Vec<InputEvent>]) {
        self.actions.clear();

        for event in input_batches.iter().flatten() {
            if let Some(action) = self.mapper.map_event(event) {
                self.actions.push(action);
            }
        }

        if !self.actions.is_empty() {
            trace!("Actions this tick: {:?}", self.actions);
        }
    }

    //--- Query Methods ----------------------------------------------------

    pub fn binding_count(&self) -> usize {
        self.mapper.len()
    }

    /// Actions produced by the last [`InputSystem::process_frame`].
    pub fn actions(&self) -> &[RaceAction] {
        &self.actions
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_are_flattened_in_order() {
        let mut system = InputSystem::new();

        let batches = vec![
            vec![InputEvent::press(KeyCode::Enter)],
            vec![
                InputEvent::press(KeyCode::ArrowLeft),
                InputEvent::press(KeyCode::ArrowUp),
                InputEvent::release(KeyCode::ArrowUp),
            ],
        ];
        system.process_frame(&batches);

        assert_eq!(
            system.actions(),
            &[
                RaceAction::Begin,
                RaceAction::LaneLeft,
                RaceAction::BoostPressed,
                RaceAction::BoostReleased,
            ]
        );
    }

    #[test]
    fn unmapped_events_are_dropped() {
        let mut system = InputSystem::new();
        system.process_frame(&[vec![
            InputEvent::press(KeyCode::Escape),
            InputEvent::release(KeyCode::Enter),
        ]]);

        assert!(system.actions().is_empty());
    }

    #[test]
    fn actions_reset_every_frame() {
        let mut system = InputSystem::new();
        system.process_frame(&[vec![InputEvent::press(KeyCode::KeyR)]]);
        assert_eq!(system.actions().len(), 1);

        system.process_frame(&[]);
        assert!(system.actions().is_empty());
    }

    #[test]
    fn repeated_presses_each_produce_an_action() {
        let mut system = InputSystem::new();
        system.process_frame(&[vec![
            InputEvent::press(KeyCode::ArrowUp),
            InputEvent::KeyDown { key: KeyCode::ArrowUp, repeat: true },
            InputEvent::KeyDown { key: KeyCode::ArrowUp, repeat: true },
        ]]);

        assert_eq!(system.actions(), &[RaceAction::BoostPressed; 3]);
    }

    #[test]
    fn custom_binding_is_used() {
        let mut system = InputSystem::new();
        system.bind(KeyCode::Space, Edge::Press, RaceAction::BoostPressed);
        system.unbind(KeyCode::ArrowUp, Edge::Press);

        system.process_frame(&[vec![
            InputEvent::press(KeyCode::Space),
            InputEvent::press(KeyCode::ArrowUp),
        ]]);

        assert_eq!(system.actions(), &[RaceAction::BoostPressed]);
        assert_eq!(system.binding_count(), 6);
    }
}
