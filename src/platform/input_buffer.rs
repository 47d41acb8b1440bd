//=========================================================================
// Input Buffer
//
// Collects key events between two frame boundaries on the platform
// thread.
//
// Responsibilities:
// - Store incoming key events in arrival order
// - Hand the whole frame over at once via `drain()`
//
// Notes:
// Nothing is deduplicated. Each OS auto-repeat press is its own boost
// bump, so identical consecutive presses must all reach the core.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    pub(crate) fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events and leaves the buffer empty, or None
    // when nothing was buffered.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.events))
    }

}

//=========================================================================
// Unit Tests
//=========================================================================
