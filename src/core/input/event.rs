//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level keyboard events.
//
// This module abstracts away platform-specific input (Winit) into a
// small, engine-friendly format consumed by the action mapper.
//
// Responsibilities:
// - Represent keyboard inputs in a stable, portable way
// - Distinguish press and release edges
// - Keep OS key-repeat presses as individual events
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    ActionMapper (press/release → RaceAction)
//         ↓
//    RaceState input handlers
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Only the keys the racer can bind are listed; everything else is
/// reported as `Unidentified` and filtered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Letter Keys ------------------------------------------------------

    /// Restart key
    KeyR,

    //--- Special Keys -----------------------------------------------------

    /// Return/Enter key
    Enter,

    /// Spacebar
    Space,

    /// Escape key
    Escape,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the platform layer.
///
/// # Event Types
///
/// - **KeyDown**: key pressed. `repeat` is `true` for OS auto-repeat
///   presses while the key is held. Repeats still count as presses.
/// - **KeyUp**: key released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down (or auto-repeated while held).
    KeyDown { key: KeyCode, repeat: bool },

    /// Key released.
    KeyUp { key: KeyCode },
}

impl InputEvent {
    /// Creates a fresh (non-repeat) press.
    pub const fn press(key: KeyCode) -> Self {
        Self::KeyDown { key, repeat: false }
    }

    /// Creates a release.
    pub const fn release(key: KeyCode) -> Self {
        Self::KeyUp { key }
    }

    /// Returns the key this event refers to.
    pub const fn key(&self) -> KeyCode {
        match *self {
            Self::KeyDown { key, .. } | Self::KeyUp { key } => key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
