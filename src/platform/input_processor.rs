//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard events into engine InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Only physical key codes are used. Keys the racer has no name for
// (F-keys, media keys, exotic layouts) are filtered (returns None).
// OS auto-repeat is preserved as `repeat: true` on KeyDown.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit key events to InputEvents.
pub(crate) struct InputProcessor;

impl InputProcessor {
    /// Converts a Winit KeyEvent (filters unmapped keys).
    pub(crate) fn process_key_event(key_event: &KeyEvent) -> Option<InputEvent> {
        Self::convert(key_event.physical_key, key_event.state, key_event.repeat)
    }

    fn convert(physical_key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };

        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, repeat },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// The numpad Enter counts as Enter. Everything else without an engine
/// name becomes `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,

            WinitKeyCode::KeyR => KeyCode::KeyR,

            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
