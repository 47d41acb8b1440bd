//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lane_racer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Race simulation
pub use crate::core::race::{EngineSignal, Lane, Phase, RaceState};

// Input
pub use crate::core::input::{Edge, InputEvent, KeyCode, RaceAction};

// Audio
pub use crate::core::audio::{AudioPlayer, EngineSound, Silent};

// Session and rendering
pub use crate::core::session::RaceSession;
pub use crate::render::{render, render_to, Frame};
