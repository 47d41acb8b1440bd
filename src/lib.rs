//=========================================================================
// Lane Racer: Library Root
//
// A three-lane arcade racer: dodge traffic, cross the finish line, and
// coast to a stop without crashing.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the simulation (`core::race`) and renderer (`render`) so they
//   can be driven headless
// - Keep the winit/pixels window layer (`platform`) private
//
// Typical usage:
// ```no_run
// use lane_racer::Engine;
//
// fn main() {
//     Engine::new().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs on the logic thread: race state,
// input mapping, audio, and the session that ties them together.
//
// `render` turns a race snapshot into pixels.
//
pub mod core;
pub mod prelude;
pub mod render;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the OS window, keyboard events, and the presentation
// surface. `engine` wires platform and logic thread together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, DEFAULT_CHANNEL_CAPACITY, DEFAULT_ENGINE_SOUND, DEFAULT_TPS};
