//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit platform thread and the race logic thread.
//
//   platform ──PlatformEvent (crossbeam)──► EventCollector ──► session
//   platform ◄──CoreEvent (EventLoopProxy)── FramePublisher ◄── session
//
// Components:
// - `interface`: event types, the publisher seam, and errors
// - `event_collector`: core-side bounded draining of platform events
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{CoreEvent, FramePublisher, PlatformError, PlatformEvent};
