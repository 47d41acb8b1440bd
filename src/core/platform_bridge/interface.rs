//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Message types exchanged between the platform and logic threads, the
// seam the logic thread publishes frames through, and platform errors.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use winit::event_loop::EventLoopProxy;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::race::RaceState;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlatformEvent {
    /// Key events buffered during one rendered frame, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from core to platform through the event loop proxy.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoreEvent {
    /// Snapshot of the race after a tick, ready to render.
    Frame(RaceState),

    /// Logic thread has stopped; the platform should exit.
    Shutdown,
}

//=== FramePublisher ======================================================

/// Outbound half of the bridge, owned by the logic thread.
///
/// Returns `false` once the receiving side is gone.
pub(crate) trait FramePublisher: Send {
    fn publish(&self, event: CoreEvent) -> bool;
}

impl FramePublisher for EventLoopProxy<CoreEvent> {
    fn publish(&self, event: CoreEvent) -> bool {
        self.send_event(event).is_ok()
    }
}

impl FramePublisher for Sender<CoreEvent> {
    fn publish(&self, event: CoreEvent) -> bool {
        self.send(event).is_ok()
    }
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),

    /// Window or render surface could not be created.
    Surface(String),

    /// Logic thread could not be spawned.
    ThreadSpawn(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::Surface(e) => write!(f, "Render surface error: {}", e),
            Self::ThreadSpawn(e) => write!(f, "Logic thread spawn failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================
