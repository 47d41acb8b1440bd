//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the race logic thread.
//
// Architecture:
// ```text
//  Main Thread:                        Logic Thread:
//  ┌─────────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop           │    │  RaceSession         │
//  │   ↓                         │    │                      │
//  │  InputProcessor             │    │  InputSystem         │
//  │   ↓                         │    │  ↓                   │
//  │  InputBuffer                │    │  RaceState::tick     │
//  │   ↓                         │    │                      │
//  │  RedrawRequested (flush) ───┼───►│  EventCollector      │
//  │                             │    │                      │
//  │  user_event(Frame) ◄────────┼────┤  EventLoopProxy      │
//  │   ↓                         │    └──────────────────────┘
//  │  render_to(pixels frame)    │
//  │   ↓                         │
//  │  Pixels::render             │
//  └─────────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent atomically
//    → Latest race snapshot drawn and presented
//    → Empty buffers NOT sent
// ```
//
// Key Design Decisions:
// - **Snapshots drive redraws**: each CoreEvent::Frame requests one
//   redraw; the platform never renders on its own schedule
// - **Graceful channel disconnect**: If the logic thread dies, the
//   platform logs a warning and keeps running until the window closes
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::sync::Arc;

use crossbeam_channel::Sender;
use log::*;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::race::track::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::core::race::RaceState;
use crate::render::{self, Canvas};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window, presentation surface, and input aggregator.
///
/// Runs on the main thread and talks to the logic thread only through
/// the crossbeam sender (input out) and user events (frames in).
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(sender)`
/// 2. **Execution**: `platform.run(event_loop)` blocks until exit
/// 3. **Window**: created lazily in `resumed()`
/// 4. **Shutdown**: window close sends `WindowClosed`; a `Shutdown` from
///    the logic thread exits the loop
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    /// Pixel surface bound to the window.
    surface: Option<Pixels<'static>>,

    /// Buffers key events until frame boundary.
    buffer: InputBuffer,

    /// Channel to send events to the logic thread.
    event_sender: Sender<PlatformEvent>,

    /// Newest snapshot not yet drawn.
    pending: Option<RaceState>,

    /// Fatal error that ended the event loop.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            surface: None,
            buffer: InputBuffer::new(),
            event_sender,
            pending: None,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or the logic thread
    /// shuts down.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the loop fails or the window/surface
    /// could not be created.
    pub fn run(mut self, event_loop: EventLoop<CoreEvent>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input events to the logic thread.
    ///
    /// A disconnected channel drops the events with a warning so the
    /// window can still be closed normally.
    fn flush_input_buffer(&mut self) {
        if let Some(events) = self.buffer.drain() {
            let count = events.len();
            trace!(target: "platform::input", "Flushing {} key events", count);

            if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    count
                );
            }
        }
    }

    /// Records a message from the logic thread. Returns `false` once the
    /// logic thread has shut down.
    fn accept_core_event(&mut self, event: CoreEvent) -> bool {
        match event {
            CoreEvent::Frame(race) => {
                self.pending = Some(race);
                true
            }
            CoreEvent::Shutdown => {
                info!(target: "platform", "Logic thread shut down");
                false
            }
        }
    }

    /// Draws the pending snapshot (if any) and presents the surface.
    fn present(&mut self) -> Result<(), PlatformError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        if let Some(race) = self.pending.take() {
            let mut canvas = Canvas::new(surface.frame_mut(), SCREEN_WIDTH, SCREEN_HEIGHT);
            if let Err(e) = render::render_to(&race, &mut canvas) {
                match e {}
            }
        }

        surface
            .render()
            .map_err(|e| PlatformError::Surface(e.to_string()))
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title("Car Racing Game")
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .map(Arc::new)
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let surface = Pixels::new(SCREEN_WIDTH, SCREEN_HEIGHT, texture)
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        window.request_redraw();
        self.window = Some(window);
        self.surface = Some(surface);
        Ok(())
    }

    /// Stops the event loop after a fatal error and tells the logic thread.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        self.failure = Some(error);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<CoreEvent> for Platform {
    /// Creates the window and surface if they don't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            self.fail(event_loop, e);
        }
    }

    /// Receives race snapshots and shutdown notices from the logic thread.
    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: CoreEvent) {
        if !self.accept_core_event(event) {
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match InputProcessor::process_key_event(&key_event) {
                    Some(event) => self.buffer.push(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface.as_mut() {
                    if let Err(e) = surface.resize_surface(size.width, size.height) {
                        warn!(target: "platform", "Surface resize failed: {}", e);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Err(e) = self.present() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
