//=========================================================================
// Lane Racer Engine
//
// Main entry point: configures and runs the game.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ creates the winit event loop
//         ├─ with_channel_capacity() ├─ spawns the logic thread
//         ├─ with_engine_sound()     ├─ runs the platform
//         └─ without_sound()         └─ blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use winit::event_loop::EventLoop;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== Defaults ============================================================

/// Logic ticks per second (20 ms per tick).
pub const DEFAULT_TPS: f64 = 50.0;

/// Platform → core channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 128;

/// Engine loop clip, relative to the working directory.
pub const DEFAULT_ENGINE_SOUND: &str = "assets/engine.wav";

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 50.0
/// - **Channel capacity**: 128 events
/// - **Engine sound**: `assets/engine.wav`
///
/// # Examples
///
/// ```no_run
/// use lane_racer::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_tps(60.0)
///     .with_engine_sound("sounds/v8.wav")
///     .build()
///     .run();
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    engine_sound: Option<PathBuf>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: DEFAULT_TPS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            engine_sound: Some(PathBuf::from(DEFAULT_ENGINE_SOUND)),
        }
    }

    /// Sets the simulation rate of the logic thread.
    ///
    /// Every gameplay constant is tuned per tick, so changing this also
    /// changes how fast the race plays.
    ///
    /// # Panics
    ///
    /// Panics if `tps` is not a positive finite number.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0 && tps.is_finite(), "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Loops the clip at `path` while racing.
    pub fn with_engine_sound(mut self, path: impl Into<PathBuf>) -> Self {
        self.engine_sound = Some(path.into());
        self
    }

    /// Disables audio entirely.
    pub fn without_sound(mut self) -> Self {
        self.engine_sound = None;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, sound: {:?})",
            self.tps, self.channel_capacity, self.engine_sound
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.engine_sound),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Game runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► RaceSession: input → tick → audio
///   │
///   └─► Platform (Event Loop)
///         └─► Window, keyboard, pixels surface
///
/// Platform → core: crossbeam channel (PlatformEvent)
/// Core → platform: EventLoopProxy (CoreEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
}

impl Engine {
    /// Engine with default settings.
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    //--- Execution --------------------------------------------------------

    /// Starts the game and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the winit event loop and its proxy
    /// 2. Creates the bounded channel for platform → core events
    /// 3. Spawns the logic thread at the configured TPS
    /// 4. Runs the platform event loop (blocks here)
    /// 5. Joins the logic thread
    ///
    /// Fatal platform errors are logged, not returned.
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        if let Err(e) = self.run_inner() {
            error!("Platform error: {}", e);
        }

        info!("Engine shutdown complete");
    }

    fn run_inner(self) -> Result<(), PlatformError> {
        //--- 1. Create the event loop -------------------------------------
        let event_loop = EventLoop::<CoreEvent>::with_user_event()
            .build()
            .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
        let proxy = event_loop.create_proxy();

        //--- 2. Create communication channel ------------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 3. Spawn the core logic thread -------------------------------
        let core_handle = self
            .orchestrator
            .spawn_core_thread(rx, proxy, self.tps)
            .map_err(|e| PlatformError::ThreadSpawn(e.to_string()))?;
        info!("Core logic thread spawned");

        //--- 4. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx);
        let result = platform.run(event_loop);

        info!("Platform event loop exited");

        //--- 5. Cleanup: Wait for logic thread to terminate ---------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        result
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
