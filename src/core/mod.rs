//=========================================================================
// Core Systems Orchestrator
//
// Runs the race on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the RaceSession exclusively for the lifetime of the thread
// - Receive platform events via the crossbeam channel
// - Tick the race at a fixed rate (TPS)
// - Publish a snapshot of the race to the platform after every tick
//
// Notes:
// The orchestrator never touches the window. Communication with the
// platform happens only through message passing, in both directions.
// The audio device is opened on this thread because rodio streams
// cannot move between threads.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod audio;
pub mod input;
pub(crate) mod platform_bridge;
pub mod race;
pub mod session;

//=== Standard Library Imports ============================================

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Modules ====================================================

use platform_bridge::{CoreEvent, EventCollector, FramePublisher, PlatformEvent, TickControl};
use session::RaceSession;

//=== CoreSystemsOrchestrator =============================================
//
// Holds what the logic thread needs before it starts. The session itself
// is built on the thread.
//
pub(crate) struct CoreSystemsOrchestrator {
    engine_sound: Option<PathBuf>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(engine_sound: Option<PathBuf>) -> Self {
        Self { engine_sound }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread. Each tick:
    //  1. Collects platform events (non-blocking)
    //  2. Steps the session (actions, tick, audio)
    //  3. Publishes the new race snapshot
    //  4. Sleeps to maintain fixed pacing
    //
    pub(crate) fn spawn_core_thread<P>(
        self,
        receiver: Receiver<PlatformEvent>,
        publisher: P,
        tps: f64,
    ) -> io::Result<thread::JoinHandle<()>>
    where
        P: FramePublisher + 'static,
    {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::Builder::new()
            .name("race-logic".into())
            .spawn(move || {
                let audio = audio::open_player(self.engine_sound.as_deref());
                let session = RaceSession::new(audio);
                Self::run_loop(session, EventCollector::new(receiver), &publisher, tick_duration);
            })
    }

    //--- run_loop() -------------------------------------------------------
    //
    // Blocks until the platform closes the window, hangs up, or stops
    // accepting frames.
    //
    fn run_loop(
        mut session: RaceSession,
        mut collector: EventCollector,
        publisher: &dyn FramePublisher,
        tick_duration: Duration,
    ) {
        info!("Core thread started (tick: {:?})", tick_duration);

        let mut live = publisher.publish(CoreEvent::Frame(session.snapshot()));
        let mut ticks: u64 = 0;

        while live {
            let tick_start = Instant::now();

            //--- Step 1: Gather platform events ---------------------------
            if collector.collect_frame() == TickControl::Exit {
                info!("Shutdown requested by platform");
                break;
            }

            //--- Step 2: Advance the race ---------------------------------
            if let Some(signal) = session.step(collector.batches()) {
                debug!("Tick {}: {:?}", ticks, signal);
            }
            ticks += 1;

            //--- Step 3: Hand the frame to the platform -------------------
            live = publisher.publish(CoreEvent::Frame(session.snapshot()));

            //--- Step 4: Maintain fixed pacing ----------------------------
            let elapsed = tick_start.elapsed();
            if elapsed < tick_duration {
                thread::sleep(tick_duration - elapsed);
            }
        }

        if !live {
            info!("Platform stopped accepting frames");
        }

        session.shutdown();
        publisher.publish(CoreEvent::Shutdown);
        info!("Core thread exiting after {} ticks", ticks);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::race::Phase;
    use crossbeam_channel::{unbounded, Sender};

    const TPS: f64 = 500.0;
    const WAIT: Duration = Duration::from_secs(5);

    fn spawn() -> (
        Sender<PlatformEvent>,
        crossbeam_channel::Receiver<CoreEvent>,
        thread::JoinHandle<()>,
    ) {
        let (platform_tx, platform_rx) = unbounded();
        let (core_tx, core_rx) = unbounded::<CoreEvent>();

        let handle = CoreSystemsOrchestrator::new(None)
            .spawn_core_thread(platform_rx, core_tx, TPS)
            .unwrap();

        (platform_tx, core_rx, handle)
    }

    fn next_frame(rx: &crossbeam_channel::Receiver<CoreEvent>) -> crate::core::race::RaceState {
        match rx.recv_timeout(WAIT).unwrap() {
            CoreEvent::Frame(race) => race,
            CoreEvent::Shutdown => panic!("unexpected shutdown"),
        }
    }

    #[test]
    fn publishes_title_screen_first() {
        let (tx, rx, handle) = spawn();

        assert_eq!(next_frame(&rx).phase(), Phase::Start);

        tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn input_reaches_the_race() {
        let (tx, rx, handle) = spawn();
        next_frame(&rx);

        tx.send(PlatformEvent::Inputs(vec![InputEvent::press(KeyCode::Enter)]))
            .unwrap();

        let started = (0..50)
            .map(|_| next_frame(&rx))
            .any(|race| race.phase() != Phase::Start);
        assert!(started);

        tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn window_close_ends_with_shutdown_event() {
        let (tx, rx, handle) = spawn();

        tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().unwrap();

        let last = rx.try_iter().last();
        assert_eq!(last, Some(CoreEvent::Shutdown));
    }

    #[test]
    fn platform_hangup_stops_thread() {
        let (tx, _rx, handle) = spawn();
        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn dropped_frame_receiver_stops_thread() {
        let (_tx, rx, handle) = spawn();
        drop(rx);
        handle.join().unwrap();
    }
}
