//=========================================================================
// Race Session
//=========================================================================
//
// One simulation step on the logic thread:
//
//   input batches ──► InputSystem ──► RaceAction* ──► RaceState::apply
//                                                        │
//                                     RaceState::tick ◄──┘
//                                          │
//                          EngineSignal ──► AudioPlayer
//
// The session is the only owner of the race state; the platform sees
// copies through `snapshot()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::audio::{AudioPlayer, Silent};
use crate::core::input::{InputEvent, InputSystem};
use crate::core::race::{EngineSignal, RaceState};

//=== RaceSession =========================================================

pub struct RaceSession {
    input: InputSystem,
    race: RaceState,
    rng: StdRng,
    audio: Box<dyn AudioPlayer>,
}

impl RaceSession {
    /// Fresh race with an entropy-seeded RNG.
    pub fn new(audio: Box<dyn AudioPlayer>) -> Self {
        Self::with_rng(audio, StdRng::from_entropy())
    }

    pub fn with_rng(audio: Box<dyn AudioPlayer>, rng: StdRng) -> Self {
        Self {
            input: InputSystem::new(),
            race: RaceState::new(),
            rng,
            audio,
        }
    }

    /// Applies this tick's input in arrival order, advances the race, and
    /// forwards any engine cue to audio.
    pub fn step(&mut self, input_batches: &[Vec<InputEvent>]) -> Option<EngineSignal> {
        self.input.process_frame(input_batches);

        for &action in self.input.actions() {
            self.race.apply(action);
        }

        let signal = self.race.tick(&mut self.rng);
        if let Some(signal) = signal {
            self.audio.handle(signal);
        }
        signal
    }

    pub fn race(&self) -> &RaceState {
        &self.race
    }

    pub fn snapshot(&self) -> RaceState {
        self.race
    }

    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }

    /// Stops any playing sound before the session goes away.
    pub fn shutdown(&mut self) {
        self.audio.stop_loop();
    }
}

impl Default for RaceSession {
    fn default() -> Self {
        Self::new(Box::new(Silent))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
