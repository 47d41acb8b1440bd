//=========================================================================
// Race Phase
//=========================================================================
//
// Explicit state machine for a single race.
//
// ```text
//   Start ──Begin──► Countdown ──(count < 0)──► Racing ──(finish line)──► Finishing
//                       ▲                          │                          │
//                       │                        crash                  crash │ speed ≤ 1
//                       │                          ▼                          ▼     ▼
//                       └────────Restart──────── Lost ◄───────────────────────┘   Won
//                       └────────Restart──────────────────────────────────────────┘
// ```
//
//=========================================================================

//=== Phase ===============================================================

/// Discrete stage of the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Title screen, waiting for Begin.
    Start,

    /// Counting down; `remaining` drops by one per tick and the race
    /// starts once it goes below zero.
    Countdown { remaining: i32 },

    /// Accelerating toward the finish line.
    Racing,

    /// Finish line passed; decelerating toward the speed floor.
    Finishing,

    /// Race completed.
    Won,

    /// Player crashed.
    Lost,
}

impl Phase {
    /// Whether `tick()` advances the simulation in this phase.
    pub const fn is_driving(&self) -> bool {
        matches!(self, Self::Racing | Self::Finishing)
    }

    /// Whether the race has ended and only Restart does anything.
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Start
    }
}

//=== EngineSignal ========================================================

/// Audio cue emitted by a phase transition inside `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSignal {
    /// Countdown finished, race is on.
    EngineStart,

    /// Race ended (won or lost).
    EngineStop,
}

//=========================================================================
// Unit Tests
//=========================================================================
