//=========================================================================
// Race Actions
//=========================================================================
//
// High-level commands produced by the action mapper and consumed by the
// race state input handlers.
//
// Actions: discrete, edge-triggered. The engine routes them in arrival
// order; the race decides whether the current phase honours them.
//
//=========================================================================

//=== RaceAction ==========================================================

/// Discrete player intent delivered to [`crate::core::race::RaceState`].
///
/// # Example
///
/// ```
/// use lane_racer::core::input::RaceAction;
/// use lane_racer::core::race::{Phase, RaceState};
///
/// let mut race = RaceState::new();
/// race.apply(RaceAction::Begin);
/// assert!(matches!(race.phase(), Phase::Countdown { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaceAction {
    /// Leave the title screen and start the countdown.
    Begin,

    /// Move the player one lane to the left (clamped).
    LaneLeft,

    /// Move the player one lane to the right (clamped).
    LaneRight,

    /// Boost key went down (instant speed bump per press).
    BoostPressed,

    /// Boost key went up.
    BoostReleased,

    /// Start a new race after a win or a crash.
    Restart,
}

//=========================================================================
// Unit Tests
//=========================================================================
