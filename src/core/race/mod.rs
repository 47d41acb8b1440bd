//=========================================================================
// Race State
//=========================================================================
//
// All mutable simulation data for one race, plus the fixed-step update
// and the input handlers that mutate player intent.
//
// Architecture:
//   RaceAction ──apply()──► RaceState ◄──tick(rng)── fixed-rate clock
//                              │
//                              └──► Option<EngineSignal> (audio cues)
//
// Per-tick order while driving:
//   1. score += 1, finish line scrolls by speed
//   2. accelerate (Racing) or decelerate (Finishing)
//   3. level up on every multiple of LEVEL_THRESHOLD
//   4. scroll AI cars and obstacle
//   5. AI lane changes
//   6. collisions (pre-wrap positions) → Lost
//   7. wrap entities past the bottom bound
//   8. finish line reached → Finishing; speed at floor → Won
//
// No operation here can fail and none performs I/O.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod hitbox;
pub mod phase;
pub mod track;
pub mod traffic;

//=== Public API ==========================================================

pub use hitbox::Hitbox;
pub use phase::{EngineSignal, Phase};
pub use track::Lane;
pub use traffic::{AiCar, Obstacle};

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::input::RaceAction;
use track::{CAR_HEIGHT, CAR_WIDTH, FINISH_LINE_START_Y, FINISH_TRIGGER_Y, PLAYER_Y};

//=== Tuning ==============================================================

/// Ticks shown on the countdown before the race starts.
pub const COUNTDOWN_TICKS: i32 = 3;

/// Speed cap at level 1.
pub const BASE_MAX_SPEED: f64 = 6.0;

/// Speed gained per tick while racing below the cap.
pub const ACCELERATION: f64 = 0.05;

/// Speed lost per tick while finishing above the floor.
pub const DECELERATION: f64 = 0.05;

/// Finishing ends once speed drops to this value.
pub const SPEED_FLOOR: f64 = 1.0;

/// Instant speed bump per boost press.
pub const BOOST_BUMP: f64 = 0.2;

/// Score interval between level-ups.
pub const LEVEL_THRESHOLD: u32 = 1000;

/// Cap increase per level-up.
pub const MAX_SPEED_STEP: f64 = 0.5;

//=== RaceState ===========================================================

/// Complete state of one race.
///
/// Created in [`Phase::Start`]; mutated in place by input handlers and
/// [`RaceState::tick`]. Cheap to copy, so the logic thread can hand
/// snapshots to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceState {
    pub(crate) phase: Phase,
    pub(crate) player_lane: Lane,
    pub(crate) speed: f64,
    pub(crate) max_speed: f64,
    pub(crate) boosting: bool,
    pub(crate) ai_cars: [AiCar; 2],
    pub(crate) obstacle: Obstacle,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) finish_line_y: i32,
}

impl RaceState {
    //--- Construction -----------------------------------------------------

    /// Creates a fresh race on the title screen.
    pub const fn new() -> Self {
        Self {
            phase: Phase::Start,
            player_lane: Lane::CENTER,
            speed: 0.0,
            max_speed: BASE_MAX_SPEED,
            boosting: false,
            ai_cars: [AiCar::lead(), AiCar::trailer()],
            obstacle: Obstacle::new(),
            score: 0,
            level: 1,
            finish_line_y: FINISH_LINE_START_Y,
        }
    }

    /// Reinitialises every field and goes straight to the countdown.
    ///
    /// Restart skips the title screen. Calling this repeatedly always
    /// yields the same state.
    pub fn reset(&mut self) {
        *self = Self {
            phase: Phase::Countdown { remaining: COUNTDOWN_TICKS },
            ..Self::new()
        };
        debug!("Race reset, countdown from {}", COUNTDOWN_TICKS);
    }

    //--- Simulation -------------------------------------------------------

    /// Advances the race by one fixed time-step.
    ///
    /// Returns the audio cue triggered by a phase transition this tick,
    /// if any. `rng` is only used to pick a new obstacle lane on wrap.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<EngineSignal> {
        match self.phase {
            Phase::Start | Phase::Won | Phase::Lost => None,
            Phase::Countdown { remaining } => self.count_down(remaining),
            Phase::Racing | Phase::Finishing => self.drive(rng),
        }
    }

    fn count_down(&mut self, remaining: i32) -> Option<EngineSignal> {
        let remaining = remaining - 1;

        if remaining < 0 {
            self.phase = Phase::Racing;
            debug!("Countdown over, racing");
            Some(EngineSignal::EngineStart)
        } else {
            self.phase = Phase::Countdown { remaining };
            None
        }
    }

    fn drive<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<EngineSignal> {
        let finishing = self.phase == Phase::Finishing;

        //--- 1. Progress --------------------------------------------------
        self.score += 1;
        // Integer scroll, truncated toward zero
        self.finish_line_y = (f64::from(self.finish_line_y) + self.speed) as i32;

        //--- 2. Speed -----------------------------------------------------
        if finishing {
            if self.speed > SPEED_FLOOR {
                self.speed -= DECELERATION;
            }
        } else if self.speed < self.max_speed {
            self.speed += ACCELERATION;
        }

        //--- 3. Difficulty ------------------------------------------------
        if self.score % LEVEL_THRESHOLD == 0 {
            self.level += 1;
            self.max_speed += MAX_SPEED_STEP;
            debug!("Level {} reached, max speed {:.1}", self.level, self.max_speed);
        }

        //--- 4. Traffic ---------------------------------------------------
        for car in &mut self.ai_cars {
            car.advance(self.level);
        }
        self.obstacle.advance(self.level);

        //--- 5. Lane-change AI --------------------------------------------
        for car in &mut self.ai_cars {
            car.avoid(&self.obstacle, self.level);
        }

        //--- 6. Collisions ------------------------------------------------
        if self.player_collides() {
            self.phase = Phase::Lost;
            debug!("Crash at score {}", self.score);
            return Some(EngineSignal::EngineStop);
        }

        //--- 7. Wrap-around -----------------------------------------------
        for car in &mut self.ai_cars {
            car.wrap();
        }
        self.obstacle.wrap(rng);

        //--- 8. Finish ----------------------------------------------------
        if !finishing && self.finish_line_y >= FINISH_TRIGGER_Y {
            self.phase = Phase::Finishing;
            debug!("Finish line crossed at speed {:.2}", self.speed);
        }

        if self.phase == Phase::Finishing && self.speed <= SPEED_FLOOR {
            self.phase = Phase::Won;
            debug!("Race won with score {} at level {}", self.score, self.level);
            return Some(EngineSignal::EngineStop);
        }

        None
    }

    fn player_collides(&self) -> bool {
        let player = self.player_hitbox();

        self.ai_cars.iter().any(|car| player.intersects(&car.hitbox()))
            || player.intersects(&self.obstacle.hitbox())
    }

    //--- Input Handlers ---------------------------------------------------

    /// Dispatches a mapped action to its handler.
    pub fn apply(&mut self, action: RaceAction) {
        match action {
            RaceAction::Begin => self.on_begin_pressed(),
            RaceAction::LaneLeft => self.on_lane_left(),
            RaceAction::LaneRight => self.on_lane_right(),
            RaceAction::BoostPressed => self.on_boost_pressed(),
            RaceAction::BoostReleased => self.on_boost_released(),
            RaceAction::Restart => self.on_restart_pressed(),
        }
    }

    /// Leaves the title screen. Ignored in every other phase.
    pub fn on_begin_pressed(&mut self) {
        if self.phase == Phase::Start {
            self.phase = Phase::Countdown { remaining: COUNTDOWN_TICKS };
            debug!("Countdown started");
        }
    }

    /// Moves one lane left. Works in any phase.
    pub fn on_lane_left(&mut self) {
        self.player_lane = self.player_lane.left();
    }

    /// Moves one lane right. Works in any phase.
    pub fn on_lane_right(&mut self) {
        self.player_lane = self.player_lane.right();
    }

    /// Sets the boost flag and bumps speed once per press.
    ///
    /// Presses stack, but never beyond `max_speed + BOOST_BUMP`.
    pub fn on_boost_pressed(&mut self) {
        self.boosting = true;
        self.speed = (self.speed + BOOST_BUMP).min(self.max_speed + BOOST_BUMP);
    }

    pub fn on_boost_released(&mut self) {
        self.boosting = false;
    }

    /// Starts a new race once the current one is over.
    pub fn on_restart_pressed(&mut self) {
        if self.phase.is_over() {
            self.reset();
        }
    }

    //--- Queries ----------------------------------------------------------

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn player_lane(&self) -> Lane {
        self.player_lane
    }

    pub const fn speed(&self) -> f64 {
        self.speed
    }

    pub const fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub const fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub const fn ai_cars(&self) -> &[AiCar; 2] {
        &self.ai_cars
    }

    pub const fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn level(&self) -> u32 {
        self.level
    }

    pub const fn finish_line_y(&self) -> i32 {
        self.finish_line_y
    }

    /// Player hitbox: current lane x, fixed y.
    pub fn player_hitbox(&self) -> Hitbox {
        Hitbox::new(self.player_lane.x(), PLAYER_Y, CAR_WIDTH, CAR_HEIGHT)
    }
}

impl Default for RaceState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    //--- Test Helpers -----------------------------------------------------

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Racing state with all traffic parked far above the screen.
    fn clear_road() -> RaceState {
        let mut race = RaceState::new();
        race.phase = Phase::Racing;
        for car in &mut race.ai_cars {
            car.y = -5000;
        }
        race.obstacle.y = -8000;
        race
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn new_race_waits_on_title_screen() {
        let race = RaceState::new();
        assert_eq!(race.phase(), Phase::Start);
        assert_eq!(race.player_lane(), Lane::CENTER);
        assert_eq!(race.speed(), 0.0);
        assert_eq!(race.max_speed(), 6.0);
        assert_eq!(race.level(), 1);
        assert_eq!(race.score(), 0);
        assert_eq!(race.finish_line_y(), -3000);
    }

    #[test]
    fn start_phase_tick_is_noop() {
        let mut race = RaceState::new();
        let before = race;
        assert_eq!(race.tick(&mut rng()), None);
        assert_eq!(race, before);
    }

    #[test]
    fn reset_goes_to_countdown_not_title() {
        let mut race = clear_road();
        race.score = 1234;
        race.level = 2;
        race.speed = 4.2;
        race.boosting = true;
        race.player_lane = Lane::RIGHT;
        race.ai_cars[0].lane = Lane::RIGHT;

        race.reset();

        let expected = RaceState {
            phase: Phase::Countdown { remaining: COUNTDOWN_TICKS },
            ..RaceState::new()
        };
        assert_eq!(race, expected);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut race = clear_road();
        race.score = 77;

        race.reset();
        let first = race;
        race.reset();

        assert_eq!(race, first);
    }

    //=====================================================================
    // Countdown
    //=====================================================================

    #[test]
    fn begin_then_four_ticks_starts_race() {
        let mut race = RaceState::new();
        let mut rng = rng();
        race.on_begin_pressed();

        let signals: Vec<_> = (0..4).map(|_| race.tick(&mut rng)).collect();

        assert_eq!(signals, vec![None, None, None, Some(EngineSignal::EngineStart)]);
        assert_eq!(race.phase(), Phase::Racing);
    }

    #[test]
    fn countdown_counts_through_zero() {
        let mut race = RaceState::new();
        let mut rng = rng();
        race.on_begin_pressed();

        race.tick(&mut rng);
        assert_eq!(race.phase(), Phase::Countdown { remaining: 2 });
        race.tick(&mut rng);
        race.tick(&mut rng);
        assert_eq!(race.phase(), Phase::Countdown { remaining: 0 });
    }

    #[test]
    fn countdown_does_not_score() {
        let mut race = RaceState::new();
        let mut rng = rng();
        race.on_begin_pressed();
        for _ in 0..4 {
            race.tick(&mut rng);
        }
        assert_eq!(race.score(), 0);
        assert_eq!(race.speed(), 0.0);
    }

    #[test]
    fn begin_ignored_outside_title() {
        let mut race = clear_road();
        race.on_begin_pressed();
        assert_eq!(race.phase(), Phase::Racing);

        race.phase = Phase::Countdown { remaining: 1 };
        race.on_begin_pressed();
        assert_eq!(race.phase(), Phase::Countdown { remaining: 1 });
    }

    //=====================================================================
    // Racing
    //=====================================================================

    #[test]
    fn racing_tick_scores_and_accelerates() {
        let mut race = clear_road();
        race.tick(&mut rng());

        assert_eq!(race.score(), 1);
        assert!((race.speed() - ACCELERATION).abs() < 1e-9);
    }

    #[test]
    fn finish_line_scrolls_with_truncation_toward_zero() {
        let mut race = clear_road();
        race.speed = 2.5;
        race.tick(&mut rng());
        // -3000 + 2.5 = -2997.5 → -2997
        assert_eq!(race.finish_line_y(), -2997);

        race.finish_line_y = 10;
        race.speed = 2.5;
        race.tick(&mut rng());
        // 10 + 2.5 = 12.5 → 12
        assert_eq!(race.finish_line_y(), 12);
    }

    #[test]
    fn speed_stops_at_cap() {
        let mut race = clear_road();
        let mut rng = rng();
        for _ in 0..200 {
            race.tick(&mut rng);
            for car in &mut race.ai_cars {
                car.y = -5000;
            }
            race.obstacle.y = -8000;
        }

        assert!(race.speed() >= race.max_speed() - 1e-9);
        assert!(race.speed() < race.max_speed() + ACCELERATION);
    }

    #[test]
    fn score_1000_levels_up_once() {
        let mut race = clear_road();
        race.score = 999;

        race.tick(&mut rng());

        assert_eq!(race.score(), 1000);
        assert_eq!(race.level(), 2);
        assert!((race.max_speed() - 6.5).abs() < 1e-9);

        race.tick(&mut rng());
        assert_eq!(race.level(), 2);
    }

    #[test]
    fn level_never_decreases_over_long_run() {
        let mut race = clear_road();
        let mut rng = rng();
        let mut last_level = race.level();

        for _ in 0..3500 {
            race.tick(&mut rng);
            assert!(race.level() >= last_level);
            last_level = race.level();
            race.phase = Phase::Racing;
            race.finish_line_y = FINISH_LINE_START_Y;
            for car in &mut race.ai_cars {
                car.y = -5000;
            }
            race.obstacle.y = -8000;
        }

        assert_eq!(race.score(), 3500);
        assert_eq!(race.level(), 4);
    }

    #[test]
    fn traffic_moves_with_level() {
        let mut race = RaceState::new();
        race.phase = Phase::Racing;
        race.level = 2;
        race.player_lane = Lane::LEFT;
        race.ai_cars[0].lane = Lane::RIGHT;

        race.tick(&mut rng());

        assert_eq!(race.ai_cars()[0].y(), -200 + 3 + 2);
        assert_eq!(race.ai_cars()[1].y(), -500 + 2 + 2);
        assert_eq!(race.obstacle().y(), -300 + 4 + 2);
    }

    //=====================================================================
    // Collisions
    //=====================================================================

    #[test]
    fn collision_with_lead_car_loses_once() {
        let mut race = clear_road();
        let mut rng = rng();
        race.ai_cars[0].lane = race.player_lane;
        // Lands exactly on the player after scrolling 3 + level
        race.ai_cars[0].y = PLAYER_Y - 4;

        assert_eq!(race.tick(&mut rng), Some(EngineSignal::EngineStop));
        assert_eq!(race.phase(), Phase::Lost);

        let after = race;
        assert_eq!(race.tick(&mut rng), None);
        assert_eq!(race, after);
    }

    #[test]
    fn collision_with_obstacle_loses() {
        let mut race = clear_road();
        race.obstacle.lane = Lane::CENTER;
        race.obstacle.y = PLAYER_Y + 10;

        assert_eq!(race.tick(&mut rng()), Some(EngineSignal::EngineStop));
        assert_eq!(race.phase(), Phase::Lost);
    }

    #[test]
    fn crash_tick_skips_wrap_and_finish_checks() {
        let mut race = clear_road();
        race.player_lane = Lane::RIGHT;
        race.obstacle.lane = Lane::RIGHT;
        race.obstacle.y = 455;
        // Would wrap this tick if the update ran to completion
        race.ai_cars[1].y = 598;
        race.finish_line_y = FINISH_TRIGGER_Y;

        assert_eq!(race.tick(&mut rng()), Some(EngineSignal::EngineStop));
        assert_eq!(race.phase(), Phase::Lost);
        assert_eq!(race.obstacle().y(), 460);
        assert_eq!(race.ai_cars()[1].y(), 601);
    }

    #[test]
    fn adjacent_lane_traffic_does_not_collide() {
        let mut race = clear_road();
        race.ai_cars[0].lane = Lane::LEFT;
        race.ai_cars[0].y = PLAYER_Y - 4;

        assert_eq!(race.tick(&mut rng()), None);
        assert_eq!(race.phase(), Phase::Racing);
    }

    //=====================================================================
    // Finishing
    //=====================================================================

    #[test]
    fn finish_line_reaching_player_starts_finishing() {
        let mut race = clear_road();
        race.finish_line_y = FINISH_TRIGGER_Y - 3;
        race.speed = 5.0;

        race.tick(&mut rng());

        assert_eq!(race.phase(), Phase::Finishing);
    }

    #[test]
    fn finishing_decelerates_then_wins_once() {
        let mut race = clear_road();
        let mut rng = rng();
        race.phase = Phase::Finishing;
        race.finish_line_y = FINISH_TRIGGER_Y;
        race.speed = 2.0;

        let mut previous = race.speed();
        let mut signal = None;
        for _ in 0..100 {
            signal = race.tick(&mut rng);
            if race.phase() == Phase::Won {
                break;
            }
            assert!(race.speed() < previous);
            previous = race.speed();
            for car in &mut race.ai_cars {
                car.y = -5000;
            }
            race.obstacle.y = -8000;
        }

        assert_eq!(race.phase(), Phase::Won);
        assert_eq!(signal, Some(EngineSignal::EngineStop));
        assert!(race.speed() <= SPEED_FLOOR);

        let won = race;
        for _ in 0..10 {
            assert_eq!(race.tick(&mut rng), None);
        }
        assert_eq!(race, won);
    }

    #[test]
    fn finishing_keeps_decelerating_past_the_line() {
        let mut race = clear_road();
        race.phase = Phase::Finishing;
        race.finish_line_y = FINISH_TRIGGER_Y + 100;
        race.speed = 3.0;

        race.tick(&mut rng());

        assert_eq!(race.phase(), Phase::Finishing);
        assert!((race.speed() - 2.95).abs() < 1e-9);
    }

    //=====================================================================
    // Input Handlers
    //=====================================================================

    #[test]
    fn lane_changes_clamp_at_edges() {
        let mut race = RaceState::new();
        for _ in 0..5 {
            race.on_lane_left();
        }
        assert_eq!(race.player_lane(), Lane::LEFT);

        for _ in 0..5 {
            race.on_lane_right();
        }
        assert_eq!(race.player_lane(), Lane::RIGHT);
    }

    #[test]
    fn lane_changes_work_in_every_phase() {
        for phase in [
            Phase::Start,
            Phase::Countdown { remaining: 2 },
            Phase::Racing,
            Phase::Finishing,
            Phase::Won,
            Phase::Lost,
        ] {
            let mut race = RaceState { phase, ..RaceState::new() };
            race.on_lane_left();
            assert_eq!(race.player_lane(), Lane::LEFT, "{:?}", phase);
        }
    }

    #[test]
    fn random_lane_inputs_keep_lane_valid() {
        use rand::Rng;

        let mut race = RaceState::new();
        let mut rng = rng();
        for _ in 0..1000 {
            if rng.gen_bool(0.5) {
                race.apply(RaceAction::LaneLeft);
            } else {
                race.apply(RaceAction::LaneRight);
            }
            assert!(race.player_lane().index() < Lane::COUNT);
        }
    }

    #[test]
    fn boost_press_bumps_speed_per_press() {
        let mut race = clear_road();
        race.speed = 2.0;

        race.on_boost_pressed();
        race.on_boost_pressed();

        assert!(race.is_boosting());
        assert!((race.speed() - 2.4).abs() < 1e-9);

        race.on_boost_released();
        assert!(!race.is_boosting());
        assert!((race.speed() - 2.4).abs() < 1e-9);
    }

    #[test]
    fn boost_overshoot_is_bounded() {
        let mut race = clear_road();
        race.speed = race.max_speed;

        for _ in 0..20 {
            race.on_boost_pressed();
        }

        assert!(race.speed() <= race.max_speed() + BOOST_BUMP + 1e-9);
    }

    #[test]
    fn speed_stays_in_bounds_under_random_boosting() {
        use rand::Rng;

        let mut race = clear_road();
        let mut rng = rng();

        for _ in 0..2000 {
            if rng.gen_bool(0.3) {
                race.apply(RaceAction::BoostPressed);
            }
            race.tick(&mut rng);

            assert!(race.speed() >= 0.0);
            assert!(race.speed() <= race.max_speed() + BOOST_BUMP + 1e-9);

            race.phase = Phase::Racing;
            for car in &mut race.ai_cars {
                car.y = -5000;
            }
            race.obstacle.y = -8000;
            race.finish_line_y = FINISH_LINE_START_Y;
        }
    }

    #[test]
    fn restart_only_after_race_ends() {
        let mut race = clear_road();
        race.score = 10;
        race.on_restart_pressed();
        assert_eq!(race.phase(), Phase::Racing);
        assert_eq!(race.score(), 10);

        race.phase = Phase::Lost;
        race.on_restart_pressed();
        assert_eq!(race.phase(), Phase::Countdown { remaining: COUNTDOWN_TICKS });
        assert_eq!(race.score(), 0);

        race.phase = Phase::Won;
        race.on_restart_pressed();
        assert_eq!(race.phase(), Phase::Countdown { remaining: COUNTDOWN_TICKS });
    }

    #[test]
    fn apply_routes_every_action() {
        let mut race = RaceState::new();

        race.apply(RaceAction::Begin);
        assert!(matches!(race.phase(), Phase::Countdown { .. }));

        race.apply(RaceAction::LaneRight);
        assert_eq!(race.player_lane(), Lane::RIGHT);

        race.apply(RaceAction::BoostPressed);
        assert!(race.is_boosting());

        race.apply(RaceAction::BoostReleased);
        assert!(!race.is_boosting());

        race.phase = Phase::Won;
        race.apply(RaceAction::Restart);
        assert_eq!(race.player_lane(), Lane::CENTER);
    }
}
