//=========================================================================
// Traffic
//=========================================================================
//
// Scrolling entities that share the road with the player: two AI cars
// and one recurring obstacle.
//
// Every tick each entity scrolls down by `base + level` pixels, AI cars
// may dodge the obstacle, and anything past the bottom bound wraps back
// above the visible area.
//
// Lane-change rule (deterministic, no pathfinding):
//   |car.y - obstacle.y| < AVOID_DISTANCE  and  same lane
//     → shift one lane in the car's preferred direction,
//       or the other way when already at that edge.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Internal Dependencies ===============================================

use super::hitbox::Hitbox;
use super::track::{Lane, BOTTOM_BOUND, CAR_HEIGHT, CAR_WIDTH, OBSTACLE_SIZE};

//=== Constants ===========================================================

/// Vertical distance under which an AI car reacts to the obstacle.
pub const AVOID_DISTANCE: i32 = 80;

/// Base scroll speed of the obstacle (level is added on top).
pub const OBSTACLE_BASE_SPEED: i32 = 4;

/// Scroll position the obstacle wraps back to.
pub const OBSTACLE_RESET_Y: i32 = -300;

//=== Steer ===============================================================

/// Preferred dodge direction of an AI driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// Move left unless already in the leftmost lane.
    Left,

    /// Move right unless already in the rightmost lane.
    Right,
}

impl Steer {
    /// Lane reached by a single dodge from `lane`.
    pub fn dodge(self, lane: Lane) -> Lane {
        match self {
            Self::Left if lane.is_leftmost() => lane.right(),
            Self::Left => lane.left(),
            Self::Right if lane.is_rightmost() => lane.left(),
            Self::Right => lane.right(),
        }
    }
}

//=== AiCar ===============================================================

/// An opponent car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiCar {
    pub(crate) lane: Lane,
    pub(crate) y: i32,
    base_speed: i32,
    reset_y: i32,
    steer: Steer,
    /// Lowest level at which this driver starts dodging.
    dodge_from_level: u32,
}

impl AiCar {
    /// Lead opponent: left lane, fast, dodges from the first level.
    pub const fn lead() -> Self {
        Self {
            lane: Lane::LEFT,
            y: -200,
            base_speed: 3,
            reset_y: -200,
            steer: Steer::Left,
            dodge_from_level: 1,
        }
    }

    /// Trailing opponent: right lane, slower, only dodges from level 3.
    pub const fn trailer() -> Self {
        Self {
            lane: Lane::RIGHT,
            y: -500,
            base_speed: 2,
            reset_y: -500,
            steer: Steer::Right,
            dodge_from_level: 3,
        }
    }

    pub const fn lane(&self) -> Lane {
        self.lane
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    pub const fn base_speed(&self) -> i32 {
        self.base_speed
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.lane.x(), self.y, CAR_WIDTH, CAR_HEIGHT)
    }

    /// Scrolls the car by `base_speed + level`.
    pub(crate) fn advance(&mut self, level: u32) {
        self.y += self.base_speed + level as i32;
    }

    /// Applies the lane-change rule against the obstacle.
    pub(crate) fn avoid(&mut self, obstacle: &Obstacle, level: u32) {
        if level < self.dodge_from_level {
            return;
        }

        if (self.y - obstacle.y).abs() < AVOID_DISTANCE && self.lane == obstacle.lane {
            self.lane = self.steer.dodge(self.lane);
        }
    }

    /// Wraps the car above the screen once it scrolls past the bottom.
    pub(crate) fn wrap(&mut self) {
        if self.y > BOTTOM_BOUND {
            self.y = self.reset_y;
        }
    }
}

//=== Obstacle ============================================================

/// The single recurring road hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub(crate) lane: Lane,
    pub(crate) y: i32,
}

impl Obstacle {
    pub const fn new() -> Self {
        Self {
            lane: Lane::CENTER,
            y: OBSTACLE_RESET_Y,
        }
    }

    pub const fn lane(&self) -> Lane {
        self.lane
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.lane.x(), self.y, OBSTACLE_SIZE, OBSTACLE_SIZE)
    }

    pub(crate) fn advance(&mut self, level: u32) {
        self.y += OBSTACLE_BASE_SPEED + level as i32;
    }

    /// Wraps the obstacle above the screen into a random lane.
    pub(crate) fn wrap<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.y > BOTTOM_BOUND {
            self.y = OBSTACLE_RESET_Y;
            self.lane = Lane::random(rng);
        }
    }
}

impl Default for Obstacle {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
