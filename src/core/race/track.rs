//=========================================================================
// Track Geometry
//=========================================================================
//
// Fixed screen-space layout of the road: lane positions, sprite sizes,
// and the scroll bounds entities wrap around.
//
// Coordinates are pixels with a top-left origin on a 500×600 surface.
// Scroll positions grow downward, toward the player.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Surface ============================================================

/// Render surface width in pixels.
pub const SCREEN_WIDTH: u32 = 500;

/// Render surface height in pixels.
pub const SCREEN_HEIGHT: u32 = 600;

//=== Lanes ===============================================================

/// Left x-coordinate of each lane, leftmost first.
pub const LANE_X: [i32; Lane::COUNT] = [170, 220, 270];

//=== Sprites =============================================================

/// Width of every car hitbox.
pub const CAR_WIDTH: i32 = 40;

/// Height of every car hitbox.
pub const CAR_HEIGHT: i32 = 60;

/// Side length of the square obstacle.
pub const OBSTACLE_SIZE: i32 = 40;

/// Fixed y-coordinate of the player car.
pub const PLAYER_Y: i32 = 420;

//=== Scrolling ===========================================================

/// Entities whose scroll position passes this bound wrap back above the screen.
pub const BOTTOM_BOUND: i32 = 600;

/// Initial scroll position of the finish line.
pub const FINISH_LINE_START_Y: i32 = -3000;

/// The finish line counts as reached once it scrolls to this y.
pub const FINISH_TRIGGER_Y: i32 = PLAYER_Y + 40;

//=== Lane ================================================================

/// One of the three lanes.
///
/// The index is always in `0..Lane::COUNT`; every constructor clamps, so
/// indexing [`LANE_X`] through a `Lane` can never go out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lane(u8);

impl Lane {
    /// Number of lanes on the road.
    pub const COUNT: usize = 3;

    pub const LEFT: Self = Self(0);
    pub const CENTER: Self = Self(1);
    pub const RIGHT: Self = Self(2);

    /// Creates a lane, clamping out-of-range indices to the rightmost lane.
    pub fn new(index: usize) -> Self {
        Self(index.min(Self::COUNT - 1) as u8)
    }

    /// Draws a lane uniformly from all lanes.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..Self::COUNT) as u8)
    }

    /// Zero-based lane index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Left x-coordinate of this lane.
    pub const fn x(self) -> i32 {
        LANE_X[self.0 as usize]
    }

    /// Lane to the left, or `self` at the left edge.
    pub const fn left(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Lane to the right, or `self` at the right edge.
    pub fn right(self) -> Self {
        Self::new(self.index() + 1)
    }

    pub const fn is_leftmost(self) -> bool {
        self.0 == 0
    }

    pub const fn is_rightmost(self) -> bool {
        self.0 as usize == Self::COUNT - 1
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
