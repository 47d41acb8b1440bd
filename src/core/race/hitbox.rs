//=========================================================================
// Hitbox
//=========================================================================
//
// Axis-aligned bounding boxes for collision tests.
//
// Overlap is strict: boxes that only share an edge do not intersect.
// Empty boxes (non-positive width or height) never intersect anything.
//
//=========================================================================

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Hitbox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns `true` if the interiors of both boxes overlap.
    pub fn intersects(&self, other: &Hitbox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        // i64 keeps the far edges exact for boxes near i32::MAX
        let (ax, ay, bx, by) = (
            i64::from(self.x),
            i64::from(self.y),
            i64::from(other.x),
            i64::from(other.y),
        );

        ax < bx + i64::from(other.width)
            && bx < ax + i64::from(self.width)
            && ay < by + i64::from(other.height)
            && by < ay + i64::from(self.height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: Hitbox = Hitbox::new(220, 420, 40, 60);

    #[test]
    fn identical_boxes_intersect() {
        assert!(PLAYER.intersects(&PLAYER));
    }

    #[test]
    fn intersection_is_symmetric() {
        let other = Hitbox::new(240, 460, 40, 40);
        assert!(PLAYER.intersects(&other));
        assert!(other.intersects(&PLAYER));

        let apart = Hitbox::new(270, 0, 40, 60);
        assert!(!PLAYER.intersects(&apart));
        assert!(!apart.intersects(&PLAYER));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        // Starts exactly at the player's right edge
        let right_neighbour = Hitbox::new(260, 420, 40, 60);
        let above = Hitbox::new(220, 360, 40, 60);
        assert!(!PLAYER.intersects(&right_neighbour));
        assert!(!PLAYER.intersects(&above));
    }

    #[test]
    fn one_pixel_overlap_intersects() {
        let above = Hitbox::new(220, 361, 40, 60);
        assert!(PLAYER.intersects(&above));
    }

    #[test]
    fn neighbouring_lanes_do_not_overlap() {
        // Lanes are 50px apart, cars are 40px wide
        let next_lane = Hitbox::new(270, 420, 40, 60);
        assert!(!PLAYER.intersects(&next_lane));
        let half_lane = Hitbox::new(245, 420, 40, 60);
        assert!(PLAYER.intersects(&half_lane));
    }

    #[test]
    fn empty_box_never_intersects() {
        let empty = Hitbox::new(220, 420, 0, 60);
        assert!(!PLAYER.intersects(&empty));
        assert!(!empty.intersects(&PLAYER));
    }

    #[test]
    fn far_coordinates_do_not_overflow() {
        let far = Hitbox::new(i32::MAX - 10, i32::MAX - 10, 40, 40);
        assert!(far.intersects(&far));
        assert!(!far.intersects(&PLAYER));
    }
}
