//! Sprite orientation helpers: pure functions of neighboring segment
//! positions, kept out of the simulation so the renderer can be swapped
//! without touching movement logic.
//!
//! Angle convention (screen space, y down): down=0, left=90, up=180,
//! right=270. Corner cells are identified by the quadrant their bend
//! opens toward and map to dedicated corner textures.

use crate::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// Straight run; the angle picks horizontal vs vertical sprite
    /// rotation and the travel direction along the run.
    Straight { angle_deg: i32 },
    Corner(CornerKind),
}

/// Head rotation for a velocity vector; `None` while the snake is parked.
pub fn head_angle(vel_x: i32, vel_y: i32) -> Option<i32> {
    if vel_x > 0 {
        Some(270)
    } else if vel_x < 0 {
        Some(90)
    } else if vel_y > 0 {
        Some(0)
    } else if vel_y < 0 {
        Some(180)
    } else {
        None
    }
}

/// Classify an interior body segment from its two neighbors: `before` is
/// the neighbor toward the head, `after` the neighbor toward the tail.
pub fn classify_body_segment(before: Cell, current: Cell, after: Cell) -> BodyShape {
    let in_dx = current.x - before.x;
    let in_dy = current.y - before.y;
    let out_dx = after.x - current.x;
    let out_dy = after.y - current.y;

    let is_turn = in_dx != out_dx || in_dy != out_dy;

    if is_turn {
        if in_dx > 0 {
            if out_dy < 0 {
                return BodyShape::Corner(CornerKind::TopLeft);
            } else if out_dy > 0 {
                return BodyShape::Corner(CornerKind::BottomLeft);
            }
        } else if in_dx < 0 {
            if out_dy < 0 {
                return BodyShape::Corner(CornerKind::TopRight);
            } else if out_dy > 0 {
                return BodyShape::Corner(CornerKind::BottomRight);
            }
        } else if in_dy < 0 {
            if out_dx > 0 {
                return BodyShape::Corner(CornerKind::BottomRight);
            } else if out_dx < 0 {
                return BodyShape::Corner(CornerKind::BottomLeft);
            }
        } else if in_dy > 0 {
            if out_dx > 0 {
                return BodyShape::Corner(CornerKind::TopRight);
            } else if out_dx < 0 {
                return BodyShape::Corner(CornerKind::TopLeft);
            }
        }
        // Degenerate neighbors (overlapping cells right after a grow)
        // render as an unrotated straight piece.
        return BodyShape::Straight { angle_deg: 0 };
    }

    let angle_deg = if in_dx != 0 || out_dx != 0 {
        if in_dx > 0 || out_dx > 0 {
            0
        } else {
            180
        }
    } else if in_dy != 0 || out_dy != 0 {
        if in_dy > 0 || out_dy > 0 {
            90
        } else {
            270
        }
    } else {
        0
    };
    BodyShape::Straight { angle_deg }
}

/// Tail rotation from the last two segments; the tail sprite points away
/// from the body.
pub fn tail_angle(second_last: Cell, last: Cell) -> i32 {
    if second_last.x < last.x {
        90
    } else if second_last.x > last.x {
        270
    } else if second_last.y < last.y {
        180
    } else if second_last.y > last.y {
        0
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn head_angle_covers_all_directions() {
        assert_eq!(head_angle(1, 0), Some(270));
        assert_eq!(head_angle(-1, 0), Some(90));
        assert_eq!(head_angle(0, 1), Some(0));
        assert_eq!(head_angle(0, -1), Some(180));
        assert_eq!(head_angle(0, 0), None);
    }

    #[test]
    fn straight_runs_classify_by_axis_and_travel() {
        // Head to the right of the segment: travel is +x.
        assert_eq!(
            classify_body_segment(c(4, 5), c(5, 5), c(6, 5)),
            BodyShape::Straight { angle_deg: 0 }
        );
        assert_eq!(
            classify_body_segment(c(6, 5), c(5, 5), c(4, 5)),
            BodyShape::Straight { angle_deg: 180 }
        );
        assert_eq!(
            classify_body_segment(c(5, 4), c(5, 5), c(5, 6)),
            BodyShape::Straight { angle_deg: 90 }
        );
        assert_eq!(
            classify_body_segment(c(5, 6), c(5, 5), c(5, 4)),
            BodyShape::Straight { angle_deg: 270 }
        );
    }

    #[test]
    fn corner_classification_matches_turn_quadrants() {
        // Entering rightward, leaving upward.
        assert_eq!(
            classify_body_segment(c(4, 5), c(5, 5), c(5, 4)),
            BodyShape::Corner(CornerKind::TopLeft)
        );
        // Entering rightward, leaving downward.
        assert_eq!(
            classify_body_segment(c(4, 5), c(5, 5), c(5, 6)),
            BodyShape::Corner(CornerKind::BottomLeft)
        );
        // Entering leftward, leaving upward.
        assert_eq!(
            classify_body_segment(c(6, 5), c(5, 5), c(5, 4)),
            BodyShape::Corner(CornerKind::TopRight)
        );
        // Entering leftward, leaving downward.
        assert_eq!(
            classify_body_segment(c(6, 5), c(5, 5), c(5, 6)),
            BodyShape::Corner(CornerKind::BottomRight)
        );
        // Entering upward, leaving right / left.
        assert_eq!(
            classify_body_segment(c(5, 6), c(5, 5), c(6, 5)),
            BodyShape::Corner(CornerKind::BottomRight)
        );
        assert_eq!(
            classify_body_segment(c(5, 6), c(5, 5), c(4, 5)),
            BodyShape::Corner(CornerKind::BottomLeft)
        );
        // Entering downward, leaving right / left.
        assert_eq!(
            classify_body_segment(c(5, 4), c(5, 5), c(6, 5)),
            BodyShape::Corner(CornerKind::TopRight)
        );
        assert_eq!(
            classify_body_segment(c(5, 4), c(5, 5), c(4, 5)),
            BodyShape::Corner(CornerKind::TopLeft)
        );
    }

    #[test]
    fn overlapping_neighbors_fall_back_to_plain_straight() {
        // Right after a grow the tail duplicates, so a neighbor can sit on
        // the segment itself.
        assert_eq!(
            classify_body_segment(c(4, 5), c(5, 5), c(5, 5)),
            BodyShape::Straight { angle_deg: 0 }
        );
    }

    #[test]
    fn tail_points_away_from_the_body() {
        assert_eq!(tail_angle(c(4, 5), c(5, 5)), 90);
        assert_eq!(tail_angle(c(6, 5), c(5, 5)), 270);
        assert_eq!(tail_angle(c(5, 4), c(5, 5)), 180);
        assert_eq!(tail_angle(c(5, 6), c(5, 5)), 0);
        assert_eq!(tail_angle(c(5, 5), c(5, 5)), 0);
    }
}
