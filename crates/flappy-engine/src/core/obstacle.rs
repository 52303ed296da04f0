use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// A linked top/bottom obstacle sharing one horizontal position.
///
/// The top obstacle spans from the top of the screen down to [`gap_top`], the
/// bottom obstacle from [`gap_bottom`] to the bottom of the screen. Both halves
/// live in a single value, so they are always created, moved and destroyed
/// together.
///
/// [`gap_top`]: Self::gap_top
/// [`gap_bottom`]: Self::gap_bottom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    left: f32,
    width: f32,
    gap_top: f32,
    gap_bottom: f32,
    screen_height: f32,
}

impl ObstaclePair {
    /// Creates a pair whose gap of height `gap` is centered at `gap_center`.
    #[must_use]
    pub fn new(left: f32, width: f32, gap_center: f32, gap: f32, screen_height: f32) -> Self {
        let half_gap = gap / 2.0;
        Self {
            left,
            width,
            gap_top: gap_center - half_gap,
            gap_bottom: gap_center + half_gap,
            screen_height,
        }
    }

    #[must_use]
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Trailing edge of the pair.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// Bottom edge of the top obstacle.
    #[must_use]
    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    /// Top edge of the bottom obstacle.
    #[must_use]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_bottom
    }

    #[must_use]
    pub fn gap_center(&self) -> f32 {
        f32::midpoint(self.gap_top, self.gap_bottom)
    }

    #[must_use]
    pub fn top_rect(&self) -> Rect {
        Rect::from_edges(self.left, 0.0, self.right(), self.gap_top)
    }

    #[must_use]
    pub fn bottom_rect(&self) -> Rect {
        Rect::from_edges(self.left, self.gap_bottom, self.right(), self.screen_height)
    }

    /// Both halves, top first.
    #[must_use]
    pub fn rects(&self) -> [Rect; 2] {
        [self.top_rect(), self.bottom_rect()]
    }

    pub(crate) fn shift_left(&mut self, distance: f32) {
        self.left -= distance;
    }
}
