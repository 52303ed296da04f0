use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen coordinates (`y` grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn from_center(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self::new(
            center_x - width / 2.0,
            center_y - height / 2.0,
            width,
            height,
        )
    }

    /// Rectangle spanning `top..bottom` vertically.
    #[must_use]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Returns this rectangle scaled by `ratio` around its center.
    #[must_use]
    pub fn scaled(&self, ratio: f32) -> Self {
        Self::from_center(
            self.center_x(),
            self.center_y(),
            self.width * ratio,
            self.height * ratio,
        )
    }

    /// Returns `true` if the interiors of both rectangles overlap.
    ///
    /// Touching edges and zero-area rectangles never intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
            && self.width > 0.0
            && self.height > 0.0
            && other.width > 0.0
            && other.height > 0.0
    }

    pub fn translate_x(&mut self, dx: f32) {
        self.left += dx;
    }
}
