use crate::units::*;

/// An axis-aligned rectangle with its origin at the top-left corner. The y
/// axis grows downwards, matching the order in which lines are laid out.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub x: Pt,
    /// The y-coordinate of the top edge.
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl Rect {
    /// Create a rectangle from raw point values
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x: Pt(x),
            y: Pt(y),
            width: Pt(width),
            height: Pt(height),
        }
    }

    /// The y-coordinate of the bottom edge
    pub fn bottom(&self) -> Pt {
        self.y + self.height
    }

    /// The x-coordinate of the right edge
    pub fn right(&self) -> Pt {
        self.x + self.width
    }

    /// Whether the two rectangles share any area. Rectangles that merely touch
    /// along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Split the rectangle horizontally into a strip of the given height and
    /// whatever is left below it
    pub fn partition(&self, height: Pt) -> (Rect, Rect) {
        let top = Rect { height, ..*self };
        let rest = Rect {
            y: self.y + height,
            height: self.height - height,
            ..*self
        };
        (top, rest)
    }

    /// Remove `height` from the top of the rectangle
    pub fn crop(&self, height: Pt) -> Rect {
        self.partition(height).1
    }
}
