use crate::units::Pt;

/// Outer spacing around a box, in the same order as CSS margins. Also used for
/// border widths, which share the same four-sided shape.
///
/// Floated boxes push text away by their margin box, and split text fragments
/// zero the margin along the edge where the page break occurred.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt::ZERO)
    }

    /// The same margins with the top edge removed, for the continuation
    /// fragment of something split across pages
    pub fn without_top(&self) -> Margins {
        Margins {
            top: Pt::ZERO,
            ..*self
        }
    }

    /// The same margins with the bottom edge removed, for the leading
    /// fragment of something split across pages
    pub fn without_bottom(&self) -> Margins {
        Margins {
            bottom: Pt::ZERO,
            ..*self
        }
    }

    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_an_edge_keeps_the_others() {
        let margins = Margins::trbl(Pt(1.0), Pt(2.0), Pt(3.0), Pt(4.0));
        assert_eq!(
            margins.without_top(),
            Margins::trbl(Pt::ZERO, Pt(2.0), Pt(3.0), Pt(4.0))
        );
        assert_eq!(
            margins.without_bottom(),
            Margins::trbl(Pt(1.0), Pt(2.0), Pt::ZERO, Pt(4.0))
        );
        assert_eq!(margins.vertical(), Pt(4.0));
        assert_eq!(margins.horizontal(), Pt(6.0));
    }
}
