use crate::attributed::{AttributedString, Attributes};
use crate::units::Pt;

/// Font metrics needed to size text during layout.
///
/// The typesetter never shapes glyphs itself; it asks a measurer how wide a
/// piece of styled text is and how tall a line set in a given style should
/// be. [`FontBook`](crate::FontBook) is the implementation backed by real
/// font files.
pub trait TextMeasurer {
    /// Horizontal advance of `text` set in `attributes`
    fn advance_width(&self, text: &str, attributes: &Attributes) -> Pt;

    /// Natural line height of text set in `attributes`
    fn line_height(&self, attributes: &Attributes) -> Pt {
        attributes.font_size * 1.2
    }

    /// Advance of the byte range `[start, end)` of `string`, honouring the
    /// style of every run it crosses
    fn advance_width_between(&self, start: usize, end: usize, string: &AttributedString) -> Pt {
        string
            .runs
            .iter()
            .filter_map(|run| {
                let from = run.start.max(start);
                let to = run.end.min(end);
                string
                    .string
                    .get(from..to)
                    .filter(|text| !text.is_empty())
                    .map(|text| self.advance_width(text, &run.attributes))
            })
            .sum()
    }
}
