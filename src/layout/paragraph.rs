use super::container::Container;
use super::line_rects::generate_line_rects;
use super::linebreak::linebreak;
use super::options::LayoutOptions;
use crate::attributed::AttributedString;
use crate::measure::TextMeasurer;
use crate::rect::Rect;
use crate::style::TextAlign;
use crate::units::Pt;

/// A single line of text positioned within its container
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub string: AttributedString,
    /// The slot the line occupies: its rect's horizontal extent (less the
    /// indent on a paragraph's first line) and the line's height
    pub bbox: Rect,
    /// Where the text starts relative to `bbox.x`, according to the
    /// paragraph's alignment
    pub x_offset: Pt,
    /// Natural width of the text, not counting trailing whitespace
    pub x_advance: Pt,
    /// Extra space added to every inter-word space of a justified line
    pub word_spacing: Pt,
    /// Set on the last line kept when text was cut off
    pub truncated: bool,
}

impl Line {
    pub fn height(&self) -> Pt {
        self.bbox.height
    }

    /// Whether the line has nothing visible to draw
    pub fn is_white_space_only(&self) -> bool {
        self.string.is_white_space_only()
    }
}

/// The laid out lines of one paragraph, top to bottom
pub type Paragraph = Vec<Line>;

/// Height of a line set in `string`: the tallest of its runs' line heights
pub(crate) fn line_height<M>(string: &AttributedString, measurer: &M) -> Option<Pt>
where
    M: TextMeasurer + ?Sized,
{
    string
        .runs
        .iter()
        .map(|run| {
            run.attributes
                .line_height
                .unwrap_or_else(|| measurer.line_height(&run.attributes))
        })
        .reduce(Pt::max)
}

fn count_spaces(text: &str) -> usize {
    text.chars().filter(|ch| ch.is_whitespace()).count()
}

/// Work out `x_offset`, `x_advance` and `word_spacing` of a placed line
pub(crate) fn align_line<M>(line: &mut Line, align: TextAlign, is_last: bool, measurer: &M)
where
    M: TextMeasurer + ?Sized,
{
    let trimmed = line.string.trimmed_len();
    line.x_advance = measurer.advance_width_between(0, trimmed, &line.string);
    line.x_offset = Pt::ZERO;
    line.word_spacing = Pt::ZERO;

    let remaining = (line.bbox.width - line.x_advance).max(Pt::ZERO);

    match align {
        TextAlign::Left => {}
        TextAlign::Right => line.x_offset = remaining,
        TextAlign::Center => line.x_offset = remaining / 2.0,
        TextAlign::Justify if !is_last => {
            let spaces = count_spaces(&line.string.string[..trimmed]);
            if spaces > 0 {
                line.word_spacing = remaining / spaces as f32;
            }
        }
        TextAlign::Justify => {}
    }
}

/// Break a paragraph into lines and position them inside `container`.
///
/// Lines are placed top to bottom into the rects produced by
/// [`generate_line_rects`](super::generate_line_rects). A line that would
/// cross the bottom of its rect moves on to the next one; the last rect keeps
/// whatever does not fit, so lines may extend below the container.
pub fn layout_paragraph<M>(
    container: &Container,
    paragraph: &AttributedString,
    options: &LayoutOptions,
    measurer: &M,
) -> Paragraph
where
    M: TextMeasurer + ?Sized,
{
    let attributes = paragraph.attributes();
    let default_height =
        line_height(paragraph, measurer).unwrap_or_else(|| measurer.line_height(&attributes));

    let rects = generate_line_rects(container, default_height);
    let indent = attributes.indent;

    // the indent only narrows the first line; a lone rect keeps its full
    // width for the lines after it
    let mut widths: Vec<Pt> = rects.iter().map(|rect| rect.width).collect();
    if indent != Pt::ZERO {
        if widths.len() == 1 {
            widths.push(widths[0]);
        }
        if let Some(first) = widths.first_mut() {
            *first = (*first - indent).max(Pt::ZERO);
        }
    }

    let strings = linebreak(paragraph, &widths, options, measurer);
    let count = strings.len();

    let mut rects = rects.into_iter();
    let Some(mut rect) = rects.next() else {
        return Vec::new();
    };
    let mut y = rect.y;

    let mut lines = Vec::with_capacity(count);
    for (index, string) in strings.into_iter().enumerate() {
        let height = line_height(&string, measurer).unwrap_or(default_height);

        if y + height > rect.bottom() {
            if let Some(next) = rects.next() {
                rect = next;
                y = rect.y;
            }
        }

        let indent = if index == 0 { indent } else { Pt::ZERO };
        let mut line = Line {
            string,
            bbox: Rect {
                x: rect.x + indent,
                y,
                width: rect.width - indent,
                height,
            },
            x_offset: Pt::ZERO,
            x_advance: Pt::ZERO,
            word_spacing: Pt::ZERO,
            truncated: false,
        };
        align_line(&mut line, attributes.align, index + 1 == count, measurer);

        log::trace!("placed line {:?} at {:?}", line.string.string, line.bbox);

        y += height;
        lines.push(line);
    }

    lines
}
