//! Paragraph line breaking.
//!
//! Syllables are turned into the box/glue/penalty model of Knuth and Plass:
//! words are rigid boxes, spaces are glue that may stretch or shrink, and
//! hyphenation points are penalties. The optimal breaker minimises the total
//! demerits over the whole paragraph; when no feasible solution exists even
//! at the loosest tolerance, a greedy best-fit breaker takes over so that a
//! non-empty paragraph always yields lines.

mod best_fit;
mod knuth_plass;

pub use best_fit::best_fit;
pub use knuth_plass::knuth_plass;

use super::options::LayoutOptions;
use super::segment::wrap_words;
use crate::attributed::AttributedString;
use crate::measure::TextMeasurer;
use crate::style::TextAlign;
use crate::units::Pt;
use unicode_width::UnicodeWidthChar;

/// Cost that counts as "never" for penalties and "unbounded" for stretch
pub const INFINITY: f32 = 10000.0;

const DEFAULT_TOLERANCE: f32 = 4.0;
const TOLERANCE_STEPS: f32 = 5.0;
const TOLERANCE_LIMIT: f32 = 50.0;

const JUSTIFIED_HYPHENATION_PENALTY: f32 = 100.0;
const HYPHENATION_PENALTY: f32 = 600.0;

// glue stretches by width * WIDTH / STRETCH and shrinks by width * WIDTH / SHRINK
const GLUE_WIDTH: f32 = 3.0;
const GLUE_STRETCH: f32 = 6.0;
const GLUE_SHRINK: f32 = 9.0;

/// An item of the Knuth-Plass paragraph model. `start` and `end` are byte
/// offsets into the paragraph string.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Node {
    /// Unbreakable content
    Box {
        width: Pt,
        start: usize,
        end: usize,
        hyphenated: bool,
    },
    /// Breakable, elastic space
    Glue {
        width: Pt,
        start: usize,
        end: usize,
        stretch: Pt,
        shrink: Pt,
    },
    /// A possible break with a cost; `width` is only present when the break
    /// is taken (the hyphen)
    Penalty { width: Pt, cost: f32, flagged: bool },
}

impl Node {
    pub fn glue(width: Pt, start: usize, end: usize) -> Node {
        Node::Glue {
            width,
            start,
            end,
            stretch: width * GLUE_WIDTH / GLUE_STRETCH,
            shrink: width * GLUE_WIDTH / GLUE_SHRINK,
        }
    }

    /// Byte offset just past the text this node covers
    pub fn end(&self) -> Option<usize> {
        match self {
            Node::Box { end, .. } | Node::Glue { end, .. } => Some(*end),
            Node::Penalty { .. } => None,
        }
    }

    pub fn is_box(&self) -> bool {
        matches!(self, Node::Box { .. })
    }
}

/// Width available to the given (0-based) line. Lines past the end of
/// `widths` reuse the last entry.
pub(crate) fn line_width(widths: &[Pt], line: usize) -> Pt {
    widths
        .get(line)
        .or_else(|| widths.last())
        .copied()
        .unwrap_or(Pt::ZERO)
}

/// Build the node sequence for a segmented paragraph. The sequence always
/// ends with infinitely stretchable glue and a forced break.
pub fn get_nodes<M>(string: &AttributedString, options: &LayoutOptions, measurer: &M) -> Vec<Node>
where
    M: TextMeasurer + ?Sized,
{
    let attributes = string.attributes();
    let hyphen_width = options
        .hyphen()
        .map(|hyphen| measurer.advance_width(hyphen, &attributes))
        .unwrap_or(Pt::ZERO);
    let hyphen_penalty = options.hyphenation_penalty.unwrap_or(match attributes.align {
        TextAlign::Justify => JUSTIFIED_HYPHENATION_PENALTY,
        _ => HYPHENATION_PENALTY,
    });

    let mut nodes = Vec::with_capacity(string.syllables.len() * 2 + 2);
    let mut start = 0;

    for (index, syllable) in string.syllables.iter().enumerate() {
        let end = start + syllable.len();
        let width = measurer.advance_width_between(start, end, string);

        if syllable.trim().is_empty() {
            nodes.push(Node::glue(width, start, end));
        } else {
            let hyphenated = string
                .syllables
                .get(index + 1)
                .is_some_and(|next| !next.trim().is_empty());

            nodes.push(Node::Box {
                width,
                start,
                end,
                hyphenated,
            });

            if hyphenated {
                nodes.push(Node::Penalty {
                    width: hyphen_width,
                    cost: hyphen_penalty,
                    flagged: true,
                });
            }
        }

        start = end;
    }

    nodes.push(Node::Glue {
        width: Pt::ZERO,
        start,
        end: start,
        stretch: Pt(INFINITY),
        shrink: Pt::ZERO,
    });
    nodes.push(Node::Penalty {
        width: Pt::ZERO,
        cost: -INFINITY,
        flagged: true,
    });

    nodes
}

/// East Asian wide and fullwidth characters are broken between without a
/// hyphen
fn is_east_asian_wide(ch: char) -> bool {
    ch.width() == Some(2)
}

fn should_insert_hyphen(line: &AttributedString) -> bool {
    line.trailing_char()
        .is_some_and(|last| !is_east_asian_wide(last))
}

/// Slice the paragraph at the chosen break positions (excluding the initial
/// position 0)
fn break_lines(
    string: &AttributedString,
    nodes: &[Node],
    breaks: &[usize],
    hyphen: Option<&str>,
) -> Vec<AttributedString> {
    let mut lines = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;

    for &position in breaks {
        // the final forced break is the end of the paragraph
        if position + 1 >= nodes.len() {
            continue;
        }

        let (end, at_penalty) = match nodes[position] {
            Node::Penalty { .. } => {
                let end = nodes[..position]
                    .iter()
                    .rev()
                    .find_map(Node::end)
                    .unwrap_or(start);
                (end, true)
            }
            node => (node.end().unwrap_or(start), false),
        };

        if end <= start {
            continue;
        }

        let mut line = string.slice(start, end);
        if at_penalty && should_insert_hyphen(&line) {
            if let Some(hyphen) = hyphen {
                line = line.with_appended(hyphen);
            }
        }

        lines.push(line);
        start = end;
    }

    if start < string.len() || lines.is_empty() {
        lines.push(string.slice(start, string.len()));
    }

    lines
}

/// Break a paragraph into lines fitting `widths`, where `widths[i]` is the
/// space available to line `i` and the last entry applies to every line past
/// the end.
///
/// Unsegmented input is segmented first. The result is never empty: an empty
/// paragraph produces a single empty line.
pub fn linebreak<M>(
    string: &AttributedString,
    widths: &[Pt],
    options: &LayoutOptions,
    measurer: &M,
) -> Vec<AttributedString>
where
    M: TextMeasurer + ?Sized,
{
    if string.is_empty() {
        return vec![string.clone()];
    }

    let segmented;
    let string = if string.syllables.is_empty() {
        segmented = wrap_words(string, options);
        &segmented
    } else {
        string
    };

    let nodes = get_nodes(string, options, measurer);

    let mut tolerance = options.tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let mut breaks = knuth_plass(&nodes, widths, tolerance);

    while breaks.is_empty() && tolerance < TOLERANCE_LIMIT {
        tolerance += TOLERANCE_STEPS;
        log::debug!("no feasible line breaks, retrying with tolerance {tolerance}");
        breaks = knuth_plass(&nodes, widths, tolerance);
    }

    if breaks.is_empty() || breaks == [0] {
        log::debug!(
            "optimal line breaking failed for {:?}, falling back to best fit",
            string.string
        );
        breaks = best_fit(&nodes, widths);
    }

    break_lines(
        string,
        &nodes,
        breaks.get(1..).unwrap_or_default(),
        options.hyphen(),
    )
}
