use super::container::Container;
use super::options::LayoutOptions;
use super::paragraph::{align_line, layout_paragraph, Line, Paragraph};
use crate::attributed::AttributedString;
use crate::measure::TextMeasurer;
use crate::rect::Rect;
use crate::style::TruncateMode;
use crate::units::Pt;

const ELLIPSIS: &str = "\u{2026}";

/// The outcome of filling a container with paragraphs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypesetResult {
    pub paragraphs: Vec<Paragraph>,
    /// Whether any text was left out, either because it did not fit or
    /// because the line limit was reached
    pub truncated: bool,
    /// How far the tallest column reaches below the container. Multi-column
    /// text that does not fit is kept in the last column rather than dropped;
    /// this is how much taller than the container the result is.
    pub overflow: Pt,
}

impl TypesetResult {
    /// Every line of every paragraph, in order
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.paragraphs.iter().flatten()
    }
}

/// Vertical extent of a block of lines, from the top of its highest line to
/// the bottom of its lowest
pub fn block_height(lines: &[Line]) -> Pt {
    let top = lines.iter().map(|line| line.bbox.y).reduce(Pt::min);
    let bottom = lines.iter().map(|line| line.bbox.bottom()).reduce(Pt::max);

    match (top, bottom) {
        (Some(top), Some(bottom)) => bottom - top,
        _ => Pt::ZERO,
    }
}

/// Space a block of lines takes up below `top`, including any gap left above
/// its first line
pub fn consumed_height(lines: &[Line], top: Pt) -> Pt {
    lines
        .iter()
        .map(|line| line.bbox.bottom())
        .reduce(Pt::max)
        .map_or(Pt::ZERO, |bottom| (bottom - top).max(Pt::ZERO))
}

/// The leading lines of `lines` that end within `height` below `top`
pub fn slice_at_height(lines: &[Line], top: Pt, height: Pt) -> Paragraph {
    lines
        .iter()
        .take_while(|line| line.bbox.bottom() - top <= height)
        .cloned()
        .collect()
}

/// How many lines each of `columns` columns receives when balancing `total`
/// lines: earlier columns take the larger share of an uneven split
pub fn column_quotas(total: usize, columns: usize) -> Vec<usize> {
    let mut remaining = total;

    (0..columns)
        .map(|column| {
            let quota = remaining.div_ceil(columns - column);
            remaining -= quota;
            quota
        })
        .collect()
}

/// Redistribute lines across the columns of `container` using
/// [`column_quotas`]. Whitespace-only lines at the top of a column collapse
/// to zero height. Lines keep their own width and stay right-aligned to their
/// column so that indents survive.
pub fn balance_columns(lines: Vec<Line>, container: &Container) -> Vec<Line> {
    let columns = container.column_rects();
    let quotas = column_quotas(lines.len(), columns.len());

    let mut column = 0;
    let mut in_column = 0;
    let mut y = container.rect.y;
    let mut at_column_start = true;

    lines
        .into_iter()
        .map(|mut line| {
            if in_column >= quotas[column] && column + 1 < columns.len() {
                column += 1;
                in_column = 0;
                y = columns[column].y;
                at_column_start = true;
            }

            let rect = columns[column];
            line.bbox.x = rect.x + (rect.width - line.bbox.width).max(Pt::ZERO);
            line.bbox.y = y;

            if at_column_start && line.is_white_space_only() {
                line.bbox.height = Pt::ZERO;
            } else {
                at_column_start = false;
                y += line.height();
            }

            in_column += 1;
            line
        })
        .collect()
}

/// Mark the last line of `lines` as truncated, replacing its end with an
/// ellipsis when asked to
fn truncate_block<M>(lines: &mut [Line], mode: TruncateMode, measurer: &M)
where
    M: TextMeasurer + ?Sized,
{
    let Some(line) = lines.last_mut() else {
        return;
    };
    line.truncated = true;

    if mode != TruncateMode::Ellipsis {
        return;
    }

    let mut end = line.string.trimmed_len();
    loop {
        let candidate = line.string.slice(0, end).with_appended(ELLIPSIS);
        let width = measurer.advance_width_between(0, candidate.len(), &candidate);

        if width <= line.bbox.width || end == 0 {
            line.string = candidate;
            break;
        }

        end = line.string.string[..end]
            .char_indices()
            .next_back()
            .map_or(0, |(index, _)| index);
    }

    let align = line.string.attributes().align;
    align_line(line, align, true, measurer);
    log::debug!("truncated with ellipsis: {:?}", line.string.string);
}

fn typeset_single_column<M>(
    container: &Container,
    paragraphs: &[AttributedString],
    options: &LayoutOptions,
    measurer: &M,
) -> TypesetResult
where
    M: TextMeasurer + ?Sized,
{
    let mut result = TypesetResult::default();
    let mut remaining_lines = container.max_lines.unwrap_or(usize::MAX);
    let mut rect = container.rect;

    for paragraph in paragraphs {
        if remaining_lines == 0 {
            if !result.truncated {
                log::debug!("line limit reached with paragraphs left over");
                result.truncated = true;
                if let Some(last) = result.paragraphs.last_mut() {
                    truncate_block(last, container.truncate_mode, measurer);
                }
            }
            break;
        }

        let lines = layout_paragraph(&container.with_rect(rect), paragraph, options, measurer);
        let total = lines.len();
        let mut block: Paragraph = lines.into_iter().take(remaining_lines).collect();
        remaining_lines -= block.len();

        // exclusions may push the first line below the top of the rect
        let height = consumed_height(&block, rect.y);
        if rect.height >= height {
            if block.len() < total {
                log::debug!("line limit cut a paragraph after {} lines", block.len());
                result.truncated = true;
                truncate_block(&mut block, container.truncate_mode, measurer);
            }

            result.paragraphs.push(block);
            rect = Rect {
                height: (rect.height - height).max(Pt::ZERO),
                ..rect.crop(height)
            };
            continue;
        }

        let mut block = slice_at_height(&block, rect.y, rect.height);
        log::debug!(
            "paragraph does not fit in {}, keeping {} of {total} lines",
            rect.height,
            block.len()
        );
        result.truncated = true;

        if block.is_empty() {
            if let Some(last) = result.paragraphs.last_mut() {
                truncate_block(last, container.truncate_mode, measurer);
            }
        } else {
            truncate_block(&mut block, container.truncate_mode, measurer);
            result.paragraphs.push(block);
        }
        break;
    }

    result
}

fn typeset_multi_column<M>(
    container: &Container,
    paragraphs: &[AttributedString],
    options: &LayoutOptions,
    measurer: &M,
) -> TypesetResult
where
    M: TextMeasurer + ?Sized,
{
    let column = Container::new(Rect {
        width: container.column_width(),
        ..container.rect
    });

    // lay everything out in one long column first so every line has its
    // final width and height
    let mut lines: Vec<Line> = Vec::new();
    let mut y = container.rect.y;
    for paragraph in paragraphs {
        let laid_out = layout_paragraph(
            &column.with_rect(Rect { y, ..column.rect }),
            paragraph,
            options,
            measurer,
        );

        for line in laid_out {
            if line.string.runs.is_empty() {
                continue;
            }
            y += line.height();
            lines.push(line);
        }
    }

    let mut truncated = false;
    if let Some(max_lines) = container.max_lines {
        if lines.len() > max_lines {
            log::debug!("line limit cut columns to {max_lines} of {} lines", lines.len());
            lines.truncate(max_lines);
            truncate_block(&mut lines, container.truncate_mode, measurer);
            truncated = true;
        }
    }

    if lines.is_empty() {
        return TypesetResult {
            truncated,
            ..TypesetResult::default()
        };
    }

    let lines = balance_columns(lines, container);

    let bottom = lines
        .iter()
        .map(|line| line.bbox.bottom())
        .reduce(Pt::max)
        .unwrap_or(container.rect.y);
    let overflow = (bottom - container.rect.bottom()).max(Pt::ZERO);
    if overflow.is_positive() {
        log::warn!(
            "{} columns overflow their container by {overflow}",
            container.column_count
        );
    }

    TypesetResult {
        paragraphs: vec![lines],
        truncated,
        overflow,
    }
}

/// Fill `container` with paragraphs.
///
/// A single column takes paragraphs one after another until the container's
/// height or line limit runs out; the paragraph that does not fit is cut at
/// the last line that does and nothing past it is laid out.
///
/// Multiple columns are balanced: all paragraphs are broken into lines of the
/// column width and the lines are dealt out left to right using
/// [`column_quotas`], yielding a single paragraph of positioned lines. Lines
/// that do not fit stay in the last column and are reported as
/// [`TypesetResult::overflow`].
pub fn typeset<M>(
    container: &Container,
    paragraphs: &[AttributedString],
    options: &LayoutOptions,
    measurer: &M,
) -> TypesetResult
where
    M: TextMeasurer + ?Sized,
{
    if container.is_multi_column() {
        typeset_multi_column(container, paragraphs, options, measurer)
    } else {
        typeset_single_column(container, paragraphs, options, measurer)
    }
}
