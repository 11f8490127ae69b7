use crate::layout::{block_height, column_quotas, Line};
use crate::tree::LayoutNode;
use crate::Pt;

/// Running line heights of a block, for measuring balanced columns of any
/// prefix of it without walking the lines again
struct ColumnHeights {
    /// `prefix[i]` is the total height of the first `i` lines
    prefix: Vec<Pt>,
    /// `visible[i]` is the index of the first line at or after `i` with
    /// something to draw
    visible: Vec<usize>,
}

impl ColumnHeights {
    fn new(lines: &[Line]) -> ColumnHeights {
        let mut prefix = Vec::with_capacity(lines.len() + 1);
        let mut total = Pt::ZERO;
        prefix.push(total);
        for line in lines {
            total += line.height();
            prefix.push(total);
        }

        let mut visible = vec![lines.len(); lines.len() + 1];
        for index in (0..lines.len()).rev() {
            visible[index] = if lines[index].is_white_space_only() {
                visible[index + 1]
            } else {
                index
            };
        }

        ColumnHeights { prefix, visible }
    }

    /// Height of the tallest column when the first `count` lines are dealt
    /// across `columns` columns the way the typesetter balances them.
    /// Whitespace-only lines at the top of a column take no room.
    fn tallest(&self, count: usize, columns: usize) -> Pt {
        let mut tallest = Pt::ZERO;
        let mut start = 0;

        for quota in column_quotas(count, columns) {
            let end = start + quota;
            let top = self.visible[start].min(end);
            tallest = tallest.max(self.prefix[end] - self.prefix[top]);
            start = end;
        }

        tallest
    }
}

/// Height taken by the first `index` lines of `node`, before their final
/// positions are known. Multi-column text is balanced across its columns and
/// measured by its tallest column.
pub fn height_at_line_index(node: &LayoutNode, index: usize) -> Pt {
    let lines = node.lines();
    let lines = &lines[..index.min(lines.len())];

    if node.style.is_multi_column() {
        ColumnHeights::new(lines).tallest(lines.len(), node.style.column_count)
    } else {
        lines.iter().map(Line::height).sum()
    }
}

/// Number of leading lines of `node` that fit within `height`
pub fn line_index_at_height(node: &LayoutNode, height: Pt) -> usize {
    let lines = node.lines();

    if node.style.is_multi_column() {
        let heights = ColumnHeights::new(lines);
        return (1..=lines.len())
            .find(|&count| heights.tallest(count, node.style.column_count) > height)
            .map_or(lines.len(), |count| count - 1);
    }

    let mut y = Pt::ZERO;
    for (index, line) in lines.iter().enumerate() {
        if y + line.height() > height {
            return index;
        }
        y += line.height();
    }
    lines.len()
}

/// Height of the already positioned lines of `node`
pub fn lines_height(node: &LayoutNode) -> Pt {
    let lines = node.lines();

    if node.style.is_multi_column() {
        block_height(lines)
    } else {
        lines.iter().map(Line::height).sum()
    }
}

/// Width of the already positioned lines of `node`: the widest line, or for
/// multiple columns the span from the leftmost column to the end of the
/// rightmost line
pub fn lines_width(node: &LayoutNode) -> Pt {
    let lines = node.lines();

    if !node.style.is_multi_column() {
        return lines
            .iter()
            .map(|line| line.x_advance)
            .fold(Pt::ZERO, Pt::max);
    }

    let left = lines.iter().map(|line| line.bbox.x).reduce(Pt::min);
    let right = lines
        .iter()
        .map(|line| {
            let advance = if line.x_advance.is_positive() {
                line.x_advance
            } else {
                line.bbox.width
            };
            line.bbox.x + advance
        })
        .reduce(Pt::max);

    match (left, right) {
        (Some(left), Some(right)) => right - left,
        _ => Pt::ZERO,
    }
}

/// Offset of line `index` from the top of the first line. Indices past the
/// end give the bottom of the last line.
pub fn line_top(lines: &[Line], index: usize) -> Pt {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return Pt::ZERO;
    };

    match lines.get(index) {
        Some(line) => line.bbox.y - first.bbox.y,
        None => last.bbox.bottom() - first.bbox.y,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{line, stacked, two_columns};
    use super::*;
    use crate::tree::NodeStyle;

    #[test]
    fn single_column_heights_accumulate() {
        let node = stacked(5);
        assert_eq!(height_at_line_index(&node, 0), Pt::ZERO);
        assert_eq!(height_at_line_index(&node, 3), Pt(60.0));
        assert_eq!(height_at_line_index(&node, 99), Pt(100.0));
    }

    #[test]
    fn multi_column_height_is_the_tallest_balanced_column() {
        let node = two_columns(6);
        assert_eq!(height_at_line_index(&node, 1), Pt(20.0));
        assert_eq!(height_at_line_index(&node, 2), Pt(20.0));
        assert_eq!(height_at_line_index(&node, 3), Pt(40.0));
        assert_eq!(height_at_line_index(&node, 5), Pt(60.0));
        assert_eq!(height_at_line_index(&node, 6), Pt(60.0));
    }

    #[test]
    fn leading_blank_lines_do_not_count_towards_column_height() {
        let mut node = two_columns(4);
        if let Some(content) = node.text_content_mut() {
            content.lines[2] = line("   ", 0.0, 40.0, 0.0);
        }
        // second column holds a blank line and one real line
        assert_eq!(height_at_line_index(&node, 4), Pt(40.0));
        assert_eq!(height_at_line_index(&node, 3), Pt(40.0));

        if let Some(content) = node.text_content_mut() {
            content.lines[0] = line(" ", 0.0, 0.0, 0.0);
        }
        assert_eq!(height_at_line_index(&node, 4), Pt(20.0));
    }

    #[test]
    fn column_heights_match_balanced_layout() {
        use crate::layout::{balance_columns, Container};
        use crate::Rect;

        let mut node =
            two_columns(0).with_style(NodeStyle::default().with_columns(3, Some(Pt(20.0))));
        let lines: Vec<Line> = (0..60)
            .map(|index| {
                let mut entry = if index % 7 == 3 {
                    line(" ", 0.0, 0.0, 0.0)
                } else {
                    line("text", 0.0, 0.0, 40.0)
                };
                entry.bbox.height = Pt(10.0 + (index % 4) as f32 * 5.0);
                entry
            })
            .collect();
        node = node.with_lines(lines.clone());
        let container =
            Container::new(Rect::new(0.0, 0.0, 200.0, 1000.0)).with_columns(3, Pt(20.0));

        let balanced: Vec<Pt> = (0..=lines.len())
            .map(|count| block_height(&balance_columns(lines[..count].to_vec(), &container)))
            .collect();

        for (count, expected) in balanced.iter().enumerate() {
            assert_eq!(height_at_line_index(&node, count), *expected);
        }

        for budget in [0.0, 12.0, 55.0, 100.0, 260.0, 1000.0] {
            let fits = (1..=lines.len())
                .find(|&count| balanced[count] > Pt(budget))
                .map_or(lines.len(), |count| count - 1);
            assert_eq!(line_index_at_height(&node, Pt(budget)), fits);
        }
    }

    #[test]
    fn line_index_at_height_inverts_height_at_line_index() {
        let node = stacked(5);
        assert_eq!(line_index_at_height(&node, Pt(0.0)), 0);
        assert_eq!(line_index_at_height(&node, Pt(59.0)), 2);
        assert_eq!(line_index_at_height(&node, Pt(60.0)), 3);
        assert_eq!(line_index_at_height(&node, Pt(1000.0)), 5);

        let node = two_columns(6);
        assert_eq!(line_index_at_height(&node, Pt(40.0)), 4);
        assert_eq!(line_index_at_height(&node, Pt(19.0)), 0);
        assert_eq!(line_index_at_height(&node, Pt(60.0)), 6);
    }

    #[test]
    fn lines_height_reads_positions() {
        assert_eq!(lines_height(&stacked(3)), Pt(60.0));
        assert_eq!(lines_height(&stacked(0)), Pt::ZERO);

        let node = LayoutNode::text(crate::Rect::new(0.0, 0.0, 200.0, 60.0))
            .with_style(NodeStyle::default().with_columns(2, None))
            .with_lines(vec![
                line("a", 0.0, 0.0, 10.0),
                line("b", 0.0, 20.0, 10.0),
                line("c", 0.0, 40.0, 10.0),
                line("d", 110.0, 0.0, 10.0),
                line("e", 110.0, 20.0, 10.0),
            ]);
        assert_eq!(lines_height(&node), Pt(60.0));
    }

    #[test]
    fn lines_width_reads_advances() {
        let node = LayoutNode::text(crate::Rect::new(0.0, 0.0, 200.0, 60.0)).with_lines(vec![
            line("a", 0.0, 0.0, 30.0),
            line("b", 0.0, 20.0, 70.0),
        ]);
        assert_eq!(lines_width(&node), Pt(70.0));

        let node = node
            .with_style(NodeStyle::default().with_columns(2, None))
            .with_lines(vec![
                line("a", 0.0, 0.0, 30.0),
                line("b", 110.0, 0.0, 70.0),
                line("", 110.0, 20.0, 0.0),
            ]);
        assert_eq!(lines_width(&node), Pt(200.0));
    }

    #[test]
    fn line_top_is_relative_to_the_first_line() {
        let lines = vec![line("a", 0.0, 100.0, 1.0), line("b", 0.0, 130.0, 1.0)];
        assert_eq!(line_top(&lines, 0), Pt::ZERO);
        assert_eq!(line_top(&lines, 1), Pt(30.0));
        assert_eq!(line_top(&lines, 2), Pt(50.0));
        assert_eq!(line_top(&[], 3), Pt::ZERO);
    }
}
