use super::metrics::{height_at_line_index, line_index_at_height, line_top};
use crate::layout::{balance_columns, block_height, Container, Line};
use crate::tree::LayoutNode;
use crate::{Pt, Rect};

/// Index of the first line that moves to the next page when `node` is cut at
/// `height` (measured from the top of the node's parent, like `node.bbox.y`).
///
/// Honours the node's widows and orphans: `0` pushes the whole node to the
/// next page, and the line count keeps it whole on this one.
pub fn line_break_index(node: &LayoutNode, height: Pt) -> usize {
    let widows = node.style.widows;
    let orphans = node.style.orphans;
    let total = node.lines().len();
    let candidate = line_index_at_height(node, height - node.bbox.y);

    if candidate == 0 {
        return 0;
    }

    if total < orphans {
        return total;
    }

    if candidate < orphans || total < orphans + widows {
        return 0;
    }

    if total == orphans + widows {
        return orphans;
    }

    if total - candidate < widows {
        return total - widows;
    }

    candidate
}

/// Re-deal the lines of one fragment across the node's columns, starting
/// from the fragment's origin
fn rebalance(lines: Vec<Line>, node: &LayoutNode) -> Vec<Line> {
    let container = Container::new(Rect {
        x: Pt::ZERO,
        y: Pt::ZERO,
        ..node.content_box()
    })
    .with_columns(node.style.column_count, node.style.resolved_column_gap());

    balance_columns(lines, &container)
}

fn shift_up(mut lines: Vec<Line>, by: Pt) -> Vec<Line> {
    for line in &mut lines {
        line.bbox.y -= by;
    }
    lines
}

fn mark_split(node: &mut LayoutNode) {
    if let Some(content) = node.text_content_mut() {
        content.was_split = true;
    }
}

/// Split a laid out text node at `height` into the fragment that stays on
/// the current page and the one that continues on the next.
///
/// The lines are partitioned at [`line_break_index`]. The current fragment
/// loses its bottom margin, padding and border; the next one loses its top
/// ones and starts at the top of its new parent. Multi-column lines are
/// balanced again within each fragment, and each fragment is as tall as its
/// lines.
pub fn split_text(node: &LayoutNode, height: Pt) -> (LayoutNode, LayoutNode) {
    let index = line_break_index(node, height);
    let lines = node.lines();
    let (current_lines, next_lines) = lines.split_at(index.min(lines.len()));
    let (current_lines, next_lines) = (current_lines.to_vec(), next_lines.to_vec());

    log::debug!(
        "splitting text of {} lines at line {index} for height {height}",
        lines.len()
    );

    let current_height = height_at_line_index(node, index);
    let (current_lines, current_height, next_lines, next_height) = if node.style.is_multi_column() {
        let current_lines = rebalance(current_lines, node);
        let next_lines = rebalance(next_lines, node);
        let current_height = block_height(&current_lines);
        let next_height = block_height(&next_lines);
        (current_lines, current_height, next_lines, next_height)
    } else {
        let offset = line_top(lines, index);
        (
            current_lines,
            current_height,
            shift_up(next_lines, offset),
            (node.bbox.height - current_height).max(Pt::ZERO),
        )
    };

    let mut current = node.clone().with_lines(current_lines);
    current.bbox.height = current_height;
    current.margins = current.margins.without_bottom();
    current.padding = current.padding.without_bottom();
    current.borders = current.borders.without_bottom();
    mark_split(&mut current);

    let mut next = node.clone().with_lines(next_lines);
    next.bbox.y = Pt::ZERO;
    next.bbox.height = next_height;
    next.margins = next.margins.without_top();
    next.padding = next.padding.without_top();
    next.borders = next.borders.without_top();
    mark_split(&mut next);

    (current, next)
}

#[cfg(test)]
mod tests {
    use super::super::metrics::fixtures::{stacked, two_columns};
    use super::*;
    use crate::layout::Margins;
    use crate::tree::NodeStyle;

    #[test]
    fn widows_pull_the_break_back() {
        // 5 lines, room for 4: leaving a single widow is not allowed
        assert_eq!(line_break_index(&stacked(5), Pt(80.0)), 3);
    }

    #[test]
    fn nothing_fits_pushes_the_whole_node() {
        assert_eq!(line_break_index(&stacked(5), Pt(10.0)), 0);
    }

    #[test]
    fn short_text_stays_whole() {
        let node = stacked(1).with_style(NodeStyle::default().with_orphans(2));
        assert_eq!(line_break_index(&node, Pt(30.0)), 1);
    }

    #[test]
    fn too_few_lines_before_the_break_moves_everything() {
        // only one line would stay behind
        assert_eq!(line_break_index(&stacked(5), Pt(30.0)), 0);
        // three lines can't satisfy two orphans and two widows
        assert_eq!(line_break_index(&stacked(3), Pt(50.0)), 0);
    }

    #[test]
    fn exactly_orphans_plus_widows_splits_in_the_middle() {
        assert_eq!(line_break_index(&stacked(4), Pt(70.0)), 2);
    }

    #[test]
    fn enough_room_on_both_sides_uses_the_candidate() {
        assert_eq!(line_break_index(&stacked(10), Pt(100.0)), 5);
    }

    #[test]
    fn node_top_reduces_the_available_height() {
        let mut node = stacked(10);
        node.bbox.y = Pt(20.0);
        assert_eq!(line_break_index(&node, Pt(100.0)), 4);
    }

    #[test]
    fn fragments_partition_the_lines() {
        for lines in 0..12 {
            let node = stacked(lines);
            for height in [0.0, 15.0, 40.0, 75.0, 100.0, 500.0] {
                let (current, next) = split_text(&node, Pt(height));
                assert_eq!(current.lines().len() + next.lines().len(), lines);

                if lines >= 4 && !current.lines().is_empty() && !next.lines().is_empty() {
                    assert!(current.lines().len() >= 2);
                    assert!(next.lines().len() >= 2);
                }
            }
        }
    }

    #[test]
    fn cut_edges_lose_their_spacing() {
        let node = stacked(10)
            .with_margins(Margins::all(Pt(5.0)))
            .with_padding(Margins::all(Pt(3.0)))
            .with_borders(Margins::all(Pt(1.0)));
        let (current, next) = split_text(&node, Pt(100.0));

        assert_eq!(current.margins, Margins::trbl(Pt(5.0), Pt(5.0), Pt::ZERO, Pt(5.0)));
        assert_eq!(current.padding.bottom, Pt::ZERO);
        assert_eq!(current.borders.bottom, Pt::ZERO);
        assert_eq!(next.margins, Margins::trbl(Pt::ZERO, Pt(5.0), Pt(5.0), Pt(5.0)));
        assert_eq!(next.padding.top, Pt::ZERO);
        assert_eq!(next.borders.top, Pt::ZERO);
        assert!(current.was_split() && next.was_split());
    }

    #[test]
    fn single_column_fragments_keep_their_heights() {
        let (current, next) = split_text(&stacked(10), Pt(100.0));

        assert_eq!(current.lines().len(), 5);
        assert_eq!(current.bbox.height, Pt(100.0));
        assert_eq!(next.bbox.y, Pt::ZERO);
        assert_eq!(next.bbox.height, Pt(100.0));
        assert_eq!(next.lines()[0].bbox.y, Pt::ZERO);
        assert_eq!(next.lines()[4].bbox.y, Pt(80.0));
    }

    #[test]
    fn multi_column_fragments_are_rebalanced() {
        let (current, next) = split_text(&two_columns(6), Pt(40.0));

        let positions: Vec<(Pt, Pt)> = current
            .lines()
            .iter()
            .map(|line| (line.bbox.x, line.bbox.y))
            .collect();
        assert_eq!(
            positions,
            vec![
                (Pt(0.0), Pt(0.0)),
                (Pt(0.0), Pt(20.0)),
                (Pt(110.0), Pt(0.0)),
                (Pt(110.0), Pt(20.0)),
            ]
        );
        assert_eq!(current.bbox.height, Pt(40.0));

        let positions: Vec<(Pt, Pt)> = next
            .lines()
            .iter()
            .map(|line| (line.bbox.x, line.bbox.y))
            .collect();
        assert_eq!(positions, vec![(Pt(0.0), Pt(0.0)), (Pt(110.0), Pt(0.0))]);
        assert_eq!(next.bbox.height, Pt(20.0));
    }
}
