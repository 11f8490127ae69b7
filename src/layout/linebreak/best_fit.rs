use super::{line_width, Node, INFINITY};
use crate::units::Pt;

fn ratio(width: Pt, stretch: Pt, shrink: Pt, available: Pt) -> f32 {
    if width < available {
        if stretch.is_positive() {
            (available - width).0 / stretch.0
        } else {
            INFINITY
        }
    } else if width > available {
        if shrink.is_positive() {
            (available - width).0 / shrink.0
        } else {
            -INFINITY
        }
    } else {
        0.0
    }
}

/// Choose the break position ending the line that starts at node `start`
fn next_break(nodes: &[Node], start: usize, available: Pt) -> usize {
    let last = nodes.len() - 1;

    let mut width = Pt::ZERO;
    let mut stretch = Pt::ZERO;
    let mut shrink = Pt::ZERO;
    let mut seen_box = false;
    let mut best: Option<(usize, f32)> = None;

    for (index, node) in nodes.iter().enumerate().skip(start) {
        let candidate = match *node {
            Node::Box { width: box_width, .. } => {
                width += box_width;
                seen_box = true;
                None
            }
            Node::Glue {
                width: glue_width,
                stretch: glue_stretch,
                shrink: glue_shrink,
                ..
            } => {
                let candidate = (seen_box && nodes[index - 1].is_box())
                    .then(|| (ratio(width, stretch, shrink, available), 0.0));
                if seen_box {
                    width += glue_width;
                    stretch += glue_stretch;
                    shrink += glue_shrink;
                }
                candidate
            }
            Node::Penalty {
                width: hyphen,
                cost,
                ..
            } if cost < INFINITY && (seen_box || index == last) => {
                Some((ratio(width + hyphen, stretch, shrink, available), cost))
            }
            Node::Penalty { .. } => None,
        };

        let Some((ratio, cost)) = candidate else {
            continue;
        };

        if ratio < -1.0 {
            // overfull: settle for the best line so far, or this one when
            // nothing fit at all
            return best.map_or(index, |(position, _)| position);
        }

        if index == last {
            return index;
        }

        let demerits = (100.0 * ratio.abs().powi(3)).min(INFINITY) + cost;
        if best.map_or(true, |(_, lowest)| demerits <= lowest) {
            best = Some((index, demerits));
        }
    }

    last
}

/// Greedy line breaking: each line takes the feasible break with the lowest
/// `100·|ratio|³ + penalty`, or the first break after an overlong box.
///
/// Always succeeds for a node sequence ending in a forced break. Like
/// [`knuth_plass`](super::knuth_plass), the returned positions start with `0`.
pub fn best_fit(nodes: &[Node], widths: &[Pt]) -> Vec<usize> {
    let mut breaks = vec![0];
    if nodes.is_empty() {
        return breaks;
    }

    let last = nodes.len() - 1;
    let mut start = 0;
    let mut line = 0;

    loop {
        let position = next_break(nodes, start, line_width(widths, line));
        breaks.push(position);

        if position >= last {
            return breaks;
        }

        start = position + 1;
        line += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(width: f32, start: usize) -> Node {
        Node::Box {
            width: Pt(width),
            start,
            end: start + width as usize,
            hyphenated: false,
        }
    }

    fn finish(nodes: &mut Vec<Node>, at: usize) {
        nodes.push(Node::Glue {
            width: Pt::ZERO,
            start: at,
            end: at,
            stretch: Pt(INFINITY),
            shrink: Pt::ZERO,
        });
        nodes.push(Node::Penalty {
            width: Pt::ZERO,
            cost: -INFINITY,
            flagged: true,
        });
    }

    #[test]
    fn overlong_box_gets_a_line_of_its_own() {
        let mut nodes = vec![word(10.0, 0), Node::glue(Pt(1.0), 10, 11), word(2.0, 11)];
        finish(&mut nodes, 13);
        assert_eq!(best_fit(&nodes, &[Pt(4.0)]), vec![0, 1, 4]);
    }

    #[test]
    fn fills_lines_greedily() {
        let mut nodes = vec![
            word(3.0, 0),
            Node::glue(Pt(1.0), 3, 4),
            word(3.0, 4),
            Node::glue(Pt(1.0), 7, 8),
            word(3.0, 8),
        ];
        finish(&mut nodes, 11);
        assert_eq!(best_fit(&nodes, &[Pt(7.0)]), vec![0, 3, 6]);
    }

    #[test]
    fn always_reaches_the_final_break() {
        let mut nodes: Vec<Node> = (0..20).map(|i| word(50.0, i * 50)).collect();
        finish(&mut nodes, 1000);
        let breaks = best_fit(&nodes, &[Pt(10.0)]);
        assert_eq!(breaks.first(), Some(&0));
        assert_eq!(breaks.last(), Some(&(nodes.len() - 1)));
        assert!(breaks.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
