use super::{line_width, Node, INFINITY};
use crate::units::Pt;

const LINE_DEMERITS: f32 = 10.0;
const FLAGGED_DEMERITS: f32 = 100.0;
const FITNESS_DEMERITS: f32 = 3000.0;

#[derive(Debug, Default, Copy, Clone)]
struct Totals {
    width: Pt,
    stretch: Pt,
    shrink: Pt,
}

#[derive(Debug, Clone)]
struct Breakpoint {
    position: usize,
    demerits: f32,
    /// 0-based number of the line that starts after this break
    line: usize,
    fitness: usize,
    totals: Totals,
    previous: Option<usize>,
}

#[derive(Debug, Copy, Clone)]
struct Candidate {
    active: usize,
    demerits: f32,
    line: usize,
    fitness: usize,
}

fn fitness_class(ratio: f32) -> usize {
    if ratio < -0.5 {
        0
    } else if ratio <= 0.5 {
        1
    } else if ratio <= 1.0 {
        2
    } else {
        3
    }
}

fn badness(ratio: f32) -> f32 {
    100.0 * ratio.abs().powi(3)
}

struct Breaker<'a> {
    nodes: &'a [Node],
    widths: &'a [Pt],
    tolerance: f32,
    sum: Totals,
    /// every breakpoint ever created; `active` indexes into it
    breakpoints: Vec<Breakpoint>,
    active: Vec<usize>,
}

impl<'a> Breaker<'a> {
    /// Adjustment ratio of the line from `from` to the node at `index`
    fn ratio(&self, from: &Breakpoint, index: usize) -> f32 {
        let mut width = self.sum.width - from.totals.width;
        if let Node::Penalty { width: hyphen, .. } = self.nodes[index] {
            width += hyphen;
        }

        let available = line_width(self.widths, from.line);

        if width < available {
            let stretch = self.sum.stretch - from.totals.stretch;
            if stretch.is_positive() {
                (available - width).0 / stretch.0
            } else {
                INFINITY
            }
        } else if width > available {
            let shrink = self.sum.shrink - from.totals.shrink;
            if shrink.is_positive() {
                (available - width).0 / shrink.0
            } else {
                -INFINITY
            }
        } else {
            0.0
        }
    }

    /// Totals at the start of the line following a break at `index`: glue
    /// after the break is discarded up to the next box
    fn totals_after(&self, index: usize) -> Totals {
        let mut totals = self.sum;

        for (offset, node) in self.nodes[index..].iter().enumerate() {
            match *node {
                Node::Glue {
                    width,
                    stretch,
                    shrink,
                    ..
                } => {
                    totals.width += width;
                    totals.stretch += stretch;
                    totals.shrink += shrink;
                }
                Node::Box { .. } => break,
                Node::Penalty { cost, .. } if cost <= -INFINITY && offset > 0 => break,
                Node::Penalty { .. } => {}
            }
        }

        totals
    }

    fn consider(&mut self, index: usize) {
        let (cost, flagged) = match self.nodes[index] {
            Node::Penalty { cost, flagged, .. } => (cost, flagged),
            _ => (0.0, false),
        };
        let forced = cost <= -INFINITY;

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut still_active = Vec::with_capacity(self.active.len());

        for &active in &self.active {
            let from = &self.breakpoints[active];
            let ratio = self.ratio(from, index);

            if ratio >= -1.0 && !forced {
                still_active.push(active);
            }

            if !(-1.0..=self.tolerance).contains(&ratio) {
                continue;
            }

            let mut demerits = (LINE_DEMERITS + badness(ratio)).powi(2);
            if cost >= 0.0 {
                demerits += cost.powi(2);
            } else if !forced {
                demerits -= cost.powi(2);
            }

            let previous_flagged = matches!(
                self.nodes.get(from.position),
                Some(Node::Penalty { flagged: true, .. })
            );
            if flagged && previous_flagged {
                demerits += FLAGGED_DEMERITS;
            }

            let fitness = fitness_class(ratio);
            if fitness.abs_diff(from.fitness) > 1 {
                demerits += FITNESS_DEMERITS;
            }
            demerits += from.demerits;

            let line = from.line + 1;
            match candidates
                .iter_mut()
                .find(|candidate| candidate.line == line && candidate.fitness == fitness)
            {
                Some(existing) if existing.demerits <= demerits => {}
                Some(existing) => {
                    *existing = Candidate {
                        active,
                        demerits,
                        line,
                        fitness,
                    }
                }
                None => candidates.push(Candidate {
                    active,
                    demerits,
                    line,
                    fitness,
                }),
            }
        }

        self.active = still_active;

        if candidates.is_empty() {
            return;
        }

        let totals = self.totals_after(index);
        for candidate in candidates {
            self.breakpoints.push(Breakpoint {
                position: index,
                demerits: candidate.demerits,
                line: candidate.line,
                fitness: candidate.fitness,
                totals,
                previous: Some(candidate.active),
            });
            self.active.push(self.breakpoints.len() - 1);
        }
    }
}

/// Compute the optimal break positions (node indices) for `nodes`, where
/// `widths[i]` is the width available to line `i`.
///
/// The returned positions start with the paragraph start, `0`, and end with
/// the final forced break. An empty result means no set of breaks keeps every
/// line's adjustment ratio within `[-1, tolerance]`.
pub fn knuth_plass(nodes: &[Node], widths: &[Pt], tolerance: f32) -> Vec<usize> {
    let mut breaker = Breaker {
        nodes,
        widths,
        tolerance,
        sum: Totals::default(),
        breakpoints: vec![Breakpoint {
            position: 0,
            demerits: 0.0,
            line: 0,
            fitness: 0,
            totals: Totals::default(),
            previous: None,
        }],
        active: vec![0],
    };

    for (index, node) in nodes.iter().enumerate() {
        match *node {
            Node::Box { width, .. } => breaker.sum.width += width,
            Node::Glue {
                width,
                stretch,
                shrink,
                ..
            } => {
                if index > 0 && nodes[index - 1].is_box() {
                    breaker.consider(index);
                }
                breaker.sum.width += width;
                breaker.sum.stretch += stretch;
                breaker.sum.shrink += shrink;
            }
            Node::Penalty { cost, .. } if cost < INFINITY => breaker.consider(index),
            Node::Penalty { .. } => {}
        }

        if breaker.active.is_empty() {
            return Vec::new();
        }
    }

    let Some(best) = breaker
        .active
        .iter()
        .copied()
        .min_by(|&a, &b| {
            breaker.breakpoints[a]
                .demerits
                .total_cmp(&breaker.breakpoints[b].demerits)
        })
    else {
        return Vec::new();
    };

    let mut positions = Vec::new();
    let mut current = Some(best);
    while let Some(index) = current {
        let breakpoint = &breaker.breakpoints[index];
        positions.push(breakpoint.position);
        current = breakpoint.previous;
    }
    positions.reverse();
    positions
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
    fn single_line_breaks_only_at_the_end() {
        let mut nodes = vec![word(3.0, 0), Node::glue(Pt(1.0), 3, 4), word(3.0, 4)];
        finish(&mut nodes, 7);
        assert_eq!(knuth_plass(&nodes, &[Pt(20.0)], 4.0), vec![0, 4]);
    }

    #[test]
    fn prefers_balanced_lines() {
        // "aaa bbb ccc ddd" into 8-wide lines
        let mut nodes = vec![
            word(3.0, 0),
            Node::glue(Pt(1.0), 3, 4),
            word(3.0, 4),
            Node::glue(Pt(1.0), 7, 8),
            word(3.0, 8),
            Node::glue(Pt(1.0), 11, 12),
            word(3.0, 12),
        ];
        finish(&mut nodes, 15);
        assert_eq!(knuth_plass(&nodes, &[Pt(8.0)], 4.0), vec![0, 3, 8]);
    }

    #[test]
    fn infeasible_paragraph_yields_no_breaks() {
        let mut nodes = vec![word(10.0, 0), Node::glue(Pt(1.0), 10, 11), word(2.0, 11)];
        finish(&mut nodes, 13);
        assert!(knuth_plass(&nodes, &[Pt(4.0)], 50.0).is_empty());
    }

    #[test]
    fn tolerance_bounds_loose_lines() {
        // the first line can only stretch its single space by a ratio of 8
        let mut nodes = vec![
            word(1.0, 0),
            Node::glue(Pt(1.0), 1, 2),
            word(1.0, 2),
            Node::glue(Pt(1.0), 3, 4),
            word(10.0, 4),
        ];
        finish(&mut nodes, 14);
        let widths = [Pt(7.0), Pt(10.0)];
        assert!(knuth_plass(&nodes, &widths, 4.0).is_empty());
        assert_eq!(knuth_plass(&nodes, &widths, 9.0), vec![0, 3, 6]);
    }
}
