//! Floated boxes and the text that flows around them.
//!
//! The box model engine lays floated nodes out like any other child; float
//! resolution then pins them to the left or right edge of their container,
//! pushes down siblings that `clear` them, and tells each following text node
//! which floats it has to wrap around. The text node turns those into
//! exclusion rects with [`exclusion_rects`] when it is typeset.

use crate::layout::Margins;
use crate::style::{Clear, Float};
use crate::tree::LayoutNode;
use crate::{Pt, Rect};

/// Position and size of a resolved float, as seen by the siblings after it
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloatSibling {
    pub side: Float,
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
    pub margins: Margins,
}

impl FloatSibling {
    fn of(node: &LayoutNode) -> FloatSibling {
        FloatSibling {
            side: node.style.float,
            x: node.bbox.x,
            y: node.bbox.y,
            width: node.bbox.width,
            height: node.bbox.height,
            margins: node.margins,
        }
    }

    /// The float's border box grown by its margins
    pub fn margin_box(&self) -> Rect {
        Rect {
            x: self.x - self.margins.left,
            y: self.y - self.margins.top,
            width: self.width + self.margins.horizontal(),
            height: self.height + self.margins.vertical(),
        }
    }

    /// Lowest point a clearing sibling has to get below
    fn clear_bottom(&self) -> Pt {
        self.y + self.height + self.margins.bottom
    }
}

/// The y coordinate that clears every float matching `clear`, or zero when
/// none do
fn clear_y(floats: &[FloatSibling], clear: Clear) -> Pt {
    floats
        .iter()
        .filter(|float| clear.clears(float.side))
        .map(FloatSibling::clear_bottom)
        .fold(Pt::ZERO, Pt::max)
}

fn float_x(node: &LayoutNode, parent_width: Pt) -> Pt {
    match node.style.float {
        Float::Left => node.margins.left,
        Float::Right => parent_width - node.bbox.width - node.margins.right,
        Float::None => node.bbox.x,
    }
}

/// Resolve floats in `node` and, independently, in every container below it.
///
/// Children are visited in order. Floated children move to the left or right
/// edge of `node` and join the list of active floats. A child that clears
/// active floats is moved down below them, and every later non-floated
/// sibling moves with it until another clear replaces the offset. Text
/// children receive the active floats as [`FloatSibling`]s, unless they are
/// the continuation of a split.
pub fn resolve_floats(mut node: LayoutNode) -> LayoutNode {
    if node.children.is_empty() {
        return node;
    }

    let parent_width = node.bbox.width;
    let mut floats: Vec<FloatSibling> = Vec::new();
    let mut clear_offset = Pt::ZERO;

    node.children = std::mem::take(&mut node.children)
        .into_iter()
        .map(|mut child| {
            if child.style.float.is_floated() {
                child.bbox.x = float_x(&child, parent_width);
                floats.push(FloatSibling::of(&child));
            } else {
                let offset = (clear_y(&floats, child.style.clear) - child.bbox.y).max(Pt::ZERO);
                if offset.is_positive() {
                    log::trace!("clearing floats, moving siblings down by {offset}");
                    clear_offset = offset;
                }
                child.bbox.y += clear_offset;

                let was_split = child.was_split();
                if let Some(content) = child.text_content_mut() {
                    if !floats.is_empty() && !was_split {
                        content.float_siblings = floats.clone();
                    }
                }
            }

            resolve_floats(child)
        })
        .collect();

    node
}

/// Exclusion rects for text whose content box is `content`: the margin box
/// of each float, relative to the content box origin
pub fn exclusion_rects(floats: &[FloatSibling], content: &Rect) -> Vec<Rect> {
    floats
        .iter()
        .map(|float| {
            let rect = float.margin_box();
            Rect {
                x: rect.x - content.x,
                y: rect.y - content.y,
                ..rect
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeStyle;

    fn floated(side: Float, width: f32, height: f32) -> LayoutNode {
        LayoutNode::view(Rect::new(0.0, 0.0, width, height))
            .with_style(NodeStyle::default().with_float(side))
    }

    fn block(y: f32, clear: Clear) -> LayoutNode {
        LayoutNode::view(Rect::new(0.0, y, 300.0, 20.0))
            .with_style(NodeStyle::default().with_clear(clear))
    }

    fn container(children: Vec<LayoutNode>) -> LayoutNode {
        LayoutNode::view(Rect::new(0.0, 0.0, 300.0, 500.0)).with_children(children)
    }

    #[test]
    fn clear_left_moves_below_a_left_float() {
        let float = floated(Float::Left, 80.0, 100.0)
            .with_margins(Margins::trbl(Pt::ZERO, Pt(10.0), Pt::ZERO, Pt::ZERO));
        let root = resolve_floats(container(vec![float, block(0.0, Clear::Left)]));

        assert_eq!(root.children[0].bbox.x, Pt(0.0));
        assert!(root.children[1].bbox.y >= Pt(100.0));
    }

    #[test]
    fn right_floats_hug_the_right_edge() {
        let float = floated(Float::Right, 80.0, 50.0)
            .with_margins(Margins::trbl(Pt::ZERO, Pt(10.0), Pt::ZERO, Pt(5.0)));
        let root = resolve_floats(container(vec![float]));
        assert_eq!(root.children[0].bbox.x, Pt(210.0));

        let left = floated(Float::Left, 80.0, 50.0).with_margins(Margins::all(Pt(5.0)));
        let root = resolve_floats(container(vec![left]));
        assert_eq!(root.children[0].bbox.x, Pt(5.0));
    }

    #[test]
    fn clear_only_considers_the_matching_side() {
        let root = resolve_floats(container(vec![
            floated(Float::Left, 80.0, 100.0),
            floated(Float::Right, 80.0, 150.0),
            block(0.0, Clear::Left),
        ]));
        assert_eq!(root.children[2].bbox.y, Pt(100.0));

        let root = resolve_floats(container(vec![
            floated(Float::Left, 80.0, 100.0),
            floated(Float::Right, 80.0, 150.0),
            block(0.0, Clear::Both),
        ]));
        assert_eq!(root.children[2].bbox.y, Pt(150.0));
    }

    #[test]
    fn clear_bottom_includes_the_bottom_margin() {
        let float = floated(Float::Left, 80.0, 100.0)
            .with_margins(Margins::trbl(Pt::ZERO, Pt::ZERO, Pt(12.0), Pt::ZERO));
        let root = resolve_floats(container(vec![float, block(30.0, Clear::Both)]));
        assert_eq!(root.children[1].bbox.y, Pt(112.0));
    }

    #[test]
    fn clear_offset_carries_over_to_later_siblings() {
        let root = resolve_floats(container(vec![
            floated(Float::Left, 80.0, 100.0),
            block(0.0, Clear::Left),
            block(20.0, Clear::None),
        ]));
        assert_eq!(root.children[1].bbox.y, Pt(100.0));
        assert_eq!(root.children[2].bbox.y, Pt(120.0));
    }

    #[test]
    fn text_siblings_learn_about_floats() {
        let text = LayoutNode::text(Rect::new(0.0, 0.0, 300.0, 100.0));
        let mut split = LayoutNode::text(Rect::new(0.0, 100.0, 300.0, 100.0));
        if let Some(content) = split.text_content_mut() {
            content.was_split = true;
        }

        let root = resolve_floats(container(vec![
            floated(Float::Left, 80.0, 100.0),
            text,
            split,
        ]));

        assert_eq!(root.children[1].float_siblings().len(), 1);
        assert_eq!(root.children[1].float_siblings()[0].side, Float::Left);
        assert!(root.children[2].float_siblings().is_empty());
    }

    #[test]
    fn nested_containers_have_their_own_floats() {
        let inner = container(vec![floated(Float::Left, 50.0, 200.0)]);
        let root = resolve_floats(container(vec![
            inner,
            block(0.0, Clear::Both),
            LayoutNode::text(Rect::new(0.0, 0.0, 300.0, 20.0)),
        ]));

        assert_eq!(root.children[1].bbox.y, Pt(0.0));
        assert!(root.children[2].float_siblings().is_empty());
        assert_eq!(root.children[0].children[0].bbox.x, Pt(0.0));
    }

    #[test]
    fn exclusions_are_margin_boxes_relative_to_the_text() {
        let float = FloatSibling {
            side: Float::Left,
            x: Pt(0.0),
            y: Pt(10.0),
            width: Pt(80.0),
            height: Pt(100.0),
            margins: Margins::trbl(Pt::ZERO, Pt(10.0), Pt(5.0), Pt::ZERO),
        };
        let content = Rect::new(0.0, 10.0, 300.0, 200.0);

        assert_eq!(
            exclusion_rects(&[float], &content),
            vec![Rect::new(0.0, 0.0, 90.0, 105.0)]
        );
    }
}
