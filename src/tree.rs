use crate::floats::{exclusion_rects, FloatSibling};
use crate::layout::{typeset, Container, LayoutOptions, Line, Margins};
use crate::measure::TextMeasurer;
use crate::style::{Clear, Float, TruncateMode};
use crate::{AttributedString, Pt, Rect};

/// Column gap used when a multi-column node names neither a gap nor a font
/// size
const DEFAULT_COLUMN_GAP: Pt = Pt(18.0);

/// Style properties of a node that affect floats, columns and pagination
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub float: Float,
    pub clear: Clear,
    /// Minimum number of lines left at the top of a page after a split
    pub widows: usize,
    /// Minimum number of lines kept at the bottom of a page before a split
    pub orphans: usize,
    pub column_count: usize,
    pub column_gap: Option<Pt>,
    pub font_size: Option<Pt>,
    pub max_lines: Option<usize>,
    pub truncate_mode: TruncateMode,
}

impl Default for NodeStyle {
    fn default() -> Self {
        NodeStyle {
            float: Float::None,
            clear: Clear::None,
            widows: 2,
            orphans: 2,
            column_count: 1,
            column_gap: None,
            font_size: None,
            max_lines: None,
            truncate_mode: TruncateMode::Clip,
        }
    }
}

impl NodeStyle {
    pub fn with_float(mut self, float: Float) -> Self {
        self.float = float;
        self
    }

    pub fn with_clear(mut self, clear: Clear) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_widows(mut self, widows: usize) -> Self {
        self.widows = widows;
        self
    }

    pub fn with_orphans(mut self, orphans: usize) -> Self {
        self.orphans = orphans;
        self
    }

    pub fn with_columns(mut self, column_count: usize, column_gap: Option<Pt>) -> Self {
        self.column_count = column_count;
        self.column_gap = column_gap;
        self
    }

    pub fn with_font_size(mut self, font_size: Pt) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    pub fn with_truncate_mode(mut self, truncate_mode: TruncateMode) -> Self {
        self.truncate_mode = truncate_mode;
        self
    }

    pub fn is_multi_column(&self) -> bool {
        self.column_count > 1
    }

    /// The gap between columns: the declared gap, else one em, else a fixed
    /// default. Always zero for a single column.
    pub fn resolved_column_gap(&self) -> Pt {
        if !self.is_multi_column() {
            return Pt::ZERO;
        }

        self.column_gap
            .or(self.font_size)
            .unwrap_or(DEFAULT_COLUMN_GAP)
    }
}

/// Lines of a text node along with what float resolution and pagination
/// have recorded about it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextContent {
    pub lines: Vec<Line>,
    /// Floats preceding the text in its container, which its lines flow
    /// around
    pub float_siblings: Vec<FloatSibling>,
    /// Set on both fragments of a text node split across pages
    pub was_split: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    View,
    Text(TextContent),
}

/// A node of the laid out document tree. Box geometry comes from the box
/// model engine: `bbox` is the border box, positioned relative to the
/// parent's border box.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub kind: NodeKind,
    pub bbox: Rect,
    pub margins: Margins,
    pub padding: Margins,
    pub borders: Margins,
    pub style: NodeStyle,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    fn new(kind: NodeKind, bbox: Rect) -> LayoutNode {
        LayoutNode {
            kind,
            bbox,
            margins: Margins::empty(),
            padding: Margins::empty(),
            borders: Margins::empty(),
            style: NodeStyle::default(),
            children: Vec::new(),
        }
    }

    /// A container node
    pub fn view(bbox: Rect) -> LayoutNode {
        LayoutNode::new(NodeKind::View, bbox)
    }

    /// A text node with no lines laid out yet
    pub fn text(bbox: Rect) -> LayoutNode {
        LayoutNode::new(NodeKind::Text(TextContent::default()), bbox)
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_padding(mut self, padding: Margins) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_borders(mut self, borders: Margins) -> Self {
        self.borders = borders;
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_children(mut self, children: Vec<LayoutNode>) -> Self {
        self.children = children;
        self
    }

    /// Replace the lines of a text node. Views have no lines and are returned
    /// unchanged.
    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        if let NodeKind::Text(content) = &mut self.kind {
            content.lines = lines;
        }
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn text_content(&self) -> Option<&TextContent> {
        match &self.kind {
            NodeKind::Text(content) => Some(content),
            NodeKind::View => None,
        }
    }

    pub(crate) fn text_content_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            NodeKind::Text(content) => Some(content),
            NodeKind::View => None,
        }
    }

    /// Lines of a text node; empty for views
    pub fn lines(&self) -> &[Line] {
        self.text_content()
            .map(|content| content.lines.as_slice())
            .unwrap_or_default()
    }

    pub fn float_siblings(&self) -> &[FloatSibling] {
        self.text_content()
            .map(|content| content.float_siblings.as_slice())
            .unwrap_or_default()
    }

    pub fn was_split(&self) -> bool {
        self.text_content().is_some_and(|content| content.was_split)
    }

    /// The area inside borders and padding, in the same coordinate space as
    /// `bbox`
    pub fn content_box(&self) -> Rect {
        Rect {
            x: self.bbox.x + self.borders.left + self.padding.left,
            y: self.bbox.y + self.borders.top + self.padding.top,
            width: (self.bbox.width - self.borders.horizontal() - self.padding.horizontal())
                .max(Pt::ZERO),
            height: (self.bbox.height - self.borders.vertical() - self.padding.vertical())
                .max(Pt::ZERO),
        }
    }

    /// The container a text node's lines are typeset into. Its origin is the
    /// node's content box, so lines come out relative to it; preceding floats
    /// become exclusion rects in the same space.
    pub fn text_container(&self) -> Container {
        let content = self.content_box();

        let mut container = Container::new(Rect {
            x: Pt::ZERO,
            y: Pt::ZERO,
            ..content
        })
        .with_exclude_rects(exclusion_rects(self.float_siblings(), &content))
        .with_columns(self.style.column_count, self.style.resolved_column_gap())
        .with_truncate_mode(self.style.truncate_mode);
        container.max_lines = self.style.max_lines;

        container
    }

    /// Typeset `paragraphs` into this text node, replacing its lines. Every
    /// line is kept (up to the node's line limit), and the node's height grows
    /// to fit them when they need more room than the box model gave it.
    pub fn layout_text<M>(
        self,
        paragraphs: &[AttributedString],
        options: &LayoutOptions,
        measurer: &M,
    ) -> LayoutNode
    where
        M: TextMeasurer + ?Sized,
    {
        if !self.is_text() {
            return self;
        }

        // the node's own height never cuts text off; pagination splits it instead
        let mut container = self.text_container();
        container.rect.height = Pt(f32::INFINITY);

        let result = typeset(&container, paragraphs, options, measurer);
        let lines: Vec<Line> = result.paragraphs.into_iter().flatten().collect();

        let extent = lines
            .iter()
            .map(|line| line.bbox.bottom())
            .reduce(Pt::max)
            .unwrap_or(Pt::ZERO);
        let chrome = self.borders.vertical() + self.padding.vertical();

        let mut node = self.with_lines(lines);
        node.bbox.height = node.bbox.height.max(extent + chrome);
        node
    }
}
