use crate::rect::Rect;
use crate::style::TruncateMode;
use crate::units::Pt;

/// The region text is typeset into, along with the constraints that shape
/// how lines fill it
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub rect: Rect,
    /// Areas lines must flow around, such as floated boxes. Ignored when
    /// laying out multiple columns.
    pub exclude_rects: Vec<Rect>,
    pub column_count: usize,
    pub column_gap: Pt,
    /// Maximum number of lines across all paragraphs
    pub max_lines: Option<usize>,
    pub truncate_mode: TruncateMode,
}

impl Default for Container {
    fn default() -> Self {
        Container::new(Rect::default())
    }
}

impl Container {
    /// A single-column container without exclusions or a line limit
    pub fn new(rect: Rect) -> Container {
        Container {
            rect,
            exclude_rects: Vec::new(),
            column_count: 1,
            column_gap: Pt::ZERO,
            max_lines: None,
            truncate_mode: TruncateMode::default(),
        }
    }

    pub fn with_exclude_rects(mut self, exclude_rects: Vec<Rect>) -> Self {
        self.exclude_rects = exclude_rects;
        self
    }

    pub fn with_columns(mut self, column_count: usize, column_gap: Pt) -> Self {
        self.column_count = column_count;
        self.column_gap = column_gap;
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

    /// Width of each column once the gaps between them are taken out
    pub fn column_width(&self) -> Pt {
        let count = self.column_count.max(1) as f32;
        (self.rect.width - self.column_gap * (count - 1.0)) / count
    }

    /// The rects of every column, left to right, each spanning the full
    /// container height
    pub fn column_rects(&self) -> Vec<Rect> {
        let width = self.column_width();

        (0..self.column_count.max(1))
            .map(|index| Rect {
                x: self.rect.x + (width + self.column_gap) * index as f32,
                width,
                ..self.rect
            })
            .collect()
    }

    /// The same constraints applied to a different rect
    pub(crate) fn with_rect(&self, rect: Rect) -> Container {
        Container {
            rect,
            ..self.clone()
        }
    }
}
