use crate::font::Font;
use crate::style::TextAlign;
use crate::units::Pt;
use id_arena::Id;

/// Style attributes shared by every character of a [`Run`]
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    /// The font to measure the run with. Without a font the measurer falls
    /// back to an estimate based on the font size.
    pub font: Option<Id<Font>>,
    pub font_size: Pt,
    /// Explicit line height; when absent the font's natural line height is used
    pub line_height: Option<Pt>,
    pub align: TextAlign,
    /// Indentation of the first line of the paragraph
    pub indent: Pt,
}

impl Default for Attributes {
    fn default() -> Self {
        Attributes {
            font: None,
            font_size: Pt(12.0),
            line_height: None,
            align: TextAlign::default(),
            indent: Pt::ZERO,
        }
    }
}

impl Attributes {
    pub fn with_font(mut self, font: Id<Font>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_font_size(mut self, font_size: Pt) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_line_height(mut self, line_height: Pt) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_indent(mut self, indent: Pt) -> Self {
        self.indent = indent;
        self
    }
}

/// A styled range `[start, end)` of an [`AttributedString`], in byte offsets
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub attributes: Attributes,
}

impl Run {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A piece of input text and the style it should be set in. Paragraphs are
/// assembled from a sequence of fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub string: String,
    pub attributes: Attributes,
}

impl Fragment {
    pub fn new<S: Into<String>>(string: S, attributes: Attributes) -> Fragment {
        Fragment {
            string: string.into(),
            attributes,
        }
    }
}

/// Text together with the styled runs that cover it and, once segmented, the
/// syllables it may be broken into.
///
/// Runs are contiguous and ordered, covering `[0, string.len())` exactly.
/// After segmentation, concatenating `syllables` reproduces `string`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributedString {
    pub string: String,
    pub runs: Vec<Run>,
    pub syllables: Vec<String>,
}

impl AttributedString {
    /// A string set entirely in one style
    pub fn new<S: Into<String>>(string: S, attributes: Attributes) -> AttributedString {
        AttributedString::from_fragments([Fragment::new(string, attributes)])
    }

    /// Concatenate styled fragments into a single string, one run per
    /// non-empty fragment
    pub fn from_fragments<I>(fragments: I) -> AttributedString
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut string = String::new();
        let mut runs = Vec::new();

        for fragment in fragments {
            if fragment.string.is_empty() {
                continue;
            }

            let start = string.len();
            string.push_str(&fragment.string);
            runs.push(Run {
                start,
                end: string.len(),
                attributes: fragment.attributes,
            });
        }

        AttributedString {
            string,
            runs,
            syllables: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// Attributes of the first run, which govern paragraph-level properties
    /// such as alignment and indent
    pub fn attributes(&self) -> Attributes {
        self.runs
            .first()
            .map(|run| run.attributes.clone())
            .unwrap_or_default()
    }

    /// Copy out the byte range `[start, end)`, keeping the runs that overlap
    /// it. Offsets are clamped to the string and snapped back to character
    /// boundaries.
    pub fn slice(&self, start: usize, end: usize) -> AttributedString {
        let end = floor_char_boundary(&self.string, end.min(self.len()));
        let start = floor_char_boundary(&self.string, start.min(end));

        let runs = self
            .runs
            .iter()
            .filter_map(|run| {
                let run_start = run.start.max(start);
                let run_end = run.end.min(end);
                (run_start < run_end).then(|| Run {
                    start: run_start - start,
                    end: run_end - start,
                    attributes: run.attributes.clone(),
                })
            })
            .collect();

        AttributedString {
            string: self.string[start..end].to_string(),
            runs,
            syllables: Vec::new(),
        }
    }

    /// A copy with `text` added to the end, set in the style of the last run
    pub fn with_appended(&self, text: &str) -> AttributedString {
        let mut result = self.clone();
        result.string.push_str(text);

        match result.runs.last_mut() {
            Some(run) => run.end = result.string.len(),
            None => result.runs.push(Run {
                start: 0,
                end: result.string.len(),
                attributes: Attributes::default(),
            }),
        }

        if !result.syllables.is_empty() {
            result.syllables.push(text.to_string());
        }
        result
    }

    pub fn trailing_char(&self) -> Option<char> {
        self.string.chars().next_back()
    }

    /// Whether the string has no visible content
    pub fn is_white_space_only(&self) -> bool {
        self.string.chars().all(char::is_whitespace)
    }

    /// Byte length of the string without its trailing whitespace
    pub fn trimmed_len(&self) -> usize {
        self.string.trim_end().len()
    }
}

fn floor_char_boundary(string: &str, mut index: usize) -> usize {
    while index > 0 && !string.is_char_boundary(index) {
        index -= 1;
    }
    index
}
