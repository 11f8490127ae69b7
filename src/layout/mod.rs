//! Text layout: from styled paragraphs to positioned lines.
//!
//! Laying out text happens in a few stages, each usable on its own:
//!
//! - [`wrap_words`](crate::layout::wrap_words) splits paragraphs into syllables, the units lines may break between
//! - [`linebreak`](crate::layout::linebreak) picks break points with the Knuth-Plass algorithm, falling back to a greedy fit
//! - [`generate_line_rects`](crate::layout::generate_line_rects) works out where lines may go, around exclusions or across columns
//! - [`layout_paragraph`](crate::layout::layout_paragraph) positions the lines of one paragraph
//! - [`typeset`](crate::layout::typeset) fills a container with paragraphs, balancing columns and truncating overflow
//!
//! # Example
//!
//! ```
//! use pdf_typeset::{AttributedString, Attributes, FontBook, Pt, Rect};
//! use pdf_typeset::layout::{typeset, wrap_words, Container, LayoutOptions};
//!
//! let fonts = FontBook::default();
//! let options = LayoutOptions::default();
//!
//! let paragraph = AttributedString::new(
//!     "The quick brown fox jumps over the lazy dog.",
//!     Attributes::default().with_font_size(Pt(12.0)),
//! );
//! let paragraph = wrap_words(&paragraph, &options);
//!
//! let container = Container::new(Rect::new(0.0, 0.0, 120.0, 200.0));
//! let result = typeset(&container, &[paragraph], &options, &fonts);
//!
//! assert!(!result.truncated);
//! assert!(result.lines().count() > 1);
//! ```

mod container;
mod line_rects;
mod linebreak;
mod margins;
mod options;
mod paragraph;
mod segment;
mod typesetter;

pub use container::*;
pub use line_rects::*;
pub use linebreak::*;
pub use margins::*;
pub use options::*;
pub use paragraph::*;
pub use segment::*;
pub use typesetter::*;
