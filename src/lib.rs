//! Paragraph typesetting, float wrapping and pagination for document
//! generation.
//!
//! Styled paragraphs ([`AttributedString`]s) are broken into lines and
//! positioned inside containers by the [`layout`] module. The document tree
//! ([`LayoutNode`]) carries the box model output those containers come from;
//! [`resolve_floats`] lets text flow around floated siblings, and the
//! [`pagination`] module splits text nodes that overflow a page.
//!
//! Text is measured through the [`TextMeasurer`] trait, which [`FontBook`]
//! implements using real font metrics.

mod attributed;
pub use attributed::*;

mod error;
pub use error::*;

mod floats;
pub use floats::*;

mod font;
pub use font::*;

mod measure;
pub use measure::*;

mod rect;
pub use rect::*;

mod style;
pub use style::*;

mod tree;
pub use tree::*;

mod units;
pub use units::*;

/// Line breaking, line placement and typesetting of paragraphs into containers
pub mod layout;

/// Splitting text nodes across pages
pub mod pagination;
