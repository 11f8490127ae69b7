//! Breaking laid out text across pages.
//!
//! A text node whose lines run past the bottom of a page is split in two:
//! the lines that fit stay behind, the rest continue at the top of the next
//! page. [`line_break_index`] picks the split point while honouring the
//! node's widows and orphans, and [`split_text`] produces both fragments.
//! The metrics helpers measure line blocks for the page breaker, including
//! multi-column blocks that are balanced across their columns.

mod metrics;
mod split;

pub use metrics::*;
pub use split::*;
