//! Keyword-valued style properties consumed by the typesetter.
//!
//! Each keyword parses from its CSS spelling. Parsing never fails: an
//! unrecognised keyword resolves to the property's initial value.

use derive_more::Display;

/// Where lines may break inside words (`word-break`)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display)]
pub enum WordBreak {
    /// Break at Unicode line break opportunities; CJK text breaks between
    /// characters while Latin words stay whole
    #[default]
    #[display("normal")]
    Normal,
    /// Break between any two characters
    #[display("break-all")]
    BreakAll,
    /// Never break inside a word, CJK included
    #[display("keep-all")]
    KeepAll,
}

impl From<&str> for WordBreak {
    fn from(keyword: &str) -> Self {
        match keyword.trim() {
            "break-all" => WordBreak::BreakAll,
            "keep-all" => WordBreak::KeepAll,
            _ => WordBreak::Normal,
        }
    }
}

/// Whether a hyphen glyph is drawn where a word is broken (`hyphens`)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display)]
pub enum Hyphens {
    #[default]
    #[display("auto")]
    Auto,
    #[display("none")]
    None,
}

impl From<&str> for Hyphens {
    fn from(keyword: &str) -> Self {
        match keyword.trim() {
            "none" => Hyphens::None,
            _ => Hyphens::Auto,
        }
    }
}

/// Horizontal alignment of lines within their rect (`text-align`)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display)]
pub enum TextAlign {
    #[default]
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("center")]
    Center,
    #[display("justify")]
    Justify,
}

impl From<&str> for TextAlign {
    fn from(keyword: &str) -> Self {
        match keyword.trim() {
            "right" | "end" => TextAlign::Right,
            "center" => TextAlign::Center,
            "justify" => TextAlign::Justify,
            _ => TextAlign::Left,
        }
    }
}

/// What happens to the last visible line when text is cut off
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display)]
pub enum TruncateMode {
    /// Lines past the limit are simply dropped
    #[default]
    #[display("clip")]
    Clip,
    /// The last kept line ends with an ellipsis
    #[display("ellipsis")]
    Ellipsis,
}

impl From<&str> for TruncateMode {
    fn from(keyword: &str) -> Self {
        match keyword.trim() {
            "ellipsis" => TruncateMode::Ellipsis,
            _ => TruncateMode::Clip,
        }
    }
}

/// The `float` property
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display)]
pub enum Float {
    #[default]
    #[display("none")]
    None,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

impl Float {
    pub fn is_floated(&self) -> bool {
        !matches!(self, Float::None)
    }
}

impl From<&str> for Float {
    fn from(keyword: &str) -> Self {
        match keyword.trim() {
            "left" => Float::Left,
            "right" => Float::Right,
            _ => Float::None,
        }
    }
}

/// The `clear` property
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display)]
pub enum Clear {
    #[default]
    #[display("none")]
    None,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("both")]
    Both,
}

impl Clear {
    /// Whether a float on the given side must be cleared
    pub fn clears(&self, side: Float) -> bool {
        match self {
            Clear::None => false,
            Clear::Both => side.is_floated(),
            Clear::Left => side == Float::Left,
            Clear::Right => side == Float::Right,
        }
    }
}

impl From<&str> for Clear {
    fn from(keyword: &str) -> Self {
        match keyword.trim() {
            "left" => Clear::Left,
            "right" => Clear::Right,
            "both" => Clear::Both,
            _ => Clear::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keywords_fall_back_to_initial_values() {
        assert_eq!(WordBreak::from("break-word"), WordBreak::Normal);
        assert_eq!(Hyphens::from("manual"), Hyphens::Auto);
        assert_eq!(TextAlign::from("start"), TextAlign::Left);
        assert_eq!(TruncateMode::from("fade"), TruncateMode::Clip);
        assert_eq!(Float::from("inline-start"), Float::None);
        assert_eq!(Clear::from("all"), Clear::None);
    }

    #[test]
    fn keywords_round_trip_through_display() {
        for keyword in ["normal", "break-all", "keep-all"] {
            assert_eq!(WordBreak::from(keyword).to_string(), keyword);
        }
        assert_eq!(Clear::from(" both ").to_string(), "both");
    }

    #[test]
    fn clear_matches_float_sides() {
        assert!(Clear::Both.clears(Float::Left));
        assert!(Clear::Both.clears(Float::Right));
        assert!(Clear::Left.clears(Float::Left));
        assert!(!Clear::Left.clears(Float::Right));
        assert!(!Clear::None.clears(Float::Left));
    }
}
