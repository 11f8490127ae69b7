use crate::attributed::Attributes;
use crate::measure::TextMeasurer;
use crate::{Pt, TypesetError};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::ops::Index;
use std::path::Path;

/// A parsed font object. Fonts can be TTF or OTF fonts and are only consulted
/// for their metrics: advance widths, ascent, descent and line gap.
///
/// Typically, fonts are referred to throughout user applications by their
/// [`Id`] within a [`FontBook`], which is what run [`Attributes`] carry.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TypesetError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Read and parse a font file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Font, TypesetError> {
        let bytes = std::fs::read(path)?;
        Font::load(bytes)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().line_gap() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    /// Calculate the width of a given string of text at the given font size.
    /// Characters missing from the font are measured as the replacement glyph.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| self.glyph_id(ch).or_else(|| self.replacement_glyph_id()))
            .map(|gid| {
                scaling
                    * self
                        .face
                        .as_face_ref()
                        .glyph_hor_advance(GlyphId(gid))
                        .unwrap_or_default() as f32
            })
            .sum()
    }
}

/// Average advance of a glyph relative to the font size, used to estimate
/// widths of runs that don't name a font
const FALLBACK_ADVANCE: f32 = 0.5;
/// Line height relative to the font size for runs that don't name a font
const FALLBACK_LINE_HEIGHT: f32 = 1.2;

/// The set of fonts a document's text can be measured with
#[derive(Default)]
pub struct FontBook {
    pub fonts: Arena<Font>,
}

impl FontBook {
    /// Add a font to the book, returning the id that run [`Attributes`] use
    /// to refer to it
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    pub fn get(&self, id: Id<Font>) -> Option<&Font> {
        self.fonts.get(id)
    }

    fn font_for(&self, attributes: &Attributes) -> Option<&Font> {
        attributes.font.and_then(|id| self.fonts.get(id))
    }
}

impl Index<Id<Font>> for FontBook {
    type Output = Font;

    fn index(&self, id: Id<Font>) -> &Font {
        &self.fonts[id]
    }
}

impl TextMeasurer for FontBook {
    fn advance_width(&self, text: &str, attributes: &Attributes) -> Pt {
        match self.font_for(attributes) {
            Some(font) => font.width_of_text(text, attributes.font_size),
            None => attributes.font_size * (FALLBACK_ADVANCE * text.chars().count() as f32),
        }
    }

    fn line_height(&self, attributes: &Attributes) -> Pt {
        match self.font_for(attributes) {
            Some(font) => font.line_height(attributes.font_size),
            None => attributes.font_size * FALLBACK_LINE_HEIGHT,
        }
    }
}
