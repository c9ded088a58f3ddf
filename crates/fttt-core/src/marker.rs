#![forbid(unsafe_code)]

//! Leaf markers.
//!
//! A [`Marker`] is the value stored in a leaf cell: either [`Marker::BLANK`]
//! (an empty space) or a placed symbol. Markers are identified by their glyph
//! alone, so two markers built from the same character are interchangeable.

use std::fmt;

use unicode_width::UnicodeWidthChar;

use crate::error::{BoardError, Result};

/// An immutable leaf value, drawn as a single terminal column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(char);

impl Marker {
    /// The empty space.
    pub const BLANK: Marker = Marker('.');

    /// Create a marker drawn with `glyph`.
    ///
    /// The glyph must occupy exactly one column; control characters,
    /// combining marks and double-width characters are rejected because the
    /// layout engine sizes every leaf as a 1x1 box.
    pub fn new(glyph: char) -> Result<Self> {
        if glyph.is_control() || glyph.width() != Some(1) {
            return Err(BoardError::InvalidValue { glyph: Some(glyph) });
        }
        Ok(Self(glyph))
    }

    /// Create a marker from the first character of `text`.
    pub fn from_text(text: &str) -> Result<Self> {
        let glyph = text
            .chars()
            .next()
            .ok_or(BoardError::InvalidValue { glyph: None })?;
        Self::new(glyph)
    }

    /// The display character.
    #[inline]
    pub const fn glyph(self) -> char {
        self.0
    }

    /// Whether this is [`Marker::BLANK`].
    #[inline]
    pub const fn is_blank(self) -> bool {
        self.0 == Self::BLANK.0
    }

    /// A leaf is full once anything other than BLANK has been placed.
    #[inline]
    pub const fn is_full(self) -> bool {
        !self.is_blank()
    }

    /// `None` for BLANK, otherwise the marker itself.
    ///
    /// Mirrors [`NodeRef::value`](crate::NodeRef::value) so win detection can
    /// treat leaves and sub-boards uniformly.
    #[inline]
    pub const fn value(self) -> Option<Marker> {
        if self.is_blank() { None } else { Some(self) }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::BLANK
    }
}

impl TryFrom<char> for Marker {
    type Error = BoardError;

    fn try_from(glyph: char) -> Result<Self> {
        Self::new(glyph)
    }
}

impl TryFrom<&str> for Marker {
    type Error = BoardError;

    fn try_from(text: &str) -> Result<Self> {
        Self::from_text(text)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_has_no_value() {
        assert_eq!(Marker::BLANK.value(), None);
        assert!(Marker::BLANK.is_blank());
        assert!(!Marker::BLANK.is_full());
        assert_eq!(Marker::default(), Marker::BLANK);
    }

    #[test]
    fn placed_marker_is_its_own_value() {
        let x = Marker::new('X').unwrap();
        assert_eq!(x.value(), Some(x));
        assert!(x.is_full());
        assert_eq!(x.glyph(), 'X');
        assert_eq!(x.to_string(), "X");
    }

    #[test]
    fn equality_is_by_glyph() {
        assert_eq!(Marker::new('O').unwrap(), Marker::new('O').unwrap());
        assert_ne!(Marker::new('O').unwrap(), Marker::new('X').unwrap());
        assert_eq!(Marker::new('.').unwrap(), Marker::BLANK);
    }

    #[test]
    fn from_text_takes_first_char() {
        assert_eq!(Marker::from_text("Xavier").unwrap().glyph(), 'X');
        assert_eq!(Marker::try_from("Ω").unwrap().glyph(), 'Ω');
    }

    #[test]
    fn rejects_glyphs_that_are_not_one_column() {
        assert_eq!(
            Marker::from_text(""),
            Err(BoardError::InvalidValue { glyph: None })
        );
        assert!(Marker::new('\n').is_err());
        assert!(Marker::new('\u{0301}').is_err());
        assert!(Marker::new('漢').is_err());
        assert!(Marker::try_from('\t').is_err());
    }
}
