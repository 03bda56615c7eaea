//! Glyph pool for the rain.

use digirain_core::GlyphRange;
use rand::{Rng, seq::IndexedRandom};

/// Characters the rain picks from, one per column per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    chars: Vec<char>,
}

impl GlyphSet {
    /// Collect every valid character of an inclusive code-point range.
    pub fn from_range(range: GlyphRange) -> Self {
        Self {
            chars: range.chars().collect(),
        }
    }

    /// Pick a glyph uniformly at random. An empty set yields a space.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.chars.choose(rng).copied().unwrap_or(' ')
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, glyph: char) -> bool {
        self.chars.contains(&glyph)
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::from_range(GlyphRange::default())
    }
}
