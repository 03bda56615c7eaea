//! Falling-glyph animation for the digirain screensaver.
//!
//! The animator owns one row position per column and advances them once per
//! frame. It never touches a terminal: every glyph it wants on screen goes
//! through a [`DrawCell`] sink, so the whole animation can run headless with a
//! seeded random number generator.

mod animator;
mod chars;
mod draw;

pub use animator::RainAnimator;
pub use chars::GlyphSet;
pub use draw::{DrawCell, DrawRequest, NoopSink};
