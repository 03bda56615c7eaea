//! Core types for the digirain screensaver.
//!
//! Every constant that shapes the rain lives in [`RainSettings`] so the
//! animator, the config loader and the terminal front end agree on a single
//! source of truth.

mod color;
mod settings;

pub use color::Rgb;
pub use settings::{GlyphRange, InitialRange, MAX_COLUMNS, RainSettings};
