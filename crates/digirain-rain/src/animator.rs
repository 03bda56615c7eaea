//! Per-column drop positions and their frame-by-frame update.

use digirain_core::{RainSettings, Rgb};
use rand::Rng;

use crate::{DrawCell, DrawRequest, GlyphSet, NoopSink};

/// The rain: one drop per column, each at an integer row.
#[derive(Debug, Clone)]
pub struct RainAnimator<R> {
    /// Row position of each column's drop, indexed by column.
    columns: Vec<i32>,
    glyphs: GlyphSet,
    cell_size: i64,
    window_height: i64,
    reset_probability: f64,
    foreground: Rgb,
    rng: R,
}

impl<R: Rng> RainAnimator<R> {
    /// Create the rain with every drop at a random row of the initial range.
    pub fn new(settings: &RainSettings, mut rng: R) -> Self {
        let range = settings.initial_range;
        let (low, high) = (range.min.min(range.max), range.min.max(range.max));
        let columns = (0..settings.columns())
            .map(|_| rng.random_range(low..=high))
            .collect();
        Self::with_positions(settings, rng, columns)
    }

    /// Create the rain from explicit drop positions.
    pub fn with_positions(settings: &RainSettings, rng: R, columns: Vec<i32>) -> Self {
        Self {
            columns,
            glyphs: GlyphSet::from_range(settings.glyphs),
            cell_size: i64::from(settings.cell_size),
            window_height: i64::from(settings.window_height),
            reset_probability: settings.reset_probability,
            foreground: settings.foreground,
            rng,
        }
    }

    /// Advance one frame, asking `draw` to paint each column's current glyph.
    ///
    /// Each drop is drawn at its row before it moves. A drop whose pixel row
    /// is past the bottom of the window restarts at row 0 with probability
    /// `reset_probability`; every other drop moves down one row.
    pub fn advance_and_render<D: DrawCell + ?Sized>(&mut self, draw: &mut D) {
        for (column, row) in self.columns.iter_mut().enumerate() {
            let glyph = self.glyphs.choose(&mut self.rng);
            draw.draw_cell(DrawRequest {
                column,
                row: *row,
                glyph,
                color: self.foreground,
            });

            let y = i64::from(*row) * self.cell_size;
            if y > self.window_height && self.rng.random::<f64>() < self.reset_probability {
                *row = 0;
            } else {
                *row = row.saturating_add(1);
            }
        }
    }

    /// Advance one frame without drawing.
    pub fn advance(&mut self) {
        self.advance_and_render(&mut NoopSink);
    }
}

impl<R> RainAnimator<R> {
    /// Current drop rows, indexed by column.
    pub fn columns(&self) -> &[i32] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
