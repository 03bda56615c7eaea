//! Drawing seam between the animator and whatever puts glyphs on screen.

use digirain_core::Rgb;

/// A request to draw one glyph in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    /// Column index, left to right.
    pub column: usize,
    /// Row in glyph cells. Negative rows are above the visible area.
    pub row: i32,
    pub glyph: char,
    pub color: Rgb,
}

/// Receiver of draw requests.
pub trait DrawCell {
    fn draw_cell(&mut self, request: DrawRequest);
}

impl<F: FnMut(DrawRequest)> DrawCell for F {
    fn draw_cell(&mut self, request: DrawRequest) {
        self(request)
    }
}

/// Sink that discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DrawCell for NoopSink {
    fn draw_cell(&mut self, _request: DrawRequest) {}
}
