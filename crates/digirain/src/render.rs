//! Terminal surface the rain is drawn on.

use std::{
    io::{self, Stdout, Write},
    thread,
    time::{Duration, Instant},
};

use color_eyre::{Result, eyre::WrapErr};
use crossterm::{execute, terminal::SetTitle};
use digirain_core::RainSettings;
use digirain_rain::{DrawCell, DrawRequest};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::{Rect, Size},
    style::{Color, Modifier, Style},
};

use crate::events::{CrosstermEvents, EventSource, RainEvent};

/// Terminal window title shown while the rain runs.
pub const TITLE: &str = "Matrix Code Rain";

/// Ask the terminal emulator to show [`TITLE`].
fn set_title<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, SetTitle(TITLE))
}

/// Blocks at the end of each frame to hold a target frame rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
        }
    }

    /// Time left in the current frame as of `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    /// Sleep out the rest of the frame and start the next one.
    pub fn tick(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.last_tick = Instant::now();
    }
}

/// Draw sink that paints rain glyphs into a ratatui buffer.
///
/// Glyph cells map one-to-one onto terminal cells inside `area`; requests
/// outside it are dropped.
#[derive(Debug)]
pub struct RainCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> RainCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }

    /// Fill the whole area with the background colour.
    pub fn clear(&mut self, background: Color) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(background);
                }
            }
        }
    }

    fn position(&self, column: usize, row: i32) -> Option<(u16, u16)> {
        let column = u16::try_from(column).ok()?;
        let row = u16::try_from(row).ok()?;
        (column < self.area.width && row < self.area.height)
            .then(|| (self.area.x + column, self.area.y + row))
    }
}

impl DrawCell for RainCanvas<'_> {
    fn draw_cell(&mut self, request: DrawRequest) {
        let Some(position) = self.position(request.column, request.row) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut(position) {
            cell.set_char(request.glyph).set_style(
                Style::new()
                    .fg(request.color.into())
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

/// Everything tied to the physical display: terminal, input and pacing.
pub struct RenderContext<B: Backend, E> {
    terminal: Terminal<B>,
    events: E,
    clock: FrameClock,
    background: Color,
    /// Rain surface size in cells.
    grid: Size,
}

impl RenderContext<CrosstermBackend<Stdout>, CrosstermEvents> {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn init(settings: &RainSettings) -> Result<Self> {
        let terminal = ratatui::try_init().wrap_err("failed to initialise the terminal")?;
        set_title(&mut io::stdout()).wrap_err("failed to set the terminal title")?;
        Ok(Self::new(terminal, CrosstermEvents, settings))
    }

    /// Hand the terminal back to the shell.
    pub fn restore(self) {
        drop(self.terminal);
        ratatui::restore();
    }
}

impl<B, E> RenderContext<B, E>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    E: EventSource,
{
    pub fn new(terminal: Terminal<B>, events: E, settings: &RainSettings) -> Self {
        Self {
            terminal,
            events,
            clock: FrameClock::new(settings.frame_interval()),
            background: settings.background.into(),
            grid: grid_size(settings),
        }
    }

    /// Resize the rain surface, e.g. after fitting it to the terminal.
    pub fn set_surface(&mut self, settings: &RainSettings) {
        self.grid = grid_size(settings);
    }

    /// Current terminal size in cells.
    pub fn size(&self) -> Result<Size> {
        self.terminal
            .size()
            .wrap_err("failed to query the terminal size")
    }

    /// Events that arrived since the previous poll.
    pub fn poll_events(&mut self) -> Result<Vec<RainEvent>> {
        self.events.poll_events()
    }

    /// Clear the screen, let `paint` draw the rain and present the frame.
    pub fn present<F>(&mut self, paint: F) -> Result<()>
    where
        F: FnOnce(&mut RainCanvas<'_>),
    {
        let background = self.background;
        let grid = self.grid;
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                let surface = Rect::new(area.x, area.y, grid.width, grid.height).intersection(area);
                let buf = frame.buffer_mut();

                RainCanvas::new(buf, area).clear(background);
                paint(&mut RainCanvas::new(buf, surface));
            })
            .wrap_err("failed to draw frame")?;
        Ok(())
    }

    /// Wait for the end of the frame interval.
    pub fn tick(&mut self) {
        self.clock.tick();
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

fn grid_size(settings: &RainSettings) -> Size {
    let cells = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    Size::new(cells(settings.columns()), cells(settings.rows()))
}
