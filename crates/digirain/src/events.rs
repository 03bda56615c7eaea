//! Input events that end the screensaver.

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the main loop cares about in an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainEvent {
    /// An explicit quit chord: `Esc`, `q` or `Ctrl+C`.
    Quit,
    /// Any other key press.
    KeyPressed,
    /// Mouse, resize, focus, paste and key release/repeat events.
    Other,
}

impl RainEvent {
    /// Whether this event ends the screensaver.
    pub fn stops_rain(self) -> bool {
        matches!(self, RainEvent::Quit | RainEvent::KeyPressed)
    }
}

impl From<Event> for RainEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::from(key),
            _ => RainEvent::Other,
        }
    }
}

impl From<KeyEvent> for RainEvent {
    fn from(key: KeyEvent) -> Self {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => RainEvent::Quit,
            _ => RainEvent::KeyPressed,
        }
    }
}

/// Source of input events for one pass of the main loop.
pub trait EventSource {
    /// Return every event that arrived since the last call, without blocking.
    fn poll_events(&mut self) -> Result<Vec<RainEvent>>;
}

/// Reads events from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll_events(&mut self) -> Result<Vec<RainEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            events.push(RainEvent::from(event::read()?));
        }
        Ok(events)
    }
}
