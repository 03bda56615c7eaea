//! Rain settings and their validation.

use std::time::Duration;

use color_eyre::{Result, eyre};
use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Upper bound on the number of glyph columns.
pub const MAX_COLUMNS: usize = u16::MAX as usize;

/// Inclusive range of Unicode code points the rain draws glyphs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphRange {
    pub low: u32,
    pub high: u32,
}

impl Default for GlyphRange {
    /// Printable ASCII, `!` through `~`.
    fn default() -> Self {
        Self { low: 33, high: 126 }
    }
}

impl GlyphRange {
    /// Iterate the printable characters of the range in code-point order.
    ///
    /// Surrogates and control characters are skipped; a control character
    /// written to the terminal would be interpreted rather than shown.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (self.low..=self.high.min(char::MAX as u32))
            .filter_map(char::from_u32)
            .filter(|c| !c.is_control())
    }
}

/// Inclusive range of starting row positions.
///
/// Negative rows sit above the visible area, so drawing each column's start
/// from this range staggers when the drops first appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialRange {
    pub min: i32,
    pub max: i32,
}

impl Default for InitialRange {
    fn default() -> Self {
        Self { min: -20, max: 0 }
    }
}

/// Everything that shapes the rain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    /// Surface width in pixels.
    pub window_width: u32,
    /// Surface height in pixels.
    pub window_height: u32,
    /// Width and height of one glyph cell in pixels.
    pub cell_size: u32,
    pub glyphs: GlyphRange,
    pub foreground: Rgb,
    pub background: Rgb,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Chance per frame that a drop past the bottom restarts at the top.
    pub reset_probability: f64,
    pub initial_range: InitialRange,
    /// Size the surface to the terminal at startup instead of using
    /// `window_width` and `window_height`.
    pub fit_to_terminal: bool,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            cell_size: 20,
            glyphs: GlyphRange::default(),
            foreground: Rgb::GREEN,
            background: Rgb::BLACK,
            frame_rate: 30,
            reset_probability: 0.025,
            initial_range: InitialRange::default(),
            fit_to_terminal: false,
        }
    }
}

impl RainSettings {
    /// Check that the settings describe a drawable rain.
    pub fn validate(&self) -> Result<()> {
        eyre::ensure!(self.cell_size > 0, "cell_size must be greater than zero");
        eyre::ensure!(
            self.window_width > 0 && self.window_height > 0,
            "window dimensions must be greater than zero (got {}x{})",
            self.window_width,
            self.window_height
        );
        eyre::ensure!(
            self.columns() <= MAX_COLUMNS,
            "window_width / cell_size gives {} columns, at most {MAX_COLUMNS} are supported",
            self.columns()
        );
        eyre::ensure!(self.frame_rate > 0, "frame_rate must be greater than zero");
        eyre::ensure!(
            (0.0..=1.0).contains(&self.reset_probability),
            "reset_probability must be within [0, 1] (got {})",
            self.reset_probability
        );
        eyre::ensure!(
            self.glyphs.low <= self.glyphs.high,
            "glyph range is inverted ({} > {})",
            self.glyphs.low,
            self.glyphs.high
        );
        eyre::ensure!(
            self.glyphs.chars().next().is_some(),
            "glyph range {}..={} contains no printable characters",
            self.glyphs.low,
            self.glyphs.high
        );
        eyre::ensure!(
            self.initial_range.min <= self.initial_range.max,
            "initial_range is inverted ({} > {})",
            self.initial_range.min,
            self.initial_range.max
        );
        Ok(())
    }

    /// Number of glyph columns across the surface.
    pub fn columns(&self) -> usize {
        self.window_width.checked_div(self.cell_size).unwrap_or(0) as usize
    }

    /// Number of fully visible glyph rows.
    pub fn rows(&self) -> usize {
        self.window_height.checked_div(self.cell_size).unwrap_or(0) as usize
    }

    /// Time budget of a single frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Settings whose surface is exactly a `cols` x `rows` grid of cells.
    pub fn fitted_to(&self, cols: u16, rows: u16) -> Self {
        Self {
            window_width: u32::from(cols).saturating_mul(self.cell_size),
            window_height: u32::from(rows).saturating_mul(self.cell_size),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = RainSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.columns(), 40);
        assert_eq!(settings.rows(), 30);
    }

    #[test]
    fn test_columns_floor_partial_cells() {
        let settings = RainSettings {
            window_width: 815,
            cell_size: 20,
            ..Default::default()
        };
        assert_eq!(settings.columns(), 40);
    }

    #[test]
    fn test_frame_interval() {
        let settings = RainSettings::default();
        assert_eq!(settings.frame_interval(), Duration::from_nanos(33_333_333));

        let settings = RainSettings {
            frame_rate: 50,
            ..Default::default()
        };
        assert_eq!(settings.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_fitted_to_terminal_grid() {
        let settings = RainSettings::default().fitted_to(80, 24);
        assert_eq!(settings.window_width, 1600);
        assert_eq!(settings.window_height, 480);
        assert_eq!(settings.columns(), 80);
        assert_eq!(settings.rows(), 24);
    }

    #[test]
    fn test_default_glyphs_are_printable_ascii() {
        let chars: Vec<char> = GlyphRange::default().chars().collect();
        assert_eq!(chars.len(), 94);
        assert_eq!(chars.first(), Some(&'!'));
        assert_eq!(chars.last(), Some(&'~'));
    }

    #[test]
    fn test_glyph_range_skips_control_characters() {
        let range = GlyphRange { low: 0, high: 40 };
        let chars: Vec<char> = range.chars().collect();
        assert_eq!(chars, (' '..='(').collect::<Vec<_>>());

        let c1 = GlyphRange {
            low: 0x7F,
            high: 0xA1,
        };
        assert_eq!(c1.chars().collect::<Vec<_>>(), vec!['\u{A0}', '\u{A1}']);
    }

    #[test]
    fn test_validate_rejects_control_only_glyphs() {
        let settings = RainSettings {
            glyphs: GlyphRange { low: 0, high: 31 },
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("no printable characters"));
    }

    #[test]
    fn test_validate_caps_column_count() {
        let settings = RainSettings {
            window_width: 4_000_000_000,
            cell_size: 1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let widest = RainSettings {
            window_width: MAX_COLUMNS as u32,
            cell_size: 1,
            ..Default::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_glyph_range_skips_surrogates() {
        let range = GlyphRange {
            low: 0xD7FF,
            high: 0xE000,
        };
        assert_eq!(range.chars().collect::<Vec<_>>(), vec!['\u{D7FF}', '\u{E000}']);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            RainSettings {
                cell_size: 0,
                ..Default::default()
            },
            RainSettings {
                window_height: 0,
                ..Default::default()
            },
            RainSettings {
                frame_rate: 0,
                ..Default::default()
            },
            RainSettings {
                reset_probability: 1.5,
                ..Default::default()
            },
            RainSettings {
                reset_probability: f64::NAN,
                ..Default::default()
            },
            RainSettings {
                glyphs: GlyphRange { low: 90, high: 40 },
                ..Default::default()
            },
            RainSettings {
                glyphs: GlyphRange {
                    low: 0xD800,
                    high: 0xDFFF,
                },
                ..Default::default()
            },
            RainSettings {
                initial_range: InitialRange { min: 5, max: -5 },
                ..Default::default()
            },
        ];

        for settings in cases {
            assert!(settings.validate().is_err(), "{settings:?} should be rejected");
        }
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: RainSettings = toml::from_str(
            r##"
            cell_size = 10
            foreground = "#ff0000"

            [glyphs]
            low = 48
            high = 57
            "##,
        )
        .unwrap();

        assert_eq!(settings.cell_size, 10);
        assert_eq!(settings.foreground, Rgb::new(255, 0, 0));
        assert_eq!(settings.glyphs, GlyphRange { low: 48, high: 57 });
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.reset_probability, 0.025);
    }
}
