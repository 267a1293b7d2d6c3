//! Compile-time parameters. The tool deliberately parses no command line;
//! everything a run needs is fixed here.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::geom::Size;
use crate::render::{Rgb, Style};

pub const WINDOW_TITLE: &str = "tecla: Unicode input test";

pub const WINDOW_SIZE: Size = Size::new(400, 300);

/// Pixel size of rendered glyphs; large on purpose so single typed
/// characters dominate the window.
pub const POINT_SIZE: f32 = 288.0;

/// Shown until the first text-input event arrives.
pub const DEFAULT_MESSAGE: &str = "ϻ";

/// Well-known locations of a Unicode-capable default face.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/ttf-dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit font path; `None` walks [`FONT_CANDIDATES`].
    pub font_path: Option<PathBuf>,
    pub point_size: f32,
    pub message: String,
    pub style: Style,
    pub foreground: Rgb,
    pub background: Rgb,
    pub window_size: Size,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            point_size: POINT_SIZE,
            message: DEFAULT_MESSAGE.into(),
            style: Style::empty(),
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
            window_size: WINDOW_SIZE,
        }
    }
}

impl Config {
    /// The font file this run will load, or [`Error::NoFont`] when neither an
    /// explicit path nor any candidate exists.
    pub fn resolve_font(&self) -> Result<PathBuf> {
        if let Some(path) = &self.font_path {
            return Ok(path.clone());
        }
        FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.is_file())
            .map(Path::to_path_buf)
            .ok_or(Error::NoFont)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_fixed_parameters() {
        let config = Config::default();
        assert_eq!(config.window_size, Size::new(400, 300));
        assert_eq!(config.point_size, 288.0);
        assert_eq!(config.message, "ϻ");
        assert_eq!(config.style, Style::empty());
        assert_eq!(config.foreground, Rgb::BLACK);
        assert_eq!(config.background, Rgb::WHITE);
    }

    #[test]
    fn test_explicit_font_path_wins() {
        let config = Config {
            font_path: Some(PathBuf::from("/tmp/some.ttf")),
            ..Config::default()
        };
        assert_eq!(config.resolve_font().unwrap(), PathBuf::from("/tmp/some.ttf"));
    }
}
