//! TrueType font loading.

use std::path::Path;

use bitflags::bitflags;

use crate::error::{Error, Result};

bitflags! {
    /// Style applied when rasterizing. Bold, italic, underline and
    /// strikethrough are synthesized from the regular face.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Style: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
    }
}

/// Horizontal metrics of the loaded face at its pixel size.
#[derive(Debug, Clone, Copy)]
pub struct LineMetrics {
    /// Distance from the top of a rendered line to the baseline.
    pub ascent: f32,
    /// Total line height (ascent plus descent).
    pub height: f32,
}

/// A font opened at a fixed pixel size with a style flag, owned for the
/// process lifetime.
#[derive(Debug)]
pub struct FontFace {
    font: fontdue::Font,
    px: f32,
    style: Style,
}

impl FontFace {
    pub fn load(path: &Path, px: f32, style: Style) -> Result<Self> {
        let open_error = |reason: String| Error::FontOpen {
            path: path.to_path_buf(),
            size: px,
            reason,
        };

        let bytes = std::fs::read(path).map_err(|err| open_error(err.to_string()))?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|err| open_error(err.to_string()))?;

        // A face without horizontal metrics can't lay out a line of text.
        if font.horizontal_line_metrics(px).is_none() {
            return Err(open_error("font has no horizontal line metrics".into()));
        }

        Ok(Self { font, px, style })
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn line_metrics(&self) -> LineMetrics {
        // Presence is checked at load time; the fallback never fires.
        match self.font.horizontal_line_metrics(self.px) {
            Some(metrics) => LineMetrics {
                ascent: metrics.ascent,
                height: metrics.ascent - metrics.descent,
            },
            None => LineMetrics {
                ascent: self.px,
                height: self.px,
            },
        }
    }

    pub(crate) fn inner(&self) -> &fontdue::Font {
        &self.font
    }
}
