//! String rasterization: fontdue layout, per-glyph coverage blending, style
//! synthesis, and quantization into palette indices.

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::error::{Error, Result};
use crate::geom::Size;
use crate::render::palette::SHADE_STEPS;
use crate::render::{FontFace, IndexedSurface, Style, TextRender};

/// Slant factor for synthesized italics, one pixel of shear per ~5 rows.
const ITALIC_SLANT: f32 = 0.207;

/// Map 8-bit glyph coverage onto a palette index: full coverage lands on
/// entry 0 (foreground), no coverage on entry `SHADE_STEPS` (background).
#[inline]
pub fn shade_index(coverage: u8) -> u16 {
    ((255 - coverage as u16) * SHADE_STEPS) / 255
}

/// Rasterizes UTF-8 strings with the owned [`FontFace`].
pub struct TextRasterizer {
    face: FontFace,
    layout: Layout,
}

impl TextRasterizer {
    pub fn new(face: FontFace) -> Self {
        Self {
            face,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    fn bold_strength(&self) -> usize {
        // Overstrike distance grows with the pixel size, like classic
        // synthesized bold.
        ((self.face.px() / 36.0) as usize).max(1)
    }
}

impl TextRender for TextRasterizer {
    type Surface = IndexedSurface;

    fn render(&mut self, text: &str) -> Result<IndexedSurface> {
        if text.is_empty() {
            return Err(Error::Render("empty string".into()));
        }

        let px = self.face.px();
        let style = self.face.style();
        let line = self.face.line_metrics();

        self.layout.reset(&LayoutSettings::default());
        self.layout
            .append(&[self.face.inner()], &TextStyle::new(text, px, 0));

        let mut text_width = 0f32;
        let mut text_height = self.layout.height();
        for glyph in self.layout.glyphs() {
            // Advance matters for blank glyphs: a typed space still produces
            // a surface of its own width.
            let advance = self.face.inner().metrics(glyph.parent, px).advance_width;
            text_width = text_width.max(glyph.x + (glyph.width as f32).max(advance));
            text_height = text_height.max(glyph.y + glyph.height as f32);
        }

        let slant = if style.contains(Style::ITALIC) {
            (text_height * ITALIC_SLANT).ceil() as usize
        } else {
            0
        };
        let overstrike = if style.contains(Style::BOLD) {
            self.bold_strength()
        } else {
            0
        };

        let width = text_width.ceil() as usize + slant + overstrike;
        let height = text_height.ceil() as usize;
        if width == 0 || height == 0 {
            return Err(Error::Render(format!("nothing to render in {text:?}")));
        }

        let mut coverage = vec![0u8; width * height];
        for glyph in self.layout.glyphs() {
            let (metrics, bitmap) = self.face.inner().rasterize_config(glyph.key);
            let left = glyph.x.round() as i32;
            let top = glyph.y.round() as i32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let x = left + col as i32;
                    let y = top + row as i32;
                    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                        continue;
                    }
                    let dst = &mut coverage[y as usize * width + x as usize];
                    *dst = (*dst).max(bitmap[row * metrics.width + col]);
                }
            }
        }

        if overstrike > 0 {
            embolden(&mut coverage, width, overstrike);
        }
        if slant > 0 {
            shear(&mut coverage, width, height, slant);
        }
        if style.contains(Style::UNDERLINE) {
            let row = (line.ascent.round() as usize + 1).min(height - 1);
            rule(&mut coverage, width, row, rule_thickness(px, height));
        }
        if style.contains(Style::STRIKETHROUGH) {
            let row = ((line.ascent / 2.0).round() as usize).min(height - 1);
            rule(&mut coverage, width, row, rule_thickness(px, height));
        }

        let indices = coverage.iter().map(|&c| shade_index(c)).collect();
        Ok(IndexedSurface::new(
            Size::new(width as u32, height as u32),
            indices,
        ))
    }
}

fn rule_thickness(px: f32, height: usize) -> usize {
    ((px / 32.0) as usize).max(1).min(height)
}

/// Synthesized bold: each pixel takes the maximum of itself and its
/// `strength` left neighbors.
fn embolden(coverage: &mut [u8], width: usize, strength: usize) {
    for row in coverage.chunks_mut(width) {
        for x in (0..width).rev() {
            let mut value = row[x];
            for d in 1..=strength.min(x) {
                value = value.max(row[x - d]);
            }
            row[x] = value;
        }
    }
}

/// Synthesized italic: rows shift right, the top row by `max_shift`, the
/// bottom row not at all.
fn shear(coverage: &mut [u8], width: usize, height: usize, max_shift: usize) {
    let denom = (height - 1).max(1);
    for y in 0..height {
        let shift = max_shift * (height - 1 - y) / denom;
        if shift == 0 {
            continue;
        }
        let row = &mut coverage[y * width..(y + 1) * width];
        for x in (shift..width).rev() {
            row[x] = row[x - shift];
        }
        row[..shift].fill(0);
    }
}

/// Full-width horizontal rule used for underline and strikethrough.
fn rule(coverage: &mut [u8], width: usize, row: usize, thickness: usize) {
    let height = coverage.len() / width;
    let end = (row + thickness).min(height);
    coverage[row * width..end * width].fill(255);
}
