//! Rendering: font loading, string rasterization, and the canvas the
//! rasterized surfaces are blitted onto.
//!
//! The two seams are traits so the dispatch loop can be driven by
//! instrumented fakes in tests: [`TextRender`] stands for the font service,
//! [`Canvas`] for the display service.

pub mod canvas;
pub mod font;
pub mod palette;
pub mod raster;
pub mod surface;

pub use canvas::SoftCanvas;
pub use font::{FontFace, Style};
pub use palette::{Palette, Rgb, PALETTE_SIZE, SHADE_STEPS};
pub use raster::TextRasterizer;
pub use surface::{IndexedSurface, SurfaceView};

use crate::error::Result;
use crate::geom::{Point, Size};

/// A rasterized surface the canvas can consume.
pub trait TextSurface {
    fn view(&self) -> SurfaceView<'_>;
}

/// Turns a UTF-8 string into a palette-indexed surface.
pub trait TextRender {
    type Surface: TextSurface;

    fn render(&mut self, text: &str) -> Result<Self::Surface>;
}

/// An indexed drawing target that can be presented to the user.
///
/// Blits are clipped against the canvas bounds; `origin` may be negative.
pub trait Canvas {
    fn size(&self) -> Size;

    fn clear(&mut self);

    fn blit(&mut self, view: SurfaceView<'_>, origin: Point) -> Result<()>;

    fn present(&mut self) -> Result<()>;

    fn resize(&mut self, size: Size) -> Result<()>;
}
