//! The window-backed canvas: an indexed framebuffer resolved through the
//! palette at present time.

use std::num::NonZeroU32;
use std::sync::Arc;

use winit::window::Window;

use crate::error::{Error, Result};
use crate::geom::{Point, Rect, Size};
use crate::render::palette::{Palette, SHADE_STEPS};
use crate::render::{Canvas, SurfaceView};

/// Index every framebuffer pixel is reset to; resolves to the background
/// color through the ramp.
pub const BACKGROUND_INDEX: u16 = SHADE_STEPS;

pub struct SoftCanvas {
    // The context must stay alive as long as the surface does.
    _context: softbuffer::Context<Arc<Window>>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    palette: Palette,
    size: Size,
    frame: Vec<u16>,
}

impl SoftCanvas {
    pub fn new(window: Arc<Window>, palette: Palette, size: Size) -> Result<Self> {
        let context = softbuffer::Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window)?;
        let (width, height) = nonzero(size)?;
        surface.resize(width, height)?;
        Ok(Self {
            _context: context,
            surface,
            palette,
            size,
            frame: vec![BACKGROUND_INDEX; size.area()],
        })
    }
}

impl Canvas for SoftCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.frame.fill(BACKGROUND_INDEX);
    }

    fn blit(&mut self, view: SurfaceView<'_>, origin: Point) -> Result<()> {
        let bounds = Rect::new(Point::new(0, 0), self.size);
        let Some(dest) = bounds.intersect(Rect::new(origin, view.size)) else {
            return Ok(()); // fully off-canvas
        };

        let src_x = (dest.origin.x - origin.x) as usize;
        let src_y = (dest.origin.y - origin.y) as usize;
        let src_stride = view.size.width as usize;
        let dst_stride = self.size.width as usize;
        for row in 0..dest.size.height as usize {
            let src_start = (src_y + row) * src_stride + src_x;
            let dst_start =
                (dest.origin.y as usize + row) * dst_stride + dest.origin.x as usize;
            let len = dest.size.width as usize;
            self.frame[dst_start..dst_start + len]
                .copy_from_slice(&view.indices[src_start..src_start + len]);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let mut buffer = self.surface.buffer_mut()?;
        for (pixel, &index) in buffer.iter_mut().zip(&self.frame) {
            *pixel = self.palette.pixel(index);
        }
        buffer.present()?;
        Ok(())
    }

    fn resize(&mut self, size: Size) -> Result<()> {
        let (width, height) = nonzero(size)?;
        self.surface.resize(width, height)?;
        self.size = size;
        self.frame = vec![BACKGROUND_INDEX; size.area()];
        Ok(())
    }
}

fn nonzero(size: Size) -> Result<(NonZeroU32, NonZeroU32)> {
    match (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(Error::Blit(format!(
            "degenerate canvas size {}x{}",
            size.width, size.height
        ))),
    }
}
