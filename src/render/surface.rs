//! The rendered-text surface: a rectangle of palette indices.

use crate::geom::Size;
use crate::render::TextSurface;

/// A rasterized string. Indices point into the installed [`Palette`];
/// 0 is full foreground, `SHADE_STEPS` and above are background.
///
/// [`Palette`]: crate::render::Palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSurface {
    size: Size,
    indices: Vec<u16>,
}

impl IndexedSurface {
    pub fn new(size: Size, indices: Vec<u16>) -> Self {
        debug_assert_eq!(size.area(), indices.len());
        Self { size, indices }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

impl TextSurface for IndexedSurface {
    fn view(&self) -> SurfaceView<'_> {
        SurfaceView {
            size: self.size,
            indices: &self.indices,
        }
    }
}

/// Borrowed view of a surface, the unit the canvas blits.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    pub size: Size,
    pub indices: &'a [u16],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_exposes_dimensions_and_pixels() {
        let surface = IndexedSurface::new(Size::new(2, 2), vec![0, 1, 2, 3]);
        let view = surface.view();
        assert_eq!(view.size, Size::new(2, 2));
        assert_eq!(view.indices, &[0, 1, 2, 3]);
    }
}
