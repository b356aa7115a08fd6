//! Raster rendering of a module matrix.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::qr::ModuleMatrix;
use crate::{CANVAS_SIZE, Result};

/// Blank modules kept around the symbol on every side.
pub const QUIET_ZONE_MODULES: u32 = 4;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Pixel geometry of a rasterized symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterLayout {
    /// Pixels per module.
    pub scale: u32,
    /// Pixels from the canvas edge to the first module.
    pub offset: u32,
}

impl RasterLayout {
    pub fn for_matrix(matrix: &ModuleMatrix) -> Self {
        let count = matrix.module_count() as u32;
        let scale = (CANVAS_SIZE / (count + 2 * QUIET_ZONE_MODULES)).max(1);
        let offset = CANVAS_SIZE.saturating_sub(scale * count) / 2;
        Self { scale, offset }
    }
}

/// Draw the matrix on a 1000x1000 canvas, centered, with a 4-module quiet zone.
pub fn rasterize(matrix: &ModuleMatrix) -> GrayImage {
    let layout = RasterLayout::for_matrix(matrix);
    let mut img = GrayImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, LIGHT);

    for (row, col) in matrix.dark_modules() {
        let x = layout.offset + col as u32 * layout.scale;
        let y = layout.offset + row as u32 * layout.scale;
        let rect = Rect::at(x as i32, y as i32).of_size(layout.scale, layout.scale);
        draw_filled_rect_mut(&mut img, rect, DARK);
    }

    debug!(
        module_count = matrix.module_count(),
        scale = layout.scale,
        offset = layout.offset,
        "Rasterized QR symbol"
    );

    img
}

/// Encode a raster as PNG bytes.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Rasterize and PNG-encode the matrix.
pub fn render_png(matrix: &ModuleMatrix) -> Result<Vec<u8>> {
    encode_png(&rasterize(matrix))
}
