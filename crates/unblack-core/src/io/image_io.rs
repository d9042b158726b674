use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

use crate::bitgrid::BitGrid;
use crate::consts::{PREVIEW_INK, PREVIEW_PAPER};
use crate::error::Result;

/// Render a grid as an 8-bit grayscale image: set bits black, cleared bits white.
pub fn render(grid: &BitGrid) -> GrayImage {
    let mut img = GrayImage::from_pixel(
        grid.width() as u32,
        grid.height() as u32,
        Luma([PREVIEW_PAPER]),
    );
    grid.for_each_row_major(|row, col, bit| {
        if bit {
            img.put_pixel(col as u32, row as u32, Luma([PREVIEW_INK]));
        }
    });
    img
}

/// Save a grid preview as PNG.
pub fn save_png(grid: &BitGrid, path: &Path) -> Result<()> {
    render(grid).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
