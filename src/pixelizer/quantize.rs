use image::RgbaImage;
use log::debug;
use rayon::prelude::*;

use crate::config::Palette;

/// Snap every opaque pixel to its nearest palette color.
///
/// Alpha is kept as is. Pixels with alpha 0 are left untouched, RGB included.
pub fn quantize(mut img: RgbaImage, palette: &Palette) -> RgbaImage {
    let stride = img.width() as usize * 4;
    if stride == 0 {
        return img;
    }
    debug!(
        "Quantizing {}x{} to {} colors",
        img.width(),
        img.height(),
        palette.len()
    );

    img.par_chunks_mut(stride).for_each(|row| {
        for pixel in row.chunks_exact_mut(4) {
            if pixel[3] == 0 {
                continue;
            }
            let color = palette.nearest(pixel[0], pixel[1], pixel[2]);
            pixel[0] = color.red;
            pixel[1] = color.green;
            pixel[2] = color.blue;
        }
    });
    img
}
