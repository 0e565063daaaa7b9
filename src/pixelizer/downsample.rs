use image::{ImageBuffer, RgbaImage};
use log::debug;

use crate::error::ConfigError;

/// `(floor(width * factor), floor(height * factor))`, rejecting an empty result.
pub fn target_dimensions(width: u32, height: u32, factor: f64) -> Result<(u32, u32), ConfigError> {
    if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
        return Err(ConfigError::InvalidDownscaleFactor(factor));
    }
    let w = (width as f64 * factor).floor() as u32;
    let h = (height as f64 * factor).floor() as u32;
    if w == 0 || h == 0 {
        return Err(ConfigError::EmptyDownscale {
            width,
            height,
            factor,
        });
    }
    Ok((w, h))
}

// Source pixel whose area contains the center of output pixel `out`.
fn source_coord(out: u32, factor: f64, len: u32) -> u32 {
    let src = ((out as f64 + 0.5) / factor).floor() as u32;
    src.min(len - 1)
}

/// Point-sampled downscale: every output pixel is copied from exactly one
/// source pixel, colors are never blended.
pub fn downsample(img: RgbaImage, factor: f64) -> Result<RgbaImage, ConfigError> {
    let (src_w, src_h) = img.dimensions();
    let (w, h) = target_dimensions(src_w, src_h, factor)?;
    if (w, h) == (src_w, src_h) {
        return Ok(img);
    }
    debug!("Downsampling {}x{} to {}x{}", src_w, src_h, w, h);

    let xs: Vec<u32> = (0..w).map(|x| source_coord(x, factor, src_w)).collect();
    let ys: Vec<u32> = (0..h).map(|y| source_coord(y, factor, src_h)).collect();
    Ok(ImageBuffer::from_fn(w, h, |x, y| {
        *img.get_pixel(xs[x as usize], ys[y as usize])
    }))
}
