use image::RgbaImage;
use log::debug;
use rayon::prelude::*;

use crate::error::ConfigError;

/// Output size for `width x height` cells drawn as `block_size` squares.
pub fn output_dimensions(width: u32, height: u32, block_size: u32) -> Result<(u32, u32), ConfigError> {
    if block_size < 1 {
        return Err(ConfigError::InvalidBlockSize(block_size));
    }
    let too_large = ConfigError::OutputTooLarge {
        width,
        height,
        block_size,
    };
    let (w, h) = match (width.checked_mul(block_size), height.checked_mul(block_size)) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(too_large),
    };
    match (w as u64).checked_mul(h as u64).and_then(|n| n.checked_mul(4)) {
        Some(bytes) if bytes <= isize::MAX as u64 => Ok((w, h)),
        _ => Err(too_large),
    }
}

/// Draw every pixel of `img` as a solid `block_size` square.
///
/// The output starts fully transparent and pixels with alpha 0 are not drawn,
/// so their blocks stay transparent.
pub fn render_blocks(img: RgbaImage, block_size: u32) -> Result<RgbaImage, ConfigError> {
    let (w, h) = output_dimensions(img.width(), img.height(), block_size)?;
    let mut out = RgbaImage::new(w, h);
    let stride = w as usize * 4;
    if stride == 0 {
        return Ok(out);
    }
    debug!(
        "Rendering {}x{} as {}px blocks into {}x{}",
        img.width(),
        img.height(),
        block_size,
        w,
        h
    );

    let n = block_size as usize;
    out.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        let src_y = (y / n) as u32;
        for (x, block) in row.chunks_exact_mut(n * 4).enumerate() {
            let pixel = img.get_pixel(x as u32, src_y);
            if pixel[3] == 0 {
                continue;
            }
            for dst in block.chunks_exact_mut(4) {
                dst.copy_from_slice(&pixel.0);
            }
        }
    });
    Ok(out)
}
