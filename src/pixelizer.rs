extern crate image;
use image::{DynamicImage, RgbaImage};
use log::{debug, info};

use crate::config::{Palette, PixelizeConfig, Preset, ScaleConfig};
use crate::error::{ConfigError, PixelizeError};

pub mod downsample;
pub mod quantize;
pub mod render;

/// RGBA8 pixel grid handed from stage to stage.
pub type PixelBuffer = RgbaImage;

pub trait Pixelizer {
    fn pixelize(&self, img: &DynamicImage) -> Result<DynamicImage, PixelizeError>;
}

/// Downsample, snap to `palette`, then draw each cell as a `block_size` square.
///
/// Every configuration check runs before any pixel is processed, so a failed
/// call never yields a partial image. `None` or a zero-area source is
/// [`PixelizeError::MissingInput`].
pub fn convert(
    source: Option<PixelBuffer>,
    palette: &Palette,
    scale: &ScaleConfig,
) -> Result<PixelBuffer, PixelizeError> {
    let source = source.ok_or(PixelizeError::MissingInput)?;
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(PixelizeError::MissingInput);
    }
    scale.validate()?;
    let (small_w, small_h) = downsample::target_dimensions(width, height, scale.downscale_factor)?;
    let (out_w, out_h) = render::output_dimensions(small_w, small_h, scale.block_size)?;
    debug!(
        "Planned {}x{} -> {}x{} -> {}x{}",
        width, height, small_w, small_h, out_w, out_h
    );

    let small = downsample::downsample(source, scale.downscale_factor)?;
    let quantized = quantize::quantize(small, palette);
    let out = render::render_blocks(quantized, scale.block_size)?;

    info!(
        "Pixelized {}x{} into {}x{} ({} colors, {}px blocks)",
        width,
        height,
        out_w,
        out_h,
        palette.len(),
        scale.block_size
    );
    Ok(out)
}

/// [`convert`] for an already decoded image of any color type.
pub fn convert_image(
    img: &DynamicImage,
    palette: &Palette,
    scale: &ScaleConfig,
) -> Result<PixelBuffer, PixelizeError> {
    convert(Some(img.to_rgba8()), palette, scale)
}

pub struct PalettePixelizer {
    palette: Palette,
    scale: ScaleConfig,
}

impl PalettePixelizer {
    pub fn new(palette: Palette, scale: ScaleConfig) -> Self {
        Self { palette, scale }
    }

    pub fn from_config(config: PixelizeConfig) -> Result<Self, ConfigError> {
        let (palette, scale) = config.into_parts()?;
        Ok(Self::new(palette, scale))
    }

    pub fn from_preset(preset: Preset) -> Result<Self, ConfigError> {
        Self::from_config(preset.config())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn scale(&self) -> &ScaleConfig {
        &self.scale
    }
}

impl Pixelizer for PalettePixelizer {
    fn pixelize(&self, img: &DynamicImage) -> Result<DynamicImage, PixelizeError> {
        convert_image(img, &self.palette, &self.scale).map(DynamicImage::ImageRgba8)
    }
}
