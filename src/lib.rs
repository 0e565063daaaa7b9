mod config;
mod error;
mod pixelizer;

pub use config::{Palette, PixelizeConfig, Preset, ScaleConfig};
pub use error::{ConfigError, PixelizeError};
pub use pixelizer::{convert, convert_image, PalettePixelizer, PixelBuffer, Pixelizer};
pub use pixelizer::{downsample, quantize, render};

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn two_pixel_scenario() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        let palette = Palette::from_rgb(&[[172, 242, 121]]).unwrap();

        let out = convert(Some(img), &palette, &ScaleConfig::new(1.0, 2)).unwrap();
        assert_eq!(out.dimensions(), (4, 2));
        for (x, _, pixel) in out.enumerate_pixels() {
            if x < 2 {
                assert_eq!(*pixel, Rgba([172, 242, 121, 255]));
            } else {
                assert_eq!(pixel[3], 0);
            }
        }
    }

    #[test]
    fn dimension_law() {
        let img = RgbaImage::from_pixel(100, 30, Rgba([50, 60, 70, 255]));
        let palette = Palette::from_rgb(&[[0, 0, 0]]).unwrap();
        let out = convert(Some(img), &palette, &ScaleConfig::new(0.5, 2)).unwrap();
        assert_eq!(out.dimensions(), (100, 30));

        let img = RgbaImage::from_pixel(123, 77, Rgba([50, 60, 70, 255]));
        let out = convert(Some(img), &palette, &ScaleConfig::new(0.1, 3)).unwrap();
        assert_eq!(out.dimensions(), (12 * 3, 7 * 3));
    }

    #[test]
    fn deterministic_output() {
        let img = RgbaImage::from_fn(40, 30, |x, y| {
            Rgba([(x * 6) as u8, (y * 8) as u8, (x ^ y) as u8, if x % 5 == 0 { 0 } else { 255 }])
        });
        let (palette, scale) = Preset::Meadow.config().into_parts().unwrap();
        let scale = ScaleConfig { downscale_factor: 0.5, ..scale };
        let a = convert(Some(img.clone()), &palette, &scale).unwrap();
        let b = convert(Some(img), &palette, &scale).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn transparent_source_gives_transparent_blocks() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 255]));
        for y in 0..2 {
            for x in 0..2 {
                img.put_pixel(x, y, Rgba([1, 2, 3, 0]));
            }
        }
        let palette = Palette::from_rgb(&[[255, 0, 0], [0, 0, 255]]).unwrap();
        let out = convert(Some(img), &palette, &ScaleConfig::new(0.5, 5)).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
        for (x, y, pixel) in out.enumerate_pixels() {
            if x < 5 && y < 5 {
                assert_eq!(*pixel, Rgba([0, 0, 0, 0]));
            } else {
                assert_eq!(*pixel, Rgba([255, 0, 0, 255]));
            }
        }
    }

    #[test]
    fn missing_input_is_rejected() {
        let palette = Palette::from_rgb(&[[0, 0, 0]]).unwrap();
        let scale = ScaleConfig::new(1.0, 1);
        assert_eq!(convert(None, &palette, &scale), Err(PixelizeError::MissingInput));
        assert_eq!(
            convert(Some(RgbaImage::new(0, 0)), &palette, &scale),
            Err(PixelizeError::MissingInput)
        );
    }

    #[test]
    fn oversized_output_is_rejected() {
        let palette = Palette::from_rgb(&[[0, 0, 0]]).unwrap();
        for block_size in [1 << 31, u32::MAX] {
            let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
            assert_eq!(
                convert(Some(img), &palette, &ScaleConfig::new(1.0, block_size)),
                Err(PixelizeError::InvalidConfiguration(ConfigError::OutputTooLarge {
                    width: 1,
                    height: 1,
                    block_size
                }))
            );
        }
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let img = RgbaImage::from_pixel(9, 9, Rgba([0, 0, 0, 255]));
        let palette = Palette::from_rgb(&[[0, 0, 0]]).unwrap();

        let err = convert(Some(img.clone()), &palette, &ScaleConfig::new(0.1, 4)).unwrap_err();
        assert_eq!(
            err,
            PixelizeError::InvalidConfiguration(ConfigError::EmptyDownscale {
                width: 9,
                height: 9,
                factor: 0.1
            })
        );

        let err = convert(Some(img.clone()), &palette, &ScaleConfig::new(-1.0, 4)).unwrap_err();
        assert!(matches!(
            err,
            PixelizeError::InvalidConfiguration(ConfigError::InvalidDownscaleFactor(_))
        ));

        let err = convert(Some(img), &palette, &ScaleConfig::new(1.0, 0)).unwrap_err();
        assert_eq!(
            err,
            PixelizeError::InvalidConfiguration(ConfigError::InvalidBlockSize(0))
        );
    }
}
