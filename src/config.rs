use std::str::FromStr;

use palette::Srgb;
use serde::Deserialize;

use crate::error::ConfigError;

/// An ordered, non-empty list of allowed output colors.
///
/// Order only matters when two entries are equally close to a color: the
/// earlier entry wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb<u8>>,
}

impl Palette {
    pub fn new(colors: Vec<Srgb<u8>>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn from_rgb(colors: &[[u8; 3]]) -> Result<Self, ConfigError> {
        Self::new(
            colors
                .iter()
                .map(|&[r, g, b]| Srgb::new(r, g, b))
                .collect(),
        )
    }

    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, a palette cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the entry with the smallest squared RGB distance to `(r, g, b)`.
    /// Ties go to the first entry in palette order.
    pub fn nearest_index(&self, r: u8, g: u8, b: u8) -> usize {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, color) in self.colors.iter().enumerate() {
            let dist = distance_sq((r, g, b), color);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    pub fn nearest(&self, r: u8, g: u8, b: u8) -> Srgb<u8> {
        self.colors[self.nearest_index(r, g, b)]
    }

    fn to_rgb(&self) -> Vec<[u8; 3]> {
        self.colors
            .iter()
            .map(|c| [c.red, c.green, c.blue])
            .collect()
    }
}

fn distance_sq((r, g, b): (u8, u8, u8), color: &Srgb<u8>) -> u32 {
    let dr = r as i32 - color.red as i32;
    let dg = g as i32 - color.green as i32;
    let db = b as i32 - color.blue as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Parses `"r,g,b;r,g,b;..."`.
impl FromStr for Palette {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_color)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }
}

fn parse_color(s: &str) -> Result<Srgb<u8>, ConfigError> {
    let invalid = || ConfigError::InvalidColor(s.to_string());
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let r = parts[0].parse::<u8>().map_err(|_| invalid())?;
    let g = parts[1].parse::<u8>().map_err(|_| invalid())?;
    let b = parts[2].parse::<u8>().map_err(|_| invalid())?;
    Ok(Srgb::new(r, g, b))
}

/// How far to shrink the source, and how large each output cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    /// Applied to both axes before quantization, in (0, 1].
    pub downscale_factor: f64,
    /// Side length in pixels of each rendered block.
    pub block_size: u32,
}

impl ScaleConfig {
    pub fn new(downscale_factor: f64, block_size: u32) -> Self {
        Self {
            downscale_factor,
            block_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.downscale_factor;
        if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
            return Err(ConfigError::InvalidDownscaleFactor(factor));
        }
        if self.block_size < 1 {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}

/// Built-in configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Five greens down to near-black, 10x shrink, 10px blocks.
    #[default]
    Meadow,
    /// Two-tone near-black and near-white, 5x shrink, 5px blocks.
    Ink,
}

const MEADOW_PALETTE: [[u8; 3]; 5] = [
    [172, 242, 121],
    [154, 217, 108],
    [117, 166, 83],
    [83, 115, 60],
    [13, 13, 13],
];

const INK_PALETTE: [[u8; 3]; 2] = [[13, 13, 13], [242, 242, 242]];

impl Preset {
    pub fn config(self) -> PixelizeConfig {
        match self {
            Preset::Meadow => PixelizeConfig {
                downscale_factor: 0.1,
                block_size: 10,
                palette: MEADOW_PALETTE.to_vec(),
            },
            Preset::Ink => PixelizeConfig {
                downscale_factor: 0.2,
                block_size: 5,
                palette: INK_PALETTE.to_vec(),
            },
        }
    }
}

/// Full conversion setup, as read from a JSON file:
///
/// ```json
/// { "downscale_factor": 0.1, "block_size": 10, "palette": [[172, 242, 121], [13, 13, 13]] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PixelizeConfig {
    pub downscale_factor: f64,
    pub block_size: u32,
    pub palette: Vec<[u8; 3]>,
}

impl PixelizeConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn scale(&self) -> ScaleConfig {
        ScaleConfig::new(self.downscale_factor, self.block_size)
    }

    pub fn set_palette(&mut self, palette: &Palette) {
        self.palette = palette.to_rgb();
    }

    /// Checks every field and splits into the values `convert` takes.
    pub fn into_parts(self) -> Result<(Palette, ScaleConfig), ConfigError> {
        let scale = self.scale();
        scale.validate()?;
        let palette = Palette::from_rgb(&self.palette)?;
        Ok((palette, scale))
    }
}

impl Default for PixelizeConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}
