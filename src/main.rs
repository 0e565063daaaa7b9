use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use log::{debug, info, LevelFilter};
use pixelart::{Palette, PalettePixelizer, PixelizeConfig, Pixelizer, Preset};

#[derive(ValueEnum, Clone, Debug)]
enum PresetArg {
    Meadow,
    Ink,
}

fn main() -> Result<(), Box<dyn Error>> {
    let matches = Command::new("pixelart")
        .version("0.1")
        .about("Convert the input image to limited-palette pixel art.")
        .arg(
            Arg::new("input")
                .help("Sets the input file to use")
                .required(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Sets an optional output file. Defaults to <input>_pixelized.png"),
        )
        .arg(
            Arg::new("preset")
                .long("preset")
                .help("Built-in palette and scale to start from.")
                .action(ArgAction::Set)
                .value_name("PRESET")
                .value_parser(value_parser!(PresetArg))
                .default_value("meadow")
                .conflicts_with("config"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON file with downscale_factor, block_size and palette.")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("scale")
                .short('s')
                .long("scale")
                .help("The downscale factor, in (0, 1].")
                .value_name("FACTOR")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("block_size")
                .short('b')
                .long("block_size")
                .help("Side in pixels of each output block.")
                .value_name("UINT")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("palette")
                .long("palette")
                .help("Palette colors as \"r,g,b;r,g,b;...\".")
                .value_name("COLORS"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Prints debug information verbosely.")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    env_logger::Builder::new()
        .filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    let input_path = matches
        .get_one::<PathBuf>("input")
        .ok_or("missing input file")?;

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            info!("Using config file: {}", path.display());
            PixelizeConfig::from_json(&fs::read_to_string(path)?)?
        }
        None => {
            let preset = match matches.get_one::<PresetArg>("preset") {
                Some(PresetArg::Ink) => Preset::Ink,
                Some(PresetArg::Meadow) | None => Preset::Meadow,
            };
            info!("Using preset: {:?}", preset);
            preset.config()
        }
    };
    if let Some(&scale) = matches.get_one::<f64>("scale") {
        config.downscale_factor = scale;
    }
    if let Some(&block_size) = matches.get_one::<u32>("block_size") {
        config.block_size = block_size;
    }
    if let Some(colors) = matches.get_one::<String>("palette") {
        config.set_palette(&colors.parse::<Palette>()?);
    }
    debug!("Configuration: {:?}", config);

    let pixelizer = PalettePixelizer::from_config(config)?;
    debug!(
        "Palette of {} colors, downscale {}, {}px blocks",
        pixelizer.palette().len(),
        pixelizer.scale().downscale_factor,
        pixelizer.scale().block_size
    );

    info!("Using input file: {}", input_path.display());
    let img = image::open(input_path)?;
    info!("Input size: {}x{}", img.width(), img.height());

    let img_pixelized = pixelizer.pixelize(&img)?;

    let output_path = match matches.get_one::<PathBuf>("output") {
        Some(path) => path.clone(),
        None => default_output_path(input_path),
    };
    img_pixelized.save(&output_path)?;
    info!("Output saved to: {}", output_path.display());

    Ok(())
}

fn default_output_path(input_path: &Path) -> PathBuf {
    let file_stem = input_path.file_stem().unwrap_or_default();
    let mut new_name = file_stem.to_os_string();
    new_name.push("_pixelized.png");
    input_path.with_file_name(new_name)
}
