// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use blocktex::{
    compress, compressed_size, decompress, mipmapped_size, pixel_size, CompressFlag,
    CompressFlags, Dimensions, Format,
};
use clap::{arg, command, value_parser, ArgMatches, Command};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use itertools::Itertools;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use strum::IntoEnumIterator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// How many mip levels to generate
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MipCount {
    Levels(usize),
    Full,
}

impl MipCount {
    fn resolve(self, dimensions: Dimensions) -> usize {
        match self {
            MipCount::Levels(levels) => levels,
            MipCount::Full => dimensions.mip_count(),
        }
    }
}

fn parse_format(name: &str) -> std::result::Result<Format, String> {
    Format::from_str(name).map_err(|_| {
        format!(
            "unknown format '{name}', expected one of: {}",
            Format::iter().join(", ")
        )
    })
}

fn parse_mips(value: &str) -> std::result::Result<MipCount, String> {
    if value.eq_ignore_ascii_case("full") {
        return Ok(MipCount::Full);
    }
    value
        .parse()
        .map(MipCount::Levels)
        .map_err(|_| format!("'{value}' is not a level count or 'full'"))
}

fn required<'a, T: Clone + Send + Sync + 'static>(matches: &'a ArgMatches, id: &str) -> Result<&'a T> {
    matches
        .get_one::<T>(id)
        .ok_or_else(|| miette!("missing argument {id}"))
}

fn cli() -> Command {
    let format = arg!(-f --format <FORMAT> "Block compression format")
        .value_parser(parse_format)
        .default_value("bc1");
    let width = arg!(--width <WIDTH> "Image width in pixels")
        .value_parser(value_parser!(usize))
        .required(true);
    let height = arg!(--height <HEIGHT> "Image height in pixels")
        .value_parser(value_parser!(usize))
        .required(true);
    let mips = arg!(-m --mips <MIPS> "Number of mip levels, or 'full' for a complete chain")
        .value_parser(parse_mips)
        .default_value("1");

    command!()
        .subcommand_required(true)
        .arg(arg!(-v --verbose ... "Log more detail, repeat for more").global(true))
        .subcommand(
            Command::new("compress")
                .about("Compress an image to a raw block stream")
                .arg(arg!(<INPUT> "Image to compress").value_parser(value_parser!(PathBuf)))
                .arg(arg!(<OUTPUT> "Block stream to write").value_parser(value_parser!(PathBuf)))
                .arg(format.clone())
                .arg(mips.clone())
                .arg(arg!(--uniform "Weight color channels equally instead of perceptually")),
        )
        .subcommand(
            Command::new("decompress")
                .about("Decompress the first level of a raw block stream to an image")
                .arg(arg!(<INPUT> "Block stream to read").value_parser(value_parser!(PathBuf)))
                .arg(arg!(<OUTPUT> "Image to write").value_parser(value_parser!(PathBuf)))
                .arg(format.clone())
                .arg(width.clone())
                .arg(height.clone())
                .arg(arg!(--normal "Rebuild a normal map's Z component")),
        )
        .subcommand(
            Command::new("info")
                .about("Print the compressed layout of an image")
                .arg(format)
                .arg(width)
                .arg(height)
                .arg(mips),
        )
}

fn run_compress(matches: &ArgMatches) -> Result<()> {
    let input: &PathBuf = required(matches, "INPUT")?;
    let output: &PathBuf = required(matches, "OUTPUT")?;
    let format: Format = *required(matches, "format")?;
    let mips: MipCount = *required(matches, "mips")?;

    let flags = if matches.get_flag("uniform") {
        CompressFlags::empty()
    } else {
        CompressFlag::Perceptual.into()
    };

    let image = image::open(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", input.display()))?
        .to_rgba8();
    let dimensions = Dimensions::new(image.width() as usize, image.height() as usize)?;
    let levels = mips.resolve(dimensions);

    let mut src = Vec::with_capacity(pixel_size(dimensions, 4, levels));
    for level in dimensions.mips().take(levels) {
        if level == dimensions {
            src.extend_from_slice(image.as_raw());
        } else {
            debug!(%level, "resizing");
            let resized = imageops::resize(
                &image,
                level.width() as u32,
                level.height() as u32,
                FilterType::Triangle,
            );
            src.extend_from_slice(resized.as_raw());
        }
    }

    let mut dst = vec![0u8; mipmapped_size(format, dimensions, levels)];
    compress(
        &mut dst,
        &src,
        format,
        dimensions.width(),
        dimensions.height(),
        4,
        levels,
        flags,
    )?;

    fs::write(output, &dst)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
    info!(%format, %dimensions, levels, bytes = dst.len(), "wrote {}", output.display());
    Ok(())
}

fn run_decompress(matches: &ArgMatches) -> Result<()> {
    let input: &PathBuf = required(matches, "INPUT")?;
    let output: &PathBuf = required(matches, "OUTPUT")?;
    let format: Format = *required(matches, "format")?;
    let width: usize = *required(matches, "width")?;
    let height: usize = *required(matches, "height")?;
    let normal = matches.get_flag("normal");

    let src = fs::read(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", input.display()))?;

    let dimensions = Dimensions::new(width, height)?;
    let mut dst = vec![0u8; dimensions.pixels() * 4];
    decompress(&mut dst, &src, format, width, height, 4, normal)?;

    let image = RgbaImage::from_raw(width as u32, height as u32, dst)
        .ok_or_else(|| miette!("Decoded image does not fit {dimensions}"))?;
    image
        .save(output)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
    info!(%format, %dimensions, "wrote {}", output.display());
    Ok(())
}

fn run_info(matches: &ArgMatches) -> Result<()> {
    let format: Format = *required(matches, "format")?;
    let width: usize = *required(matches, "width")?;
    let height: usize = *required(matches, "height")?;
    let mips: MipCount = *required(matches, "mips")?;

    let dimensions = Dimensions::new(width, height)?;
    let levels = mips.resolve(dimensions);

    println!("format:         {format}");
    println!("dimensions:     {dimensions}");
    println!("blocks:         {}", dimensions.blocks());
    println!("size:           {}", compressed_size(format, dimensions));
    println!("mipmapped size: {} ({levels} levels)", mipmapped_size(format, dimensions, levels));
    println!("full mip chain: {} levels", dimensions.mip_count());
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let default_level = match matches.get_count("verbose") {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("compress", sub)) => run_compress(sub),
        Some(("decompress", sub)) => run_decompress(sub),
        Some(("info", sub)) => run_info(sub),
        _ => Err(miette!("No command given")),
    }
}
