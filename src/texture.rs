// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::blocktexture::{extract_block, put_block};
use crate::color::{Color, OPAQUE_BLACK};
use crate::dimensions::Dimensions;
use crate::error::{CodecError, CodecResult};
use crate::flags::CompressFlags;
use crate::format::{BlockCodec, Format};

/// Size in bytes of a single compressed surface
pub fn compressed_size(format: Format, dimensions: Dimensions) -> usize {
    dimensions.blocks() * format.block_size()
}

/// Size in bytes of the first `mip_levels` levels of a compressed mip chain
pub fn mipmapped_size(format: Format, dimensions: Dimensions, mip_levels: usize) -> usize {
    dimensions
        .mips()
        .take(mip_levels)
        .map(|level| compressed_size(format, level))
        .sum()
}

/// Size in bytes of the first `mip_levels` levels of an uncompressed mip chain
pub fn pixel_size(dimensions: Dimensions, channels: usize, mip_levels: usize) -> usize {
    dimensions
        .mips()
        .take(mip_levels)
        .map(|level| level.pixels() * channels)
        .sum()
}

fn check_channels(channels: usize) -> CodecResult {
    match channels {
        1..=4 => Ok(()),
        _ => Err(CodecError::Channels(channels)),
    }
}

fn check_len(expected: usize, actual: usize, error: fn(usize, usize) -> CodecError) -> CodecResult {
    if actual < expected {
        Err(error(expected, actual))
    } else {
        Ok(())
    }
}

/// Expand a 1, 2, 3 or 4 channel pixel to RGBA
fn promote(pixel: &[u8]) -> Color {
    match *pixel {
        [] => OPAQUE_BLACK,
        [l] => [l, l, l, u8::MAX],
        [l, a] => [l, l, l, a],
        [r, g, b] => [r, g, b, u8::MAX],
        [r, g, b, a, ..] => [r, g, b, a],
    }
}

/// Compress an image and its mip chain.
///
/// `src` holds `mip_levels` images, largest first, each `channels`-interleaved
/// and row major. Level `n` is `max(1, width >> n)` by `max(1, height >> n)`.
/// The compressed levels are written to `dst` in the same order, each as a
/// row-major sequence of blocks.
#[allow(clippy::too_many_arguments)]
pub fn compress(
    dst: &mut [u8],
    src: &[u8],
    format: Format,
    width: usize,
    height: usize,
    channels: usize,
    mip_levels: usize,
    flags: CompressFlags,
) -> CodecResult {
    let dimensions = Dimensions::new(width, height)?;
    check_channels(channels)?;

    let max = dimensions.mip_count();
    if mip_levels == 0 || mip_levels > max {
        return Err(CodecError::MipLevels {
            requested: mip_levels,
            max,
        });
    }

    check_len(pixel_size(dimensions, channels, mip_levels), src.len(), |expected, actual| {
        CodecError::SourceSize { expected, actual }
    })?;
    check_len(mipmapped_size(format, dimensions, mip_levels), dst.len(), |expected, actual| {
        CodecError::DestinationSize { expected, actual }
    })?;

    debug!(%format, %dimensions, channels, mip_levels, "compressing");

    let block_size = format.block_size();
    let mut src_offset = 0;
    let mut dst_offset = 0;

    for (level, level_dimensions) in dimensions.mips().take(mip_levels).enumerate() {
        let (level_width, level_height) = (level_dimensions.width(), level_dimensions.height());
        let src_len = level_dimensions.pixels() * channels;
        let dst_len = compressed_size(format, level_dimensions);
        trace!(
            level,
            dimensions = %level_dimensions,
            blocks = level_dimensions.blocks(),
            offset = dst_offset,
            "compressing mip level"
        );

        let rgba: Vec<u8> = src[src_offset..src_offset + src_len]
            .par_chunks_exact(channels)
            .flat_map_iter(|pixel| format.prepare(promote(pixel)))
            .collect();

        let blocks_wide = level_dimensions.blocks_wide();
        dst[dst_offset..dst_offset + dst_len]
            .par_chunks_mut(block_size)
            .enumerate()
            .for_each(|(index, block)| {
                let x = (index % blocks_wide) * 4;
                let y = (index / blocks_wide) * 4;
                let pixels = extract_block(&rgba, x, y, level_width, level_height);
                format.encode_block(&pixels, flags, block);
            });

        src_offset += src_len;
        dst_offset += dst_len;
    }

    Ok(())
}

/// Decompress a single image.
///
/// `dst` receives `channels`-interleaved, row-major pixels, keeping the first
/// `channels` of each decoded RGBA pixel. With `normal_map` set, formats that
/// can hold a two channel normal map rebuild it as (X, Y, Z) in place of
/// their usual output.
pub fn decompress(
    dst: &mut [u8],
    src: &[u8],
    format: Format,
    width: usize,
    height: usize,
    channels: usize,
    normal_map: bool,
) -> CodecResult {
    let dimensions = Dimensions::new(width, height)?;
    check_channels(channels)?;

    check_len(compressed_size(format, dimensions), src.len(), |expected, actual| {
        CodecError::SourceSize { expected, actual }
    })?;
    check_len(dimensions.pixels() * channels, dst.len(), |expected, actual| {
        CodecError::DestinationSize { expected, actual }
    })?;

    let normal_layout = format.normal_layout().filter(|_| normal_map);
    debug!(%format, %dimensions, channels, ?normal_layout, "decompressing");

    let block_size = format.block_size();
    let blocks_wide = dimensions.blocks_wide();
    let row_len = width * channels;

    // each band is one row of blocks
    dst[..dimensions.pixels() * channels]
        .par_chunks_mut(row_len * 4)
        .enumerate()
        .for_each(|(block_y, band)| {
            let band_height = band.len() / row_len;
            for block_x in 0..blocks_wide {
                let offset = (block_y * blocks_wide + block_x) * block_size;
                let pixels = format.decode_block(&src[offset..]).map(|color| match normal_layout {
                    Some(layout) => layout.reconstruct(color),
                    None => format.restore(color),
                });
                put_block(band, &pixels, block_x * 4, 0, width, band_height, channels);
            }
        });

    Ok(())
}
