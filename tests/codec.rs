// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use anyhow::Result;
use rstest::rstest;
use strum::IntoEnumIterator;

use blocktex::blocktexture::{extract_block, Block};
use blocktex::s3tc::bc1::{Bc1, BC1Block};
use blocktex::s3tc::bc2::Bc2;
use blocktex::s3tc::bc3::{AlphaExponent, Bc3, Bc3Normal, Rxgb};
use blocktex::s3tc::bc4::{Bc4, BC4Block};
use blocktex::s3tc::bc5::Bc5;
use blocktex::s3tc::ycocg::{YCoCg, YCoCgScaled};
use blocktex::*;

/// Deterministic noise, so failures reproduce
fn noise(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2654435761) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// A smooth RGBA gradient, which every format should reproduce closely
fn gradient(width: usize, height: usize) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            let (x, y) = (i % width, i / width);
            [
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x + y) * 127 / (width + height)) as u8,
                255,
            ]
        })
        .collect()
}

fn round_trip(format: Format, src: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let dimensions = Dimensions::new(width, height)?;
    let mut blocks = vec![0u8; compressed_size(format, dimensions)];
    compress(&mut blocks, src, format, width, height, 4, 1, CompressFlags::empty())?;

    let mut pixels = vec![0u8; width * height * 4];
    decompress(&mut pixels, &blocks, format, width, height, 4, false)?;
    Ok(pixels)
}

fn mean_error(a: &[u8], b: &[u8], channels: &[usize]) -> f64 {
    let total: u64 = a
        .chunks_exact(4)
        .zip(b.chunks_exact(4))
        .flat_map(|(p, q)| channels.iter().map(move |&c| p[c].abs_diff(q[c]) as u64))
        .sum();
    total as f64 / (a.len() / 4 * channels.len()) as f64
}

#[rstest]
#[case::black([0, 0, 0])]
#[case::white([255, 255, 255])]
#[case::gray([128, 128, 128])]
#[case::magenta([255, 0, 128])]
#[case::dark([8, 16, 24])]
#[case::green([0, 255, 10])]
/// Uniform images of colors on the BC1 interpolation grid come back exactly
fn uniform_round_trip(#[case] color: [u8; 3]) -> Result<()> {
    let src = [color[0], color[1], color[2], 255].repeat(64);
    let decoded = round_trip(Bc1.into(), &src, 8, 8)?;
    assert_eq!(decoded, src, "uniform {color:?} changed");
    Ok(())
}

#[test]
fn deterministic() -> Result<()> {
    let src = noise(7, 12 * 12 * 4);
    for format in Format::iter() {
        let mut a = vec![0u8; compressed_size(format, Dimensions::new(12, 12)?)];
        let mut b = a.clone();
        compress(&mut a, &src, format, 12, 12, 4, 1, CompressFlag::Perceptual.into())?;
        compress(&mut b, &src, format, 12, 12, 4, 1, CompressFlag::Perceptual.into())?;
        assert_eq!(a, b, "{format} output is not deterministic");
    }
    Ok(())
}

#[test]
/// The parallel driver writes exactly what encoding each block in turn would
fn matches_serial() -> Result<()> {
    let (width, height) = (13, 9);
    let src = noise(3, width * height * 4);
    for format in Format::iter() {
        let dimensions = Dimensions::new(width, height)?;
        let mut parallel = vec![0u8; compressed_size(format, dimensions)];
        compress(&mut parallel, &src, format, width, height, 4, 1, CompressFlags::empty())?;

        let prepared: Vec<u8> = src
            .chunks_exact(4)
            .flat_map(|p| format.prepare([p[0], p[1], p[2], p[3]]))
            .collect();
        let mut serial = vec![0u8; parallel.len()];
        for (i, block) in serial.chunks_mut(format.block_size()).enumerate() {
            let x = (i % dimensions.blocks_wide()) * 4;
            let y = (i / dimensions.blocks_wide()) * 4;
            let pixels = extract_block(&prepared, x, y, width, height);
            format.encode_block(&pixels, CompressFlags::empty(), block);
        }
        assert_eq!(parallel, serial, "{format} differs from serial encoding");
    }
    Ok(())
}

#[rstest]
#[case::opaque(255)]
#[case::punch_through(0)]
/// No block uses palette code 3 unless it is in three color mode, and three
/// color blocks only use code 3 for transparent pixels
fn endpoint_order(#[case] transparent_alpha: u8) -> Result<()> {
    let (width, height) = (16, 16);
    let mut src = noise(11, width * height * 4);
    for (i, pixel) in src.chunks_exact_mut(4).enumerate() {
        pixel[3] = if i % 7 == 0 { transparent_alpha } else { 255 };
    }

    let mut blocks = vec![0u8; compressed_size(Bc1.into(), Dimensions::new(width, height)?)];
    compress(&mut blocks, &src, Bc1.into(), width, height, 4, 1, CompressFlags::empty())?;

    for (i, bytes) in blocks.chunks_exact(BC1Block::SIZE).enumerate() {
        let block = BC1Block::read(bytes);
        let (bx, by) = ((i % 4) * 4, (i / 4) * 4);
        let pixels = extract_block(&src, bx, by, width, height);
        let codes = block.codes();

        if block.is_three_color() {
            if block.endpoints[0] == block.endpoints[1] && pixels.iter().all(|p| p[3] >= 128) {
                assert_eq!(block.indices, 0, "block {i} has equal endpoints and nonzero codes");
            }
            for (pixel, code) in pixels.iter().zip(codes) {
                assert_eq!(code == 3, pixel[3] < 128, "block {i} misuses code 3");
            }
        } else {
            assert!(pixels.iter().all(|p| p[3] >= 128), "block {i} lost transparency");
        }
    }
    Ok(())
}

#[rstest]
#[case::wide([255, 0])]
#[case::narrow([140, 130])]
#[case::adjacent([9, 8])]
#[case::six_wide([0, 255])]
#[case::six_narrow([40, 50])]
fn alpha_ramp_monotonic(#[case] endpoints: [u8; 2]) {
    let block = BC4Block {
        endpoints,
        codes: [0; 16],
    };
    let palette = block.palette();

    if endpoints[0] > endpoints[1] {
        let ramp: Vec<u8> = [0, 2, 3, 4, 5, 6, 7, 1].iter().map(|&c| palette[c]).collect();
        assert!(ramp.windows(2).all(|w| w[0] >= w[1]), "ramp {ramp:?} increases");
    } else {
        let ramp: Vec<u8> = [0, 2, 3, 4, 5, 1].iter().map(|&c| palette[c]).collect();
        assert!(ramp.windows(2).all(|w| w[0] <= w[1]), "ramp {ramp:?} decreases");
        assert_eq!(palette[6], 0);
        assert_eq!(palette[7], 255);
    }
}

#[test]
fn edge_replication() {
    let src: Vec<u8> = (0..25u8).flat_map(|i| [i, i * 2, i * 3, 255]).collect();
    let block = extract_block(&src, 4, 4, 5, 5);
    assert!(block.iter().all(|&p| p == [24, 48, 72, 255]), "corner block is {block:?}");

    let block = extract_block(&src, 4, 0, 5, 5);
    for (i, pixel) in block.iter().enumerate() {
        let row = usize::min(i / 4, 3) as u8;
        let expected = row * 5 + 4;
        assert_eq!(pixel[0], expected, "pixel {i} should repeat column 4");
    }
}

#[test]
fn size_formula() -> Result<()> {
    let dimensions = Dimensions::new(10, 6)?;
    assert_eq!(dimensions.blocks(), 6);
    assert_eq!(compressed_size(Bc1.into(), dimensions), 48);
    assert_eq!(compressed_size(Bc3.into(), dimensions), 96);
    assert_eq!(compressed_size(Bc4.into(), dimensions), 48);
    assert_eq!(compressed_size(YCoCgScaled.into(), dimensions), 96);
    Ok(())
}

#[rstest]
#[case::gray(1, vec![128])]
#[case::gray_alpha(2, vec![128, 40])]
#[case::rgb(3, vec![128, 128, 128])]
/// Narrow pixels are compressed as the RGBA pixel they expand to
fn channel_promotion(#[case] channels: usize, #[case] pixel: Vec<u8>) -> Result<()> {
    let alpha = if channels == 2 { 40 } else { 255 };
    let rgba = [128, 128, 128, alpha];
    let narrow = pixel.repeat(16);

    let mut expected = [0u8; 16];
    let mut actual = [0u8; 16];
    compress(&mut expected, &rgba.repeat(16), Bc3.into(), 4, 4, 4, 1, CompressFlags::empty())?;
    compress(&mut actual, &narrow, Bc3.into(), 4, 4, channels, 1, CompressFlags::empty())?;
    assert_eq!(actual, expected);

    // decompress keeps the leading channels of each RGBA pixel
    let mut out = vec![0u8; 16 * channels];
    decompress(&mut out, &actual, Bc3.into(), 4, 4, channels, false)?;
    assert_eq!(out, rgba[..channels].repeat(16));
    Ok(())
}

#[test]
/// Levels are stored largest first, each in row-major block order
fn mip_stream_layout() -> Result<()> {
    let colors: [[u8; 4]; 4] = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 255, 255],
    ];
    let dimensions = Dimensions::new(8, 8)?;
    let src: Vec<u8> = dimensions
        .mips()
        .zip(colors)
        .flat_map(|(level, color)| color.repeat(level.pixels()))
        .collect();
    assert_eq!(src.len(), pixel_size(dimensions, 4, 4));

    let format: Format = Bc1.into();
    let mut blocks = vec![0u8; mipmapped_size(format, dimensions, 4)];
    compress(&mut blocks, &src, format, 8, 8, 4, 4, CompressFlags::empty())?;
    assert_eq!(blocks.len(), 32 + 8 + 8 + 8);

    let mut offset = 0;
    for (level, color) in dimensions.mips().zip(colors) {
        let size = compressed_size(format, level);
        let mut pixels = vec![0u8; level.pixels() * 4];
        decompress(&mut pixels, &blocks[offset..offset + size], format, level.width(), level.height(), 4, false)?;
        assert!(pixels.chunks_exact(4).all(|p| p == color), "level {level} has the wrong color");
        offset += size;
    }
    Ok(())
}

#[rstest]
#[case::bc1(Bc1.into(), 8.0)]
#[case::bc2(Bc2.into(), 8.0)]
#[case::bc3(Bc3.into(), 8.0)]
#[case::rxgb(Rxgb.into(), 8.0)]
#[case::ycocg(YCoCg.into(), 8.0)]
#[case::ycocg_scaled(YCoCgScaled.into(), 8.0)]
#[case::alpha_exponent(AlphaExponent.into(), 8.0)]
/// Every color format inverts its own pixel transform
fn gradient_round_trip(#[case] format: Format, #[case] tolerance: f64) -> Result<()> {
    let src = gradient(64, 64);
    let decoded = round_trip(format, &src, 64, 64)?;
    let error = mean_error(&src, &decoded, &[0, 1, 2]);
    assert!(error < tolerance, "{format} mean error {error:.2} too high");
    Ok(())
}

#[test]
fn single_channel_outputs() -> Result<()> {
    let src = gradient(16, 16);

    let bc4 = round_trip(Bc4.into(), &src, 16, 16)?;
    assert!(mean_error(&src, &bc4, &[0]) < 4.0);
    assert!(bc4.chunks_exact(4).all(|p| p[1..] == [0, 0, 255]));

    let bc5 = round_trip(Bc5.into(), &src, 16, 16)?;
    assert!(mean_error(&src, &bc5, &[0, 1]) < 4.0);
    assert!(bc5.chunks_exact(4).all(|p| p[2..] == [0, 255]));
    Ok(())
}

#[rstest]
#[case::bc3n(Bc3Normal.into())]
#[case::bc5(Bc5.into())]
fn normal_reconstruction(#[case] format: Format) -> Result<()> {
    // a tilted normal: X = 0.6, Y = 0, Z = 0.8
    let x = ((0.6f32 + 1.0) * 127.5).round() as u8;
    let src = [x, 128, 0, 255].repeat(16);

    let mut blocks = [0u8; 16];
    compress(&mut blocks, &src, format, 4, 4, 4, 1, CompressFlags::empty())?;
    let mut normals = [0u8; 64];
    decompress(&mut normals, &blocks, format, 4, 4, 4, true)?;

    for pixel in normals.chunks_exact(4) {
        assert!(pixel[0].abs_diff(x) <= 1, "{format} X is {}", pixel[0]);
        let z = pixel[2] as f32 / 127.5 - 1.0;
        assert!((z - 0.8).abs() < 0.03, "{format} Z is {z}");
        assert_eq!(pixel[3], 255);
    }
    Ok(())
}
