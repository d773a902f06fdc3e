// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! DXT5 variants storing luma in the alpha block and chroma in the color block

use itertools::Itertools;

use crate::blocktexture::{channel, Block, PixelBlock};
use crate::color::{Color, ColorImpl};
use crate::flags::CompressFlags;
use crate::format::BlockCodec;
use crate::s3tc::bc1::{select4, BC1Block};
use crate::s3tc::bc3::BC3Block;
use crate::s3tc::bc4::BC4Block;

/// Convert RGB to (Co, Cg, 255, Y), with chroma offset to be unsigned.
/// Alpha is discarded.
pub fn to_ycocg(color: Color) -> Color {
    let [r, g, b] = [color.r(), color.g(), color.b()].map(i32::from);
    let clamp = |v: i32| v.clamp(0, 255) as u8;

    let y = (r + 2 * g + b + 2) >> 2;
    let co = ((2 * r - 2 * b + 2) >> 2) + 128;
    let cg = ((-r + 2 * g - b + 2) >> 2) + 128;

    [clamp(co), clamp(cg), u8::MAX, clamp(y)]
}

/// Convert (Co, Cg, scale, Y) back to opaque RGB. The scale channel is
/// only read if `scaled` is set.
pub fn from_ycocg(color: Color, scaled: bool) -> Color {
    const OFFSET: f32 = 0.5 * 256.0 / 255.0;

    let scale = if scaled {
        1.0 / ((255.0 / 8.0) * (color.b() as f32 / 255.0) + 1.0)
    } else {
        1.0
    };

    let y = color.a() as f32 / 255.0;
    let co = (color.r() as f32 / 255.0 - OFFSET) * scale;
    let cg = (color.g() as f32 / 255.0 - OFFSET) * scale;

    let unorm = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8;
    [unorm(y + co - cg), unorm(y + cg), unorm(y - co - cg), u8::MAX]
}

fn lerp13(a: i32, b: i32) -> i32 {
    (2 * a + b) / 3
}

/// Encode the chroma of a block as a color block, stretching it by a power of
/// two and recording the stretch in the blue channel of both endpoints.
///
/// The larger packed endpoint is written first, so the block reads as four
/// color mode even outside of a DXT5 block.
pub(crate) fn encode_scaled_chroma(pixels: &PixelBlock) -> BC1Block {
    let mut points = pixels.map(|p| [p[0] as i32, p[1] as i32]);

    // bounding box of Co and Cg
    let mut min = [0i32; 3];
    let mut max = [0i32; 3];
    for c in 0..2 {
        (min[c], max[c]) = points.iter().map(|p| p[c]).minmax().into_option().unwrap_or_default();
    }

    // pick the largest stretch that keeps every value in range
    let spread = [min[0], min[1], max[0], max[1]]
        .iter()
        .map(|v| (v - 128).abs())
        .max()
        .unwrap_or_default();
    let scale = 1 + (spread <= 63) as i32 + 2 * (spread <= 31) as i32;
    let stretch = |v: i32| (v - 128) * scale + 128;

    for c in 0..2 {
        min[c] = stretch(min[c]);
        max[c] = stretch(max[c]);
    }
    for point in points.iter_mut() {
        *point = point.map(stretch);
    }
    min[2] = (scale - 1) << 3;
    max[2] = min[2];

    // inset the box by 1/16 of its size and snap to 5:6 precision
    for (c, mask, shift) in [(0, 0xF8, 5), (1, 0xFC, 6)] {
        let inset = (max[c] - min[c]) - 7;
        let lo = (((min[c] << 4) + inset) >> 4).max(0);
        let hi = (((max[c] << 4) - inset) >> 4).min(255);
        min[c] = (lo & mask) | (lo >> shift);
        max[c] = (hi & mask) | (hi >> shift);
    }

    // use the other diagonal if most points sit on it
    let mid = [(max[0] + min[0] + 1) >> 1, (max[1] + min[1] + 1) >> 1];
    let side = points
        .iter()
        .filter(|p| (p[0] >= mid[0]) ^ (p[1] >= mid[1]))
        .count();
    if side > 8 && min[0] != max[0] {
        std::mem::swap(&mut min[1], &mut max[1]);
    }

    let colors = [
        [max[0], max[1]],
        [min[0], min[1]],
        [lerp13(max[0], min[0]), lerp13(max[1], min[1])],
        [lerp13(min[0], max[0]), lerp13(min[1], max[1])],
    ];

    let mut indices = 0u32;
    for (i, point) in points.iter().enumerate() {
        let d = colors.map(|c| (c[0] - point[0]).abs() + (c[1] - point[1]).abs());
        indices |= select4(d) << (2 * i);
    }

    let endpoint = |c: [i32; 3]| Color::to_565(&[c[0] as u8, c[1] as u8, c[2] as u8, u8::MAX]);
    let mut endpoints = [endpoint(max), endpoint(min)];
    if endpoints[0] < endpoints[1] {
        endpoints.swap(0, 1);
        indices ^= 0x5555_5555;
    }

    BC1Block { endpoints, indices }
}

/// Luma in alpha, chroma in red and green
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct YCoCg;

impl BlockCodec for YCoCg {
    fn block_size(&self) -> usize {
        BC3Block::SIZE
    }

    fn encode_block(&self, pixels: &PixelBlock, flags: CompressFlags, dst: &mut [u8]) {
        BC3Block::encode(pixels, flags).write(dst);
    }

    fn decode_block(&self, src: &[u8]) -> PixelBlock {
        BC3Block::read(src).decode()
    }

    fn prepare(&self, color: Color) -> Color {
        to_ycocg(color)
    }

    fn restore(&self, color: Color) -> Color {
        from_ycocg(color, false)
    }
}

/// [`YCoCg`] with chroma stretched per block, and the stretch kept in blue
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct YCoCgScaled;

impl BlockCodec for YCoCgScaled {
    fn block_size(&self) -> usize {
        BC3Block::SIZE
    }

    fn encode_block(&self, pixels: &PixelBlock, _flags: CompressFlags, dst: &mut [u8]) {
        let block = BC3Block(BC4Block::encode(&channel(pixels, 3)), encode_scaled_chroma(pixels));
        block.write(dst);
    }

    fn decode_block(&self, src: &[u8]) -> PixelBlock {
        BC3Block::read(src).decode()
    }

    fn prepare(&self, color: Color) -> Color {
        to_ycocg(color)
    }

    fn restore(&self, color: Color) -> Color {
        from_ycocg(color, true)
    }
}
