// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::blocktexture::{channel, Block, PixelBlock};
use crate::color::{mul8bit, Color};
use crate::flags::{metric, CompressFlags};
use crate::format::{BlockCodec, NormalLayout};
use crate::s3tc::bc1::BC1Block;
use crate::s3tc::bc4::BC4Block;

/// A BC3 block: BC4-style interpolated alpha followed by a four color BC1 block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC3Block(pub BC4Block, pub BC1Block);

impl BC3Block {
    pub fn encode(pixels: &PixelBlock, flags: CompressFlags) -> Self {
        Self(
            BC4Block::encode(&channel(pixels, 3)),
            BC1Block::encode(pixels, metric(flags), false),
        )
    }

    pub fn decode(&self) -> PixelBlock {
        let mut pixels = self.1.decode_four_color();
        for (pixel, alpha) in pixels.iter_mut().zip(self.0.decode()) {
            pixel[3] = alpha;
        }
        pixels
    }
}

impl Block for BC3Block {
    type Bytes = [u8; 16];
    const SIZE: usize = 16;

    //noinspection DuplicatedCode
    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 16];
        self.0.write(&mut bytes[0..8]); // BC4 Alpha
        self.1.write(&mut bytes[8..16]); // BC1 RGB

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        Self(
            BC4Block::read(&bytes[0..8]),  // BC4 Alpha
            BC1Block::read(&bytes[8..16]), // BC1 RGB
        )
    }
}

/// Color with interpolated alpha
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bc3;

impl BlockCodec for Bc3 {
    fn block_size(&self) -> usize {
        BC3Block::SIZE
    }

    fn encode_block(&self, pixels: &PixelBlock, flags: CompressFlags, dst: &mut [u8]) {
        BC3Block::encode(pixels, flags).write(dst);
    }

    fn decode_block(&self, src: &[u8]) -> PixelBlock {
        BC3Block::read(src).decode()
    }

    fn normal_layout(&self) -> Option<NormalLayout> {
        Some(NormalLayout::AlphaGreen)
    }
}

/// Normal map with X moved into the higher quality alpha channel and
/// red fixed at full intensity
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bc3Normal;

impl BlockCodec for Bc3Normal {
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
        [u8::MAX, color[1], color[2], color[0]]
    }

    fn restore(&self, color: Color) -> Color {
        [color[3], color[1], color[2], u8::MAX]
    }

    fn normal_layout(&self) -> Option<NormalLayout> {
        Some(NormalLayout::AlphaGreen)
    }
}

/// Red and alpha swapped, so the channel with the most detail gets the
/// alpha block's precision
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rxgb;

impl BlockCodec for Rxgb {
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
        [color[3], color[1], color[2], color[0]]
    }

    fn restore(&self, color: Color) -> Color {
        [color[3], color[1], color[2], color[0]]
    }
}

/// Color normalized to its brightest channel, with that channel's
/// intensity stored in alpha. Source alpha is discarded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AlphaExponent;

fn unorm8(v: f32) -> u8 {
    (255.0 * v + 0.5).floor().clamp(0.0, 255.0) as u8
}

impl BlockCodec for AlphaExponent {
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
        let [r, g, b, _] = color.map(|c| c as f32 / 255.0);
        let exponent = r.max(g).max(b);
        if exponent < 1e-4 {
            return [color[0], color[1], color[2], u8::MAX];
        }

        [
            unorm8(r / exponent),
            unorm8(g / exponent),
            unorm8(b / exponent),
            unorm8(exponent),
        ]
    }

    fn restore(&self, color: Color) -> Color {
        let a = color[3];
        [mul8bit(color[0], a), mul8bit(color[1], a), mul8bit(color[2], a), u8::MAX]
    }
}
