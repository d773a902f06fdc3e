// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bitvec::prelude::*;
use glam::Vec3A;

use crate::blocktexture::{Block, PixelBlock};
use crate::color::Color;
use crate::flags::{metric, CompressFlags};
use crate::format::BlockCodec;
use crate::pack::Unpack;

mod decode;
mod encode;
mod fit;
mod single;

pub(crate) use fit::select4;

/// A color block: two 5:6:5 endpoints and 16 2-bit palette codes.
///
/// The order of the endpoints selects the palette layout. When the first is
/// greater the block has four opaque colors, otherwise it has three colors
/// and a transparent black at code 3.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC1Block {
    pub endpoints: [u16; 2],
    /// Codes packed 2 bits per pixel, first pixel in the low bits
    pub indices: u32,
}

impl BC1Block {
    /// Encode a block of pixels.
    ///
    /// `metric` weights each color channel's error. If `punch_through` is set,
    /// pixels with alpha below 128 are encoded as transparent.
    pub fn encode(pixels: &PixelBlock, metric: Vec3A, punch_through: bool) -> Self {
        encode::encode_color_block(pixels, metric, punch_through)
    }

    /// Decode to RGBA, honoring three color mode and its transparent code
    pub fn decode(&self) -> PixelBlock {
        decode::decode_color_block(self, false)
    }

    /// Decode as the color half of a BC2 or BC3 block, which always uses
    /// four color mode. Alpha is left opaque.
    pub fn decode_four_color(&self) -> PixelBlock {
        decode::decode_color_block(self, true)
    }

    /// The decoded palette, as selected by the endpoint order
    pub fn palette(&self) -> [Color; 4] {
        decode::palette(self, false)
    }

    /// Whether the endpoint order selects three color mode
    pub fn is_three_color(&self) -> bool {
        self.endpoints[0] <= self.endpoints[1]
    }

    /// The 2-bit palette code of every pixel, in row-major order
    pub fn codes(&self) -> [u8; 16] {
        let mut codes = [0u8; 16];
        codes.copy_from_slice(&self.indices.view_bits::<Lsb0>().unpack_le::<u8>(2));
        codes
    }
}

impl Block for BC1Block {
    type Bytes = [u8; 8];
    const SIZE: usize = 8;

    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 8];
        let bits = bytes.view_bits_mut::<Lsb0>();

        // store endpoints
        bits[0..16].store_le(self.endpoints[0]);
        bits[16..32].store_le(self.endpoints[1]);

        // store codes
        bits[32..64].store_le(self.indices);

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let bits = bytes.view_bits::<Lsb0>();

        // load endpoints
        let color0: u16 = bits[0..16].load_le();
        let color1: u16 = bits[16..32].load_le();

        // load codes
        let indices: u32 = bits[32..64].load_le();

        Self {
            endpoints: [color0, color1],
            indices,
        }
    }
}

/// Color with optional 1-bit alpha
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bc1;

impl BlockCodec for Bc1 {
    fn block_size(&self) -> usize {
        BC1Block::SIZE
    }

    fn encode_block(&self, pixels: &PixelBlock, flags: CompressFlags, dst: &mut [u8]) {
        BC1Block::encode(pixels, metric(flags), true).write(dst);
    }

    fn decode_block(&self, src: &[u8]) -> PixelBlock {
        BC1Block::read(src).decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorImpl;
    use crate::flags::CompressFlag;

    const PERCEPTUAL: Vec3A = Vec3A::new(0.2126, 0.7152, 0.0722);

    /// Four evenly spaced colors, one per column
    fn gradient_block() -> PixelBlock {
        std::array::from_fn(|i| {
            let x = (i % 4) as u8;
            [x * 60 + 10, 200 - x * 50, x * 20 + 40, 255]
        })
    }

    fn noisy_block(seed: u32) -> PixelBlock {
        let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
        std::array::from_fn(|_| {
            let mut next = || {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            };
            [next(), next(), next(), 255]
        })
    }

    #[test]
    fn test_bytes_layout() {
        let block = BC1Block {
            endpoints: [0xF800, 0x001F],
            indices: 0xE4E4_E4E4,
        };
        let bytes = block.to_bytes();
        assert_eq!(bytes, [0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4]);
        assert_eq!(BC1Block::from_bytes(&bytes), block);
        assert_eq!(block.codes()[0..4], [0, 1, 2, 3], "first pixel in the low bits");
    }

    #[test]
    fn test_uniform_round_trip() {
        // colors whose channels are each reachable exactly at palette code 2
        let exact: [Color; 6] = [
            [0, 0, 0, 255],
            [255, 255, 255, 255],
            [128, 128, 128, 255],
            [255, 0, 128, 255],
            [8, 16, 24, 255],
            [0, 255, 10, 255],
        ];
        for color in exact {
            let block = BC1Block::encode(&[color; 16], PERCEPTUAL, true);
            assert_eq!(block.decode(), [color; 16], "uniform {color:?} did not round trip");
        }

        // everything else is at most one step off in each channel
        for v in (0..=255u8).step_by(3) {
            let color = [v, 255 - v, v / 2, 255];
            let decoded = BC1Block::encode(&[color; 16], PERCEPTUAL, true).decode();
            for pixel in decoded {
                for c in 0..3 {
                    assert!(pixel[c].abs_diff(color[c]) <= 1, "{color:?} decoded as {pixel:?}");
                }
                assert_eq!(pixel.a(), 255);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        for seed in 0..8 {
            let pixels = noisy_block(seed);
            let a = BC1Block::encode(&pixels, PERCEPTUAL, true).to_bytes();
            let b = BC1Block::encode(&pixels, PERCEPTUAL, true).to_bytes();
            assert_eq!(a, b, "encoding is not deterministic for seed {seed}");
        }
    }

    #[test]
    fn test_opaque_blocks_use_four_colors() {
        let mut blocks: Vec<PixelBlock> = (0..32).map(noisy_block).collect();
        blocks.push(gradient_block());
        blocks.push([[90, 60, 30, 255]; 16]);
        blocks.push([[0, 0, 0, 255]; 16]);

        for pixels in blocks {
            for punch_through in [false, true] {
                let block = BC1Block::encode(&pixels, Vec3A::ONE, punch_through);
                if block.is_three_color() {
                    assert_eq!(block.endpoints[0], block.endpoints[1]);
                    assert_eq!(block.indices, 0, "equal endpoints must only use code 0");
                }
                assert!(
                    block.decode().iter().all(|p| p.a() == 255),
                    "opaque block decoded with transparency: {block:?}"
                );
            }
        }
    }

    #[test]
    fn test_punch_through() {
        for seed in 0..16 {
            let mut pixels = noisy_block(seed);
            let transparent = [0usize, 5, 10, (seed as usize) % 16];
            for &i in &transparent {
                pixels[i][3] = 0;
            }

            let block = BC1Block::encode(&pixels, Vec3A::ONE, true);
            assert!(block.is_three_color(), "punch-through block in four color mode");

            let codes = block.codes();
            for (i, pixel) in block.decode().iter().enumerate() {
                let expect_transparent = transparent.contains(&i);
                assert_eq!(codes[i] == 3, expect_transparent, "pixel {i} has code {}", codes[i]);
                assert_eq!(pixel.a() == 0, expect_transparent, "pixel {i} alpha is {}", pixel.a());
            }
        }
    }

    #[test]
    fn test_punch_through_single_color() {
        let mut pixels = [[200u8, 100, 50, 255]; 16];
        pixels[3][3] = 10;
        let block = BC1Block::encode(&pixels, PERCEPTUAL, true);
        assert!(block.is_three_color());
        let codes = block.codes();
        assert_eq!(codes[3], 3);
        assert!(codes.iter().enumerate().all(|(i, &c)| i == 3 || c == 2));
    }

    #[test]
    fn test_gradient_quality() {
        let pixels = gradient_block();
        let decoded = BC1Block::encode(&pixels, Vec3A::ONE, false).decode();
        let error: u32 = pixels
            .iter()
            .zip(decoded.iter())
            .flat_map(|(a, b)| (0..3).map(move |c| a[c].abs_diff(b[c]) as u32))
            .sum();
        assert!(error / 48 < 8, "average channel error {} too high", error / 48);
    }

    #[test]
    fn test_codec_flags() {
        let codec = Bc1;
        let pixels = gradient_block();
        let mut perceptual = [0u8; 8];
        let mut uniform = [0u8; 8];
        codec.encode_block(&pixels, CompressFlag::Perceptual.into(), &mut perceptual);
        codec.encode_block(&pixels, CompressFlags::empty(), &mut uniform);
        assert_eq!(
            BC1Block::from_bytes(&perceptual),
            BC1Block::encode(&pixels, PERCEPTUAL, true)
        );
        assert_eq!(BC1Block::from_bytes(&uniform), BC1Block::encode(&pixels, Vec3A::ONE, true));
    }
}
