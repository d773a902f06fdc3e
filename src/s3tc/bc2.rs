// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bitvec::prelude::*;

use crate::blocktexture::{channel, Block, PixelBlock};
use crate::color::mul8bit;
use crate::flags::{metric, CompressFlags};
use crate::format::BlockCodec;
use crate::pack::{Pack, Unpack};
use crate::s3tc::bc1::BC1Block;

/// Explicit alpha: 16 4-bit values
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC2AlphaBlock {
    pub values: [u8; 16],
}

impl BC2AlphaBlock {
    pub fn encode(alpha: &[u8; 16]) -> Self {
        Self {
            values: alpha.map(|a| mul8bit(a, 15)),
        }
    }

    pub fn decode(&self) -> [u8; 16] {
        self.values.map(|v| v * 17)
    }
}

impl Block for BC2AlphaBlock {
    type Bytes = [u8; 8];
    const SIZE: usize = 8;

    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 8];
        bytes.view_bits_mut::<Lsb0>().pack_le(4, self.values);
        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let mut values = [0u8; 16];
        values.copy_from_slice(&bytes.view_bits::<Lsb0>().unpack_le::<u8>(4));
        Self { values }
    }
}

/// A BC2 block: explicit alpha followed by a four color BC1 block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC2Block(pub BC2AlphaBlock, pub BC1Block);

impl BC2Block {
    pub fn encode(pixels: &PixelBlock, flags: CompressFlags) -> Self {
        Self(
            BC2AlphaBlock::encode(&channel(pixels, 3)),
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

impl Block for BC2Block {
    type Bytes = [u8; 16];
    const SIZE: usize = 16;

    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 16];
        self.0.write(&mut bytes[0..8]); // explicit alpha
        self.1.write(&mut bytes[8..16]); // BC1 RGB

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        Self(
            BC2AlphaBlock::read(&bytes[0..8]), // explicit alpha
            BC1Block::read(&bytes[8..16]), // BC1 RGB
        )
    }
}

/// Color with 4-bit explicit alpha
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bc2;

impl BlockCodec for Bc2 {
    fn block_size(&self) -> usize {
        BC2Block::SIZE
    }

    fn encode_block(&self, pixels: &PixelBlock, flags: CompressFlags, dst: &mut [u8]) {
        BC2Block::encode(pixels, flags).write(dst);
    }

    fn decode_block(&self, src: &[u8]) -> PixelBlock {
        BC2Block::read(src).decode()
    }
}
