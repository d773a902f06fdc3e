// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::blocktexture::{channel, Block, PixelBlock};
use crate::flags::CompressFlags;
use crate::format::{BlockCodec, NormalLayout};
use crate::s3tc::bc4::BC4Block;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC5Block(pub BC4Block, pub BC4Block);

impl BC5Block {
    pub fn encode(pixels: &PixelBlock) -> Self {
        Self(
            BC4Block::encode(&channel(pixels, 0)),
            BC4Block::encode(&channel(pixels, 1)),
        )
    }

    /// Decode to (X, Y, 0, 255)
    pub fn decode(&self) -> PixelBlock {
        let x = self.0.decode();
        let y = self.1.decode();
        std::array::from_fn(|i| [x[i], y[i], 0, u8::MAX])
    }
}

impl Block for BC5Block {
    type Bytes = [u8; 16];
    const SIZE: usize = 16;

    //noinspection DuplicatedCode
    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 16];
        self.0.write(&mut bytes[0..8]); // BC4 channel 0
        self.1.write(&mut bytes[8..16]); // BC4 channel 1

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        Self(
            BC4Block::read(&bytes[0..8]),  // BC4 channel 0
            BC4Block::read(&bytes[8..16]), // BC4 channel 1
        )
    }
}

/// Two channel format storing red and green, typically a normal map
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bc5;

impl BlockCodec for Bc5 {
    fn block_size(&self) -> usize {
        BC5Block::SIZE
    }

    fn encode_block(&self, pixels: &PixelBlock, _flags: CompressFlags, dst: &mut [u8]) {
        BC5Block::encode(pixels).write(dst);
    }

    fn decode_block(&self, src: &[u8]) -> PixelBlock {
        BC5Block::read(src).decode()
    }

    fn normal_layout(&self) -> Option<NormalLayout> {
        Some(NormalLayout::RedGreen)
    }
}
