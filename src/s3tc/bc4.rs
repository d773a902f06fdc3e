// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bitvec::prelude::*;
use itertools::Itertools;

use crate::blocktexture::{channel, Block, PixelBlock};
use crate::flags::CompressFlags;
use crate::format::BlockCodec;
use crate::pack::{Pack, Unpack};

/// A single channel interpolated with 3-bit codes between two 8-bit endpoints.
/// Also used for the alpha half of BC3 and both halves of BC5.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC4Block {
    pub endpoints: [u8; 2],
    pub codes: [u8; 16],
}

impl BC4Block {
    /// Encode 16 channel values.
    ///
    /// Endpoints are always written as (max, min), so blocks with any spread
    /// use the 8-value ramp. Codes are picked with a fixed-point ladder that
    /// matches the reference DXT5 alpha encoder bit for bit.
    pub fn encode(values: &[u8; 16]) -> Self {
        let (mn, mx) = values.iter().copied().minmax().into_option().unwrap_or_default();

        let (mx_i, mn_i) = (mx as i32, mn as i32);
        let dist = mx_i - mn_i;
        let dist2 = dist * 2;
        let dist4 = dist * 4;
        let bias = if dist < 8 { dist - 1 } else { dist / 2 + 2 } - mn_i * 7;

        let codes = values.map(|v| {
            let mut a = v as i32 * 7 + bias;

            let mut t = if a >= dist4 { -1 } else { 0 };
            let mut idx = t & 4;
            a -= dist4 & t;

            t = if a >= dist2 { -1 } else { 0 };
            idx += t & 2;
            a -= dist2 & t;

            idx += (a >= dist) as i32;

            // linear index to DXT order: 0 and 1 are the endpoints
            idx = -idx & 7;
            idx ^= (2 > idx) as i32;
            idx as u8
        });

        Self {
            endpoints: [mx, mn],
            codes,
        }
    }

    /// The 8 values the codes select from
    pub fn palette(&self) -> [u8; 8] {
        let [a0, a1] = self.endpoints.map(|e| e as u32);
        let mut palette = [0u8; 8];
        palette[0] = a0 as u8;
        palette[1] = a1 as u8;

        if a0 > a1 {
            for code in 2..8u32 {
                palette[code as usize] = (((8 - code) * a0 + (code - 1) * a1) / 7) as u8;
            }
        } else {
            for code in 2..6u32 {
                palette[code as usize] = (((6 - code) * a0 + (code - 1) * a1) / 5) as u8;
            }
            palette[6] = 0;
            palette[7] = u8::MAX;
        }
        palette
    }

    pub fn decode(&self) -> [u8; 16] {
        let palette = self.palette();
        self.codes.map(|c| palette[c as usize])
    }
}

impl Block for BC4Block {
    type Bytes = [u8; 8];
    const SIZE: usize = 8;

    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 8];
        let bits = bytes.view_bits_mut::<Lsb0>();

        // store endpoints
        bits[0..8].store_le(self.endpoints[0]);
        bits[8..16].store_le(self.endpoints[1]);

        // store codes. Some of the 3-bit values cross byte boundaries,
        // but those bytes are stored little-endian so Lsb0 order lines up
        bits[16..].pack_le(3, self.codes);

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let bits = bytes.view_bits::<Lsb0>();

        // load endpoints
        let endpoint0: u8 = bits[0..8].load_le();
        let endpoint1: u8 = bits[8..16].load_le();

        // load codes
        let mut codes = [0u8; 16];
        codes.copy_from_slice(&bits[16..].unpack_le::<u8>(3));

        Self {
            endpoints: [endpoint0, endpoint1],
            codes,
        }
    }
}

/// Single channel format storing the red channel
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bc4;

impl BlockCodec for Bc4 {
    fn block_size(&self) -> usize {
        BC4Block::SIZE
    }

    fn encode_block(&self, pixels: &PixelBlock, _flags: CompressFlags, dst: &mut [u8]) {
        BC4Block::encode(&channel(pixels, 0)).write(dst);
    }

    fn decode_block(&self, src: &[u8]) -> PixelBlock {
        BC4Block::read(src).decode().map(|r| [r, 0, 0, u8::MAX])
    }
}
