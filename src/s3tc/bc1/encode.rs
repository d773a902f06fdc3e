// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use glam::Vec3A;

use crate::blocktexture::PixelBlock;
use crate::s3tc::bc1::fit::{to_565, ColorFit, PaletteMode};
use crate::s3tc::bc1::single::single_color_endpoints;
use crate::s3tc::bc1::BC1Block;

/// Every index selecting palette entry 2
const HALF_INDICES: u32 = 0xAAAA_AAAA;
/// XOR mask swapping codes 0<->1 and 2<->3
const FLIP_INDICES: u32 = 0x5555_5555;

/// Encode a color block.
///
/// With `punch_through` set, pixels with alpha below 128 are encoded as
/// transparent and any block containing one uses three color mode. Otherwise
/// the block is always in four color mode.
pub(super) fn encode_color_block(pixels: &PixelBlock, metric: Vec3A, punch_through: bool) -> BC1Block {
    let mut fit = ColorFit::new(pixels, metric, punch_through);
    let transparent = fit.alphamask != 0;

    let mut max16: u16;
    let mut min16: u16;
    let mut indices: u32;

    if fit.single {
        (max16, min16) = single_color_endpoints(&pixels[0]);
        indices = HALF_INDICES;

        if transparent {
            indices |= fit.alphamask;
            if max16 > min16 {
                std::mem::swap(&mut max16, &mut min16);
            }
        } else if max16 < min16 {
            std::mem::swap(&mut max16, &mut min16);
            indices ^= FLIP_INDICES;
        }
    } else if transparent {
        indices = fit.compress(PaletteMode::ThreeColor);
        (max16, min16) = (to_565(fit.max), to_565(fit.min));

        if max16 > min16 {
            std::mem::swap(&mut max16, &mut min16);
            // swap codes 0 and 1, leaving 2 and 3 alone
            let mut mask = indices & HALF_INDICES;
            mask |= mask >> 1;
            indices = (indices & mask) | ((indices ^ FLIP_INDICES) & !mask);
        }
    } else {
        indices = fit.compress(PaletteMode::FourColor);
        (max16, min16) = (to_565(fit.max), to_565(fit.min));

        if max16 < min16 {
            std::mem::swap(&mut max16, &mut min16);
            indices ^= FLIP_INDICES;
        }
    }

    // equal endpoints would read back in three color mode
    if !transparent && max16 == min16 {
        indices = 0;
    }

    BC1Block {
        endpoints: [max16, min16],
        indices,
    }
}
