// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::blocktexture::PixelBlock;
use crate::color::{Color, ColorImpl};
use crate::s3tc::bc1::BC1Block;

fn lerp13(a: u8, b: u8) -> u8 {
    ((2 * a as u32 + b as u32) / 3) as u8
}

fn lerp12(a: u8, b: u8) -> u8 {
    ((a as u32 + b as u32 + 1) >> 1) as u8
}

/// Build the 4 entry palette for a color block.
///
/// Blocks whose first endpoint is not greater than the second use three color
/// mode, where index 3 is transparent black, unless `four_color_only` is set.
pub(super) fn palette(block: &BC1Block, four_color_only: bool) -> [Color; 4] {
    let [c0, c1] = block.endpoints;
    let color0 = Color::from_565(c0);
    let color1 = Color::from_565(c1);

    let mut colors = [color0, color1, color0, color1];
    if c0 > c1 || four_color_only {
        for c in 0..3 {
            colors[2][c] = lerp13(color0[c], color1[c]);
            colors[3][c] = lerp13(color1[c], color0[c]);
        }
    } else {
        for c in 0..3 {
            colors[2][c] = lerp12(color0[c], color1[c]);
        }
        colors[3] = [0, 0, 0, 0];
    }
    colors
}

pub(super) fn decode_color_block(block: &BC1Block, four_color_only: bool) -> PixelBlock {
    let colors = palette(block, four_color_only);
    block.codes().map(|code| colors[code as usize])
}
