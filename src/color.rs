// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bitvec::prelude::*;

pub type Channel = u8;

/// An 8-bit RGBA pixel sample. Channels 0-2 are color, channel 3 is alpha.
pub type Color = [Channel; 4];

pub const OPAQUE_BLACK: Color = [0, 0, 0, u8::MAX];

pub trait ColorImpl {
    fn r(&self) -> Channel;
    fn g(&self) -> Channel;
    fn b(&self) -> Channel;
    fn a(&self) -> Channel;

    /// Unpack a 5:6:5 color, replicating high bits into the low bits so that
    /// the extremes map to 0 and 255
    fn from_565(packed: u16) -> Self;

    /// Quantize to 5:6:5 with rounding. Alpha is discarded.
    fn to_565(&self) -> u16;

    /// Whether the color channels match, ignoring alpha
    fn same_rgb(&self, other: &Self) -> bool;
}

impl ColorImpl for Color {
    fn r(&self) -> Channel {
        self[0]
    }

    fn g(&self) -> Channel {
        self[1]
    }

    fn b(&self) -> Channel {
        self[2]
    }

    fn a(&self) -> Channel {
        self[3]
    }

    fn from_565(packed: u16) -> Self {
        let bits = packed.view_bits::<Lsb0>();
        let r: Channel = bits[11..16].load_le();
        let g: Channel = bits[5..11].load_le();
        let b: Channel = bits[0..5].load_le();

        [expand5(r), expand6(g), expand5(b), u8::MAX]
    }

    fn to_565(&self) -> u16 {
        let mut packed = 0u16;
        let bits = packed.view_bits_mut::<Lsb0>();
        bits[11..16].store_le(mul8bit(self.r(), 31));
        bits[5..11].store_le(mul8bit(self.g(), 63));
        bits[0..5].store_le(mul8bit(self.b(), 31));

        packed
    }

    fn same_rgb(&self, other: &Self) -> bool {
        self[0..3] == other[0..3]
    }
}

pub const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

pub const fn expand6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Compute `a * b / 255` rounded to nearest, without a division
pub const fn mul8bit(a: u8, b: u8) -> u8 {
    let t = a as u32 * b as u32 + 128;
    ((t + (t >> 8)) >> 8) as u8
}

/// Rebuild the Z component of a unit normal from its X and Y components,
/// each stored as an unsigned byte mapping [0, 255] to [-1, 1]
pub fn normal_z(x: u8, y: u8) -> u8 {
    let nx = 2.0 * (x as f32 / 255.0) - 1.0;
    let ny = 2.0 * (y as f32 / 255.0) - 1.0;
    let nz = (1.0 - nx * nx - ny * ny).max(0.0).sqrt();

    (255.0 * (nz + 1.0) / 2.0).clamp(0.0, 255.0) as u8
}
