// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::color::Color;

/// The 16 pixels of a 4x4 block in row-major order
pub type PixelBlock = [Color; 16];

/// A fixed-size packed block of texture data
pub trait Block: Sized {
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;
    // = [u8; 8], etc. Many thanks to @kornel@mastodon.social
    const SIZE: usize;
    const WIDTH: usize = 4;
    const HEIGHT: usize = 4;

    fn to_bytes(&self) -> Self::Bytes;
    fn from_bytes(bytes: &Self::Bytes) -> Self;

    /// Read a block from the front of `bytes`.
    ///
    /// Panics if `bytes` is shorter than [`Self::SIZE`]
    fn read(bytes: &[u8]) -> Self {
        let mut buf = Self::Bytes::default();
        buf.as_mut().copy_from_slice(&bytes[..Self::SIZE]);
        Self::from_bytes(&buf)
    }

    /// Write this block to the front of `bytes`.
    ///
    /// Panics if `bytes` is shorter than [`Self::SIZE`]
    fn write(&self, bytes: &mut [u8]) {
        bytes[..Self::SIZE].copy_from_slice(self.to_bytes().as_ref());
    }
}

/// Read the 4x4 block with its top-left corner at (`x`, `y`) from an RGBA image.
///
/// Where the block hangs off the right or bottom edge of the image, the last
/// valid column or row is repeated in its place.
pub fn extract_block(src: &[u8], x: usize, y: usize, width: usize, height: usize) -> PixelBlock {
    let block_width = usize::min(width - x, 4);
    let block_height = usize::min(height - y, 4);

    let mut block = [Color::default(); 16];
    for (i, pixel) in block.iter_mut().enumerate() {
        let px = x + usize::min(i % 4, block_width - 1);
        let py = y + usize::min(i / 4, block_height - 1);
        let offset = (py * width + px) * 4;
        pixel.copy_from_slice(&src[offset..offset + 4]);
    }
    block
}

/// Gather one channel of every pixel in a block
pub fn channel(block: &PixelBlock, index: usize) -> [u8; 16] {
    block.map(|p| p[index])
}

/// Write the in-bounds part of a decoded block at (`x`, `y`) into a
/// `channels`-interleaved image, keeping the first `channels` channels of each pixel
pub fn put_block(
    dst: &mut [u8],
    block: &PixelBlock,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    channels: usize,
) {
    let block_width = usize::min(width - x, 4);
    let block_height = usize::min(height - y, 4);

    for row in 0..block_height {
        for col in 0..block_width {
            let offset = ((y + row) * width + x + col) * channels;
            dst[offset..offset + channels].copy_from_slice(&block[row * 4 + col][..channels]);
        }
    }
}
