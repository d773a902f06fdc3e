// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use enum_dispatch::enum_dispatch;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::blocktexture::PixelBlock;
use crate::color::{normal_z, Color, ColorImpl};
use crate::flags::CompressFlags;
use crate::s3tc::bc1::Bc1;
use crate::s3tc::bc2::Bc2;
use crate::s3tc::bc3::{AlphaExponent, Bc3, Bc3Normal, Rxgb};
use crate::s3tc::bc4::Bc4;
use crate::s3tc::bc5::Bc5;
use crate::s3tc::ycocg::{YCoCg, YCoCgScaled};

/// Where a two-channel normal map keeps its X and Y components
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NormalLayout {
    /// X in alpha, Y in green
    AlphaGreen,
    /// X in red, Y in green
    RedGreen,
}

impl NormalLayout {
    /// Rebuild a full (X, Y, Z) normal in the color channels, with opaque alpha
    pub fn reconstruct(self, color: Color) -> Color {
        let (x, y) = match self {
            NormalLayout::AlphaGreen => (color.a(), color.g()),
            NormalLayout::RedGreen => (color.r(), color.g()),
        };
        [x, y, normal_z(x, y), u8::MAX]
    }
}

/// Encoding and decoding of a single 4x4 block in one format.
///
/// Pixels are always RGBA. Formats that store something other than plain
/// color transform each pixel with [`BlockCodec::prepare`] before the block
/// is encoded and with [`BlockCodec::restore`] after it is decoded.
#[enum_dispatch]
pub trait BlockCodec: Sync {
    /// Size of one encoded block in bytes
    fn block_size(&self) -> usize;

    /// Encode `pixels` into the first [`Self::block_size`] bytes of `dst`
    fn encode_block(&self, pixels: &PixelBlock, flags: CompressFlags, dst: &mut [u8]);

    /// Decode the block in the first [`Self::block_size`] bytes of `src`
    fn decode_block(&self, src: &[u8]) -> PixelBlock;

    fn prepare(&self, color: Color) -> Color {
        color
    }

    fn restore(&self, color: Color) -> Color {
        color
    }

    /// The channels holding X and Y, for formats that can store a normal map
    fn normal_layout(&self) -> Option<NormalLayout> {
        None
    }
}

/// Every supported block compression format
#[enum_dispatch(BlockCodec)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Format {
    /// DXT1: color with 1-bit alpha
    #[strum(to_string = "bc1", serialize = "dxt1")]
    Bc1,
    /// DXT3: color with explicit 4-bit alpha
    #[strum(to_string = "bc2", serialize = "dxt3")]
    Bc2,
    /// DXT5: color with interpolated alpha
    #[strum(to_string = "bc3", serialize = "dxt5")]
    Bc3,
    /// DXT5 normal map with X swizzled into alpha
    #[strum(to_string = "bc3n", serialize = "ati2-dxt5")]
    Bc3Normal,
    /// DXT5 with red and alpha swapped
    #[strum(to_string = "rxgb")]
    Rxgb,
    /// ATI1: a single channel
    #[strum(to_string = "bc4", serialize = "ati1")]
    Bc4,
    /// ATI2: two channels
    #[strum(to_string = "bc5", serialize = "ati2")]
    Bc5,
    /// DXT5 holding luma in alpha and chroma in red and green
    #[strum(to_string = "ycocg")]
    YCoCg,
    /// [`Format::YCoCg`] with a per-block chroma scale in blue
    #[strum(to_string = "ycocg-scaled")]
    YCoCgScaled,
    /// DXT5 holding a shared exponent in alpha
    #[strum(to_string = "aexp")]
    AlphaExponent,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_block_sizes() {
        for format in Format::iter() {
            let expected = match format {
                Format::Bc1(_) | Format::Bc4(_) => 8,
                _ => 16,
            };
            assert_eq!(format.block_size(), expected, "wrong block size for {format}");
        }
    }

    #[test]
    fn test_names() -> Result<(), strum::ParseError> {
        assert_eq!(Format::from_str("bc1")?, Format::from(Bc1));
        assert_eq!(Format::from_str("DXT5")?, Format::from(Bc3));
        assert_eq!(Format::from_str("ycocg-scaled")?, Format::from(YCoCgScaled));
        assert!(Format::from_str("bc7").is_err());

        for format in Format::iter() {
            let name: &'static str = format.into();
            assert_eq!(Format::from_str(name)?, format, "{name} does not parse back");
            assert_eq!(format.to_string(), name);
        }
        Ok(())
    }

    #[test]
    fn test_normal_reconstruct() {
        let flat = NormalLayout::AlphaGreen.reconstruct([255, 128, 0, 128]);
        assert_eq!(flat, [128, 128, 254, 255]);
        let tilted = NormalLayout::RedGreen.reconstruct([255, 128, 9, 9]);
        assert_eq!(tilted, [255, 128, 127, 255]);
    }
}
