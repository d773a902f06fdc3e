// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Encoder and decoder for the S3TC family of block compressed texture
//! formats (BC1 through BC5), plus the swizzled and YCoCg DXT5 variants.

pub mod blocktexture;
pub mod color;
pub mod dimensions;
pub mod error;
pub mod flags;
pub mod format;
mod pack;
pub mod s3tc;
pub mod texture;
mod util;

pub use dimensions::Dimensions;
pub use error::{CodecError, CodecResult};
pub use flags::{CompressFlag, CompressFlags};
pub use format::{BlockCodec, Format, NormalLayout};
pub use texture::{compress, compressed_size, decompress, mipmapped_size, pixel_size};
