// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid image dimensions {width}x{height}")]
    #[diagnostic(
        code(blocktex::dimensions),
        help("Width and height must both be at least 1")
    )]
    Dimensions { width: usize, height: usize },

    #[error("Unsupported channel count: {0}")]
    #[diagnostic(code(blocktex::channels), help("Pixels must have 1, 2, 3 or 4 channels"))]
    Channels(usize),

    #[error("Cannot encode {requested} mip levels, image supports at most {max}")]
    #[diagnostic(code(blocktex::mip_levels))]
    MipLevels { requested: usize, max: usize },

    #[error("Source buffer too small: expected {expected} bytes, got {actual}")]
    #[diagnostic(code(blocktex::source_size))]
    SourceSize { expected: usize, actual: usize },

    #[error("Destination buffer too small: expected {expected} bytes, got {actual}")]
    #[diagnostic(code(blocktex::destination_size))]
    DestinationSize { expected: usize, actual: usize },
}

pub type CodecResult<T = ()> = Result<T, CodecError>;
