// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Display, Formatter};

use crate::error::{CodecError, CodecResult};
use crate::util::div_ceil;

/// Pixel dimensions of a single image surface
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> CodecResult<Self> {
        if width == 0 || height == 0 {
            return Err(CodecError::Dimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> usize {
        self.width
    }

    pub fn height(self) -> usize {
        self.height
    }

    pub fn pixels(self) -> usize {
        self.width * self.height
    }

    /// Number of 4x4 blocks across
    pub fn blocks_wide(self) -> usize {
        div_ceil(self.width, 4)
    }

    /// Number of 4x4 blocks down
    pub fn blocks_high(self) -> usize {
        div_ceil(self.height, 4)
    }

    pub fn blocks(self) -> usize {
        self.blocks_wide() * self.blocks_high()
    }

    /// The next smaller mip level, or `None` once the chain has reached 1x1
    pub fn next_mip(self) -> Option<Self> {
        if self.width <= 1 && self.height <= 1 {
            None
        } else {
            Some(Self {
                width: usize::max(self.width / 2, 1),
                height: usize::max(self.height / 2, 1),
            })
        }
    }

    /// Iterate over the full mip chain, starting with `self`
    pub fn mips(self) -> MipDimensionIterator {
        MipDimensionIterator {
            current: Some(self),
        }
    }

    /// Number of levels in a full mip chain down to 1x1
    pub fn mip_count(self) -> usize {
        let largest = usize::max(self.width, self.height);
        (usize::BITS - largest.leading_zeros()) as usize
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl TryFrom<[usize; 2]> for Dimensions {
    type Error = CodecError;

    fn try_from(value: [usize; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<Dimensions> for [usize; 2] {
    fn from(value: Dimensions) -> Self {
        [value.width, value.height]
    }
}

pub struct MipDimensionIterator {
    current: Option<Dimensions>,
}

impl Iterator for MipDimensionIterator {
    type Item = Dimensions;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        // after mips are all 1, the chain terminates
        self.current = current.next_mip();
        Some(current)
    }
}
