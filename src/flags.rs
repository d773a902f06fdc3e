// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use enumflags2::{bitflags, BitFlags};
use glam::Vec3A;

/// Options that change how color blocks are fit
#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompressFlag {
    /// Weight color error by perceived luminance instead of treating channels equally
    Perceptual = 0b0001,
}

pub type CompressFlags = BitFlags<CompressFlag>;

/// Rec. 709 luma coefficients, applied to R, G and B
const PERCEPTUAL_METRIC: Vec3A = Vec3A::new(0.2126, 0.7152, 0.0722);
const UNIFORM_METRIC: Vec3A = Vec3A::ONE;

/// The per-channel error weights used by the color fitter
pub fn metric(flags: CompressFlags) -> Vec3A {
    if flags.contains(CompressFlag::Perceptual) {
        PERCEPTUAL_METRIC
    } else {
        UNIFORM_METRIC
    }
}
