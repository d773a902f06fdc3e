// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fixed-width bit field packing.
//!
//! S3TC blocks store their per-pixel codes as runs of 2, 3 or 4 bit fields,
//! least-significant field first. These traits move those runs between plain
//! integer iterators and a [`BitSlice`] in [`Lsb0`] order.

use bitvec::field::BitField;
use bitvec::prelude::*;
use funty::{Fundamental, Integral};

pub trait Pack {
    /// Store each value of `unpacked` into consecutive `width`-bit fields
    fn pack_le<V: Integral, U: IntoIterator<Item = V>>(&mut self, width: usize, unpacked: U);
}

impl<T: BitStore> Pack for BitSlice<T, Lsb0>
where
    BitSlice<T, Lsb0>: BitField,
{
    fn pack_le<V: Integral, U: IntoIterator<Item = V>>(&mut self, width: usize, unpacked: U) {
        for (i, src) in unpacked.into_iter().enumerate() {
            debug_assert!(
                src.as_u64() < (1u64 << width),
                "Input value {:X} cannot be packed into {} bits",
                src,
                width
            );
            self[i * width..(i + 1) * width].store_le(src);
        }
    }
}

pub trait Unpack {
    /// Read consecutive `width`-bit fields as integers
    fn unpack_le<V: Integral>(&self, width: usize) -> Vec<V>;
}

impl<T: BitStore> Unpack for BitSlice<T, Lsb0>
where
    BitSlice<T, Lsb0>: BitField,
{
    fn unpack_le<V: Integral>(&self, width: usize) -> Vec<V> {
        self.chunks_exact(width).map(|b| b.load_le::<V>()).collect()
    }
}
