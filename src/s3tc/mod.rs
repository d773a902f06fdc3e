// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! S3TC block formats. Each module holds the packed block type and the
//! [`BlockCodec`](crate::format::BlockCodec) implementations built on it.

pub mod bc1;
pub mod bc2;
pub mod bc3;
pub mod bc4;
pub mod bc5;
pub mod ycocg;
