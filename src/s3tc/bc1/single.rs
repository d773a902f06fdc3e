// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Optimal endpoints for blocks made of a single color.
//!
//! For every 8-bit channel value the tables hold the `[max, min]` pair of
//! quantized endpoints whose 2:1 blend `(2 * max + min) / 3` lands closest to
//! it, after expanding both to 8 bits the way a decoder does. Ties keep the
//! first pair found scanning `min` then `max` upward.

use crate::color::Color;

/// Packed `(max, min)` 5:6:5 endpoints reproducing `color` at palette index 2
pub(super) fn single_color_endpoints(color: &Color) -> (u16, u16) {
    let [r, g, b, _] = color.map(|c| c as usize);
    let max = (OMATCH5[r][0] as u16) << 11 | (OMATCH6[g][0] as u16) << 5 | OMATCH5[b][0] as u16;
    let min = (OMATCH5[r][1] as u16) << 11 | (OMATCH6[g][1] as u16) << 5 | OMATCH5[b][1] as u16;
    (max, min)
}

pub(super) static OMATCH5: [[u8; 2]; 256] = [
    [0, 0], [0, 0], [0, 1], [0, 1], [1, 0], [1, 0], [1, 0], [1, 1],
    [1, 1], [2, 0], [2, 0], [0, 4], [2, 1], [2, 1], [2, 1], [3, 0],
    [3, 0], [3, 0], [3, 1], [1, 5], [3, 2], [3, 2], [4, 0], [4, 0],
    [4, 1], [4, 1], [5, 0], [5, 0], [5, 0], [3, 5], [5, 1], [6, 0],
    [6, 0], [4, 4], [6, 1], [6, 1], [6, 1], [7, 0], [7, 0], [7, 0],
    [7, 1], [5, 5], [7, 2], [7, 2], [8, 0], [8, 0], [8, 1], [8, 1],
    [9, 0], [9, 0], [9, 0], [7, 5], [9, 1], [10, 0], [10, 0], [8, 4],
    [10, 1], [10, 1], [10, 1], [11, 0], [11, 0], [11, 0], [11, 1], [9, 5],
    [11, 2], [11, 2], [12, 0], [12, 0], [12, 1], [12, 1], [13, 0], [13, 0],
    [13, 0], [11, 5], [13, 1], [14, 0], [14, 0], [12, 4], [14, 1], [14, 1],
    [14, 1], [15, 0], [15, 0], [15, 0], [15, 1], [13, 5], [15, 2], [15, 2],
    [16, 0], [16, 0], [16, 1], [16, 1], [17, 0], [17, 0], [17, 0], [15, 5],
    [17, 1], [18, 0], [18, 0], [16, 4], [18, 1], [18, 1], [18, 1], [19, 0],
    [19, 0], [19, 0], [19, 1], [17, 5], [19, 2], [19, 2], [20, 0], [20, 0],
    [20, 1], [20, 1], [21, 0], [21, 0], [21, 0], [19, 5], [21, 1], [22, 0],
    [22, 0], [20, 4], [22, 1], [22, 1], [22, 1], [23, 0], [23, 0], [23, 0],
    [23, 1], [21, 5], [23, 2], [23, 2], [24, 0], [24, 0], [24, 1], [24, 1],
    [25, 0], [25, 0], [25, 0], [23, 5], [25, 1], [26, 0], [26, 0], [24, 4],
    [26, 1], [26, 1], [26, 1], [27, 0], [27, 0], [27, 0], [27, 1], [25, 5],
    [27, 2], [27, 2], [28, 0], [28, 0], [28, 1], [28, 1], [29, 0], [29, 0],
    [29, 0], [27, 5], [29, 1], [30, 0], [30, 0], [28, 4], [30, 1], [30, 1],
    [30, 1], [31, 0], [31, 0], [31, 0], [31, 1], [29, 5], [31, 2], [31, 2],
    [28, 8], [31, 3], [31, 3], [31, 3], [31, 4], [31, 4], [31, 4], [31, 5],
    [29, 9], [31, 6], [31, 6], [28, 12], [31, 7], [31, 7], [31, 7], [31, 8],
    [31, 8], [31, 8], [31, 9], [29, 13], [31, 10], [31, 10], [28, 16], [31, 11],
    [31, 11], [31, 11], [31, 12], [31, 12], [31, 12], [31, 13], [29, 17], [31, 14],
    [31, 14], [28, 20], [31, 15], [31, 15], [31, 15], [31, 16], [31, 16], [31, 16],
    [31, 17], [29, 21], [31, 18], [31, 18], [28, 24], [31, 19], [31, 19], [31, 19],
    [31, 20], [31, 20], [31, 20], [31, 21], [29, 25], [31, 22], [31, 22], [28, 28],
    [31, 23], [31, 23], [31, 23], [31, 24], [31, 24], [31, 24], [31, 25], [29, 29],
    [31, 26], [31, 26], [31, 26], [31, 27], [31, 27], [31, 27], [31, 28], [31, 28],
    [31, 28], [31, 29], [31, 29], [31, 30], [31, 30], [31, 30], [31, 31], [31, 31],
];

pub(super) static OMATCH6: [[u8; 2]; 256] = [
    [0, 0], [0, 1], [1, 0], [1, 0], [1, 1], [2, 0], [2, 1], [3, 0],
    [3, 0], [3, 1], [4, 0], [4, 0], [4, 1], [5, 0], [5, 1], [6, 0],
    [6, 0], [6, 1], [7, 0], [7, 0], [7, 1], [8, 0], [8, 1], [0, 17],
    [9, 0], [9, 1], [10, 0], [2, 16], [10, 1], [11, 0], [11, 1], [3, 17],
    [12, 0], [12, 1], [13, 0], [5, 16], [13, 1], [14, 0], [14, 1], [6, 17],
    [15, 0], [15, 1], [15, 2], [16, 0], [16, 1], [15, 4], [17, 0], [17, 1],
    [18, 0], [15, 7], [18, 1], [19, 0], [19, 1], [15, 10], [20, 0], [20, 1],
    [21, 0], [15, 13], [21, 1], [22, 0], [22, 1], [15, 16], [23, 0], [23, 1],
    [24, 0], [16, 16], [24, 1], [25, 0], [25, 1], [17, 17], [26, 0], [26, 1],
    [27, 0], [19, 16], [27, 1], [28, 0], [28, 1], [20, 17], [29, 0], [29, 1],
    [30, 0], [22, 16], [30, 1], [31, 0], [31, 1], [23, 17], [32, 0], [31, 3],
    [32, 1], [33, 0], [33, 1], [31, 6], [34, 0], [34, 1], [35, 0], [31, 9],
    [35, 1], [36, 0], [36, 1], [31, 12], [37, 0], [37, 1], [38, 0], [31, 15],
    [38, 1], [39, 0], [39, 1], [31, 18], [40, 0], [40, 1], [41, 0], [33, 16],
    [41, 1], [42, 0], [42, 1], [34, 17], [43, 0], [43, 1], [44, 0], [36, 16],
    [44, 1], [45, 0], [45, 1], [37, 17], [46, 0], [46, 1], [47, 0], [39, 16],
    [47, 1], [47, 2], [48, 0], [48, 1], [49, 0], [47, 5], [49, 1], [50, 0],
    [50, 1], [47, 8], [51, 0], [51, 1], [52, 0], [47, 11], [52, 1], [53, 0],
    [53, 1], [47, 14], [54, 0], [54, 1], [55, 0], [47, 17], [55, 1], [56, 0],
    [56, 1], [48, 17], [57, 0], [57, 1], [58, 0], [50, 16], [58, 1], [59, 0],
    [59, 1], [51, 17], [60, 0], [60, 1], [61, 0], [53, 16], [61, 1], [62, 0],
    [62, 1], [54, 17], [63, 0], [63, 1], [63, 2], [56, 16], [63, 3], [63, 4],
    [63, 5], [57, 17], [63, 6], [63, 7], [63, 8], [59, 16], [63, 9], [63, 10],
    [63, 11], [60, 17], [63, 12], [63, 13], [63, 14], [62, 16], [63, 15], [63, 16],
    [55, 32], [63, 17], [63, 18], [63, 19], [56, 33], [63, 20], [63, 21], [63, 22],
    [58, 32], [63, 23], [63, 24], [63, 25], [59, 33], [63, 26], [63, 27], [63, 28],
    [61, 32], [63, 29], [63, 30], [63, 31], [62, 33], [63, 32], [63, 33], [55, 49],
    [63, 34], [63, 35], [63, 36], [57, 48], [63, 37], [63, 38], [63, 39], [58, 49],
    [63, 40], [63, 41], [63, 42], [60, 48], [63, 43], [63, 44], [63, 45], [61, 49],
    [63, 46], [63, 47], [63, 47], [63, 48], [63, 49], [63, 50], [63, 50], [63, 51],
    [63, 52], [63, 53], [63, 53], [63, 54], [63, 55], [63, 56], [63, 56], [63, 57],
    [63, 58], [63, 59], [63, 59], [63, 60], [63, 61], [63, 62], [63, 62], [63, 63],
];
