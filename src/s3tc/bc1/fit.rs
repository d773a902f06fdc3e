// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Endpoint fitting for BC1 color blocks.
//!
//! Endpoints start at an inset bounding box of the block's colors, with the
//! box diagonal chosen by the sign of each channel's covariance against blue.
//! They are then refined by alternating between matching every pixel to its
//! nearest palette entry and solving the least-squares problem for the pair of
//! endpoints that best reproduces that assignment ("cluster fit").

use glam::Vec3A;

use crate::blocktexture::PixelBlock;
use crate::color::ColorImpl;

/// Maximum number of refinement passes in [`ColorFit::compress`]
pub(super) const MAX_ITERATIONS: usize = 8;

const GRID: Vec3A = Vec3A::new(31.0, 63.0, 31.0);
const GRID_RCP: Vec3A = Vec3A::new(1.0 / 31.0, 1.0 / 63.0, 1.0 / 31.0);
const HALF: Vec3A = Vec3A::splat(0.5);
const EPSILON: f32 = 1e-4;

/// Snap a color in [0, 1] to the nearest 5:6:5 representable color
fn quantize(v: Vec3A) -> Vec3A {
    (GRID * v + HALF).trunc() * GRID_RCP
}

/// Pack a quantized endpoint into a 5:6:5 integer
pub(super) fn to_565(v: Vec3A) -> u16 {
    let c = (v * GRID + HALF).clamp(Vec3A::ZERO, GRID).to_array();
    (c[0] as u16) << 11 | (c[1] as u16) << 5 | c[2] as u16
}

/// Which palette layout the fit is solving for
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum PaletteMode {
    /// Two endpoints and two interpolants at 1/3 and 2/3
    FourColor,
    /// Two endpoints, their midpoint, and a transparent entry at index 3
    ThreeColor,
}

impl PaletteMode {
    /// Interpolation weight of the min endpoint for a 2-bit code
    fn beta(self, code: u32) -> f32 {
        let beta = (code & 1) as f32;
        if code & 2 == 0 {
            beta
        } else {
            match self {
                PaletteMode::FourColor => (1.0 + beta) / 3.0,
                PaletteMode::ThreeColor => 0.5,
            }
        }
    }
}

pub(super) struct ColorFit {
    points: [Vec3A; 16],
    metric: Vec3A,
    /// Two set bits for every pixel transparent enough to use index 3
    pub alphamask: u32,
    /// All 16 pixels share the same color, ignoring alpha
    pub single: bool,
    pub max: Vec3A,
    pub min: Vec3A,
}

impl ColorFit {
    /// Gather the block's colors and compute the initial endpoints.
    ///
    /// When `punch_through` is set, pixels with alpha below 128 are marked in
    /// [`Self::alphamask`].
    pub fn new(pixels: &PixelBlock, metric: Vec3A, punch_through: bool) -> Self {
        let mut alphamask = 0u32;
        for (i, pixel) in pixels.iter().enumerate() {
            if punch_through && pixel.a() < 128 {
                alphamask |= 3 << (2 * i);
            }
        }

        let points = pixels.map(|p| Vec3A::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0);
        let single = pixels.iter().all(|p| p.same_rgb(&pixels[0]));

        let mut fit = Self {
            points,
            metric,
            alphamask,
            single,
            max: Vec3A::ZERO,
            min: Vec3A::ZERO,
        };

        // single color blocks have their own encoding path
        if !single {
            fit.bounding_box();
        }
        fit
    }

    fn bounding_box(&mut self) {
        let mut min = Vec3A::ONE;
        let mut max = Vec3A::ZERO;
        for p in &self.points {
            min = min.min(*p);
            max = max.max(*p);
        }

        // select diagonal
        let center = (max + min) * 0.5;
        let mut cov = Vec3A::ZERO;
        for p in &self.points {
            let t = *p - center;
            cov += t * t.z;
        }

        if cov.x < 0.0 {
            std::mem::swap(&mut max.x, &mut min.x);
        }
        if cov.y < 0.0 {
            std::mem::swap(&mut max.y, &mut min.y);
        }

        // inset bounding box and clamp to [0,1]
        let inset = (max - min) / 16.0 - Vec3A::splat((8.0 / 255.0) / 16.0);
        let max = (max - inset).clamp(Vec3A::ZERO, Vec3A::ONE);
        let min = (min + inset).clamp(Vec3A::ZERO, Vec3A::ONE);

        self.max = quantize(max);
        self.min = quantize(min);
    }

    pub fn palette(&self, mode: PaletteMode) -> [Vec3A; 4] {
        let (max, min) = (self.max, self.min);
        match mode {
            PaletteMode::FourColor => [
                max,
                min,
                max * (2.0 / 3.0) + min * (1.0 / 3.0),
                max * (1.0 / 3.0) + min * (2.0 / 3.0),
            ],
            PaletteMode::ThreeColor => [max, min, max * 0.5 + min * 0.5, Vec3A::ZERO],
        }
    }

    fn distances(&self, point: Vec3A, palette: &[Vec3A; 4]) -> [f32; 4] {
        palette.map(|entry| {
            let t = (point - entry) * self.metric;
            t.dot(t)
        })
    }

    /// Assign every pixel the nearest palette entry, 2 bits per pixel
    pub fn match_colors(&self, mode: PaletteMode, palette: &[Vec3A; 4]) -> u32 {
        let mut indices = 0u32;
        for (i, point) in self.points.iter().enumerate() {
            let idx = match mode {
                PaletteMode::ThreeColor => {
                    if (self.alphamask >> (2 * i)) & 3 == 3 {
                        3
                    } else {
                        let [d0, d1, d2, _] = self.distances(*point, palette);
                        if d0 < d1 && d0 < d2 {
                            0
                        } else if d1 < d2 {
                            1
                        } else {
                            2
                        }
                    }
                }
                PaletteMode::FourColor => {
                    let d = self.distances(*point, palette);
                    select4(d)
                }
            };
            indices |= idx << (2 * i);
        }
        indices
    }

    /// Total weighted squared error of an index assignment. Transparent
    /// pixels in three color mode do not count.
    pub fn error(&self, mode: PaletteMode, palette: &[Vec3A; 4], indices: u32) -> f32 {
        let mut error = 0.0;
        for (i, point) in self.points.iter().enumerate() {
            let idx = (indices >> (2 * i)) & 3;
            if mode == PaletteMode::ThreeColor && idx == 3 {
                continue;
            }
            let t = (*point - palette[idx as usize]) * self.metric;
            error += t.dot(t);
        }
        error
    }

    /// Solve for the endpoints that best reproduce the block under `indices`.
    /// Leaves the endpoints untouched if the system is near singular.
    fn optimize_endpoints(&mut self, mode: PaletteMode, indices: u32) {
        let mut alpha2_sum = 0.0f32;
        let mut beta2_sum = 0.0f32;
        let mut alphabeta_sum = 0.0f32;
        let mut alphax_sum = Vec3A::ZERO;
        let mut betax_sum = Vec3A::ZERO;

        for (i, point) in self.points.iter().enumerate() {
            let code = (indices >> (2 * i)) & 3;
            if mode == PaletteMode::ThreeColor && code == 3 {
                continue;
            }

            let beta = mode.beta(code);
            let alpha = 1.0 - beta;

            alpha2_sum += alpha * alpha;
            beta2_sum += beta * beta;
            alphabeta_sum += alpha * beta;
            alphax_sum += *point * alpha;
            betax_sum += *point * beta;
        }

        let factor = alpha2_sum * beta2_sum - alphabeta_sum * alphabeta_sum;
        if factor < EPSILON {
            return;
        }
        let factor = 1.0 / factor;

        let a = (alphax_sum * beta2_sum - betax_sum * alphabeta_sum) * factor;
        let b = (betax_sum * alpha2_sum - alphax_sum * alphabeta_sum) * factor;

        // clamp to the color space
        self.max = quantize(a.clamp(Vec3A::ZERO, Vec3A::ONE));
        self.min = quantize(b.clamp(Vec3A::ZERO, Vec3A::ONE));
    }

    /// Run the cluster fit, returning the best index assignment found.
    ///
    /// Each pass re-solves the endpoints and re-matches the pixels. The first
    /// pass that fails to lower the error (starting from the bounding box fit)
    /// is rolled back and ends the loop, so [`Self::max`] and [`Self::min`]
    /// always correspond to the returned indices.
    pub fn compress(&mut self, mode: PaletteMode) -> u32 {
        let mut palette = self.palette(mode);
        let mut indices = self.match_colors(mode, &palette);
        let mut best_indices = indices;
        let mut best_error = self.error(mode, &palette, indices);

        for _ in 0..MAX_ITERATIONS {
            let (old_max, old_min) = (self.max, self.min);

            self.optimize_endpoints(mode, indices);
            palette = self.palette(mode);
            indices = self.match_colors(mode, &palette);
            let error = self.error(mode, &palette, indices);

            if error < best_error {
                best_error = error;
                best_indices = indices;
            } else {
                self.max = old_max;
                self.min = old_min;
                break;
            }
        }

        best_indices
    }
}

/// Branch-free nearest of four collinear palette entries, given the distance
/// to each. Entries sit on the line in the order 0, 2, 3, 1.
pub(crate) fn select4<T: PartialOrd>(d: [T; 4]) -> u32 {
    let b0 = (d[0] > d[3]) as u32;
    let b1 = (d[1] > d[2]) as u32;
    let b2 = (d[0] > d[2]) as u32;
    let b3 = (d[1] > d[3]) as u32;
    let b4 = (d[2] > d[3]) as u32;

    let x0 = b1 & b2;
    let x1 = b0 & b3;
    let x2 = b0 & b4;

    x2 | ((x0 | x1) << 1)
}
