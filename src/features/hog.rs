//! Histogram of oriented gradients over a fixed detection window.
//!
//! Layout follows the classic Dalal–Triggs descriptor:
//! - centred `[-1, 0, 1]` gradients on intensities in `[0, 1]`;
//! - per-cell histograms of unsigned orientation with `bins` bins, each
//!   pixel voting its magnitude into the two nearest bins (linear
//!   interpolation, wrapping at π);
//! - overlapping blocks of cells, concatenated and L2-Hys normalised
//!   (L2 norm, clip at `l2hys_threshold`, renormalise).
//!
//! Feature length:
//! `((W − bw) / sx + 1) · ((H − bh) / sy + 1) · (bw / cw) · (bh / ch) · bins`.
use super::grad::central_gradients;
use super::FeatureExtractor;
use crate::error::BoxError;
use crate::image::ImageU8;
use crate::types::WindowSize;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

const NORM_EPS: f32 = 1e-6;

/// Descriptor geometry, all sizes in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HogParams {
    pub window: WindowSize,
    pub block: WindowSize,
    pub block_stride: WindowSize,
    pub cell: WindowSize,
    pub bins: usize,
    pub l2hys_threshold: f32,
}

impl Default for HogParams {
    fn default() -> Self {
        Self {
            window: WindowSize::new(64, 128),
            block: WindowSize::new(16, 16),
            block_stride: WindowSize::new(8, 8),
            cell: WindowSize::new(8, 8),
            bins: 9,
            l2hys_threshold: 0.2,
        }
    }
}

impl HogParams {
    pub fn with_window(window: WindowSize) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("window", self.window),
            ("block", self.block),
            ("block_stride", self.block_stride),
            ("cell", self.cell),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, s)| s.is_empty()) {
            return Err(format!("HOG {name} size must be positive"));
        }
        if self.bins == 0 {
            return Err("HOG needs at least one orientation bin".to_string());
        }
        if self.block.w % self.cell.w != 0 || self.block.h % self.cell.h != 0 {
            return Err("HOG block size must be a multiple of the cell size".to_string());
        }
        if self.block_stride.w % self.cell.w != 0 || self.block_stride.h % self.cell.h != 0 {
            return Err("HOG block stride must be a multiple of the cell size".to_string());
        }
        if !self.block.fits(self.window.w, self.window.h) {
            return Err("HOG block does not fit the window".to_string());
        }
        if (self.window.w - self.block.w) % self.block_stride.w != 0
            || (self.window.h - self.block.h) % self.block_stride.h != 0
        {
            return Err("HOG blocks do not tile the window with the given stride".to_string());
        }
        Ok(())
    }

    fn blocks(&self) -> (usize, usize) {
        (
            (self.window.w - self.block.w) / self.block_stride.w + 1,
            (self.window.h - self.block.h) / self.block_stride.h + 1,
        )
    }

    fn cells_per_block(&self) -> (usize, usize) {
        (self.block.w / self.cell.w, self.block.h / self.cell.h)
    }

    pub fn feature_len(&self) -> usize {
        let (bx, by) = self.blocks();
        let (cx, cy) = self.cells_per_block();
        bx * by * cx * cy * self.bins
    }
}

#[derive(Clone, Debug)]
pub struct HogExtractor {
    params: HogParams,
    len: usize,
}

impl HogExtractor {
    pub fn new(params: HogParams) -> Result<Self, String> {
        params.validate()?;
        Ok(Self {
            params,
            len: params.feature_len(),
        })
    }

    pub fn params(&self) -> &HogParams {
        &self.params
    }

    fn cell_histograms(&self, patch: &ImageU8<'_>) -> (Vec<f32>, usize) {
        let p = &self.params;
        let cells_x = p.window.w / p.cell.w;
        let cells_y = p.window.h / p.cell.h;
        let bins = p.bins;
        let bin_width = PI / bins as f32;

        let grad = central_gradients(&patch.to_f32());
        let mut hist = vec![0.0f32; cells_x * cells_y * bins];
        for y in 0..cells_y * p.cell.h {
            let cy = y / p.cell.h;
            for x in 0..cells_x * p.cell.w {
                let mag = grad.mag.get(x, y);
                if mag == 0.0 {
                    continue;
                }
                let pos = grad.angle.get(x, y) / bin_width - 0.5;
                let lo = pos.floor();
                let frac = pos - lo;
                let b0 = (lo as isize).rem_euclid(bins as isize) as usize;
                let b1 = (b0 + 1) % bins;
                let base = (cy * cells_x + x / p.cell.w) * bins;
                hist[base + b0] += mag * (1.0 - frac);
                hist[base + b1] += mag * frac;
            }
        }
        (hist, cells_x)
    }
}

fn l2hys(block: &mut [f32], clip: f32) {
    let norm = (block.iter().map(|v| v * v).sum::<f32>() + NORM_EPS).sqrt();
    for v in block.iter_mut() {
        *v = (*v / norm).min(clip);
    }
    let norm = (block.iter().map(|v| v * v).sum::<f32>() + NORM_EPS).sqrt();
    for v in block.iter_mut() {
        *v /= norm;
    }
}

impl FeatureExtractor for HogExtractor {
    fn window_size(&self) -> WindowSize {
        self.params.window
    }

    fn feature_len(&self) -> usize {
        self.len
    }

    fn describe(&self, patch: &ImageU8<'_>, out: &mut [f32]) -> Result<(), BoxError> {
        if out.len() != self.len {
            return Err(format!("HOG output buffer has {} slots, need {}", out.len(), self.len).into());
        }
        let p = &self.params;
        let bins = p.bins;
        let (hist, cells_x) = self.cell_histograms(patch);
        let (blocks_x, blocks_y) = p.blocks();
        let (cpb_x, cpb_y) = p.cells_per_block();
        let step_x = p.block_stride.w / p.cell.w;
        let step_y = p.block_stride.h / p.cell.h;
        let block_len = cpb_x * cpb_y * bins;

        for (block_idx, block) in out.chunks_exact_mut(block_len).enumerate() {
            let bx = block_idx % blocks_x;
            let by = block_idx / blocks_x;
            debug_assert!(by < blocks_y);
            let mut k = 0;
            for cy in by * step_y..by * step_y + cpb_y {
                for cx in bx * step_x..bx * step_x + cpb_x {
                    let base = (cy * cells_x + cx) * bins;
                    block[k..k + bins].copy_from_slice(&hist[base..base + bins]);
                    k += bins;
                }
            }
            l2hys(block, p.l2hys_threshold);
        }
        Ok(())
    }
}
