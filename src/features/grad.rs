//! Image gradients with magnitude and unsigned orientation.
//!
//! - Convolves a 3×3 kernel pair (`X` and `Y`) with border clamping.
//! - Outputs per-pixel magnitude `sqrt(gx^2+gy^2)` and the orientation
//!   `atan2(gy, gx)` folded into `[0, π)`.
use crate::image::{ImageF32, ImageView, ImageViewMut};
use std::f32::consts::PI;

type Kernel3 = [[f32; 3]; 3];

const CENTRAL_KERNEL_X: Kernel3 = [[0.0, 0.0, 0.0], [-1.0, 0.0, 1.0], [0.0, 0.0, 0.0]];
const CENTRAL_KERNEL_Y: Kernel3 = [[0.0, -1.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// Per-pixel gradient magnitude and unsigned orientation.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub mag: ImageF32,
    /// Orientation in `[0, π)`
    pub angle: ImageF32,
}

#[inline]
fn unsigned_angle(gy: f32, gx: f32) -> f32 {
    let a = gy.atan2(gx);
    let a = if a < 0.0 { a + PI } else { a };
    if a >= PI {
        a - PI
    } else {
        a
    }
}

fn gradients_with_kernels(l: &ImageF32, kernel_x: &Kernel3, kernel_y: &Kernel3) -> Gradients {
    let w = l.w;
    let h = l.h;
    let mut mag = ImageF32::new(w, h);
    let mut angle = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return Gradients { mag, angle };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let mut out_angle = vec![0.0f32; w];
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, yy_row) in rows.iter().enumerate() {
                let kx_row = &kernel_x[ky];
                let ky_row = &kernel_y[ky];
                sum_x += yy_row[x_idx[0]] * kx_row[0]
                    + yy_row[x_idx[1]] * kx_row[1]
                    + yy_row[x_idx[2]] * kx_row[2];
                sum_y += yy_row[x_idx[0]] * ky_row[0]
                    + yy_row[x_idx[1]] * ky_row[1]
                    + yy_row[x_idx[2]] * ky_row[2];
            }

            out_mag[x] = (sum_x * sum_x + sum_y * sum_y).sqrt();
            out_angle[x] = unsigned_angle(sum_y, sum_x);
        }
        angle.row_mut(y).copy_from_slice(&out_angle);
    }

    Gradients { mag, angle }
}

/// Centred `[-1, 0, 1]` differences, the derivative used by HOG.
pub fn central_gradients(l: &ImageF32) -> Gradients {
    gradients_with_kernels(l, &CENTRAL_KERNEL_X, &CENTRAL_KERNEL_Y)
}
