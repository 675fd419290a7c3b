// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Per-pixel filters and NxN convolution. Every filter is non-destructive
//! and returns a new owned surface.

use crate::context::BitmapContext;
use crate::surface::MemorySurface;

/// Gaussian blur kernel with the size 5x5.
pub const KERNEL_GAUSSIAN_BLUR_5X5: [[i32; 5]; 5] = [
    [1, 4, 7, 4, 1],
    [4, 16, 26, 16, 4],
    [7, 26, 41, 26, 7],
    [4, 16, 26, 16, 4],
    [1, 4, 7, 4, 1],
];

/// Gaussian blur kernel with the size 3x3.
pub const KERNEL_GAUSSIAN_BLUR_3X3: [[i32; 3]; 3] =
    [[16, 26, 16], [26, 41, 26], [16, 26, 16]];

/// Sharpen kernel with the size 3x3.
pub const KERNEL_SHARPEN_3X3: [[i32; 3]; 3] = [[0, -2, 0], [-2, 11, -2], [0, -2, 0]];

/// Errors produced by kernel validation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KernelError {
    /// Convolution kernels must have an odd width and height.
    EvenKernelDimension,
    /// Kernel rows must all have the same length.
    NotRectangular,
    /// The kernel factor sum must not be zero.
    ZeroFactorSum,
}

impl core::fmt::Display for KernelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KernelError::EvenKernelDimension => {
                write!(f, "kernel width and height must be odd")
            }
            KernelError::NotRectangular => write!(f, "kernel rows must have equal length"),
            KernelError::ZeroFactorSum => write!(f, "kernel factor sum must not be zero"),
        }
    }
}

impl std::error::Error for KernelError {}

impl BitmapContext<'_> {
    /// Convolutes the surface with `kernel`, normalizing by the kernel sum.
    pub fn convolute<K: AsRef<[i32]>>(&self, kernel: &[K]) -> Result<MemorySurface, KernelError> {
        let mut kernel_factor_sum = 0;
        for row in kernel {
            for k in row.as_ref() {
                kernel_factor_sum += k;
            }
        }
        self.convolute_with(kernel, kernel_factor_sum, 0)
    }

    /// Convolutes the surface with `kernel`.
    ///
    /// The kernel must be rectangular with odd width and height; each
    /// accumulated channel is divided by `kernel_factor_sum`, offset by
    /// `kernel_offset_sum` and clamped to `0..=255`. Border pixels repeat
    /// the edge pixel (clamp-to-edge).
    pub fn convolute_with<K: AsRef<[i32]>>(
        &self,
        kernel: &[K],
        kernel_factor_sum: i32,
        kernel_offset_sum: i32,
    ) -> Result<MemorySurface, KernelError> {
        let kh = kernel.len() as i32;
        let kw = if kh > 0 { kernel[0].as_ref().len() as i32 } else { 0 };

        if (kw & 1) == 0 || (kh & 1) == 0 {
            return Err(KernelError::EvenKernelDimension);
        }
        if kernel.iter().any(|row| row.as_ref().len() as i32 != kw) {
            return Err(KernelError::NotRectangular);
        }
        if kernel_factor_sum == 0 {
            return Err(KernelError::ZeroFactorSum);
        }

        let w = self.width();
        let h = self.height();
        let kwh = kw >> 1;
        let khh = kh >> 1;

        let mut result = Vec::with_capacity((w * h) as usize);

        for y in 0..h {
            for x in 0..w {
                let mut a = 0;
                let mut r = 0;
                let mut g = 0;
                let mut b = 0;

                for kx in -kwh..=kwh {
                    let mut px = kx + x;
                    // Repeat pixels at the borders.
                    if px < 0 {
                        px = 0;
                    } else if px >= w {
                        px = w - 1;
                    }

                    for ky in -khh..=khh {
                        let mut py = ky + y;
                        // Repeat pixels at the borders.
                        if py < 0 {
                            py = 0;
                        } else if py >= h {
                            py = h - 1;
                        }

                        let col = self.pixels().get(py * w + px);
                        let k = kernel[(ky + khh) as usize].as_ref()[(kx + kwh) as usize];
                        a += ((col >> 24) & 0xFF) as i32 * k;
                        r += ((col >> 16) & 0xFF) as i32 * k;
                        g += ((col >> 8) & 0xFF) as i32 * k;
                        b += (col & 0xFF) as i32 * k;
                    }
                }

                let ta = (a / kernel_factor_sum) + kernel_offset_sum;
                let tr = (r / kernel_factor_sum) + kernel_offset_sum;
                let tg = (g / kernel_factor_sum) + kernel_offset_sum;
                let tb = (b / kernel_factor_sum) + kernel_offset_sum;

                // Clamp to byte boundaries.
                let ba = ta.clamp(0, 255) as u32;
                let br = tr.clamp(0, 255) as u32;
                let bg = tg.clamp(0, 255) as u32;
                let bb = tb.clamp(0, 255) as u32;

                result.push((ba << 24) | (br << 16) | (bg << 8) | bb);
            }
        }

        Ok(MemorySurface::from_vec(result, w, h))
    }

    /// Returns a new surface with inverted color channels.
    ///
    /// Alpha is passed through unchanged.
    pub fn invert(&self) -> MemorySurface {
        self.map_pixels(|a, r, g, b| (a, 255 - r, 255 - g, 255 - b))
    }

    /// Returns a new grayscale surface.
    ///
    /// The gray values equal the brightness values, computed with the
    /// integer weights 6966/23436/2366 over 2^15 (approximating the
    /// 0.2126/0.7152/0.0722 luminance factors).
    pub fn gray(&self) -> MemorySurface {
        self.map_pixels(|a, r, g, b| {
            let gray = (r * 6966 + g * 23436 + b * 2366) >> 15;
            (a, gray, gray, gray)
        })
    }

    /// Returns a new contrast-adjusted surface.
    ///
    /// `level` is in `-255.0..=255.0`; 0 keeps the input unchanged.
    pub fn adjust_contrast(&self, level: f64) -> MemorySurface {
        let factor = ((259.0 * (level + 255.0)) / (255.0 * (259.0 - level)) * 255.0) as i32;

        self.map_pixels(|a, r, g, b| {
            (
                a,
                (((factor * (r - 128)) >> 8) + 128).clamp(0, 255),
                (((factor * (g - 128)) >> 8) + 128).clamp(0, 255),
                (((factor * (b - 128)) >> 8) + 128).clamp(0, 255),
            )
        })
    }

    /// Returns a new brightness-adjusted surface.
    ///
    /// `level` is in `-255..=255`; 0 keeps the input unchanged.
    pub fn adjust_brightness(&self, level: i32) -> MemorySurface {
        self.map_pixels(|a, r, g, b| {
            (
                a,
                (r + level).clamp(0, 255),
                (g + level).clamp(0, 255),
                (b + level).clamp(0, 255),
            )
        })
    }

    /// Returns a new gamma-adjusted surface.
    ///
    /// A `value` of 1.0 keeps the input unchanged.
    pub fn adjust_gamma(&self, value: f64) -> MemorySurface {
        let gamma_correction = 1.0 / value;

        self.map_pixels(|a, r, g, b| {
            (
                a,
                ((255.0 * (r as f64 / 255.0).powf(gamma_correction)) as i32).clamp(0, 255),
                ((255.0 * (g as f64 / 255.0).powf(gamma_correction)) as i32).clamp(0, 255),
                ((255.0 * (b as f64 / 255.0).powf(gamma_correction)) as i32).clamp(0, 255),
            )
        })
    }

    fn map_pixels<F: Fn(i32, i32, i32, i32) -> (i32, i32, i32, i32)>(
        &self,
        f: F,
    ) -> MemorySurface {
        let len = self.len();
        let mut result = Vec::with_capacity(len as usize);

        for i in 0..len {
            let c = self.pixels().get(i);
            let a = ((c >> 24) & 0xFF) as i32;
            let r = ((c >> 16) & 0xFF) as i32;
            let g = ((c >> 8) & 0xFF) as i32;
            let b = (c & 0xFF) as i32;

            let (a, r, g, b) = f(a, r, g, b);
            result.push(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32);
        }

        MemorySurface::from_vec(result, self.width(), self.height())
    }
}
