// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Geometric transforms: crop, resize, stepped and free rotation, flips and
//! scrolls. All but the scrolls are non-destructive and return a new owned
//! surface.

use crate::blend::BlendMode;
use crate::color::Color;
use crate::context::BitmapContext;
use crate::geom::IntRect;
use crate::surface::MemorySurface;

/// The resampling used by [`BitmapContext::resize`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Interpolation {
    /// Nearest-neighbor sampling. Exact for integer scale factors.
    NearestNeighbor,
    /// Four-sample bilinear filtering.
    Bilinear,
}

/// The mirror axis used by [`BitmapContext::flip`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FlipMode {
    /// Flips the image vertically (around the center of the y-axis).
    Vertical,
    /// Flips the image horizontally (around the center of the x-axis).
    Horizontal,
}

impl BitmapContext<'_> {
    /// Returns a copy of the given region.
    ///
    /// The region is clamped to the surface; a region entirely outside it
    /// yields `None`.
    pub fn crop(&self, mut x: i32, mut y: i32, mut width: i32, mut height: i32) -> Option<MemorySurface> {
        let src_width = self.width();
        let src_height = self.height();

        if x > src_width || y > src_height {
            return None;
        }

        // Clamp to boundaries.
        if x < 0 {
            x = 0;
        }
        if x + width > src_width {
            width = src_width - x;
        }
        if y < 0 {
            y = 0;
        }
        if y + height > src_height {
            height = src_height - y;
        }

        if width < 1 || height < 1 {
            return None;
        }

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for line in 0..height {
            let src_off = (y + line) * src_width + x;
            for i in 0..width {
                pixels.push(self.pixels().get(src_off + i));
            }
        }

        Some(MemorySurface::from_vec(pixels, width, height))
    }

    /// Returns a resized copy of the surface.
    ///
    /// Zero or negative target sizes yield `None`.
    pub fn resize(
        &self,
        new_width: i32,
        new_height: i32,
        interpolation: Interpolation,
    ) -> Option<MemorySurface> {
        if new_width < 1 || new_height < 1 {
            return None;
        }

        let old_width = self.width();
        let old_height = self.height();
        let xs = old_width as f32 / new_width as f32;
        let ys = old_height as f32 / new_height as f32;

        let mut pd = Vec::with_capacity((new_width * new_height) as usize);

        match interpolation {
            Interpolation::NearestNeighbor => {
                for y in 0..new_height {
                    for x in 0..new_width {
                        let sx = x as f32 * xs;
                        let sy = y as f32 * ys;
                        let x0 = sx as i32;
                        let y0 = sy as i32;

                        pd.push(self.pixels().get(y0 * old_width + x0));
                    }
                }
            }
            Interpolation::Bilinear => {
                for y in 0..new_height {
                    for x in 0..new_width {
                        let sx = x as f32 * xs;
                        let sy = y as f32 * ys;
                        let x0 = sx as i32;
                        let y0 = sy as i32;

                        // The four interpolation points.
                        let fracx = sx - x0 as f32;
                        let fracy = sy - y0 as f32;
                        let ifracx = 1.0 - fracx;
                        let ifracy = 1.0 - fracy;
                        let mut x1 = x0 + 1;
                        if x1 >= old_width {
                            x1 = x0;
                        }
                        let mut y1 = y0 + 1;
                        if y1 >= old_height {
                            y1 = y0;
                        }

                        let c1 = self.pixels().get(y0 * old_width + x0);
                        let c2 = self.pixels().get(y0 * old_width + x1);
                        let c3 = self.pixels().get(y1 * old_width + x0);
                        let c4 = self.pixels().get(y1 * old_width + x1);

                        let lerp = |shift: u32| {
                            let v1 = ((c1 >> shift) & 0xFF) as f32;
                            let v2 = ((c2 >> shift) & 0xFF) as f32;
                            let v3 = ((c3 >> shift) & 0xFF) as f32;
                            let v4 = ((c4 >> shift) & 0xFF) as f32;

                            let l0 = ifracx * v1 + fracx * v2;
                            let l1 = ifracx * v3 + fracx * v4;
                            (ifracy * l0 + fracy * l1) as u32 & 0xFF
                        };

                        let a = lerp(24);
                        let r = lerp(16);
                        let g = lerp(8);
                        let b = lerp(0);

                        pd.push((a << 24) | (r << 16) | (g << 8) | b);
                    }
                }
            }
        }

        Some(MemorySurface::from_vec(pd, new_width, new_height))
    }

    /// Returns a copy rotated clockwise in 90 degree steps.
    ///
    /// The rotation is an exact index transposition with no resampling;
    /// angles that are not a multiple of 90 fall through to the nearest
    /// step, and anything outside `(0, 270]` returns a plain copy.
    pub fn rotate(&self, angle: i32) -> MemorySurface {
        let w = self.width();
        let h = self.height();
        let angle = angle % 360;

        if angle > 0 && angle <= 90 {
            let mut rp = Vec::with_capacity((w * h) as usize);
            for x in 0..w {
                for y in (0..h).rev() {
                    rp.push(self.pixels().get(y * w + x));
                }
            }
            MemorySurface::from_vec(rp, h, w)
        } else if angle > 90 && angle <= 180 {
            let mut rp = Vec::with_capacity((w * h) as usize);
            for y in (0..h).rev() {
                for x in (0..w).rev() {
                    rp.push(self.pixels().get(y * w + x));
                }
            }
            MemorySurface::from_vec(rp, w, h)
        } else if angle > 180 && angle <= 270 {
            let mut rp = Vec::with_capacity((w * h) as usize);
            for x in (0..w).rev() {
                for y in 0..h {
                    rp.push(self.pixels().get(y * w + x));
                }
            }
            MemorySurface::from_vec(rp, h, w)
        } else {
            self.clone_pixels()
        }
    }

    /// Returns a copy rotated by an arbitrary angle in degrees
    /// (positive = clockwise), bilinear-filtered.
    ///
    /// With `crop` the canvas keeps its size; otherwise it grows to hold
    /// the whole rotated image. Pixels mapping outside the source stay
    /// transparent.
    pub fn rotate_free(&self, angle: f64, crop: bool) -> MemorySurface {
        use std::f64::consts::PI;

        // Rotating clockwise, so the angle is negative relative to the
        // Cartesian quadrants.
        let cn_angle = -1.0 * (PI / 180.0) * angle;

        let i_width = self.width();
        let i_height = self.height();

        let (new_width, new_height) = if crop {
            (i_width, i_height)
        } else {
            let rad = angle / (180.0 / PI);
            (
                ((rad.sin() * i_height as f64).abs() + (rad.cos() * i_width as f64).abs()).ceil()
                    as i32,
                ((rad.sin() * i_width as f64).abs() + (rad.cos() * i_height as f64).abs()).ceil()
                    as i32,
            )
        };

        let i_centre_x = i_width / 2;
        let i_centre_y = i_height / 2;
        let i_dest_centre_x = new_width / 2;
        let i_dest_centre_y = new_height / 2;

        let old_w = i_width;
        let mut newp = vec![0u32; (new_width * new_height) as usize];

        // Assign destination pixels from the source with bilinear
        // interpolation.
        for i in 0..new_height {
            for j in 0..new_width {
                // Convert raster to Cartesian.
                let x = j - i_dest_centre_x;
                let y = i_dest_centre_y - i;

                // Convert Cartesian to polar.
                let f_distance = ((x * x + y * y) as f64).sqrt();
                let mut f_polar_angle;
                if x == 0 {
                    if y == 0 {
                        // Center of the image, no rotation needed.
                        newp[(i * new_width + j) as usize] =
                            self.pixels().get(i_centre_y * old_w + i_centre_x);
                        continue;
                    }
                    if y < 0 {
                        f_polar_angle = 1.5 * PI;
                    } else {
                        f_polar_angle = 0.5 * PI;
                    }
                } else {
                    f_polar_angle = (y as f64).atan2(x as f64);
                }

                // "Reverse" rotate, so minus instead of plus.
                f_polar_angle -= cn_angle;

                // Convert polar back to raster.
                let mut f_true_x = f_distance * f_polar_angle.cos();
                let mut f_true_y = f_distance * f_polar_angle.sin();
                f_true_x += i_centre_x as f64;
                f_true_y = i_centre_y as f64 - f_true_y;

                let i_floor_x = f_true_x.floor() as i32;
                let i_floor_y = f_true_y.floor() as i32;
                let i_ceiling_x = f_true_x.ceil() as i32;
                let i_ceiling_y = f_true_y.ceil() as i32;

                if i_floor_x < 0
                    || i_ceiling_x < 0
                    || i_floor_x >= i_width
                    || i_ceiling_x >= i_width
                    || i_floor_y < 0
                    || i_ceiling_y < 0
                    || i_floor_y >= i_height
                    || i_ceiling_y >= i_height
                {
                    continue;
                }

                let f_delta_x = f_true_x - i_floor_x as f64;
                let f_delta_y = f_true_y - i_floor_y as f64;

                let clr_top_left = self.pixels().get(i_floor_y * old_w + i_floor_x);
                let clr_top_right = self.pixels().get(i_floor_y * old_w + i_ceiling_x);
                let clr_bottom_left = self.pixels().get(i_ceiling_y * old_w + i_floor_x);
                let clr_bottom_right = self.pixels().get(i_ceiling_y * old_w + i_ceiling_x);

                let lerp2 = |shift: u32| {
                    // Linearly interpolate horizontally between the top and
                    // bottom neighbor pairs, then vertically between those.
                    let top = (1.0 - f_delta_x) * ((clr_top_left >> shift) & 0xFF) as f64
                        + f_delta_x * ((clr_top_right >> shift) & 0xFF) as f64;
                    let bottom = (1.0 - f_delta_x) * ((clr_bottom_left >> shift) & 0xFF) as f64
                        + f_delta_x * ((clr_bottom_right >> shift) & 0xFF) as f64;
                    (((1.0 - f_delta_y) * top + f_delta_y * bottom).round() as i32).clamp(0, 255)
                };

                let i_alpha = lerp2(24);
                let i_red = lerp2(16);
                let i_green = lerp2(8);
                let i_blue = lerp2(0);

                // Re-premultiply the interpolated color by its alpha.
                let a = i_alpha + 1;
                newp[(i * new_width + j) as usize] = ((i_alpha as u32) << 24)
                    | ((((i_red * a) >> 8) as u8 as u32) << 16)
                    | ((((i_green * a) >> 8) as u8 as u32) << 8)
                    | ((i_blue * a) >> 8) as u8 as u32;
            }
        }

        MemorySurface::from_vec(newp, new_width, new_height)
    }

    /// Returns a mirrored copy of the surface.
    pub fn flip(&self, flip_mode: FlipMode) -> MemorySurface {
        let w = self.width();
        let h = self.height();
        let mut rp = Vec::with_capacity((w * h) as usize);

        match flip_mode {
            FlipMode::Vertical => {
                for y in (0..h).rev() {
                    for x in 0..w {
                        rp.push(self.pixels().get(y * w + x));
                    }
                }
            }
            FlipMode::Horizontal => {
                for y in 0..h {
                    for x in (0..w).rev() {
                        rp.push(self.pixels().get(y * w + x));
                    }
                }
            }
        }

        MemorySurface::from_vec(rp, w, h)
    }

    /// Scrolls the content of `rect` vertically by `dy` (positive = down)
    /// and fills the vacated band with `background` (opaque white by
    /// default).
    pub fn scroll_y(&mut self, dy: i32, rect: &IntRect, background: Option<Color>) {
        let bg = background.unwrap_or(Color::WHITE);
        let w = self.width();
        let h = self.height();

        let mut xmin = rect.x();
        let mut ymin = rect.y();
        let mut xmax = rect.right() - 1;
        let mut ymax = rect.bottom() - 1;

        if xmin < 0 {
            xmin = 0;
        }
        if ymin < 0 {
            ymin = 0;
        }
        if xmax >= w {
            xmax = w - 1;
        }
        if ymax >= h {
            ymax = h - 1;
        }
        let xcnt = xmax - xmin + 1;
        if xcnt <= 0 {
            return;
        }

        if dy > 0 {
            let mut y = ymax;
            while y >= ymin + dy {
                let ysrc = y - dy;
                if ysrc >= ymin && ysrc <= ymax {
                    self.buffer.copy_within(ysrc * w + xmin, y * w + xmin, xcnt);
                }
                y -= 1;
            }
        }
        if dy < 0 {
            let mut y = ymin;
            while y <= ymax - dy {
                let ysrc = y - dy;
                if ysrc >= ymin && ysrc <= ymax {
                    self.buffer.copy_within(ysrc * w + xmin, y * w + xmin, xcnt);
                }
                y += 1;
            }
        }

        if dy < 0 {
            self.fill_rectangle(xmin, ymax + dy + 1, xmax, ymax, bg, Some(BlendMode::Alpha));
        }
        if dy > 0 {
            self.fill_rectangle(xmin, ymin, xmax, ymin + dy - 1, bg, Some(BlendMode::Alpha));
        }
    }

    /// Scrolls the content of `rect` horizontally by `dx` (positive =
    /// right) and fills the vacated band with `background` (opaque white by
    /// default).
    pub fn scroll_x(&mut self, dx: i32, rect: &IntRect, background: Option<Color>) {
        let bg = background.unwrap_or(Color::WHITE);
        let w = self.width();
        let h = self.height();

        let mut xmin = rect.x();
        let mut ymin = rect.y();
        let mut xmax = rect.right() - 1;
        let mut ymax = rect.bottom() - 1;

        if xmin < 0 {
            xmin = 0;
        }
        if ymin < 0 {
            ymin = 0;
        }
        if xmax >= w {
            xmax = w - 1;
        }
        if ymax >= h {
            ymax = h - 1;
        }
        let mut xcnt = xmax - xmin + 1;

        let mut srcx = xmin;
        let mut dstx = xmin;
        if dx < 0 {
            xcnt += dx;
            dstx = xmin;
            srcx = xmin - dx;
        }
        if dx > 0 {
            xcnt -= dx;
            srcx = xmin;
            dstx = xmin + dx;
        }

        if xcnt <= 0 {
            return;
        }

        for y in ymin..=ymax {
            self.buffer.copy_within(y * w + srcx, y * w + dstx, xcnt);
        }

        if dx < 0 {
            self.fill_rectangle(xmax + dx + 1, ymin, xmax, ymax, bg, Some(BlendMode::Alpha));
        }
        if dx > 0 {
            self.fill_rectangle(xmin, ymin, xmin + dx - 1, ymax, bg, Some(BlendMode::Alpha));
        }
    }
}
