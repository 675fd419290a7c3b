// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Antialiased strokes: a Gupta-Sproull thin line and a width-N line built
//! from antialiased component edges plus interior scanline fill.

use arrayvec::ArrayVec;

use crate::blend::alpha_blend_premul_rb;
use crate::clipper::{clip_line_f32, clip_line_i32};
use crate::color::Color;
use crate::context::BitmapContext;
use crate::geom::Rect;
use crate::pixel_buffer::PixelBuffer;

impl BitmapContext<'_> {
    /// Draws a one-pixel antialiased line using an optimized Gupta-Sproull
    /// algorithm.
    pub fn draw_line_aa(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        clip: Option<Rect>,
    ) {
        let color = color.premultiply().get();
        draw_line_aa_raw(self, x1, y1, x2, y2, color, clip);
    }

    /// Draws an antialiased line with the given stroke width.
    ///
    /// The stroke is built from two (or, for wide strokes, four) antialiased
    /// component edges; the interior is filled scanline by scanline between
    /// the per-row edge extrema.
    pub fn draw_line_aa_width(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
        color: Color,
        clip: Option<Rect>,
    ) {
        let color = color.premultiply().get();
        aa_width_line(self, x1, y1, x2, y2, line_width, color, clip);
    }
}

/// One antialiased component edge of a thick line, restricted to the first
/// quadrant orientation. Tracks the per-row left or right extreme while
/// drawing so the caller can fill the interior afterwards.
fn aa_line_q1(
    width: i32,
    height: i32,
    buffer: &mut PixelBuffer,
    mut x1: i32,
    mut y1: i32,
    mut x2: i32,
    mut y2: i32,
    color: u32,
    min_edge: bool,
    left_edge: bool,
    left_edge_x: &mut [i32],
    right_edge_x: &mut [i32],
) {
    let mut off: u8 = 0;
    if min_edge {
        off = 0xFF;
    }

    if x1 == x2 {
        return;
    }
    if y1 == y2 {
        return;
    }

    if y1 > y2 {
        core::mem::swap(&mut x1, &mut x2);
        core::mem::swap(&mut y1, &mut y2);
    }

    let mut deltax = x2 - x1;
    let mut deltay = y2 - y1;

    if x1 > x2 {
        deltax = x1 - x2;
    }

    let mut x = x1;
    let mut y = y1;

    let m: u16 = if deltax > deltay {
        ((deltay << 16) / deltax) as u16
    } else {
        ((deltax << 16) / deltay) as u16
    };

    let mut e: u16 = 0;

    let a = ((color & 0xFF00_0000) >> 24) as u32;
    let r = ((color & 0x00FF_0000) >> 16) as u32;
    let g = ((color & 0x0000_FF00) >> 8) as u32;
    let b = color & 0x0000_00FF;

    if deltax >= deltay {
        for _ in 0..deltax {
            if e.wrapping_add(m) <= e {
                // Rolled over.
                y += 1;
            }

            e = e.wrapping_add(m);

            if x1 < x2 {
                x += 1;
            } else {
                x -= 1;
            }

            if y < 0 || y >= height {
                continue;
            }

            if left_edge {
                left_edge_x[y as usize] = (x + 1).max(left_edge_x[y as usize]);
            } else {
                right_edge_x[y as usize] = (x - 1).min(right_edge_x[y as usize]);
            }

            if x < 0 || x >= width {
                continue;
            }

            let ta = ((a * (((e >> 8) as u32) ^ off as u32)) >> 8) & 0xFF;

            let d = buffer.get(y * width + x);
            let rd = (d & 0x00FF_0000) >> 16;
            let gd = (d & 0x0000_FF00) >> 8;
            let bd = d & 0x0000_00FF;

            let rd = ((r * ta + rd * (0xFF - ta)) >> 8) & 0xFF;
            let gd = ((g * ta + gd * (0xFF - ta)) >> 8) & 0xFF;
            let bd = ((b * ta + bd * (0xFF - ta)) >> 8) & 0xFF;

            buffer.set(y * width + x, 0xFF00_0000 | (rd << 16) | (gd << 8) | bd);
        }
    } else {
        off ^= 0xFF;

        for _ in 1..deltay {
            if e.wrapping_add(m) <= e {
                // Rolled over.
                if x1 < x2 {
                    x += 1;
                } else {
                    x -= 1;
                }
            }

            e = e.wrapping_add(m);

            y += 1;

            if x < 0 || x >= width {
                continue;
            }
            if y < 0 || y >= height {
                continue;
            }

            let ta = ((a * (((e >> 8) as u32) ^ off as u32)) >> 8) & 0xFF;

            let d = buffer.get(y * width + x);
            let rd = (d & 0x00FF_0000) >> 16;
            let gd = (d & 0x0000_FF00) >> 8;
            let bd = d & 0x0000_00FF;

            let rd = ((r * ta + rd * (0xFF - ta)) >> 8) & 0xFF;
            let gd = ((g * ta + gd * (0xFF - ta)) >> 8) & 0xFF;
            let bd = ((b * ta + bd * (0xFF - ta)) >> 8) & 0xFF;

            buffer.set(y * width + x, 0xFF00_0000 | (rd << 16) | (gd << 8) | bd);

            if left_edge {
                left_edge_x[y as usize] = x + 1;
            } else {
                right_edge_x[y as usize] = x - 1;
            }
        }
    }
}

struct EdgeSegment {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    min_edge: bool,
    left_edge: bool,
}

fn aa_width_line(
    ctx: &mut BitmapContext<'_>,
    mut x1: f32,
    mut y1: f32,
    mut x2: f32,
    mut y2: f32,
    line_width: f32,
    color: u32,
    clip: Option<Rect>,
) {
    let width = ctx.width();
    let height = ctx.height();

    let viewport = clip.or_else(|| Rect::from_xywh(0.0, 0.0, width as f64, height as f64));
    let viewport = match viewport {
        Some(r) => r,
        None => return,
    };
    if !clip_line_f32(&viewport, &mut x1, &mut y1, &mut x2, &mut y2) {
        return;
    }

    if line_width <= 0.0 {
        return;
    }

    if y1 > y2 {
        core::mem::swap(&mut x1, &mut x2);
        core::mem::swap(&mut y1, &mut y2);
    }

    let a = ((color & 0xFF00_0000) >> 24) as u32;
    let r = ((color & 0x00FF_0000) >> 16) as u32;
    let g = ((color & 0x0000_FF00) >> 8) as u32;
    let b = color & 0x0000_00FF;

    let blend_solid = |buffer: &mut PixelBuffer, x: i32, y: i32| {
        let d = buffer.get(y * width + x);
        let rd = (d & 0x00FF_0000) >> 16;
        let gd = (d & 0x0000_FF00) >> 8;
        let bd = d & 0x0000_00FF;

        let rd = ((r * a + rd * (0xFF - a)) >> 8) & 0xFF;
        let gd = ((g * a + gd * (0xFF - a)) >> 8) & 0xFF;
        let bd = ((b * a + bd * (0xFF - a)) >> 8) & 0xFF;

        buffer.set(y * width + x, 0xFF00_0000 | (rd << 16) | (gd << 8) | bd);
    };

    if x1 == x2 {
        // Vertical: a solid bar, no weighting needed.
        x1 -= (line_width as i32 / 2) as f32;
        x2 += (line_width as i32 / 2) as f32;

        if x1 < 0.0 {
            x1 = 0.0;
        }
        if x2 < 0.0 {
            return;
        }
        if x1 >= width as f32 {
            return;
        }
        if x2 >= width as f32 {
            x2 = (width - 1) as f32;
        }
        if y1 >= height as f32 || y2 < 0.0 {
            return;
        }
        if y1 < 0.0 {
            y1 = 0.0;
        }
        if y2 >= height as f32 {
            y2 = (height - 1) as f32;
        }

        for x in (x1 as i32)..=(x2 as i32) {
            for y in (y1 as i32)..=(y2 as i32) {
                blend_solid(&mut ctx.buffer, x, y);
            }
        }
        return;
    }

    if y1 == y2 {
        // Horizontal: a solid bar, no weighting needed.
        if x1 > x2 {
            core::mem::swap(&mut x1, &mut x2);
        }

        y1 -= (line_width as i32 / 2) as f32;
        y2 += (line_width as i32 / 2) as f32;

        if y1 < 0.0 {
            y1 = 0.0;
        }
        if y2 < 0.0 {
            return;
        }
        if y1 >= height as f32 {
            return;
        }
        if y2 >= height as f32 {
            y2 = (height - 1) as f32;
        }
        if x1 >= width as f32 || y2 < 0.0 {
            return;
        }
        if x1 < 0.0 {
            x1 = 0.0;
        }
        if x2 >= width as f32 {
            x2 = (width - 1) as f32;
        }

        for x in (x1 as i32)..=(x2 as i32) {
            for y in (y1 as i32)..=(y2 as i32) {
                blend_solid(&mut ctx.buffer, x, y);
            }
        }
        return;
    }

    y1 += 1.0;
    y2 += 1.0;

    let w = line_width;
    let dx = x2 - x1;
    let dy = y2 - y1;

    let len = (dx * dx + dy * dy).sqrt();
    let xtot = w * dy / len;
    let ytot = w * dx / len;

    // Center the stroke on the ideal line.
    x1 += xtot / 2.0;
    y1 -= ytot / 2.0;
    x2 += xtot / 2.0;
    y2 -= ytot / 2.0;

    let sx = -xtot;
    let sy = ytot;

    let ix1 = x1 as i32;
    let iy1 = y1 as i32;
    let mut ix2 = x2 as i32;
    let iy2 = y2 as i32;
    let ix3 = (x1 + sx) as i32;
    let iy3 = (y1 + sy) as i32;
    let mut ix4 = (x2 + sx) as i32;
    let iy4 = (y2 + sy) as i32;

    if ix1 == ix2 {
        ix2 += 1;
    }
    if ix3 == ix4 {
        ix4 += 1;
    }

    // A two-pixel stroke collapses its component edges onto each other;
    // nudge one pair apart instead.
    let (iy1, iy2, iy3, iy4, ix1, ix2) = if line_width == 2.0 {
        if dy.abs() < dx.abs() {
            if x1 < x2 {
                (iy1, iy2, iy1 + 2, iy2 + 2, ix1, ix2)
            } else {
                (iy3 + 2, iy4 + 2, iy3, iy4, ix1, ix2)
            }
        } else {
            (iy1, iy2, iy3, iy4, ix3 + 2, ix4 + 2)
        }
    } else {
        (iy1, iy2, iy3, iy4, ix1, ix2)
    };

    let mut starty = iy1.min(iy2).min(iy3.min(iy4));
    let mut endy = iy1.max(iy2).max(iy3.max(iy4));

    if starty < 0 {
        starty = -1;
    }
    if endy >= height {
        endy = height + 1;
    }

    // Per-call scratch for the interior extrema, sized to this buffer.
    let mut left_edge_x = vec![0i32; height as usize];
    let mut right_edge_x = vec![0i32; height as usize];
    for y in (starty + 1)..(endy - 1) {
        left_edge_x[y as usize] = -1 << 16;
        right_edge_x[y as usize] = 1 << 15;
    }

    let mut edges: ArrayVec<EdgeSegment, 4> = ArrayVec::new();
    edges.push(EdgeSegment {
        x1: ix1,
        y1: iy1,
        x2: ix2,
        y2: iy2,
        min_edge: sy > 0.0,
        left_edge: false,
    });
    edges.push(EdgeSegment {
        x1: ix3,
        y1: iy3,
        x2: ix4,
        y2: iy4,
        min_edge: sy < 0.0,
        left_edge: true,
    });
    if line_width > 1.0 {
        edges.push(EdgeSegment {
            x1: ix1,
            y1: iy1,
            x2: ix3,
            y2: iy3,
            min_edge: true,
            left_edge: sy > 0.0,
        });
        edges.push(EdgeSegment {
            x1: ix2,
            y1: iy2,
            x2: ix4,
            y2: iy4,
            min_edge: false,
            left_edge: sy < 0.0,
        });
    }

    for e in &edges {
        aa_line_q1(
            width,
            height,
            &mut ctx.buffer,
            e.x1,
            e.y1,
            e.x2,
            e.y2,
            color,
            e.min_edge,
            e.left_edge,
            &mut left_edge_x,
            &mut right_edge_x,
        );
    }

    if x1 < x2 {
        if iy2 >= 0 && iy2 < height {
            right_edge_x[iy2 as usize] = ix2.min(right_edge_x[iy2 as usize]);
        }
        if iy3 >= 0 && iy3 < height {
            left_edge_x[iy3 as usize] = ix3.max(left_edge_x[iy3 as usize]);
        }
    } else {
        if iy1 >= 0 && iy1 < height {
            right_edge_x[iy1 as usize] = ix1.min(right_edge_x[iy1 as usize]);
        }
        if iy4 >= 0 && iy4 < height {
            left_edge_x[iy4 as usize] = ix4.max(left_edge_x[iy4 as usize]);
        }
    }

    // Fill the interior between the tracked extrema.
    for y in (starty + 1)..(endy - 1) {
        let left = left_edge_x[y as usize].max(0);
        let right = right_edge_x[y as usize].min(width - 1);

        for x in left..=right {
            blend_solid(&mut ctx.buffer, x, y);
        }
    }
}

/// The Gupta-Sproull antialiased line core.
pub(crate) fn draw_line_aa_raw(
    ctx: &mut BitmapContext<'_>,
    mut x1: i32,
    mut y1: i32,
    mut x2: i32,
    mut y2: i32,
    color: u32,
    clip: Option<Rect>,
) {
    // A degenerate line would overflow the inverse denominator.
    if x1 == x2 && y1 == y2 {
        return;
    }

    let pixel_width = ctx.width();
    let pixel_height = ctx.height();

    let viewport = clip.or_else(|| {
        Rect::from_xywh(0.0, 0.0, pixel_width as f64, pixel_height as f64)
    });
    let viewport = match viewport {
        Some(r) => r,
        None => return,
    };
    if !clip_line_i32(&viewport, &mut x1, &mut y1, &mut x2, &mut y2) {
        return;
    }

    if x1 < 1 {
        x1 = 1;
    }
    if x1 > pixel_width - 2 {
        x1 = pixel_width - 2;
    }
    if y1 < 1 {
        y1 = 1;
    }
    if y1 > pixel_height - 2 {
        y1 = pixel_height - 2;
    }

    if x2 < 1 {
        x2 = 1;
    }
    if x2 > pixel_width - 2 {
        x2 = pixel_width - 2;
    }
    if y2 < 1 {
        y2 = 1;
    }
    if y2 > pixel_height - 2 {
        y2 = pixel_height - 2;
    }

    let mut addr = y1 * pixel_width + x1;
    let dx = x2 - x1;
    let dy = y2 - y1;

    // Extract color.
    let a = ((color >> 24) & 0xFF) as i32;
    let srb = color & 0x00FF_00FF;
    let sg = (color >> 8) & 0xFF;

    // By switching to (u,v) we combine all eight octants.
    let adx = dx.abs();
    let ady = dy.abs();

    let (du, dv, mut u, uincr, vincr) = if adx > ady {
        let mut uincr = 1;
        let mut vincr = pixel_width;
        if dx < 0 {
            uincr = -uincr;
        }
        if dy < 0 {
            vincr = -vincr;
        }
        (adx, ady, x2, uincr, vincr)
    } else {
        let mut uincr = pixel_width;
        let mut vincr = 1;
        if dy < 0 {
            uincr = -uincr;
        }
        if dx < 0 {
            vincr = -vincr;
        }
        (ady, adx, y2, uincr, vincr)
    };

    let uend = u + du;
    let mut d = (dv << 1) - du; // initial value as in Bresenham's
    let incr_s = dv << 1; // delta d for straight increments
    let incr_d = (dv - du) << 1; // delta d for diagonal increments

    let inv_d_float = 1.0 / (4.0 * ((du * du + dv * dv) as f64).sqrt()); // precomputed inverse denominator
    let inv_d2du_float = 0.75 - 2.0 * (du as f64 * inv_d_float); // precomputed constant

    const PRECISION_SHIFT: i32 = 10; // maps distances to a 0..1 fixed-point range
    const PRECISION_MULTIPLIER: f64 = (1 << PRECISION_SHIFT) as f64;
    let inv_d = (inv_d_float * PRECISION_MULTIPLIER) as i32;
    let inv_d2du = (inv_d2du_float * PRECISION_MULTIPLIER * a as f64) as i32;
    let zero_dot75 = (0.75 * PRECISION_MULTIPLIER * a as f64) as i32;

    let inv_d_mul_alpha = inv_d * a;
    let du_mul_inv_d = du * inv_d_mul_alpha;
    let mut d_mul_inv_d = d * inv_d_mul_alpha;
    let mut twovdu_mul_inv_d = 0; // numerator of the distance, starts at 0
    let incr_s_mul_inv_d = incr_s * inv_d_mul_alpha;
    let incr_d_mul_inv_d = incr_d * inv_d_mul_alpha;

    loop {
        alpha_blend_premul_rb(
            &mut ctx.buffer,
            addr,
            (zero_dot75 - twovdu_mul_inv_d) >> PRECISION_SHIFT,
            srb,
            sg,
        );
        alpha_blend_premul_rb(
            &mut ctx.buffer,
            addr + vincr,
            (inv_d2du + twovdu_mul_inv_d) >> PRECISION_SHIFT,
            srb,
            sg,
        );
        alpha_blend_premul_rb(
            &mut ctx.buffer,
            addr - vincr,
            (inv_d2du - twovdu_mul_inv_d) >> PRECISION_SHIFT,
            srb,
            sg,
        );

        if d < 0 {
            // Choose straight (u direction).
            twovdu_mul_inv_d = d_mul_inv_d + du_mul_inv_d;
            d += incr_s;
            d_mul_inv_d += incr_s_mul_inv_d;
        } else {
            // Choose diagonal (u+v direction).
            twovdu_mul_inv_d = d_mul_inv_d - du_mul_inv_d;
            d += incr_d;
            d_mul_inv_d += incr_d_mul_inv_d;
            addr += vincr;
        }
        u += 1;
        addr += uincr;

        if u > uend {
            break;
        }
    }
}
