// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Wu's antialiased line: coverage is split between the two pixels
//! straddling the ideal line, weighted by a 16-bit error accumulator.

use crate::blend::alpha_blend;
use crate::clipper::clip_line_i32;
use crate::color::Color;
use crate::context::BitmapContext;
use crate::geom::Rect;

const INTENSITY_BITS: u16 = 8;
// Number of bits by which to shift the error accumulator to get an
// intensity level.
const INTENSITY_SHIFT: u16 = 16 - INTENSITY_BITS;
// Mask used to compute the complement of a weight by XOR.
const WEIGHT_COMPLEMENT_MASK: u16 = (1 << INTENSITY_BITS) - 1;

impl BitmapContext<'_> {
    /// Draws an antialiased, alpha blended line using Wu's algorithm.
    ///
    /// Horizontal, vertical and 45-degree lines run through the center of
    /// every pixel and are drawn without weighting.
    pub fn draw_line_wu(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        clip: Option<Rect>,
    ) {
        let c = color.premultiply();
        draw_line_wu_raw(
            self,
            x1,
            y1,
            x2,
            y2,
            c.alpha() as i32,
            c.red() as i32,
            c.green() as i32,
            c.blue() as i32,
            clip,
        );
    }
}

/// The Wu core over premultiplied source components.
pub(crate) fn draw_line_wu_raw(
    ctx: &mut BitmapContext<'_>,
    mut x1: i32,
    mut y1: i32,
    mut x2: i32,
    mut y2: i32,
    sa: i32,
    sr: i32,
    sg: i32,
    sb: i32,
    clip: Option<Rect>,
) {
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

    // Ensure the line runs from top to bottom.
    if y1 > y2 {
        core::mem::swap(&mut x1, &mut x2);
        core::mem::swap(&mut y1, &mut y2);
    }

    let blend_at = |ctx: &mut BitmapContext<'_>, index: i32, a: i32, r: i32, g: i32, b: i32| {
        let dest = ctx.buffer.get(index);
        ctx.buffer.set(index, alpha_blend(a, r, g, b, dest));
    };

    // The initial pixel is always exactly intersected by the line, so it
    // gets full intensity.
    blend_at(ctx, y1 * pixel_width + x1, sa, sr, sg, sb);

    let mut delta_x = (x2 - x1) as i16;
    let x_dir: i32;
    if delta_x >= 0 {
        x_dir = 1;
    } else {
        x_dir = -1;
        delta_x = -delta_x;
    }

    // Horizontal, vertical and diagonal lines need no weighting; handling
    // them here also avoids a division by zero below.
    let mut delta_y = (y2 - y1) as i16;
    if delta_y == 0 {
        // Horizontal line.
        for _ in 0..delta_x {
            x1 += x_dir;
            blend_at(ctx, y1 * pixel_width + x1, sa, sr, sg, sb);
        }
        return;
    }

    if delta_x == 0 {
        // Vertical line.
        loop {
            y1 += 1;
            blend_at(ctx, y1 * pixel_width + x1, sa, sr, sg, sb);
            delta_y -= 1;
            if delta_y == 0 {
                break;
            }
        }
        return;
    }

    if delta_x == delta_y {
        // Diagonal line.
        loop {
            x1 += x_dir;
            y1 += 1;
            blend_at(ctx, y1 * pixel_width + x1, sa, sr, sg, sb);
            delta_y -= 1;
            if delta_y == 0 {
                break;
            }
        }
        return;
    }

    let mut error_acc: u16 = 0;

    if delta_y > delta_x {
        // Y-major line. The 16-bit fixed-point fraction of a pixel that X
        // advances per unit of Y, truncated so the endpoint is never
        // overrun along X.
        let error_adj = (((delta_x as u64) << 16) / (delta_y as u64)) as u16;

        // All pixels other than the first and last.
        delta_y -= 1;
        while delta_y != 0 {
            let error_acc_temp = error_acc;
            error_acc = error_acc.wrapping_add(error_adj);
            if error_acc <= error_acc_temp {
                // The error accumulator turned over, advance the X coord.
                x1 += x_dir;
            }
            y1 += 1; // Y-major, so always advance Y.

            // The top bits of the accumulator weight this pixel; the
            // complement weights its pair.
            let weighting = error_acc >> INTENSITY_SHIFT;

            let weight = (weighting ^ WEIGHT_COMPLEMENT_MASK) as i32;
            blend_at(
                ctx,
                y1 * pixel_width + x1,
                sa,
                (sr * weight) >> 8,
                (sg * weight) >> 8,
                (sb * weight) >> 8,
            );

            let weight = weighting as i32;
            blend_at(
                ctx,
                y1 * pixel_width + x1 + x_dir,
                sa,
                (sr * weight) >> 8,
                (sg * weight) >> 8,
                (sb * weight) >> 8,
            );

            delta_y -= 1;
        }

        // The final pixel is exactly intersected by the line.
        blend_at(ctx, y2 * pixel_width + x2, sa, sr, sg, sb);
        return;
    }

    // X-major line; the fraction of a pixel that Y advances per unit of X.
    let error_adj = (((delta_y as u64) << 16) / (delta_x as u64)) as u16;

    // All pixels other than the first and last.
    delta_x -= 1;
    while delta_x != 0 {
        let error_acc_temp = error_acc;
        error_acc = error_acc.wrapping_add(error_adj);
        if error_acc <= error_acc_temp {
            // The error accumulator turned over, advance the Y coord.
            y1 += 1;
        }
        x1 += x_dir; // X-major, so always advance X.

        let weighting = error_acc >> INTENSITY_SHIFT;

        let weight = (weighting ^ WEIGHT_COMPLEMENT_MASK) as i32;
        blend_at(
            ctx,
            y1 * pixel_width + x1,
            sa,
            (sr * weight) >> 8,
            (sg * weight) >> 8,
            (sb * weight) >> 8,
        );

        let weight = weighting as i32;
        blend_at(
            ctx,
            (y1 + 1) * pixel_width + x1,
            sa,
            (sr * weight) >> 8,
            (sg * weight) >> 8,
            (sb * weight) >> 8,
        );

        delta_x -= 1;
    }

    // The final pixel is exactly intersected by the line.
    blend_at(ctx, y2 * pixel_width + x2, sa, sr, sg, sb);
}
