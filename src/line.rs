// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Non-antialiased line strategies: exact Bresenham, float DDA, the default
//! fixed-point DDA, dotted lines and pen-stamped lines.

use crate::blit::blit_alpha;
use crate::clipper::clip_line_i32;
use crate::color::Color;
use crate::context::BitmapContext;
use crate::geom::Rect;

/// Clip bounds as half-open integer ranges, defaulting to the whole buffer.
pub(crate) fn clip_bounds(w: i32, h: i32, clip: Option<Rect>) -> (i32, i32, i32, i32) {
    match clip {
        Some(c) => (
            c.x() as i32,
            (c.x() + c.width()) as i32,
            c.y() as i32,
            (c.y() + c.height()) as i32,
        ),
        None => (0, w, 0, h),
    }
}

impl BitmapContext<'_> {
    /// Draws a line between two points using the classic Bresenham algorithm.
    ///
    /// Walks one unit along the dominant axis per step, so the line visits
    /// exactly `max(|dx|, |dy|) + 1` pixels, both endpoints included.
    pub fn draw_line_bresenham(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        clip: Option<Rect>,
    ) {
        let color = color.premultiply().get();
        let w = self.width();
        let h = self.height();
        let (clip_x1, clip_x2, clip_y1, clip_y2) = clip_bounds(w, h, clip);

        let mut dx = x2 - x1;
        let mut dy = y2 - y1;

        let mut incx = 0;
        if dx < 0 {
            dx = -dx;
            incx = -1;
        } else if dx > 0 {
            incx = 1;
        }

        let mut incy = 0;
        if dy < 0 {
            dy = -dy;
            incy = -1;
        } else if dy > 0 {
            incy = 1;
        }

        // Which gradient is larger.
        let (pdx, pdy, odx, ody, es, el) = if dx > dy {
            (incx, 0, incx, incy, dy, dx)
        } else {
            (0, incy, incx, incy, dx, dy)
        };

        let mut x = x1;
        let mut y = y1;
        let mut error = el >> 1;
        if y < clip_y2 && y >= clip_y1 && x < clip_x2 && x >= clip_x1 {
            self.buffer.set(y * w + x, color);
        }

        // Walk the line!
        for _ in 0..el {
            error -= es;

            if error < 0 {
                error += el;
                x += odx;
                y += ody;
            } else {
                x += pdx;
                y += pdy;
            }

            if y < clip_y2 && y >= clip_y1 && x < clip_x2 && x >= clip_x1 {
                self.buffer.set(y * w + x, color);
            }
        }
    }

    /// Draws a line between two points using a floating-point DDA
    /// (Digital Differential Analyzer).
    pub fn draw_line_dda(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        clip: Option<Rect>,
    ) {
        let color = color.premultiply().get();
        let w = self.width();
        let h = self.height();
        let (clip_x1, clip_x2, clip_y1, clip_y2) = clip_bounds(w, h, clip);

        let dx = x2 - x1;
        let dy = y2 - y1;

        // Dominant axis length.
        let len = dy.abs().max(dx.abs());

        // A zero-length line is a no-op.
        if len == 0 {
            return;
        }

        let incx = dx as f32 / len as f32;
        let incy = dy as f32 / len as f32;
        let mut x = x1 as f32;
        let mut y = y1 as f32;

        for _ in 0..len {
            if y < clip_y2 as f32
                && y >= clip_y1 as f32
                && x < clip_x2 as f32
                && x >= clip_x1 as f32
            {
                self.buffer.set(y as i32 * w + x as i32, color);
            }
            x += incx;
            y += incy;
        }
    }

    /// Draws a line between two points using an optimized fixed-point DDA.
    ///
    /// This is the default line drawer: the line is clipped analytically to
    /// the buffer along its dominant axis up front, then walked with an
    /// 8-bit-fraction accumulator with no per-pixel clipping.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        clip: Option<Rect>,
    ) {
        let color = color.premultiply().get();
        draw_line_raw(self, x1, y1, x2, y2, color, clip);
    }

    /// Draws a dotted line with `dot_length` pixels on and `dot_space`
    /// pixels off.
    ///
    /// Horizontal and vertical lines step indices directly; other slopes
    /// evaluate a point-slope line per column after clipping.
    pub fn draw_line_dotted(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        dot_space: i32,
        dot_length: i32,
        color: Color,
    ) {
        if dot_space < 1 || dot_length < 1 {
            return;
        }
        let color = color.premultiply().get();

        if x1 == x2 {
            let (y1, y2) = if y2 < y1 { (y2, y1) } else { (y1, y2) };
            self.draw_dotted_vertically(x1, y1, y2, dot_space, dot_length, color);
        } else if y1 == y2 {
            let (x1, x2) = if x2 < x1 { (x2, x1) } else { (x1, x2) };
            self.draw_dotted_horizontally(x1, x2, y1, dot_space, dot_length, color);
        } else {
            self.draw_dotted(x1, y1, x2, y2, dot_space, dot_length, color);
        }
    }

    fn draw_dotted_vertically(
        &mut self,
        x: i32,
        y1: i32,
        y2: i32,
        dot_space: i32,
        dot_length: i32,
        color: u32,
    ) {
        let width = self.width();
        let height = self.height();

        if x < 0 || x > width {
            return;
        }

        let mut on = true;
        let mut space_cnt = 0;
        for i in y1..=y2 {
            if i < 1 {
                continue;
            }
            if i >= height {
                break;
            }

            if on {
                self.buffer.set((i - 1) * width + x, color);
                on = i % dot_length != 0;
                space_cnt = 0;
            } else {
                space_cnt += 1;
                on = space_cnt % dot_space == 0;
            }
        }
    }

    fn draw_dotted_horizontally(
        &mut self,
        x1: i32,
        x2: i32,
        y: i32,
        dot_space: i32,
        dot_length: i32,
        color: u32,
    ) {
        let width = self.width();
        let height = self.height();

        if y < 0 || y > height {
            return;
        }

        let mut on = true;
        let mut space_cnt = 0;
        for i in x1..=x2 {
            if i < 1 {
                continue;
            }
            if i >= width {
                break;
            }
            if y >= height {
                break;
            }

            if on {
                self.buffer.set(y * width + i - 1, color);
                on = i % dot_length != 0;
                space_cnt = 0;
            } else {
                space_cnt += 1;
                on = space_cnt % dot_space == 0;
            }
        }
    }

    fn draw_dotted(
        &mut self,
        mut x1: i32,
        mut y1: i32,
        mut x2: i32,
        mut y2: i32,
        dot_space: i32,
        dot_length: i32,
        color: u32,
    ) {
        let width = self.width();
        let height = self.height();

        let viewport = match Rect::from_xywh(0.0, 0.0, width as f64, height as f64) {
            Some(r) => r,
            None => return,
        };
        if !clip_line_i32(&viewport, &mut x1, &mut y1, &mut x2, &mut y2) {
            return;
        }

        // Always draw from left to right.
        if x2 < x1 {
            core::mem::swap(&mut x1, &mut x2);
            core::mem::swap(&mut y1, &mut y2);
        }

        // y = m * x + n
        let m = (y2 - y1) as f32 / (x2 - x1) as f32;
        let n = y1 as f32 - m * x1 as f32;

        let mut on = true;
        let mut space_cnt = 0;
        for i in x1..=width {
            if i == 0 {
                continue;
            }
            let y = (m * i as f32 + n) as i32;
            if y <= 0 {
                continue;
            }
            if y >= height || i >= x2 {
                continue;
            }
            if on {
                self.buffer.set((y - 1) * width + i - 1, color);
                space_cnt = 0;
                on = i % dot_length != 0;
            } else {
                space_cnt += 1;
                on = space_cnt % dot_space == 0;
            }
        }
    }

    /// Draws a line by stamping a square pen surface at every step of a
    /// Bresenham walk.
    pub fn draw_line_penned(
        &mut self,
        mut x1: i32,
        mut y1: i32,
        mut x2: i32,
        mut y2: i32,
        pen: &BitmapContext<'_>,
        clip: Option<Rect>,
    ) {
        let w = self.width();
        let h = self.height();

        // Lines fully out of vertical bounds disappear instead of clipping
        // to the border.
        if (y1 < 0 && y2 < 0) || (y1 > h && y2 > h) {
            return;
        }

        if x1 == x2 && y1 == y2 {
            return;
        }

        let viewport = clip.or_else(|| Rect::from_xywh(0.0, 0.0, w as f64, h as f64));
        let viewport = match viewport {
            Some(r) => r,
            None => return,
        };
        if !clip_line_i32(&viewport, &mut x1, &mut y1, &mut x2, &mut y2) {
            return;
        }

        let size = pen.width();
        let src_rect = match Rect::from_xywh(0.0, 0.0, size as f64, size as f64) {
            Some(r) => r,
            None => return,
        };

        let mut dx = x2 - x1;
        let mut dy = y2 - y1;

        let mut incx = 0;
        if dx < 0 {
            dx = -dx;
            incx = -1;
        } else if dx > 0 {
            incx = 1;
        }

        let mut incy = 0;
        if dy < 0 {
            dy = -dy;
            incy = -1;
        } else if dy > 0 {
            incy = 1;
        }

        let (pdx, pdy, odx, ody, es, el) = if dx > dy {
            (incx, 0, incx, incy, dy, dx)
        } else {
            (0, incy, incx, incy, dx, dy)
        };

        let mut x = x1;
        let mut y = y1;
        let mut error = el >> 1;

        if y < h && y >= 0 && x < w && x >= 0 {
            if let Some(dest_rect) = Rect::from_xywh(x as f64, y as f64, size as f64, size as f64) {
                blit_alpha(&mut self.buffer, w, h, &dest_rect, &pen.buffer, &src_rect, size);
            }
        }

        for _ in 0..el {
            error -= es;

            if error < 0 {
                error += el;
                x += odx;
                y += ody;
            } else {
                x += pdx;
                y += pdy;
            }

            if y < h && y >= 0 && x < w && x >= 0 {
                if let Some(dest_rect) =
                    Rect::from_xywh(x as f64, y as f64, size as f64, size as f64)
                {
                    blit_alpha(&mut self.buffer, w, h, &dest_rect, &pen.buffer, &src_rect, size);
                }
            }
        }
    }
}

/// The fixed-point DDA core, shared by [`BitmapContext::draw_line`] and the
/// shape outlines.
pub(crate) fn draw_line_raw(
    ctx: &mut BitmapContext<'_>,
    mut x1: i32,
    mut y1: i32,
    mut x2: i32,
    mut y2: i32,
    color: u32,
    clip: Option<Rect>,
) {
    let pixel_width = ctx.width();
    let pixel_height = ctx.height();
    let (clip_x1, clip_x2, clip_y1, clip_y2) = clip_bounds(pixel_width, pixel_height, clip);

    let viewport = match Rect::from_xywh(
        clip_x1 as f64,
        clip_y1 as f64,
        (clip_x2 - clip_x1) as f64,
        (clip_y2 - clip_y1) as f64,
    ) {
        Some(r) => r,
        None => return,
    };
    if !clip_line_i32(&viewport, &mut x1, &mut y1, &mut x2, &mut y2) {
        return;
    }

    let dx = x2 - x1;
    let dy = y2 - y1;

    const PRECISION_SHIFT: i32 = 8;

    let len_x = dx.abs();
    let len_y = dy.abs();

    if len_x > len_y {
        // x increases by +/- 1
        if dx < 0 {
            core::mem::swap(&mut x1, &mut x2);
            core::mem::swap(&mut y1, &mut y2);
        }

        let incy = (dy << PRECISION_SHIFT) / dx;

        let mut y1s = y1 << PRECISION_SHIFT;
        let mut y2s = y2 << PRECISION_SHIFT;
        let hs = pixel_height << PRECISION_SHIFT;

        if y1 < y2 {
            if y1 >= clip_y2 || y2 < clip_y1 {
                return;
            }
            if y1s < 0 {
                if incy == 0 {
                    return;
                }
                let oldy1s = y1s;
                // Find the lowest y1s that is greater or equal than 0.
                y1s = incy - 1 + ((y1s + 1) % incy);
                x1 += (y1s - oldy1s) / incy;
            }
            if y2s >= hs {
                if incy != 0 {
                    // Find the highest y2s that is less or equal than hs - 1.
                    // y2s = y1s + n * incy. Find n.
                    y2s = hs - 1 - (hs - 1 - y1s) % incy;
                    x2 = x1 + (y2s - y1s) / incy;
                }
            }
        } else {
            if y2 >= clip_y2 || y1 < clip_y1 {
                return;
            }
            if y1s >= hs {
                if incy == 0 {
                    return;
                }
                let oldy1s = y1s;
                // Find the highest y1s that is less or equal than hs - 1.
                // y1s = oldy1s + n * incy. Find n.
                y1s = hs - 1 + (incy - (hs - 1 - oldy1s) % incy);
                x1 += (y1s - oldy1s) / incy;
            }
            if y2s < 0 {
                if incy != 0 {
                    // Find the lowest y2s that is greater or equal than 0.
                    // y2s = y1s + n * incy. Find n.
                    y2s = y1s % incy;
                    x2 = x1 + (y2s - y1s) / incy;
                }
            }
        }

        if x1 < 0 {
            y1s -= incy * x1;
            x1 = 0;
        }
        if x2 >= pixel_width {
            x2 = pixel_width - 1;
        }

        let mut ys = y1s;

        // Walk the line!
        let mut y = ys >> PRECISION_SHIFT;
        let mut previous_y = y;
        let mut index = x1 + y * pixel_width;
        let k = if incy < 0 {
            1 - pixel_width
        } else {
            1 + pixel_width
        };
        for _x in x1..=x2 {
            ctx.buffer.set(index, color);
            ys += incy;
            y = ys >> PRECISION_SHIFT;
            if y != previous_y {
                previous_y = y;
                index += k;
            } else {
                index += 1;
            }
        }
    } else {
        // Prevent division by zero.
        if len_y == 0 {
            return;
        }
        if dy < 0 {
            core::mem::swap(&mut x1, &mut x2);
            core::mem::swap(&mut y1, &mut y2);
        }

        let mut x1s = x1 << PRECISION_SHIFT;
        let mut x2s = x2 << PRECISION_SHIFT;
        let ws = pixel_width << PRECISION_SHIFT;

        let incx = (dx << PRECISION_SHIFT) / dy;

        if x1 < x2 {
            if x1 >= clip_x2 || x2 < clip_x1 {
                return;
            }
            if x1s < 0 {
                if incx == 0 {
                    return;
                }
                let oldx1s = x1s;
                // Find the lowest x1s that is greater or equal than 0.
                x1s = incx - 1 + ((x1s + 1) % incx);
                y1 += (x1s - oldx1s) / incx;
            }
            if x2s >= ws {
                if incx != 0 {
                    // Find the highest x2s that is less or equal than ws - 1.
                    // x2s = x1s + n * incx. Find n.
                    x2s = ws - 1 - (ws - 1 - x1s) % incx;
                    y2 = y1 + (x2s - x1s) / incx;
                }
            }
        } else {
            if x2 >= clip_x2 || x1 < clip_x1 {
                return;
            }
            if x1s >= ws {
                if incx == 0 {
                    return;
                }
                let oldx1s = x1s;
                // Find the highest x1s that is less or equal than ws - 1.
                // x1s = oldx1s + n * incx. Find n.
                x1s = ws - 1 + (incx - (ws - 1 - oldx1s) % incx);
                y1 += (x1s - oldx1s) / incx;
            }
            if x2s < 0 {
                if incx != 0 {
                    // Find the lowest x2s that is greater or equal than 0.
                    // x2s = x1s + n * incx. Find n.
                    x2s = x1s % incx;
                    y2 = y1 + (x2s - x1s) / incx;
                }
            }
        }

        if y1 < 0 {
            x1s -= incx * y1;
            y1 = 0;
        }
        if y2 >= pixel_height {
            y2 = pixel_height - 1;
        }

        let mut index = x1s;
        let index_base = y1 * pixel_width;

        // Walk the line!
        let inc = (pixel_width << PRECISION_SHIFT) + incx;
        for _y in y1..=y2 {
            ctx.buffer.set(index_base + (index >> PRECISION_SHIFT), color);
            index += inc;
        }
    }
}
