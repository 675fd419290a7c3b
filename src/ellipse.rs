// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Midpoint ellipse stroke and fill, after Kennedy's fast Bresenham-type
//! algorithm. Two octant-symmetric arcs are tracked; the fill paints
//! horizontal spans per scanline instead of border points.

use crate::blend::{blend, BlendMode};
use crate::color::Color;
use crate::context::BitmapContext;

impl BitmapContext<'_> {
    /// Draws an ellipse outline inscribed in the given bounding rectangle.
    ///
    /// `x2` has to be greater than `x1` and `y2` greater than `y1`.
    pub fn draw_ellipse(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let xr = (x2 - x1) >> 1;
        let yr = (y2 - y1) >> 1;
        let xc = x1 + xr;
        let yc = y1 + yr;
        self.draw_ellipse_centered(xc, yc, xr, yr, color);
    }

    /// Draws an ellipse outline from its center and radii.
    pub fn draw_ellipse_centered(&mut self, xc: i32, yc: i32, xr: i32, yr: i32, color: Color) {
        let color = color.premultiply().get();
        let w = self.width();
        let h = self.height();

        // A zero radius would loop forever.
        if xr < 1 || yr < 1 {
            return;
        }

        let mut x = xr;
        let mut y = 0;
        let xr_sq_two = (xr * xr) << 1;
        let yr_sq_two = (yr * yr) << 1;
        let mut x_chg = yr * yr * (1 - (xr << 1));
        let mut y_chg = xr * xr;
        let mut err = 0;
        let mut x_stopping = yr_sq_two * xr;
        let mut y_stopping = 0;

        // First set of arcs, counter clockwise where the tangent slope > -1.
        while x_stopping >= y_stopping {
            let uy = yc + y; // Upper half
            let ly = yc - y; // Lower half

            let rx = xc + x;
            let lx = xc - x;

            if 0 <= uy && uy < h {
                let uh = uy * w;
                if 0 <= rx && rx < w {
                    self.buffer.set(rx + uh, color); // Quadrant I
                }
                if 0 <= lx && lx < w {
                    self.buffer.set(lx + uh, color); // Quadrant II
                }
            }

            if 0 <= ly && ly < h {
                let lh = ly * w;
                if 0 <= lx && lx < w {
                    self.buffer.set(lx + lh, color); // Quadrant III
                }
                if 0 <= rx && rx < w {
                    self.buffer.set(rx + lh, color); // Quadrant IV
                }
            }

            y += 1;
            y_stopping += xr_sq_two;
            err += y_chg;
            y_chg += xr_sq_two;
            if (x_chg + (err << 1)) > 0 {
                x -= 1;
                x_stopping -= yr_sq_two;
                err += x_chg;
                x_chg += yr_sq_two;
            }
        }

        // Second set of arcs, clockwise where the tangent slope < -1.
        x = 0;
        y = yr;
        let mut uy = yc + y;
        let mut ly = yc - y;
        let mut uh = uy * w;
        let mut lh = ly * w;
        x_chg = yr * yr;
        y_chg = xr * xr * (1 - (yr << 1));
        err = 0;
        x_stopping = 0;
        y_stopping = xr_sq_two * yr;

        while x_stopping <= y_stopping {
            let rx = xc + x;
            if 0 <= rx && rx < w {
                if 0 <= uy && uy < h {
                    self.buffer.set(rx + uh, color); // Quadrant I
                }
                if 0 <= ly && ly < h {
                    self.buffer.set(rx + lh, color); // Quadrant IV
                }
            }

            let lx = xc - x;
            if 0 <= lx && lx < w {
                if 0 <= uy && uy < h {
                    self.buffer.set(lx + uh, color); // Quadrant II
                }
                if 0 <= ly && ly < h {
                    self.buffer.set(lx + lh, color); // Quadrant III
                }
            }

            x += 1;
            x_stopping += yr_sq_two;
            err += x_chg;
            x_chg += yr_sq_two;
            if (y_chg + (err << 1)) > 0 {
                y -= 1;
                uy = yc + y;
                ly = yc - y;
                uh = uy * w;
                lh = ly * w;
                y_stopping -= xr_sq_two;
                err += y_chg;
                y_chg += xr_sq_two;
            }
        }
    }

    /// Fills an ellipse inscribed in the given bounding rectangle.
    ///
    /// `x2` has to be greater than `x1` and `y2` greater than `y1`.
    /// `mode = None` writes the raw color, which is noticeably faster than
    /// blending.
    pub fn fill_ellipse(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        mode: Option<BlendMode>,
    ) {
        let xr = (x2 - x1) >> 1;
        let yr = (y2 - y1) >> 1;
        let xc = x1 + xr;
        let yc = y1 + yr;
        self.fill_ellipse_centered(xc, yc, xr, yr, color, mode);
    }

    /// Fills an ellipse from its center and radii.
    ///
    /// Paints a horizontal span per scanline per arc pair; the blend mode is
    /// applied per span when one is requested.
    pub fn fill_ellipse_centered(
        &mut self,
        xc: i32,
        yc: i32,
        xr: i32,
        yr: i32,
        color: Color,
        mode: Option<BlendMode>,
    ) {
        let w = self.width();
        let h = self.height();

        // A zero radius would loop forever.
        if xr < 1 || yr < 1 {
            return;
        }

        // Skip completely outside objects.
        if xc - xr >= w || xc + xr < 0 || yc - yr >= h || yc + yr < 0 {
            return;
        }

        let c = color.premultiply();
        let col = c.get();
        let sa = c.alpha() as i32;
        let sr = c.red() as i32;
        let sg = c.green() as i32;
        let sb = c.blue() as i32;

        let mut x = xr;
        let mut y = 0;
        let xr_sq_two = (xr * xr) << 1;
        let yr_sq_two = (yr * yr) << 1;
        let mut x_chg = yr * yr * (1 - (xr << 1));
        let mut y_chg = xr * xr;
        let mut err = 0;
        let mut x_stopping = yr_sq_two * xr;
        let mut y_stopping = 0;

        let fill_spans = |buffer: &mut crate::pixel_buffer::PixelBuffer,
                              uy: i32,
                              ly: i32,
                              lx: i32,
                              rx: i32| {
            // Clip the spans to the buffer.
            let uy = uy.clamp(0, h - 1);
            let ly = ly.clamp(0, h - 1);
            let rx = rx.clamp(0, w - 1);
            let lx = lx.clamp(0, w - 1);

            let uh = uy * w;
            let lh = ly * w;

            match mode {
                None => {
                    buffer.fill_span(lx + uh, rx - lx + 1, col);
                    buffer.fill_span(lx + lh, rx - lx + 1, col);
                }
                Some(m) => {
                    for i in lx..=rx {
                        let dest = buffer.get(i + uh);
                        buffer.set(i + uh, blend(m, dest, sa, sr, sg, sb));

                        let dest = buffer.get(i + lh);
                        buffer.set(i + lh, blend(m, dest, sa, sr, sg, sb));
                    }
                }
            }
        };

        // First set of arcs, counter clockwise where the tangent slope > -1.
        while x_stopping >= y_stopping {
            // Upper and lower half spans, drawn in one pass.
            let uy = yc + y;
            let ly = yc - y - 1;
            fill_spans(&mut self.buffer, uy, ly, xc - x, xc + x);

            y += 1;
            y_stopping += xr_sq_two;
            err += y_chg;
            y_chg += xr_sq_two;
            if (x_chg + (err << 1)) > 0 {
                x -= 1;
                x_stopping -= yr_sq_two;
                err += x_chg;
                x_chg += yr_sq_two;
            }
        }

        // Second set of arcs, clockwise where the tangent slope < -1.
        x = 0;
        y = yr;
        let mut uy = yc + y;
        let mut ly = yc - y;
        x_chg = yr * yr;
        y_chg = xr * xr * (1 - (yr << 1));
        err = 0;
        x_stopping = 0;
        y_stopping = xr_sq_two * yr;

        while x_stopping <= y_stopping {
            fill_spans(&mut self.buffer, uy, ly, xc - x, xc + x);

            x += 1;
            x_stopping += yr_sq_two;
            err += x_chg;
            x_chg += yr_sq_two;
            if (y_chg + (err << 1)) > 0 {
                y -= 1;
                uy = yc + y;
                ly = yc - y;
                y_stopping -= xr_sq_two;
                err += y_chg;
                y_chg += xr_sq_two;
            }
        }
    }
}
