// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Rectangles, triangles, quads and polylines. Outlines are composed from
//! the default line drawer; fills go through the blend engine.

use crate::blend::{blend, BlendMode};
use crate::color::Color;
use crate::context::BitmapContext;
use crate::geom::Rect;
use crate::line::draw_line_raw;

impl BitmapContext<'_> {
    /// Draws a rectangle outline.
    ///
    /// `x2` has to be greater than `x1` and `y2` greater than `y1`.
    pub fn draw_rectangle(&mut self, mut x1: i32, mut y1: i32, mut x2: i32, mut y2: i32, color: Color) {
        let color = color.premultiply().get();
        let w = self.width();
        let h = self.height();

        // Check boundaries.
        if (x1 < 0 && x2 < 0) || (y1 < 0 && y2 < 0) || (x1 >= w && x2 >= w) || (y1 >= h && y2 >= h)
        {
            return;
        }

        // Clamp boundaries.
        if x1 < 0 {
            x1 = 0;
        }
        if y1 < 0 {
            y1 = 0;
        }
        if x2 < 0 {
            x2 = 0;
        }
        if y2 < 0 {
            y2 = 0;
        }
        if x1 >= w {
            x1 = w - 1;
        }
        if y1 >= h {
            y1 = h - 1;
        }
        if x2 >= w {
            x2 = w - 1;
        }
        if y2 >= h {
            y2 = h - 1;
        }

        let start_y = y1 * w;
        let end_y = y2 * w;

        let mut offset2 = end_y + x1;
        let end_offset = start_y + x2;
        let start_y_plus_x1 = start_y + x1;

        // Top and bottom horizontal scanlines.
        for x in start_y_plus_x1..=end_offset {
            self.buffer.set(x, color);
            self.buffer.set(offset2, color);
            offset2 += 1;
        }

        // offset2 == end_y + x2 now.

        // Left and right vertical scanlines.
        let mut end_offset = start_y_plus_x1 + w;
        offset2 -= w;

        let mut y = start_y + x2 + w;
        while y <= offset2 {
            self.buffer.set(y, color);
            self.buffer.set(end_offset, color);
            end_offset += w;
            y += w;
        }
    }

    /// Fills the rectangle `[x1, x2) x [y1, y2)`.
    ///
    /// `x2` has to be greater than `x1` and `y2` greater than `y1`; both
    /// upper bounds are exclusive. `mode = None` writes the raw color.
    pub fn fill_rectangle(
        &mut self,
        mut x1: i32,
        mut y1: i32,
        mut x2: i32,
        mut y2: i32,
        color: Color,
        mode: Option<BlendMode>,
    ) {
        let w = self.width();
        let h = self.height();

        let c = color.premultiply();
        let col = c.get();
        let sa = c.alpha() as i32;
        let sr = c.red() as i32;
        let sg = c.green() as i32;
        let sb = c.blue() as i32;

        // Check boundaries.
        if (x1 < 0 && x2 < 0) || (y1 < 0 && y2 < 0) || (x1 >= w && x2 >= w) || (y1 >= h && y2 >= h)
        {
            return;
        }

        // Clamp boundaries.
        if x1 < 0 {
            x1 = 0;
        }
        if y1 < 0 {
            y1 = 0;
        }
        if x2 < 0 {
            x2 = 0;
        }
        if y2 < 0 {
            y2 = 0;
        }
        if x1 > w {
            x1 = w;
        }
        if y1 > h {
            y1 = h;
        }
        if x2 > w {
            x2 = w;
        }
        if y2 > h {
            y2 = h;
        }

        if y1 > y2 {
            core::mem::swap(&mut y1, &mut y2);
        }

        if x2 <= x1 {
            return;
        }

        let len = x2 - x1;

        let fill_row = |buffer: &mut crate::pixel_buffer::PixelBuffer, row: i32| match mode {
            None => buffer.fill_span(row, len, col),
            Some(m) => {
                for i in 0..len {
                    let idx = row + i;
                    let dest = buffer.get(idx);
                    buffer.set(idx, blend(m, dest, sa, sr, sg, sb));
                }
            }
        };

        // The first line is painted even when the rect is one row tall;
        // the remaining rows stop short of the exclusive lower bound.
        fill_row(&mut self.buffer, y1 * w + x1);
        for y in (y1 + 1)..y2 {
            fill_row(&mut self.buffer, y * w + x1);
        }
    }

    /// Draws a triangle outline.
    pub fn draw_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Color,
    ) {
        let color = color.premultiply().get();
        draw_line_raw(self, x1, y1, x2, y2, color, None);
        draw_line_raw(self, x2, y2, x3, y3, color, None);
        draw_line_raw(self, x3, y3, x1, y1, color, None);
    }

    /// Fills a triangle.
    pub fn fill_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Color,
        mode: Option<BlendMode>,
    ) {
        self.fill_polygon(&[x1, y1, x2, y2, x3, y3, x1, y1], color, mode);
    }

    /// Draws a quad outline.
    pub fn draw_quad(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        x4: i32,
        y4: i32,
        color: Color,
    ) {
        let color = color.premultiply().get();
        draw_line_raw(self, x1, y1, x2, y2, color, None);
        draw_line_raw(self, x2, y2, x3, y3, color, None);
        draw_line_raw(self, x3, y3, x4, y4, color, None);
        draw_line_raw(self, x4, y4, x1, y1, color, None);
    }

    /// Fills a quad.
    pub fn fill_quad(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        x4: i32,
        y4: i32,
        color: Color,
        mode: Option<BlendMode>,
    ) {
        self.fill_polygon(&[x1, y1, x2, y2, x3, y3, x4, y4, x1, y1], color, mode);
    }

    /// Draws a polyline from interleaved `x, y` coordinate pairs.
    ///
    /// Add the first point also at the end of the slice if the outline
    /// should be closed.
    pub fn draw_polyline(&mut self, points: &[i32], color: Color) {
        let color = color.premultiply().get();
        if points.len() < 4 {
            return;
        }

        let mut x1 = points[0];
        let mut y1 = points[1];

        let mut i = 2;
        while i + 1 < points.len() {
            let x2 = points[i];
            let y2 = points[i + 1];

            draw_line_raw(self, x1, y1, x2, y2, color, None);
            x1 = x2;
            y1 = y2;
            i += 2;
        }
    }

    /// Draws an antialiased polyline with the given stroke width.
    pub fn draw_polyline_aa_width(&mut self, points: &[i32], stroke_width: f32, color: Color) {
        if points.len() < 4 {
            return;
        }

        let mut x1 = points[0];
        let mut y1 = points[1];

        let mut i = 2;
        while i + 1 < points.len() {
            let x2 = points[i];
            let y2 = points[i + 1];

            self.draw_line_aa_width(
                x1 as f32, y1 as f32, x2 as f32, y2 as f32, stroke_width, color, None,
            );
            x1 = x2;
            y1 = y2;
            i += 2;
        }
    }

    /// Draws a one-pixel antialiased polyline.
    pub fn draw_polyline_aa(&mut self, points: &[i32], color: Color) {
        if points.len() < 4 {
            return;
        }

        let mut x1 = points[0];
        let mut y1 = points[1];

        let mut i = 2;
        while i + 1 < points.len() {
            let x2 = points[i];
            let y2 = points[i + 1];

            self.draw_line_aa(x1, y1, x2, y2, color, None);
            x1 = x2;
            y1 = y2;
            i += 2;
        }
    }

    /// Fills the whole clip rectangle with `color`, blending per pixel.
    ///
    /// A convenience wrapper over [`fill_rectangle`](Self::fill_rectangle)
    /// for region fills expressed as a [`Rect`].
    pub fn fill_rect(&mut self, rect: &Rect, color: Color, mode: Option<BlendMode>) {
        self.fill_rectangle(
            rect.x() as i32,
            rect.y() as i32,
            (rect.x() + rect.width()) as i32,
            (rect.y() + rect.height()) as i32,
            color,
            mode,
        );
    }
}
