// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Cubic Bezier splines and Cardinal splines, flattened into point lists
//! with a step size adapted to the curve's bounding box and reduced to the
//! line drawer (outlines) or the polygon filler (fills).

use crate::blend::BlendMode;
use crate::color::Color;
use crate::context::BitmapContext;
use crate::line::draw_line_raw;

/// Flattening step scale; the step is `STEP_FACTOR / max(bb_w, bb_h)`.
const STEP_FACTOR: f32 = 2.0;

/// Flattens a cubic Bezier into interleaved `x, y` pairs.
///
/// An empty bounding box yields no points.
fn compute_bezier_points(
    x1: i32,
    y1: i32,
    cx1: i32,
    cy1: i32,
    cx2: i32,
    cy2: i32,
    x2: i32,
    y2: i32,
) -> Vec<i32> {
    // The bounding rect of the control points gives the optimal step size.
    let min_x = x1.min(cx1).min(cx2).min(x2);
    let min_y = y1.min(cy1).min(cy2).min(y2);
    let max_x = x1.max(cx1).max(cx2).max(x2);
    let max_y = y1.max(cy1).max(cy2).max(y2);

    let len = (max_y - min_y).max(max_x - min_x);

    let mut list = Vec::new();
    // Prevent division by zero.
    if len != 0 {
        let step = STEP_FACTOR / len as f32;

        let mut t = 0.0f32;
        while t <= 1.0 {
            let t_sq = t * t;
            let t1 = 1.0 - t;
            let t1_sq = t1 * t1;

            let tx = (t1 * t1_sq * x1 as f32
                + 3.0 * t * t1_sq * cx1 as f32
                + 3.0 * t1 * t_sq * cx2 as f32
                + t * t_sq * x2 as f32) as i32;
            let ty = (t1 * t1_sq * y1 as f32
                + 3.0 * t * t1_sq * cy1 as f32
                + 3.0 * t1 * t_sq * cy2 as f32
                + t * t_sq * y2 as f32) as i32;

            list.push(tx);
            list.push(ty);

            t += step;
        }

        // Prevent a rounding gap at the endpoint.
        list.push(x2);
        list.push(y2);
    }
    list
}

/// Flattens one Cardinal spline segment defined by four control points.
fn compute_segment_points(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    x3: i32,
    y3: i32,
    x4: i32,
    y4: i32,
    tension: f32,
) -> Vec<i32> {
    let min_x = x1.min(x2).min(x3).min(x4);
    let min_y = y1.min(y2).min(y3).min(y4);
    let max_x = x1.max(x2).max(x3).max(x4);
    let max_y = y1.max(y2).max(y3).max(y4);

    let len = (max_y - min_y).max(max_x - min_x);

    let mut list = Vec::new();
    // Prevent division by zero.
    if len != 0 {
        let step = STEP_FACTOR / len as f32;

        let sx1 = tension * (x3 - x1) as f32;
        let sy1 = tension * (y3 - y1) as f32;
        let sx2 = tension * (x4 - x2) as f32;
        let sy2 = tension * (y4 - y2) as f32;
        let ax = sx1 + sx2 + (2 * x2 - 2 * x3) as f32;
        let ay = sy1 + sy2 + (2 * y2 - 2 * y3) as f32;
        let bx = -2.0 * sx1 - sx2 + (-3 * x2 + 3 * x3) as f32;
        let by = -2.0 * sy1 - sy2 + (-3 * y2 + 3 * y3) as f32;

        let mut t = 0.0f32;
        while t <= 1.0 {
            let t_sq = t * t;

            let tx = (ax * t_sq * t + bx * t_sq + sx1 * t + x2 as f32) as i32;
            let ty = (ay * t_sq * t + by * t_sq + sy1 * t + y2 as f32) as i32;

            list.push(tx);
            list.push(ty);

            t += step;
        }

        // Prevent a rounding gap at the endpoint.
        list.push(x3);
        list.push(y3);
    }
    list
}

/// Draws one Cardinal spline segment as flattened line segments.
fn draw_curve_segment(
    ctx: &mut BitmapContext<'_>,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    x3: i32,
    y3: i32,
    x4: i32,
    y4: i32,
    tension: f32,
    color: u32,
) {
    let points = compute_segment_points(x1, y1, x2, y2, x3, y3, x4, y4, tension);
    if points.is_empty() {
        return;
    }

    let mut tx1 = x2;
    let mut ty1 = y2;
    let mut i = 0;
    while i + 1 < points.len() {
        let tx2 = points[i];
        let ty2 = points[i + 1];
        draw_line_raw(ctx, tx1, ty1, tx2, ty2, color, None);
        tx1 = tx2;
        ty1 = ty2;
        i += 2;
    }
}

impl BitmapContext<'_> {
    /// Draws a cubic Bezier spline defined by start, end and two control
    /// points.
    pub fn draw_bezier(
        &mut self,
        x1: i32,
        y1: i32,
        cx1: i32,
        cy1: i32,
        cx2: i32,
        cy2: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) {
        let color = color.premultiply().get();
        self.draw_bezier_raw(x1, y1, cx1, cy1, cx2, cy2, x2, y2, color);
    }

    fn draw_bezier_raw(
        &mut self,
        x1: i32,
        y1: i32,
        cx1: i32,
        cy1: i32,
        cx2: i32,
        cy2: i32,
        x2: i32,
        y2: i32,
        color: u32,
    ) {
        let points = compute_bezier_points(x1, y1, cx1, cy1, cx2, cy2, x2, y2);
        if points.is_empty() {
            return;
        }

        let mut tx1 = x1;
        let mut ty1 = y1;
        let mut i = 0;
        while i + 1 < points.len() {
            let tx2 = points[i];
            let ty2 = points[i + 1];
            draw_line_raw(self, tx1, ty1, tx2, ty2, color, None);
            tx1 = tx2;
            ty1 = ty2;
            i += 2;
        }
    }

    /// Draws a series of cubic Bezier splines; the end point of each curve
    /// is the start point of the next.
    ///
    /// The slice is interpreted as
    /// `(x1, y1, cx1, cy1, cx2, cy2, x2, y2, cx3, cy3, ..., xn, yn)`.
    pub fn draw_beziers(&mut self, points: &[i32], color: Color) {
        if points.len() < 8 {
            return;
        }
        let color = color.premultiply().get();

        let mut x1 = points[0];
        let mut y1 = points[1];

        let mut i = 2;
        while i + 5 < points.len() {
            let x2 = points[i + 4];
            let y2 = points[i + 5];
            self.draw_bezier_raw(
                x1,
                y1,
                points[i],
                points[i + 1],
                points[i + 2],
                points[i + 3],
                x2,
                y2,
                color,
            );
            x1 = x2;
            y1 = y2;
            i += 6;
        }
    }

    /// Fills the region outlined by a series of cubic Bezier splines.
    ///
    /// The curve chain is flattened into a single polygon and handed to the
    /// scanline filler.
    pub fn fill_beziers(&mut self, points: &[i32], color: Color, mode: Option<BlendMode>) {
        if points.len() < 8 {
            return;
        }

        let mut x1 = points[0];
        let mut y1 = points[1];
        let mut list = Vec::new();

        let mut i = 2;
        while i + 5 < points.len() {
            let x2 = points[i + 4];
            let y2 = points[i + 5];
            list.extend(compute_bezier_points(
                x1,
                y1,
                points[i],
                points[i + 1],
                points[i + 2],
                points[i + 3],
                x2,
                y2,
            ));
            x1 = x2;
            y1 = y2;
            i += 6;
        }

        self.fill_polygon(&list, color, mode);
    }

    /// Draws a Cardinal spline through the given points.
    ///
    /// `tension` controls the shape, usually within `0..=1`; 0 is a
    /// straight polyline.
    pub fn draw_curve(&mut self, points: &[i32], tension: f32, color: Color) {
        if points.len() < 6 {
            return;
        }
        let color = color.premultiply().get();

        // First segment doubles the first point.
        draw_curve_segment(
            self, points[0], points[1], points[0], points[1], points[2], points[3], points[4],
            points[5], tension, color,
        );

        // Middle segments.
        let mut i = 2;
        while i + 5 < points.len() {
            draw_curve_segment(
                self,
                points[i - 2],
                points[i - 1],
                points[i],
                points[i + 1],
                points[i + 2],
                points[i + 3],
                points[i + 4],
                points[i + 5],
                tension,
                color,
            );
            i += 2;
        }

        // Last segment doubles the last point.
        draw_curve_segment(
            self,
            points[i - 2],
            points[i - 1],
            points[i],
            points[i + 1],
            points[i + 2],
            points[i + 3],
            points[i + 2],
            points[i + 3],
            tension,
            color,
        );
    }

    /// Draws a closed Cardinal spline through the given points.
    pub fn draw_curve_closed(&mut self, points: &[i32], tension: f32, color: Color) {
        if points.len() < 6 {
            return;
        }
        let color = color.premultiply().get();
        let pn = points.len();

        // First segment wraps around to the last point.
        draw_curve_segment(
            self,
            points[pn - 2],
            points[pn - 1],
            points[0],
            points[1],
            points[2],
            points[3],
            points[4],
            points[5],
            tension,
            color,
        );

        // Middle segments.
        let mut i = 2;
        while i + 5 < pn {
            draw_curve_segment(
                self,
                points[i - 2],
                points[i - 1],
                points[i],
                points[i + 1],
                points[i + 2],
                points[i + 3],
                points[i + 4],
                points[i + 5],
                tension,
                color,
            );
            i += 2;
        }

        // Last segment.
        draw_curve_segment(
            self,
            points[i - 2],
            points[i - 1],
            points[i],
            points[i + 1],
            points[i + 2],
            points[i + 3],
            points[0],
            points[1],
            tension,
            color,
        );

        // Last-to-first segment.
        draw_curve_segment(
            self,
            points[i],
            points[i + 1],
            points[i + 2],
            points[i + 3],
            points[0],
            points[1],
            points[2],
            points[3],
            tension,
            color,
        );
    }

    /// Fills the region outlined by a Cardinal spline through the given
    /// points.
    pub fn fill_curve(&mut self, points: &[i32], tension: f32, color: Color, mode: Option<BlendMode>) {
        if points.len() < 6 {
            return;
        }

        // First segment doubles the first point.
        let mut list = compute_segment_points(
            points[0], points[1], points[0], points[1], points[2], points[3], points[4], points[5],
            tension,
        );

        // Middle segments.
        let mut i = 2;
        while i + 5 < points.len() {
            list.extend(compute_segment_points(
                points[i - 2],
                points[i - 1],
                points[i],
                points[i + 1],
                points[i + 2],
                points[i + 3],
                points[i + 4],
                points[i + 5],
                tension,
            ));
            i += 2;
        }

        // Last segment doubles the last point.
        list.extend(compute_segment_points(
            points[i - 2],
            points[i - 1],
            points[i],
            points[i + 1],
            points[i + 2],
            points[i + 3],
            points[i + 2],
            points[i + 3],
            tension,
        ));

        self.fill_polygon(&list, color, mode);
    }

    /// Fills the region outlined by a closed Cardinal spline through the
    /// given points.
    pub fn fill_curve_closed(
        &mut self,
        points: &[i32],
        tension: f32,
        color: Color,
        mode: Option<BlendMode>,
    ) {
        if points.len() < 6 {
            return;
        }
        let pn = points.len();

        // First segment wraps around to the last point.
        let mut list = compute_segment_points(
            points[pn - 2],
            points[pn - 1],
            points[0],
            points[1],
            points[2],
            points[3],
            points[4],
            points[5],
            tension,
        );

        // Middle segments.
        let mut i = 2;
        while i + 5 < pn {
            list.extend(compute_segment_points(
                points[i - 2],
                points[i - 1],
                points[i],
                points[i + 1],
                points[i + 2],
                points[i + 3],
                points[i + 4],
                points[i + 5],
                tension,
            ));
            i += 2;
        }

        // Last segment.
        list.extend(compute_segment_points(
            points[i - 2],
            points[i - 1],
            points[i],
            points[i + 1],
            points[i + 2],
            points[i + 3],
            points[0],
            points[1],
            tension,
        ));

        // Last-to-first segment.
        list.extend(compute_segment_points(
            points[i],
            points[i + 1],
            points[i + 2],
            points[i + 3],
            points[0],
            points[1],
            points[2],
            points[3],
            tension,
        ));

        self.fill_polygon(&list, color, mode);
    }
}
