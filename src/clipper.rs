// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Cohen-Sutherland line clipping against a rectangular viewport.
//!
//! Every line drawing entry point clips through this module before
//! rasterizing, so the rasterizers themselves never see coordinates far
//! outside the buffer.

use crate::geom::Rect;

const INSIDE: u8 = 0; // 0000
const LEFT: u8 = 1; // 0001
const RIGHT: u8 = 2; // 0010
const BOTTOM: u8 = 4; // 0100
const TOP: u8 = 8; // 1000

/// Computes the region code for a point relative to the clip rectangle.
fn compute_out_code(extents: &Rect, x: f64, y: f64) -> u8 {
    let mut code = INSIDE;

    if x < extents.left() {
        code |= LEFT;
    } else if x > extents.right() {
        code |= RIGHT;
    }
    if y > extents.bottom() {
        code |= BOTTOM;
    } else if y < extents.top() {
        code |= TOP;
    }

    code
}

/// Clips the line from `(x0, y0)` to `(x1, y1)` against `extents`.
///
/// Returns `false` when the line lies entirely outside the rectangle;
/// otherwise the coordinates are replaced by the clipped segment.
pub(crate) fn clip_line(
    extents: &Rect,
    x0: &mut f64,
    y0: &mut f64,
    x1: &mut f64,
    y1: &mut f64,
) -> bool {
    let mut outcode0 = compute_out_code(extents, *x0, *y0);
    let mut outcode1 = compute_out_code(extents, *x1, *y1);

    if outcode0 == INSIDE && outcode1 == INSIDE {
        return true;
    }

    let mut is_valid = false;

    loop {
        if (outcode0 | outcode1) == 0 {
            // Trivially accept.
            is_valid = true;
            break;
        } else if (outcode0 & outcode1) != 0 {
            // Trivially reject.
            break;
        } else {
            // At least one endpoint is outside; move it to the nearest
            // intersection with a violated edge and try again.
            let outcode_out = if outcode0 != 0 { outcode0 } else { outcode1 };

            let (x, y) = if (outcode_out & TOP) != 0 {
                (
                    *x0 + (*x1 - *x0) * (extents.top() - *y0) / (*y1 - *y0),
                    extents.top(),
                )
            } else if (outcode_out & BOTTOM) != 0 {
                (
                    *x0 + (*x1 - *x0) * (extents.bottom() - *y0) / (*y1 - *y0),
                    extents.bottom(),
                )
            } else if (outcode_out & RIGHT) != 0 {
                (
                    extents.right(),
                    *y0 + (*y1 - *y0) * (extents.right() - *x0) / (*x1 - *x0),
                )
            } else if (outcode_out & LEFT) != 0 {
                (
                    extents.left(),
                    *y0 + (*y1 - *y0) * (extents.left() - *x0) / (*x1 - *x0),
                )
            } else {
                (f64::NAN, f64::NAN)
            };

            if outcode_out == outcode0 {
                *x0 = x;
                *y0 = y;
                outcode0 = compute_out_code(extents, *x0, *y0);
            } else {
                *x1 = x;
                *y1 = y;
                outcode1 = compute_out_code(extents, *x1, *y1);
            }
        }
    }

    is_valid
}

/// Integer entry point; coordinates are truncated after clipping.
pub(crate) fn clip_line_i32(
    extents: &Rect,
    xi0: &mut i32,
    yi0: &mut i32,
    xi1: &mut i32,
    yi1: &mut i32,
) -> bool {
    let mut x0 = *xi0 as f64;
    let mut y0 = *yi0 as f64;
    let mut x1 = *xi1 as f64;
    let mut y1 = *yi1 as f64;

    let is_valid = clip_line(extents, &mut x0, &mut y0, &mut x1, &mut y1);

    *xi0 = x0 as i32;
    *yi0 = y0 as i32;
    *xi1 = x1 as i32;
    *yi1 = y1 as i32;

    is_valid
}

/// Float entry point.
///
/// Infinite coordinates are clamped to the representable integer range first,
/// which keeps the intersection math from producing NaN.
pub(crate) fn clip_line_f32(
    extents: &Rect,
    xi0: &mut f32,
    yi0: &mut f32,
    xi1: &mut f32,
    yi1: &mut f32,
) -> bool {
    let mut x0 = clip_to_int(*xi0) as f64;
    let mut y0 = clip_to_int(*yi0) as f64;
    let mut x1 = clip_to_int(*xi1) as f64;
    let mut y1 = clip_to_int(*yi1) as f64;

    let is_valid = clip_line(extents, &mut x0, &mut y0, &mut x1, &mut y1);

    *xi0 = x0 as f32;
    *yi0 = y0 as f32;
    *xi1 = x1 as f32;
    *yi1 = y1 as f32;

    is_valid
}

fn clip_to_int(d: f32) -> f32 {
    if d > i32::MAX as f32 {
        return i32::MAX as f32;
    }
    if d < i32::MIN as f32 {
        return i32::MIN as f32;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(w: f64, h: f64) -> Rect {
        Rect::from_xywh(0.0, 0.0, w, h).unwrap()
    }

    #[test]
    fn inside_is_accepted_unchanged() {
        let r = viewport(100.0, 100.0);
        let (mut x0, mut y0, mut x1, mut y1) = (10.0, 10.0, 90.0, 90.0);
        assert!(clip_line(&r, &mut x0, &mut y0, &mut x1, &mut y1));
        assert_eq!((x0, y0, x1, y1), (10.0, 10.0, 90.0, 90.0));
    }

    #[test]
    fn outside_is_rejected() {
        let r = viewport(100.0, 100.0);
        let (mut x0, mut y0, mut x1, mut y1) = (-50.0, -10.0, -1.0, -20.0);
        assert!(!clip_line(&r, &mut x0, &mut y0, &mut x1, &mut y1));
    }

    #[test]
    fn crossing_line_is_clipped() {
        let r = viewport(100.0, 100.0);
        let (mut x0, mut y0, mut x1, mut y1) = (-50.0, 50.0, 150.0, 50.0);
        assert!(clip_line(&r, &mut x0, &mut y0, &mut x1, &mut y1));
        assert_eq!((x0, y0), (0.0, 50.0));
        assert_eq!((x1, y1), (100.0, 50.0));
    }

    #[test]
    fn infinite_input_is_clamped() {
        let r = viewport(100.0, 100.0);
        let (mut x0, mut y0, mut x1, mut y1) = (f32::NEG_INFINITY, 50.0, f32::INFINITY, 50.0);
        assert!(clip_line_f32(&r, &mut x0, &mut y0, &mut x1, &mut y1));
        assert!(x0.is_finite() && x1.is_finite());
        assert_eq!((x0, y0), (0.0, 50.0));
        assert_eq!((x1, y1), (100.0, 50.0));
    }

    #[test]
    fn out_codes() {
        let r = viewport(10.0, 10.0);
        assert_eq!(compute_out_code(&r, -1.0, 5.0), LEFT);
        assert_eq!(compute_out_code(&r, 11.0, 5.0), RIGHT);
        assert_eq!(compute_out_code(&r, 5.0, 11.0), BOTTOM);
        assert_eq!(compute_out_code(&r, 5.0, -1.0), TOP);
        assert_eq!(compute_out_code(&r, -1.0, -1.0), LEFT | TOP);
        assert_eq!(compute_out_code(&r, 5.0, 5.0), INSIDE);
    }
}
