// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::geom::{Point, Rect};

/// An affine transformation matrix.
///
/// Stores scale, skew and translation; used by the affine blit to map
/// destination pixels back into the source.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub sx: f64,
    pub kx: f64,
    pub ky: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            sx: 1.0,
            kx: 0.0,
            ky: 0.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

impl Transform {
    /// Creates an identity transform.
    pub fn identity() -> Self {
        Transform::default()
    }

    /// Creates a new `Transform`.
    ///
    /// We are using column-major-column-vector matrix notation, therefore
    /// it's ky-kx, not kx-ky.
    pub fn from_row(sx: f64, ky: f64, kx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Transform { sx, ky, kx, sy, tx, ty }
    }

    /// Creates a new translating `Transform`.
    pub fn from_translate(tx: f64, ty: f64) -> Self {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a new scaling `Transform`.
    pub fn from_scale(sx: f64, sy: f64) -> Self {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a new rotating `Transform`, with the angle in degrees.
    pub fn from_rotate(angle: f64) -> Self {
        let v = angle.to_radians();
        let a = v.cos();
        let b = v.sin();
        let c = -b;
        let d = a;
        Transform::from_row(a, b, c, d, 0.0, 0.0)
    }

    /// Creates a new rotating `Transform` at the specified position.
    pub fn from_rotate_at(angle: f64, tx: f64, ty: f64) -> Self {
        let mut ts = Transform::from_translate(tx, ty);
        ts = ts.pre_concat(Transform::from_rotate(angle));
        ts.pre_concat(Transform::from_translate(-tx, -ty))
    }

    /// Checks that the transform is identity.
    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }

    /// Pre-concatenates `other` to the transform.
    #[must_use]
    pub fn pre_concat(&self, other: Transform) -> Self {
        concat(*self, other)
    }

    /// Post-concatenates `other` to the transform.
    #[must_use]
    pub fn post_concat(&self, other: Transform) -> Self {
        concat(other, *self)
    }

    /// Maps a point through the transform.
    pub fn map_point(&self, p: Point) -> Point {
        Point::from_xy(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }

    /// Returns the axis-aligned bounding box of the transformed rect.
    pub fn map_rect_bounds(&self, rect: &Rect) -> Option<Rect> {
        let corners = [
            self.map_point(Point::from_xy(rect.left(), rect.top())),
            self.map_point(Point::from_xy(rect.right(), rect.top())),
            self.map_point(Point::from_xy(rect.right(), rect.bottom())),
            self.map_point(Point::from_xy(rect.left(), rect.bottom())),
        ];

        let mut min_x = corners[0].x;
        let mut min_y = corners[0].y;
        let mut max_x = corners[0].x;
        let mut max_y = corners[0].y;
        for p in &corners[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns the inverted transform.
    ///
    /// Returns `None` when the transform is degenerate.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.sx * self.sy - self.kx * self.ky;
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Transform::from_row(
            self.sy * inv_det,
            -self.ky * inv_det,
            -self.kx * inv_det,
            self.sx * inv_det,
            (self.kx * self.ty - self.sy * self.tx) * inv_det,
            (self.ky * self.tx - self.sx * self.ty) * inv_det,
        ))
    }
}

fn concat(a: Transform, b: Transform) -> Transform {
    Transform::from_row(
        a.sx * b.sx + a.kx * b.ky,
        a.ky * b.sx + a.sy * b.ky,
        a.sx * b.kx + a.kx * b.sy,
        a.ky * b.kx + a.sy * b.sy,
        a.sx * b.tx + a.kx * b.ty + a.tx,
        a.ky * b.tx + a.sy * b.ty + a.ty,
    )
}
