// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A bounds-checked view over a locked pixel buffer.
//!
//! All drawing primitives address pixels through this view. Out-of-range
//! reads return transparent black and out-of-range writes are dropped, so a
//! stray index can never touch memory outside the surface. Hot loops that
//! have already clamped their coordinates may opt into the unchecked path.

#![allow(unsafe_code)]

use crate::surface::SurfaceData;

/// A view over the pixel cells of a locked surface.
///
/// The pointer and length are captured from the host once, at lock time, and
/// are valid for as long as the owning [`BitmapContext`](crate::BitmapContext)
/// scope is alive.
pub struct PixelBuffer {
    ptr: *mut u32,
    width: i32,
    height: i32,
    len: i32,
}

impl PixelBuffer {
    pub(crate) fn from_data(data: &SurfaceData) -> Self {
        let len = data.width * data.height;
        debug_assert!(len >= 0);
        PixelBuffer {
            ptr: data.pixels,
            width: data.width,
            height: data.height,
            len,
        }
    }

    /// Returns buffer's width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns buffer's height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the total number of pixel cells.
    #[inline]
    pub fn len(&self) -> i32 {
        self.len
    }

    /// Checks that the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the pixel cell at `index`.
    ///
    /// Returns transparent black when `index` is out of range.
    #[inline]
    pub fn get(&self, index: i32) -> u32 {
        if index < 0 || index >= self.len {
            return 0;
        }
        // SAFETY: `index` is within the validated length.
        unsafe { *self.ptr.offset(index as isize) }
    }

    /// Writes the pixel cell at `index`.
    ///
    /// Out-of-range writes are dropped.
    #[inline]
    pub fn set(&mut self, index: i32, pixel: u32) {
        if index < 0 || index >= self.len {
            return;
        }
        // SAFETY: `index` is within the validated length.
        unsafe { *self.ptr.offset(index as isize) = pixel }
    }

    /// Reads the pixel cell at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be in `0..len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: i32) -> u32 {
        debug_assert!(index >= 0 && index < self.len);
        *self.ptr.offset(index as isize)
    }

    /// Writes the pixel cell at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be in `0..len()`.
    #[inline]
    pub unsafe fn set_unchecked(&mut self, index: i32, pixel: u32) {
        debug_assert!(index >= 0 && index < self.len);
        *self.ptr.offset(index as isize) = pixel;
    }

    /// Fills `count` consecutive cells starting at `start`.
    ///
    /// The span is clamped to the buffer.
    pub fn fill_span(&mut self, start: i32, count: i32, pixel: u32) {
        let (start, count) = match self.clamp_span(start, count) {
            Some(v) => v,
            None => return,
        };

        for i in 0..count {
            // SAFETY: the span was clamped above.
            unsafe { *self.ptr.offset((start + i) as isize) = pixel }
        }
    }

    /// Zero-fills the whole buffer.
    pub fn clear(&mut self) {
        // SAFETY: the pointer covers exactly `len` cells.
        unsafe { core::ptr::write_bytes(self.ptr, 0, self.len as usize) }
    }

    /// Copies `count` cells from `src_start` to `dst_start` within the buffer.
    ///
    /// Overlapping ranges are handled; the copy is clamped to the buffer.
    pub fn copy_within(&mut self, src_start: i32, dst_start: i32, count: i32) {
        let (src_start, count) = match self.clamp_span(src_start, count) {
            Some(v) => v,
            None => return,
        };
        let (dst_start, count) = match self.clamp_span(dst_start, count) {
            Some(v) => v,
            None => return,
        };

        // SAFETY: both spans were clamped above.
        unsafe {
            core::ptr::copy(
                self.ptr.offset(src_start as isize),
                self.ptr.offset(dst_start as isize),
                count as usize,
            );
        }
    }

    /// Copies `count` cells from `src` into this buffer.
    ///
    /// The copy is clamped to both buffers.
    pub fn copy_from(&mut self, src: &PixelBuffer, src_start: i32, dst_start: i32, count: i32) {
        let (src_start, count) = match src.clamp_span(src_start, count) {
            Some(v) => v,
            None => return,
        };
        let (dst_start, count) = match self.clamp_span(dst_start, count) {
            Some(v) => v,
            None => return,
        };

        // SAFETY: both spans were clamped above; distinct buffers may still
        // alias when two contexts share a surface, so a memmove is used.
        unsafe {
            core::ptr::copy(
                src.ptr.offset(src_start as isize),
                self.ptr.offset(dst_start as isize),
                count as usize,
            );
        }
    }

    fn clamp_span(&self, start: i32, count: i32) -> Option<(i32, i32)> {
        if count <= 0 || start >= self.len {
            return None;
        }

        let (start, count) = if start < 0 {
            (0, count + start)
        } else {
            (start, count)
        };

        let count = count.min(self.len - start);
        if count <= 0 {
            None
        } else {
            Some((start, count))
        }
    }
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
