// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::geom::IntRect;
use crate::BYTES_PER_PIXEL;

/// The pixel format of a host surface.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PixelFormat {
    /// 32-bit premultiplied ARGB. The only format the rasterizer accepts.
    PremultipliedArgb32,
    /// Any other host format.
    Unsupported,
}

/// The raw description of a locked surface, as reported by the host.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceData {
    /// Pointer to the first pixel cell.
    pub pixels: *mut u32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Bytes per scanline.
    pub stride: i32,
    /// The pixel format.
    pub format: PixelFormat,
}

// SAFETY: `SurfaceData` is a plain descriptor. The pointer is only
// dereferenced through a `BitmapContext`, and concurrent access to the same
// surface from multiple threads is outside the crate's contract (callers must
// serialize it). Moving the descriptor between threads, which is all the
// registry does, is harmless.
#[allow(unsafe_code)]
unsafe impl Send for SurfaceData {}

/// Errors produced while acquiring surface access.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SurfaceError {
    /// The host surface is not 32-bit premultiplied ARGB.
    UnsupportedFormat,
    /// The host surface stride does not equal `width * 4`.
    ///
    /// Scanlines are indexed by width, so padded strides cannot be addressed.
    UnsupportedStride,
    /// The host reported negative dimensions, or a pixel count beyond the
    /// 32-bit indexing range.
    InvalidGeometry,
}

impl core::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SurfaceError::UnsupportedFormat => {
                write!(f, "surface is not 32-bit premultiplied ARGB")
            }
            SurfaceError::UnsupportedStride => {
                write!(f, "surface stride does not match its width")
            }
            SurfaceError::InvalidGeometry => {
                write!(f, "surface dimensions are out of range")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A host-owned pixel surface.
///
/// The crate never allocates or frees surface storage. It borrows access to it
/// for the lifetime of a [`BitmapContext`](crate::BitmapContext) scope:
/// `lock` is called once by the outermost scope, `mark_dirty` and `unlock`
/// once when that scope ends.
///
/// The surface must not be resized while locked. Implementations are expected
/// to fail hard on lock/unlock imbalance rather than mask it.
pub trait Surface {
    /// Locks the surface and returns the pixel storage description.
    fn lock(&self) -> SurfaceData;

    /// Unlocks the surface.
    fn unlock(&self);

    /// Notifies the host that `region` has changed and must be re-rendered.
    fn mark_dirty(&self, region: IntRect);
}

/// An in-memory [`Surface`] backed by an owned pixel vector.
///
/// This is the reference host implementation, used by tests and by the
/// filter/transform operations that allocate their results.
pub struct MemorySurface {
    data: UnsafeCell<Vec<u32>>,
    width: i32,
    height: i32,
    locked: AtomicBool,
    dirty: Mutex<Option<IntRect>>,
}

// SAFETY: the pixel vector is only mutated between `lock`/`unlock` pairs, and
// concurrent mutation of a single surface is explicitly outside the crate's
// contract. All bookkeeping fields are themselves thread-safe.
#[allow(unsafe_code)]
unsafe impl Sync for MemorySurface {}

impl MemorySurface {
    /// Allocates a new surface filled with transparent black.
    ///
    /// Zero or negative sizes are an error. Width is limited by `i32::MAX / 4`.
    pub fn new(width: i32, height: i32) -> Option<Self> {
        let len = data_len(width, height)?;
        Some(MemorySurface::from_vec(vec![0; len], width, height))
    }

    /// Creates a surface from existing pixel cells.
    ///
    /// `pixels.len()` must be exactly `width * height`.
    pub fn from_pixels(pixels: Vec<u32>, width: i32, height: i32) -> Option<Self> {
        let len = data_len(width, height)?;
        if pixels.len() != len {
            return None;
        }

        Some(MemorySurface::from_vec(pixels, width, height))
    }

    pub(crate) fn from_vec(pixels: Vec<u32>, width: i32, height: i32) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        MemorySurface {
            data: UnsafeCell::new(pixels),
            width,
            height,
            locked: AtomicBool::new(false),
            dirty: Mutex::new(None),
        }
    }

    /// Returns surface's width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns surface's height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the pixel cells.
    ///
    /// Must not be called while the surface is locked for writing.
    pub fn pixels(&self) -> &[u32] {
        debug_assert!(!self.locked.load(Ordering::Acquire));
        // SAFETY: no `BitmapContext` is alive (asserted above), so nothing
        // aliases the storage.
        #[allow(unsafe_code)]
        let pixels = unsafe { (*self.data.get()).as_slice() };
        pixels
    }

    /// Returns the mutable pixel cells.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        self.data.get_mut().as_mut_slice()
    }

    /// Returns the pixel data as bytes.
    ///
    /// Byteorder: platform-endian ARGB cells.
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels())
    }

    /// Consumes the surface and returns the pixel cells.
    pub fn take(self) -> Vec<u32> {
        self.data.into_inner()
    }

    /// Returns and clears the most recent dirty region notification.
    pub fn take_dirty(&self) -> Option<IntRect> {
        self.dirty.lock().unwrap().take()
    }
}

impl Surface for MemorySurface {
    fn lock(&self) -> SurfaceData {
        let was_locked = self.locked.swap(true, Ordering::AcqRel);
        assert!(!was_locked, "MemorySurface is already locked");

        // SAFETY: the lock flag above guarantees a single outstanding
        // pointer; the vector is not resized while locked.
        #[allow(unsafe_code)]
        let pixels = unsafe { (*self.data.get()).as_mut_ptr() };

        SurfaceData {
            pixels,
            width: self.width,
            height: self.height,
            stride: self.width * BYTES_PER_PIXEL as i32,
            format: PixelFormat::PremultipliedArgb32,
        }
    }

    fn unlock(&self) {
        let was_locked = self.locked.swap(false, Ordering::AcqRel);
        debug_assert!(was_locked, "MemorySurface was not locked");
    }

    fn mark_dirty(&self, region: IntRect) {
        *self.dirty.lock().unwrap() = Some(region);
    }
}

impl Clone for MemorySurface {
    fn clone(&self) -> Self {
        MemorySurface::from_vec(self.pixels().to_vec(), self.width, self.height)
    }
}

impl core::fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemorySurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("locked", &self.locked.load(Ordering::Relaxed))
            .finish()
    }
}

fn data_len(width: i32, height: i32) -> Option<usize> {
    if width < 1 || height < 1 {
        return None;
    }
    if width > i32::MAX / BYTES_PER_PIXEL as i32 {
        return None;
    }

    // The rasterizers index pixels with 32-bit arithmetic.
    let len = (width as usize).checked_mul(height as usize)?;
    if len > i32::MAX as usize {
        return None;
    }

    Some(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size() {
        assert!(MemorySurface::new(0, 10).is_none());
        assert!(MemorySurface::new(10, 0).is_none());
        assert!(MemorySurface::new(-1, 10).is_none());
    }

    #[test]
    fn from_pixels_len_mismatch() {
        assert!(MemorySurface::from_pixels(vec![0; 9], 2, 4).is_none());
        assert!(MemorySurface::from_pixels(vec![0; 8], 2, 4).is_some());
    }
}
