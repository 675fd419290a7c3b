// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::color::Color;
use crate::geom::IntRect;
use crate::pixel_buffer::PixelBuffer;
use crate::surface::{PixelFormat, Surface, SurfaceData, SurfaceError};
use crate::surface::MemorySurface;
use crate::BYTES_PER_PIXEL;

/// The access mode of a [`BitmapContext`] scope.
///
/// The mode governs only the dirty notification on release: a `ReadWrite`
/// scope marks the whole surface dirty when the outermost scope ends.
/// It does not gate mutation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AccessMode {
    /// The scope only reads pixels. No dirty notification is issued.
    ReadOnly,
    /// The scope may mutate pixels.
    ReadWrite,
}

struct LockEntry {
    ref_count: usize,
    data: SurfaceData,
}

/// A table of currently locked surfaces.
///
/// The registry grants nested, reference-counted access to surfaces: the
/// first [`acquire`](LockRegistry::acquire) of a surface performs the host
/// lock and caches its geometry, nested acquisitions reuse the cache, and
/// only the outermost release touches the host again.
///
/// The registry is an explicit object; create one and pass it wherever
/// contexts are created. It is safe to use from multiple threads as long as
/// each individual surface is accessed from one thread at a time (callers
/// must serialize same-surface access themselves).
///
/// Surfaces must not be resized while any context over them is open; the
/// cached geometry is reused for nested scopes without re-validation.
pub struct LockRegistry {
    entries: Mutex<HashMap<usize, LockEntry>>,
}

impl LockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        LockRegistry {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Acquires scoped access to `surface`.
    ///
    /// The first acquisition locks the surface through the host and validates
    /// that it is 32-bit premultiplied ARGB with an unpadded stride; nested
    /// acquisitions increment the reference count and reuse the cached
    /// geometry.
    pub fn acquire<'a>(
        &'a self,
        surface: &'a dyn Surface,
        mode: AccessMode,
    ) -> Result<BitmapContext<'a>, SurfaceError> {
        let key = surface_key(surface);
        let mut entries = self.entries.lock().unwrap();

        let data = match entries.get_mut(&key) {
            Some(entry) => {
                entry.ref_count += 1;
                entry.data
            }
            None => {
                let data = surface.lock();
                if let Err(e) = validate(&data) {
                    surface.unlock();
                    return Err(e);
                }
                entries.insert(key, LockEntry { ref_count: 1, data });
                data
            }
        };

        Ok(BitmapContext {
            registry: self,
            surface,
            key,
            mode,
            buffer: PixelBuffer::from_data(&data),
            data,
        })
    }

    /// Returns the number of surfaces currently locked through this registry.
    pub fn locked_surfaces(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        LockRegistry::new()
    }
}

impl core::fmt::Debug for LockRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LockRegistry")
            .field("locked_surfaces", &self.locked_surfaces())
            .finish()
    }
}

fn validate(data: &SurfaceData) -> Result<(), SurfaceError> {
    if data.format != PixelFormat::PremultipliedArgb32 {
        return Err(SurfaceError::UnsupportedFormat);
    }
    if data.width < 0 || data.height < 0 {
        return Err(SurfaceError::InvalidGeometry);
    }
    if data.width as i64 * data.height as i64 > i32::MAX as i64 {
        return Err(SurfaceError::InvalidGeometry);
    }
    if data.stride as i64 != data.width as i64 * BYTES_PER_PIXEL as i64 {
        return Err(SurfaceError::UnsupportedStride);
    }
    Ok(())
}

fn surface_key(surface: &dyn Surface) -> usize {
    surface as *const dyn Surface as *const () as usize
}

/// Scoped access to the pixels of a locked surface.
///
/// A context is a one-shot, non-copyable guard: dropping it decrements the
/// registry reference count, and the drop of the outermost scope issues the
/// dirty notification (for `ReadWrite` scopes) and unlocks the host surface,
/// in that order.
///
/// All drawing operations are methods on the context and mutate the shared
/// surface directly; there is no copy-on-write. Leaking a context (e.g. via
/// `mem::forget`) leaves the surface permanently locked - that is a
/// programming error, not a recoverable condition.
pub struct BitmapContext<'a> {
    registry: &'a LockRegistry,
    surface: &'a dyn Surface,
    key: usize,
    mode: AccessMode,
    data: SurfaceData,
    pub(crate) buffer: PixelBuffer,
}

impl<'a> BitmapContext<'a> {
    /// Returns the width of the surface in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.data.width
    }

    /// Returns the height of the surface in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.data.height
    }

    /// Returns the number of bytes per scanline.
    #[inline]
    pub fn stride(&self) -> i32 {
        self.data.stride
    }

    /// Returns the total number of pixel cells, i.e. `stride / 4 * height`.
    #[inline]
    pub fn len(&self) -> i32 {
        (self.data.stride / BYTES_PER_PIXEL as i32) * self.data.height
    }

    /// Checks that the surface holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the pixel format of the surface.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.data.format
    }

    /// Returns the access mode of this scope.
    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Returns the bounds-checked pixel view.
    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Returns the mutable bounds-checked pixel view.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Zero-fills the whole buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Fills the whole buffer with `color`.
    ///
    /// Writes the first scanline pixel by pixel, then replicates it downward
    /// with doubling row copies.
    pub fn clear_color(&mut self, color: Color) {
        let col = color.premultiply().get();
        let w = self.width();
        let h = self.height();

        for x in 0..w {
            self.buffer.set(x, col);
        }

        let mut block_height = 1;
        let mut y = 1;
        while y < h {
            self.buffer.copy_within(0, y * w, block_height * w);
            y += block_height;
            block_height = (2 * block_height).min(h - y);
        }
    }

    /// Sets the pixel at `x`, `y` to `color`.
    ///
    /// Out-of-range coordinates are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return;
        }
        let w = self.width();
        self.buffer.set(y * w + x, color.premultiply().get());
    }

    /// Returns the pixel at `x`, `y`.
    ///
    /// Returns `None` when the position is out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<crate::color::PremultipliedColor> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(crate::color::PremultipliedColor::from_packed(
            self.buffer.get(y * self.width() + x),
        ))
    }

    /// Returns the brightness of the pixel at `x`, `y`.
    ///
    /// Luminance is computed with the integer weights 6966/23436/2366 over
    /// 2^15, approximating 0.2126/0.7152/0.0722.
    pub fn brightness(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }

        let c = self.buffer.get(y * self.width() + x);
        let r = (c >> 16) & 0xFF;
        let g = (c >> 8) & 0xFF;
        let b = c & 0xFF;
        Some(((r * 6966 + g * 23436 + b * 2366) >> 15) as u8)
    }

    /// Copies the pixel content into a new owned surface.
    pub fn clone_pixels(&self) -> MemorySurface {
        let len = self.len();
        let mut pixels = Vec::with_capacity(len as usize);
        for i in 0..len {
            pixels.push(self.buffer.get(i));
        }
        MemorySurface::from_vec(pixels, self.width(), self.height())
    }
}

impl Drop for BitmapContext<'_> {
    fn drop(&mut self) {
        let mut entries = self.registry.entries.lock().unwrap();
        let entry = match entries.get_mut(&self.key) {
            Some(entry) => entry,
            None => return,
        };

        entry.ref_count -= 1;
        if entry.ref_count > 0 {
            return;
        }
        entries.remove(&self.key);
        // Host callbacks run outside the registry lock.
        drop(entries);

        if self.mode == AccessMode::ReadWrite {
            if let Some(full) = IntRect::from_xywh(0, 0, self.data.width, self.data.height) {
                self.surface.mark_dirty(full);
            }
        }
        self.surface.unlock();
    }
}

impl core::fmt::Debug for BitmapContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BitmapContext")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("mode", &self.mode)
            .finish()
    }
}
