use softblit::*;

#[test]
fn acquire_and_release() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(8, 8).unwrap();

    {
        let ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        assert_eq!(ctx.width(), 8);
        assert_eq!(ctx.height(), 8);
        assert_eq!(ctx.stride(), 32);
        assert_eq!(ctx.len(), 64);
        assert_eq!(ctx.format(), PixelFormat::PremultipliedArgb32);
        assert_eq!(registry.locked_surfaces(), 1);
    }

    assert_eq!(registry.locked_surfaces(), 0);
}

#[test]
fn nested_acquisition_locks_once() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(8, 8).unwrap();

    let outer = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    // A second lock of the host would panic; the registry reuses the entry.
    let inner = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    assert_eq!(registry.locked_surfaces(), 1);

    drop(inner);
    // Still locked: the outer scope is alive.
    assert_eq!(registry.locked_surfaces(), 1);
    assert!(surface.take_dirty().is_none());

    drop(outer);
    assert_eq!(registry.locked_surfaces(), 0);
}

#[test]
fn read_write_release_marks_whole_surface_dirty() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(10, 6).unwrap();

    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.set_pixel(1, 1, Color::from_rgb(255, 0, 0));
    }

    let dirty = surface.take_dirty().unwrap();
    assert_eq!(dirty, IntRect::from_xywh(0, 0, 10, 6).unwrap());
}

#[test]
fn read_only_release_does_not_mark_dirty() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(10, 6).unwrap();

    {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        assert_eq!(ctx.mode(), AccessMode::ReadOnly);
    }

    assert!(surface.take_dirty().is_none());
}

#[test]
fn nested_release_reports_the_dropping_scopes_mode() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(4, 4).unwrap();

    // The outermost scope is read-only and is released last, so no dirty
    // notification is issued even though an inner scope was read-write.
    let outer = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
    let inner = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    drop(inner);
    drop(outer);

    assert!(surface.take_dirty().is_none());
}

struct HostileSurface {
    format: PixelFormat,
    stride: i32,
}

impl Surface for HostileSurface {
    fn lock(&self) -> SurfaceData {
        SurfaceData {
            pixels: std::ptr::null_mut(),
            width: 4,
            height: 4,
            stride: self.stride,
            format: self.format,
        }
    }

    fn unlock(&self) {}

    fn mark_dirty(&self, _region: IntRect) {}
}

#[test]
fn rejects_non_argb_surfaces() {
    let registry = LockRegistry::new();
    let surface = HostileSurface {
        format: PixelFormat::Unsupported,
        stride: 16,
    };

    let err = registry
        .acquire(&surface, AccessMode::ReadWrite)
        .err()
        .unwrap();
    assert_eq!(err, SurfaceError::UnsupportedFormat);
    assert_eq!(registry.locked_surfaces(), 0);
}

#[test]
fn rejects_padded_strides() {
    let registry = LockRegistry::new();
    let surface = HostileSurface {
        format: PixelFormat::PremultipliedArgb32,
        stride: 20,
    };

    let err = registry
        .acquire(&surface, AccessMode::ReadWrite)
        .err()
        .unwrap();
    assert_eq!(err, SurfaceError::UnsupportedStride);
}

#[test]
fn clear_zero_fills() {
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(4, 4).unwrap();
    surface.pixels_mut().iter_mut().for_each(|p| *p = 0xFFAB_CDEF);

    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.clear();
    }

    assert!(surface.pixels().iter().all(|&p| p == 0));
}

#[test]
fn clear_color_fills_every_row() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(7, 5).unwrap();

    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.clear_color(Color::from_rgb(10, 20, 30));
    }

    assert!(surface.pixels().iter().all(|&p| p == 0xFF0A_141E));
}

#[test]
fn set_pixel_and_pixel_round_trip() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(4, 4).unwrap();

    let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    ctx.set_pixel(2, 3, Color::from_argb(255, 1, 2, 3));
    assert_eq!(ctx.pixel(2, 3).unwrap().get(), 0xFF01_0203);

    // Out-of-range access is dropped / absent.
    ctx.set_pixel(-1, 0, Color::WHITE);
    ctx.set_pixel(4, 0, Color::WHITE);
    assert!(ctx.pixel(4, 0).is_none());
    assert!(ctx.pixel(0, -1).is_none());
}

#[test]
fn set_pixel_premultiplies() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(2, 2).unwrap();

    let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    ctx.set_pixel(0, 0, Color::from_argb(127, 255, 255, 255));

    let px = ctx.pixel(0, 0).unwrap();
    assert_eq!(px.alpha(), 127);
    assert_eq!(px.red(), ((255 * 128) >> 8) as u8);
    assert!(px.red() <= px.alpha());
}

#[test]
fn brightness_uses_integer_luminance_weights() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(2, 2).unwrap();

    let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    ctx.set_pixel(0, 0, Color::from_rgb(100, 200, 50));

    let expected = ((100 * 6966 + 200 * 23436 + 50 * 2366) >> 15) as u8;
    assert_eq!(ctx.brightness(0, 0).unwrap(), expected);
    assert!(ctx.brightness(5, 0).is_none());
}

#[test]
fn registry_tracks_distinct_surfaces_independently() {
    let registry = LockRegistry::new();
    let a = MemorySurface::new(4, 4).unwrap();
    let b = MemorySurface::new(4, 4).unwrap();

    let ctx_a = registry.acquire(&a, AccessMode::ReadWrite).unwrap();
    let ctx_b = registry.acquire(&b, AccessMode::ReadWrite).unwrap();
    assert_eq!(registry.locked_surfaces(), 2);

    drop(ctx_a);
    assert_eq!(registry.locked_surfaces(), 1);
    drop(ctx_b);
    assert_eq!(registry.locked_surfaces(), 0);
}

#[test]
fn clone_pixels_snapshots_content() {
    let registry = LockRegistry::new();
    let surface = MemorySurface::new(3, 3).unwrap();

    let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    ctx.set_pixel(1, 1, Color::from_rgb(9, 9, 9));

    let copy = ctx.clone_pixels();
    ctx.set_pixel(1, 1, Color::from_rgb(1, 1, 1));

    assert_eq!(copy.pixels()[4], 0xFF09_0909);
}
