use softblit::*;

fn checkerboard(w: i32, h: i32) -> MemorySurface {
    let mut surface = MemorySurface::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            let p = if (x + y) % 2 == 0 { 0xFFFF_0000 } else { 0xFF00_00FF };
            surface.pixels_mut()[(y * w + x) as usize] = p;
        }
    }
    surface
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::from_xywh(x, y, w, h).unwrap()
}

#[test]
fn none_blend_untinted_blit_round_trips_exactly() {
    let registry = LockRegistry::new();
    let src = checkerboard(8, 8);
    let dst = MemorySurface::new(8, 8).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit(
            &rect(0.0, 0.0, 8.0, 8.0),
            &src_ctx,
            &rect(0.0, 0.0, 8.0, 8.0),
            Color::WHITE,
            BlendMode::None,
        );
    }

    assert_eq!(src.pixels(), dst.pixels());
}

#[test]
fn blit_at_offsets_the_source() {
    let registry = LockRegistry::new();
    let src = checkerboard(4, 4);
    let dst = MemorySurface::new(16, 16).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit_at(
            5.0,
            6.0,
            &src_ctx,
            &rect(0.0, 0.0, 4.0, 4.0),
            Color::WHITE,
            BlendMode::None,
        );
    }

    let pixels = dst.pixels();
    assert_eq!(pixels[6 * 16 + 5], 0xFFFF_0000);
    assert_eq!(pixels[6 * 16 + 6], 0xFF00_00FF);
    assert_eq!(pixels[0], 0);
    assert_eq!(pixels[10 * 16 + 9], 0);
}

#[test]
fn alpha_blit_with_opaque_source_overwrites() {
    let registry = LockRegistry::new();
    let src = checkerboard(8, 8);
    let dst = MemorySurface::new(8, 8).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        dst_ctx.clear_color(Color::from_rgb(0, 255, 0));
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit(
            &rect(0.0, 0.0, 8.0, 8.0),
            &src_ctx,
            &rect(0.0, 0.0, 8.0, 8.0),
            Color::WHITE,
            BlendMode::Alpha,
        );
    }

    assert_eq!(src.pixels(), dst.pixels());
}

#[test]
fn transparent_source_pixels_leave_destination_alone() {
    let registry = LockRegistry::new();
    let src = MemorySurface::new(8, 8).unwrap(); // fully transparent
    let dst = MemorySurface::new(8, 8).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        dst_ctx.clear_color(Color::from_rgb(0, 255, 0));
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit(
            &rect(0.0, 0.0, 8.0, 8.0),
            &src_ctx,
            &rect(0.0, 0.0, 8.0, 8.0),
            Color::WHITE,
            BlendMode::Alpha,
        );
    }

    assert!(dst.pixels().iter().all(|&p| p == 0xFF00_FF00));
}

#[test]
fn zero_alpha_tint_is_a_no_op() {
    let registry = LockRegistry::new();
    let src = checkerboard(8, 8);
    let dst = MemorySurface::new(8, 8).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit(
            &rect(0.0, 0.0, 8.0, 8.0),
            &src_ctx,
            &rect(0.0, 0.0, 8.0, 8.0),
            Color::from_argb(0, 255, 255, 255),
            BlendMode::None,
        );
    }

    assert!(dst.pixels().iter().all(|&p| p == 0));
}

#[test]
fn tinting_scales_the_source_channels() {
    let registry = LockRegistry::new();
    let mut src = MemorySurface::new(4, 4).unwrap();
    src.pixels_mut().iter_mut().for_each(|p| *p = 0xFFFF_FFFF);
    let dst = MemorySurface::new(4, 4).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        // A pure red, opaque tint keeps red and zeroes green/blue.
        dst_ctx.blit(
            &rect(0.0, 0.0, 4.0, 4.0),
            &src_ctx,
            &rect(0.0, 0.0, 4.0, 4.0),
            Color::from_rgb(255, 0, 0),
            BlendMode::None,
        );
    }

    assert!(dst.pixels().iter().all(|&p| p == 0xFFFF_0000));
}

#[test]
fn color_keying_skips_the_key_color() {
    let registry = LockRegistry::new();
    let mut src = MemorySurface::new(2, 1).unwrap();
    // An opaque-white key color does not tint, so the source arrives at the
    // key comparison unmodified.
    src.pixels_mut()[0] = 0xFFFF_FFFF; // white: the key
    src.pixels_mut()[1] = 0xFF00_00FF; // blue
    let dst = MemorySurface::new(2, 1).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        dst_ctx.clear_color(Color::from_rgb(0, 255, 0));
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit(
            &rect(0.0, 0.0, 2.0, 1.0),
            &src_ctx,
            &rect(0.0, 0.0, 2.0, 1.0),
            Color::WHITE,
            BlendMode::ColorKeying,
        );
    }

    // The keyed pixel keeps the destination, the other copies through.
    assert_eq!(dst.pixels()[0], 0xFF00_FF00);
    assert_eq!(dst.pixels()[1], 0xFF00_00FF);
}

#[test]
fn blit_scales_with_nearest_sampling() {
    let registry = LockRegistry::new();
    let src = checkerboard(2, 2);
    let dst = MemorySurface::new(8, 8).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit(
            &rect(0.0, 0.0, 8.0, 8.0),
            &src_ctx,
            &rect(0.0, 0.0, 2.0, 2.0),
            Color::WHITE,
            BlendMode::Alpha,
        );
    }

    let pixels = dst.pixels();
    // Each source pixel expands to a 4x4 block.
    assert_eq!(pixels[0], 0xFFFF_0000);
    assert_eq!(pixels[3 * 8 + 3], 0xFFFF_0000);
    assert_eq!(pixels[3 * 8 + 4], 0xFF00_00FF);
    assert_eq!(pixels[4 * 8 + 4], 0xFFFF_0000);
}

#[test]
fn blit_clips_against_the_destination() {
    let registry = LockRegistry::new();
    let src = checkerboard(8, 8);
    let dst = MemorySurface::new(8, 8).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        // Hangs off the bottom-right corner; must not wrap or crash.
        dst_ctx.blit(
            &rect(6.0, 6.0, 8.0, 8.0),
            &src_ctx,
            &rect(0.0, 0.0, 8.0, 8.0),
            Color::WHITE,
            BlendMode::Alpha,
        );
        // Entirely outside.
        dst_ctx.blit(
            &rect(100.0, 100.0, 8.0, 8.0),
            &src_ctx,
            &rect(0.0, 0.0, 8.0, 8.0),
            Color::WHITE,
            BlendMode::Alpha,
        );
    }

    let pixels = dst.pixels();
    assert_eq!(pixels[6 * 8 + 6], 0xFFFF_0000);
    assert_eq!(pixels[0], 0);
}

#[test]
fn blit_render_identity_reproduces_the_source() {
    let registry = LockRegistry::new();
    let src = checkerboard(8, 8);
    let dst = MemorySurface::new(8, 8).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit_render(&src_ctx, true, 1.0, &Transform::identity());
    }

    assert_eq!(src.pixels(), dst.pixels());
}

#[test]
fn blit_render_translates() {
    let registry = LockRegistry::new();
    let mut src = MemorySurface::new(4, 4).unwrap();
    src.pixels_mut().iter_mut().for_each(|p| *p = 0xFFFF_0000);
    let dst = MemorySurface::new(16, 16).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit_render(&src_ctx, true, 1.0, &Transform::from_translate(6.0, 3.0));
    }

    let pixels = dst.pixels();
    assert_eq!(pixels[3 * 16 + 6], 0xFFFF_0000);
    assert_eq!(pixels[6 * 16 + 9], 0xFFFF_0000);
    assert_eq!(pixels[0], 0);
    assert_eq!(pixels[15 * 16 + 15], 0);
}

#[test]
fn blit_render_applies_global_opacity() {
    let registry = LockRegistry::new();
    let mut src = MemorySurface::new(4, 4).unwrap();
    src.pixels_mut().iter_mut().for_each(|p| *p = 0xFFFF_FFFF);
    let dst = MemorySurface::new(4, 4).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        dst_ctx.blit_render(&src_ctx, true, 0.5, &Transform::identity());
    }

    let px = dst.pixels()[5];
    let a = px >> 24;
    // Opacity 0.5 scales every channel by 127/256.
    assert_eq!(a, (255 * 127) >> 8);
    assert_eq!((px >> 16) & 0xFF, a);
}

#[test]
fn blit_render_rotation_stays_inside_the_destination() {
    let registry = LockRegistry::new();
    let mut src = MemorySurface::new(8, 8).unwrap();
    src.pixels_mut().iter_mut().for_each(|p| *p = 0xFFFF_0000);
    let dst = MemorySurface::new(32, 32).unwrap();

    {
        let mut dst_ctx = registry.acquire(&dst, AccessMode::ReadWrite).unwrap();
        let src_ctx = registry.acquire(&src, AccessMode::ReadOnly).unwrap();
        let ts = Transform::from_rotate_at(45.0, 16.0, 16.0)
            .pre_concat(Transform::from_translate(12.0, 12.0));
        dst_ctx.blit_render(&src_ctx, true, 1.0, &ts);
    }

    // Something was rendered, and only red pixels (plus background).
    let lit = dst.pixels().iter().filter(|&&p| p != 0).count();
    assert!(lit > 16);
    assert!(dst
        .pixels()
        .iter()
        .all(|&p| p == 0 || (p >> 16) & 0xFF > 0));
}
