use softblit::*;

fn gradient(w: i32, h: i32) -> MemorySurface {
    let mut surface = MemorySurface::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            let v = ((x * 13 + y * 29) % 256) as u32;
            surface.pixels_mut()[(y * w + x) as usize] = 0xFF00_0000 | (v << 16) | (v << 8) | v;
        }
    }
    surface
}

#[test]
fn identity_kernel_returns_the_input() {
    let registry = LockRegistry::new();
    let surface = gradient(9, 7);

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.convolute(&[[1]]).unwrap()
    };

    assert_eq!(result.pixels(), surface.pixels());
}

#[test]
fn even_kernel_dimensions_are_rejected() {
    let registry = LockRegistry::new();
    let surface = gradient(4, 4);
    let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();

    assert_eq!(
        ctx.convolute(&[[1, 1], [1, 1]]).err().unwrap(),
        KernelError::EvenKernelDimension
    );
    assert_eq!(
        ctx.convolute(&[[1, 1, 1], [1, 1, 1]]).err().unwrap(),
        KernelError::EvenKernelDimension
    );
}

#[test]
fn zero_factor_sum_is_rejected() {
    let registry = LockRegistry::new();
    let surface = gradient(4, 4);
    let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();

    let err = ctx
        .convolute(&[[1, -2, 1], [0, 0, 0], [0, 0, 0]])
        .err()
        .unwrap();
    assert_eq!(err, KernelError::ZeroFactorSum);
}

#[test]
fn ragged_kernels_are_rejected() {
    let registry = LockRegistry::new();
    let surface = gradient(4, 4);
    let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();

    let rows: [&[i32]; 3] = [&[1, 0, 0], &[0, 1], &[0, 0, 1]];
    assert_eq!(
        ctx.convolute(&rows).err().unwrap(),
        KernelError::NotRectangular
    );
}

#[test]
fn gaussian_blur_smooths_an_impulse() {
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(9, 9).unwrap();
    surface.pixels_mut()[4 * 9 + 4] = 0xFFFF_FFFF;

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.convolute(&KERNEL_GAUSSIAN_BLUR_3X3).unwrap()
    };

    let center = result.pixels()[4 * 9 + 4];
    let neighbor = result.pixels()[4 * 9 + 5];
    let far = result.pixels()[0];

    // The impulse spreads to its neighbors and decays with distance.
    assert!((center >> 16) & 0xFF >= (neighbor >> 16) & 0xFF);
    assert!((neighbor >> 16) & 0xFF > 0);
    assert_eq!(far, 0);
}

#[test]
fn convolution_clamps_at_borders() {
    // A uniform image stays uniform under a normalized kernel, which only
    // holds if borders replicate edge pixels instead of sampling zeros.
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(6, 6).unwrap();
    surface.pixels_mut().iter_mut().for_each(|p| *p = 0xFF64_6464);

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.convolute(&KERNEL_GAUSSIAN_BLUR_5X5).unwrap()
    };

    assert!(result.pixels().iter().all(|&p| p == 0xFF64_6464));
}

#[test]
fn invert_flips_color_channels_and_keeps_alpha() {
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(2, 2).unwrap();
    surface.pixels_mut()[0] = 0x80FF_0040;

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.invert()
    };

    assert_eq!(result.pixels()[0], 0x8000_FFBF);
    // The input is untouched (non-destructive).
    assert_eq!(surface.pixels()[0], 0x80FF_0040);
}

#[test]
fn invert_twice_is_identity() {
    let registry = LockRegistry::new();
    let surface = gradient(5, 5);

    let once = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.invert()
    };
    let twice = {
        let ctx = registry.acquire(&once, AccessMode::ReadOnly).unwrap();
        ctx.invert()
    };

    assert_eq!(twice.pixels(), surface.pixels());
}

#[test]
fn gray_uses_the_integer_luminance_weights() {
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(1, 1).unwrap();
    surface.pixels_mut()[0] = 0xFF00_FF00; // pure green

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.gray()
    };

    let expected = (255 * 23436) >> 15;
    let px = result.pixels()[0];
    assert_eq!((px >> 16) & 0xFF, expected);
    assert_eq!((px >> 8) & 0xFF, expected);
    assert_eq!(px & 0xFF, expected);
    assert_eq!(px >> 24, 0xFF);
}

#[test]
fn gray_is_idempotent() {
    let registry = LockRegistry::new();
    let surface = gradient(4, 4);

    let once = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.gray()
    };
    let twice = {
        let ctx = registry.acquire(&once, AccessMode::ReadOnly).unwrap();
        ctx.gray()
    };

    assert_eq!(once.pixels(), twice.pixels());
}

#[test]
fn brightness_shifts_and_clamps() {
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(2, 1).unwrap();
    surface.pixels_mut()[0] = 0xFF10_F010;

    let registry_ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
    let brighter = registry_ctx.adjust_brightness(40);
    assert_eq!(brighter.pixels()[0], 0xFF38_FF38);

    let darker = registry_ctx.adjust_brightness(-40);
    assert_eq!(darker.pixels()[0], 0xFF00_C800);
}

#[test]
fn strong_contrast_pushes_channels_apart() {
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(2, 1).unwrap();
    surface.pixels_mut()[0] = 0xFFC8_C8C8; // bright gray
    surface.pixels_mut()[1] = 0xFF32_3232; // dark gray

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.adjust_contrast(128.0)
    };

    assert_eq!(result.pixels()[0], 0xFFFF_FFFF);
    assert_eq!(result.pixels()[1], 0xFF00_0000);
}

#[test]
fn unit_gamma_keeps_the_image_within_rounding() {
    let registry = LockRegistry::new();
    let surface = gradient(4, 4);

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.adjust_gamma(1.0)
    };

    // The float round trip may truncate a channel by one.
    for (&out, &inp) in result.pixels().iter().zip(surface.pixels()) {
        for shift in [0, 8, 16, 24] {
            let o = ((out >> shift) & 0xFF) as i32;
            let i = ((inp >> shift) & 0xFF) as i32;
            assert!((o - i).abs() <= 1, "{:08x} vs {:08x}", out, inp);
        }
    }
}

#[test]
fn gamma_brightens_midtones() {
    let registry = LockRegistry::new();
    let mut surface = MemorySurface::new(1, 1).unwrap();
    surface.pixels_mut()[0] = 0xFF80_8080;

    let result = {
        let ctx = registry.acquire(&surface, AccessMode::ReadOnly).unwrap();
        ctx.adjust_gamma(2.2)
    };

    let px = result.pixels()[0];
    assert!((px >> 16) & 0xFF > 0x80);
    assert_eq!(px >> 24, 0xFF);
}
