use softblit::*;

const RED: Color = Color::from_argb(255, 255, 0, 0);
const RED_PIXEL: u32 = 0xFFFF_0000;

fn new_canvas(w: i32, h: i32) -> (LockRegistry, MemorySurface) {
    (LockRegistry::new(), MemorySurface::new(w, h).unwrap())
}

#[test]
fn fill_polygon_covers_the_interior() {
    let (registry, surface) = new_canvas(16, 16);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        // A closed square.
        ctx.fill_polygon(&[2, 2, 12, 2, 12, 12, 2, 12, 2, 2], RED, None);
    }

    let pixels = surface.pixels();
    assert_eq!(pixels[7 * 16 + 7], RED_PIXEL);
    assert_eq!(pixels[3 * 16 + 3], RED_PIXEL);
    assert_eq!(pixels[0], 0);
    assert_eq!(pixels[14 * 16 + 14], 0);
}

#[test]
fn fill_polygon_is_idempotent_without_blending() {
    let polygon = [3, 2, 13, 5, 10, 13, 2, 9, 3, 2];

    let (registry, once) = new_canvas(16, 16);
    {
        let mut ctx = registry.acquire(&once, AccessMode::ReadWrite).unwrap();
        ctx.fill_polygon(&polygon, RED, None);
    }

    let twice = MemorySurface::new(16, 16).unwrap();
    {
        let mut ctx = registry.acquire(&twice, AccessMode::ReadWrite).unwrap();
        ctx.fill_polygon(&polygon, RED, None);
        ctx.fill_polygon(&polygon, RED, None);
    }

    assert_eq!(once.pixels(), twice.pixels());
}

#[test]
fn fill_polygon_blends_when_asked() {
    let (registry, surface) = new_canvas(8, 8);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.clear_color(Color::from_rgb(0, 0, 255));
        ctx.fill_polygon(
            &[0, 0, 8, 0, 8, 8, 0, 8, 0, 0],
            Color::from_argb(128, 255, 0, 0),
            Some(BlendMode::Alpha),
        );
    }

    let px = surface.pixels()[3 * 8 + 3];
    // Half-transparent red over opaque blue: both channels contribute and
    // the destination alpha is kept.
    assert_eq!(px >> 24, 0xFF);
    assert!((px >> 16) & 0xFF > 0);
    assert!(px & 0xFF > 0);
}

#[test]
fn empty_polygon_is_a_no_op() {
    let (registry, surface) = new_canvas(8, 8);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.fill_polygon(&[], RED, None);
        ctx.fill_polygons_even_odd(&[], RED);
        ctx.fill_polygons_even_odd(&[&[1, 1, 5, 5]], RED);
    }

    assert!(surface.pixels().iter().all(|&p| p == 0));
}

#[test]
fn even_odd_fill_leaves_nested_square_as_hole() {
    let (registry, surface) = new_canvas(16, 16);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        let outer = [1, 1, 13, 1, 13, 13, 1, 13];
        let inner = [4, 4, 10, 4, 10, 10, 4, 10];
        ctx.fill_polygons_even_odd(&[&outer, &inner], RED);
    }

    let pixels = surface.pixels();
    // Ring is painted.
    assert_eq!(pixels[7 * 16 + 2], RED_PIXEL);
    assert_eq!(pixels[7 * 16 + 12], RED_PIXEL);
    assert_eq!(pixels[2 * 16 + 7], RED_PIXEL);
    // The nested square stays unpainted.
    assert_eq!(pixels[7 * 16 + 7], 0);
    assert_eq!(pixels[6 * 16 + 6], 0);
    // Outside stays unpainted.
    assert_eq!(pixels[0], 0);
    assert_eq!(pixels[15 * 16 + 15], 0);
}

#[test]
fn fill_triangle_and_quad_reduce_to_the_polygon_filler() {
    let (registry, surface) = new_canvas(32, 32);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.fill_triangle(2, 2, 28, 4, 8, 28, RED, None);
        ctx.fill_quad(2, 2, 28, 2, 28, 28, 2, 28, RED, None);
    }

    // Inside the quad.
    assert_eq!(surface.pixels()[15 * 32 + 15], RED_PIXEL);
}

#[test]
fn fill_rectangle_extents_are_half_open() {
    let (registry, surface) = new_canvas(16, 16);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.fill_rectangle(2, 3, 6, 7, RED, None);
    }

    let pixels = surface.pixels();
    for y in 0..16 {
        for x in 0..16 {
            let expected = (2..6).contains(&x) && (3..7).contains(&y);
            assert_eq!(
                pixels[y * 16 + x] != 0,
                expected,
                "pixel {:?}",
                (x, y)
            );
        }
    }
}

#[test]
fn fill_rectangle_clamps_to_the_buffer() {
    let (registry, surface) = new_canvas(8, 8);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.fill_rectangle(-5, -5, 20, 20, RED, None);
        // Fully outside is a no-op.
        ctx.fill_rectangle(-9, -9, -1, -1, RED, None);
    }

    assert!(surface.pixels().iter().all(|&p| p == RED_PIXEL));
}

#[test]
fn draw_rectangle_outlines_only() {
    let (registry, surface) = new_canvas(16, 16);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.draw_rectangle(2, 2, 12, 12, RED);
    }

    let pixels = surface.pixels();
    assert_eq!(pixels[2 * 16 + 5], RED_PIXEL); // top
    assert_eq!(pixels[12 * 16 + 5], RED_PIXEL); // bottom
    assert_eq!(pixels[5 * 16 + 2], RED_PIXEL); // left
    assert_eq!(pixels[5 * 16 + 12], RED_PIXEL); // right
    assert_eq!(pixels[5 * 16 + 5], 0); // interior
}

#[test]
fn fill_ellipse_covers_center_and_respects_radii() {
    let (registry, surface) = new_canvas(32, 32);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.fill_ellipse_centered(16, 16, 10, 6, RED, None);
    }

    let pixels = surface.pixels();
    assert_eq!(pixels[16 * 32 + 16], RED_PIXEL);
    assert_eq!(pixels[16 * 32 + 7], RED_PIXEL); // left extreme on the axis
    assert_eq!(pixels[16 * 32 + 25], RED_PIXEL); // right extreme
    assert_eq!(pixels[16 * 32 + 3], 0); // beyond the x radius
    assert_eq!(pixels[5 * 32 + 16], 0); // beyond the y radius
    assert_eq!(pixels[3 * 32 + 3], 0); // corner outside
}

#[test]
fn fill_ellipse_zero_radius_is_a_no_op() {
    let (registry, surface) = new_canvas(8, 8);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.fill_ellipse_centered(4, 4, 0, 3, RED, None);
        ctx.fill_ellipse_centered(4, 4, 3, 0, RED, None);
        ctx.draw_ellipse_centered(4, 4, 0, 3, RED);
    }

    assert!(surface.pixels().iter().all(|&p| p == 0));
}

#[test]
fn draw_ellipse_is_a_ring() {
    let (registry, surface) = new_canvas(32, 32);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.draw_ellipse_centered(16, 16, 8, 8, RED);
    }

    let pixels = surface.pixels();
    assert_eq!(pixels[16 * 32 + 8], RED_PIXEL); // on the circle
    assert_eq!(pixels[16 * 32 + 24], RED_PIXEL);
    assert_eq!(pixels[8 * 32 + 16], RED_PIXEL);
    assert_eq!(pixels[24 * 32 + 16], RED_PIXEL);
    assert_eq!(pixels[16 * 32 + 16], 0); // center untouched
}

#[test]
fn fill_ellipse_blended_spans_keep_destination_alpha() {
    let (registry, surface) = new_canvas(16, 16);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.clear_color(Color::from_rgb(0, 0, 200));
        ctx.fill_ellipse_centered(
            8,
            8,
            5,
            5,
            Color::from_argb(100, 255, 255, 255),
            Some(BlendMode::Alpha),
        );
    }

    let px = surface.pixels()[8 * 16 + 8];
    assert_eq!(px >> 24, 0xFF);
    assert!((px >> 16) & 0xFF > 0);
}

#[test]
fn polyline_connects_segments() {
    let (registry, surface) = new_canvas(32, 32);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.draw_polyline(&[2, 2, 20, 2, 20, 20], RED);
    }

    let pixels = surface.pixels();
    assert_eq!(pixels[2 * 32 + 10], RED_PIXEL);
    assert_eq!(pixels[10 * 32 + 20], RED_PIXEL);
}

#[test]
fn curves_paint_and_fill() {
    let (registry, surface) = new_canvas(64, 64);
    {
        let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
        ctx.draw_bezier(4, 32, 20, 4, 44, 60, 60, 32, RED);
    }
    let drawn = surface.pixels().iter().filter(|&&p| p != 0).count();
    assert!(drawn > 20);

    let filled_surface = MemorySurface::new(64, 64).unwrap();
    {
        let mut ctx = registry
            .acquire(&filled_surface, AccessMode::ReadWrite)
            .unwrap();
        ctx.fill_curve_closed(&[10, 10, 50, 10, 50, 50, 10, 50], 0.5, RED, None);
    }
    // The filled spline covers the interior of the control quad.
    assert_eq!(filled_surface.pixels()[30 * 64 + 30], RED_PIXEL);
    let filled = filled_surface.pixels().iter().filter(|&&p| p != 0).count();
    assert!(filled > drawn);
}
