/*!
`softblit` is a software rasterizer that draws directly into shared,
premultiplied ARGB pixel surfaces.

The crate is built around a borrowed-access model: a host owns the pixel
storage and exposes it through the [`Surface`] trait; a [`LockRegistry`] hands
out scoped, reference-counted [`BitmapContext`] guards over it; and all drawing
primitives (lines, polygons, ellipses, blits, filters, geometric transforms)
operate on the locked buffer through the context.

```
use softblit::{AccessMode, Color, LockRegistry, MemorySurface};

let registry = LockRegistry::new();
let surface = MemorySurface::new(128, 128).unwrap();
{
    let mut ctx = registry.acquire(&surface, AccessMode::ReadWrite).unwrap();
    ctx.draw_line(10, 10, 100, 90, Color::from_argb(255, 255, 0, 0), None);
}
// dropping the context released the lock and marked the surface dirty
```
*/

#![doc(html_root_url = "https://docs.rs/softblit/0.1.0")]
#![warn(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod aa_line;
mod blend;
mod blit;
mod clipper;
mod color;
mod context;
mod curve;
mod ellipse;
mod filter;
mod geom;
mod line;
mod pixel_buffer;
mod polygon;
mod resample;
mod shapes;
mod surface;
mod tga;
mod transform;
mod wu_line;

pub use blend::BlendMode;
pub use color::{Color, PremultipliedColor, ALPHA_OPAQUE, ALPHA_TRANSPARENT};
pub use context::{AccessMode, BitmapContext, LockRegistry};
pub use filter::{KernelError, KERNEL_GAUSSIAN_BLUR_3X3, KERNEL_GAUSSIAN_BLUR_5X5, KERNEL_SHARPEN_3X3};
pub use geom::{IntRect, Point, Rect};
pub use pixel_buffer::PixelBuffer;
pub use resample::{FlipMode, Interpolation};
pub use surface::{MemorySurface, PixelFormat, Surface, SurfaceData, SurfaceError};
pub use transform::Transform;

/// Number of bytes per pixel cell.
pub const BYTES_PER_PIXEL: usize = 4;
