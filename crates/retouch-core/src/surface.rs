use anyhow::Result;
use tracing::trace;

use crate::filter::FilterChain;
use crate::layer::Layer;

/// Affine transform applied to a single draw call:
/// translate, then rotate, then scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate: (f64, f64),
    /// Radians, clockwise in screen space (y grows downward).
    pub rotate: f64,
    pub scale: (f64, f64),
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: (0.0, 0.0),
        rotate: 0.0,
        scale: (1.0, 1.0),
    };

    /// Map a point from local drawing space to surface space.
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let (sx, sy) = (x * self.scale.0, y * self.scale.1);
        let (sin, cos) = self.rotate.sin_cos();
        (
            sx * cos - sy * sin + self.translate.0,
            sx * sin + sy * cos + self.translate.1,
        )
    }

    /// Map a point from surface space back to local drawing space.
    pub fn invert(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let (tx, ty) = (x - self.translate.0, y - self.translate.1);
        let (sin, cos) = self.rotate.sin_cos();
        let rx = tx * cos + ty * sin;
        let ry = -tx * sin + ty * cos;
        (rx / self.scale.0, ry / self.scale.1)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Destination rectangle in local drawing space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// The drawing target the renderer composites onto.
///
/// The transform passed to `draw_image` is scoped to that one call; nothing
/// carries over to the next draw.
pub trait DrawingSurface {
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn set_filter(&mut self, filter: FilterChain);
    fn draw_image(&mut self, src: &Layer, transform: &Transform, dest: Rect) -> Result<()>;
    fn size(&self) -> (u32, u32);
}

/// CPU raster implementation of [`DrawingSurface`].
#[derive(Debug, Default)]
pub struct RasterSurface {
    pixels: Layer,
    filter: FilterChain,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: Layer::new(width, height),
            filter: FilterChain::none(),
        }
    }

    pub fn pixels(&self) -> &Layer {
        &self.pixels
    }

    pub fn filter(&self) -> &FilterChain {
        &self.filter
    }
}

impl DrawingSurface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        // Resizing always resets the contents, like a canvas does.
        self.pixels = Layer::new(width, height);
    }

    fn clear(&mut self) {
        self.pixels.clear();
    }

    fn set_filter(&mut self, filter: FilterChain) {
        self.filter = filter;
    }

    fn draw_image(&mut self, src: &Layer, transform: &Transform, dest: Rect) -> Result<()> {
        let (width, height) = (self.pixels.width, self.pixels.height);
        if width == 0 || height == 0 || src.pixel_count() == 0 {
            return Ok(());
        }
        trace!(width, height, filter = %self.filter, "draw_image");

        let mut scratch = Layer::new(width, height);
        let scale_x = src.width as f64 / dest.width;
        let scale_y = src.height as f64 / dest.height;

        for y in 0..height {
            for x in 0..width {
                let local = transform.invert((x as f64 + 0.5, y as f64 + 0.5));
                if !dest.contains(local) {
                    continue;
                }
                let u = (local.0 - dest.x) * scale_x;
                let v = (local.1 - dest.y) * scale_y;
                scratch.put_pixel(x, y, sample_bilinear(src, u, v));
            }
        }

        let filtered = self.filter.process(scratch)?;
        self.pixels.composite_over(&filtered)
    }

    fn size(&self) -> (u32, u32) {
        (self.pixels.width, self.pixels.height)
    }
}

/// Fractions this close to a texel centre snap onto it, so axis-aligned
/// draws stay exact despite rounding in the transform.
const TEXEL_EPSILON: f64 = 1e-6;

/// Split a continuous coordinate into the two neighbouring texels and the
/// weight of the second. Coordinates outside the layer clamp to the edge.
fn texel_span(coord: f64, len: u32) -> (u32, u32, f32) {
    let last = len - 1;
    let c = (coord - 0.5).clamp(0.0, last as f64);
    let mut base = c.floor();
    let mut t = c - base;
    if t < TEXEL_EPSILON {
        t = 0.0;
    } else if t > 1.0 - TEXEL_EPSILON {
        base += 1.0;
        t = 0.0;
    }
    let i0 = (base as u32).min(last);
    (i0, (i0 + 1).min(last), t as f32)
}

/// Bilinear sample of `src` at `(u, v)`, where texel centres sit at `+0.5`.
/// Interpolates premultiplied colour so transparent texels do not darken
/// their neighbours.
fn sample_bilinear(src: &Layer, u: f64, v: f64) -> [f32; 4] {
    let (x0, x1, tx) = texel_span(u, src.width);
    let (y0, y1, ty) = texel_span(v, src.height);
    let taps = [
        (src.pixel(x0, y0), (1.0 - tx) * (1.0 - ty)),
        (src.pixel(x1, y0), tx * (1.0 - ty)),
        (src.pixel(x0, y1), (1.0 - tx) * ty),
        (src.pixel(x1, y1), tx * ty),
    ];

    let mut acc = [0.0_f32; 4];
    for (px, w) in taps {
        if w == 0.0 {
            continue;
        }
        let a = px[3] * w;
        acc[0] += px[0] * a;
        acc[1] += px[1] * a;
        acc[2] += px[2] * a;
        acc[3] += a;
    }
    if acc[3] <= 0.0 {
        return [0.0; 4];
    }
    [acc[0] / acc[3], acc[1] / acc[3], acc[2] / acc[3], acc[3]]
}
