use anyhow::Result;
use tracing::debug;

use crate::decode::DisplaySize;
use crate::filter::FilterChain;
use crate::layer::Layer;
use crate::settings::FilterSettings;
use crate::surface::{DrawingSurface, Rect, Transform};

/// Axis-aligned bounding box of `size` rotated by `degrees`, floored.
pub fn rotated_bounds(size: DisplaySize, degrees: i32) -> (u32, u32) {
    let angle = (degrees as f64).to_radians();
    let (sin, cos) = (angle.sin().abs(), angle.cos().abs());
    let (w, h) = (size.width as f64, size.height as f64);
    let new_w = w * cos + h * sin;
    let new_h = w * sin + h * cos;
    (new_w.floor() as u32, new_h.floor() as u32)
}

/// Composite `image` onto `surface` with the filters, rotation and flips in
/// `settings`.
///
/// The surface is resized to the rotated bounding box of `display` on every
/// call. With no image this does nothing. Holds no state between calls.
pub fn render<S: DrawingSurface>(
    surface: &mut S,
    image: Option<&Layer>,
    settings: &FilterSettings,
    display: DisplaySize,
) -> Result<()> {
    let Some(image) = image else {
        return Ok(());
    };

    let angle = (settings.rotate as f64).to_radians();
    let (width, height) = rotated_bounds(display, settings.rotate);
    surface.resize(width, height);
    surface.clear();

    let filter = FilterChain::from_settings(settings);
    debug!(width, height, rotate = settings.rotate, %filter, "render");
    surface.set_filter(filter);

    let transform = Transform {
        translate: (width as f64 / 2.0, height as f64 / 2.0),
        rotate: angle,
        scale: (settings.flip_x as f64, settings.flip_y as f64),
    };
    let (w, h) = (display.width as f64, display.height as f64);
    let dest = Rect {
        x: -w / 2.0,
        y: -h / 2.0,
        width: w,
        height: h,
    };
    surface.draw_image(image, &transform, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    fn size(width: u32, height: u32) -> DisplaySize {
        DisplaySize { width, height }
    }

    /// 4x2 image: left half red, right half blue.
    fn halves() -> Layer {
        let mut layer = Layer::new(4, 2);
        for y in 0..2 {
            for x in 0..4 {
                let px = if x < 2 {
                    [1.0, 0.0, 0.0, 1.0]
                } else {
                    [0.0, 0.0, 1.0, 1.0]
                };
                layer.put_pixel(x, y, px);
            }
        }
        layer
    }

    #[test]
    fn bounds_for_right_angles() {
        assert_eq!(rotated_bounds(size(700, 450), 0), (700, 450));
        assert_eq!(rotated_bounds(size(700, 450), 90), (450, 700));
        assert_eq!(rotated_bounds(size(700, 450), 180), (700, 450));
        assert_eq!(rotated_bounds(size(700, 450), -90), (450, 700));
    }

    #[test]
    fn bounds_for_diagonal() {
        let (w, h) = rotated_bounds(size(100, 100), 45);
        assert_eq!((w, h), (141, 141));
    }

    #[test]
    fn no_image_is_noop() {
        let mut surface = RasterSurface::new(3, 3);
        render(&mut surface, None, &FilterSettings::default(), size(10, 10)).unwrap();
        assert_eq!(surface.size(), (3, 3));
    }

    #[test]
    fn default_render_reproduces_image() {
        let image = halves();
        let mut surface = RasterSurface::default();
        render(&mut surface, Some(&image), &FilterSettings::default(), size(4, 2)).unwrap();
        assert_eq!(surface.size(), (4, 2));
        assert_eq!(surface.pixels(), &image);
    }

    #[test]
    fn render_is_idempotent() {
        let image = halves();
        let settings = FilterSettings {
            rotate: 30,
            sepia: 40,
            blur: 1,
            flip_y: -1,
            ..Default::default()
        };
        let mut surface = RasterSurface::default();
        render(&mut surface, Some(&image), &settings, size(4, 2)).unwrap();
        let first = surface.pixels().clone();
        render(&mut surface, Some(&image), &settings, size(4, 2)).unwrap();
        assert_eq!(surface.pixels(), &first);
    }

    #[test]
    fn horizontal_flip_mirrors() {
        let settings = FilterSettings {
            flip_x: -1,
            ..Default::default()
        };
        let mut surface = RasterSurface::default();
        render(&mut surface, Some(&halves()), &settings, size(4, 2)).unwrap();
        assert_eq!(surface.pixels().pixel(0, 0), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(surface.pixels().pixel(3, 1), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn quarter_turn_resizes_and_rotates() {
        let settings = FilterSettings {
            rotate: 90,
            ..Default::default()
        };
        let mut surface = RasterSurface::default();
        render(&mut surface, Some(&halves()), &settings, size(4, 2)).unwrap();
        assert_eq!(surface.size(), (2, 4));
        // Clockwise turn: the left (red) half ends up on top.
        assert_eq!(surface.pixels().pixel(0, 0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(surface.pixels().pixel(1, 3), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn filters_reach_the_surface() {
        let settings = FilterSettings {
            grayscale: 100,
            ..Default::default()
        };
        let mut surface = RasterSurface::default();
        render(&mut surface, Some(&halves()), &settings, size(4, 2)).unwrap();
        let px = surface.pixels().pixel(0, 0);
        assert!((px[0] - px[1]).abs() < 1e-5);
        assert!((px[1] - px[2]).abs() < 1e-5);
        assert!(surface.filter().to_string().contains("grayscale(100%)"));
    }
}
