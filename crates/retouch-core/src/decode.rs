use image::RgbaImage;
use image::imageops::FilterType;
use tracing::{debug, warn};

use crate::error::EditorError;
use crate::layer::Layer;

/// On-screen size of the image before rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

/// Largest area the image may occupy on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            max_width: 700,
            max_height: 450,
        }
    }
}

/// A successfully decoded picture at its natural resolution.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub pixels: RgbaImage,
}

impl DecodedImage {
    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    /// Scale to fit within `limits`, preserving aspect ratio and never
    /// enlarging past natural size.
    pub fn display_size(&self, limits: DisplayLimits) -> DisplaySize {
        display_size(self.natural_width(), self.natural_height(), limits)
    }

    /// Resample to `size` for drawing.
    pub fn to_display_layer(&self, size: DisplaySize) -> Layer {
        if size.width == self.natural_width() && size.height == self.natural_height() {
            return Layer::from_rgba8(&self.pixels);
        }
        let resized =
            image::imageops::resize(&self.pixels, size.width, size.height, FilterType::Triangle);
        Layer::from_rgba8(&resized)
    }
}

pub fn display_size(width: u32, height: u32, limits: DisplayLimits) -> DisplaySize {
    if width == 0 || height == 0 {
        return DisplaySize {
            width: 0,
            height: 0,
        };
    }
    let scale = 1.0_f64
        .min(limits.max_width as f64 / width as f64)
        .min(limits.max_height as f64 / height as f64);
    DisplaySize {
        width: ((width as f64 * scale).floor() as u32).max(1),
        height: ((height as f64 * scale).floor() as u32).max(1),
    }
}

/// Decode an in-memory image file. Any format the `image` crate was built
/// with is accepted.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, EditorError> {
    let t0 = std::time::Instant::now();
    let img = image::load_from_memory(bytes).map_err(|err| {
        warn!(%err, len = bytes.len(), "image decode failed");
        EditorError::Decode(err.to_string())
    })?;
    if img.width() == 0 || img.height() == 0 {
        return Err(EditorError::Decode("image has zero size".into()));
    }
    debug!(
        elapsed_ms = t0.elapsed().as_millis(),
        width = img.width(),
        height = img.height(),
        "image decode"
    );
    Ok(DecodedImage {
        pixels: img.into_rgba8(),
    })
}
