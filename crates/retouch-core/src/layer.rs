use image::RgbaImage;

/// Straight-alpha f32 RGBA raster.
///
/// Pixel data is interleaved RGBARGBA... with sRGB-encoded color channels
/// in [0, 1]. Filter stages and the drawing surface work on this type.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub width: u32,
    pub height: u32,
    /// Flat pixel data: [R, G, B, A, R, G, B, A, ...].
    pub data: Vec<f32>,
}

impl Layer {
    /// Fully transparent layer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> anyhow::Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        anyhow::ensure!(
            data.len() == expected,
            "expected {expected} floats for {width}x{height} RGBA, got {}",
            data.len()
        );
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_rgba8(img: &RgbaImage) -> Self {
        let data = img.as_raw().iter().map(|&v| v as f32 / 255.0).collect();
        Self {
            width: img.width(),
            height: img.height(),
            data,
        }
    }

    /// Quantize to 8-bit RGBA for display and export.
    pub fn to_rgba8(&self) -> RgbaImage {
        let bytes: Vec<u8> = self
            .data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
            .collect();
        // Length is width*height*4 by construction.
        RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: [f32; 4]) {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&px);
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Composite `src` over this layer (source-over). Both must share dimensions.
    pub fn composite_over(&mut self, src: &Layer) -> anyhow::Result<()> {
        anyhow::ensure!(
            src.width == self.width && src.height == self.height,
            "cannot composite {}x{} onto {}x{}",
            src.width,
            src.height,
            self.width,
            self.height
        );
        for (dst, s) in self
            .data
            .chunks_exact_mut(4)
            .zip(src.data.chunks_exact(4))
        {
            let sa = s[3];
            if sa <= 0.0 {
                continue;
            }
            let da = dst[3];
            let out_a = sa + da * (1.0 - sa);
            for c in 0..3 {
                let premul = s[c] * sa + dst[c] * da * (1.0 - sa);
                dst[c] = premul / out_a;
            }
            dst[3] = out_a;
        }
        Ok(())
    }
}

impl Default for Layer {
    fn default() -> Self {
        Layer::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_layer_is_transparent() {
        let layer = Layer::new(10, 5);
        assert_eq!(layer.data.len(), 10 * 5 * 4);
        assert_eq!(layer.pixel_count(), 50);
        assert!(layer.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_data_validates_length() {
        assert!(Layer::from_data(2, 2, vec![0.0; 16]).is_ok());
        assert!(Layer::from_data(2, 2, vec![0.0; 12]).is_err());
    }

    #[test]
    fn from_data_zero_dimensions() {
        let layer = Layer::from_data(0, 0, vec![]).unwrap();
        assert_eq!(layer.pixel_count(), 0);
    }

    #[test]
    fn rgba8_conversion_preserves_bytes() {
        let img = RgbaImage::from_raw(2, 1, vec![0, 128, 255, 255, 10, 20, 30, 40]).unwrap();
        let layer = Layer::from_rgba8(&img);
        assert!((layer.data[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(layer.to_rgba8().as_raw(), img.as_raw());
    }

    #[test]
    fn to_rgba8_clamps_out_of_range() {
        let layer = Layer::from_data(1, 1, vec![-0.5, 2.0, 0.5, 1.0]).unwrap();
        let out = layer.to_rgba8();
        assert_eq!(out.get_pixel(0, 0).0, [0, 255, 128, 255]);
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let mut dst = Layer::from_data(1, 1, vec![0.2, 0.2, 0.2, 1.0]).unwrap();
        let src = Layer::from_data(1, 1, vec![0.9, 0.1, 0.4, 1.0]).unwrap();
        dst.composite_over(&src).unwrap();
        assert_eq!(dst.pixel(0, 0), [0.9, 0.1, 0.4, 1.0]);
    }

    #[test]
    fn transparent_source_leaves_destination() {
        let mut dst = Layer::from_data(1, 1, vec![0.2, 0.3, 0.4, 1.0]).unwrap();
        dst.composite_over(&Layer::new(1, 1)).unwrap();
        assert_eq!(dst.pixel(0, 0), [0.2, 0.3, 0.4, 1.0]);
    }

    #[test]
    fn composite_rejects_size_mismatch() {
        let mut dst = Layer::new(2, 2);
        assert!(dst.composite_over(&Layer::new(1, 1)).is_err());
    }

    #[test]
    fn clear_resets_to_transparent() {
        let mut layer = Layer::from_data(1, 1, vec![1.0; 4]).unwrap();
        layer.clear();
        assert_eq!(layer.pixel(0, 0), [0.0; 4]);
    }
}
