use anyhow::Result;

use crate::filter::stage::FilterStage;
use crate::layer::Layer;

/// Linear scale of the color channels. 1.0 is unchanged.
pub struct Brightness(pub f32);

impl FilterStage for Brightness {
    fn name(&self) -> &str {
        "brightness"
    }

    fn descriptor(&self) -> String {
        format!("brightness({}%)", (self.0 * 100.0).round())
    }

    fn apply(&self, mut input: Layer) -> Result<Layer> {
        if self.0 == 1.0 {
            return Ok(input);
        }
        for pixel in input.data.chunks_exact_mut(4) {
            for c in &mut pixel[..3] {
                *c = (*c * self.0).clamp(0.0, 1.0);
            }
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_noop() {
        let buf = Layer::from_data(1, 1, vec![0.3, 0.6, 0.9, 1.0]).unwrap();
        let out = Brightness(1.0).apply(buf.clone()).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn zero_is_black_keeps_alpha() {
        let buf = Layer::from_data(1, 1, vec![0.3, 0.6, 0.9, 0.5]).unwrap();
        let out = Brightness(0.0).apply(buf).unwrap();
        assert_eq!(out.data, vec![0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn doubling_clips_at_white() {
        let buf = Layer::from_data(1, 1, vec![0.3, 0.6, 0.9, 1.0]).unwrap();
        let out = Brightness(2.0).apply(buf).unwrap();
        assert!((out.data[0] - 0.6).abs() < 1e-6);
        assert_eq!(out.data[1], 1.0);
        assert_eq!(out.data[2], 1.0);
    }
}
