use anyhow::Result;

use crate::filter::stage::FilterStage;
use crate::layer::Layer;

/// Blend toward the inverted color. 0.0 is unchanged, 1.0 fully inverted.
pub struct Invert(pub f32);

impl FilterStage for Invert {
    fn name(&self) -> &str {
        "invert"
    }

    fn descriptor(&self) -> String {
        format!("invert({}%)", (self.0 * 100.0).round())
    }

    fn apply(&self, mut input: Layer) -> Result<Layer> {
        if self.0 == 0.0 {
            return Ok(input);
        }
        let amount = self.0;
        for pixel in input.data.chunks_exact_mut(4) {
            for c in &mut pixel[..3] {
                *c = (amount * (1.0 - *c) + (1.0 - amount) * *c).clamp(0.0, 1.0);
            }
        }
        Ok(input)
    }
}
