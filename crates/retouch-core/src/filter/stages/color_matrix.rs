use anyhow::Result;

use crate::filter::stage::FilterStage;
use crate::layer::Layer;

type Matrix = [[f32; 3]; 3];

fn apply_matrix(mut input: Layer, m: &Matrix) -> Layer {
    for pixel in input.data.chunks_exact_mut(4) {
        let (r, g, b) = (pixel[0], pixel[1], pixel[2]);
        for (row, out) in m.iter().zip(pixel.iter_mut()) {
            *out = (row[0] * r + row[1] * g + row[2] * b).clamp(0.0, 1.0);
        }
    }
    input
}

/// Saturation scale. 1.0 is unchanged, 0.0 fully desaturated, >1.0 oversaturated.
pub struct Saturate(pub f32);

impl Saturate {
    fn matrix(&self) -> Matrix {
        let s = self.0;
        [
            [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
        ]
    }
}

impl FilterStage for Saturate {
    fn name(&self) -> &str {
        "saturate"
    }

    fn descriptor(&self) -> String {
        format!("saturate({}%)", (self.0 * 100.0).round())
    }

    fn apply(&self, input: Layer) -> Result<Layer> {
        if self.0 == 1.0 {
            return Ok(input);
        }
        Ok(apply_matrix(input, &self.matrix()))
    }
}

/// Blend toward luma gray. 0.0 is unchanged, 1.0 fully gray.
pub struct Grayscale(pub f32);

impl Grayscale {
    fn matrix(&self) -> Matrix {
        let a = 1.0 - self.0;
        [
            [0.2126 + 0.7874 * a, 0.7152 - 0.7152 * a, 0.0722 - 0.0722 * a],
            [0.2126 - 0.2126 * a, 0.7152 + 0.2848 * a, 0.0722 - 0.0722 * a],
            [0.2126 - 0.2126 * a, 0.7152 - 0.7152 * a, 0.0722 + 0.9278 * a],
        ]
    }
}

impl FilterStage for Grayscale {
    fn name(&self) -> &str {
        "grayscale"
    }

    fn descriptor(&self) -> String {
        format!("grayscale({}%)", (self.0 * 100.0).round())
    }

    fn apply(&self, input: Layer) -> Result<Layer> {
        if self.0 == 0.0 {
            return Ok(input);
        }
        Ok(apply_matrix(input, &self.matrix()))
    }
}

/// Blend toward a warm brown tone. 0.0 is unchanged, 1.0 full sepia.
pub struct Sepia(pub f32);

impl Sepia {
    fn matrix(&self) -> Matrix {
        let a = 1.0 - self.0;
        [
            [0.393 + 0.607 * a, 0.769 - 0.769 * a, 0.189 - 0.189 * a],
            [0.349 - 0.349 * a, 0.686 + 0.314 * a, 0.168 - 0.168 * a],
            [0.272 - 0.272 * a, 0.534 - 0.534 * a, 0.131 + 0.869 * a],
        ]
    }
}

impl FilterStage for Sepia {
    fn name(&self) -> &str {
        "sepia"
    }

    fn descriptor(&self) -> String {
        format!("sepia({}%)", (self.0 * 100.0).round())
    }

    fn apply(&self, input: Layer) -> Result<Layer> {
        if self.0 == 0.0 {
            return Ok(input);
        }
        Ok(apply_matrix(input, &self.matrix()))
    }
}
