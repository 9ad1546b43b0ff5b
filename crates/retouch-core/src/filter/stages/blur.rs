use anyhow::Result;

use crate::filter::stage::FilterStage;
use crate::layer::Layer;

/// Gaussian blur with the given standard deviation in pixels.
///
/// Pixels beyond the layer edge count as transparent, so edges fade out
/// the way a blurred drawing fades into an empty canvas.
pub struct Blur(pub f32);

impl Blur {
    fn kernel(&self) -> Vec<f32> {
        let sigma = self.0;
        let radius = (sigma * 3.0).ceil() as i32;
        let denom = 2.0 * sigma * sigma;
        let mut weights: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }
        weights
    }
}

impl FilterStage for Blur {
    fn name(&self) -> &str {
        "blur"
    }

    fn descriptor(&self) -> String {
        format!("blur({}px)", self.0)
    }

    fn apply(&self, input: Layer) -> Result<Layer> {
        if self.0 <= 0.0 || input.pixel_count() == 0 {
            return Ok(input);
        }

        let kernel = self.kernel();
        let radius = (kernel.len() / 2) as i64;
        let w = input.width as i64;
        let h = input.height as i64;

        // Premultiply so transparent neighbours do not bleed black into color.
        let mut premul = input.data;
        for px in premul.chunks_exact_mut(4) {
            let a = px[3];
            px[0] *= a;
            px[1] *= a;
            px[2] *= a;
        }

        let mut horizontal = vec![0.0_f32; premul.len()];
        for y in 0..h {
            for x in 0..w {
                let mut acc = [0.0_f32; 4];
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = x + k as i64 - radius;
                    if sx < 0 || sx >= w {
                        continue;
                    }
                    let idx = ((y * w + sx) * 4) as usize;
                    for c in 0..4 {
                        acc[c] += premul[idx + c] * weight;
                    }
                }
                let idx = ((y * w + x) * 4) as usize;
                horizontal[idx..idx + 4].copy_from_slice(&acc);
            }
        }

        let mut out = vec![0.0_f32; premul.len()];
        for y in 0..h {
            for x in 0..w {
                let mut acc = [0.0_f32; 4];
                for (k, weight) in kernel.iter().enumerate() {
                    let sy = y + k as i64 - radius;
                    if sy < 0 || sy >= h {
                        continue;
                    }
                    let idx = ((sy * w + x) * 4) as usize;
                    for c in 0..4 {
                        acc[c] += horizontal[idx + c] * weight;
                    }
                }
                let a = acc[3];
                let idx = ((y * w + x) * 4) as usize;
                if a > 1e-6 {
                    out[idx] = (acc[0] / a).clamp(0.0, 1.0);
                    out[idx + 1] = (acc[1] / a).clamp(0.0, 1.0);
                    out[idx + 2] = (acc[2] / a).clamp(0.0, 1.0);
                    out[idx + 3] = a.clamp(0.0, 1.0);
                }
            }
        }

        Layer::from_data(input.width, input.height, out)
    }
}
