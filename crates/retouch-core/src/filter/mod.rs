pub mod stage;
pub mod stages;

use std::fmt;

use anyhow::Result;
use tracing::trace;

use crate::layer::Layer;
use crate::settings::FilterSettings;
use stage::FilterStage;

/// Ordered filter pipeline derived from a settings snapshot.
///
/// ```text
/// brightness -> saturate -> invert -> grayscale -> sepia -> blur
/// ```
///
/// The order is fixed; each stage clamps its output to [0, 1] before the
/// next one runs.
pub struct FilterChain {
    stages: Vec<Box<dyn FilterStage>>,
}

impl FilterChain {
    pub fn from_settings(settings: &FilterSettings) -> Self {
        let percent = |v: i32| v.max(0) as f32 / 100.0;
        let unit_percent = |v: i32| v.clamp(0, 100) as f32 / 100.0;
        Self {
            stages: vec![
                Box::new(stages::Brightness(percent(settings.brightness))),
                Box::new(stages::Saturate(percent(settings.saturation))),
                Box::new(stages::Invert(unit_percent(settings.inversion))),
                Box::new(stages::Grayscale(unit_percent(settings.grayscale))),
                Box::new(stages::Sepia(unit_percent(settings.sepia))),
                Box::new(stages::Blur(settings.blur.max(0) as f32)),
            ],
        }
    }

    /// A chain that leaves pixels untouched.
    pub fn none() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn process(&self, input: Layer) -> Result<Layer> {
        let mut current = input;
        for stage in &self.stages {
            trace!(stage = stage.name(), "filtering");
            current = stage.apply(current)?;
        }
        Ok(current)
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stages.is_empty() {
            return f.write_str("none");
        }
        let parts: Vec<String> = self.stages.iter().map(|s| s.descriptor()).collect();
        f.write_str(&parts.join(" "))
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FilterChain({self})")
    }
}
