use anyhow::Result;

use crate::layer::Layer;

/// A single effect in the filter chain.
pub trait FilterStage: Send + Sync {
    fn name(&self) -> &str;
    /// Descriptor in the `name(amount)` form used by canvas filter strings.
    fn descriptor(&self) -> String;
    fn apply(&self, input: Layer) -> Result<Layer>;
}
