mod blur;
mod brightness;
mod color_matrix;
mod invert;

pub use blur::Blur;
pub use brightness::Brightness;
pub use color_matrix::{Grayscale, Saturate, Sepia};
pub use invert::Invert;
