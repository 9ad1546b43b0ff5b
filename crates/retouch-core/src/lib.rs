pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod filter;
pub mod history;
pub mod layer;
pub mod render;
pub mod session;
pub mod settings;
pub mod surface;

pub use error::EditorError;
pub use session::{Editor, Effect, Event};
pub use settings::{FilterKind, FilterSettings, Step};
