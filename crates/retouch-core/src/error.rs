use thiserror::Error;

/// Failures the editor reports to its caller.
///
/// Out-of-range history navigation is not an error: it is ignored and
/// surfaces as `None` from the history store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
