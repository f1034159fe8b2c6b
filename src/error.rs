use thiserror::Error;

/// Errors raised while assembling or rendering a document.
#[derive(Debug, Error)]
pub enum Error {
    /// A style or heading level the style sheet does not define.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied section or table data that breaks an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// The layout engine could not place or encode some content.
    #[error("layout error: {0}")]
    Layout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
