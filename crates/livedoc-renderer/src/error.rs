//! Renderer error types.

/// Error raised while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Document body exceeds the configured size limit.
    #[error("Document is {len} bytes, the limit is {limit} bytes")]
    ContentTooLarge {
        /// Body size in bytes.
        len: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// Writing into the output buffer failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}
