//! Conversion error type.

/// Error returned when markdown cannot be converted to HTML.
///
/// Every variant aborts the whole document; there is no per-block recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// An inline delimiter was opened but never closed.
    #[error("Invalid Markdown syntax: missing closing delimiter '{delimiter}'")]
    UnbalancedDelimiter {
        /// The offending delimiter (e.g. `**`).
        delimiter: String,
    },
    /// A leaf node has no value to render.
    #[error("Leaf node has no value")]
    MissingLeafValue,
    /// A parent node has no tag.
    #[error("Parent node has no tag")]
    MissingParentTag,
    /// A parent node has no children sequence.
    #[error("Parent node has no children")]
    MissingParentChildren,
}
