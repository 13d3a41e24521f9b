//! Markdown to HTML conversion for static pages.
//!
//! This crate turns a markdown document into a tree of [`HtmlNode`]s and
//! renders that tree to an HTML string.
//!
//! # Architecture
//!
//! The pipeline runs in a single top-to-bottom pass:
//! - [`split_blocks`] / [`classify`]: blank-line separated blocks and their [`BlockType`]
//! - [`parse_inline`]: a block's text as a flat sequence of [`TextSpan`]s
//! - [`build_document`]: one HTML subtree per block under a root `div`
//! - [`HtmlNode::render`]: depth-first string rendering
//!
//! The supported syntax is deliberately small: ATX headings, fenced code
//! without a language, `>` quotes, `-` lists, sequentially numbered lists,
//! and flat (non-nested) bold, italic, code, link and image spans.
//!
//! Conversion has no shared state, so documents can be converted from any
//! number of threads at once.
//!
//! # Example
//!
//! ```
//! use mdsite_renderer::markdown_to_html;
//!
//! let html = markdown_to_html("> quote line\n> with *style*").unwrap();
//! assert_eq!(html, "<div><blockquote>quote line with <i>style</i></blockquote></div>");
//! ```

mod block;
mod builder;
mod error;
mod inline;
mod node;
mod span;

pub use block::{BlockType, classify, split_blocks};
pub use builder::{block_to_node, build_document, markdown_to_html, span_to_node};
pub use error::ConvertError;
pub use inline::{
    extract_images, extract_links, parse_inline, split_delimiter, split_images, split_links,
};
pub use node::{Attributes, HtmlNode, LeafNode, ParentNode};
pub use span::{SpanKind, TextSpan};
