//! Markdown document to HTML node tree.

use crate::block::{
    BlockType, CODE_FENCE_CLOSE, CODE_FENCE_OPEN, classify, ordered_prefix, split_blocks,
};
use crate::error::ConvertError;
use crate::inline::parse_inline;
use crate::node::HtmlNode;
use crate::span::{SpanKind, TextSpan};

/// Convert a text span to a leaf node.
///
/// Images become void `img` leaves whose span text is the `alt` attribute.
pub fn span_to_node(span: &TextSpan) -> HtmlNode {
    let text = span.text();
    let url = span.url().unwrap_or_default();
    match span.kind() {
        SpanKind::Plain => HtmlNode::text(text),
        SpanKind::Bold => HtmlNode::leaf("b", text),
        SpanKind::Italic => HtmlNode::leaf("i", text),
        SpanKind::Code => HtmlNode::leaf("code", text),
        SpanKind::Link => HtmlNode::leaf("a", text).with_attr("href", url),
        SpanKind::Image => HtmlNode::leaf("img", "")
            .with_attr("src", url)
            .with_attr("alt", text),
    }
}

/// Parse inline markdown and convert every span to a node.
fn inline_children(text: &str) -> Result<Vec<HtmlNode>, ConvertError> {
    Ok(parse_inline(text)?.iter().map(span_to_node).collect())
}

/// Convert one trimmed block to its HTML subtree.
///
/// # Errors
///
/// Returns any inline parsing error from the block's content.
pub fn block_to_node(block: &str) -> Result<HtmlNode, ConvertError> {
    let block_type = classify(block);
    tracing::trace!(?block_type, "Classified block");

    match block_type {
        BlockType::Paragraph => {
            let text = block.replace('\n', " ");
            Ok(HtmlNode::parent("p", inline_children(&text)?))
        }
        BlockType::Heading(level) => {
            let text = block.get(usize::from(level) + 1..).unwrap_or_default();
            Ok(HtmlNode::parent(format!("h{level}"), inline_children(text)?))
        }
        BlockType::Quote => {
            let text = block
                .split('\n')
                .map(|line| {
                    line.strip_prefix("> ")
                        .or_else(|| line.strip_prefix('>'))
                        .unwrap_or(line)
                })
                .collect::<Vec<_>>()
                .join(" ");
            Ok(HtmlNode::parent("blockquote", inline_children(&text)?))
        }
        BlockType::UnorderedList => {
            let items = block
                .split('\n')
                .map(|line| list_item(line.strip_prefix("- ").unwrap_or(line)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(HtmlNode::parent("ul", items))
        }
        BlockType::OrderedList => {
            let items = block
                .split('\n')
                .enumerate()
                .map(|(i, line)| {
                    let prefix = ordered_prefix(i + 1);
                    list_item(line.strip_prefix(prefix.as_str()).unwrap_or(line))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(HtmlNode::parent("ol", items))
        }
        BlockType::Code => {
            // Fenced content is literal: no inline parsing.
            let code = block
                .strip_prefix(CODE_FENCE_OPEN)
                .and_then(|rest| rest.strip_suffix(CODE_FENCE_CLOSE))
                .unwrap_or_default();
            let code_node = span_to_node(&TextSpan::code(code));
            Ok(HtmlNode::parent("pre", vec![code_node]))
        }
    }
}

fn list_item(text: &str) -> Result<HtmlNode, ConvertError> {
    Ok(HtmlNode::parent("li", inline_children(text)?))
}

/// Convert a whole markdown document to a `div` containing one subtree per
/// block, in document order.
///
/// # Errors
///
/// Fails on the first block whose inline content cannot be parsed; no
/// partial tree is returned.
///
/// # Example
///
/// ```
/// use mdsite_renderer::build_document;
///
/// let node = build_document("# Heading\n\nA paragraph").unwrap();
/// assert_eq!(
///     node.render().unwrap(),
///     "<div><h1>Heading</h1><p>A paragraph</p></div>"
/// );
/// ```
pub fn build_document(markdown: &str) -> Result<HtmlNode, ConvertError> {
    let blocks = split_blocks(markdown);
    tracing::debug!(blocks = blocks.len(), "Building document");

    let children = blocks
        .into_iter()
        .map(block_to_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Convert markdown straight to an HTML string.
///
/// # Errors
///
/// Returns the first conversion or rendering error.
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    build_document(markdown)?.render()
}
