//! Block splitting and classification.

/// Opening fence line of a code block.
pub(crate) const CODE_FENCE_OPEN: &str = "```\n";
/// Closing fence of a code block.
pub(crate) const CODE_FENCE_CLOSE: &str = "```";

/// Structural type of a markdown block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    /// Heading with level 1-6.
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// Split a document into blocks separated by blank lines.
///
/// Each block is trimmed; blocks that are empty after trimming are dropped.
pub fn split_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Count the leading `#` characters of a heading block.
///
/// Returns `None` unless there are 1-6 of them followed by a space.
pub(crate) fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && block[hashes..].starts_with(' ') {
        u8::try_from(hashes).ok()
    } else {
        None
    }
}

/// Prefix of the `index`-th (1-based) ordered list item.
pub(crate) fn ordered_prefix(index: usize) -> String {
    format!("{index}. ")
}

/// Classify a trimmed block.
///
/// Line-wise types (quote and both lists) must match on every line; a single
/// non-conforming line makes the whole block a paragraph.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level);
    }

    if block.starts_with(CODE_FENCE_OPEN) && block.ends_with(CODE_FENCE_CLOSE) {
        return BlockType::Code;
    }

    if block.split('\n').all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if block.split('\n').all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    if block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_prefix(i + 1)))
    {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}
