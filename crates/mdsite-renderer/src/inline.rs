//! Inline span parsing.
//!
//! A text run is parsed in a fixed sequence of flat passes, each of which only
//! splits spans that are still [`SpanKind::Plain`](crate::SpanKind::Plain):
//!
//! 1. images (`![alt](url)`)
//! 2. links (`[text](url)` not preceded by `!`)
//! 3. delimiters `**` (bold), `*` (italic), `_` (italic), `` ` `` (code)
//!
//! The order matters: `**` has to be consumed before `*`, and images before
//! links. Styled spans are never re-parsed, so `**a *b***` does not nest.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ConvertError;
use crate::span::TextSpan;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Link syntax without the `!` guard; the guard is applied by [`link_matches`]
/// since the regex crate has no lookbehind.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// One image or link occurrence with its byte range in the scanned text.
#[derive(Debug, Clone, Copy)]
struct MarkupMatch<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    url: &'a str,
}

impl<'a> MarkupMatch<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let (Some(whole), Some(text), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            return None;
        };
        Some(Self {
            start: whole.start(),
            end: whole.end(),
            text: text.as_str(),
            url: url.as_str(),
        })
    }
}

fn image_matches(text: &str) -> Vec<MarkupMatch<'_>> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|caps| MarkupMatch::from_captures(&caps))
        .collect()
}

fn link_matches(text: &str) -> Vec<MarkupMatch<'_>> {
    let mut matches = Vec::new();
    let mut pos = 0;
    while let Some(caps) = LINK_RE.captures_at(text, pos) {
        let Some(found) = MarkupMatch::from_captures(&caps) else {
            break;
        };
        if text[..found.start].ends_with('!') {
            // Image syntax: retry from the byte after `[`.
            pos = found.start + 1;
            continue;
        }
        pos = found.end;
        matches.push(found);
    }
    matches
}

/// Extract `(alt, url)` pairs for every `![alt](url)` in `text`.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    image_matches(text)
        .into_iter()
        .map(|m| (m.text, m.url))
        .collect()
}

/// Extract `(text, url)` pairs for every `[text](url)` in `text` that is not
/// part of an image.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    link_matches(text)
        .into_iter()
        .map(|m| (m.text, m.url))
        .collect()
}

/// Split plain spans around image markup.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_markup(spans, image_matches, |alt, url| TextSpan::image(alt, url))
}

/// Split plain spans around link markup.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_markup(spans, link_matches, |text, url| TextSpan::link(text, url))
}

fn split_markup<F>(
    spans: Vec<TextSpan>,
    find: fn(&str) -> Vec<MarkupMatch<'_>>,
    make_span: F,
) -> Vec<TextSpan>
where
    F: Fn(&str, &str) -> TextSpan,
{
    let mut result = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            result.push(span);
            continue;
        }

        let text = span.text();
        let mut last_end = 0;
        for found in find(text) {
            if last_end < found.start {
                result.push(TextSpan::plain(&text[last_end..found.start]));
            }
            result.push(make_span(found.text, found.url));
            last_end = found.end;
        }
        if last_end < text.len() || text.is_empty() {
            result.push(TextSpan::plain(&text[last_end..]));
        }
    }
    result
}

/// Split plain spans on every occurrence of `delimiter`.
///
/// Even-indexed parts stay plain, odd-indexed parts are built with
/// `make_span`. Empty parts are dropped, so `****` produces nothing.
/// Spans that are already styled pass through untouched.
///
/// # Errors
///
/// Returns [`ConvertError::UnbalancedDelimiter`] if a plain span contains an
/// odd number of delimiters.
pub fn split_delimiter<F>(
    spans: Vec<TextSpan>,
    delimiter: &str,
    make_span: F,
) -> Result<Vec<TextSpan>, ConvertError>
where
    F: Fn(String) -> TextSpan,
{
    let mut result = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            result.push(span);
            continue;
        }

        let parts: Vec<&str> = span.text().split(delimiter).collect();
        if parts.len().is_multiple_of(2) {
            return Err(ConvertError::UnbalancedDelimiter {
                delimiter: delimiter.to_owned(),
            });
        }

        for (index, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            if index % 2 == 0 {
                result.push(TextSpan::plain(part));
            } else {
                result.push(make_span(part.to_owned()));
            }
        }
    }
    Ok(result)
}

/// Parse a run of inline markdown into styled spans.
///
/// # Errors
///
/// Returns [`ConvertError::UnbalancedDelimiter`] naming the first delimiter
/// (in pass order) that is left open.
///
/// # Example
///
/// ```
/// use mdsite_renderer::{TextSpan, parse_inline};
///
/// let spans = parse_inline("plain **bold** [docs](/docs)").unwrap();
/// assert_eq!(
///     spans,
///     vec![
///         TextSpan::plain("plain "),
///         TextSpan::bold("bold"),
///         TextSpan::plain(" "),
///         TextSpan::link("docs", "/docs"),
///     ]
/// );
/// ```
pub fn parse_inline(text: &str) -> Result<Vec<TextSpan>, ConvertError> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_images(spans);
    let spans = split_links(spans);
    let spans = split_delimiter(spans, "**", TextSpan::bold)?;
    let spans = split_delimiter(spans, "*", TextSpan::italic)?;
    let spans = split_delimiter(spans, "_", TextSpan::italic)?;
    split_delimiter(spans, "`", TextSpan::code)
}
