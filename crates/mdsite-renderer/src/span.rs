//! Inline text spans.

/// Inline style of a [`TextSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A contiguous run of text sharing one inline style.
///
/// Links and images carry a destination URL; every other kind has none.
/// The constructors are the only way to build a span, so a `Link` or `Image`
/// without a URL cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    text: String,
    kind: SpanKind,
    url: Option<String>,
}

impl TextSpan {
    /// Create an unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, SpanKind::Plain)
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, SpanKind::Bold)
    }

    /// Create an italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, SpanKind::Italic)
    }

    /// Create an inline code span.
    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(text, SpanKind::Code)
    }

    /// Create a link span with visible `text` pointing at `url`.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    /// Create an image span with `alt` text and source `url`.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    fn styled(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// Destination URL, present only for links and images.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}
