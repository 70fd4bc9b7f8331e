use serde::Serialize;

use crate::span::Span;

/// Semantic classification of a highlighted region.
///
/// Tags describe *what* a region is, never how it looks. The mapping to
/// fonts and colours lives in [`crate::styling`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleTag {
    /// An ATX heading line; `level` is the number of leading `#` (1..=6).
    Heading { level: u8 },
    Bold,
    Italic,
    /// `[label](url)` including brackets and parens.
    Link,
    /// The marker of a list item (`-`, `*`, `+` or `12.`) without indent or content.
    ListMarker,
    Blockquote,
    /// Backtick-delimited code, including the backticks.
    InlineCode,
}

/// A tagged byte range produced by one highlight rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StyleSpan {
    pub span: Span,
    pub tag: StyleTag,
}

impl StyleSpan {
    pub fn new(span: Span, tag: StyleTag) -> Self {
        Self { span, tag }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
