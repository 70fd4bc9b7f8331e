//! # Highlighting
//!
//! Rule-based markdown highlighting over the full document text.
//!
//! Each rule scans the whole text on its own and contributes [`StyleSpan`]s.
//! Rules run in a fixed order and their spans are returned in that order;
//! overlaps are settled later by [`crate::styling::fold`], where the later
//! rule wins per attribute:
//!
//! 1. headings
//! 2. bold (`**` then `__`)
//! 3. italic (`*` then `_`)
//! 4. links
//! 5. list markers
//! 6. blockquotes
//! 7. inline code, last so it overrides emphasis inside backticks
//!
//! There is no incremental state: every call rescans everything, so
//! highlighting unchanged text always yields the same spans.
//!
//! Rules run as independent passes rather than one grammar, so runs of three
//! or more identical delimiters (`***x***`) can be claimed by both the bold
//! and italic passes.

pub mod cursor;
pub mod emphasis;
pub mod patterns;
pub mod types;

use regex::Regex;

use crate::span::Span;
use crate::styling::{self, AttributePatch, StyledRun, Theme};

pub use patterns::{PatternError, Patterns, patterns};
pub use types::{StyleSpan, StyleTag};

/// Highlights `text` with the default theme.
pub fn highlight(text: &str) -> Vec<StyleSpan> {
    Highlighter::default().highlight(text)
}

/// Highlighter bound to a [`Theme`].
///
/// The tags it emits do not depend on the theme; the theme only matters when
/// spans are folded into [`StyledRun`]s.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Runs every rule over `text` and returns spans in application order.
    pub fn highlight(&self, text: &str) -> Vec<StyleSpan> {
        let p = patterns();
        let mut out = vec![];

        for caps in p.heading.captures_iter(text) {
            let (Some(full), Some(hashes)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let level = hashes.as_str().len() as u8;
            out.push(StyleSpan::new(
                Span::new(full.start(), full.end()),
                StyleTag::Heading { level },
            ));
        }

        push_matches(&mut out, &p.bold_star, text, StyleTag::Bold);
        push_matches(&mut out, &p.bold_underscore, text, StyleTag::Bold);

        for delim in [emphasis::STAR, emphasis::UNDERSCORE] {
            out.extend(
                emphasis::italic_spans(text, delim)
                    .into_iter()
                    .map(|span| StyleSpan::new(span, StyleTag::Italic)),
            );
        }

        push_matches(&mut out, &p.link, text, StyleTag::Link);

        for caps in p.list_marker.captures_iter(text) {
            if let Some(marker) = caps.get(2) {
                out.push(StyleSpan::new(
                    Span::new(marker.start(), marker.end()),
                    StyleTag::ListMarker,
                ));
            }
        }

        push_matches(&mut out, &p.blockquote, text, StyleTag::Blockquote);
        push_matches(&mut out, &p.inline_code, text, StyleTag::InlineCode);

        log::trace!("highlighted {} bytes into {} spans", text.len(), out.len());
        out
    }

    /// The attribute patch this highlighter applies for `tag`.
    pub fn style_for(&self, tag: StyleTag) -> AttributePatch {
        self.theme.patch_for(tag)
    }

    /// Highlights `text` and folds the spans over the base style.
    pub fn style(&self, text: &str) -> Vec<StyledRun> {
        let spans = self.highlight(text);
        styling::fold(text.len(), &spans, &self.theme)
    }
}

fn push_matches(out: &mut Vec<StyleSpan>, re: &Regex, text: &str, tag: StyleTag) {
    out.extend(
        re.find_iter(text)
            .map(|m| StyleSpan::new(Span::new(m.start(), m.end()), tag)),
    );
}
