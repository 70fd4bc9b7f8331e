//! # List continuation
//!
//! Decides what happens when the user presses Enter on a list line.
//!
//! The whole current line is inspected, not just the text before the cursor.
//! Patterns are tried in priority order, first match wins:
//!
//! 1. task item `- [ ] ` / `- [x] ` (a bullet too, so it must come first)
//! 2. bullet item `- ` / `* `
//! 3. ordered item `12. `
//!
//! A matched item with no content clears the line instead, which is how the
//! user leaves a list by pressing Enter twice.

pub mod line;

use regex::Captures;

use crate::highlight::patterns;
use crate::span::Span;

pub use line::{LineContext, lines_with_spans};

/// What to do with a line break request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinuationDecision {
    /// Not a list line; insert an ordinary line break.
    NoAction,
    /// Empty list item; delete this span of the line (line-relative).
    ClearEmptyItem(Span),
    /// Break the line and start the next one with this prefix.
    InsertPrefix(String),
}

/// Resolves a decision for a single line (without its terminator).
pub fn resolve(line: &str) -> ContinuationDecision {
    let line = line.trim_end_matches(['\n', '\r']);
    let p = patterns();

    let rules: [(&regex::Regex, fn(&Captures<'_>) -> String); 3] = [
        (&p.task_item, task_prefix),
        (&p.bullet_item, bullet_prefix),
        (&p.ordered_item, ordered_prefix),
    ];

    for (re, next_prefix) in rules {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let Some(matched) = caps.get(0) else {
            continue;
        };

        if line[matched.end()..].trim().is_empty() {
            log::debug!("empty list item {line:?}, clearing line");
            return ContinuationDecision::ClearEmptyItem(Span::new(0, line.len()));
        }

        let prefix = next_prefix(&caps);
        log::debug!("continuing list item {line:?} with {prefix:?}");
        return ContinuationDecision::InsertPrefix(prefix);
    }

    ContinuationDecision::NoAction
}

fn indent<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1).map_or("", |m| m.as_str())
}

fn task_prefix(caps: &Captures<'_>) -> String {
    // Continuing a task always starts unchecked.
    format!("{}- [ ] ", indent(caps))
}

fn bullet_prefix(caps: &Captures<'_>) -> String {
    let marker = caps.get(2).map_or("-", |m| m.as_str());
    format!("{}{} ", indent(caps), marker)
}

fn ordered_prefix(caps: &Captures<'_>) -> String {
    let n: u64 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    format!("{}{}. ", indent(caps), n.saturating_add(1))
}

/// A replacement of `span` in the document by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub text: String,
}

impl TextEdit {
    /// Applies the edit to an owned string buffer.
    pub fn apply(&self, buffer: &mut String) {
        buffer.replace_range(self.span.range(), &self.text);
    }

    /// Where the caret should sit once the edit is applied.
    pub fn caret_after(&self) -> usize {
        self.span.start + self.text.len()
    }
}

/// A resolved line break for a cursor position in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub line: LineContext,
    pub decision: ContinuationDecision,
}

impl Continuation {
    /// The document edit to perform, or `None` for a default line break.
    pub fn edit(&self) -> Option<TextEdit> {
        match &self.decision {
            ContinuationDecision::NoAction => None,
            ContinuationDecision::ClearEmptyItem(local) => Some(TextEdit {
                span: self.line.to_document(*local),
                text: String::new(),
            }),
            ContinuationDecision::InsertPrefix(prefix) => {
                let at = self.line.cursor();
                Some(TextEdit {
                    span: Span::new(at, at),
                    text: format!("\n{prefix}"),
                })
            }
        }
    }
}

/// Resolves a line break at byte offset `cursor` in `text`.
pub fn resolve_at(text: &str, cursor: usize) -> Continuation {
    let line = LineContext::at(text, cursor);
    let decision = resolve(&line.line_text);
    Continuation { line, decision }
}
