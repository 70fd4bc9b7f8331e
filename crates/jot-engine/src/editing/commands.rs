use std::ops::Range;

use crate::continuation::{TextEdit, resolve_at};
use crate::editing::Document;
use crate::span::Span;

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText { at: usize, text: String },
    DeleteRange { range: Range<usize> },
    ReplaceRange { range: Range<usize>, text: String },
    /// Enter pressed at `at`: continue or leave a list, or plain line break.
    InsertNewline { at: usize },
}

/// Compile a command into a single replacement against the current text.
///
/// Offsets are clamped to the document and snapped to char boundaries.
pub(crate) fn compile_command(doc: &Document, cmd: &Cmd) -> TextEdit {
    match cmd {
        Cmd::InsertText { at, text } => {
            let at = doc.clamp_offset(*at);
            TextEdit {
                span: Span::new(at, at),
                text: text.clone(),
            }
        }
        Cmd::DeleteRange { range } => TextEdit {
            span: doc.clamp_range(range),
            text: String::new(),
        },
        Cmd::ReplaceRange { range, text } => TextEdit {
            span: doc.clamp_range(range),
            text: text.clone(),
        },
        Cmd::InsertNewline { at } => {
            let at = doc.clamp_offset(*at);
            let continuation = resolve_at(&doc.text(), at);
            continuation.edit().unwrap_or_else(|| TextEdit {
                span: Span::new(at, at),
                text: "\n".to_string(),
            })
        }
    }
}

/// Transform a selection through an edit.
///
/// Selections entirely after the edit shift by the net length change,
/// selections entirely before it stay put, and overlapping selections
/// collapse to the caret position after the edit.
pub(crate) fn transform_selection(range: &Range<usize>, edit: &TextEdit) -> Range<usize> {
    let removed = edit.span.len();
    let inserted = edit.text.len();
    let shift = |pos: usize| pos + inserted - removed;

    if edit.span.end <= range.start {
        shift(range.start)..shift(range.end)
    } else if edit.span.start >= range.end {
        range.clone()
    } else {
        let caret = edit.caret_after();
        caret..caret
    }
}
