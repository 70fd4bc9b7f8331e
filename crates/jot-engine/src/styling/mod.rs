//! # Styling
//!
//! Turns the tagged spans from [`crate::highlight`] into display attributes.
//!
//! Every rule pass yields spans in a fixed order. Folding sweeps the document
//! segment by segment (split at every span boundary), tracking which spans
//! are open. Each segment starts from the theme's base attributes and applies
//! the patch of every open span, in order. The last write to an attribute wins, which is how
//! inline code overrides the bold font it sits inside.

pub mod theme;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::highlight::StyleSpan;
use crate::span::Span;

pub use theme::{AttributePatch, ColorRole, Font, FontFamily, TextAttributes, Theme, Weight};

/// A maximal stretch of text sharing one set of attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyledRun {
    pub span: Span,
    pub attributes: TextAttributes,
}

/// Folds `spans` (in application order) over the base style of a document
/// `len` bytes long.
///
/// The runs are contiguous, cover `0..len` exactly and adjacent runs always
/// differ. An empty document yields no runs.
pub fn fold(len: usize, spans: &[StyleSpan], theme: &Theme) -> Vec<StyledRun> {
    // (offset, opens, span index); a span is active from its open to its close
    let mut events: Vec<(usize, bool, usize)> = Vec::with_capacity(spans.len() * 2);
    let mut bounds: Vec<usize> = Vec::with_capacity(spans.len() * 2 + 2);
    bounds.push(0);
    bounds.push(len);
    for (i, s) in spans.iter().enumerate() {
        let start = s.span.start.min(len);
        let end = s.span.end.min(len);
        if start >= end {
            continue;
        }
        events.push((start, true, i));
        events.push((end, false, i));
        bounds.push(start);
        bounds.push(end);
    }
    events.sort_unstable();
    bounds.sort_unstable();
    bounds.dedup();

    let patches: Vec<AttributePatch> = spans.iter().map(|s| theme.patch_for(s.tag)).collect();
    // Ordered by span index, which is application order
    let mut active: BTreeSet<usize> = BTreeSet::new();
    let mut pending = events.iter().peekable();
    let mut runs: Vec<StyledRun> = vec![];

    for w in bounds.windows(2) {
        let segment = Span {
            start: w[0],
            end: w[1],
        };
        while let Some(&&(at, opens, i)) = pending.peek()
            && at <= segment.start
        {
            if opens {
                active.insert(i);
            } else {
                active.remove(&i);
            }
            pending.next();
        }

        let mut attributes = theme.base();
        for &i in &active {
            patches[i].apply(&mut attributes);
        }

        match runs.last_mut() {
            Some(prev) if prev.attributes == attributes => prev.span.end = segment.end,
            _ => runs.push(StyledRun {
                span: segment,
                attributes,
            }),
        }
    }

    runs
}

/// Returns the attributes in effect at byte `offset`, if it lies inside a run.
pub fn attributes_at(runs: &[StyledRun], offset: usize) -> Option<&TextAttributes> {
    let idx = runs.partition_point(|r| r.span.end <= offset);
    runs.get(idx)
        .filter(|r| r.span.start <= offset)
        .map(|r| &r.attributes)
}
