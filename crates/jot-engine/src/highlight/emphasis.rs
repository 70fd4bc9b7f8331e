//! Single-delimiter emphasis (`*italic*`, `_italic_`).
//!
//! A delimiter only opens or closes emphasis when it is *lone*: neither the
//! byte before nor the byte after is the same delimiter. That keeps `**bold**`
//! out of the italic pass without a combined grammar. Matching is
//! leftmost-first and lazy: the first lone delimiter after at least one
//! character of content closes the span, and content never crosses a line
//! break (`\n` or `\r`). Scanning resumes after each match, so spans never
//! overlap each other.

use crate::span::Span;

use super::cursor::Cursor;

pub const STAR: u8 = b'*';
pub const UNDERSCORE: u8 = b'_';

/// Finds all italic spans delimited by `delim`, including the delimiters.
pub fn italic_spans(text: &str, delim: u8) -> Vec<Span> {
    let mut cur = Cursor::new(text);
    let mut out = vec![];

    while !cur.eof() {
        if is_lone(&cur, delim)
            && let Some(end) = find_closer(cur.clone(), delim)
        {
            out.push(Span {
                start: cur.pos(),
                end,
            });
            cur.i = end;
            continue;
        }
        cur.bump();
    }

    out
}

fn is_lone(cur: &Cursor<'_>, delim: u8) -> bool {
    cur.peek() == Some(delim) && cur.prev() != Some(delim) && cur.next() != Some(delim)
}

/// Scans from an opening delimiter to its closer, returning the exclusive end.
fn find_closer(mut cur: Cursor<'_>, delim: u8) -> Option<usize> {
    cur.bump(); // opener
    let content_start = cur.pos();

    while let Some(b) = cur.peek() {
        if b == b'\n' || b == b'\r' {
            return None;
        }
        if cur.pos() > content_start && is_lone(&cur, delim) {
            return Some(cur.pos() + 1);
        }
        cur.bump();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(text: &'a str, delim: u8) -> Vec<&'a str> {
        italic_spans(text, delim)
            .into_iter()
            .map(|sp| &text[sp.range()])
            .collect()
    }

    #[test]
    fn simple_star_and_underscore() {
        assert_eq!(slices("an *easy* one", STAR), vec!["*easy*"]);
        assert_eq!(slices("an _easy_ one", UNDERSCORE), vec!["_easy_"]);
    }

    #[test]
    fn double_delimiters_are_not_italic() {
        assert!(slices("**bold**", STAR).is_empty());
        assert!(slices("__bold__", UNDERSCORE).is_empty());
    }

    #[test]
    fn italic_next_to_bold() {
        assert_eq!(slices("**b** and *i*", STAR), vec!["*i*"]);
    }

    #[test]
    fn closer_is_lazy() {
        assert_eq!(slices("*a* b *c*", STAR), vec!["*a*", "*c*"]);
    }

    #[test]
    fn content_must_be_non_empty() {
        // A lone closer directly after the opener is impossible (it would make
        // the opener non-lone), so `* *` needs real content.
        assert_eq!(slices("* *", STAR), vec!["* *"]);
        assert!(slices("*", STAR).is_empty());
    }

    #[test]
    fn content_may_contain_double_delimiters() {
        assert_eq!(slices("*a **b** c*", STAR), vec!["*a **b** c*"]);
    }

    #[test]
    fn does_not_cross_lines() {
        assert!(slices("*start\nend*", STAR).is_empty());
    }

    #[test]
    fn does_not_cross_crlf() {
        assert!(slices("*start\r\nend*", STAR).is_empty());
        assert_eq!(slices("*a*\r\n_b_", STAR), vec!["*a*"]);
        assert_eq!(slices("*a*\r\n_b_", UNDERSCORE), vec!["_b_"]);
    }

    #[test]
    fn retries_later_openers_after_failure() {
        assert_eq!(slices("*open\n*closed*", STAR), vec!["*closed*"]);
    }

    #[test]
    fn unicode_content() {
        let text = "héllo *wörld* ✓";
        assert_eq!(slices(text, STAR), vec!["*wörld*"]);
    }

    #[test]
    fn snake_case_identifiers_match_like_the_pattern_does() {
        // Same as the look-around pattern: intraword underscores pair up.
        assert_eq!(slices("my_var_name", UNDERSCORE), vec!["_var_"]);
    }
}
