use crate::span::Span;

/// The line around a cursor, isolated for continuation decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    /// Line text without its terminator.
    pub line_text: String,
    /// Byte offset of the line start in the document.
    pub line_start: usize,
    /// Cursor position relative to `line_start`.
    pub cursor_in_line: usize,
    /// Length of the `\n` or `\r\n` ending the line, 0 on the last line.
    pub terminator_len: usize,
}

impl LineContext {
    /// Isolates the line containing byte offset `cursor`.
    ///
    /// The cursor is clamped to the text and moved back onto a char boundary.
    /// A cursor sitting on a line feed belongs to the line that feed ends.
    pub fn at(text: &str, cursor: usize) -> Self {
        let cursor = floor_char_boundary(text, cursor);
        let line_start = text[..cursor].rfind('\n').map_or(0, |i| i + 1);
        let (content_end, terminator_len) = match text[cursor..].find('\n') {
            Some(rel) => {
                let lf = cursor + rel;
                if lf > line_start && text.as_bytes()[lf - 1] == b'\r' {
                    (lf - 1, 2)
                } else {
                    (lf, 1)
                }
            }
            None => (text.len(), 0),
        };

        Self {
            line_text: text[line_start..content_end].to_string(),
            line_start,
            cursor_in_line: cursor.min(content_end) - line_start,
            terminator_len,
        }
    }

    /// Byte offset of the cursor in the document.
    pub fn cursor(&self) -> usize {
        self.line_start + self.cursor_in_line
    }

    /// Span of the line content in document coordinates, terminator excluded.
    pub fn content_span(&self) -> Span {
        Span::new(self.line_start, self.line_start + self.line_text.len())
    }

    /// Span of the whole line including its terminator.
    pub fn full_span(&self) -> Span {
        let content = self.content_span();
        Span::new(content.start, content.end + self.terminator_len)
    }

    /// Lifts a span relative to the line into document coordinates.
    pub fn to_document(&self, local: Span) -> Span {
        local.offset(self.line_start)
    }
}

/// Largest char boundary not after `i`, clamped to the text length.
pub(crate) fn floor_char_boundary(text: &str, i: usize) -> usize {
    let mut i = i.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Iterates over lines with their byte spans (terminators included).
pub fn lines_with_spans(text: &str) -> impl Iterator<Item = (Span, &str)> + '_ {
    let mut offset = 0usize;
    text.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (Span::new(start, offset), line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_without_terminator() {
        let ctx = LineContext::at("- item", 6);
        assert_eq!(ctx.line_text, "- item");
        assert_eq!(ctx.line_start, 0);
        assert_eq!(ctx.cursor_in_line, 6);
        assert_eq!(ctx.terminator_len, 0);
    }

    #[test]
    fn middle_line_with_cursor_mid_line() {
        let text = "first\n- second\nthird";
        let ctx = LineContext::at(text, 9);
        assert_eq!(ctx.line_text, "- second");
        assert_eq!(ctx.line_start, 6);
        assert_eq!(ctx.cursor_in_line, 3);
        assert_eq!(ctx.terminator_len, 1);
        assert_eq!(ctx.full_span(), Span::new(6, 15));
    }

    #[test]
    fn cursor_on_line_feed_belongs_to_that_line() {
        let text = "one\ntwo";
        let ctx = LineContext::at(text, 3);
        assert_eq!(ctx.line_text, "one");
        assert_eq!(ctx.cursor(), 3);
    }

    #[test]
    fn cursor_after_trailing_newline_is_an_empty_line() {
        let text = "one\n";
        let ctx = LineContext::at(text, 4);
        assert_eq!(ctx.line_text, "");
        assert_eq!(ctx.line_start, 4);
        assert_eq!(ctx.terminator_len, 0);
    }

    #[test]
    fn crlf_terminator_is_stripped() {
        let text = "- a\r\n- b";
        let ctx = LineContext::at(text, 2);
        assert_eq!(ctx.line_text, "- a");
        assert_eq!(ctx.terminator_len, 2);
        assert_eq!(ctx.full_span(), Span::new(0, 5));
    }

    #[test]
    fn cursor_between_cr_and_lf_stays_inside_content() {
        let ctx = LineContext::at("ab\r\n", 3);
        assert_eq!(ctx.line_text, "ab");
        assert_eq!(ctx.cursor_in_line, 2);
    }

    #[test]
    fn out_of_range_and_mid_char_cursors_are_clamped() {
        let ctx = LineContext::at("héllo", 100);
        assert_eq!(ctx.cursor(), 6);
        let ctx = LineContext::at("héllo", 2);
        assert_eq!(ctx.cursor(), 1);
    }

    #[test]
    fn empty_document() {
        let ctx = LineContext::at("", 0);
        assert_eq!(ctx.line_text, "");
        assert_eq!(ctx.full_span(), Span::new(0, 0));
    }

    #[test]
    fn lines_with_spans_tracks_offsets() {
        let lines: Vec<_> = lines_with_spans("a\nbc\n\nd").collect();
        assert_eq!(
            lines,
            vec![
                (Span::new(0, 2), "a\n"),
                (Span::new(2, 5), "bc\n"),
                (Span::new(5, 6), "\n"),
                (Span::new(6, 7), "d"),
            ]
        );
    }
}
