use std::borrow::Cow;
use std::ops::Range;

use xi_rope::delta::{Builder, DeltaElement};
use xi_rope::{Delta, Rope, RopeInfo};

use crate::continuation::TextEdit;
use crate::editing::{Cmd, Patch, commands};
use crate::span::Span;

/// The text buffer and caret of one note being edited.
///
/// - **Lossless storage**: the note lives in one `xi_rope::Rope`; `to_bytes()`
///   returns exactly what was loaded plus the applied edits
/// - **Command-based editing**: every change goes through [`Cmd`], which
///   compiles to one replacement applied as a rope `Delta`
/// - **Selection tracking**: the selection is carried through each edit
/// - **Versioning**: a counter bumps on every edit, so a surface can tell
///   whether the highlighting it holds is stale
#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
    selection: Range<usize>,
    version: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            buffer: Rope::from(""),
            selection: 0..0,
            version: 0,
        }
    }
}

impl Document {
    /// Create a new document from raw bytes; the caret starts at the end.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        let buffer = Rope::from(text);
        let len = buffer.len();

        Ok(Self {
            buffer,
            selection: len..len,
            version: 0,
        })
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.text().into_bytes()
    }

    /// Apply a command, returning what changed and the new selection.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let edit = commands::compile_command(self, &cmd);
        let delta = self.delta_for(&edit);

        // Inserted regions, in new-text coordinates
        let mut changed = Vec::new();
        let mut cursor = 0;
        for op in delta.els.iter() {
            match op {
                DeltaElement::Copy(from, to) => {
                    cursor += to - from;
                }
                DeltaElement::Insert(inserted) => {
                    let start = cursor;
                    let end = cursor + inserted.len();
                    changed.push(start..end);
                    cursor = end;
                }
            }
        }

        self.buffer = delta.apply(&self.buffer);
        self.selection = commands::transform_selection(&self.selection, &edit);
        self.version += 1;

        log::trace!(
            "applied {cmd:?} -> v{} selection {:?}",
            self.version,
            self.selection
        );

        Patch {
            changed,
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }

    fn delta_for(&self, edit: &TextEdit) -> Delta<RopeInfo> {
        let mut builder = Builder::new(self.len());
        if edit.text.is_empty() {
            builder.delete(edit.span.range());
        } else {
            builder.replace(edit.span.range(), Rope::from(edit.text.as_str()));
        }
        builder.build()
    }

    /// Get the current selection range
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Caret position (end of the selection).
    pub fn caret(&self) -> usize {
        self.selection.end
    }

    /// Set the selection; both ends are clamped to the document.
    pub fn set_selection(&mut self, selection: Range<usize>) {
        let start = self.clamp_offset(selection.start);
        let end = self.clamp_offset(selection.end);
        self.selection = start..end;
    }

    /// Collapse the selection to a caret at `offset`.
    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(offset..offset);
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        String::from(&self.buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice the buffer to a cow string
    pub fn slice_to_cow(&self, range: Range<usize>) -> Cow<'_, str> {
        let span = self.clamp_range(&range);
        self.buffer.slice_to_cow(span.range())
    }

    /// Number of lines; a trailing line feed starts a new, empty line.
    pub fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.len()) + 1
    }

    /// Zero-based line and byte column of `offset`.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = self.clamp_offset(offset);
        let line = self.buffer.line_of_offset(offset);
        (line, offset - self.buffer.offset_of_line(line))
    }

    /// Offset of `col` on `line`, clamped to the line's content (never inside
    /// a `\r\n` terminator) and snapped back onto a char boundary.
    pub fn offset_of_line_col(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        let start = self.buffer.offset_of_line(line);
        let mut end = if line + 1 < self.line_count() {
            self.buffer.offset_of_line(line + 1) - 1
        } else {
            self.len()
        };
        if end > start && self.buffer.byte_at(end - 1) == b'\r' {
            end -= 1;
        }
        self.clamp_offset(start.saturating_add(col).min(end))
    }

    /// Offset of the char before `offset`, if any.
    pub fn prev_char(&self, offset: usize) -> Option<usize> {
        self.buffer.prev_codepoint_offset(self.clamp_offset(offset))
    }

    /// Offset just past the char at `offset`, if any.
    pub fn next_char(&self, offset: usize) -> Option<usize> {
        self.buffer.next_codepoint_offset(self.clamp_offset(offset))
    }

    /// Clamp to the document and move back onto a char boundary.
    pub(crate) fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.len());
        while offset > 0 && !self.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    pub(crate) fn clamp_range(&self, range: &Range<usize>) -> Span {
        let start = self.clamp_offset(range.start);
        let end = self.clamp_offset(range.end).max(start);
        Span::new(start, end)
    }

    fn is_char_boundary(&self, offset: usize) -> bool {
        if offset >= self.len() {
            return true;
        }
        // A byte starts a char unless it is a UTF-8 continuation byte.
        let byte = self.buffer.byte_at(offset);
        (byte as i8) >= -0x40
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_bytes_puts_caret_at_end() {
        let doc = Document::from_bytes(b"abc").unwrap();
        assert_eq!(doc.selection(), 3..3);
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(Document::from_bytes(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn round_trip_is_lossless() {
        let md = "# Title\r\n\n- [ ] a\n\t* b\n";
        let doc = Document::from_bytes(md.as_bytes()).unwrap();
        assert_eq!(doc.to_bytes(), md.as_bytes());
    }

    #[test]
    fn insert_text_updates_buffer_selection_and_version() {
        let mut doc = Document::from_bytes(b"Hello").unwrap();
        let patch = doc.apply(Cmd::InsertText {
            at: 5,
            text: " there".to_string(),
        });
        assert_eq!(doc.text(), "Hello there");
        assert_eq!(patch.changed, vec![5..11]);
        assert_eq!(patch.new_selection, 11..11);
        assert_eq!(patch.version, 1);
    }

    #[test]
    fn delete_range() {
        let mut doc = Document::from_bytes(b"Hello World").unwrap();
        doc.set_caret(11);
        let patch = doc.apply(Cmd::DeleteRange { range: 5..11 });
        assert_eq!(doc.text(), "Hello");
        assert!(patch.changed.is_empty());
        assert_eq!(doc.selection(), 5..5);
    }

    #[test]
    fn replace_range() {
        let mut doc = Document::from_bytes(b"Hello World").unwrap();
        doc.set_caret(0);
        doc.apply(Cmd::ReplaceRange {
            range: 6..11,
            text: "Universe".to_string(),
        });
        assert_eq!(doc.text(), "Hello Universe");
        assert_eq!(doc.selection(), 0..0);
    }

    #[test]
    fn newline_continues_bullet() {
        let mut doc = Document::from_bytes(b"- milk").unwrap();
        let patch = doc.apply(Cmd::InsertNewline { at: 6 });
        assert_eq!(doc.text(), "- milk\n- ");
        assert_eq!(patch.new_selection, 9..9);
    }

    #[test]
    fn newline_continues_task_unchecked() {
        let mut doc = Document::from_bytes(b"- [x] done").unwrap();
        doc.apply(Cmd::InsertNewline { at: 10 });
        assert_eq!(doc.text(), "- [x] done\n- [ ] ");
    }

    #[test]
    fn newline_on_empty_item_leaves_list() {
        let mut doc = Document::from_bytes(b"1. one\n2. ").unwrap();
        let patch = doc.apply(Cmd::InsertNewline { at: 10 });
        assert_eq!(doc.text(), "1. one\n");
        assert_eq!(patch.new_selection, 7..7);
    }

    #[test]
    fn newline_mid_line_splits_item() {
        let mut doc = Document::from_bytes(b"- ab").unwrap();
        doc.set_caret(3);
        doc.apply(Cmd::InsertNewline { at: 3 });
        assert_eq!(doc.text(), "- a\n- b");
        assert_eq!(doc.caret(), 6);
    }

    #[test]
    fn plain_newline() {
        let mut doc = Document::from_bytes(b"text").unwrap();
        doc.apply(Cmd::InsertNewline { at: 4 });
        assert_eq!(doc.text(), "text\n");
        assert_eq!(doc.caret(), 5);
    }

    #[test]
    fn line_col_and_back() {
        let doc = Document::from_bytes(b"ab\ncde\n").unwrap();
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_col(4), (1, 1));
        assert_eq!(doc.line_col(7), (2, 0));
        assert_eq!(doc.offset_of_line_col(1, 1), 4);
        // Column past the end of a line clamps to before its line feed
        assert_eq!(doc.offset_of_line_col(0, 10), 2);
        assert_eq!(doc.offset_of_line_col(9, 0), 7);
    }

    #[test]
    fn line_col_on_crlf_stays_before_the_terminator() {
        let mut doc = Document::from_bytes(b"ab\r\ncd\r\n").unwrap();
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.offset_of_line_col(0, usize::MAX), 2);
        assert_eq!(doc.offset_of_line_col(1, 9), 6);
        assert_eq!(doc.offset_of_line_col(1, 1), 5);

        // Typing at the end of the first line keeps `\r\n` intact
        let at = doc.offset_of_line_col(0, 9);
        doc.apply(Cmd::InsertText {
            at,
            text: "!".to_string(),
        });
        assert_eq!(doc.text(), "ab!\r\ncd\r\n");
    }

    #[test]
    fn offsets_snap_to_char_boundaries() {
        let mut doc = Document::from_bytes("aé".as_bytes()).unwrap();
        doc.set_caret(2);
        assert_eq!(doc.caret(), 1);
        assert_eq!(doc.next_char(1), Some(3));
        assert_eq!(doc.prev_char(3), Some(1));
        assert_eq!(doc.prev_char(0), None);
    }

    #[test]
    fn slice_to_cow_clamps() {
        let doc = Document::from_bytes(b"hello").unwrap();
        assert_eq!(doc.slice_to_cow(1..99), "ello");
        assert_eq!(doc.slice_to_cow(9..20), "");
    }
}
