/// State of the note's tag field: committed tags plus the text being typed.
///
/// Typing a `,` or a space commits the pending text as a tag, as does
/// submitting the field. Tags are trimmed of whitespace and commas, and a tag
/// that differs from an existing one only by case is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    tags: Vec<String>,
    pending: String,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a configured default tag already committed.
    pub fn with_default(default_tag: Option<&str>) -> Self {
        let mut input = Self::new();
        if let Some(tag) = default_tag {
            input.commit(tag);
        }
        input
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Replaces the pending text, committing it when it ends in a separator.
    pub fn on_input_changed(&mut self, value: impl Into<String>) {
        self.pending = value.into();
        if self.pending.ends_with([',', ' ']) {
            let value = std::mem::take(&mut self.pending);
            self.commit(&value);
        }
    }

    /// Appends one typed character to the pending text.
    pub fn push_char(&mut self, c: char) {
        let mut value = std::mem::take(&mut self.pending);
        value.push(c);
        self.on_input_changed(value);
    }

    /// Removes the last character of the pending text; with nothing pending
    /// it removes the last committed tag instead.
    pub fn backspace(&mut self) {
        if self.pending.pop().is_none() {
            self.tags.pop();
        }
    }

    /// Commits whatever is pending.
    pub fn submit(&mut self) {
        let value = std::mem::take(&mut self.pending);
        self.commit(&value);
    }

    /// Removes a committed tag (exact match).
    pub fn remove(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Committed tags joined with `", "`.
    pub fn joined(&self) -> String {
        self.tags.join(", ")
    }

    fn commit(&mut self, input: &str) {
        self.pending.clear();
        let cleaned = input.trim_matches(|c: char| c.is_whitespace() || c == ',');
        if cleaned.is_empty() {
            return;
        }
        let lower = cleaned.to_lowercase();
        if self.tags.iter().any(|t| t.to_lowercase() == lower) {
            log::debug!("ignoring duplicate tag {cleaned:?}");
            return;
        }
        self.tags.push(cleaned.to_string());
    }
}
