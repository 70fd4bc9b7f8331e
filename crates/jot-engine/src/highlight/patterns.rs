use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

// `R`: CRLF mode, so `\r\n` ends a line for `^`, `$` and `.`.
pub const HEADING: &str = r"(?mR)^(#{1,6})\s+.*$";
pub const BOLD_STAR: &str = r"(?R)\*\*(.+?)\*\*";
pub const BOLD_UNDERSCORE: &str = r"(?R)__(.+?)__";
pub const LINK: &str = r"(?R)\[.+?\]\(.+?\)";
pub const LIST_MARKER: &str = r"(?mR)^(\s*)([-*+]|\d+\.)\s";
pub const BLOCKQUOTE: &str = r"(?mR)^>\s?.*$";
pub const INLINE_CODE: &str = r"`[^`]+`";

pub const TASK_ITEM: &str = r"^(\s*)- \[[x ]\] ";
pub const BULLET_ITEM: &str = r"^(\s*)([-*]) ";
pub const ORDERED_ITEM: &str = r"^(\s*)(\d+)\. ";

#[derive(Debug, Error)]
#[error("Invalid {name} pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub name: &'static str,
    pub pattern: &'static str,
    pub source: regex::Error,
}

/// The fixed, read-only pattern set shared by the highlighter and the
/// continuation resolver.
#[derive(Debug)]
pub struct Patterns {
    pub heading: Regex,
    pub bold_star: Regex,
    pub bold_underscore: Regex,
    pub link: Regex,
    pub list_marker: Regex,
    pub blockquote: Regex,
    pub inline_code: Regex,
    pub task_item: Regex,
    pub bullet_item: Regex,
    pub ordered_item: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self, PatternError> {
        Ok(Self {
            heading: build("heading", HEADING)?,
            bold_star: build("bold_star", BOLD_STAR)?,
            bold_underscore: build("bold_underscore", BOLD_UNDERSCORE)?,
            link: build("link", LINK)?,
            list_marker: build("list_marker", LIST_MARKER)?,
            blockquote: build("blockquote", BLOCKQUOTE)?,
            inline_code: build("inline_code", INLINE_CODE)?,
            task_item: build("task_item", TASK_ITEM)?,
            bullet_item: build("bullet_item", BULLET_ITEM)?,
            ordered_item: build("ordered_item", ORDERED_ITEM)?,
        })
    }
}

fn build(name: &'static str, pattern: &'static str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError {
        name,
        pattern,
        source,
    })
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| match Patterns::compile() {
    Ok(patterns) => patterns,
    // The pattern set is constant; `compile_all_patterns` guards it in tests.
    Err(e) => panic!("{e}"),
});

/// Returns the process-wide compiled pattern set.
pub fn patterns() -> &'static Patterns {
    &PATTERNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_all_patterns() {
        let compiled = Patterns::compile();
        assert!(compiled.is_ok(), "{:?}", compiled.err());
    }

    #[test]
    fn pattern_error_names_the_pattern() {
        let err = build("broken", r"(unclosed").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broken"));
        assert!(msg.contains("(unclosed"));
    }
}
