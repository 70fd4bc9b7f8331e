pub mod continuation;
pub mod debounce;
pub mod editing;
pub mod highlight;
pub mod span;
pub mod styling;
pub mod tags;

// Re-export key types for easier usage
pub use continuation::{
    Continuation, ContinuationDecision, LineContext, TextEdit, resolve, resolve_at,
};
pub use debounce::{Debouncer, DelayedTask, Ticket};
pub use editing::{Cmd, Document, Patch};
pub use highlight::{Highlighter, PatternError, StyleSpan, StyleTag, highlight};
pub use span::Span;
pub use styling::{ColorRole, StyledRun, TextAttributes, Theme};
pub use tags::TagInput;
