//! # Editing model
//!
//! The buffer behind an editor surface. The whole note lives in one
//! `xi_rope::Rope`; every change is a [`Cmd`] compiled into a single
//! replacement and applied as a rope `Delta`, returning a [`Patch`] that
//! describes what changed and where the caret went.
//!
//! Highlighting never reads the rope incrementally: the surface hands
//! `Document::text()` to the highlighter after each debounced edit.
//!
//! ```rust
//! use jot_engine::editing::{Cmd, Document};
//!
//! let mut doc = Document::from_bytes(b"- milk").unwrap();
//! doc.apply(Cmd::InsertNewline { at: doc.len() });
//! assert_eq!(doc.text(), "- milk\n- ");
//! ```

pub mod commands;
pub mod document;
pub mod patch;

pub use commands::Cmd;
pub use document::Document;
pub use patch::Patch;
