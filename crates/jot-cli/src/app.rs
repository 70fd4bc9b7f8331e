use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jot_config::Config;
use jot_engine::{Cmd, Debouncer, Document, Highlighter, StyledRun, TagInput, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub path: Option<PathBuf>,
    pub document: Document,
    pub tags: TagInput,
    pub focus: Focus,
    pub status: String,
    /// First visible line of the editor pane.
    pub scroll: usize,
    pub debouncer: Debouncer,
    highlighter: Highlighter,
    runs: Vec<StyledRun>,
    styled_version: u64,
    saved_version: u64,
}

impl App {
    /// Opens `path` if it exists; a missing file starts an empty note that is
    /// created on first save.
    pub fn new(path: Option<PathBuf>, config: &Config) -> Result<Self> {
        let document = match &path {
            Some(path) if path.exists() => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Document::from_bytes(&bytes)
                    .with_context(|| format!("{} is not valid UTF-8", path.display()))?
            }
            _ => Document::default(),
        };

        let theme = Theme {
            base_size: config.base_size,
            code_size: config.code_size,
            ..Theme::default()
        };

        let mut app = Self {
            path,
            document,
            tags: TagInput::with_default(config.default_tag.as_deref()),
            focus: Focus::Editor,
            status: String::new(),
            scroll: 0,
            debouncer: Debouncer::new(config.debounce_delay()),
            highlighter: Highlighter::new(theme),
            runs: Vec::new(),
            styled_version: 0,
            saved_version: 0,
        };
        app.rescan();
        Ok(app)
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    pub fn is_dirty(&self) -> bool {
        self.document.version() != self.saved_version
    }

    /// Rescans if the debounce delay has passed since the last edit.
    pub fn refresh(&mut self, now: Instant) -> bool {
        if self.debouncer.fire_due(now).is_some() {
            self.rescan();
            return true;
        }
        false
    }

    fn rescan(&mut self) {
        let text = self.document.text();
        self.runs = self.highlighter.style(&text);
        self.styled_version = self.document.version();
        log::debug!(
            "rescanned v{}: {} runs over {} bytes",
            self.styled_version,
            self.runs.len(),
            text.len()
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Char('s') if ctrl => {
                if let Err(e) = self.save() {
                    log::error!("save failed: {e:#}");
                    self.status = format!("Error: {e:#}");
                }
            }
            KeyCode::Tab => self.toggle_focus(),
            _ => match self.focus {
                Focus::Editor => self.editor_key(key),
                Focus::Tags => self.tags_key(key),
            },
        }
        Ok(Flow::Continue)
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::Tags,
            Focus::Tags => {
                self.tags.submit();
                Focus::Editor
            }
        };
    }

    fn editor_key(&mut self, key: KeyEvent) {
        let caret = self.document.caret();
        let (line, col) = self.document.line_col(caret);

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit(Cmd::ReplaceRange {
                    range: self.document.selection(),
                    text: c.to_string(),
                });
            }
            KeyCode::Enter => self.edit(Cmd::InsertNewline { at: caret }),
            KeyCode::Backspace => {
                if let Some(prev) = self.document.prev_char(caret) {
                    self.edit(Cmd::DeleteRange { range: prev..caret });
                }
            }
            KeyCode::Delete => {
                if let Some(next) = self.document.next_char(caret) {
                    self.edit(Cmd::DeleteRange { range: caret..next });
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.document.prev_char(caret) {
                    self.document.set_caret(prev);
                }
            }
            KeyCode::Right => {
                if let Some(next) = self.document.next_char(caret) {
                    self.document.set_caret(next);
                }
            }
            KeyCode::Up if line > 0 => {
                let offset = self.document.offset_of_line_col(line - 1, col);
                self.document.set_caret(offset);
            }
            KeyCode::Down => {
                let offset = self.document.offset_of_line_col(line + 1, col);
                self.document.set_caret(offset);
            }
            KeyCode::Home => {
                let offset = self.document.offset_of_line_col(line, 0);
                self.document.set_caret(offset);
            }
            KeyCode::End => {
                let offset = self.document.offset_of_line_col(line, self.document.len());
                self.document.set_caret(offset);
            }
            _ => {}
        }
    }

    fn tags_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.tags.push_char(c);
            }
            KeyCode::Backspace => self.tags.backspace(),
            KeyCode::Enter => self.tags.submit(),
            _ => {}
        }
    }

    fn edit(&mut self, cmd: Cmd) {
        self.document.apply(cmd);
        self.debouncer.schedule(Instant::now());
        self.status.clear();
    }

    /// Writes the buffer back to its file as plain bytes.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            self.status = "No file to save to; start jot with a FILE argument".to_string();
            return Ok(());
        };
        std::fs::write(path, self.document.to_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.saved_version = self.document.version();
        log::info!("saved {} bytes to {}", self.document.len(), path.display());
        self.status = format!("Saved {}", path.display());
        Ok(())
    }
}
