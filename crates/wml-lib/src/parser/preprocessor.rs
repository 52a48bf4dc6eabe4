//! Preprocessor bookkeeping for a single parsing session.
//!
//! Directives are parsed and tracked but never expanded: `#define` blocks
//! register a [`PpMacro`] in the table, `#undef` removes one, and macro
//! invocations stay opaque AST nodes. The table lives and dies with one
//! document — macros do not persist across files.

use indexmap::IndexMap;

/// Position cursor: file name plus 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpCursor {
    pub file: String,
    pub line: u32,
}

impl PpCursor {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: 1,
        }
    }
}

/// A registered `#define`: name, parameter list, raw body text, and the
/// cursor of the defining line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpMacro {
    pub name: String,
    pub params: Vec<String>,
    pub body: String,
    pub cursor: PpCursor,
}

/// Mutable preprocessor state owned by exactly one parse call.
#[derive(Debug, Clone)]
pub struct PpState {
    /// Cursor stack; one entry per document being read.
    pub cursors: Vec<PpCursor>,
    /// Seen macro definitions, keyed by name, in definition order.
    pub macros: IndexMap<String, PpMacro>,
    pub current_directory: String,
}

impl PpState {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            cursors: vec![PpCursor::new(file)],
            macros: IndexMap::new(),
            current_directory: "~".to_owned(),
        }
    }

    pub fn cursor(&self) -> &PpCursor {
        self.cursors.last().expect("cursor stack is never empty")
    }

    pub fn line(&self) -> u32 {
        self.cursor().line
    }

    pub(crate) fn new_line(&mut self) {
        let cursor = self.cursors.last_mut().expect("cursor stack is never empty");
        cursor.line += 1;
    }

    pub(crate) fn set_line(&mut self, line: u32) {
        let cursor = self.cursors.last_mut().expect("cursor stack is never empty");
        cursor.line = line;
    }

    /// Registers a macro definition. The first definition of a name wins;
    /// redefinitions are ignored.
    pub(crate) fn add_macro(&mut self, name: &str, params: Vec<String>, body: String, cursor: PpCursor) {
        if self.macros.contains_key(name) {
            tracing::warn!(name, "ignoring redefinition of macro");
            return;
        }
        tracing::debug!(name, args = params.len(), "registering #define");
        self.macros.insert(
            name.to_owned(),
            PpMacro {
                name: name.to_owned(),
                params,
                body,
                cursor,
            },
        );
    }

    pub(crate) fn remove_macro(&mut self, name: &str) {
        if self.macros.shift_remove(name).is_none() {
            tracing::debug!(name, "#undef of unknown macro");
        }
    }
}
