//! Editor service: the buffer the learner types into.
//!
//! Consumers never reach for a global editor. They receive an
//! [`EditorRegistry`] and ask it for the active editor; exactly one owner may
//! hold the registration at a time.

use crate::error::{CodebridgeError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Number of spaces inserted for Tab and for a new block.
pub const INDENT_WIDTH: usize = 4;

/// Line/column cursor position (both zero-based, column in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub ch: usize,
}

/// Capability object exposed by every editor implementation.
pub trait EditorHandle: Send + Sync {
    fn get_value(&self) -> String;
    fn set_value(&self, value: &str);
    fn focus(&self);
    fn line_count(&self) -> usize;
    /// Returns the given line, or an empty string when out of range.
    fn get_line(&self, line: usize) -> String;
    fn set_cursor(&self, position: CursorPosition);
}

#[derive(Debug, Default)]
struct BufferState {
    text: String,
    /// Byte offsets into `text`, always on char boundaries.
    selection_start: usize,
    selection_end: usize,
    focused: bool,
}

/// A plain text buffer editor with Tab-to-spaces and colon auto-indent.
#[derive(Debug, Default)]
pub struct TextBufferEditor {
    state: Mutex<BufferState>,
}

impl TextBufferEditor {
    pub fn new(initial: &str) -> Self {
        let editor = Self::default();
        editor.set_value(initial);
        editor
    }

    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the current selection with `text` and moves the cursor after it.
    pub fn insert_text(&self, text: &str) {
        let mut state = self.lock();
        let (start, end) = (state.selection_start, state.selection_end);
        state.text.replace_range(start..end, text);
        let cursor = start + text.len();
        state.selection_start = cursor;
        state.selection_end = cursor;
    }

    /// Tab key: four spaces at the cursor, replacing any selection.
    pub fn insert_tab(&self) {
        self.insert_text(&" ".repeat(INDENT_WIDTH));
    }

    /// Enter key: keep the current indentation, and open a new block when
    /// the current line ends with a colon.
    pub fn insert_newline(&self) {
        let insertion = {
            let state = self.lock();
            let cursor = state.selection_start;
            let line_start = state.text[..cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let current_line = &state.text[line_start..cursor];
            let indent: String = current_line
                .chars()
                .take_while(|c| c.is_whitespace())
                .collect();

            if current_line.trim().ends_with(':') {
                format!("\n{}{}", indent, " ".repeat(INDENT_WIDTH))
            } else {
                format!("\n{}", indent)
            }
        };
        self.insert_text(&insertion);
    }

    /// Moves the cursor to the end of the buffer.
    pub fn cursor_to_end(&self) {
        let mut state = self.lock();
        let end = state.text.len();
        state.selection_start = end;
        state.selection_end = end;
    }

    /// Byte offset of the cursor.
    pub fn cursor_offset(&self) -> usize {
        self.lock().selection_start
    }

    pub fn is_focused(&self) -> bool {
        self.lock().focused
    }
}

impl EditorHandle for TextBufferEditor {
    fn get_value(&self) -> String {
        self.lock().text.clone()
    }

    fn set_value(&self, value: &str) {
        let mut state = self.lock();
        state.text = value.to_string();
        let end = state.text.len();
        state.selection_start = end;
        state.selection_end = end;
    }

    fn focus(&self) {
        self.lock().focused = true;
    }

    fn line_count(&self) -> usize {
        self.lock().text.split('\n').count()
    }

    fn get_line(&self, line: usize) -> String {
        self.lock()
            .text
            .split('\n')
            .nth(line)
            .unwrap_or_default()
            .to_string()
    }

    fn set_cursor(&self, position: CursorPosition) {
        let mut state = self.lock();
        let mut offset = 0;
        let mut found = None;
        for (index, line) in state.text.split('\n').enumerate() {
            if index == position.line {
                let column = line
                    .char_indices()
                    .nth(position.ch)
                    .map(|(i, _)| i)
                    .unwrap_or(line.len());
                found = Some(offset + column);
                break;
            }
            offset += line.len() + 1;
        }
        let target = found.unwrap_or(state.text.len());
        state.selection_start = target;
        state.selection_end = target;
    }
}

struct Registration {
    owner: String,
    editor: Arc<dyn EditorHandle>,
}

/// The single registration point for the active editor.
///
/// A second owner cannot silently replace the first: it must wait for the
/// current owner to [`release`](EditorRegistry::release) the slot.
#[derive(Default)]
pub struct EditorRegistry {
    slot: RwLock<Option<Registration>>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `editor` on behalf of `owner`.
    ///
    /// Re-registering under the same owner replaces the editor; a different
    /// owner gets [`CodebridgeError::EditorConflict`].
    pub fn register(&self, owner: impl Into<String>, editor: Arc<dyn EditorHandle>) -> Result<()> {
        let owner = owner.into();
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = slot.as_ref() {
            if existing.owner != owner {
                return Err(CodebridgeError::EditorConflict {
                    owner: existing.owner.clone(),
                });
            }
        }
        tracing::debug!("[EditorRegistry] '{}' registered the active editor", owner);
        *slot = Some(Registration { owner, editor });
        Ok(())
    }

    /// Releases the slot if `owner` holds it. Returns whether it did.
    pub fn release(&self, owner: &str) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(existing) if existing.owner == owner => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn active(&self) -> Option<Arc<dyn EditorHandle>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|registration| Arc::clone(&registration.editor))
    }

    pub fn owner(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|registration| registration.owner.clone())
    }

    /// The active editor's buffer, or an empty string when none is registered.
    pub fn current_code(&self) -> String {
        self.active().map(|editor| editor.get_value()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_inserts_four_spaces_over_selection() {
        let editor = TextBufferEditor::new("x");
        editor.insert_tab();
        assert_eq!(editor.get_value(), "x    ");
        assert_eq!(editor.cursor_offset(), 5);
    }

    #[test]
    fn test_newline_after_colon_opens_block() {
        let editor = TextBufferEditor::new("def greet(name):");
        editor.insert_newline();
        assert_eq!(editor.get_value(), "def greet(name):\n    ");
        editor.insert_text("if name:");
        editor.insert_newline();
        assert_eq!(editor.get_value(), "def greet(name):\n    if name:\n        ");
    }

    #[test]
    fn test_newline_keeps_indentation() {
        let editor = TextBufferEditor::new("    x = 1");
        editor.insert_newline();
        assert_eq!(editor.get_value(), "    x = 1\n    ");

        let flat = TextBufferEditor::new("x = 1");
        flat.insert_newline();
        assert_eq!(flat.get_value(), "x = 1\n");
    }

    #[test]
    fn test_lines_and_cursor() {
        let editor = TextBufferEditor::new("a\nbcd\ne");
        assert_eq!(editor.line_count(), 3);
        assert_eq!(editor.get_line(1), "bcd");
        assert_eq!(editor.get_line(9), "");

        editor.set_cursor(CursorPosition { line: 1, ch: 2 });
        assert_eq!(editor.cursor_offset(), 4);
        editor.set_cursor(CursorPosition { line: 1, ch: 99 });
        assert_eq!(editor.cursor_offset(), 5);
    }

    #[test]
    fn test_registry_rejects_second_owner() {
        let registry = EditorRegistry::new();
        registry
            .register("main", Arc::new(TextBufferEditor::new("one")))
            .unwrap();

        let err = registry
            .register("practice", Arc::new(TextBufferEditor::new("two")))
            .unwrap_err();
        assert!(matches!(err, CodebridgeError::EditorConflict { ref owner } if owner == "main"));
        assert_eq!(registry.current_code(), "one");

        assert!(!registry.release("practice"));
        assert!(registry.release("main"));
        registry
            .register("practice", Arc::new(TextBufferEditor::new("two")))
            .unwrap();
        assert_eq!(registry.current_code(), "two");
    }

    #[test]
    fn test_registry_same_owner_replaces() {
        let registry = EditorRegistry::new();
        registry
            .register("main", Arc::new(TextBufferEditor::new("one")))
            .unwrap();
        registry
            .register("main", Arc::new(TextBufferEditor::new("two")))
            .unwrap();
        assert_eq!(registry.owner().as_deref(), Some("main"));
        assert_eq!(registry.current_code(), "two");
    }
}
