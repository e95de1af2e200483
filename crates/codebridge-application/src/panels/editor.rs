use super::paint;
use crate::document::{mounts, SharedDocument};
use crate::markup::templates;
use codebridge_core::editor::{EditorHandle, EditorRegistry, TextBufferEditor};
use codebridge_core::Result;
use minijinja::context;
use std::sync::Arc;

/// Registry owner name of the main editor.
pub const OWNER: &str = "beginner-editor";

pub const DEFAULT_PROGRAM: &str = "#Write your Python code here\n\ndef greeting(name):\n    \"\"\"Returns a greeting message\"\"\"\n    return f\"Hello, {name}!\"\n\n# Test the function\nresult = greeting(\"World\")\nprint(result)";

/// The main code editor.
pub struct EditorPanel {
    document: SharedDocument,
    registry: Arc<EditorRegistry>,
    editor: Arc<TextBufferEditor>,
}

impl EditorPanel {
    pub fn new(document: SharedDocument, registry: Arc<EditorRegistry>) -> Self {
        Self {
            document,
            registry,
            editor: Arc::new(TextBufferEditor::new(DEFAULT_PROGRAM)),
        }
    }

    /// Registers the editor as the active one and renders the buffer.
    pub fn mount(&self) -> Result<()> {
        let handle: Arc<dyn EditorHandle> = self.editor.clone();
        self.registry.register(OWNER, handle)?;
        self.sync();
        Ok(())
    }

    /// Gives up the registry slot.
    pub fn unmount(&self) -> bool {
        self.registry.release(OWNER)
    }

    pub fn editor(&self) -> Arc<TextBufferEditor> {
        Arc::clone(&self.editor)
    }

    /// Re-renders the buffer after it changed.
    pub fn sync(&self) {
        paint(
            &self.document,
            mounts::EDITOR,
            templates::EDITOR,
            context! { code => self.editor.get_value() },
        );
    }

    pub fn set_code(&self, code: &str) {
        self.editor.set_value(code);
        self.sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{self, Document};
    use codebridge_core::CodebridgeError;

    #[test]
    fn test_mount_registers_and_renders_default_program() {
        let doc = Document::standard().into_shared();
        let registry = Arc::new(EditorRegistry::new());
        let panel = EditorPanel::new(doc.clone(), registry.clone());
        panel.mount().unwrap();

        assert_eq!(registry.owner().as_deref(), Some(OWNER));
        assert_eq!(registry.current_code(), DEFAULT_PROGRAM);
        let markup = document::lock(&doc).markup(mounts::EDITOR).unwrap().to_string();
        assert!(markup.contains("def greeting(name):"));
    }

    #[test]
    fn test_mount_fails_when_another_owner_holds_the_slot() {
        let doc = Document::standard().into_shared();
        let registry = Arc::new(EditorRegistry::new());
        registry
            .register("practice", Arc::new(TextBufferEditor::new("")))
            .unwrap();

        let panel = EditorPanel::new(doc, registry);
        let err = panel.mount().unwrap_err();
        assert!(matches!(err, CodebridgeError::EditorConflict { ref owner } if owner == "practice"));
    }
}
