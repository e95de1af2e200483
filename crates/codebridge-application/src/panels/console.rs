use super::paint;
use crate::document::{self, classes, mounts, SharedDocument};
use crate::markup::templates;
use codebridge_core::api::ExecuteResponse;
use minijinja::context;

/// The output console under the editor.
pub struct ConsolePanel {
    document: SharedDocument,
}

impl ConsolePanel {
    pub fn new(document: SharedDocument) -> Self {
        Self { document }
    }

    pub fn mount(&self) {
        self.clear();
    }

    pub fn clear(&self) {
        paint(
            &self.document,
            mounts::CONSOLE_OUTPUT,
            templates::CONSOLE_PLACEHOLDER,
            context! {},
        );
    }

    pub fn show_running(&self) {
        paint(
            &self.document,
            mounts::CONSOLE_OUTPUT,
            templates::CONSOLE_RUNNING,
            context! {},
        );
    }

    /// Renders an `/api/execute` result. The server sends output and errors
    /// as HTML fragments, inserted as-is.
    pub fn show_output(&self, response: &ExecuteResponse) {
        paint(
            &self.document,
            mounts::CONSOLE_OUTPUT,
            templates::CONSOLE_OUTPUT,
            context! {
                success => response.success,
                output => response.output.as_deref().unwrap_or_default(),
                error => response.error.as_deref().unwrap_or_default(),
            },
        );
    }

    /// Renders a failure that happened before any response arrived.
    pub fn show_failure(&self, message: &str) {
        paint(
            &self.document,
            mounts::CONSOLE_OUTPUT,
            templates::CONSOLE_FAILURE,
            context! { message },
        );
    }

    pub fn show(&self) {
        document::lock(&self.document).add_class(mounts::CONSOLE_CONTAINER, classes::EXPANDED);
    }

    pub fn minimize(&self) {
        document::lock(&self.document).remove_class(mounts::CONSOLE_CONTAINER, classes::EXPANDED);
    }

    /// Returns whether the console is expanded afterwards.
    pub fn toggle(&self) -> bool {
        document::lock(&self.document)
            .toggle_class(mounts::CONSOLE_CONTAINER, classes::EXPANDED)
            .unwrap_or(false)
    }

    pub fn is_expanded(&self) -> bool {
        document::lock(&self.document).has_class(mounts::CONSOLE_CONTAINER, classes::EXPANDED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn panel() -> (SharedDocument, ConsolePanel) {
        let doc = Document::standard().into_shared();
        let panel = ConsolePanel::new(doc.clone());
        panel.mount();
        (doc, panel)
    }

    fn console_markup(doc: &SharedDocument) -> String {
        document::lock(doc)
            .markup(mounts::CONSOLE_OUTPUT)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_failed_run_shows_error_without_success_decoration() {
        let (doc, panel) = panel();
        panel.show_output(&ExecuteResponse {
            success: false,
            output: None,
            error: Some("SyntaxError: invalid syntax".to_string()),
        });

        let markup = console_markup(&doc);
        assert!(markup.contains("SyntaxError: invalid syntax"));
        assert!(!markup.contains("class=\"success\""));
    }

    #[test]
    fn test_server_error_fragment_is_inserted_unescaped() {
        let (doc, panel) = panel();
        let error = "<div class='error-header'><span class='error-type'>SyntaxError</span>: invalid syntax</div>";
        panel.show_output(&ExecuteResponse {
            success: false,
            output: None,
            error: Some(error.to_string()),
        });

        let markup = console_markup(&doc);
        assert!(markup.contains(error));
        assert!(!markup.contains("&lt;div"));
    }

    #[test]
    fn test_empty_output_shows_placeholder() {
        let (doc, panel) = panel();
        panel.show_output(&ExecuteResponse {
            success: true,
            output: Some(String::new()),
            error: None,
        });
        assert!(console_markup(&doc).contains("No output"));
    }

    #[test]
    fn test_identical_updates_render_identical_markup() {
        let (doc, panel) = panel();
        let response = ExecuteResponse {
            success: true,
            output: Some("Hello, World!".to_string()),
            error: None,
        };
        panel.show_output(&response);
        let first = console_markup(&doc);
        panel.show_output(&response);
        assert_eq!(first, console_markup(&doc));
    }

    #[test]
    fn test_toggle_expands_and_minimizes() {
        let (_doc, panel) = panel();
        assert!(panel.toggle());
        assert!(panel.is_expanded());
        panel.minimize();
        assert!(!panel.is_expanded());
        panel.show();
        assert!(panel.is_expanded());
    }
}
