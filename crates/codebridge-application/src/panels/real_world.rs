use super::paint;
use crate::document::{mounts, SharedDocument};
use crate::markup::templates;
use codebridge_core::catalog::RealWorldExample;
use codebridge_core::Language;
use minijinja::context;

const PLACEHOLDER_TITLE: &str = "Real-World Application";
const PLACEHOLDER_DESCRIPTION: &str =
    "Type your code in the editor or run it to see its real-world application.";
const PLACEHOLDER_CODE: &str = "// Real-world code example will appear here";

/// Shows how the learner's code maps onto production code.
pub struct RealWorldPanel {
    document: SharedDocument,
}

impl RealWorldPanel {
    pub fn new(document: SharedDocument) -> Self {
        Self { document }
    }

    pub fn mount(&self) {
        paint(
            &self.document,
            mounts::REAL_WORLD,
            templates::REAL_WORLD_CONTENT,
            context! {
                title => PLACEHOLDER_TITLE,
                description => PLACEHOLDER_DESCRIPTION,
                code => PLACEHOLDER_CODE,
                language => Language::Python,
                demo_button => false,
            },
        );
    }

    pub fn show_loading(&self) {
        paint(
            &self.document,
            mounts::REAL_WORLD,
            templates::REAL_WORLD_LOADING,
            context! {},
        );
    }

    pub fn show_example(&self, example: &RealWorldExample, language: Language) {
        paint(
            &self.document,
            mounts::REAL_WORLD,
            templates::REAL_WORLD_CONTENT,
            context! {
                title => &example.title,
                description => &example.description,
                code => &example.code,
                language,
                demo_button => true,
            },
        );
    }

    /// Shows the raw error message. Nothing is retried.
    pub fn show_error(&self, message: &str) {
        paint(
            &self.document,
            mounts::REAL_WORLD,
            templates::REAL_WORLD_ERROR,
            context! { message },
        );
    }
}
