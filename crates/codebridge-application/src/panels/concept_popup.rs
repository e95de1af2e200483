use super::paint;
use crate::document::{self, classes, mounts, SharedDocument};
use crate::markup::templates;
use codebridge_core::api::ConceptInfo;
use codebridge_core::catalog::ConceptDescription;
use codebridge_core::Concept;
use minijinja::context;

const DEFAULT_DESCRIPTION: &str = "Learning about this concept...";
const DEFAULT_REAL_WORLD: &str = "Used in various software development scenarios.";
const DEFAULT_EXAMPLE: &str = "# Example code would appear here";

fn or_default<'a>(text: &'a str, default: &'a str) -> &'a str {
    if text.trim().is_empty() { default } else { text }
}

/// The "Learning Path" popup for one concept.
pub struct ConceptPopup {
    document: SharedDocument,
}

impl ConceptPopup {
    pub fn new(document: SharedDocument) -> Self {
        Self { document }
    }

    pub fn mount(&self) {
        self.close();
    }

    fn open(&self) {
        let mut document = document::lock(&self.document);
        document.remove_class(mounts::CONCEPT_POPUP, classes::HIDDEN);
        document.add_class(mounts::CONCEPT_POPUP, classes::ACTIVE);
    }

    pub fn close(&self) {
        let mut document = document::lock(&self.document);
        document.remove_class(mounts::CONCEPT_POPUP, classes::ACTIVE);
        document.add_class(mounts::CONCEPT_POPUP, classes::HIDDEN);
    }

    pub fn is_open(&self) -> bool {
        document::lock(&self.document).has_class(mounts::CONCEPT_POPUP, classes::ACTIVE)
    }

    pub fn show_loading(&self, concept: &Concept) {
        self.open();
        paint(
            &self.document,
            mounts::CONCEPT_POPUP,
            templates::CONCEPT_POPUP,
            context! { name => concept.display_name(), state => "loading" },
        );
    }

    pub fn show_info(&self, concept: &Concept, info: &ConceptInfo) {
        self.open();
        let title = if info.title.trim().is_empty() {
            concept.display_name()
        } else {
            info.title.clone()
        };
        paint(
            &self.document,
            mounts::CONCEPT_POPUP,
            templates::CONCEPT_POPUP,
            context! {
                name => concept.display_name(),
                state => "content",
                title,
                description => or_default(&info.description, DEFAULT_DESCRIPTION),
                real_world => or_default(&info.real_world, DEFAULT_REAL_WORLD),
                example => or_default(&info.example, DEFAULT_EXAMPLE),
            },
        );
    }

    /// The offline view built from the local catalog.
    pub fn show_offline(&self, concept: &Concept, description: &ConceptDescription, example: &str) {
        self.show_info(
            concept,
            &ConceptInfo {
                title: description.title.clone(),
                description: description.description.clone(),
                real_world: description.real_world_use.clone(),
                example: example.to_string(),
            },
        );
    }

    pub fn show_error(&self, concept: &Concept, message: &str) {
        self.open();
        paint(
            &self.document,
            mounts::CONCEPT_POPUP,
            templates::CONCEPT_POPUP,
            context! { name => concept.display_name(), state => "error", message },
        );
    }
}
