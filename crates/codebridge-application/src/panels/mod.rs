//! Panels render into mount points of the shared [`Document`].
//!
//! Every panel is built against a [`SharedDocument`], writes its initial
//! markup on `mount`, and afterwards exposes narrow update operations. An
//! update always replaces the whole markup of its mount point, so the same
//! input renders the same markup.
//!
//! [`Document`]: crate::document::Document

pub mod assistant;
pub mod auth;
pub mod complexity;
pub mod concept_popup;
pub mod console;
pub mod demo;
pub mod editor;
pub mod practice;
pub mod real_world;
pub mod status;

pub use assistant::AssistantPanel;
pub use auth::AuthPanel;
pub use complexity::ComplexityPanel;
pub use concept_popup::ConceptPopup;
pub use console::ConsolePanel;
pub use demo::DemoPanel;
pub use editor::EditorPanel;
pub use practice::PracticePanel;
pub use real_world::RealWorldPanel;
pub use status::{ApiAvailability, KeySource, StatusPanel};

use crate::document::{self, SharedDocument};
use crate::markup;
use serde::Serialize;

/// Renders `template` into mount point `id`.
///
/// Returns the rendered markup. A template failure is logged and leaves the
/// mount untouched.
pub(crate) fn paint<S: Serialize>(
    document: &SharedDocument,
    id: &str,
    template: &str,
    context: S,
) -> Option<String> {
    match markup::render(template, context) {
        Ok(html) => {
            document::lock(document).set_markup(id, html.clone());
            Some(html)
        }
        Err(err) => {
            tracing::error!("[Panel] Failed to render '{}' into '{}': {}", template, id, err);
            None
        }
    }
}

/// Writes already rendered markup into mount point `id`.
pub(crate) fn paint_raw(document: &SharedDocument, id: &str, html: impl Into<String>) {
    document::lock(document).set_markup(id, html);
}
