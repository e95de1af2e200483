//! Headless document: named mount points holding markup and state classes.
//!
//! Panels render into mount points by id. Writing to a mount point that does
//! not exist is a silent no-op, so a front-end can leave out any panel it
//! does not show.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mount point ids.
pub mod mounts {
    pub const EDITOR: &str = "beginner-code-content";
    pub const REAL_WORLD_TAB: &str = "real-world-content";
    pub const PRACTICE_TAB: &str = "practice-problems-content";

    pub const CONSOLE_CONTAINER: &str = "console-container";
    pub const CONSOLE_OUTPUT: &str = "console-output";

    pub const REAL_WORLD: &str = "realworld-code-root";

    pub const GUI_DEMO: &str = "gui-demo-root";
    pub const INTERACTIVE_DEMO: &str = "interactive-demo-root";
    pub const DEMO_MODAL: &str = "interactive-demo-container";

    pub const HELPLINE: &str = "helpline-root";
    pub const CHAT: &str = "helpline-messages";

    pub const PRACTICE_LIST: &str = "practice-problems-list";
    pub const PRACTICE_AREA: &str = "practice-area-root";
    pub const PRACTICE_PROBLEM: &str = "practice-problem";
    pub const PRACTICE_OUTPUT: &str = "practice-output-content";

    pub const CONCEPT_POPUP: &str = "popup-canvas-root";
    pub const COMPLEXITY: &str = "complexity-analyzer-container";

    pub const AUTH: &str = "auth-buttons";
    pub const API_STATUS: &str = "openai-status";

    pub const OUTPUT_WINDOW: &str = "output-window";
    pub const OUTPUT_CONSOLE: &str = "output-console";

    /// Every mount point a full studio renders into.
    pub const ALL: &[&str] = &[
        EDITOR,
        REAL_WORLD_TAB,
        PRACTICE_TAB,
        CONSOLE_CONTAINER,
        CONSOLE_OUTPUT,
        REAL_WORLD,
        GUI_DEMO,
        INTERACTIVE_DEMO,
        DEMO_MODAL,
        HELPLINE,
        CHAT,
        PRACTICE_LIST,
        PRACTICE_AREA,
        PRACTICE_PROBLEM,
        PRACTICE_OUTPUT,
        CONCEPT_POPUP,
        COMPLEXITY,
        AUTH,
        API_STATUS,
        OUTPUT_WINDOW,
        OUTPUT_CONSOLE,
    ];
}

/// State classes toggled on mount points.
pub mod classes {
    pub const ACTIVE: &str = "active";
    pub const EXPANDED: &str = "expanded";
    pub const HIDDEN: &str = "hidden";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoint {
    markup: String,
    classes: BTreeSet<String>,
}

impl MountPoint {
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    mounts: BTreeMap<String, MountPoint>,
}

pub type SharedDocument = Arc<Mutex<Document>>;

/// Locks a shared document, recovering from poisoning.
pub fn lock(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mounts<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut document = Self::new();
        for id in ids {
            document.add_mount(id);
        }
        document
    }

    /// A document with every mount point in [`mounts::ALL`].
    pub fn standard() -> Self {
        Self::with_mounts(mounts::ALL.iter().copied())
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    pub fn add_mount(&mut self, id: impl Into<String>) {
        self.mounts.entry(id.into()).or_default();
    }

    pub fn remove_mount(&mut self, id: &str) -> bool {
        self.mounts.remove(id).is_some()
    }

    pub fn has_mount(&self, id: &str) -> bool {
        self.mounts.contains_key(id)
    }

    pub fn mount(&self, id: &str) -> Option<&MountPoint> {
        self.mounts.get(id)
    }

    pub fn mount_ids(&self) -> impl Iterator<Item = &str> {
        self.mounts.keys().map(String::as_str)
    }

    /// Replaces the markup of `id`. Returns false when the mount is absent.
    pub fn set_markup(&mut self, id: &str, markup: impl Into<String>) -> bool {
        match self.mounts.get_mut(id) {
            Some(mount) => {
                mount.markup = markup.into();
                true
            }
            None => {
                tracing::trace!("[Document] No mount point '{}', skipping render", id);
                false
            }
        }
    }

    pub fn markup(&self, id: &str) -> Option<&str> {
        self.mounts.get(id).map(|mount| mount.markup.as_str())
    }

    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.mounts.get_mut(id) {
            Some(mount) => {
                mount.classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.mounts.get_mut(id) {
            Some(mount) => {
                mount.classes.remove(class);
                true
            }
            None => false,
        }
    }

    /// Flips `class` on `id`. Returns the new state, or `None` when the
    /// mount is absent.
    pub fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool> {
        let mount = self.mounts.get_mut(id)?;
        if mount.classes.remove(class) {
            Some(false)
        } else {
            mount.classes.insert(class.to_string());
            Some(true)
        }
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.mounts
            .get(id)
            .is_some_and(|mount| mount.classes.contains(class))
    }
}
