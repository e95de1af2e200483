//! Content providers for the real-world and demo panels.
//!
//! Both panels follow one substitution policy: when the learner's code is
//! short and a named concept is selected, the concept's own content stands in
//! for the code. Concept content comes from the [`ConceptRegistry`] only.

use async_trait::async_trait;
use codebridge_core::api::{CodeContext, CodebridgeApi, DemoContent};
use codebridge_core::catalog::{ConceptProvider, ConceptRegistry, RealWorldExample};
use codebridge_core::{Result, Selection};
use std::sync::Arc;

/// Code shorter than this (in characters, after trimming) counts as short.
pub const SHORT_CODE_LEN: usize = 30;

pub const DEFAULT_REAL_WORLD_TITLE: &str = "Real-World Application";
pub const DEFAULT_REAL_WORLD_DESCRIPTION: &str =
    "Here's how your code applies to real-world scenarios.";
pub const DEFAULT_REAL_WORLD_CODE: &str = "// No real-world example available";

/// Where a panel's content comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source<T> {
    /// Available without a network call.
    Local(T),
    /// Must be requested with this context.
    Remote(CodeContext),
}

/// Counts raw characters, whitespace included.
pub fn is_short_code(code: &str) -> bool {
    code.chars().count() < SHORT_CODE_LEN
}

/// Panel content keyed by the learner's code and selection.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    type Content: Send;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Applies the substitution policy.
    fn resolve(&self, code: &str, selection: &Selection) -> Source<Self::Content>;

    async fn fetch(&self, context: CodeContext) -> Result<Self::Content>;
}

fn substitute(
    registry: &ConceptRegistry,
    code: &str,
    selection: &Selection,
) -> Option<Arc<dyn ConceptProvider>> {
    if selection.concept.is_general() || !is_short_code(code) {
        return None;
    }
    registry.get(&selection.concept)
}

fn context(code: impl Into<String>, selection: &Selection) -> CodeContext {
    CodeContext {
        code: code.into(),
        language: selection.language,
        concept: selection.concept.clone(),
    }
}

/// Real-world mapping: canned concept example or `/api/realworld`.
pub struct RealWorldProvider {
    api: Arc<dyn CodebridgeApi>,
    registry: ConceptRegistry,
}

impl RealWorldProvider {
    pub fn new(api: Arc<dyn CodebridgeApi>, registry: ConceptRegistry) -> Self {
        Self { api, registry }
    }
}

#[async_trait]
impl ContentProvider for RealWorldProvider {
    type Content = RealWorldExample;

    fn name(&self) -> &'static str {
        "realworld"
    }

    fn resolve(&self, code: &str, selection: &Selection) -> Source<RealWorldExample> {
        let Some(concept) = substitute(&self.registry, code, selection) else {
            return Source::Remote(context(code, selection));
        };
        if let Some(example) = concept.real_world(selection.language) {
            tracing::debug!(
                "[RealWorld] Short code, using canned example for '{}'",
                concept.name()
            );
            return Source::Local(example);
        }
        match concept.example_code(selection.language) {
            Some(example_code) => Source::Remote(context(example_code, selection)),
            None => Source::Remote(context(code, selection)),
        }
    }

    async fn fetch(&self, context: CodeContext) -> Result<RealWorldExample> {
        let response = self.api.real_world(context).await?;
        let non_empty = |text: &str, default: &str| {
            if text.trim().is_empty() {
                default.to_string()
            } else {
                text.to_string()
            }
        };
        Ok(RealWorldExample {
            title: non_empty(&response.title, DEFAULT_REAL_WORLD_TITLE),
            description: non_empty(&response.description, DEFAULT_REAL_WORLD_DESCRIPTION),
            code: non_empty(response.display_code(), DEFAULT_REAL_WORLD_CODE),
        })
    }
}

/// Interactive demo: concept demo spec or `/api/realworld/demo`.
pub struct DemoProvider {
    api: Arc<dyn CodebridgeApi>,
    registry: ConceptRegistry,
}

impl DemoProvider {
    pub fn new(api: Arc<dyn CodebridgeApi>, registry: ConceptRegistry) -> Self {
        Self { api, registry }
    }
}

#[async_trait]
impl ContentProvider for DemoProvider {
    type Content = DemoContent;

    fn name(&self) -> &'static str {
        "demo"
    }

    fn resolve(&self, code: &str, selection: &Selection) -> Source<DemoContent> {
        let Some(concept) = substitute(&self.registry, code, selection) else {
            return Source::Remote(context(code, selection));
        };
        if let Some(spec) = concept.demo_spec() {
            tracing::debug!("[Demo] Short code, using demo of '{}'", concept.name());
            return Source::Local(DemoContent::Spec(spec));
        }
        match concept.example_code(selection.language) {
            Some(example_code) => Source::Remote(context(example_code, selection)),
            None => Source::Remote(context(code, selection)),
        }
    }

    async fn fetch(&self, context: CodeContext) -> Result<DemoContent> {
        Ok(self.api.demo(context).await?.into_content())
    }
}
