//! Static concept catalog.
//!
//! Every concept is served through the [`ConceptProvider`] interface and
//! looked up in a [`ConceptRegistry`]; callers never branch on a concept
//! name themselves. The free functions are thin lookups over the built-in
//! tables with the documented fallbacks applied.

mod auth;
mod descriptions;
mod examples;
mod real_world;

pub use descriptions::ConceptDescription;
pub use real_world::RealWorldExample;

use crate::demo::{self, DemoSpec};
use crate::editor::EditorHandle;
use crate::selection::{Concept, Language};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shown when no example exists for a concept.
pub const PLACEHOLDER_EXAMPLE: &str =
    "// Example code for this concept and language combination is not available.";

/// Example code for (concept, language).
///
/// A missing language falls back to the python entry; an unknown concept
/// yields [`PLACEHOLDER_EXAMPLE`].
pub fn concept_example(concept: &str, language: Language) -> &'static str {
    examples::lookup(concept, language)
        .or_else(|| examples::lookup(concept, Language::Python))
        .unwrap_or(PLACEHOLDER_EXAMPLE)
}

/// The canned real-world example for a concept, with python code fallback.
pub fn real_world_example(concept: &str, language: Language) -> Option<RealWorldExample> {
    real_world::lookup(concept, language)
}

/// Description of a concept; unknown concepts get a generic text.
pub fn concept_description(concept: &Concept) -> ConceptDescription {
    descriptions::lookup(concept.as_str())
        .unwrap_or_else(|| descriptions::generic(concept.display_name()))
}

/// The sidebar authentication example, when one exists for `language`.
pub fn authentication_example(language: Language) -> Option<&'static str> {
    auth::lookup(language)
}

/// Loads the authentication example into `editor`. Returns whether it did.
pub fn insert_authentication_example(editor: &dyn EditorHandle, language: Language) -> bool {
    match authentication_example(language) {
        Some(code) => {
            editor.set_value(code);
            editor.focus();
            true
        }
        None => false,
    }
}

/// The declarative demo that illustrates a concept.
pub fn demo_spec(concept: &str) -> Option<DemoSpec> {
    match concept {
        "if-else" => Some(demo::auth_spec()),
        "loops" => Some(demo::loop_visualizer_spec()),
        "oops" => Some(demo::object_builder_spec()),
        _ => None,
    }
}

/// Content source for one concept.
pub trait ConceptProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Example code for the editor, if the concept has any.
    fn example_code(&self, language: Language) -> Option<String>;

    fn real_world(&self, language: Language) -> Option<RealWorldExample>;

    fn description(&self) -> ConceptDescription;

    fn demo_spec(&self) -> Option<DemoSpec>;
}

/// Provider backed by the built-in tables.
#[derive(Debug, Clone)]
pub struct BuiltinConcept {
    concept: Concept,
}

impl BuiltinConcept {
    pub fn new(name: &str) -> Self {
        Self {
            concept: Concept::new(name),
        }
    }
}

impl ConceptProvider for BuiltinConcept {
    fn name(&self) -> &str {
        self.concept.as_str()
    }

    fn example_code(&self, language: Language) -> Option<String> {
        examples::lookup(self.name(), language)
            .or_else(|| examples::lookup(self.name(), Language::Python))
            .map(str::to_string)
    }

    fn real_world(&self, language: Language) -> Option<RealWorldExample> {
        real_world_example(self.name(), language)
    }

    fn description(&self) -> ConceptDescription {
        concept_description(&self.concept)
    }

    fn demo_spec(&self) -> Option<DemoSpec> {
        demo_spec(self.name())
    }
}

/// Concept name to provider.
#[derive(Clone, Default)]
pub struct ConceptRegistry {
    providers: BTreeMap<String, Arc<dyn ConceptProvider>>,
}

impl ConceptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in concept.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for name in examples::CONCEPTS {
            registry.register(Arc::new(BuiltinConcept::new(name)));
        }
        registry
    }

    /// Adds or replaces the provider for `provider.name()`.
    pub fn register(&mut self, provider: Arc<dyn ConceptProvider>) {
        self.providers
            .insert(Concept::new(provider.name()).as_str().to_string(), provider);
    }

    pub fn get(&self, concept: &Concept) -> Option<Arc<dyn ConceptProvider>> {
        self.providers.get(concept.as_str()).cloned()
    }

    pub fn contains(&self, concept: &Concept) -> bool {
        self.providers.contains_key(concept.as_str())
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Registered description, or the generic one.
    pub fn description(&self, concept: &Concept) -> ConceptDescription {
        self.get(concept)
            .map(|provider| provider.description())
            .unwrap_or_else(|| concept_description(concept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TextBufferEditor;
    use strum::IntoEnumIterator;

    #[test]
    fn test_present_pair_is_non_empty() {
        for concept in examples::CONCEPTS {
            let code = concept_example(concept, Language::Python);
            assert!(!code.is_empty());
            assert_ne!(code, PLACEHOLDER_EXAMPLE);
        }
        assert!(concept_example("if-else", Language::Java).contains("TemperatureChecker"));
    }

    #[test]
    fn test_absent_language_falls_back_to_python() {
        assert_eq!(
            concept_example("recursion", Language::Cpp),
            concept_example("recursion", Language::Python)
        );
        assert_eq!(
            concept_example("loops", Language::Java),
            concept_example("loops", Language::Python)
        );
    }

    #[test]
    fn test_unknown_concept_is_placeholder() {
        for language in Language::iter() {
            assert_eq!(concept_example("monads", language), PLACEHOLDER_EXAMPLE);
        }
    }

    #[test]
    fn test_real_world_entries() {
        let example = real_world_example("if-else", Language::Python).unwrap();
        assert_eq!(example.title, "User Authentication System");
        assert!(example.description.starts_with("This login/signup system"));

        let js = real_world_example("if-else", Language::Javascript).unwrap();
        assert!(js.code.starts_with("// User Authentication System"));

        let java = real_world_example("loops", Language::Java).unwrap();
        assert_eq!(java.title, "Data Processing Pipeline");
        assert!(java.code.starts_with("# Data Processing Pipeline"));

        assert!(real_world_example("recursion", Language::Python).is_none());
    }

    #[test]
    fn test_decorators_entries() {
        assert!(concept_example("decorators", Language::Python).contains("@timer_decorator"));
        assert!(concept_example("decorators", Language::Java).contains("@interface Timer"));
        assert_eq!(
            concept_example("decorators", Language::Cpp),
            concept_example("decorators", Language::Python)
        );

        let python = real_world_example("decorators", Language::Python).unwrap();
        assert_eq!(python.title, "Enhancing Code with Decorators");
        assert!(python.code.contains("@login_required"));
        let java = real_world_example("decorators", Language::Java).unwrap();
        assert!(java.code.contains("@Cacheable"));

        let registry = ConceptRegistry::builtin();
        let decorators = registry.get(&Concept::new("decorators")).unwrap();
        assert_eq!(
            decorators.description().title,
            "Enhancing Functions with Decorators"
        );
        assert!(decorators.example_code(Language::Javascript).is_some());
    }

    #[test]
    fn test_description_fallback() {
        let known = concept_description(&Concept::new("loops"));
        assert_eq!(known.title, "Iterative Processing with Loops");

        let unknown = concept_description(&Concept::new("generators"));
        assert_eq!(unknown.title, "Generators");
        assert_eq!(unknown.description, "A fundamental programming concept.");
        assert_eq!(
            unknown.real_world_use,
            "Used in various software development scenarios."
        );
    }

    #[test]
    fn test_insert_authentication_example() {
        let editor = TextBufferEditor::new("");
        assert!(insert_authentication_example(&editor, Language::Python));
        assert!(editor.get_value().contains("authenticate_user"));
        assert!(editor.is_focused());

        let other = TextBufferEditor::new("keep");
        assert!(!insert_authentication_example(&other, Language::Cpp));
        assert_eq!(other.get_value(), "keep");
    }

    #[test]
    fn test_registry_treats_every_concept_alike() {
        let registry = ConceptRegistry::builtin();
        assert_eq!(registry.names().len(), examples::CONCEPTS.len());

        let if_else = registry.get(&Concept::new("if-else")).unwrap();
        assert_eq!(if_else.demo_spec().unwrap().title, "User Authentication System");
        assert_eq!(
            if_else.real_world(Language::Python).unwrap().title,
            "User Authentication System"
        );

        let loops = registry.get(&Concept::new("loops")).unwrap();
        assert_eq!(loops.demo_spec().unwrap().title, "Loop Visualizer");
        assert!(loops.example_code(Language::Cpp).unwrap().contains("range"));

        assert!(registry.get(&Concept::general()).is_none());
        assert_eq!(
            registry.description(&Concept::new("closures")).title,
            "Closures"
        );
    }

    struct CustomConcept;

    impl ConceptProvider for CustomConcept {
        fn name(&self) -> &str {
            "Closures"
        }

        fn example_code(&self, _language: Language) -> Option<String> {
            Some("def outer():\n    x = 1\n    return lambda: x".to_string())
        }

        fn real_world(&self, _language: Language) -> Option<RealWorldExample> {
            None
        }

        fn description(&self) -> ConceptDescription {
            ConceptDescription {
                title: "Closures".to_string(),
                description: "Functions that capture their environment.".to_string(),
                real_world_use: "Callbacks.".to_string(),
            }
        }

        fn demo_spec(&self) -> Option<DemoSpec> {
            None
        }
    }

    #[test]
    fn test_registry_accepts_custom_provider() {
        let mut registry = ConceptRegistry::builtin();
        registry.register(Arc::new(CustomConcept));
        assert!(registry.contains(&Concept::new("closures")));
        assert_eq!(
            registry.description(&Concept::new("closures")).description,
            "Functions that capture their environment."
        );
    }
}
