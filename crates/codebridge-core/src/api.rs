//! Wire types for the CodeBridge HTTP API and the client trait.

use crate::analysis::ComplexityReport;
use crate::demo::DemoSpec;
use crate::error::Result;
use crate::selection::{Concept, Language};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub code: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub code: String,
    pub language: Language,
    pub concept: Concept,
}

/// Body shared by `/api/realworld` and `/api/realworld/demo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    pub code: String,
    pub language: Language,
    pub concept: Concept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityRequest {
    pub code: String,
    pub language: Language,
}

/// `api_key: null` asks the server to check its own key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    pub api_key: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExecuteResponse {
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AskResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl AskResponse {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RealWorldResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub real_world_code: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl RealWorldResponse {
    /// `real_world_code`, falling back to `code`.
    pub fn display_code(&self) -> &str {
        self.real_world_code
            .as_deref()
            .or(self.code.as_deref())
            .unwrap_or_default()
    }
}

/// Raw `/api/realworld/demo` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DemoResponse {
    #[serde(default)]
    pub demo_spec: Option<DemoSpec>,
    #[serde(default)]
    pub demo_html: Option<String>,
    /// Older servers send `html` instead of `demo_html`.
    #[serde(default)]
    pub html: Option<String>,
}

/// A demo as the client understands it.
#[derive(Debug, Clone, PartialEq)]
pub enum DemoContent {
    Spec(DemoSpec),
    Markup(String),
    Empty,
}

impl DemoResponse {
    /// Prefers a structured spec, then `demo_html`, then legacy `html`.
    pub fn into_content(self) -> DemoContent {
        if let Some(spec) = self.demo_spec {
            return DemoContent::Spec(spec);
        }
        match self.demo_html.or(self.html) {
            Some(markup) if !markup.trim().is_empty() => DemoContent::Markup(markup),
            _ => DemoContent::Empty,
        }
    }
}

/// `/api/concept/:name` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConceptInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub real_world: String,
    #[serde(default)]
    pub example: String,
}

/// `/api/concept-examples/:name` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConceptExamples {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    /// Older servers send the code under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_examples: Option<String>,
    #[serde(default)]
    pub explanation: String,
}

impl ConceptExamples {
    pub fn display_code(&self) -> &str {
        if self.code.is_empty() {
            self.code_examples.as_deref().unwrap_or_default()
        } else {
            &self.code
        }
    }
}

static EXPECTED_OUTPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\s*Should output\s+(.+?)\s*$").expect("expected output pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PracticeProblem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub starter_code: String,
}

impl PracticeProblem {
    /// The value announced by a `# Should output X` comment in the starter
    /// code, with surrounding quotes removed.
    pub fn expected_output(&self) -> Option<String> {
        self.starter_code.lines().find_map(|line| {
            EXPECTED_OUTPUT.captures(line).map(|caps| {
                caps[1]
                    .trim_matches(|c| c == '\'' || c == '"')
                    .to_string()
            })
        })
    }

    /// Whether `output` contains the expected value on one of its lines.
    pub fn is_solved_by(&self, output: &str) -> bool {
        match self.expected_output() {
            Some(expected) => output.lines().any(|line| line.trim() == expected),
            None => false,
        }
    }

    /// `easy`, `medium` or `hard` as a lowercase class name.
    pub fn difficulty_class(&self) -> String {
        self.difficulty.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PracticeSet {
    #[serde(default)]
    pub problems: Vec<PracticeProblem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl StatusResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// `/auth/me` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_authenticated: bool,
}

// ============================================================================
// Client trait
// ============================================================================

/// The remote CodeBridge service.
///
/// Every method maps to one endpoint. Transport failures surface as
/// `CodebridgeError::Network`, non-2xx statuses as `CodebridgeError::Http`.
/// Endpoints that report errors inside a 2xx body (`/api/ask`,
/// `/api/analyze-complexity`) surface them as
/// `CodebridgeError::Application`.
#[async_trait]
pub trait CodebridgeApi: Send + Sync {
    async fn execute(&self, request: ExecuteRequest) -> Result<ExecuteResponse>;

    async fn ask(&self, request: AskRequest) -> Result<AskResponse>;

    async fn real_world(&self, request: CodeContext) -> Result<RealWorldResponse>;

    async fn demo(&self, request: CodeContext) -> Result<DemoResponse>;

    async fn analyze_complexity(&self, request: ComplexityRequest) -> Result<ComplexityReport>;

    async fn concept(&self, concept: &Concept) -> Result<ConceptInfo>;

    async fn concept_examples(
        &self,
        concept: &Concept,
        language: Language,
    ) -> Result<ConceptExamples>;

    async fn practice_problems(&self) -> Result<PracticeSet>;

    async fn check_openai_status(&self, request: StatusRequest) -> Result<StatusResponse>;

    /// `Ok(None)` when the server says nobody is logged in.
    async fn current_user(&self) -> Result<Option<UserInfo>>;

    /// Absolute URL of a navigation endpoint such as [`LOGIN_PATH`].
    fn url_for(&self, path: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_bodies_serialize_lowercase() {
        let body = serde_json::to_value(CodeContext {
            code: "x = 1".to_string(),
            language: Language::Javascript,
            concept: Concept::new("if-else"),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"code": "x = 1", "language": "javascript", "concept": "if-else"})
        );

        let status = serde_json::to_value(StatusRequest { api_key: None }).unwrap();
        assert_eq!(status, json!({"api_key": null}));
    }

    #[test]
    fn test_real_world_display_code_fallback() {
        let with_rw: RealWorldResponse = serde_json::from_value(json!({
            "title": "t", "description": "d", "real_world_code": "a", "code": "b"
        }))
        .unwrap();
        assert_eq!(with_rw.display_code(), "a");

        let only_code: RealWorldResponse =
            serde_json::from_value(json!({"title": "t", "code": "b"})).unwrap();
        assert_eq!(only_code.display_code(), "b");
    }

    #[test]
    fn test_demo_content_preference() {
        let legacy: DemoResponse = serde_json::from_value(json!({"html": "<p>old</p>"})).unwrap();
        assert_eq!(legacy.into_content(), DemoContent::Markup("<p>old</p>".to_string()));

        let both: DemoResponse =
            serde_json::from_value(json!({"html": "<p>old</p>", "demo_html": "<p>new</p>"}))
                .unwrap();
        assert_eq!(both.into_content(), DemoContent::Markup("<p>new</p>".to_string()));

        let empty: DemoResponse = serde_json::from_value(json!({"demo_html": "  "})).unwrap();
        assert_eq!(empty.into_content(), DemoContent::Empty);
    }

    #[test]
    fn test_expected_output_parsing() {
        let problem = PracticeProblem {
            title: "Reverse a String".to_string(),
            starter_code: "def reverse_string(s):\n    pass\n\nprint(reverse_string('hello'))  # Should output 'olleh'".to_string(),
            ..Default::default()
        };
        assert_eq!(problem.expected_output().as_deref(), Some("olleh"));
        assert!(problem.is_solved_by("olleh\n"));
        assert!(!problem.is_solved_by("hello"));

        let none = PracticeProblem::default();
        assert_eq!(none.expected_output(), None);
        assert!(!none.is_solved_by("anything"));
    }

    #[test]
    fn test_concept_examples_accepts_legacy_field() {
        let examples: ConceptExamples =
            serde_json::from_value(json!({"title": "t", "code_examples": "print(1)"})).unwrap();
        assert_eq!(examples.display_code(), "print(1)");

        let both: ConceptExamples = serde_json::from_value(
            json!({"code": "print(2)", "code_examples": "print(2)"}),
        )
        .unwrap();
        assert_eq!(both.display_code(), "print(2)");
    }
}
