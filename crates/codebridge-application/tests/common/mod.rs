//! Scripted `CodebridgeApi` for studio tests.

#![allow(dead_code)]

use async_trait::async_trait;
use codebridge_application::{Studio, StudioOptions};
use codebridge_core::analysis::ComplexityReport;
use codebridge_core::api::*;
use codebridge_core::config::{SecretConfig, SecretService};
use codebridge_core::{CodebridgeError, Concept, Language, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute(ExecuteRequest),
    Ask(AskRequest),
    RealWorld(CodeContext),
    Demo(CodeContext),
    Complexity(ComplexityRequest),
    Concept(String),
    ConceptExamples(String),
    PracticeProblems,
    Status(StatusRequest),
    CurrentUser,
}

type Responder<Req, T> = Box<dyn Fn(&Req) -> Result<T> + Send + Sync>;

/// Answers every endpoint from a replaceable closure and records each call.
///
/// Delays are queued per endpoint name and consumed one per call.
pub struct MockApi {
    calls: Mutex<Vec<Call>>,
    delays: Mutex<HashMap<&'static str, VecDeque<Duration>>>,
    pub execute: Mutex<Responder<ExecuteRequest, ExecuteResponse>>,
    pub ask: Mutex<Responder<AskRequest, AskResponse>>,
    pub real_world: Mutex<Responder<CodeContext, RealWorldResponse>>,
    pub demo: Mutex<Responder<CodeContext, DemoResponse>>,
    pub complexity: Mutex<Responder<ComplexityRequest, ComplexityReport>>,
    pub concept: Mutex<Responder<Concept, ConceptInfo>>,
    pub examples: Mutex<Responder<Concept, ConceptExamples>>,
    pub practice: Mutex<Responder<(), PracticeSet>>,
    pub status: Mutex<Responder<StatusRequest, StatusResponse>>,
    pub user: Mutex<Responder<(), Option<UserInfo>>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delays: Mutex::new(HashMap::new()),
            execute: Mutex::new(Box::new(|_| {
                Ok(ExecuteResponse {
                    success: true,
                    output: Some("Hello, World!\n".to_string()),
                    error: None,
                })
            })),
            ask: Mutex::new(Box::new(|request| {
                Ok(AskResponse {
                    status: "success".to_string(),
                    response: format!("About {}", request.question),
                    error: None,
                })
            })),
            real_world: Mutex::new(Box::new(|request| {
                Ok(RealWorldResponse {
                    title: format!("Remote: {}", request.code.lines().next().unwrap_or_default()),
                    description: "From the server".to_string(),
                    real_world_code: Some("server_code()".to_string()),
                    code: None,
                })
            })),
            demo: Mutex::new(Box::new(|_| Ok(DemoResponse::default()))),
            complexity: Mutex::new(Box::new(|_| {
                Ok(ComplexityReport {
                    complexity_score: 3,
                    explanation: "Simple and readable".to_string(),
                    ..ComplexityReport::default()
                })
            })),
            concept: Mutex::new(Box::new(|concept| {
                Ok(ConceptInfo {
                    title: concept.display_name(),
                    description: "Server description".to_string(),
                    real_world: "Everywhere".to_string(),
                    example: "print('from the server')".to_string(),
                })
            })),
            examples: Mutex::new(Box::new(|concept| {
                Err(CodebridgeError::not_found("concept examples", concept.to_string()))
            })),
            practice: Mutex::new(Box::new(|_| Ok(PracticeSet::default()))),
            status: Mutex::new(Box::new(|_| {
                Ok(StatusResponse {
                    status: "ok".to_string(),
                    message: String::new(),
                })
            })),
            user: Mutex::new(Box::new(|_| Ok(None))),
        }
    }
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| predicate(call)).count()
    }

    pub fn real_world_calls(&self) -> usize {
        self.count(|call| matches!(call, Call::RealWorld(_)))
    }

    pub fn demo_calls(&self) -> usize {
        self.count(|call| matches!(call, Call::Demo(_)))
    }

    /// Delays the next calls to `endpoint`, one entry per call.
    pub fn delay(&self, endpoint: &'static str, delays: impl IntoIterator<Item = Duration>) {
        self.delays
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .extend(delays);
    }

    async fn enter(&self, endpoint: &'static str, call: Call) {
        self.calls.lock().unwrap().push(call);
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CodebridgeApi for MockApi {
    async fn execute(&self, request: ExecuteRequest) -> Result<ExecuteResponse> {
        self.enter("execute", Call::Execute(request.clone())).await;
        (self.execute.lock().unwrap())(&request)
    }

    async fn ask(&self, request: AskRequest) -> Result<AskResponse> {
        self.enter("ask", Call::Ask(request.clone())).await;
        (self.ask.lock().unwrap())(&request)
    }

    async fn real_world(&self, request: CodeContext) -> Result<RealWorldResponse> {
        self.enter("realworld", Call::RealWorld(request.clone())).await;
        (self.real_world.lock().unwrap())(&request)
    }

    async fn demo(&self, request: CodeContext) -> Result<DemoResponse> {
        self.enter("demo", Call::Demo(request.clone())).await;
        (self.demo.lock().unwrap())(&request)
    }

    async fn analyze_complexity(&self, request: ComplexityRequest) -> Result<ComplexityReport> {
        self.enter("complexity", Call::Complexity(request.clone())).await;
        (self.complexity.lock().unwrap())(&request)
    }

    async fn concept(&self, concept: &Concept) -> Result<ConceptInfo> {
        self.enter("concept", Call::Concept(concept.to_string())).await;
        (self.concept.lock().unwrap())(concept)
    }

    async fn concept_examples(&self, concept: &Concept, _: Language) -> Result<ConceptExamples> {
        self.enter("concept-examples", Call::ConceptExamples(concept.to_string()))
            .await;
        (self.examples.lock().unwrap())(concept)
    }

    async fn practice_problems(&self) -> Result<PracticeSet> {
        self.enter("practice", Call::PracticeProblems).await;
        (self.practice.lock().unwrap())(&())
    }

    async fn check_openai_status(&self, request: StatusRequest) -> Result<StatusResponse> {
        self.enter("status", Call::Status(request.clone())).await;
        (self.status.lock().unwrap())(&request)
    }

    async fn current_user(&self) -> Result<Option<UserInfo>> {
        self.enter("user", Call::CurrentUser).await;
        (self.user.lock().unwrap())(&())
    }

    fn url_for(&self, path: &str) -> String {
        format!("http://codebridge.test{path}")
    }
}

/// Secrets held in memory.
pub struct StaticSecrets(pub Option<String>);

#[async_trait]
impl SecretService for StaticSecrets {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        Ok(SecretConfig {
            openai_api_key: self.0.clone(),
        })
    }
}

/// A mounted studio over `api` with default options.
pub fn studio(api: &Arc<MockApi>) -> Studio {
    studio_with(api, StudioOptions::default())
}

pub fn studio_with(api: &Arc<MockApi>, options: StudioOptions) -> Studio {
    let api: Arc<dyn CodebridgeApi> = api.clone();
    let studio = Studio::new(api, options);
    studio.mount().unwrap();
    studio
}

pub const LONG_CODE: &str = "for item in range(10):\n    print(item * item)";
