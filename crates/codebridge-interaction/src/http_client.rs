//! reqwest implementation of [`CodebridgeApi`].

use async_trait::async_trait;
use codebridge_core::analysis::ComplexityReport;
use codebridge_core::api::{
    AskRequest, AskResponse, CodeContext, CodebridgeApi, ComplexityRequest, ConceptExamples,
    ConceptInfo, DemoResponse, ExecuteRequest, ExecuteResponse, PracticeSet, RealWorldResponse,
    StatusRequest, StatusResponse, UserInfo,
};
use codebridge_core::config::ApiConfig;
use codebridge_core::{CodebridgeError, Concept, Language, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const EXECUTE_PATH: &str = "/api/execute";
const ASK_PATH: &str = "/api/ask";
const REALWORLD_PATH: &str = "/api/realworld";
const DEMO_PATH: &str = "/api/realworld/demo";
const COMPLEXITY_PATH: &str = "/api/analyze-complexity";
const CONCEPT_PATH: &str = "/api/concept";
const CONCEPT_EXAMPLES_PATH: &str = "/api/concept-examples";
const PRACTICE_PATH: &str = "/api/practice";
const STATUS_PATH: &str = "/api/check-openai-status";
const ME_PATH: &str = "/auth/me";

/// Client for the CodeBridge HTTP API.
///
/// Every request carries the configured timeout. Nothing is retried.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| {
            CodebridgeError::config(format!("Invalid API base URL '{}': {err}", config.base_url))
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| CodebridgeError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `<base>/<prefix>/<concept>` with the concept name percent-encoded.
    fn concept_url(&self, prefix: &str, concept: &Concept) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint(prefix))
            .map_err(|err| CodebridgeError::config(format!("Invalid API URL: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| CodebridgeError::config("API base URL cannot carry a path"))?
            .pop_if_empty()
            .push(concept.as_str());
        Ok(url)
    }

    /// Sends the request without looking at the status code.
    async fn dispatch(&self, builder: RequestBuilder, label: &str) -> Result<Response> {
        tracing::debug!("[Api] -> {}", label);
        let response = builder.send().await.map_err(|err| {
            tracing::warn!("[Api] {} failed before a response arrived: {}", label, err);
            CodebridgeError::network(describe_transport_error(&err))
        })?;
        tracing::debug!("[Api] <- {} {}", label, response.status());
        Ok(response)
    }

    /// Sends the request and turns non-2xx statuses into `Http` errors.
    async fn send(&self, builder: RequestBuilder, label: &str) -> Result<Response> {
        let response = self.dispatch(builder, label).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }
        Ok(response)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let label = format!("POST {path}");
        let response = self
            .send(self.client.post(self.endpoint(path)).json(body), &label)
            .await?;
        read_json(response, &label).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, label: &str) -> Result<T> {
        let response = self.send(self.client.get(url), label).await?;
        read_json(response, label).await
    }
}

#[async_trait]
impl CodebridgeApi for HttpApiClient {
    async fn execute(&self, request: ExecuteRequest) -> Result<ExecuteResponse> {
        self.post_json(EXECUTE_PATH, &request).await
    }

    async fn ask(&self, request: AskRequest) -> Result<AskResponse> {
        let label = format!("POST {ASK_PATH}");
        let response = self
            .dispatch(self.client.post(self.endpoint(ASK_PATH)).json(&request), &label)
            .await?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| CodebridgeError::network(describe_transport_error(&err)))?;

        // The assistant reports failures in the JSON body, sometimes with a
        // non-2xx status and sometimes inside a 200.
        match serde_json::from_str::<AskResponse>(&body_text) {
            Ok(body) if !status.is_success() || body.is_error() => {
                tracing::warn!(
                    "[Api] Assistant responded with error ({}): {}",
                    status,
                    body.error.as_deref().unwrap_or("Unknown error")
                );
                Err(assistant_error(status, body))
            }
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(map_http_error(status, body_text)),
            Err(err) => Err(err.into()),
        }
    }

    async fn real_world(&self, request: CodeContext) -> Result<RealWorldResponse> {
        self.post_json(REALWORLD_PATH, &request).await
    }

    async fn demo(&self, request: CodeContext) -> Result<DemoResponse> {
        self.post_json(DEMO_PATH, &request).await
    }

    async fn analyze_complexity(&self, request: ComplexityRequest) -> Result<ComplexityReport> {
        let value: serde_json::Value = self.post_json(COMPLEXITY_PATH, &request).await?;
        ComplexityReport::from_value(value)
    }

    async fn concept(&self, concept: &Concept) -> Result<ConceptInfo> {
        let url = self.concept_url(CONCEPT_PATH, concept)?;
        self.get_json(url, &format!("GET {CONCEPT_PATH}/{}", concept.as_str()))
            .await
    }

    async fn concept_examples(
        &self,
        concept: &Concept,
        language: Language,
    ) -> Result<ConceptExamples> {
        let mut url = self.concept_url(CONCEPT_EXAMPLES_PATH, concept)?;
        url.query_pairs_mut()
            .append_pair("language", &language.to_string());
        self.get_json(
            url,
            &format!("GET {CONCEPT_EXAMPLES_PATH}/{}", concept.as_str()),
        )
        .await
    }

    async fn practice_problems(&self) -> Result<PracticeSet> {
        let url = Url::parse(&self.endpoint(PRACTICE_PATH))
            .map_err(|err| CodebridgeError::config(format!("Invalid API URL: {err}")))?;
        self.get_json(url, &format!("GET {PRACTICE_PATH}")).await
    }

    async fn check_openai_status(&self, request: StatusRequest) -> Result<StatusResponse> {
        self.post_json(STATUS_PATH, &request).await
    }

    async fn current_user(&self) -> Result<Option<UserInfo>> {
        let label = format!("GET {ME_PATH}");
        let response = self
            .dispatch(self.client.get(self.endpoint(ME_PATH)), &label)
            .await?;

        if !response.status().is_success() {
            tracing::debug!("[Api] Not logged in ({})", response.status());
            return Ok(None);
        }

        read_json(response, &label).await.map(Some)
    }

    fn url_for(&self, path: &str) -> String {
        self.endpoint(path)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, label: &str) -> Result<T> {
    let body_text = response
        .text()
        .await
        .map_err(|err| CodebridgeError::network(describe_transport_error(&err)))?;
    serde_json::from_str(&body_text).map_err(|err| {
        tracing::warn!("[Api] Failed to parse {} response: {}", label, err);
        err.into()
    })
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("Request timed out: {err}")
    } else if err.is_connect() {
        format!("Could not connect to the CodeBridge server: {err}")
    } else {
        format!("Request failed: {err}")
    }
}

/// Error body shapes the server uses: `{"error": ...}`, `{"message": ...}`
/// or `{"detail": ...}`.
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

fn map_http_error(status: StatusCode, body: String) -> CodebridgeError {
    let from_json = serde_json::from_str::<ErrorBody>(&body).ok().and_then(|parsed| {
        [parsed.error, parsed.message, parsed.detail]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    });

    let message = match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    CodebridgeError::http(status.as_u16(), message)
}

fn assistant_error(status: StatusCode, body: AskResponse) -> CodebridgeError {
    let message = body
        .error
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| {
            if status.is_success() {
                "Unknown error".to_string()
            } else {
                format!("HTTP {}", status.as_u16())
            }
        });
    let fallback = Some(body.response).filter(|text| !text.trim().is_empty());
    CodebridgeError::Application { message, fallback }
}
