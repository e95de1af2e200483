//! The studio orchestrator.
//!
//! [`Studio`] owns the document, the panels and the remote client, and runs
//! every learner action end to end: execute, debounce, ask, analyze,
//! practice. Each panel that issues requests takes a ticket from its own
//! [`RequestGate`] so a slow response never overwrites a newer one.

use crate::document::{self, classes, mounts, Document, SharedDocument};
use crate::markup::text::html_to_text;
use crate::panels::{
    AssistantPanel, AuthPanel, ComplexityPanel, ConceptPopup, ConsolePanel, DemoPanel,
    EditorPanel, PracticePanel, RealWorldPanel, StatusPanel,
};
use crate::providers::{ContentProvider, DemoProvider, RealWorldProvider, Source};
use crate::scheduler::{KeyedDebouncer, RequestGate};
use crate::visual_output::VisualOutputPanel;
use codebridge_core::analysis::{AnalysisTab, ComplexityReport};
use codebridge_core::api::{
    AskRequest, CodebridgeApi, ComplexityRequest, ExecuteRequest, ExecuteResponse,
    PracticeProblem, StatusRequest, UserInfo, LOGIN_PATH, LOGOUT_PATH,
};
use codebridge_core::catalog::{self, ConceptRegistry};
use codebridge_core::chat::{AssistantFailure, ChatMessage};
use codebridge_core::config::{AppConfig, SecretService};
use codebridge_core::demo::{
    fallback_spec_for, DemoOutcome, DemoSession, QuarantineScriptSink, ScriptSink,
};
use codebridge_core::editor::{CursorPosition, EditorHandle, EditorRegistry};
use codebridge_core::{CodebridgeError, Concept, Language, Result, Selection};
use std::sync::{Arc, PoisonError, RwLock};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tokio::task::JoinHandle;

pub use crate::panels::{ApiAvailability, KeySource};

/// Debounce key of the real-world refresh.
pub const REAL_WORLD_KEY: &str = "realworld";
/// Debounce key of the interactive demo refresh.

/// Workspace tabs. Exactly one is active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum WorkspaceTab {
    #[default]
    BeginnerCode,
    RealWorld,
    PracticeProblems,
}

impl WorkspaceTab {
    /// The content mount point that carries the `active` class.
    pub fn mount_id(self) -> &'static str {
        match self {
            WorkspaceTab::BeginnerCode => mounts::EDITOR,
            WorkspaceTab::RealWorld => mounts::REAL_WORLD_TAB,
            WorkspaceTab::PracticeProblems => mounts::PRACTICE_TAB,
        }
    }
}

/// Everything a [`Studio`] needs besides the remote client.
pub struct StudioOptions {
    pub config: AppConfig,
    pub registry: ConceptRegistry,
    pub script_sink: Arc<dyn ScriptSink>,
    /// Source of the client-side fallback key for the status check.
    pub secrets: Option<Arc<dyn SecretService>>,
    pub document: Document,
}

impl Default for StudioOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            registry: ConceptRegistry::builtin(),
            script_sink: Arc::new(QuarantineScriptSink),
            secrets: None,
            document: Document::standard(),
        }
    }
}

#[derive(Default)]
struct Gates {
    real_world: RequestGate,
    demo: RequestGate,
    complexity: RequestGate,
    concept: RequestGate,
    practice: RequestGate,
}

struct StudioInner {
    api: Arc<dyn CodebridgeApi>,
    config: AppConfig,
    registry: ConceptRegistry,
    secrets: Option<Arc<dyn SecretService>>,
    document: SharedDocument,
    editors: Arc<EditorRegistry>,
    selection: RwLock<Selection>,
    active_tab: RwLock<WorkspaceTab>,

    editor: EditorPanel,
    console: ConsolePanel,
    real_world: RealWorldPanel,
    demo: DemoPanel,
    assistant: AssistantPanel,
    practice: PracticePanel,
    popup: ConceptPopup,
    complexity: ComplexityPanel,
    auth: AuthPanel,
    status: StatusPanel,
    visual: VisualOutputPanel,

    real_world_provider: RealWorldProvider,
    demo_provider: DemoProvider,
    debouncer: KeyedDebouncer,
    gates: Gates,
}

/// One learner's studio session. Cheap to clone.
#[derive(Clone)]
pub struct Studio {
    inner: Arc<StudioInner>,
}

impl Studio {
    pub fn new(api: Arc<dyn CodebridgeApi>, options: StudioOptions) -> Self {
        let StudioOptions {
            config,
            registry,
            script_sink,
            secrets,
            document,
        } = options;

        let document = document.into_shared();
        let editors = Arc::new(EditorRegistry::new());
        let selection = Selection::new(config.defaults.language, config.defaults.concept.clone());
        let debouncer = KeyedDebouncer::new(config.editor.debounce());

        let inner = StudioInner {
            real_world_provider: RealWorldProvider::new(Arc::clone(&api), registry.clone()),
            demo_provider: DemoProvider::new(Arc::clone(&api), registry.clone()),
            editor: EditorPanel::new(document.clone(), Arc::clone(&editors)),
            console: ConsolePanel::new(document.clone()),
            real_world: RealWorldPanel::new(document.clone()),
            demo: DemoPanel::new(document.clone(), script_sink),
            assistant: AssistantPanel::new(document.clone()),
            practice: PracticePanel::new(document.clone()),
            popup: ConceptPopup::new(document.clone()),
            complexity: ComplexityPanel::new(document.clone()),
            auth: AuthPanel::new(document.clone()),
            status: StatusPanel::new(document.clone()),
            visual: VisualOutputPanel::new(document.clone()),
            api,
            config,
            registry,
            secrets,
            document,
            editors,
            selection: RwLock::new(selection),
            active_tab: RwLock::new(WorkspaceTab::default()),
            debouncer,
            gates: Gates::default(),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    pub fn document(&self) -> SharedDocument {
        self.inner.document.clone()
    }

    /// Current markup of a mount point.
    pub fn markup(&self, id: &str) -> Option<String> {
        document::lock(&self.inner.document)
            .markup(id)
            .map(str::to_string)
    }

    /// Current content of a mount point as plain text.
    pub fn text(&self, id: &str) -> Option<String> {
        self.markup(id).map(|markup| html_to_text(&markup))
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        document::lock(&self.inner.document).has_class(id, class)
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &ConceptRegistry {
        &self.inner.registry
    }

    pub fn editors(&self) -> Arc<EditorRegistry> {
        Arc::clone(&self.inner.editors)
    }

    pub fn selection(&self) -> Selection {
        self.inner
            .selection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update_selection(&self, update: impl FnOnce(&mut Selection)) {
        let mut selection = self
            .inner
            .selection
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut selection);
    }

    /// Code in the active editor, or empty when none is registered.
    pub fn current_code(&self) -> String {
        self.inner.editors.current_code()
    }

    /// Replaces the code of the active editor.
    pub fn set_code(&self, code: &str) {
        match self.inner.editors.active() {
            Some(editor) => editor.set_value(code),
            None => tracing::debug!("[Studio] No active editor, code not set"),
        }
        self.inner.editor.sync();
    }

    pub fn active_tab(&self) -> WorkspaceTab {
        *self
            .inner
            .active_tab
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.inner.assistant.messages()
    }

    pub fn is_thinking(&self) -> bool {
        self.inner.assistant.is_thinking()
    }

    pub fn demo_session(&self) -> Option<DemoSession> {
        self.inner.demo.session()
    }

    pub fn complexity_report(&self) -> Option<ComplexityReport> {
        self.inner.complexity.report()
    }

    pub fn practice_problems(&self) -> Vec<PracticeProblem> {
        self.inner.practice.problems()
    }

    pub fn current_practice_problem(&self) -> Option<PracticeProblem> {
        self.inner.practice.current()
    }

    pub fn practice_code(&self) -> String {
        self.inner.practice.editor().get_value()
    }

    // ------------------------------------------------------------------
    // Startup
    // ------------------------------------------------------------------

    /// Renders every panel in its initial state. No network calls.
    pub fn mount(&self) -> Result<()> {
        let inner = &self.inner;
        inner.editor.mount()?;
        inner.console.mount();
        inner.real_world.mount();
        inner.demo.mount();
        inner.assistant.mount();
        inner.practice.mount();
        inner.popup.mount();
        inner.complexity.mount();
        inner.visual.mount();
        self.mark_active_tab(self.active_tab());
        tracing::debug!("[Studio] Mounted panels");
        Ok(())
    }

    /// Mounts the panels, checks login and model key status concurrently,
    /// and loads the configured concept when one is set.
    pub async fn load_initial_content(&self) -> Result<()> {
        self.mount()?;
        let (user, availability) = tokio::join!(self.check_auth_status(), self.check_api_status());
        tracing::info!(
            "[Studio] Initial load: logged in = {}, assistant {}",
            user.is_some(),
            availability.status_text()
        );
        if !self.selection().concept.is_general() {
            self.load_concept_content().await?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Runs the editor's code, shows the result, then refreshes the
    /// real-world and demo panels concurrently.
    ///
    /// Panel refresh failures are rendered into their panels and do not
    /// affect the returned result.
    pub async fn execute_code(&self) -> Result<ExecuteResponse> {
        let inner = &self.inner;
        let code = self.current_code();
        let selection = self.selection();

        inner.console.show();
        inner.console.show_running();
        tracing::info!(
            "[Studio] Executing {} code ({} chars)",
            selection.language,
            code.chars().count()
        );

        let executed = inner
            .api
            .execute(ExecuteRequest {
                code: code.clone(),
                language: selection.language,
            })
            .await;

        match &executed {
            Ok(response) => {
                inner.console.show_output(response);
                inner.visual.show(&selection.concept, response);
            }
            Err(err) => {
                tracing::warn!("[Studio] Execution request failed: {}", err);
                inner.console.show_failure(&err.to_string());
                inner.visual.show_error(&err.to_string());
            }
        }

        let (real_world, demo) = tokio::join!(
            self.update_real_world(&code),
            self.update_interactive_demo(&code)
        );
        if let Err(err) = real_world {
            tracing::debug!("[Studio] Real-world refresh failed: {}", err);
        }
        if let Err(err) = demo {
            tracing::debug!("[Studio] Demo refresh failed: {}", err);
        }

        executed
    }

    /// Refreshes the real-world panel for `code`.
    ///
    /// A response that arrives after a newer refresh started is dropped.
    pub async fn update_real_world(&self, code: &str) -> Result<()> {
        let inner = &self.inner;
        let selection = self.selection();
        let ticket = inner.gates.real_world.begin();

        let context = match inner.real_world_provider.resolve(code, &selection) {
            Source::Local(example) => {
                inner.real_world.show_example(&example, selection.language);
                return Ok(());
            }
            Source::Remote(context) => context,
        };

        inner.real_world.show_loading();
        let fetched = inner.real_world_provider.fetch(context).await;
        if !inner.gates.real_world.is_current(ticket) {
            tracing::debug!(
                "[Studio] Discarding superseded {} response",
                inner.real_world_provider.name()
            );
            return Ok(());
        }

        match fetched {
            Ok(example) => {
                inner.real_world.show_example(&example, selection.language);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("[Studio] Real-world request failed: {}", err);
                inner.real_world.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Refreshes the interactive demo for `code`.
    ///
    /// On failure the demo falls back to a local demo chosen from the code.
    pub async fn update_interactive_demo(&self, code: &str) -> Result<()> {
        let inner = &self.inner;
        let selection = self.selection();
        let ticket = inner.gates.demo.begin();

        let context = match inner.demo_provider.resolve(code, &selection) {
            Source::Local(content) => {
                inner.demo.show_content(content);
                return Ok(());
            }
            Source::Remote(context) => context,
        };

        let requested_code = context.code.clone();
        inner.demo.show_loading();
        let fetched = inner.demo_provider.fetch(context).await;
        if !inner.gates.demo.is_current(ticket) {
            tracing::debug!(
                "[Studio] Discarding superseded {} response",
                inner.demo_provider.name()
            );
            return Ok(());
        }

        match fetched {
            Ok(content) => {
                inner.demo.show_content(content);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("[Studio] Demo request failed, using local demo: {}", err);
                let session = DemoSession::new(fallback_spec_for(&requested_code));
                inner.demo.show_fallback(session, &err.to_string());
                Err(err)
            }
        }
    }

    /// Schedules a debounced real-world refresh after an edit.
    ///
    /// The refresh fires once the key has been quiet for the configured
    /// delay, and only when the code is longer than the configured minimum
    /// at that moment. The demo panel is refreshed on run, not on typing.
    pub fn on_code_input(&self) -> JoinHandle<bool> {
        let min_len = self.inner.config.editor.min_update_len;
        let studio = self.clone();
        self.inner.debouncer.schedule(REAL_WORLD_KEY, async move {
            let code = studio.current_code();
            if code.chars().count() <= min_len {
                tracing::trace!("[Studio] Code too short, skipping real-world refresh");
                return;
            }
            if let Err(err) = studio.update_real_world(&code).await {
                tracing::debug!("[Studio] Debounced real-world refresh failed: {}", err);
            }
        })
    }

    /// Drops every pending debounced refresh.
    pub fn cancel_pending_updates(&self) {
        self.inner.debouncer.cancel_all();
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects a concept, loads its example into the editor and refreshes
    /// both panels.
    pub async fn select_concept(&self, concept: Concept) -> Result<()> {
        tracing::info!("[Studio] Concept selected: {}", concept);
        self.update_selection(|selection| selection.concept = concept);
        self.load_concept_content().await
    }

    /// Selects a language and reloads the concept content, if any.
    pub async fn select_language(&self, language: Language) -> Result<()> {
        tracing::info!("[Studio] Language selected: {}", language);
        self.update_selection(|selection| selection.language = language);
        if self.selection().concept.is_general() {
            return Ok(());
        }
        self.load_concept_content().await
    }

    /// Language-specific examples first, then the concept overview.
    async fn fetch_concept_example(&self, selection: &Selection) -> String {
        match self
            .inner
            .api
            .concept_examples(&selection.concept, selection.language)
            .await
        {
            Ok(examples) if !examples.display_code().trim().is_empty() => {
                return examples.display_code().to_string();
            }
            Ok(_) => {}
            Err(err) => tracing::debug!(
                "[Studio] No {} examples for '{}': {}",
                selection.language,
                selection.concept,
                err
            ),
        }

        match self.inner.api.concept(&selection.concept).await {
            Ok(info) if !info.example.trim().is_empty() => info.example,
            Ok(_) => catalog::PLACEHOLDER_EXAMPLE.to_string(),
            Err(err) => {
                tracing::warn!(
                    "[Studio] No example for '{}': {}",
                    selection.concept,
                    err
                );
                catalog::PLACEHOLDER_EXAMPLE.to_string()
            }
        }
    }

    async fn load_concept_content(&self) -> Result<()> {
        let selection = self.selection();
        let local = self
            .inner
            .registry
            .get(&selection.concept)
            .and_then(|concept| concept.example_code(selection.language));

        let code = match local {
            Some(code) => code,
            None => self.fetch_concept_example(&selection).await,
        };

        self.set_code(&code);
        let (real_world, demo) = tokio::join!(
            self.update_real_world(&code),
            self.update_interactive_demo(&code)
        );
        real_world.and(demo)
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    fn mark_active_tab(&self, tab: WorkspaceTab) {
        let mut doc = document::lock(&self.inner.document);
        for candidate in WorkspaceTab::iter() {
            if candidate == tab {
                doc.add_class(candidate.mount_id(), classes::ACTIVE);
            } else {
                doc.remove_class(candidate.mount_id(), classes::ACTIVE);
            }
        }
    }

    /// Switches the workspace tab.
    ///
    /// The code tab focuses the active editor with the cursor at the end.
    /// The practice tab loads the problem list.
    pub async fn activate_tab(&self, tab: WorkspaceTab) -> Result<()> {
        self.mark_active_tab(tab);
        *self
            .inner
            .active_tab
            .write()
            .unwrap_or_else(PoisonError::into_inner) = tab;
        tracing::debug!("[Studio] Activated tab {}", tab);

        match tab {
            WorkspaceTab::BeginnerCode => {
                if let Some(editor) = self.inner.editors.active() {
                    editor.focus();
                    let last = editor.line_count().saturating_sub(1);
                    editor.set_cursor(CursorPosition {
                        line: last,
                        ch: editor.get_line(last).chars().count(),
                    });
                }
                Ok(())
            }
            WorkspaceTab::RealWorld => Ok(()),
            WorkspaceTab::PracticeProblems => self.load_practice_problems().await.map(|_| ()),
        }
    }

    pub fn toggle_console(&self) -> bool {
        self.inner.console.toggle()
    }

    pub fn show_console(&self) {
        self.inner.console.show();
    }

    pub fn minimize_console(&self) {
        self.inner.console.minimize();
    }

    pub fn clear_console(&self) {
        self.inner.console.clear();
    }

    pub fn toggle_helpline(&self) -> bool {
        self.inner.assistant.toggle()
    }

    // ------------------------------------------------------------------
    // Interactive demo
    // ------------------------------------------------------------------

    /// Opens the full-screen demo view.
    pub fn open_gui_demo(&self) {
        self.inner.demo.open();
    }

    pub fn close_gui_demo(&self) {
        self.inner.demo.close();
    }

    pub fn is_gui_demo_open(&self) -> bool {
        self.inner.demo.is_open()
    }

    pub fn demo_set_input(&self, id: &str, value: &str) -> Result<()> {
        self.inner.demo.set_input(id, value)
    }

    pub fn demo_press(&self, button_id: &str) -> Result<DemoOutcome> {
        self.inner.demo.press(button_id)
    }

    // ------------------------------------------------------------------
    // Assistant
    // ------------------------------------------------------------------

    /// Sends a question to the assistant and returns the reply shown.
    ///
    /// Fails with `Busy` while a previous question is unanswered. Request
    /// failures become an assistant reply rather than an error.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CodebridgeError::application("Please enter a question"));
        }

        let inner = &self.inner;
        let pending = inner.assistant.begin_question(question)?;
        let selection = self.selection();
        let request = AskRequest {
            question: question.to_string(),
            code: self.current_code(),
            language: selection.language,
            concept: selection.concept,
        };

        let reply = match inner.api.ask(request).await {
            Ok(response) if response.is_error() => {
                let err = CodebridgeError::Application {
                    message: response
                        .error
                        .unwrap_or_else(|| "Unknown error".to_string()),
                    fallback: Some(response.response),
                };
                AssistantFailure::classify(&err).reply(err.fallback_body())
            }
            Ok(response) if response.response.trim().is_empty() => {
                AssistantFailure::Server.reply(None)
            }
            Ok(response) => response.response,
            Err(err) => {
                tracing::warn!("[Studio] Assistant request failed: {}", err);
                AssistantFailure::classify(&err).reply(err.fallback_body())
            }
        };

        inner.assistant.finish(pending, &reply);
        Ok(reply)
    }

    pub fn clear_chat(&self) {
        self.inner.assistant.clear();
    }

    // ------------------------------------------------------------------
    // Complexity
    // ------------------------------------------------------------------

    /// Analyzes the editor's code and renders the report.
    pub async fn analyze_complexity(&self) -> Result<ComplexityReport> {
        let inner = &self.inner;
        let code = self.current_code();
        if code.trim().is_empty() {
            let err = CodebridgeError::application("Please write some code first");
            inner.complexity.show_error(&err.to_string());
            return Err(err);
        }

        let ticket = inner.gates.complexity.begin();
        inner.complexity.show_loading();
        let analyzed = inner
            .api
            .analyze_complexity(ComplexityRequest {
                code,
                language: self.selection().language,
            })
            .await;
        if !inner.gates.complexity.is_current(ticket) {
            tracing::debug!("[Studio] Discarding superseded complexity report");
            return analyzed;
        }

        match analyzed {
            Ok(report) => {
                tracing::info!("[Studio] Complexity score {}", report.score());
                inner.complexity.show_report(report.clone());
                Ok(report)
            }
            Err(err) => {
                tracing::warn!("[Studio] Complexity analysis failed: {}", err);
                inner.complexity.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn select_analysis_tab(&self, tab: AnalysisTab) -> bool {
        self.inner.complexity.select_tab(tab)
    }

    // ------------------------------------------------------------------
    // Concept popup
    // ------------------------------------------------------------------

    /// Opens the concept popup and loads its content from the server.
    pub async fn show_concept_popup(&self, concept: &Concept) -> Result<()> {
        let inner = &self.inner;
        let ticket = inner.gates.concept.begin();
        inner.popup.show_loading(concept);
        let fetched = inner.api.concept(concept).await;
        if !inner.gates.concept.is_current(ticket) {
            return Ok(());
        }

        match fetched {
            Ok(info) => {
                inner.popup.show_info(concept, &info);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("[Studio] Concept '{}' failed to load: {}", concept, err);
                inner.popup.show_error(concept, &err.to_string());
                Err(err)
            }
        }
    }

    /// Opens the concept popup with catalog content only.
    pub fn show_offline_concept(&self, concept: &Concept) {
        let language = self.selection().language;
        let description = self.inner.registry.description(concept);
        let example = self
            .inner
            .registry
            .get(concept)
            .and_then(|provider| provider.example_code(language))
            .unwrap_or_else(|| catalog::PLACEHOLDER_EXAMPLE.to_string());
        self.inner.popup.show_offline(concept, &description, &example);
    }

    pub fn close_concept_popup(&self) {
        self.inner.gates.concept.invalidate();
        self.inner.popup.close();
    }

    pub fn is_concept_popup_open(&self) -> bool {
        self.inner.popup.is_open()
    }

    // ------------------------------------------------------------------
    // Practice
    // ------------------------------------------------------------------

    /// Loads the problem list. Returns how many problems were shown.
    pub async fn load_practice_problems(&self) -> Result<usize> {
        let inner = &self.inner;
        let ticket = inner.gates.practice.begin();
        inner.practice.show_loading();
        let fetched = inner.api.practice_problems().await;
        if !inner.gates.practice.is_current(ticket) {
            return fetched.map(|set| set.problems.len());
        }

        match fetched {
            Ok(set) => {
                let count = set.problems.len();
                inner.practice.show_problems(set.problems);
                Ok(count)
            }
            Err(err) => {
                tracing::warn!("[Studio] Practice problems failed to load: {}", err);
                inner.practice.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn open_practice_problem(&self, index: usize) -> Result<PracticeProblem> {
        self.inner.practice.open(index)
    }

    /// Runs `code` as a solution to the open problem.
    ///
    /// Returns whether the output matched the expected value.
    pub async fn run_practice_solution(&self, code: &str) -> Result<bool> {
        let inner = &self.inner;
        inner.practice.editor().set_value(code);
        inner.practice.show_running();
        inner.console.show();
        inner.console.show_running();

        let executed = inner
            .api
            .execute(ExecuteRequest {
                code: code.to_string(),
                language: self.selection().language,
            })
            .await;

        match executed {
            Ok(response) => {
                inner.console.show_output(&response);
                let solved = inner.practice.show_result(&response);
                tracing::info!("[Studio] Practice solution solved = {}", solved);
                Ok(solved)
            }
            Err(err) => {
                tracing::warn!("[Studio] Practice run failed: {}", err);
                inner.console.show_failure(&err.to_string());
                inner.practice.show_failure(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn reset_practice(&self) {
        self.inner.practice.reset();
    }

    pub fn clear_practice_output(&self) {
        self.inner.practice.clear_output();
    }

    // ------------------------------------------------------------------
    // Account and service status
    // ------------------------------------------------------------------

    /// Renders the login or user controls. Never fails: anything but a
    /// logged-in user shows the login button.
    pub async fn check_auth_status(&self) -> Option<UserInfo> {
        let inner = &self.inner;
        match inner.api.current_user().await {
            Ok(Some(user)) if user.is_authenticated || !user.username.is_empty() => {
                inner
                    .auth
                    .show_user(&user, &inner.api.url_for(LOGOUT_PATH));
                Some(user)
            }
            Ok(_) => {
                inner.auth.show_logged_out(&inner.api.url_for(LOGIN_PATH));
                None
            }
            Err(err) => {
                tracing::debug!("[Studio] Auth check failed: {}", err);
                inner.auth.show_logged_out(&inner.api.url_for(LOGIN_PATH));
                None
            }
        }
    }

    /// Checks whether the assistant has a working model key, server side
    /// first, then with the locally configured key.
    pub async fn check_api_status(&self) -> ApiAvailability {
        let availability = match self
            .inner
            .api
            .check_openai_status(StatusRequest { api_key: None })
            .await
        {
            Ok(response) if response.is_ok() => ApiAvailability::available(KeySource::Server),
            Ok(response) => self.check_client_key(response.message).await,
            Err(err) => {
                tracing::warn!("[Studio] API status check failed: {}", err);
                ApiAvailability::failed(err.to_string())
            }
        };
        self.inner.status.show(&availability);
        availability
    }

    async fn check_client_key(&self, server_message: String) -> ApiAvailability {
        let key = match &self.inner.secrets {
            Some(secrets) => match secrets.load_secrets().await {
                Ok(config) => config.api_key().map(str::to_string),
                Err(err) => {
                    tracing::warn!("[Studio] Failed to load secrets: {}", err);
                    None
                }
            },
            None => None,
        };

        let Some(api_key) = key else {
            return ApiAvailability::unavailable(server_message);
        };

        tracing::debug!("[Studio] Server key unavailable, trying client key");
        match self
            .inner
            .api
            .check_openai_status(StatusRequest {
                api_key: Some(api_key),
            })
            .await
        {
            Ok(response) if response.is_ok() => ApiAvailability::available(KeySource::Client),
            Ok(response) => ApiAvailability::unavailable(response.message),
            Err(err) => ApiAvailability::failed(err.to_string()),
        }
    }

    /// Inserts the authentication example into the active editor.
    pub fn insert_authentication_example(&self) -> bool {
        let Some(editor) = self.inner.editors.active() else {
            return false;
        };
        let inserted =
            catalog::insert_authentication_example(editor.as_ref(), self.selection().language);
        if inserted {
            self.inner.editor.sync();
        }
        inserted
    }
}
