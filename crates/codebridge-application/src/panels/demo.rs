//! The interactive demo panel.
//!
//! One demo is shown in three places: the GUI demo panel, the floating
//! interactive demo and the modal. Server markup is displayed with its
//! scripts removed; the removed scripts go to the injected [`ScriptSink`].
//! Structured specs run in a [`DemoSession`].

use super::{paint, paint_raw};
use crate::document::{self, classes, mounts, SharedDocument};
use crate::markup::{self, templates};
use codebridge_core::api::DemoContent;
use codebridge_core::demo::{
    extract_scripts, password_strength, password_strength_label, DemoOutcome, DemoSession,
    ScriptSink, Widget,
};
use codebridge_core::{CodebridgeError, Result};
use minijinja::context;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const GUI_PLACEHOLDER: &str = "Run your code to see a GUI demonstration.";
const GUI_EMPTY: &str = "No GUI demo available for this code.";
const INTERACTIVE_EMPTY: &str = "No interactive demo available for this code.";
const MODAL_EMPTY: &str = "Write or run code first to see an interactive GUI demonstration.";

/// Origin label passed to the script sink.
pub const SERVER_ORIGIN: &str = "/api/realworld/demo";

#[derive(Default)]
struct DemoState {
    session: Option<DemoSession>,
    /// Error notice shown above a client-side fallback.
    notice: Option<String>,
    has_content: bool,
}

pub struct DemoPanel {
    document: SharedDocument,
    sink: Arc<dyn ScriptSink>,
    state: Mutex<DemoState>,
}

#[derive(Serialize)]
struct OptionView<'a> {
    value: &'a str,
    label: &'a str,
    selected: bool,
}

#[derive(Serialize)]
struct WidgetView<'a> {
    kind: &'static str,
    id: &'a str,
    label: &'a str,
    input_type: &'static str,
    value: String,
    placeholder: &'a str,
    options: Vec<OptionView<'a>>,
    strength: Option<&'static str>,
}

fn widget_view<'a>(widget: &'a Widget, session: &DemoSession) -> WidgetView<'a> {
    let mut view = WidgetView {
        kind: "text",
        id: widget.id(),
        label: widget.label(),
        input_type: "text",
        value: session.value(widget.id()).to_string(),
        placeholder: "",
        options: Vec::new(),
        strength: None,
    };
    match widget {
        Widget::TextInput { placeholder, .. } => view.placeholder = placeholder.as_str(),
        Widget::NumberInput { .. } => view.input_type = "number",
        Widget::Password { strength_meter, .. } => {
            view.input_type = "password";
            if *strength_meter && !view.value.is_empty() {
                view.strength = Some(password_strength_label(password_strength(&view.value)));
            }
            view.value = String::new();
        }
        Widget::Select { options, .. } => {
            view.kind = "select";
            view.options = options
                .iter()
                .map(|o| OptionView {
                    value: &o.value,
                    label: &o.label,
                    selected: o.value == view.value,
                })
                .collect();
        }
        Widget::Button { .. } => view.kind = "button",
    }
    view
}

fn render_session(session: &DemoSession) -> Result<String> {
    let spec = session.spec();
    let widgets: Vec<WidgetView<'_>> = spec
        .widgets
        .iter()
        .map(|w| widget_view(w, session))
        .collect();
    let (tone, lines) = match session.last_outcome() {
        Some(outcome) => (outcome.tone, outcome.lines.clone()),
        None if spec.placeholder.is_empty() => (Default::default(), Vec::new()),
        None => (Default::default(), vec![spec.placeholder.clone()]),
    };
    markup::render(
        templates::DEMO_SPEC,
        context! {
            title => &spec.title,
            description => &spec.description,
            widgets,
            tone,
            lines,
        },
    )
}

impl DemoPanel {
    pub fn new(document: SharedDocument, sink: Arc<dyn ScriptSink>) -> Self {
        Self {
            document,
            sink,
            state: Mutex::new(DemoState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DemoState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mount(&self) {
        *self.lock() = DemoState::default();
        self.paint_empty(GUI_PLACEHOLDER, GUI_PLACEHOLDER, MODAL_EMPTY);
        document::lock(&self.document).add_class(mounts::DEMO_MODAL, classes::HIDDEN);
    }

    fn paint_empty(&self, gui: &str, interactive: &str, modal: &str) {
        for (id, message) in [
            (mounts::GUI_DEMO, gui),
            (mounts::INTERACTIVE_DEMO, interactive),
            (mounts::DEMO_MODAL, modal),
        ] {
            paint(&self.document, id, templates::DEMO_EMPTY, context! { message });
        }
    }

    fn paint_all(&self, html: &str) {
        for id in [mounts::GUI_DEMO, mounts::INTERACTIVE_DEMO, mounts::DEMO_MODAL] {
            paint_raw(&self.document, id, html);
        }
    }

    pub fn show_loading(&self) {
        for id in [mounts::GUI_DEMO, mounts::INTERACTIVE_DEMO] {
            paint(&self.document, id, templates::DEMO_LOADING, context! {});
        }
    }

    /// Renders demo content. Scripts in markup are handed to the sink once.
    pub fn show_content(&self, content: DemoContent) {
        match content {
            DemoContent::Spec(spec) => self.show_session(DemoSession::new(spec), None),
            DemoContent::Markup(html) => {
                let (stripped, scripts) = extract_scripts(&html);
                if !scripts.is_empty() {
                    self.sink.accept(SERVER_ORIGIN, scripts);
                }
                match markup::render(templates::DEMO_MARKUP, context! { body => stripped }) {
                    Ok(rendered) => {
                        *self.lock() = DemoState {
                            has_content: true,
                            ..DemoState::default()
                        };
                        self.paint_all(&rendered);
                    }
                    Err(err) => tracing::error!("[Demo] Failed to render markup: {}", err),
                }
            }
            DemoContent::Empty => {
                *self.lock() = DemoState::default();
                self.paint_empty(GUI_EMPTY, INTERACTIVE_EMPTY, MODAL_EMPTY);
            }
        }
    }

    /// Shows a client-side demo together with the error that caused it.
    pub fn show_fallback(&self, session: DemoSession, message: &str) {
        self.show_session(session, Some(message.to_string()));
    }

    fn show_session(&self, session: DemoSession, notice: Option<String>) {
        let mut state = self.lock();
        *state = DemoState {
            session: Some(session),
            notice,
            has_content: true,
        };
        self.repaint(&state);
    }

    fn repaint(&self, state: &DemoState) {
        let Some(session) = state.session.as_ref() else {
            return;
        };
        let body = match render_session(session) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!("[Demo] Failed to render demo: {}", err);
                return;
            }
        };
        let html = match &state.notice {
            Some(message) => {
                match markup::render(templates::DEMO_FALLBACK, context! { message, body }) {
                    Ok(html) => html,
                    Err(err) => {
                        tracing::error!("[Demo] Failed to render fallback: {}", err);
                        return;
                    }
                }
            }
            None => body,
        };
        self.paint_all(&html);
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut DemoSession) -> Result<T>) -> Result<T> {
        let mut state = self.lock();
        let session = state
            .session
            .as_mut()
            .ok_or_else(|| CodebridgeError::not_found("interactive demo", "active"))?;
        let result = f(session)?;
        self.repaint(&state);
        Ok(result)
    }

    pub fn set_input(&self, id: &str, value: &str) -> Result<()> {
        self.with_session(|session| session.set_input(id, value))
    }

    pub fn press(&self, button_id: &str) -> Result<DemoOutcome> {
        self.with_session(|session| session.press(button_id))
    }

    /// A copy of the running demo session, if the demo is spec-driven.
    pub fn session(&self) -> Option<DemoSession> {
        self.lock().session.clone()
    }

    pub fn has_content(&self) -> bool {
        self.lock().has_content
    }

    /// Shows the modal with the current demo, or an empty state.
    pub fn open(&self) {
        let has_content = self.has_content();
        let mut document = document::lock(&self.document);
        if has_content {
            let gui = document.markup(mounts::GUI_DEMO).map(str::to_string);
            if let Some(gui) = gui {
                document.set_markup(mounts::DEMO_MODAL, gui);
            }
        } else if let Ok(html) =
            markup::render(templates::DEMO_EMPTY, context! { message => MODAL_EMPTY })
        {
            document.set_markup(mounts::DEMO_MODAL, html);
        }
        document.remove_class(mounts::DEMO_MODAL, classes::HIDDEN);
        document.add_class(mounts::DEMO_MODAL, classes::ACTIVE);
    }

    pub fn close(&self) {
        let mut document = document::lock(&self.document);
        document.remove_class(mounts::DEMO_MODAL, classes::ACTIVE);
        document.add_class(mounts::DEMO_MODAL, classes::HIDDEN);
    }

    pub fn is_open(&self) -> bool {
        document::lock(&self.document).has_class(mounts::DEMO_MODAL, classes::ACTIVE)
    }
}
