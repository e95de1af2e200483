//! Interactive demos.
//!
//! A demo is either server markup or a declarative [`DemoSpec`]. Markup is
//! displayed but its scripts are never run: [`extract_scripts`] pulls every
//! `<script>` block out before the markup is stored, and the blocks go to a
//! [`ScriptSink`]. Behavior comes only from specs, interpreted by the
//! [`DemoSession`] runtime below.

use crate::error::{CodebridgeError, Result};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// An input or control shown by a demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    TextInput {
        id: String,
        label: String,
        #[serde(default)]
        placeholder: String,
        #[serde(default)]
        value: String,
    },
    NumberInput {
        id: String,
        label: String,
        #[serde(default)]
        value: f64,
    },
    Password {
        id: String,
        label: String,
        /// Show a strength meter under the field.
        #[serde(default)]
        strength_meter: bool,
    },
    Select {
        id: String,
        label: String,
        options: Vec<SelectOption>,
    },
    Button {
        id: String,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl Widget {
    pub fn id(&self) -> &str {
        match self {
            Widget::TextInput { id, .. }
            | Widget::NumberInput { id, .. }
            | Widget::Password { id, .. }
            | Widget::Select { id, .. }
            | Widget::Button { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Widget::TextInput { label, .. }
            | Widget::NumberInput { label, .. }
            | Widget::Password { label, .. }
            | Widget::Select { label, .. }
            | Widget::Button { label, .. } => label,
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(self, Widget::Button { .. })
    }

    fn initial_value(&self) -> Option<String> {
        match self {
            Widget::TextInput { value, .. } => Some(value.clone()),
            Widget::NumberInput { value, .. } => Some(format_number(*value)),
            Widget::Password { .. } => Some(String::new()),
            Widget::Select { options, .. } => {
                Some(options.first().map(|o| o.value.clone()).unwrap_or_default())
            }
            Widget::Button { .. } => None,
        }
    }
}

/// A condition checked by a [`DemoBehavior::Branch`] rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum Condition {
    Empty,
    NotNumber,
    GreaterThan { value: f64 },
    LessThan { value: f64 },
    Equals { value: String },
    Contains { value: String },
    Always,
}

impl Condition {
    fn matches(&self, input: &str) -> bool {
        let number = input.trim().parse::<f64>().ok();
        match self {
            Condition::Empty => input.trim().is_empty(),
            Condition::NotNumber => number.is_none(),
            Condition::GreaterThan { value } => number.is_some_and(|n| n > *value),
            Condition::LessThan { value } => number.is_some_and(|n| n < *value),
            Condition::Equals { value } => input == value,
            Condition::Contains { value } => input.contains(value.as_str()),
            Condition::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// First matching rule wins. `{input}` in the message is replaced by the
/// learner's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRule {
    #[serde(flatten)]
    pub condition: Condition,
    pub message: String,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// What happens when a demo button is pressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemoBehavior {
    Branch {
        input: String,
        rules: Vec<BranchRule>,
    },
    Loop {
        count_input: String,
        style_input: String,
        #[serde(default = "default_max_iterations")]
        max_iterations: u32,
    },
    ObjectBuilder {
        name_input: String,
        property_input: String,
        value_input: String,
    },
    /// Login and signup forms validated against a fixed user table.
    Auth { users: Vec<DemoUser> },
    InputProcessor {
        text_input: String,
        number_input: String,
    },
}

fn default_max_iterations() -> u32 {
    20
}

/// A declarative, data-only demo description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSpec {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    pub behavior: DemoBehavior,
    /// Text shown in the result area before the first interaction.
    #[serde(default)]
    pub placeholder: String,
}

impl DemoSpec {
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }
}

/// Result of pressing a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutcome {
    pub tone: Tone,
    pub lines: Vec<String>,
}

impl DemoOutcome {
    fn new(tone: Tone, lines: Vec<String>) -> Self {
        Self { tone, lines }
    }

    fn single(tone: Tone, line: impl Into<String>) -> Self {
        Self::new(tone, vec![line.into()])
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// The trusted interpreter for a [`DemoSpec`].
#[derive(Debug, Clone)]
pub struct DemoSession {
    spec: DemoSpec,
    values: HashMap<String, String>,
    last: Option<DemoOutcome>,
}

impl DemoSession {
    pub fn new(spec: DemoSpec) -> Self {
        let values = spec
            .widgets
            .iter()
            .filter_map(|w| w.initial_value().map(|v| (w.id().to_string(), v)))
            .collect();
        Self {
            spec,
            values,
            last: None,
        }
    }

    pub fn spec(&self) -> &DemoSpec {
        &self.spec
    }

    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or_default()
    }

    pub fn last_outcome(&self) -> Option<&DemoOutcome> {
        self.last.as_ref()
    }

    /// Sets an input widget's value.
    pub fn set_input(&mut self, id: &str, value: &str) -> Result<()> {
        let widget = self
            .spec
            .widget(id)
            .ok_or_else(|| CodebridgeError::not_found("demo input", id))?;
        match widget {
            Widget::Button { .. } => {
                return Err(CodebridgeError::application(format!(
                    "'{}' is a button, not an input",
                    id
                )));
            }
            Widget::Select { options, .. } if !options.iter().any(|o| o.value == value) => {
                return Err(CodebridgeError::application(format!(
                    "'{}' is not an option of '{}'",
                    value, id
                )));
            }
            _ => {}
        }
        self.values.insert(id.to_string(), value.to_string());
        Ok(())
    }

    /// Presses a button and evaluates the demo's behavior.
    pub fn press(&mut self, button_id: &str) -> Result<DemoOutcome> {
        match self.spec.widget(button_id) {
            Some(widget) if widget.is_button() => {}
            _ => return Err(CodebridgeError::not_found("demo button", button_id)),
        }

        let outcome = match &self.spec.behavior {
            DemoBehavior::Branch { input, rules } => self.run_branch(input, rules),
            DemoBehavior::Loop {
                count_input,
                style_input,
                max_iterations,
            } => self.run_loop(count_input, style_input, *max_iterations),
            DemoBehavior::ObjectBuilder {
                name_input,
                property_input,
                value_input,
            } => self.run_object_builder(name_input, property_input, value_input),
            DemoBehavior::Auth { users } => self.run_auth(button_id, users)?,
            DemoBehavior::InputProcessor {
                text_input,
                number_input,
            } => self.run_input_processor(text_input, number_input),
        };
        self.last = Some(outcome.clone());
        Ok(outcome)
    }

    fn run_branch(&self, input: &str, rules: &[BranchRule]) -> DemoOutcome {
        let value = self.value(input);
        rules
            .iter()
            .find(|rule| rule.condition.matches(value))
            .map(|rule| DemoOutcome::single(rule.tone, rule.message.replace("{input}", value)))
            .unwrap_or_else(|| DemoOutcome::single(Tone::Info, "No branch matched"))
    }

    fn run_loop(&self, count_input: &str, style_input: &str, max: u32) -> DemoOutcome {
        let count = self
            .value(count_input)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| *n >= 1.0)
            .map(|n| (n as u32).min(max.max(1)))
            .unwrap_or(5);

        let mut lines = if self.value(style_input) == "while" {
            vec![
                "let i = 0;".to_string(),
                format!("while (i < {}) {{", count),
                "    // Loop body".to_string(),
                "    i++;".to_string(),
                "}".to_string(),
            ]
        } else {
            vec![
                format!("for (let i = 0; i < {}; i++) {{", count),
                "    // Loop body".to_string(),
                "}".to_string(),
            ]
        };
        lines.push("Execution:".to_string());
        lines.extend((0..count).map(|i| format!("Iteration {}: Processing item {}", i, i)));
        lines.push(format!("Loop completed after {} iterations", count));
        DemoOutcome::new(Tone::Success, lines)
    }

    fn run_object_builder(&self, name: &str, property: &str, value: &str) -> DemoOutcome {
        let name = non_empty_or(self.value(name), "MyObject");
        let property = non_empty_or(self.value(property), "value");
        let value = non_empty_or(self.value(value), "true");
        DemoOutcome::new(
            Tone::Success,
            vec![
                format!("const {} = {{", name),
                format!("    {}: {},", property, value),
                format!("    created: \"{}\",", Utc::now().to_rfc3339()),
                format!("    toString() {{ return \"{} object\"; }}", name),
                "}".to_string(),
            ],
        )
    }

    fn run_input_processor(&self, text_input: &str, number_input: &str) -> DemoOutcome {
        let text = self.value(text_input);
        let number = self.value(number_input).trim().parse::<f64>().unwrap_or(0.0) as i64;
        let parity = if number % 2 == 0 { "even" } else { "odd" };
        DemoOutcome::new(
            Tone::Info,
            vec![
                "Input Processing Results:".to_string(),
                format!("Text Input: \"{}\" ({} characters)", text, text.chars().count()),
                format!("Number Input: {} ({} number)", number, parity),
                format!("Combined Result: \"{}-{}\"", text, number),
            ],
        )
    }

    fn run_auth(&self, button_id: &str, users: &[DemoUser]) -> Result<DemoOutcome> {
        match button_id {
            AUTH_LOGIN_BUTTON => Ok(login_outcome(
                users,
                self.value(AUTH_LOGIN_EMAIL),
                self.value(AUTH_LOGIN_PASSWORD),
            )),
            AUTH_SIGNUP_BUTTON => Ok(signup_outcome(
                users,
                self.value(AUTH_SIGNUP_NAME),
                self.value(AUTH_SIGNUP_EMAIL),
                self.value(AUTH_SIGNUP_PASSWORD),
                self.value(AUTH_SIGNUP_CONFIRM),
            )),
            other => Err(CodebridgeError::not_found("demo button", other)),
        }
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() { default } else { value }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

pub const AUTH_LOGIN_EMAIL: &str = "login-email";
pub const AUTH_LOGIN_PASSWORD: &str = "login-password";
pub const AUTH_LOGIN_BUTTON: &str = "login";
pub const AUTH_SIGNUP_NAME: &str = "signup-name";
pub const AUTH_SIGNUP_EMAIL: &str = "signup-email";
pub const AUTH_SIGNUP_PASSWORD: &str = "signup-password";
pub const AUTH_SIGNUP_CONFIRM: &str = "signup-confirm";
pub const AUTH_SIGNUP_BUTTON: &str = "signup";

fn login_outcome(users: &[DemoUser], email: &str, password: &str) -> DemoOutcome {
    if email.is_empty() {
        return DemoOutcome::single(Tone::Error, "Please enter your email");
    }
    if password.is_empty() {
        return DemoOutcome::single(Tone::Error, "Please enter your password");
    }
    match users.iter().find(|u| u.email == email) {
        Some(user) if user.password == password => DemoOutcome::new(
            Tone::Success,
            vec![
                "Login successful!".to_string(),
                format!("Welcome back, {}", user.name),
            ],
        ),
        Some(_) => DemoOutcome::single(Tone::Error, "Incorrect password"),
        None => DemoOutcome::single(Tone::Error, "Email not registered"),
    }
}

fn signup_outcome(
    users: &[DemoUser],
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> DemoOutcome {
    let failure = if name.is_empty() {
        Some("Please enter your name")
    } else if email.is_empty() {
        Some("Please enter your email")
    } else if !email.contains('@') {
        Some("Please enter a valid email address")
    } else if password.is_empty() {
        Some("Please enter a password")
    } else if password.chars().count() < 8 {
        Some("Password must be at least 8 characters")
    } else if confirm.is_empty() {
        Some("Please confirm your password")
    } else if password != confirm {
        Some("Passwords do not match")
    } else if users.iter().any(|u| u.email == email) {
        Some("Email already registered")
    } else {
        None
    };

    match failure {
        Some(message) => DemoOutcome::single(Tone::Error, message),
        None => DemoOutcome::new(
            Tone::Success,
            vec![
                "Account created successfully!".to_string(),
                format!("Welcome, {}", name),
            ],
        ),
    }
}

/// Password strength in percent: 25 each for length >= 8, an uppercase
/// letter, a digit and a symbol.
pub fn password_strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|passed| **passed).count() as u8 * 25
}

pub fn password_strength_label(strength: u8) -> &'static str {
    match strength {
        0..=25 => "Weak",
        26..=50 => "Fair",
        51..=75 => "Good",
        _ => "Strong",
    }
}

// ----------------------------------------------------------------------------
// Script quarantine
// ----------------------------------------------------------------------------

// An unclosed or self-closing tag swallows the rest of the input, as in a
// browser.
static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)(?:>(.*?)(?:</script\s*>|\z)|\z)")
        .expect("script block pattern is valid")
});

/// Removes every `<script>` block from `markup`.
///
/// Returns the markup without scripts and, in document order, each script's
/// body, or its opening tag when the body is empty but the tag loads a
/// source.
pub fn extract_scripts(markup: &str) -> (String, Vec<String>) {
    let scripts = SCRIPT_BLOCK
        .captures_iter(markup)
        .filter_map(|caps| {
            let body = caps.get(2).map_or("", |m| m.as_str()).trim();
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            if !body.is_empty() {
                Some(body.to_string())
            } else if attrs.to_ascii_lowercase().contains("src") {
                Some(format!("<script{}>", attrs.trim_end()))
            } else {
                None
            }
        })
        .collect();
    let stripped = SCRIPT_BLOCK.replace_all(markup, "").into_owned();
    (stripped, scripts)
}

/// Receives scripts extracted from server markup.
pub trait ScriptSink: Send + Sync {
    /// Called once per render with every script that render contained.
    fn accept(&self, origin: &str, scripts: Vec<String>);
}

/// Default sink: logs and drops every script.
#[derive(Debug, Default)]
pub struct QuarantineScriptSink;

impl ScriptSink for QuarantineScriptSink {
    fn accept(&self, origin: &str, scripts: Vec<String>) {
        tracing::warn!(
            "[Demo] Quarantined {} script block(s) from {}; they will not run",
            scripts.len(),
            origin
        );
    }
}

/// A sink that keeps what it receives, for inspection.
#[derive(Debug, Default)]
pub struct RecordingScriptSink {
    batches: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingScriptSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(origin, scripts)` batch received so far.
    pub fn batches(&self) -> Vec<(String, Vec<String>)> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScriptSink for RecordingScriptSink {
    fn accept(&self, origin: &str, scripts: Vec<String>) {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((origin.to_string(), scripts));
    }
}

// ----------------------------------------------------------------------------
// Client-side fallbacks
// ----------------------------------------------------------------------------

/// Picks a client-side demo from plain substring checks on the code.
pub fn fallback_spec_for(code: &str) -> DemoSpec {
    if code.contains("class") {
        object_builder_spec()
    } else if code.contains("if") && code.contains("else") {
        conditional_flow_spec()
    } else if code.contains("for") || code.contains("while") {
        loop_visualizer_spec()
    } else {
        input_processor_spec()
    }
}

fn text_input(id: &str, label: &str, value: &str) -> Widget {
    Widget::TextInput {
        id: id.to_string(),
        label: label.to_string(),
        placeholder: String::new(),
        value: value.to_string(),
    }
}

fn button(id: &str, label: &str) -> Widget {
    Widget::Button {
        id: id.to_string(),
        label: label.to_string(),
    }
}

pub fn object_builder_spec() -> DemoSpec {
    DemoSpec {
        title: "Object Creator".to_string(),
        description: String::new(),
        widgets: vec![
            text_input("obj-name", "Object Name:", "MyObject"),
            text_input("obj-prop", "Property Name:", "value"),
            text_input("obj-val", "Property Value:", "true"),
            button("create", "Create Object"),
        ],
        behavior: DemoBehavior::ObjectBuilder {
            name_input: "obj-name".to_string(),
            property_input: "obj-prop".to_string(),
            value_input: "obj-val".to_string(),
        },
        placeholder: "Object will appear here".to_string(),
    }
}

pub fn conditional_flow_spec() -> DemoSpec {
    DemoSpec {
        title: "Conditional Flow Simulator".to_string(),
        description: String::new(),
        widgets: vec![
            Widget::TextInput {
                id: "simple-input".to_string(),
                label: "Input value:".to_string(),
                placeholder: "Enter a value".to_string(),
                value: String::new(),
            },
            button("test", "Test"),
        ],
        behavior: DemoBehavior::Branch {
            input: "simple-input".to_string(),
            rules: vec![
                BranchRule {
                    condition: Condition::Empty,
                    message: "Please enter a value!".to_string(),
                    tone: Tone::Error,
                },
                BranchRule {
                    condition: Condition::NotNumber,
                    message: "\"{input}\" is text - entered branch 1".to_string(),
                    tone: Tone::Info,
                },
                BranchRule {
                    condition: Condition::GreaterThan { value: 10.0 },
                    message: "{input} is greater than 10 - entered branch 2".to_string(),
                    tone: Tone::Success,
                },
                BranchRule {
                    condition: Condition::Always,
                    message: "{input} is a number <= 10 - entered branch 3".to_string(),
                    tone: Tone::Warning,
                },
            ],
        },
        placeholder: "Enter a value and click Test".to_string(),
    }
}

pub fn loop_visualizer_spec() -> DemoSpec {
    DemoSpec {
        title: "Loop Visualizer".to_string(),
        description: String::new(),
        widgets: vec![
            Widget::NumberInput {
                id: "loop-count".to_string(),
                label: "Number of iterations:".to_string(),
                value: 5.0,
            },
            Widget::Select {
                id: "loop-type".to_string(),
                label: "Loop type:".to_string(),
                options: vec![
                    SelectOption::new("for", "For Loop"),
                    SelectOption::new("while", "While Loop"),
                ],
            },
            button("run", "Run Loop"),
        ],
        behavior: DemoBehavior::Loop {
            count_input: "loop-count".to_string(),
            style_input: "loop-type".to_string(),
            max_iterations: default_max_iterations(),
        },
        placeholder: "Configure and run the loop".to_string(),
    }
}

pub fn input_processor_spec() -> DemoSpec {
    DemoSpec {
        title: "Code Execution Simulator".to_string(),
        description: "This interactive demo simulates the execution of your code.".to_string(),
        widgets: vec![
            text_input("input1", "Input 1:", "Test"),
            Widget::NumberInput {
                id: "input2".to_string(),
                label: "Input 2:".to_string(),
                value: 42.0,
            },
            button("process", "Process"),
        ],
        behavior: DemoBehavior::InputProcessor {
            text_input: "input1".to_string(),
            number_input: "input2".to_string(),
        },
        placeholder: "Results will appear here".to_string(),
    }
}

/// The login/signup demo for conditional logic.
pub fn auth_spec() -> DemoSpec {
    DemoSpec {
        title: "User Authentication System".to_string(),
        description: "Try logging in with user@example.com / securepass123, or sign up a new account."
            .to_string(),
        widgets: vec![
            text_input(AUTH_LOGIN_EMAIL, "Email", ""),
            Widget::Password {
                id: AUTH_LOGIN_PASSWORD.to_string(),
                label: "Password".to_string(),
                strength_meter: false,
            },
            button(AUTH_LOGIN_BUTTON, "Log In"),
            text_input(AUTH_SIGNUP_NAME, "Full Name", ""),
            text_input(AUTH_SIGNUP_EMAIL, "Email", ""),
            Widget::Password {
                id: AUTH_SIGNUP_PASSWORD.to_string(),
                label: "Password".to_string(),
                strength_meter: true,
            },
            Widget::Password {
                id: AUTH_SIGNUP_CONFIRM.to_string(),
                label: "Confirm Password".to_string(),
                strength_meter: false,
            },
            button(AUTH_SIGNUP_BUTTON, "Sign Up"),
        ],
        behavior: DemoBehavior::Auth {
            users: vec![DemoUser {
                email: "user@example.com".to_string(),
                password: "securepass123".to_string(),
                name: "Test User".to_string(),
            }],
        },
        placeholder: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_selection_order() {
        assert_eq!(fallback_spec_for("class Car: pass").title, "Object Creator");
        // "class" wins even when if/else are present
        assert_eq!(
            fallback_spec_for("class A:\n if x: pass\n else: pass").title,
            "Object Creator"
        );
        assert_eq!(
            fallback_spec_for("if x > 1:\n    y()\nelse:\n    z()").title,
            "Conditional Flow Simulator"
        );
        assert_eq!(fallback_spec_for("while True: pass").title, "Loop Visualizer");
        assert_eq!(fallback_spec_for("print(1)").title, "Code Execution Simulator");
    }

    #[test]
    fn test_branch_rules() {
        let mut session = DemoSession::new(conditional_flow_spec());
        assert_eq!(session.press("test").unwrap().text(), "Please enter a value!");

        session.set_input("simple-input", "hello").unwrap();
        assert_eq!(
            session.press("test").unwrap().text(),
            "\"hello\" is text - entered branch 1"
        );

        session.set_input("simple-input", "42").unwrap();
        assert_eq!(
            session.press("test").unwrap().text(),
            "42 is greater than 10 - entered branch 2"
        );

        session.set_input("simple-input", "3").unwrap();
        let outcome = session.press("test").unwrap();
        assert_eq!(outcome.text(), "3 is a number <= 10 - entered branch 3");
        assert_eq!(session.last_outcome(), Some(&outcome));
    }

    #[test]
    fn test_loop_visualizer() {
        let mut session = DemoSession::new(loop_visualizer_spec());
        assert_eq!(session.value("loop-count"), "5");
        assert_eq!(session.value("loop-type"), "for");

        session.set_input("loop-count", "3").unwrap();
        session.set_input("loop-type", "while").unwrap();
        let outcome = session.press("run").unwrap();
        assert_eq!(outcome.lines[1], "while (i < 3) {");
        assert!(outcome.lines.contains(&"Iteration 2: Processing item 2".to_string()));
        assert_eq!(outcome.lines.last().unwrap(), "Loop completed after 3 iterations");

        session.set_input("loop-count", "500").unwrap();
        let capped = session.press("run").unwrap();
        assert_eq!(capped.lines.last().unwrap(), "Loop completed after 20 iterations");

        assert!(session.set_input("loop-type", "do-while").is_err());
    }

    #[test]
    fn test_object_builder_defaults() {
        let mut session = DemoSession::new(object_builder_spec());
        session.set_input("obj-name", "").unwrap();
        let outcome = session.press("create").unwrap();
        assert_eq!(outcome.lines[0], "const MyObject = {");
        assert_eq!(outcome.lines[1], "    value: true,");
        assert!(outcome.lines[3].contains("MyObject object"));
    }

    #[test]
    fn test_input_processor() {
        let mut session = DemoSession::new(input_processor_spec());
        let outcome = session.press("process").unwrap();
        assert!(outcome.lines.contains(&"Text Input: \"Test\" (4 characters)".to_string()));
        assert!(outcome.lines.contains(&"Number Input: 42 (even number)".to_string()));
        assert!(outcome.lines.contains(&"Combined Result: \"Test-42\"".to_string()));
    }

    #[test]
    fn test_login_rules() {
        let mut session = DemoSession::new(auth_spec());
        assert_eq!(session.press(AUTH_LOGIN_BUTTON).unwrap().text(), "Please enter your email");

        session.set_input(AUTH_LOGIN_EMAIL, "user@example.com").unwrap();
        assert_eq!(
            session.press(AUTH_LOGIN_BUTTON).unwrap().text(),
            "Please enter your password"
        );

        session.set_input(AUTH_LOGIN_PASSWORD, "nope").unwrap();
        assert_eq!(session.press(AUTH_LOGIN_BUTTON).unwrap().text(), "Incorrect password");

        session.set_input(AUTH_LOGIN_PASSWORD, "securepass123").unwrap();
        let ok = session.press(AUTH_LOGIN_BUTTON).unwrap();
        assert_eq!(ok.tone, Tone::Success);
        assert_eq!(ok.lines[0], "Login successful!");

        session.set_input(AUTH_LOGIN_EMAIL, "ghost@example.com").unwrap();
        assert_eq!(session.press(AUTH_LOGIN_BUTTON).unwrap().text(), "Email not registered");
    }

    #[test]
    fn test_signup_rules_in_order() {
        let mut session = DemoSession::new(auth_spec());
        let press = |s: &mut DemoSession| s.press(AUTH_SIGNUP_BUTTON).unwrap().lines[0].clone();

        assert_eq!(press(&mut session), "Please enter your name");
        session.set_input(AUTH_SIGNUP_NAME, "Ada").unwrap();
        assert_eq!(press(&mut session), "Please enter your email");
        session.set_input(AUTH_SIGNUP_EMAIL, "ada.example.com").unwrap();
        assert_eq!(press(&mut session), "Please enter a valid email address");
        session.set_input(AUTH_SIGNUP_EMAIL, "user@example.com").unwrap();
        assert_eq!(press(&mut session), "Please enter a password");
        session.set_input(AUTH_SIGNUP_PASSWORD, "short").unwrap();
        assert_eq!(press(&mut session), "Password must be at least 8 characters");
        session.set_input(AUTH_SIGNUP_PASSWORD, "longenough1").unwrap();
        assert_eq!(press(&mut session), "Please confirm your password");
        session.set_input(AUTH_SIGNUP_CONFIRM, "different1").unwrap();
        assert_eq!(press(&mut session), "Passwords do not match");
        session.set_input(AUTH_SIGNUP_CONFIRM, "longenough1").unwrap();
        assert_eq!(press(&mut session), "Email already registered");
        session.set_input(AUTH_SIGNUP_EMAIL, "ada@example.com").unwrap();
        assert_eq!(press(&mut session), "Account created successfully!");
    }

    #[test]
    fn test_press_unknown_button() {
        let mut session = DemoSession::new(auth_spec());
        assert!(session.press("nope").unwrap_err().is_not_found());
        assert!(session.press(AUTH_LOGIN_EMAIL).unwrap_err().is_not_found());
        assert!(session.set_input(AUTH_LOGIN_BUTTON, "x").is_err());
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abcdefgh"), 25);
        assert_eq!(password_strength("Abcdefgh"), 50);
        assert_eq!(password_strength("Abcdefg1"), 75);
        assert_eq!(password_strength("Abcdef1!"), 100);
        assert_eq!(password_strength_label(100), "Strong");
        assert_eq!(password_strength_label(25), "Weak");
    }

    #[test]
    fn test_extract_scripts() {
        let markup = "<div>hi</div><script>alert(1)</script><p>x</p><SCRIPT type=\"text/javascript\">\nrun()\n</SCRIPT><script></script>";
        let (stripped, scripts) = extract_scripts(markup);
        assert_eq!(stripped, "<div>hi</div><p>x</p>");
        assert_eq!(scripts, vec!["alert(1)".to_string(), "run()".to_string()]);
    }

    #[test]
    fn test_extract_unclosed_script_to_end_of_input() {
        let (stripped, scripts) = extract_scripts("<div>Calc</div><script>alert(1)");
        assert_eq!(stripped, "<div>Calc</div>");
        assert_eq!(scripts, vec!["alert(1)".to_string()]);

        let (stripped, scripts) = extract_scripts("<p>a</p><script src=\"x.js\"/><p>b</p>");
        assert_eq!(stripped, "<p>a</p>");
        assert_eq!(scripts, vec!["<p>b</p>".to_string()]);

        let (stripped, scripts) = extract_scripts("<p>a</p><script src=\"x.js\"></script><p>b</p>");
        assert_eq!(stripped, "<p>a</p><p>b</p>");
        assert_eq!(scripts, vec!["<script src=\"x.js\">".to_string()]);

        let (stripped, scripts) = extract_scripts("<p>a</p><script");
        assert_eq!(stripped, "<p>a</p>");
        assert!(scripts.is_empty());
    }

    #[test]
    fn test_spec_json_shape() {
        let json = serde_json::json!({
            "title": "Even or odd",
            "widgets": [
                {"kind": "number_input", "id": "n", "label": "Number"},
                {"kind": "button", "id": "go", "label": "Check"}
            ],
            "behavior": {
                "type": "branch",
                "input": "n",
                "rules": [
                    {"when": "greater_than", "value": 100.0, "message": "big", "tone": "warning"},
                    {"when": "always", "message": "{input} is fine"}
                ]
            }
        });
        let spec: DemoSpec = serde_json::from_value(json).unwrap();
        let mut session = DemoSession::new(spec);
        session.set_input("n", "7").unwrap();
        assert_eq!(session.press("go").unwrap().text(), "7 is fine");
        session.set_input("n", "700").unwrap();
        assert_eq!(session.press("go").unwrap().tone, Tone::Warning);
    }

    #[test]
    fn test_recording_sink_keeps_batches() {
        let sink = RecordingScriptSink::new();
        sink.accept("demo", vec!["a()".to_string()]);
        assert_eq!(sink.batches(), vec![("demo".to_string(), vec!["a()".to_string()])]);
    }
}
