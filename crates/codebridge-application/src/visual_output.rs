//! Visual output window: colored console text plus a canned picture of what
//! the program printed, chosen by scanning the output for keywords.

use crate::document::{mounts, SharedDocument};
use crate::markup::{self, escape_html, templates};
use crate::panels::{paint, paint_raw};
use codebridge_core::api::ExecuteResponse;
use codebridge_core::{Concept, Result};
use minijinja::context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const CONSOLE_PLACEHOLDER: &str = "// Output will appear here after you run the code...";
const WINDOW_PLACEHOLDER: &str = "Run your code to see the output";
const NO_VISUALIZATION: &str = "Run the code to see the output visualization";

const ERROR_STYLE: &str = r#"<span style="color: #e74c3c;">$0</span>"#;
const SUCCESS_STYLE: &str = r#"<span style="color: #2ecc71;">$0</span>"#;

static ERROR_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Error|Exception|Traceback).*$").expect("error tail pattern is valid")
});
static SUCCESS_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Success|Completed|Done).*$").expect("success tail pattern is valid")
});
static VEHICLE_INFO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}\s+\w+\s+\w+").expect("vehicle info pattern is valid"));
static ELAPSED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)took\s+([\d.]+)\s*(\w+)").expect("elapsed pattern is valid"));
static FUNCTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Function\s+(\w+)").expect("function name pattern is valid"));
static RESULT_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Result:\s+(\d+)").expect("result pattern is valid"));
static CONVERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(-?[\d.]+)°([CF])\s+is\s+equal\s+to\s+(-?[\d.]+)°([CFK])")
        .expect("conversion pattern is valid")
});

/// Escapes console text, colors error and success lines, and joins lines
/// with `<br>`.
///
/// A line is colored from the first keyword to its end. Error coloring wins
/// when a line has both.
pub fn format_console_output(output: &str) -> String {
    output
        .lines()
        .map(|line| {
            let line = escape_html(line);
            if ERROR_TAIL.is_match(&line) {
                ERROR_TAIL.replace(&line, ERROR_STYLE).into_owned()
            } else {
                SUCCESS_TAIL.replace(&line, SUCCESS_STYLE).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Success,
    WrongPassword,
    UnknownUser,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub from: String,
    pub to: String,
}

/// A canned picture of the program's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visualization {
    Login(LoginState),
    Vehicle {
        info: String,
        engine_on: bool,
        driving: bool,
    },
    Decorator {
        function: String,
        result: Option<String>,
        elapsed: Option<String>,
    },
    Temperature(Vec<Conversion>),
    Placeholder,
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn login_state(text: &str) -> LoginState {
    if text.contains("successful") {
        LoginState::Success
    } else if text.contains("password") {
        LoginState::WrongPassword
    } else if text.contains("not found") {
        LoginState::UnknownUser
    } else {
        LoginState::Waiting
    }
}

fn conversions(text: &str) -> Vec<Conversion> {
    CONVERSION
        .captures_iter(text)
        .filter_map(|caps| {
            let from = caps[1].parse::<f64>().ok()?;
            let to = caps[3].parse::<f64>().ok()?;
            Some(Conversion {
                from: format!("{}°{}", format_number(from), caps[2].to_uppercase()),
                to: format!("{:.2}°{}", to, caps[4].to_uppercase()),
            })
        })
        .collect()
}

/// Picks the visualization for `concept` from the console text.
pub fn visualize(concept: &Concept, console_text: &str) -> Visualization {
    match concept.as_str() {
        "if-else" => Visualization::Login(login_state(console_text)),
        "oops" => Visualization::Vehicle {
            info: VEHICLE_INFO
                .find(console_text)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "Vehicle".to_string()),
            engine_on: console_text.contains("started"),
            driving: console_text.contains("driving"),
        },
        "decorators" => Visualization::Decorator {
            function: FUNCTION_NAME
                .captures(console_text)
                .map(|caps| caps[1].to_string())
                .unwrap_or_else(|| "function".to_string()),
            result: RESULT_VALUE
                .captures(console_text)
                .map(|caps| caps[1].to_string()),
            elapsed: ELAPSED.captures(console_text).and_then(|caps| {
                let value = caps[1].parse::<f64>().ok()?;
                Some(format!("{} {}", format_number(value), &caps[2]))
            }),
        },
        "functions" => Visualization::Temperature(conversions(console_text)),
        _ => Visualization::Placeholder,
    }
}

impl Visualization {
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Login(state) => {
                let (class, status, message) = match state {
                    LoginState::Success => (
                        "login-success",
                        "Login Successful",
                        "Welcome back! You have full access.",
                    ),
                    LoginState::WrongPassword => (
                        "login-error",
                        "Incorrect Password",
                        "Please check your password and try again.",
                    ),
                    LoginState::UnknownUser => (
                        "login-error",
                        "User Not Found",
                        "Please register or check your username.",
                    ),
                    LoginState::Waiting => (
                        "",
                        "Authentication Status",
                        "Run the code to see login results.",
                    ),
                };
                markup::render(
                    templates::VISUAL_LOGIN,
                    context! { class, status, message },
                )
            }
            Self::Vehicle {
                info,
                engine_on,
                driving,
            } => markup::render(
                templates::VISUAL_VEHICLE,
                context! { info, engine_on, driving },
            ),
            Self::Decorator {
                function,
                result,
                elapsed,
            } => markup::render(
                templates::VISUAL_DECORATOR,
                context! {
                    function,
                    result => result.as_deref().unwrap_or("N/A"),
                    time => elapsed,
                },
            ),
            Self::Temperature(conversions) => {
                markup::render(templates::VISUAL_TEMPERATURE, context! { conversions })
            }
            Self::Placeholder => markup::render(
                templates::VISUAL_PLACEHOLDER,
                context! { message => NO_VISUALIZATION },
            ),
        }
    }
}

/// The output window and its console strip.
pub struct VisualOutputPanel {
    document: SharedDocument,
}

impl VisualOutputPanel {
    pub fn new(document: SharedDocument) -> Self {
        Self { document }
    }

    pub fn mount(&self) {
        self.reset();
    }

    pub fn reset(&self) {
        paint_raw(&self.document, mounts::OUTPUT_CONSOLE, CONSOLE_PLACEHOLDER);
        paint(
            &self.document,
            mounts::OUTPUT_WINDOW,
            templates::VISUAL_PLACEHOLDER,
            context! { message => WINDOW_PLACEHOLDER },
        );
    }

    pub fn show(&self, concept: &Concept, response: &ExecuteResponse) {
        if !response.success {
            let error = response
                .error
                .as_deref()
                .unwrap_or("An unknown error occurred");
            self.show_error(error);
            return;
        }

        let output = response.output.as_deref().unwrap_or_default();
        if !output.is_empty() {
            paint_raw(
                &self.document,
                mounts::OUTPUT_CONSOLE,
                format_console_output(output),
            );
        }
        match visualize(concept, output).render() {
            Ok(html) => paint_raw(&self.document, mounts::OUTPUT_WINDOW, html),
            Err(err) => tracing::error!("[VisualOutput] Failed to render: {}", err),
        }
    }

    pub fn show_error(&self, message: &str) {
        paint_raw(
            &self.document,
            mounts::OUTPUT_CONSOLE,
            format!(
                r#"<span style="color: #e74c3c;">Error: {}</span>"#,
                escape_html(message)
            ),
        );
        paint(
            &self.document,
            mounts::OUTPUT_WINDOW,
            templates::VISUAL_ERROR,
            context! { message },
        );
    }
}
