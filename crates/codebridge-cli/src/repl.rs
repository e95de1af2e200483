//! `codebridge studio`: a rustyline REPL over a [`Studio`].
//!
//! Plain lines are appended to the editor buffer. Slash commands drive the
//! panels, and each command prints the mount point it changed.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::commands::utils::{print_mount, read_source};
use codebridge_application::document::mounts;
use codebridge_application::{Studio, WorkspaceTab};
use codebridge_core::analysis::AnalysisTab;
use codebridge_core::{Concept, Language};

const COMMANDS: &[&str] = &[
    "/help",
    "/code",
    "/load",
    "/reset",
    "/run",
    "/console",
    "/clear",
    "/realworld",
    "/demo",
    "/demo-set",
    "/demo-press",
    "/gui",
    "/ask",
    "/chat",
    "/chat-clear",
    "/concept",
    "/concepts",
    "/language",
    "/info",
    "/analyze",
    "/tab",
    "/practice",
    "/submit",
    "/practice-reset",
    "/auth-example",
    "/status",
];

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    Append(String),
    ShowCode,
    Load(PathBuf),
    ResetCode,
    Run,
    ToggleConsole,
    ClearConsole,
    RealWorld,
    Demo,
    DemoSet { id: String, value: String },
    DemoPress(String),
    OpenGui,
    Ask(String),
    Chat,
    ClearChat,
    Concept(String),
    Concepts,
    Language(String),
    Info(Option<String>),
    Analyze,
    AnalysisTab(String),
    Practice(Option<usize>),
    Submit(Option<PathBuf>),
    ResetPractice,
    AuthExample,
    Status,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed == "quit" || trimmed == "exit" {
        return Command::Quit;
    }
    if !trimmed.starts_with('/') {
        return Command::Append(line.to_string());
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match (name, arg) {
        ("/help", _) => Command::Help,
        ("/code", _) => Command::ShowCode,
        ("/load", Some(path)) => Command::Load(PathBuf::from(path)),
        ("/reset", _) => Command::ResetCode,
        ("/run", _) => Command::Run,
        ("/console", _) => Command::ToggleConsole,
        ("/clear", _) => Command::ClearConsole,
        ("/realworld", _) => Command::RealWorld,
        ("/demo", _) => Command::Demo,
        ("/demo-set", Some(rest)) => match rest.split_once(char::is_whitespace) {
            Some((id, value)) => Command::DemoSet {
                id: id.to_string(),
                value: value.trim().to_string(),
            },
            None => Command::DemoSet {
                id: rest,
                value: String::new(),
            },
        },
        ("/demo-press", Some(id)) => Command::DemoPress(id),
        ("/gui", _) => Command::OpenGui,
        ("/ask", Some(question)) => Command::Ask(question),
        ("/chat", _) => Command::Chat,
        ("/chat-clear", _) => Command::ClearChat,
        ("/concept", Some(name)) => Command::Concept(name),
        ("/concepts", _) => Command::Concepts,
        ("/language", Some(name)) => Command::Language(name),
        ("/info", name) => Command::Info(name),
        ("/analyze", _) => Command::Analyze,
        ("/tab", Some(name)) => Command::AnalysisTab(name),
        ("/practice", None) => Command::Practice(None),
        ("/practice", Some(index)) => match index.parse::<usize>() {
            Ok(number) if number > 0 => Command::Practice(Some(number - 1)),
            _ => Command::Unknown(trimmed.to_string()),
        },
        ("/submit", path) => Command::Submit(path.map(PathBuf::from)),
        ("/practice-reset", _) => Command::ResetPractice,
        ("/auth-example", _) => Command::AuthExample,
        ("/status", _) => Command::Status,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct StudioHelper {
    commands: Vec<String>,
}

impl StudioHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for StudioHelper {}

impl Completer for StudioHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for StudioHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for StudioHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for StudioHelper {}

fn print_help() {
    println!("{}", "Lines without a leading '/' are appended to the code.".bright_black());
    let rows = [
        ("/code, /load <file>, /reset", "show, load or clear the code"),
        ("/run, /console, /clear", "run the code, toggle or clear the console"),
        ("/realworld, /demo, /gui", "show the real-world example or the demo"),
        ("/demo-set <id> <value>", "fill a demo input"),
        ("/demo-press <id>", "press a demo button"),
        ("/ask <question>, /chat, /chat-clear", "talk to the assistant"),
        ("/concept <name>, /concepts, /language <name>", "change the selection"),
        ("/info [concept]", "open the concept popup"),
        ("/analyze, /tab <name>", "analyze complexity, switch report tab"),
        ("/practice [n], /submit [file], /practice-reset", "practice problems"),
        ("/auth-example", "load the authentication example"),
        ("/status", "assistant key and account status"),
        ("quit", "leave the studio"),
    ];
    for (command, description) in rows {
        println!("  {:<48} {}", command.cyan(), description.bright_black());
    }
}

fn print_error(err: impl std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", err).red());
}

/// Runs one command. Returns false when the REPL should stop.
async fn dispatch(studio: &Studio, command: Command) -> bool {
    match command {
        Command::Quit => return false,
        Command::Help => print_help(),
        Command::Append(line) => {
            let mut code = studio.current_code();
            if !code.is_empty() {
                code.push('\n');
            }
            code.push_str(&line);
            studio.set_code(&code);
            studio.on_code_input();
        }
        Command::ShowCode => {
            for (number, line) in studio.current_code().lines().enumerate() {
                println!("{} {}", format!("{:>3}", number + 1).bright_black(), line);
            }
        }
        Command::Load(path) => match read_source(&path) {
            Ok(code) => {
                studio.set_code(&code);
                studio.on_code_input();
                println!("{}", format!("Loaded {}", path.display()).green());
            }
            Err(err) => print_error(err),
        },
        Command::ResetCode => {
            studio.cancel_pending_updates();
            studio.set_code("");
        }
        Command::Run => {
            if let Err(err) = studio.execute_code().await {
                tracing::debug!("[Repl] Run failed: {}", err);
            }
            print_mount(studio, mounts::CONSOLE_OUTPUT, "Output");
        }
        Command::ToggleConsole => {
            let expanded = studio.toggle_console();
            println!("Console {}", if expanded { "expanded" } else { "minimized" });
        }
        Command::ClearConsole => studio.clear_console(),
        Command::RealWorld => print_mount(studio, mounts::REAL_WORLD, "Real-World Example"),
        Command::Demo => print_demo(studio),
        Command::DemoSet { id, value } => {
            if let Err(err) = studio.demo_set_input(&id, &value) {
                print_error(err);
            }
        }
        Command::DemoPress(id) => match studio.demo_press(&id) {
            Ok(outcome) => {
                for line in outcome.lines {
                    println!("{}", line.bright_blue());
                }
            }
            Err(err) => print_error(err),
        },
        Command::OpenGui => {
            studio.open_gui_demo();
            print_mount(studio, mounts::DEMO_MODAL, "GUI Demo");
            studio.close_gui_demo();
        }
        Command::Ask(question) => match studio.ask(&question).await {
            Ok(reply) => {
                for line in reply.lines() {
                    println!("{}", line.bright_blue());
                }
            }
            Err(err) => print_error(err),
        },
        Command::Chat => print_mount(studio, mounts::CHAT, "Helpline"),
        Command::ClearChat => studio.clear_chat(),
        Command::Concept(name) => {
            if let Err(err) = studio.select_concept(Concept::new(&name)).await {
                tracing::debug!("[Repl] Concept refresh failed: {}", err);
            }
            println!("{}", format!("Concept: {}", studio.selection().concept).green());
        }
        Command::Concepts => println!("{}", studio.registry().names().join(", ")),
        Command::Language(name) => match Language::from_str(&name) {
            Ok(language) => {
                if let Err(err) = studio.select_language(language).await {
                    tracing::debug!("[Repl] Language refresh failed: {}", err);
                }
                println!("{}", format!("Language: {}", language).green());
            }
            Err(_) => print_error(format!("Unknown language '{}'", name)),
        },
        Command::Info(name) => {
            let concept = name
                .map(Concept::new)
                .unwrap_or_else(|| studio.selection().concept);
            if studio.show_concept_popup(&concept).await.is_err() {
                studio.show_offline_concept(&concept);
            }
            print_mount(studio, mounts::CONCEPT_POPUP, "Learning Path");
            studio.close_concept_popup();
        }
        Command::Analyze => {
            if let Err(err) = studio.analyze_complexity().await {
                tracing::debug!("[Repl] Analysis failed: {}", err);
            }
            print_mount(studio, mounts::COMPLEXITY, "Complexity");
        }
        Command::AnalysisTab(name) => match AnalysisTab::from_str(&name) {
            Ok(tab) if studio.select_analysis_tab(tab) => {
                print_mount(studio, mounts::COMPLEXITY, tab.title())
            }
            Ok(_) => print_error("Run /analyze first"),
            Err(_) => print_error(format!("Unknown tab '{}'", name)),
        },
        Command::Practice(None) => {
            if let Err(err) = studio.activate_tab(WorkspaceTab::PracticeProblems).await {
                tracing::debug!("[Repl] Practice problems failed: {}", err);
            }
            print_mount(studio, mounts::PRACTICE_LIST, "Practice Problems");
        }
        Command::Practice(Some(index)) => match studio.open_practice_problem(index) {
            Ok(_) => {
                print_mount(studio, mounts::PRACTICE_PROBLEM, "Problem");
                println!("{}", studio.practice_code());
            }
            Err(err) => print_error(err),
        },
        Command::Submit(path) => {
            let code = match path {
                Some(path) => match read_source(&path) {
                    Ok(code) => code,
                    Err(err) => {
                        print_error(err);
                        return true;
                    }
                },
                None => studio.current_code(),
            };
            if let Err(err) = studio.run_practice_solution(&code).await {
                tracing::debug!("[Repl] Practice run failed: {}", err);
            }
            print_mount(studio, mounts::PRACTICE_OUTPUT, "Result");
        }
        Command::ResetPractice => studio.reset_practice(),
        Command::AuthExample => {
            if studio.insert_authentication_example() {
                println!("{}", "Authentication example loaded".green());
            } else {
                print_error("No authentication example for this language");
            }
        }
        Command::Status => {
            let availability = studio.check_api_status().await;
            studio.check_auth_status().await;
            println!("Assistant: {}", availability.status_text());
            print_mount(studio, mounts::AUTH, "Account");
        }
        Command::Unknown(line) => {
            println!("{}", format!("Unknown command: {}", line).bright_black());
        }
    }
    true
}

fn print_demo(studio: &Studio) {
    match studio.demo_session() {
        Some(session) => {
            let spec = session.spec();
            println!("{}", format!("=== {} ===", spec.title).bright_magenta().bold());
            println!("{}", spec.description);
            for widget in &spec.widgets {
                let kind = if widget.is_button() { "button" } else { "input" };
                println!(
                    "  [{}] {} {}",
                    kind,
                    widget.id().cyan(),
                    widget.label().bright_black()
                );
            }
            if let Some(outcome) = session.last_outcome() {
                for line in &outcome.lines {
                    println!("{}", line.bright_blue());
                }
            }
        }
        None => print_mount(studio, mounts::INTERACTIVE_DEMO, "Interactive Demo"),
    }
}

pub async fn run(studio: Studio) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(StudioHelper::new()));

    println!("{}", "=== CodeBridge Studio ===".bright_magenta().bold());
    println!(
        "{}",
        "Type code to build your program, '/help' for commands, or 'quit' to exit.".bright_black()
    );

    if let Err(err) = studio.load_initial_content().await {
        tracing::warn!("[Repl] Initial load incomplete: {}", err);
    }
    let selection = studio.selection();
    println!(
        "{}",
        format!("Language: {}  Concept: {}", selection.language, selection.concept).bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);
                if !dispatch(&studio, parse_command(&line)).await {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                print_error(format!("{:?}", err));
                break;
            }
        }
    }

    studio.cancel_pending_updates();
    Ok(())
}
