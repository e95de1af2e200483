//! Practice problems: list, problem view, a practice editor and graded output.

use super::paint;
use crate::document::{self, classes, mounts, SharedDocument};
use crate::markup::templates;
use codebridge_core::api::{ExecuteResponse, PracticeProblem};
use codebridge_core::editor::{EditorHandle, TextBufferEditor};
use codebridge_core::{CodebridgeError, Result};
use minijinja::context;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const SUMMARY_LEN: usize = 150;
pub const RESET_CODE: &str = "# Write your solution here";
pub const SOLVED: &str = "✓ Correct! Your solution works.";

const LOADING: &str = "Loading practice problems...";
const EMPTY: &str = "No practice problems available for this concept yet.";

#[derive(Serialize)]
struct ProblemSummary<'a> {
    title: &'a str,
    summary: String,
    difficulty: &'a str,
    difficulty_class: String,
}

impl<'a> From<&'a PracticeProblem> for ProblemSummary<'a> {
    fn from(problem: &'a PracticeProblem) -> Self {
        let difficulty = if problem.difficulty.trim().is_empty() {
            "medium"
        } else {
            problem.difficulty.as_str()
        };
        Self {
            title: &problem.title,
            summary: summarize(&problem.description),
            difficulty,
            difficulty_class: difficulty.trim().to_lowercase(),
        }
    }
}

/// Cuts `text` to [`SUMMARY_LEN`] characters, marking the cut with "...".
pub fn summarize(text: &str) -> String {
    if text.chars().count() <= SUMMARY_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(SUMMARY_LEN).collect();
    format!("{cut}...")
}

#[derive(Default)]
struct PracticeState {
    problems: Vec<PracticeProblem>,
    current: Option<usize>,
}

pub struct PracticePanel {
    document: SharedDocument,
    editor: Arc<TextBufferEditor>,
    state: Mutex<PracticeState>,
}

impl PracticePanel {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            document,
            editor: Arc::new(TextBufferEditor::new(RESET_CODE)),
            state: Mutex::new(PracticeState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PracticeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mount(&self) {
        *self.lock() = PracticeState::default();
        document::lock(&self.document).add_class(mounts::PRACTICE_AREA, classes::HIDDEN);
        self.clear_output();
    }

    /// The practice editor. It is separate from the main editor.
    pub fn editor(&self) -> Arc<TextBufferEditor> {
        Arc::clone(&self.editor)
    }

    fn status(&self, id: &str, class: &str, message: &str, spinner: bool) {
        paint(
            &self.document,
            id,
            templates::PRACTICE_STATUS,
            context! { class, message, spinner },
        );
    }

    pub fn show_loading(&self) {
        self.status(mounts::PRACTICE_LIST, "loading-problems", LOADING, true);
    }

    pub fn show_problems(&self, problems: Vec<PracticeProblem>) {
        if problems.is_empty() {
            self.status(mounts::PRACTICE_LIST, "empty-state", EMPTY, false);
        } else {
            let summaries: Vec<ProblemSummary<'_>> =
                problems.iter().map(ProblemSummary::from).collect();
            paint(
                &self.document,
                mounts::PRACTICE_LIST,
                templates::PRACTICE_LIST,
                context! { problems => summaries },
            );
        }
        *self.lock() = PracticeState {
            problems,
            current: None,
        };
    }

    pub fn show_error(&self, message: &str) {
        self.status(
            mounts::PRACTICE_LIST,
            "error-message",
            &format!("Error loading practice problems: {message}"),
            false,
        );
    }

    pub fn problems(&self) -> Vec<PracticeProblem> {
        self.lock().problems.clone()
    }

    pub fn current(&self) -> Option<PracticeProblem> {
        let state = self.lock();
        state.current.and_then(|index| state.problems.get(index).cloned())
    }

    /// Opens problem `index`: shows it and loads its starter code.
    pub fn open(&self, index: usize) -> Result<PracticeProblem> {
        let problem = {
            let mut state = self.lock();
            let problem = state
                .problems
                .get(index)
                .cloned()
                .ok_or_else(|| CodebridgeError::not_found("practice problem", index.to_string()))?;
            state.current = Some(index);
            problem
        };

        paint(
            &self.document,
            mounts::PRACTICE_PROBLEM,
            templates::PRACTICE_PROBLEM,
            context! {
                title => &problem.title,
                description => &problem.description,
                hints => &problem.hints,
            },
        );
        self.editor.set_value(&problem.starter_code);
        self.editor.focus();
        self.clear_output();
        document::lock(&self.document).remove_class(mounts::PRACTICE_AREA, classes::HIDDEN);
        Ok(problem)
    }

    pub fn show_running(&self) {
        self.status(
            mounts::PRACTICE_OUTPUT,
            "running",
            "Running your code...",
            true,
        );
    }

    /// Shows numbered output and grades it. Returns whether it solved the
    /// open problem.
    pub fn show_result(&self, response: &ExecuteResponse) -> bool {
        if !response.success {
            let error = response
                .error
                .as_deref()
                .unwrap_or("An unknown error occurred");
            self.status(mounts::PRACTICE_OUTPUT, "error-message", error, false);
            return false;
        }

        let output = response.output.as_deref().unwrap_or_default();
        let solved = self
            .current()
            .is_some_and(|problem| problem.is_solved_by(output));
        let lines: Vec<&str> = output.lines().collect();
        paint(
            &self.document,
            mounts::PRACTICE_OUTPUT,
            templates::PRACTICE_OUTPUT,
            context! { lines, verdict => solved.then_some(SOLVED) },
        );
        solved
    }

    pub fn show_failure(&self, message: &str) {
        self.status(
            mounts::PRACTICE_OUTPUT,
            "error-message",
            &format!("Error: {message}"),
            false,
        );
    }

    /// Empties the practice editor.
    pub fn reset(&self) {
        self.editor.set_value(RESET_CODE);
        self.editor.focus();
        self.clear_output();
    }

    pub fn clear_output(&self) {
        document::lock(&self.document).set_markup(mounts::PRACTICE_OUTPUT, "");
    }
}
