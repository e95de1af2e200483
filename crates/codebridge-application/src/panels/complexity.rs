//! The complexity analyzer report.

use super::{paint, paint_raw};
use crate::document::{mounts, SharedDocument};
use crate::markup::templates;
use codebridge_core::analysis::{color_class, AnalysisTab, ComplexityReport, SubScores};
use minijinja::context;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use strum::IntoEnumIterator;

const CHART_TOP: u32 = 40;
const CHART_HEIGHT: u32 = 180;
const BAR_WIDTH: u32 = 80;
const BAR_GAP: u32 = 40;
const CHART_LEFT: u32 = 40;

#[derive(Serialize)]
struct TabView {
    id: String,
    title: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct BarView {
    key: String,
    label: &'static str,
    value: u8,
    x: u32,
    y: u32,
    height: u32,
    center: u32,
    value_y: u32,
}

fn bars(score: u8) -> Vec<BarView> {
    SubScores::from_score(score)
        .pairs()
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let x = CHART_LEFT + i as u32 * (BAR_WIDTH + BAR_GAP);
            let height = u32::from(value) * CHART_HEIGHT / 10;
            let y = CHART_TOP + CHART_HEIGHT - height;
            BarView {
                key: label.to_lowercase(),
                label,
                value,
                x,
                y,
                height,
                center: x + BAR_WIDTH / 2,
                value_y: y.saturating_sub(6).max(CHART_TOP - 4),
            }
        })
        .collect()
}

#[derive(Default)]
struct ComplexityState {
    report: Option<ComplexityReport>,
    tab: AnalysisTab,
}

pub struct ComplexityPanel {
    document: SharedDocument,
    state: Mutex<ComplexityState>,
}

impl ComplexityPanel {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            document,
            state: Mutex::new(ComplexityState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ComplexityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mount(&self) {
        *self.lock() = ComplexityState::default();
        paint_raw(&self.document, mounts::COMPLEXITY, "");
    }

    pub fn show_loading(&self) {
        self.lock().report = None;
        paint(
            &self.document,
            mounts::COMPLEXITY,
            templates::COMPLEXITY_LOADING,
            context! {},
        );
    }

    pub fn show_error(&self, message: &str) {
        self.lock().report = None;
        paint(
            &self.document,
            mounts::COMPLEXITY,
            templates::COMPLEXITY_ERROR,
            context! { message },
        );
    }

    /// Renders a fresh report on the analysis tab.
    pub fn show_report(&self, report: ComplexityReport) {
        let mut state = self.lock();
        state.report = Some(report);
        state.tab = AnalysisTab::Analysis;
        self.repaint(&state);
    }

    /// Switches tabs. Returns false when there is no report to switch in.
    pub fn select_tab(&self, tab: AnalysisTab) -> bool {
        let mut state = self.lock();
        if state.report.is_none() {
            return false;
        }
        state.tab = tab;
        self.repaint(&state);
        true
    }

    pub fn active_tab(&self) -> AnalysisTab {
        self.lock().tab
    }

    pub fn report(&self) -> Option<ComplexityReport> {
        self.lock().report.clone()
    }

    fn repaint(&self, state: &ComplexityState) {
        let Some(report) = state.report.as_ref() else {
            return;
        };
        let score = report.score();
        let level = report.level();
        let tabs: Vec<TabView> = AnalysisTab::iter()
            .map(|tab| TabView {
                id: tab.to_string(),
                title: tab.title(),
                active: tab == state.tab,
            })
            .collect();
        paint(
            &self.document,
            mounts::COMPLEXITY,
            templates::COMPLEXITY_REPORT,
            context! {
                score,
                color_class => color_class(score),
                label => level.label(),
                level_description => level.description(),
                bar_percent => report.bar_percent(),
                tabs,
                active_tab => state.tab.to_string(),
                explanation => &report.explanation,
                factors => &report.complexity_factors,
                comparison => &report.real_world_comparison,
                suggestions => &report.simplification_suggestions,
                concepts => &report.key_concepts,
                bars => bars(score),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{self, Document};

    fn report(score: u8) -> ComplexityReport {
        ComplexityReport {
            complexity_score: score,
            explanation: "Nested loops with branching.".to_string(),
            complexity_factors: vec!["Nested loops".to_string()],
            simplification_suggestions: vec!["Extract a function".to_string()],
            key_concepts: Vec::new(),
            real_world_comparison: "Like a recipe with sub-recipes.".to_string(),
        }
    }

    fn markup_of(doc: &SharedDocument) -> String {
        document::lock(doc)
            .markup(mounts::COMPLEXITY)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_report_shows_score_label_and_bar() {
        let doc = Document::standard().into_shared();
        let panel = ComplexityPanel::new(doc.clone());
        panel.show_report(report(7));

        let markup = markup_of(&doc);
        assert!(markup.contains(r#"<div class="score-number">7</div>"#));
        assert!(markup.contains("<h3>Complex</h3>"));
        assert!(markup.contains("score-high"));
        assert!(markup.contains("width: 70%"));
        assert!(markup.contains("No specific concepts detected."));
        assert!(markup.contains(r#"<button class="tab-btn active" data-tab="analysis">"#));
    }

    #[test]
    fn test_select_tab_marks_pane_active() {
        let doc = Document::standard().into_shared();
        let panel = ComplexityPanel::new(doc.clone());
        assert!(!panel.select_tab(AnalysisTab::Visual));

        panel.show_report(report(4));
        assert!(panel.select_tab(AnalysisTab::Visual));
        let markup = markup_of(&doc);
        assert!(markup.contains(r#"<div class="tab-pane active" id="visual-tab">"#));
        assert!(markup.contains(r#"<div class="tab-pane" id="analysis-tab">"#));
        assert_eq!(panel.active_tab(), AnalysisTab::Visual);
    }

    #[test]
    fn test_bars_follow_sub_scores() {
        let bars = bars(5);
        let values: Vec<u8> = bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![6, 5, 4]);
        assert_eq!(bars[0].height, 108);
        assert_eq!(bars[0].y, CHART_TOP + CHART_HEIGHT - 108);
    }

    #[test]
    fn test_error_shows_details() {
        let doc = Document::standard().into_shared();
        let panel = ComplexityPanel::new(doc.clone());
        panel.show_error("Code too short to analyze");
        let markup = markup_of(&doc);
        assert!(markup.contains("Error Analyzing Code"));
        assert!(markup.contains("Code too short to analyze"));
    }
}
