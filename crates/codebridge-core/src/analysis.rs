//! Complexity analysis model.
//!
//! A [`ComplexityReport`] is received from `/api/analyze-complexity`,
//! rendered once and discarded. Everything derived from it here (labels,
//! color classes, sub-scores) is presentation only.

use crate::error::{CodebridgeError, Result};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComplexityReport {
    pub complexity_score: u8,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub complexity_factors: Vec<String>,
    #[serde(default)]
    pub simplification_suggestions: Vec<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub real_world_comparison: String,
}

impl ComplexityReport {
    /// Parses the raw response body.
    ///
    /// A body carrying `status: "error"` becomes an application error with
    /// the server's `message`.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.get("status").and_then(|s| s.as_str()) == Some("error") {
            let message = value
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            return Err(CodebridgeError::application(message));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Score clamped into 1..=10.
    pub fn score(&self) -> u8 {
        self.complexity_score.clamp(1, 10)
    }

    pub fn level(&self) -> ComplexityLevel {
        ComplexityLevel::from_score(self.score())
    }

    /// Width of the score bar, in percent.
    pub fn bar_percent(&self) -> u32 {
        u32::from(self.score()) * 10
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityLevel {
    VerySimple,
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl ComplexityLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::VerySimple,
            3..=4 => Self::Simple,
            5..=6 => Self::Moderate,
            7..=8 => Self::Complex,
            _ => Self::VeryComplex,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VerySimple => "Very Simple",
            Self::Simple => "Simple",
            Self::Moderate => "Moderate Complexity",
            Self::Complex => "Complex",
            Self::VeryComplex => "Very Complex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::VerySimple => "very straightforward and easy to understand",
            Self::Simple => "relatively simple with clear patterns",
            Self::Moderate => "moderately complex with some challenging elements",
            Self::Complex => "quite complex and would benefit from simplification",
            Self::VeryComplex => "highly complex and may be difficult to maintain",
        }
    }
}

/// CSS-like color class for a score.
pub fn color_class(score: u8) -> &'static str {
    match score {
        0..=3 => "score-low",
        4..=6 => "score-medium",
        _ => "score-high",
    }
}

/// Display-only breakdown of a score for the visual tab.
///
/// These are fixed multiples of the overall score, not measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubScores {
    pub structure: u8,
    pub logic: u8,
    pub naming: u8,
}

impl SubScores {
    pub fn from_score(score: u8) -> Self {
        Self {
            structure: scaled(score, 1.2, 5),
            logic: scaled(score, 0.9, 4),
            naming: scaled(score, 0.7, 3),
        }
    }

    pub fn pairs(self) -> [(&'static str, u8); 3] {
        [
            ("Structure", self.structure),
            ("Logic", self.logic),
            ("Naming", self.naming),
        ]
    }
}

fn scaled(score: u8, factor: f64, when_zero: u8) -> u8 {
    let value = (f64::from(score) * factor).round().min(10.0) as u8;
    if value == 0 { when_zero } else { value }
}

/// Tabs of the analysis report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnalysisTab {
    #[default]
    Analysis,
    Suggestions,
    Concepts,
    Visual,
}

impl AnalysisTab {
    pub fn title(self) -> &'static str {
        match self {
            Self::Analysis => "Analysis",
            Self::Suggestions => "Suggestions",
            Self::Concepts => "Key Concepts",
            Self::Visual => "Visual",
        }
    }
}
