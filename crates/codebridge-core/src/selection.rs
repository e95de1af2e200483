//! Selection state: which teaching language and concept the learner has chosen.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A teaching language offered by the language selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    Python,
    Javascript,
    Java,
    Cpp,
}

impl Language {
    /// Line-comment prefix used when synthesizing placeholder code.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            Language::Python => "#",
            Language::Javascript | Language::Java | Language::Cpp => "//",
        }
    }
}

/// A teaching topic such as `if-else`, `loops` or `oops`.
///
/// Concepts are open-ended lookup keys: unknown concepts are valid and simply
/// have no catalog entry. The empty string normalizes to `general`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Concept(String);

impl Concept {
    pub const GENERAL: &'static str = "general";

    pub fn new(name: impl AsRef<str>) -> Self {
        let normalized = name.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            Self::general()
        } else {
            Self(normalized)
        }
    }

    pub fn general() -> Self {
        Self(Self::GENERAL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `general` means "no particular concept selected".
    pub fn is_general(&self) -> bool {
        self.0 == Self::GENERAL
    }

    /// Concept name with its first character upper-cased (`if-else` -> `If-else`).
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for Concept {
    fn default() -> Self {
        Self::general()
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Concept {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Concept {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Concept {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The learner's current language/concept choice.
///
/// The code itself lives in the active editor; this only carries the two
/// selector values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub language: Language,
    pub concept: Concept,
}

impl Selection {
    pub fn new(language: Language, concept: Concept) -> Self {
        Self { language, concept }
    }
}
