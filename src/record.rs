//! Answer records and display settings
//!
//! The durable value types of the assistant:
//! - `AnswerRecord`: a resolved question/answer pair with optional citation
//! - `AnswerSettings`: how answers are rendered (length, verbosity, font size)
//! - `VerbosityLevel` and `ThemeMode`: small persisted enums

use crate::region::Region;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How much detail an answer should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// Short, direct answers
    Concise,
    /// Balanced detail
    #[default]
    Moderate,
    /// Full explanations with context
    Detailed,
}

impl VerbosityLevel {
    /// Get the string representation of the verbosity level
    pub fn as_str(&self) -> &'static str {
        match self {
            VerbosityLevel::Concise => "concise",
            VerbosityLevel::Moderate => "moderate",
            VerbosityLevel::Detailed => "detailed",
        }
    }

    /// Get all verbosity levels
    pub fn all() -> &'static [VerbosityLevel] {
        &[
            VerbosityLevel::Concise,
            VerbosityLevel::Moderate,
            VerbosityLevel::Detailed,
        ]
    }
}

impl FromStr for VerbosityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "concise" | "short" | "brief" => Ok(VerbosityLevel::Concise),
            "moderate" | "medium" | "normal" => Ok(VerbosityLevel::Moderate),
            "detailed" | "full" | "long" => Ok(VerbosityLevel::Detailed),
            _ => Err(Error::InvalidValue(format!(
                "Unknown verbosity level: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Light or dark presentation preference.
///
/// Persisted as the raw sentinel `"dark"` / `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Get the string representation of the theme mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(Error::InvalidValue(format!("Unknown theme mode: {}", s))),
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How answers are rendered.
///
/// A missing field on disk falls back to its default, so records written by
/// older versions still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSettings {
    /// Upper bound on answer length, in words
    pub max_words: u32,
    /// How much detail an answer should carry
    pub verbosity_level: VerbosityLevel,
    /// Body font size used by the front-end
    pub font_size: u32,
    /// Include standard/clause citations with answers
    pub include_references: bool,
    /// Expand the full clause text instead of just the reference
    pub show_full_clause: bool,
}

impl Default for AnswerSettings {
    fn default() -> Self {
        Self {
            max_words: 300,
            verbosity_level: VerbosityLevel::Moderate,
            font_size: 16,
            include_references: true,
            show_full_clause: false,
        }
    }
}

impl AnswerSettings {
    /// Merge a partial update over the current value. Absent fields retain
    /// their prior value.
    pub fn apply(&mut self, patch: AnswerSettingsPatch) {
        if let Some(max_words) = patch.max_words {
            self.max_words = max_words;
        }
        if let Some(verbosity_level) = patch.verbosity_level {
            self.verbosity_level = verbosity_level;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(include_references) = patch.include_references {
            self.include_references = include_references;
        }
        if let Some(show_full_clause) = patch.show_full_clause {
            self.show_full_clause = show_full_clause;
        }
    }

    /// Clip an answer to at most `max_words` words.
    pub fn clip<'a>(&self, answer: &'a str) -> std::borrow::Cow<'a, str> {
        let words: Vec<&str> = answer.split_whitespace().collect();
        if words.len() <= self.max_words as usize {
            std::borrow::Cow::Borrowed(answer)
        } else {
            let clipped = words[..self.max_words as usize].join(" ");
            std::borrow::Cow::Owned(format!("{}…", clipped))
        }
    }
}

/// Partial update over [`AnswerSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSettingsPatch {
    pub max_words: Option<u32>,
    pub verbosity_level: Option<VerbosityLevel>,
    pub font_size: Option<u32>,
    pub include_references: Option<bool>,
    pub show_full_clause: Option<bool>,
}

/// A resolved question/answer pair.
///
/// Identity is `id`: two records with equal content but different ids are
/// distinct. Records are immutable once stored; mutation is modeled as
/// remove followed by add.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    /// Unique identifier, assigned by the caller
    pub id: String,
    /// The question as asked
    pub question: String,
    /// The resolved answer text
    pub answer: String,
    /// Jurisdiction the answer was scoped to
    pub region: Region,
    /// Creation time, epoch milliseconds
    pub timestamp: i64,
    /// Regulatory document the answer is drawn from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    /// Sub-section within the standard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
}

impl AnswerRecord {
    /// Create a new record with no citation
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        region: Region,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            region,
            timestamp,
            standard: None,
            clause: None,
        }
    }

    /// Set the standard citation
    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    /// Set the clause citation
    pub fn with_clause(mut self, clause: impl Into<String>) -> Self {
        self.clause = Some(clause.into());
        self
    }

    /// Formatted citation, when the record carries one
    ///
    /// e.g. `AS/NZS 3000:2018 § 4.4.2.2`
    pub fn citation(&self) -> Option<String> {
        match (&self.standard, &self.clause) {
            (Some(standard), Some(clause)) => Some(format!("{} § {}", standard, clause)),
            (Some(standard), None) => Some(standard.clone()),
            (None, Some(clause)) => Some(format!("§ {}", clause)),
            (None, None) => None,
        }
    }
}

impl PartialEq for AnswerRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnswerRecord {}

impl std::hash::Hash for AnswerRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
