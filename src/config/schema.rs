use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ── Persisted settings ────────────────────────────────────────────

/// User-facing settings, persisted verbatim as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Page content under this length is not summarized
    #[serde(default = "default_summary_length_trigger")]
    pub summary_length_trigger: i64,
    /// Character budget shared by every summary in one message
    #[serde(default = "default_max_summarization_length")]
    pub max_summarization_length: i64,
    /// Which call sites run the pipeline
    #[serde(default)]
    pub use_for: UseFor,
    /// Also rewrite the user-visible copy of chat messages
    #[serde(default = "default_true")]
    pub enable_visible: bool,
}

fn default_summary_length_trigger() -> i64 {
    128
}

fn default_max_summarization_length() -> i64 {
    2048
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            summary_length_trigger: default_summary_length_trigger(),
            max_summarization_length: default_max_summarization_length(),
            use_for: UseFor::default(),
            enable_visible: true,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

// ── Mode selection ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UseFor {
    #[serde(rename = "Chats")]
    Chats,
    #[serde(
        rename = "Notebook & Default",
        alias = "Notebook &amp; Default",
        alias = "NotebookAndDefault"
    )]
    NotebookAndDefault,
    #[default]
    #[serde(rename = "Both")]
    Both,
    #[serde(rename = "Disabled")]
    Disabled,
}

impl fmt::Display for UseFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Chats => "Chats",
            Self::NotebookAndDefault => "Notebook & Default",
            Self::Both => "Both",
            Self::Disabled => "Disabled",
        })
    }
}

impl FromStr for UseFor {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chats" | "chat" => Ok(Self::Chats),
            "notebook & default" | "notebook &amp; default" | "notebookanddefault" | "notebook"
            | "default" | "generic" => Ok(Self::NotebookAndDefault),
            "both" => Ok(Self::Both),
            "disabled" | "none" | "off" => Ok(Self::Disabled),
            _ => Err(ParseOptionError {
                kind: "use_for mode",
                value: s.to_string(),
                expected: "chats, notebook, both, disabled",
            }),
        }
    }
}

// ── Process options (not persisted) ───────────────────────────────

/// How the remaining budget is recomputed after each fetched article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPolicy {
    /// `total - len(most recent article)`; earlier articles are forgotten.
    #[default]
    MostRecent,
    /// `budget - len(article)`; a monotonically shrinking running total.
    RunningTotal,
}

impl FromStr for BudgetPolicy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "most_recent" => Ok(Self::MostRecent),
            "running_total" => Ok(Self::RunningTotal),
            _ => Err(ParseOptionError {
                kind: "budget policy",
                value: s.to_string(),
                expected: "most-recent, running-total",
            }),
        }
    }
}

/// How URLs in the message body are turned into markdown links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStrategy {
    /// Segment into link and bare-URL spans, rewrite each span once.
    #[default]
    Tokenized,
    /// Replace every literal occurrence of each URL across the whole text.
    Literal,
}

impl FromStr for RewriteStrategy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tokenized" => Ok(Self::Tokenized),
            "literal" => Ok(Self::Literal),
            _ => Err(ParseOptionError {
                kind: "rewrite strategy",
                value: s.to_string(),
                expected: "tokenized, literal",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Fraction of the total budget held back for the footer itself
    #[serde(default = "default_remaining_buffer")]
    pub remaining_buffer: f64,
    /// Passed through to every fetch; does not gate anything
    #[serde(default = "default_min_length")]
    pub min_length: i64,
    #[serde(default)]
    pub budget_policy: BudgetPolicy,
    #[serde(default)]
    pub rewrite_strategy: RewriteStrategy,
}

fn default_remaining_buffer() -> f64 {
    0.3
}

fn default_min_length() -> i64 {
    40
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            remaining_buffer: default_remaining_buffer(),
            min_length: default_min_length(),
            budget_policy: BudgetPolicy::default(),
            rewrite_strategy: RewriteStrategy::default(),
        }
    }
}
