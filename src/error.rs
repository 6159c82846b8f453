use std::path::PathBuf;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `linkdigest`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; article sources and the CLI continue to
/// use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum DigestError {
    // ── Settings ─────────────────────────────────────────────────────────
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),

    // ── Link pipeline ───────────────────────────────────────────────────
    #[error("links: {0}")]
    Link(#[from] LinkError),

    // ── Startup ─────────────────────────────────────────────────────────
    #[error("setup: {0}")]
    Setup(#[from] SetupError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Link pipeline errors ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LinkError {
    #[error(
        "The length of the articles exceeded the maximum total length allowed ({limit}). \
         Either limit the number of articles or increase the maximum length."
    )]
    BudgetExceeded { limit: i64 },
}

// ─── Settings errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not find home directory for the settings file")]
    HomeDirectory,

    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write settings file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ─── Startup errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read tokenizer data {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tokenizer data {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tokenizer data has no {0}")]
    EmptyData(&'static str),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, DigestError>;
