//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

pub type Result<T> = std::result::Result<T, HelperError>;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration (HK-010)
    // ─────────────────────────────────────────────────────────────

    #[error("HK-010: Config error: {reason}")]
    ConfigError { reason: String },

    // ─────────────────────────────────────────────────────────────
    // Deep merge (HK-020 to HK-021)
    // ─────────────────────────────────────────────────────────────

    #[error("HK-020: Invalid array mode '{value}' (expected 'replace' or 'merge')")]
    InvalidArrayMode { value: String },

    #[error("HK-021: Cannot merge {override_kind} into {base_kind} at '{path}'")]
    ShapeMismatch {
        path: String,
        base_kind: &'static str,
        override_kind: &'static str,
    },

    // ─────────────────────────────────────────────────────────────
    // Debounce (HK-030)
    // ─────────────────────────────────────────────────────────────

    #[error("HK-030: debounce_run called outside of a Tokio runtime")]
    NoRuntime,

    // ─────────────────────────────────────────────────────────────
    // Object graphs (HK-040 to HK-042)
    // ─────────────────────────────────────────────────────────────

    #[error("HK-040: Value contains a reference cycle at '{path}'")]
    CyclicValue { path: String },

    #[error("HK-041: Cannot set key '{key}' on {kind} (expected object)")]
    NotAnObject { key: String, kind: &'static str },

    #[error("HK-042: Cannot push onto {kind} (expected array)")]
    NotAnArray { kind: &'static str },
}

impl FixSuggestion for HelperError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            HelperError::Io(_) => Some("Check file path and permissions"),
            HelperError::Json(_) => Some("Ensure the input is valid JSON (try parsing with jq)"),
            HelperError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            HelperError::ConfigError { .. } => {
                Some("Check the TOML file pointed to by --config or HELPKIT_CONFIG")
            }
            HelperError::InvalidArrayMode { .. } => Some("Use --array-mode replace or --array-mode merge"),
            HelperError::ShapeMismatch { .. } => {
                Some("Make both inputs agree on array vs object at that path, or drop --strict")
            }
            HelperError::NoRuntime => Some("Call debounce_run from inside a #[tokio::main] or #[tokio::test] context"),
            HelperError::CyclicValue { .. } => {
                Some("Break the cycle before serializing, or keep working with the graph value")
            }
            HelperError::NotAnObject { .. } => Some("Only object values accept keys"),
            HelperError::NotAnArray { .. } => Some("Only array values accept pushed items"),
        }
    }
}
