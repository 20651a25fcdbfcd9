use serde::{Deserialize, Serialize};

/// Response body of `GET /count`.
///
/// `goal` is echoed from configuration; the counter never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    pub length: usize,
    pub goal: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub const DEFAULT_START_PATTERN: &str = r"<<<<<.?START";
pub const DEFAULT_END_PATTERN: &str = r">>>>>.?END";
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 2] = [r"\\[A-Za-z]+(\{[^{}]*\})+", r"%.+"];

/// Uncompiled marker and exclusion patterns, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub start: String,
    pub end: String,
    /// Applied in order; each rule sees the output of the previous one.
    pub exclude: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PATTERN.to_string(),
            end: DEFAULT_END_PATTERN.to_string(),
            exclude: DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
