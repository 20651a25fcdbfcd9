use crate::domain::model::PatternConfig;
use crate::utils::error::{CounterError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub document: Option<DocumentConfig>,
    pub server: Option<ServerConfig>,
    pub markers: Option<MarkerConfig>,
    pub exclude: Option<ExcludeConfig>,
    pub reader: Option<ReaderConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub path: Option<String>,
    pub goal: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub index: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeConfig {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    pub max_line_bytes: Option<usize>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CounterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CounterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CounterError::ConfigError {
            message: format!("environment substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn document_path(&self) -> Option<&str> {
        self.document.as_ref()?.path.as_deref()
    }

    pub fn goal(&self) -> Option<u64> {
        self.document.as_ref()?.goal
    }

    pub fn host(&self) -> Option<&str> {
        self.server.as_ref()?.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.server.as_ref()?.port
    }

    pub fn index_path(&self) -> Option<&str> {
        self.server.as_ref()?.index.as_deref()
    }

    pub fn max_line_bytes(&self) -> Option<usize> {
        self.reader.as_ref()?.max_line_bytes
    }

    /// Built-in patterns, overridden by whatever the file sets.
    pub fn patterns(&self) -> PatternConfig {
        let mut patterns = PatternConfig::default();
        if let Some(markers) = &self.markers {
            if let Some(start) = &markers.start {
                patterns.start = start.clone();
            }
            if let Some(end) = &markers.end {
                patterns.end = end.clone();
            }
        }
        if let Some(exclude) = &self.exclude {
            patterns.exclude = exclude.patterns.clone();
        }
        patterns
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = self.document_path() {
            crate::utils::validation::validate_path("document.path", path)?;
        }

        if let Some(port) = self.port() {
            crate::utils::validation::validate_positive_number("server.port", usize::from(port), 1)?;
        }

        if let Some(max) = self.max_line_bytes() {
            crate::utils::validation::validate_positive_number("reader.max_line_bytes", max, 1)?;
        }

        if let Some(markers) = &self.markers {
            for (field, pattern) in [("markers.start", &markers.start), ("markers.end", &markers.end)] {
                if let Some(pattern) = pattern {
                    crate::utils::validation::validate_non_empty_string(field, pattern)?;
                }
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
