use thiserror::Error;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Line {line} exceeds the {limit} byte line limit")]
    LineTooLongError { line: usize, limit: usize },

    #[error("Line {line} is not valid UTF-8")]
    DecodeError { line: usize },

    #[error("Invalid pattern for {field}: {source}")]
    PatternError {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Configuration,
    Runtime,
}

impl CounterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CounterError::IoError(_) => ErrorCategory::Io,
            CounterError::LineTooLongError { .. } | CounterError::DecodeError { .. } => {
                ErrorCategory::Input
            }
            CounterError::PatternError { .. }
            | CounterError::ConfigError { .. }
            | CounterError::InvalidConfigValueError { .. }
            | CounterError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CounterError::ServerError { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CounterError::IoError(_) => "Check that the document path exists and is readable",
            CounterError::LineTooLongError { .. } => {
                "Raise reader.max_line_bytes or split the offending line"
            }
            CounterError::DecodeError { .. } => "Save the document as UTF-8",
            CounterError::PatternError { .. } => "Fix the regular expression in the configuration",
            CounterError::ConfigError { .. }
            | CounterError::InvalidConfigValueError { .. }
            | CounterError::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            CounterError::ServerError { .. } => "Check that the port is free and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, CounterError>;
