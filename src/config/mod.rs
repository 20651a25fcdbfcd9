pub mod toml_config;

use crate::core::counter::CounterConfig;
use crate::core::line_reader::DEFAULT_MAX_LINE_BYTES;
use crate::domain::model::PatternConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 1323;
pub const DEFAULT_INDEX: &str = "public/index.html";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "manuscript-counter")]
#[command(about = "Serve the character count of the marked region of a manuscript")]
pub struct CliConfig {
    /// Document to count
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Listening port [default: 1323]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Goal length echoed in every response [default: 0]
    #[arg(short, long)]
    pub goal: Option<u64>,

    /// Bind address [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Page served at `/` [default: public/index.html]
    #[arg(long)]
    pub index: Option<String>,

    /// Count once, print the JSON result and exit
    #[arg(long)]
    pub once: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

/// Settings after merging flags over the TOML file over built-in defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub document_path: String,
    pub goal: u64,
    pub host: String,
    pub port: u16,
    pub index_path: String,
    pub patterns: PatternConfig,
    pub max_line_bytes: usize,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<AppConfig> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };
        self.merge(&file_config)
    }

    pub fn merge(&self, file_config: &TomlConfig) -> Result<AppConfig> {
        let document_path = self
            .file
            .clone()
            .or_else(|| file_config.document_path().map(str::to_string));
        let document_path = validation::validate_required_field("file", &document_path)?.clone();

        Ok(AppConfig {
            document_path,
            goal: self.goal.or(file_config.goal()).unwrap_or(0),
            host: self
                .host
                .clone()
                .or_else(|| file_config.host().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.or(file_config.port()).unwrap_or(DEFAULT_PORT),
            index_path: self
                .index
                .clone()
                .or_else(|| file_config.index_path().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_INDEX.to_string()),
            patterns: file_config.patterns(),
            max_line_bytes: file_config.max_line_bytes().unwrap_or(DEFAULT_MAX_LINE_BYTES),
        })
    }
}

impl AppConfig {
    pub fn counter_config(&self) -> Result<CounterConfig> {
        CounterConfig::compile(&self.patterns, self.max_line_bytes)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("file", &self.document_path)?;
        validation::validate_path("index", &self.index_path)?;
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_positive_number("port", usize::from(self.port), 1)?;
        validation::validate_positive_number("reader.max_line_bytes", self.max_line_bytes, 1)?;
        Ok(())
    }
}
