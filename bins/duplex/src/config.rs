use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "duplex", about = "Reversible byte pipelines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode files: run the stages top to bottom
    Apply(RunArgs),
    /// Encode files: run the stages bottom to top
    Unapply(RunArgs),
    /// Encode then decode each file and compare with the original
    Check(CheckArgs),
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Путь к TOML конфиг файлу пайплайна
    #[arg(long, default_value = "duplex.toml", env = "DUPLEX_CONFIG")]
    pub config: String,

    /// Directory for converted files (default: next to each input)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Extension appended to converted file names
    #[arg(long, default_value = "out")]
    pub suffix: String,

    /// Input files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Путь к TOML конфиг файлу пайплайна
    #[arg(long, default_value = "duplex.toml", env = "DUPLEX_CONFIG")]
    pub config: String,

    /// Input files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

// ---- TOML Config ----

#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    /// Сколько файлов конвертируется одновременно; 0 = без лимита.
    #[serde(default)]
    pub max_concurrency: usize,
    /// Стадии в порядке декодирования.
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageConfig {
    Gzip {
        /// 1-9, clamped.
        #[serde(default = "default_gzip_level")]
        level: u32,
    },
    Lz4,
    Base64,
}

fn default_gzip_level() -> u32 {
    6
}

impl PipelineConfig {
    pub fn load(path: &str) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| CliError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
