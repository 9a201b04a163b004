//! Command-line argument parsing for IntelliSQL.
//!
//! Uses clap to parse CLI arguments.

use clap::Parser;
use intellisql::config::Config;
use intellisql::output::OutputFormat;
use std::path::PathBuf;

/// Ask questions about the STUDENTS database in plain English.
#[derive(Parser, Debug)]
#[command(name = "intellisql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Question to answer. Starts an interactive prompt when omitted.
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// SQLite database file
    #[arg(short = 'd', long, value_name = "PATH", env = "INTELLISQL_DATABASE")]
    pub database: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// LLM provider to use (gemini, openai, mock)
    #[arg(long, value_name = "PROVIDER")]
    pub llm: Option<String>,

    /// Model name (overrides the provider default)
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Recreate the STUDENTS table with the sample records first
    #[arg(long)]
    pub seed: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }

    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(path) = &self.database {
            config.database.path = path.clone();
        }
        if let Some(provider) = &self.llm {
            config.llm.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
        }
        config
    }
}
