//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::generate::GenerateArgs;
use crate::commands::parse::ParseArgs;
use crate::commands::prompt::PromptArgs;
use crate::commands::test_model::TestModelArgs;

/// Hyrox race-result parser and training-plan generator.
///
/// Reads result pages or CSV exports into per-station times and turns an
/// athlete intake into a week-by-week plan via Gemini.
#[derive(Debug, Parser)]
#[command(name = "hx", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a result page or CSV export into station times.
    Parse(ParseArgs),

    /// Print the plan-generation prompt for an intake file.
    Prompt(PromptArgs),

    /// Generate a training plan with Gemini.
    Generate(GenerateArgs),

    /// Check which Gemini models respond with the configured key.
    TestModel(TestModelArgs),
}
