use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use hx_cli::commands::{generate, parse, prompt, test_model};
use hx_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays pipeable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Parse(args) => parse::run(&mut stdout, args, &config)?,
        Commands::Prompt(args) => prompt::run(&mut stdout, args, &config)?,
        Commands::Generate(args) => generate::run(&mut stdout, args, &config)?,
        Commands::TestModel(args) => test_model::run(&mut stdout, args, &config)?,
    }

    Ok(())
}
