//! Generate command: asks Gemini for a full training plan.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use hx_core::build_prompt;
use hx_llm::{Client, strip_code_fence};

use super::prompt::{PlanArgs, prepare};
use crate::Config;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Write the plan HTML here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model to try first, ahead of the configured fallbacks.
    #[arg(long)]
    pub model: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &GenerateArgs, config: &Config) -> Result<()> {
    let api_key = config
        .api_key()
        .ok_or_else(|| anyhow!("missing Gemini API key (set HX_API_KEY or GEMINI_API_KEY)"))?;

    let (intake, weeks) = prepare(&args.plan, config)?;
    let prompt = build_prompt(&intake, weeks);
    let models = candidate_models(args.model.as_deref(), config);

    let client =
        Client::with_timeout(api_key, config.timeout()).context("failed to create LLM client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let (model, text) = runtime
        .block_on(generate_with_fallback(&client, config, &models, &prompt))
        .context("failed to generate training plan")?;
    let html = strip_code_fence(&text);
    tracing::info!(%model, weeks, bytes = html.len(), "generated training plan");

    match &args.output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(
                writer,
                "Wrote {weeks}-week plan from {model} to {}",
                path.display()
            )?;
        }
        None => writeln!(writer, "{html}")?,
    }
    Ok(())
}

/// Models to try in order, without duplicates.
fn candidate_models(first: Option<&str>, config: &Config) -> Vec<String> {
    let mut models: Vec<String> = Vec::new();
    let ordered = first
        .into_iter()
        .chain(std::iter::once(config.model.as_str()))
        .chain(config.fallback_models.iter().map(String::as_str));
    for model in ordered.map(str::trim).filter(|m| !m.is_empty()) {
        if !models.iter().any(|seen| seen == model) {
            models.push(model.to_string());
        }
    }
    models
}

/// Tries each model until one answers; only an unavailable model moves on.
async fn generate_with_fallback(
    client: &Client,
    config: &Config,
    models: &[String],
    prompt: &str,
) -> Result<(String, String)> {
    let mut last_error = None;
    for model in models {
        let settings = config.generation_settings(model);
        match client.generate(&settings, prompt).await {
            Ok(text) => return Ok((model.clone(), text)),
            Err(err) if err.is_model_unavailable() => {
                tracing::warn!(%model, error = %err, "model unavailable, trying next");
                last_error = Some(err);
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(last_error.map_or_else(|| anyhow!("no models configured"), Into::into))
}
