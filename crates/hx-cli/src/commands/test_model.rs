//! Test-model command: checks which Gemini models answer with this key.

use std::io::Write;

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use hx_llm::{Client, GenerationSettings, LlmError, PROBE_PROMPT};

use crate::Config;

const MAX_REPLY_CHARS: usize = 80;

#[derive(Debug, Args)]
pub struct TestModelArgs {
    /// Models to probe; defaults to the configured model and its fallbacks.
    pub models: Vec<String>,

    /// Prompt to send instead of the default greeting.
    #[arg(long)]
    pub prompt: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &TestModelArgs, config: &Config) -> Result<()> {
    let api_key = config
        .api_key()
        .ok_or_else(|| anyhow!("missing Gemini API key (set HX_API_KEY or GEMINI_API_KEY)"))?;
    let models = if args.models.is_empty() {
        std::iter::once(config.model.clone())
            .chain(config.fallback_models.iter().cloned())
            .collect()
    } else {
        args.models.clone()
    };
    let prompt = args.prompt.as_deref().unwrap_or(PROBE_PROMPT);

    let client =
        Client::with_timeout(api_key, config.timeout()).context("failed to create LLM client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;

    let mut working = 0;
    for model in &models {
        let settings = GenerationSettings::probe(model.as_str(), config.api_base.as_str());
        let outcome = runtime.block_on(client.generate(&settings, prompt));
        if outcome.is_ok() {
            working += 1;
        }
        writeln!(writer, "{}", probe_line(model, &outcome))?;
    }

    if working == 0 {
        bail!("none of the {} model(s) responded", models.len());
    }
    Ok(())
}

fn probe_line(model: &str, outcome: &Result<String, LlmError>) -> String {
    match outcome {
        Ok(text) => {
            let reply = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let reply: String = reply.chars().take(MAX_REPLY_CHARS).collect();
            format!("{model:<20} ok      {reply}")
        }
        Err(err) => format!("{model:<20} failed  {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn test_probe_lines() {
        let ok = probe_line("gemini-1.5-flash", &Ok("Hello,\n this model works!\n".to_string()));
        let failed = probe_line(
            "gemini-pro",
            &Err(LlmError::ModelUnavailable {
                model: "gemini-pro".to_string(),
                message: "not found".to_string(),
            }),
        );
        assert_snapshot!(format!("{ok}\n{failed}"), @r"
        gemini-1.5-flash     ok      Hello, this model works!
        gemini-pro           failed  model gemini-pro is not available: not found
        ");
    }

    #[test]
    fn test_long_replies_are_truncated() {
        let line = probe_line("m", &Ok("x".repeat(500)));
        assert!(line.ends_with(&"x".repeat(MAX_REPLY_CHARS)));
        assert!(!line.ends_with(&"x".repeat(MAX_REPLY_CHARS + 1)));
    }

    #[test]
    fn test_unreachable_api_fails_every_model() {
        let config = Config {
            api_key: Some("test-key".to_string()),
            api_base: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..Config::default()
        };
        let args = TestModelArgs {
            models: vec!["gemini-pro".to_string()],
            prompt: None,
        };
        let mut output = Vec::new();
        let err = run(&mut output, &args, &config).unwrap_err();
        assert_eq!(err.to_string(), "none of the 1 model(s) responded");
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("gemini-pro           failed  request failed"));
    }
}
