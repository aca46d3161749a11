//! Prompt command: renders the plan-generation prompt for an intake.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use hx_core::{Intake, SourceKind, build_prompt, weeks_until};

use super::util::{load_intake, read_input, today};
use crate::Config;

/// Inputs shared by every command that plans training.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Intake file (TOML, or JSON by extension).
    pub intake: PathBuf,

    /// Previous race result (HTML or CSV) whose times override the intake's.
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Format of the results file; guessed from its extension if omitted.
    #[arg(long, requires = "results")]
    pub results_format: Option<SourceKind>,

    /// Count weeks from this date instead of today (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct PromptArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Prepend the system instruction sent along with the prompt.
    #[arg(long)]
    pub with_system: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &PromptArgs, config: &Config) -> Result<()> {
    let (intake, weeks) = prepare(&args.plan, config)?;
    if args.with_system {
        writeln!(writer, "{}", hx_core::SYSTEM_INSTRUCTION)?;
        writeln!(writer)?;
    }
    writeln!(writer, "{}", build_prompt(&intake, weeks))?;
    Ok(())
}

/// Loads and validates the intake, overlays any parsed results, and counts
/// the weeks left before the race.
pub fn prepare(args: &PlanArgs, config: &Config) -> Result<(Intake, u32)> {
    let mut intake = load_intake(&args.intake)?;

    if let Some(path) = &args.results {
        let kind = args
            .results_format
            .unwrap_or_else(|| SourceKind::from_path(path));
        let source = read_input(path)?;
        let result = hx_core::parse_result_with(&source, kind, &config.parse_options());
        if result.is_empty() {
            tracing::warn!(path = %path.display(), "results file has no station times");
        }
        intake.apply_result(&result);
    }

    intake.validate().context("invalid intake")?;
    let from = args.today.unwrap_or_else(today);
    let weeks = weeks_until(intake.race_date, from)?;
    tracing::debug!(weeks, division = %intake.division, "prepared plan inputs");
    Ok((intake, weeks))
}

#[cfg(test)]
mod tests {
    use super::*;

    use hx_core::Station;

    const INTAKE: &str = r#"
race_location = "Manchester"
race_date = "2026-06-13"
division = "mixed-doubles"
current_time = "1:30:00"
target_time = "1:22:00"
current_5k = "24:00"
run_days = 2
strength_days = 2
gym_days = 2

[station_times]
sledPull = "5:00"
"#;

    fn plan_args(dir: &std::path::Path) -> PlanArgs {
        let intake = dir.join("intake.toml");
        std::fs::write(&intake, INTAKE).unwrap();
        PlanArgs {
            intake,
            results: None,
            results_format: None,
            today: Some("2026-03-21".parse().unwrap()),
        }
    }

    #[test]
    fn test_prepare_counts_weeks_from_given_date() {
        let temp = tempfile::tempdir().unwrap();
        let (intake, weeks) = prepare(&plan_args(temp.path()), &Config::default()).unwrap();
        assert_eq!(weeks, 12);
        assert_eq!(intake.station_times[&Station::SledPull].seconds(), 300);
    }

    #[test]
    fn test_prepare_overlays_parsed_results() {
        let temp = tempfile::tempdir().unwrap();
        let results = temp.path().join("race.csv");
        std::fs::write(
            &results,
            "Split,Time,Diff\nSled Pull Out,0:20:00,4:20\nTotal,1:28:10,\n",
        )
        .unwrap();
        let mut args = plan_args(temp.path());
        args.results = Some(results);

        let (intake, _) = prepare(&args, &Config::default()).unwrap();
        assert_eq!(intake.station_times[&Station::SledPull].seconds(), 260);
        assert_eq!(intake.current_time.seconds(), 5290);
    }

    #[test]
    fn test_prepare_rejects_past_race() {
        let temp = tempfile::tempdir().unwrap();
        let mut args = plan_args(temp.path());
        args.today = Some("2026-07-01".parse().unwrap());
        let err = prepare(&args, &Config::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "race date 2026-06-13 is not after 2026-07-01"
        );
    }

    #[test]
    fn test_prompt_can_include_system_instruction() {
        let temp = tempfile::tempdir().unwrap();
        let args = PromptArgs {
            plan: plan_args(temp.path()),
            with_system: true,
        };
        let mut output = Vec::new();
        run(&mut output, &args, &Config::default()).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("You are an expert Hyrox coach"));
        assert!(output.contains("- **Race Division:** Mixed Doubles"));
        assert!(output.contains("- **Weeks Until Race:** 12"));
    }
}
