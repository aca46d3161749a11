//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use hx_core::Intake;

/// Reads a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads an intake from a JSON file (by extension) or TOML otherwise.
pub fn load_intake(path: &Path) -> Result<Intake> {
    let text = read_input(path)?;
    parse_intake(&text, path)
}

fn parse_intake(text: &str, path: &Path) -> Result<Intake> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(text).with_context(|| format!("invalid intake {}", path.display()))
    } else {
        toml::from_str(text).with_context(|| format!("invalid intake {}", path.display()))
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTAKE_JSON: &str = r#"{
        "race_location": "Berlin",
        "race_date": "2026-05-02",
        "division": "womens-pro",
        "current_time": "1:20:00",
        "target_time": 4500,
        "current_5k": "21:00",
        "station_times": {"sledPull": "4:10"},
        "run_days": 3,
        "strength_days": 2,
        "gym_days": 2
    }"#;

    #[test]
    fn test_parses_json_intake_by_extension() {
        let intake = parse_intake(INTAKE_JSON, Path::new("intake.JSON")).unwrap();
        assert_eq!(intake.race_location, "Berlin");
        assert_eq!(intake.target_time.seconds(), 4500);
        assert!(intake.equipment.is_empty());
    }

    #[test]
    fn test_toml_errors_name_the_file() {
        let err = parse_intake("race_location = 3", Path::new("me.toml")).unwrap_err();
        assert_eq!(err.to_string(), "invalid intake me.toml");
    }

    #[test]
    fn test_missing_file_errors() {
        let err = read_input(Path::new("/nonexistent/hx/result.html")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }
}
