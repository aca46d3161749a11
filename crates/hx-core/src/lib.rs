//! Core domain logic for Hyrox race results and training plans.
//!
//! This crate contains:
//! - Duration: decoding and formatting race clock times
//! - Extraction: pulling split rows out of HTML, markdown, embedded JSON and CSV
//! - Classification and reduction: turning split rows into station times
//! - Planning: intake data, priorities and the plan-generation prompt

pub mod classify;
pub mod division;
pub mod duration;
pub mod extract;
pub mod intake;
pub mod priority;
pub mod prompt;
pub mod reduce;
pub mod station;

pub use classify::{Classification, classify, classify_label, match_station};
pub use division::{Division, RaceWeights, UnknownDivision};
pub use duration::{ClockTime, InvalidClockTime, format_duration, parse_duration};
pub use extract::{ExtractOptions, RawRow, SourceKind, Strategy, extract_raw_rows};
pub use intake::{Intake, IntakeError, weeks_until};
pub use priority::{Priority, rank_priorities};
pub use prompt::{SYSTEM_INSTRUCTION, TrainingPhases, build_prompt};
pub use reduce::{RaceResult, ReduceOptions, RepairScope, reduce_to_result};
pub use station::{Station, UnknownStation};

/// Settings for the whole parse pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub extract: ExtractOptions,
    pub reduce: ReduceOptions,
}

/// Parses a race-result document with default options.
pub fn parse_result(source: &str, kind: SourceKind) -> RaceResult {
    parse_result_with(source, kind, &ParseOptions::default())
}

/// Parses a race-result document: extract rows, then reduce them.
pub fn parse_result_with(source: &str, kind: SourceKind, options: &ParseOptions) -> RaceResult {
    let rows = extract::extract_with(source, kind, &options.extract);
    let result = reduce::reduce_with(&rows, options.reduce);
    tracing::debug!(
        %kind,
        rows = rows.len(),
        stations = result.station_times.len(),
        total = ?result.total_time,
        "parsed race result"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT_PAGE: &str = "<table><tr><td>Split</td><td>TimeOfDay</td><td>Time</td><td>Diff</td></tr>
<tr><td>SkiErg Out</td><td>10:00:00</td><td>0:04:45</td><td>0:04:45</td></tr>
<tr><td>Sled Push Out</td><td>10:02:30</td><td>0:07:15</td><td>0:02:30</td></tr>
<tr><td>Total Time</td><td>10:45:00</td><td>0:45:00</td><td>0:00:00</td></tr></table>";

    #[test]
    fn test_parses_html_result_page() {
        let result = parse_result(RESULT_PAGE, SourceKind::Html);
        assert_eq!(result.station_time(Station::SkiErg), Some(285));
        assert_eq!(result.station_time(Station::SledPush), Some(150));
        assert_eq!(result.total_time, Some(2700));
        assert_eq!(result.station_times.len(), 2);
    }

    #[test]
    fn test_parses_csv_export() {
        let result = parse_result("Split,Time,Diff\nSkiErg Out,04:45,04:45\n", SourceKind::Csv);
        assert_eq!(result.station_time(Station::SkiErg), Some(285));
    }

    #[test]
    fn test_parses_csv_export_with_byte_order_mark() {
        let result = parse_result(
            "\u{feff}Split,Time,Diff\r\nSkiErg Out,04:45,04:45\r\n",
            SourceKind::Csv,
        );
        assert_eq!(result.station_time(Station::SkiErg), Some(285));
    }

    #[test]
    fn test_unreadable_input_gives_empty_result() {
        assert!(parse_result("", SourceKind::Html).is_empty());
        assert!(parse_result("<p>no splits here</p>", SourceKind::Html).is_empty());
        assert!(parse_result("", SourceKind::Csv).is_empty());
    }

    #[test]
    fn test_repair_can_be_disabled() {
        let page = "| Sled Pull In | 10:05:00 | 0:12:00 | 3:30 |";
        let default = parse_result(page, SourceKind::Html);
        assert_eq!(default.station_time(Station::SledPull), Some(210));

        let options = ParseOptions {
            reduce: ReduceOptions {
                repair: RepairScope::Off,
            },
            ..ParseOptions::default()
        };
        assert!(parse_result_with(page, SourceKind::Html, &options).is_empty());
    }

    #[test]
    fn test_restricted_strategies_skip_markdown() {
        let page = "| SkiErg Out | 10:00:00 | 0:04:45 | 0:04:45 |";
        let options = ParseOptions {
            extract: ExtractOptions {
                strategies: vec![Strategy::HtmlTable],
            },
            ..ParseOptions::default()
        };
        assert!(parse_result_with(page, SourceKind::Html, &options).is_empty());
        assert_eq!(
            parse_result(page, SourceKind::Html).station_time(Station::SkiErg),
            Some(285)
        );
    }
}
