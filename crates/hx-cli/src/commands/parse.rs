//! Parse command: race-result document to station times.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use hx_core::duration::format_optional_duration;
use hx_core::reduce::{ClassifiedRow, classify_rows};
use hx_core::{Classification, RaceResult, SourceKind, Station, extract};

use super::util::read_input;
use crate::Config;
use crate::fetch::fetch_result_page;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Result file to read, or `-` for stdin.
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    pub input: Option<PathBuf>,

    /// Fetch a hyresult.com result page instead of reading a file.
    #[arg(long)]
    pub url: Option<String>,

    /// Source format (html or csv); guessed from the file extension if omitted.
    #[arg(long)]
    pub format: Option<SourceKind>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Show every extracted row and how it was classified.
    #[arg(long)]
    pub rows: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ParseArgs, config: &Config) -> Result<()> {
    let (source, kind) = load_source(args, config)?;
    let options = config.parse_options();

    if args.rows {
        let rows = extract::extract_with(&source, kind, &options.extract);
        if args.json {
            let classified = classify_rows(&rows);
            writeln!(writer, "{}", serde_json::to_string_pretty(&classified)?)?;
        } else {
            write_rows(writer, &classify_rows(&rows))?;
        }
        return Ok(());
    }

    let result = hx_core::parse_result_with(&source, kind, &options);
    if result.is_empty() {
        tracing::warn!(%kind, "no station times found");
    }
    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        write_result(writer, &result)?;
    }
    Ok(())
}

fn load_source(args: &ParseArgs, config: &Config) -> Result<(String, SourceKind)> {
    if let Some(url) = &args.url {
        let runtime =
            tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
        let html = runtime.block_on(fetch_result_page(url, config.timeout()))?;
        return Ok((html, args.format.unwrap_or(SourceKind::Html)));
    }
    let Some(path) = &args.input else {
        bail!("either an input file or --url is required");
    };
    let kind = args.format.unwrap_or_else(|| SourceKind::from_path(path));
    Ok((read_input(path)?, kind))
}

fn write_result<W: Write>(writer: &mut W, result: &RaceResult) -> Result<()> {
    writeln!(writer, "{:<24} {:>8}", "Station", "Time")?;
    for station in Station::ALL {
        writeln!(
            writer,
            "{:<24} {:>8}",
            station.name(),
            format_optional_duration(result.station_time(station))
        )?;
    }
    writeln!(
        writer,
        "{:<24} {:>8}",
        "Total",
        format_optional_duration(result.total_time)
    )?;
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, rows: &[ClassifiedRow<'_>]) -> Result<()> {
    if rows.is_empty() {
        writeln!(writer, "No rows found.")?;
        return Ok(());
    }
    for entry in rows {
        let class = match entry.classification {
            Classification::Station(station) => station.key(),
            Classification::Total => "total",
            Classification::Unclassified => "-",
        };
        let mark = if entry.counted { " *" } else { "" };
        writeln!(
            writer,
            "{:<28} {:<10} {:>8} {:>8}{mark}",
            entry.row.label,
            class,
            format_optional_duration(Some(entry.station_duration)),
            format_optional_duration(Some(entry.cumulative_seconds))
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use hx_core::RawRow;
    use insta::assert_snapshot;

    #[test]
    fn test_result_table_marks_unknown_stations() {
        let result = RaceResult {
            station_times: BTreeMap::from([(Station::SkiErg, 285), (Station::SledPush, 150)]),
            total_time: Some(2700),
        };
        let mut output = Vec::new();
        write_result(&mut output, &result).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output.trim_end(), @r"
        Station                      Time
        SkiErg                       4:45
        Sled Push                    2:30
        Sled Pull                     N/A
        Burpee Broad Jumps            N/A
        Row                           N/A
        Farmers Carry                 N/A
        Sandbag Lunges                N/A
        Wall Balls                    N/A
        Total                       45:00
        ");
    }

    #[test]
    fn test_row_listing_shows_classification() {
        let rows = vec![
            RawRow::new("SkiErg In", None, "0:00:10", "0:00:10"),
            RawRow::new("SkiErg Out", None, "0:04:55", "0:04:45"),
            RawRow::new("Roxzone", None, "0:05:30", ""),
            RawRow::new("Total Time", None, "0:45:00", "0:00:00"),
        ];
        let mut output = Vec::new();
        write_rows(&mut output, &classify_rows(&rows)).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output.trim_end(), @r"
        SkiErg In                    skiErg         0:10     0:10
        SkiErg Out                   skiErg         4:45     4:55 *
        Roxzone                      -              0:35     5:30
        Total Time                   total         39:30    45:00
        ");
    }

    #[test]
    fn test_parses_csv_file_by_extension() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("splits.csv");
        std::fs::write(&path, "Split,Time,Diff\nSkiErg Out,04:45,04:45\n").unwrap();

        let args = ParseArgs {
            input: Some(path),
            url: None,
            format: None,
            json: true,
            rows: false,
        };
        let mut output = Vec::new();
        run(&mut output, &args, &Config::default()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["stationTimes"]["skiErg"], 285);
        assert!(value["totalTime"].is_null());
    }

    #[test]
    fn test_rejects_foreign_url() {
        let args = ParseArgs {
            input: None,
            url: Some("https://example.com/result/1".to_string()),
            format: None,
            json: false,
            rows: false,
        };
        let err = run(&mut Vec::new(), &args, &Config::default()).unwrap_err();
        assert!(err.to_string().starts_with("invalid result URL"));
    }
}
