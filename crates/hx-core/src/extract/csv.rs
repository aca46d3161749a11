//! CSV result exports.

use std::collections::HashMap;
use std::mem::take;

use super::RawRow;

/// Splits one CSV line on commas outside double quotes.
///
/// Quotes toggle an "inside field" flag and are dropped; there is no escape
/// syntax. An unbalanced quote swallows the rest of the line into the current
/// field. Fields are trimmed.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(take(&mut field).trim().to_string()),
            _ => field.push(ch),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

/// Reads rows from a CSV export with a header line.
///
/// The label column is `split` or `station`; the duration column is `diff`,
/// falling back to `time`; `time` also supplies the cumulative time. Headers
/// match case-insensitively. Without a label column there are no rows. A
/// leading byte-order mark is ignored.
pub fn extract_csv_rows(source: &str) -> Vec<RawRow> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };

    let columns: HashMap<String, usize> = split_csv_line(header)
        .into_iter()
        .enumerate()
        .map(|(idx, name)| (name.to_lowercase(), idx))
        .collect();
    let find = |names: &[&str]| names.iter().find_map(|name| columns.get(*name).copied());

    let Some(label_idx) = find(&["split", "station"]) else {
        tracing::warn!(header, "CSV header has no split or station column");
        return Vec::new();
    };
    let diff_idx = find(&["diff", "time"]);
    let time_idx = find(&["time"]);
    let time_of_day_idx = find(&["time of day", "timeofday", "time_of_day"]);

    let cell = |fields: &[String], idx: Option<usize>| {
        idx.and_then(|i| fields.get(i)).cloned().unwrap_or_default()
    };

    lines
        .map(|line| {
            let fields = split_csv_line(line);
            RawRow {
                label: cell(&fields, Some(label_idx)),
                time_of_day: Some(cell(&fields, time_of_day_idx)).filter(|t| !t.is_empty()),
                cumulative_time: cell(&fields, time_idx),
                diff: cell(&fields, diff_idx),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(
            split_csv_line(r#"SkiErg Out, "1,000m" ,04:45"#),
            vec!["SkiErg Out", "1,000m", "04:45"]
        );
    }

    #[test]
    fn test_unbalanced_quote_consumes_rest_of_line() {
        assert_eq!(
            split_csv_line(r#"Wall Balls,"04:00,03:30"#),
            vec!["Wall Balls", "04:00,03:30"]
        );
    }

    #[test]
    fn test_reads_rows_by_header_name() {
        let csv = "Split,Time,Diff\r\nSkiErg Out,04:45,04:45\r\n\r\nSled Push Out,07:15,02:30\r\n";
        let rows = extract_csv_rows(csv);
        assert_eq!(
            rows,
            vec![
                RawRow::new("SkiErg Out", None, "04:45", "04:45"),
                RawRow::new("Sled Push Out", None, "07:15", "02:30"),
            ]
        );
    }

    #[test]
    fn test_header_matching_is_case_insensitive_and_reorderable() {
        let csv = "DIFF,Time of Day,STATION,time\n2:30,10:02:30,Sled Push Out,7:15\n";
        let rows = extract_csv_rows(csv);
        assert_eq!(
            rows,
            vec![RawRow::new("Sled Push Out", Some("10:02:30"), "7:15", "2:30")]
        );
    }

    #[test]
    fn test_time_column_doubles_as_duration_without_diff() {
        let rows = extract_csv_rows("Station,Time\nWall Balls,4:10\n");
        assert_eq!(rows, vec![RawRow::new("Wall Balls", None, "4:10", "4:10")]);
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let rows = extract_csv_rows("\u{feff}Split,Time,Diff\r\nSkiErg Out,04:45,04:45\r\n");
        assert_eq!(rows, vec![RawRow::new("SkiErg Out", None, "04:45", "04:45")]);
    }

    #[test]
    fn test_missing_label_column_yields_nothing() {
        assert!(extract_csv_rows("Name,Diff\nSkiErg Out,04:45\n").is_empty());
    }

    #[test]
    fn test_short_lines_leave_cells_empty() {
        let rows = extract_csv_rows("Split,Time,Diff\nRoxzone\n");
        assert_eq!(rows, vec![RawRow::new("Roxzone", None, "", "")]);
    }
}
