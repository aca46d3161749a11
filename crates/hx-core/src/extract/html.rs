//! Table and markdown row extraction from result pages.

use std::sync::LazyLock;

use regex::Regex;

use super::RawRow;

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b[^>]*>(.*?)</table>").unwrap());
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Pipe-delimited row: label | HH:MM:SS | cumulative | diff |
static MARKDOWN_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|\s*([^|]+?)\s*\|\s*(\d{2}:\d{2}:\d{2})\s*\|\s*([\d:]+)\s*\|\s*([\d:]+)\s*\|")
        .unwrap()
});

const HEADER_LABEL: &str = "Split";

/// Removes tags, decodes the common entities and collapses whitespace.
pub fn strip_markup(fragment: &str) -> String {
    let text = TAG_RE.replace_all(fragment, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

/// Reads rows from the first `<table>` in the document.
///
/// Cells are positional: label, time of day, cumulative time, diff. Rows with
/// fewer than four cells and the header row are skipped.
pub fn extract_html_table_rows(source: &str) -> Vec<RawRow> {
    let Some(table) = TABLE_RE.captures(source).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for row in ROW_RE.captures_iter(table.as_str()) {
        let cells: Vec<String> = CELL_RE
            .captures_iter(&row[1])
            .map(|cell| strip_markup(&cell[1]))
            .collect();

        let [label, time_of_day, cumulative, diff, ..] = cells.as_slice() else {
            continue;
        };
        if label == HEADER_LABEL {
            continue;
        }
        rows.push(RawRow::new(
            label.as_str(),
            Some(time_of_day.as_str()).filter(|t| !t.is_empty()),
            cumulative.as_str(),
            diff.as_str(),
        ));
    }
    rows
}

/// Reads pipe-delimited rows anywhere in the document.
pub fn extract_markdown_rows(source: &str) -> Vec<RawRow> {
    MARKDOWN_ROW_RE
        .captures_iter(source)
        .filter_map(|caps| {
            let label = strip_markup(&caps[1]);
            let lowered = label.to_lowercase();
            if lowered.contains("split") || lowered.contains("time of day") {
                return None;
            }
            Some(RawRow::new(label, Some(&caps[2]), &caps[3], &caps[4]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TABLE: &str = r#"
<html><body>
<table class="splits">
  <thead><tr><th>Split</th><th>Time of Day</th><th>Time</th><th>Diff</th></tr></thead>
  <tr><td>Split</td><td>TimeOfDay</td><td>Time</td><td>Diff</td></tr>
  <tr><td><a href="/s/1">SkiErg&nbsp;Out</a></td><td>10:00:00</td><td>0:04:45</td><td>0:04:45</td></tr>
  <tr class="odd"><td>Roxzone</td><td>10:00:40</td><td>0:05:25</td></tr>
  <TR><TD>Sled Push Out</TD><TD>10:02:30</TD><TD>0:07:15</TD><TD>0:02:30</TD></TR>
</table>
<table><tr><td>Other</td><td>1</td><td>2</td><td>3</td></tr></table>
</body></html>"#;

    #[test]
    fn test_reads_first_table_only() {
        let rows = extract_html_table_rows(SAMPLE_TABLE);
        assert_eq!(
            rows,
            vec![
                RawRow::new("SkiErg Out", Some("10:00:00"), "0:04:45", "0:04:45"),
                RawRow::new("Sled Push Out", Some("10:02:30"), "0:07:15", "0:02:30"),
            ]
        );
    }

    #[test]
    fn test_no_table_means_no_rows() {
        assert!(extract_html_table_rows("<div>SkiErg Out 4:45</div>").is_empty());
    }

    #[test]
    fn test_strip_markup_cleans_cell_text() {
        assert_eq!(
            strip_markup("  <b>Wall</b>\n  Balls &amp; <i>Finish</i> "),
            "Wall Balls & Finish"
        );
    }

    #[test]
    fn test_markdown_rows_skip_headers() {
        let source = "\
| Split | Time of Day | Time | Diff |
|-------|-------------|------|------|
| Split 1 | 10:00:00 | 0:00 | 0:00 |
| SkiErg Out | 10:04:45 | 0:04:45 | 0:04:45 |
| <b>Total Time</b> | 10:45:00 | 0:45:00 | 0:00 |
";
        let rows = extract_markdown_rows(source);
        assert_eq!(
            rows,
            vec![
                RawRow::new("SkiErg Out", Some("10:04:45"), "0:04:45", "0:04:45"),
                RawRow::new("Total Time", Some("10:45:00"), "0:45:00", "0:00"),
            ]
        );
    }

    #[test]
    fn test_markdown_skips_time_of_day_rows() {
        let source = "\
| Time of Day (start) | 09:00:00 | 0:00:00 | 0:00:00 |
| SkiErg Out | 09:04:45 | 0:04:45 | 0:04:45 |
";
        assert_eq!(
            extract_markdown_rows(source),
            vec![RawRow::new("SkiErg Out", Some("09:04:45"), "0:04:45", "0:04:45")]
        );
    }

    #[test]
    fn test_markdown_requires_strict_time_of_day() {
        assert!(extract_markdown_rows("| SkiErg Out | 10:04 | 0:04:45 | 0:04:45 |").is_empty());
    }
}
