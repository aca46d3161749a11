//! Split rows embedded as page state JSON.

use serde_json::Value;

use super::{RawRow, strip_markup};

const STATE_MARKER: &str = "window.__INITIAL_STATE__";

const LABEL_KEYS: [&str; 4] = ["split", "name", "label", "station"];
const TIME_OF_DAY_KEYS: [&str; 2] = ["timeOfDay", "time_of_day"];
const CUMULATIVE_KEYS: [&str; 4] = ["cumulativeTime", "cumulative_time", "cumulative", "time"];
const DIFF_KEYS: [&str; 2] = ["diff", "duration"];

/// Reads split objects out of a `window.__INITIAL_STATE__ = {...}` script.
///
/// The first array of objects carrying a label field is used, wherever it
/// sits in the state tree. Malformed JSON yields no rows.
pub fn extract_embedded_json_rows(source: &str) -> Vec<RawRow> {
    let Some(state) = parse_state(source) else {
        return Vec::new();
    };
    let Some(splits) = find_split_array(&state) else {
        return Vec::new();
    };

    splits
        .iter()
        .filter_map(|item| {
            let label = first_text(item, &LABEL_KEYS)?;
            Some(RawRow {
                label: strip_markup(&label),
                time_of_day: first_text(item, &TIME_OF_DAY_KEYS),
                cumulative_time: first_text(item, &CUMULATIVE_KEYS).unwrap_or_default(),
                diff: first_text(item, &DIFF_KEYS).unwrap_or_default(),
            })
        })
        .collect()
}

fn parse_state(source: &str) -> Option<Value> {
    let start = source.find(STATE_MARKER)? + STATE_MARKER.len();
    let rest = source[start..].trim_start().strip_prefix('=')?;
    match serde_json::Deserializer::from_str(rest)
        .into_iter::<Value>()
        .next()?
    {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(%err, "embedded state is not valid JSON");
            None
        }
    }
}

fn find_split_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => {
            if items.iter().any(has_label) {
                return Some(items);
            }
            items.iter().find_map(find_split_array)
        }
        Value::Object(map) => map.values().find_map(find_split_array),
        _ => None,
    }
}

fn has_label(item: &Value) -> bool {
    item.as_object()
        .is_some_and(|map| LABEL_KEYS.iter().any(|key| map.get(*key).is_some_and(Value::is_string)))
}

fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match item.get(*key)? {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => number
            .as_u64()
            .map(|n| n.to_string())
            .or_else(|| number.as_f64().map(|f| format!("{:.0}", f.max(0.0)))),
        _ => None,
    })
}
