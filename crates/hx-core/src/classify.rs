//! Maps split labels to stations.
//!
//! Labels in result exports are free text ("SkiErg Out", "Burpee Broad Jump
//! In", "Roxzone 3"). A label can satisfy more than one keyword test, so the
//! rules are an ordered table and the first match wins.

use serde::Serialize;

use crate::extract::RawRow;
use crate::station::Station;

/// Outcome of classifying a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "station")]
pub enum Classification {
    Station(Station),
    Total,
    Unclassified,
}

type KeywordTest = fn(&str) -> bool;

/// Station keyword rules in priority order.
const STATION_RULES: [(Station, KeywordTest); 8] = [
    (Station::SkiErg, |l: &str| l.contains("ski") && l.contains("erg")),
    (Station::SledPush, |l: &str| l.contains("sled") && l.contains("push")),
    (Station::SledPull, |l: &str| l.contains("sled") && l.contains("pull")),
    (Station::Burpee, |l: &str| {
        l.contains("burpee") || (l.contains("broad") && l.contains("jump"))
    }),
    (Station::Row, |l: &str| {
        l.contains("row") && !l.contains("rox") && !l.contains("zone")
    }),
    (Station::Farmers, |l: &str| {
        l.contains("farmers") || (l.contains("carry") && !l.contains("sandbag"))
    }),
    (Station::Lunges, |l: &str| l.contains("lunge") || l.contains("sandbag")),
    (Station::WallBalls, |l: &str| l.contains("wall") && l.contains("ball")),
];

/// Returns the highest-priority station whose keywords appear in a
/// lower-cased label.
pub fn match_station(label: &str) -> Option<Station> {
    STATION_RULES
        .iter()
        .find(|(_, test)| test(label))
        .map(|(station, _)| *station)
}

/// Classifies a lower-cased label.
///
/// `is_last` marks the final row of the table, where a bare "time" label is
/// read as the finish time.
pub fn classify_label(label: &str, is_last: bool) -> Classification {
    if let Some(station) = match_station(label) {
        return Classification::Station(station);
    }
    if label.contains("total") || label.contains("finish") || (label.contains("time") && is_last)
    {
        return Classification::Total;
    }
    Classification::Unclassified
}

/// Classifies a raw row.
pub fn classify(row: &RawRow, is_last: bool) -> Classification {
    classify_label(&row.label.trim().to_lowercase(), is_last)
}

/// Whether a station row carries the station's own work time.
///
/// Exports pair "In"/"Out" rows and only the "Out" row's diff is the station
/// time. Wall balls naming is inconsistent, so an unmarked wall-ball row with
/// a nonzero duration also counts.
pub fn counts_toward_station(station: Station, label: &str, duration: u32) -> bool {
    if label.contains("out") {
        return true;
    }
    station == Station::WallBalls && !label.contains("in") && duration > 0
}
