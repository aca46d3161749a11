//! Folds classified split rows into per-station times.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{Classification, classify_label, counts_toward_station, match_station};
use crate::duration::parse_duration;
use crate::extract::RawRow;
use crate::station::Station;

/// Stations the relaxed repair pass fills by default.
///
/// These are the stations some exports never mark with an "Out" row.
pub const LEGACY_REPAIR_STATIONS: [Station; 3] =
    [Station::SkiErg, Station::SledPush, Station::SledPull];

/// Canonical result of parsing one race-result document.
///
/// A station missing from `station_times` is unknown, not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub station_times: BTreeMap<Station, u32>,
    pub total_time: Option<u32>,
}

impl RaceResult {
    pub fn station_time(&self, station: Station) -> Option<u32> {
        self.station_times.get(&station).copied()
    }

    /// True when nothing at all was detected.
    pub fn is_empty(&self) -> bool {
        self.station_times.is_empty() && self.total_time.is_none()
    }

    /// Stations with no detected time, in race order.
    pub fn missing_stations(&self) -> Vec<Station> {
        Station::ALL
            .into_iter()
            .filter(|station| !self.station_times.contains_key(station))
            .collect()
    }
}

/// Which stations the relaxed repair pass may fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairScope {
    /// Ski erg and both sleds only.
    #[default]
    Legacy,
    /// Every station.
    AllStations,
    /// No repair pass.
    Off,
}

impl RepairScope {
    fn stations(self) -> &'static [Station] {
        match self {
            Self::Legacy => &LEGACY_REPAIR_STATIONS,
            Self::AllStations => &Station::ALL,
            Self::Off => &[],
        }
    }
}

/// Reduction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceOptions {
    pub repair: RepairScope,
}

/// A row after classification, with its decoded times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRow<'a> {
    pub row: &'a RawRow,
    pub classification: Classification,
    pub diff_seconds: u32,
    pub cumulative_seconds: u32,
    /// The diff, or the cumulative delta when the diff is missing.
    pub station_duration: u32,
    /// Whether this row set a station time in the primary pass.
    pub counted: bool,
}

/// Reduces rows with default options.
pub fn reduce_to_result(rows: &[RawRow]) -> RaceResult {
    reduce_with(rows, ReduceOptions::default())
}

/// Reduces rows using explicit options.
pub fn reduce_with(rows: &[RawRow], options: ReduceOptions) -> RaceResult {
    let classified = classify_rows(rows);
    let mut result = RaceResult::default();

    for entry in &classified {
        match entry.classification {
            Classification::Station(station) if entry.counted => {
                result.station_times.insert(station, entry.station_duration);
            }
            Classification::Total if entry.cumulative_seconds > 0 => {
                result.total_time = Some(entry.cumulative_seconds);
            }
            _ => {}
        }
    }

    repair(&mut result, &classified, options.repair);
    result
}

/// Classifies every row and computes its station duration.
///
/// A row with no diff falls back to the gap since the previous row's
/// cumulative time. The previous checkpoint advances on every row, including
/// rows that match nothing.
pub fn classify_rows(rows: &[RawRow]) -> Vec<ClassifiedRow<'_>> {
    let mut previous_cumulative = 0;
    let last = rows.len().saturating_sub(1);

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let label = row.label.trim().to_lowercase();
            let diff_seconds = parse_duration(&row.diff);
            let cumulative_seconds = parse_duration(&row.cumulative_time);

            let station_duration = if diff_seconds == 0 && cumulative_seconds > previous_cumulative
            {
                cumulative_seconds - previous_cumulative
            } else {
                diff_seconds
            };
            previous_cumulative = cumulative_seconds;

            let classification = classify_label(&label, idx == last);
            let counted = match classification {
                Classification::Station(station) => {
                    station_duration > 0
                        && counts_toward_station(station, &label, station_duration)
                }
                _ => false,
            };

            ClassifiedRow {
                row,
                classification,
                diff_seconds,
                cumulative_seconds,
                station_duration,
                counted,
            }
        })
        .collect()
}

/// Fills stations that never got an "Out" row from any matching row with a
/// stated diff. The first such row wins.
fn repair(result: &mut RaceResult, classified: &[ClassifiedRow<'_>], scope: RepairScope) {
    let missing: Vec<Station> = scope
        .stations()
        .iter()
        .copied()
        .filter(|station| !result.station_times.contains_key(station))
        .collect();
    if missing.is_empty() {
        return;
    }

    for entry in classified {
        if entry.diff_seconds == 0 {
            continue;
        }
        let Some(station) = match_station(&entry.row.label.trim().to_lowercase()) else {
            continue;
        };
        if missing.contains(&station) && !result.station_times.contains_key(&station) {
            tracing::debug!(%station, label = %entry.row.label, "repaired station time");
            result.station_times.insert(station, entry.diff_seconds);
        }
    }
}
