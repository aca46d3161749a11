//! Ranks stations by how much time they cost against benchmark targets.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::station::Station;

/// A station slower than its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Priority {
    pub station: Station,
    pub current: u32,
    pub target: u32,
    /// Seconds to gain by hitting the target.
    pub savings: u32,
}

/// Returns stations slower than target, biggest savings first.
///
/// Ties keep race order. Zero times are treated as unknown and skipped.
pub fn rank_priorities(station_times: &BTreeMap<Station, u32>) -> Vec<Priority> {
    let mut priorities: Vec<Priority> = station_times
        .iter()
        .filter_map(|(&station, &current)| {
            let target = station.target_seconds();
            (current > target).then(|| Priority {
                station,
                current,
                target,
                savings: current - target,
            })
        })
        .collect();
    priorities.sort_by(|a, b| b.savings.cmp(&a.savings));
    priorities
}
