//! The eight Hyrox workout stations, in race order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A scored workout station.
///
/// Ordering follows race order, so a `BTreeMap<Station, _>` iterates the way
/// the race is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Station {
    SkiErg,
    SledPush,
    SledPull,
    Burpee,
    Row,
    Farmers,
    Lunges,
    WallBalls,
}

impl Station {
    /// All stations in race order.
    pub const ALL: [Self; 8] = [
        Self::SkiErg,
        Self::SledPush,
        Self::SledPull,
        Self::Burpee,
        Self::Row,
        Self::Farmers,
        Self::Lunges,
        Self::WallBalls,
    ];

    /// Stable camelCase key used in JSON output and intake files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::SkiErg => "skiErg",
            Self::SledPush => "sledPush",
            Self::SledPull => "sledPull",
            Self::Burpee => "burpee",
            Self::Row => "row",
            Self::Farmers => "farmers",
            Self::Lunges => "lunges",
            Self::WallBalls => "wallBalls",
        }
    }

    /// Short human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SkiErg => "SkiErg",
            Self::SledPush => "Sled Push",
            Self::SledPull => "Sled Pull",
            Self::Burpee => "Burpee Broad Jumps",
            Self::Row => "Row",
            Self::Farmers => "Farmers Carry",
            Self::Lunges => "Sandbag Lunges",
            Self::WallBalls => "Wall Balls",
        }
    }

    /// Name including the race distance or rep count.
    pub const fn race_name(self) -> &'static str {
        match self {
            Self::SkiErg => "1000m SkiErg",
            Self::SledPush => "50m Sled Push",
            Self::SledPull => "50m Sled Pull",
            Self::Burpee => "80m Burpee Broad Jumps",
            Self::Row => "1000m Row",
            Self::Farmers => "200m Farmers Carry",
            Self::Lunges => "100m Sandbag Lunges",
            Self::WallBalls => "100 Wall Balls",
        }
    }

    /// Benchmark time in seconds used to rank training priorities.
    pub const fn target_seconds(self) -> u32 {
        match self {
            Self::SkiErg | Self::Row => 285,
            Self::SledPush | Self::Farmers => 150,
            Self::SledPull | Self::WallBalls => 210,
            Self::Burpee => 300,
            Self::Lunges => 270,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Station {
    type Err = UnknownStation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|station| station.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStation(s.to_string()))
    }
}

impl Serialize for Station {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Station {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown station keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station: {0}")]
pub struct UnknownStation(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_keys() {
        for station in Station::ALL {
            let parsed: Station = station.to_string().parse().expect("should parse");
            assert_eq!(parsed, station);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("WALLBALLS".parse::<Station>().unwrap(), Station::WallBalls);
    }

    #[test]
    fn test_unknown_key_errors() {
        let err = "running".parse::<Station>().unwrap_err();
        assert_eq!(err.to_string(), "unknown station: running");
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let json = serde_json::to_string(&Station::SledPush).unwrap();
        assert_eq!(json, "\"sledPush\"");
    }

    #[test]
    fn test_ordering_is_race_order() {
        let mut shuffled = vec![Station::WallBalls, Station::SkiErg, Station::Row];
        shuffled.sort();
        assert_eq!(shuffled, vec![Station::SkiErg, Station::Row, Station::WallBalls]);
    }
}
