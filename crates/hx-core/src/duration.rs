//! Race-clock durations: `H:MM:SS`, `M:SS` and bare seconds.
//!
//! Two parsing modes live here. [`parse_duration`] is permissive and never
//! fails, it is what the result pipeline uses on scraped text. [`try_parse_duration`]
//! is strict and is used where a human typed the value (intake files).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display sentinel for unknown or zero durations.
pub const NOT_AVAILABLE: &str = "N/A";

/// Parses a duration permissively.
///
/// Components are split on `:` and read like a lenient integer parse: leading
/// digits are used and anything unreadable counts as zero. Three components
/// are hours, minutes and seconds; two are minutes and seconds; one is a bare
/// second count.
pub fn parse_duration(text: &str) -> u32 {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let seconds = match parts.as_slice() {
        [h, m, s] => leading_int(h) * 3600 + leading_int(m) * 60 + leading_int(s),
        [m, s] => leading_int(m) * 60 + leading_int(s),
        [single] => leading_int(single),
        _ => 0,
    };
    u32::try_from(seconds).unwrap_or(u32::MAX)
}

/// Parses an optional duration, treating absence as zero.
pub fn parse_optional_duration(text: Option<&str>) -> u32 {
    text.map_or(0, parse_duration)
}

/// Parses a duration strictly.
///
/// Every component must be all digits, and minute/second components that
/// follow a larger unit must be below 60. Returns `None` otherwise.
pub fn try_parse_duration(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(3);
    for part in trimmed.split(':') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        parts.push(part.parse::<u64>().ok()?);
    }

    let seconds = match parts.as_slice() {
        [h, m, s] if *m < 60 && *s < 60 => h * 3600 + m * 60 + s,
        [m, s] if *s < 60 => m * 60 + s,
        [s] => *s,
        _ => return None,
    };
    u32::try_from(seconds).ok()
}

/// Formats seconds as a race clock, `M:SS` below one hour and `H:MM:SS` above.
pub fn format_clock(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Formats seconds for display, rendering zero as `N/A`.
pub fn format_duration(seconds: u32) -> String {
    if seconds == 0 {
        NOT_AVAILABLE.to_string()
    } else {
        format_clock(seconds)
    }
}

/// Formats an optional duration for display, rendering absence as `N/A`.
pub fn format_optional_duration(seconds: Option<u32>) -> String {
    seconds.map_or_else(|| NOT_AVAILABLE.to_string(), format_duration)
}

fn leading_int(part: &str) -> u64 {
    let digits: &str = {
        let trimmed = part.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    if digits.is_empty() {
        return 0;
    }
    // Saturate absurdly long digit runs instead of wrapping.
    digits.parse().unwrap_or(u64::from(u32::MAX))
}

/// A duration typed by a person, e.g. `"1:25:00"` in an intake file.
///
/// Deserializes from a strict clock string or a bare integer of seconds and
/// serializes back to clock text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    pub const fn seconds(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_clock(self.0))
    }
}

impl std::str::FromStr for ClockTime {
    type Err = InvalidClockTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse_duration(s)
            .map(Self)
            .ok_or_else(|| InvalidClockTime(s.to_string()))
    }
}

/// Error for text that is not a valid race clock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration {0:?}: expected H:MM:SS, M:SS or seconds")]
pub struct InvalidClockTime(String);

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Seconds(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Seconds(seconds) => Ok(Self(seconds)),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
