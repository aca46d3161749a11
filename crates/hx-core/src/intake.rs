//! Athlete intake: race details, current fitness, goals and schedule.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::division::Division;
use crate::duration::ClockTime;
use crate::reduce::RaceResult;
use crate::station::Station;

/// Validation errors for intake data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// Run, strength and gym days add up to more than a week.
    #[error("training days add up to {total}, more than the 7 days in a week")]
    TooManyTrainingDays { total: u32 },

    /// The race is today or already over.
    #[error("race date {race_date} is not after {today}")]
    RaceDatePassed { race_date: NaiveDate, today: NaiveDate },

    /// A required field was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Everything the athlete tells us before a plan is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intake {
    pub race_location: String,
    pub race_date: NaiveDate,
    pub division: Division,
    #[serde(default)]
    pub age_group: Option<String>,

    pub current_time: ClockTime,
    pub target_time: ClockTime,
    pub current_5k: ClockTime,
    #[serde(default)]
    pub target_5k: Option<ClockTime>,

    #[serde(default)]
    pub current_weight: Option<f64>,
    #[serde(default)]
    pub current_body_fat: Option<f64>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub target_body_fat: Option<f64>,

    /// Station times from a previous race, keyed by station.
    #[serde(default)]
    pub station_times: BTreeMap<Station, ClockTime>,

    pub run_days: u8,
    pub strength_days: u8,
    pub gym_days: u8,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl Intake {
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.race_location.trim().is_empty() {
            return Err(IntakeError::Empty {
                field: "race_location",
            });
        }
        let total = self.training_days();
        if total > 7 {
            return Err(IntakeError::TooManyTrainingDays { total });
        }
        Ok(())
    }

    pub fn training_days(&self) -> u32 {
        u32::from(self.run_days) + u32::from(self.strength_days) + u32::from(self.gym_days)
    }

    pub fn rest_days(&self) -> u32 {
        7u32.saturating_sub(self.training_days())
    }

    /// Seconds between current and target race time; zero if already faster.
    pub fn time_to_find(&self) -> u32 {
        self.current_time
            .seconds()
            .saturating_sub(self.target_time.seconds())
    }

    /// The target 5K, derived from the race-time improvement when not given.
    ///
    /// Running is assumed to carry 30% of the relative race improvement.
    pub fn effective_target_5k(&self) -> Option<u32> {
        if let Some(target) = self.target_5k.filter(|t| t.seconds() > 0) {
            return Some(target.seconds());
        }
        let current_5k = f64::from(self.current_5k.seconds());
        let current = f64::from(self.current_time.seconds());
        let target = f64::from(self.target_time.seconds());
        if current_5k <= 0.0 || current <= 0.0 || target <= 0.0 {
            return None;
        }
        let improvement = (current - target) / current;
        let derived = (current_5k * (1.0 - improvement * 0.3)).round();
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "derived 5K is clamped to the u32 range"
        )]
        let seconds = derived.clamp(0.0, f64::from(u32::MAX)) as u32;
        Some(seconds)
    }

    /// Overlays a parsed race result. Detected values replace typed ones;
    /// unknown stations keep whatever the athlete entered.
    pub fn apply_result(&mut self, result: &RaceResult) {
        for (&station, &seconds) in &result.station_times {
            self.station_times
                .insert(station, ClockTime::from_seconds(seconds));
        }
        if let Some(total) = result.total_time {
            self.current_time = ClockTime::from_seconds(total);
        }
    }

    /// Station times as plain seconds, dropping zero entries.
    pub fn station_seconds(&self) -> BTreeMap<Station, u32> {
        self.station_times
            .iter()
            .filter(|(_, time)| time.seconds() > 0)
            .map(|(&station, time)| (station, time.seconds()))
            .collect()
    }
}

/// Whole weeks from `today` until the race, rounded up.
pub fn weeks_until(race_date: NaiveDate, today: NaiveDate) -> Result<u32, IntakeError> {
    let days = (race_date - today).num_days();
    if days <= 0 {
        return Err(IntakeError::RaceDatePassed { race_date, today });
    }
    Ok(u32::try_from(days.unsigned_abs().div_ceil(7)).unwrap_or(u32::MAX))
}
