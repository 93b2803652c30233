//! Wire types for the temperature profile contract
//!
//! These types are shared by the profile service and the form client so that
//! both sides agree on the JSON shape and on the validation rules applied to
//! it. Times travel as 24-hour `HH:MM` strings; sleep levels are the integer
//! temperature offsets the underlying device understands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One intermediate setpoint between the initial and final sleep levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidStagePoint {
    /// Time of day in 24-hour `HH:MM`
    pub time: String,
    /// Temperature offset in [-10, 10]
    pub temperature: i32,
}

impl MidStagePoint {
    /// The entry appended by the form's "add" action
    pub fn default_entry() -> Self {
        Self {
            time: "00:00".to_string(),
            temperature: 0,
        }
    }
}

/// Timezone selection as submitted by the client
///
/// Only `value` is required; the display name and abbreviation are optional
/// presentation details and are not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneSelection {
    /// Canonical IANA zone identifier, e.g. "America/New_York"
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbrev: Option<String>,
}

impl TimezoneSelection {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            alt_name: None,
            abbrev: None,
        }
    }
}

/// Payload submitted by the form to create or replace a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub bed_time: String,
    pub wakeup_time: String,
    pub initial_sleep_level: i32,
    pub mid_stage_temperatures: Vec<MidStagePoint>,
    pub final_sleep_level: i32,
    pub timezone: TimezoneSelection,
}

impl Default for ProfileInput {
    fn default() -> Self {
        Self {
            bed_time: "22:00".to_string(),
            wakeup_time: "06:00".to_string(),
            initial_sleep_level: 0,
            mid_stage_temperatures: Vec::new(),
            final_sleep_level: 0,
            timezone: TimezoneSelection::new("America/New_York"),
        }
    }
}

/// A stored profile as returned by the profile service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureProfile {
    pub email: String,
    pub bed_time: String,
    pub wakeup_time: String,
    pub initial_sleep_level: i32,
    pub mid_stage_temperatures: Vec<MidStagePoint>,
    pub final_sleep_level: i32,
    pub timezone: TimezoneSelection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TemperatureProfile {
    /// The editable subset of a stored profile, used to seed the form
    pub fn to_input(&self) -> ProfileInput {
        ProfileInput {
            bed_time: self.bed_time.clone(),
            wakeup_time: self.wakeup_time.clone(),
            initial_sleep_level: self.initial_sleep_level,
            mid_stage_temperatures: self.mid_stage_temperatures.clone(),
            final_sleep_level: self.final_sleep_level,
            timezone: self.timezone.clone(),
        }
    }
}
