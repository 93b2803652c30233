//! Input validation utilities
//!
//! The same rules run on both sides of the wire: the form applies them before
//! submitting and the profile service applies them again before writing.

use crate::profile::{ProfileInput, TimezoneSelection};
use regex::Regex;
use serde::Serialize;
use std::str::FromStr;
use std::sync::OnceLock;

/// A validation failure attached to a single payload field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a 24-hour `HH:MM` time-of-day string
pub fn validate_time_of_day(time: &str) -> Result<(), String> {
    if time.is_empty() {
        return Err("Time is required".to_string());
    }

    static TIME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TIME_REGEX.get_or_init(|| {
        Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Failed to compile time regex")
    });

    if !regex.is_match(time) {
        return Err("Must be in HH:MM format".to_string());
    }

    Ok(())
}

/// Validate a sleep level (temperature offset), inclusive range [-10, 10]
pub fn validate_sleep_level(level: i32) -> Result<(), String> {
    if !(-10..=10).contains(&level) {
        return Err("Must be between -10 and 10".to_string());
    }

    Ok(())
}

/// Validate a timezone selection against the IANA database
pub fn validate_timezone(timezone: &TimezoneSelection) -> Result<(), String> {
    if timezone.value.is_empty() {
        return Err("Timezone is required".to_string());
    }

    if chrono_tz::Tz::from_str(&timezone.value).is_err() {
        return Err("Unknown timezone identifier".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a full profile payload, collecting one error per failing field
///
/// Mid-stage entries report their position in the field name, e.g.
/// `midStageTemperatures[2].time`. An empty mid-stage sequence is valid.
pub fn validate_profile(input: &ProfileInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(message) = validate_time_of_day(&input.bed_time) {
        errors.push(FieldError::new("bedTime", message));
    }

    if let Err(message) = validate_time_of_day(&input.wakeup_time) {
        errors.push(FieldError::new("wakeupTime", message));
    }

    if let Err(message) = validate_sleep_level(input.initial_sleep_level) {
        errors.push(FieldError::new("initialSleepLevel", message));
    }

    for (index, point) in input.mid_stage_temperatures.iter().enumerate() {
        if let Err(message) = validate_time_of_day(&point.time) {
            errors.push(FieldError::new(
                format!("midStageTemperatures[{}].time", index),
                message,
            ));
        }

        if let Err(message) = validate_sleep_level(point.temperature) {
            errors.push(FieldError::new(
                format!("midStageTemperatures[{}].temperature", index),
                message,
            ));
        }
    }

    if let Err(message) = validate_sleep_level(input.final_sleep_level) {
        errors.push(FieldError::new("finalSleepLevel", message));
    }

    if let Err(message) = validate_timezone(&input.timezone) {
        errors.push(FieldError::new("timezone", message));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MidStagePoint;

    #[test]
    fn accepts_valid_times() {
        for time in ["00:00", "06:30", "19:05", "23:59"] {
            assert!(validate_time_of_day(time).is_ok(), "rejected {}", time);
        }
    }

    #[test]
    fn rejects_malformed_times() {
        for time in ["24:00", "7:00", "12:60", "12-30", "noon", ""] {
            assert!(validate_time_of_day(time).is_err(), "accepted {}", time);
        }
    }

    #[test]
    fn sleep_level_bounds_are_inclusive() {
        assert!(validate_sleep_level(-10).is_ok());
        assert!(validate_sleep_level(0).is_ok());
        assert!(validate_sleep_level(10).is_ok());
        assert!(validate_sleep_level(-11).is_err());
        assert!(validate_sleep_level(11).is_err());
    }

    #[test]
    fn timezone_must_be_a_known_zone() {
        assert!(validate_timezone(&TimezoneSelection::new("America/New_York")).is_ok());
        assert!(validate_timezone(&TimezoneSelection::new("Europe/Berlin")).is_ok());
        assert!(validate_timezone(&TimezoneSelection::new("Mars/Olympus_Mons")).is_err());
        assert!(validate_timezone(&TimezoneSelection::new("")).is_err());
    }

    #[test]
    fn default_payload_is_valid() {
        assert!(validate_profile(&ProfileInput::default()).is_ok());
    }

    #[test]
    fn empty_mid_stage_sequence_is_valid() {
        let input = ProfileInput {
            mid_stage_temperatures: Vec::new(),
            ..ProfileInput::default()
        };
        assert!(validate_profile(&input).is_ok());
    }

    #[test]
    fn mid_stage_errors_carry_entry_index() {
        let input = ProfileInput {
            mid_stage_temperatures: vec![
                MidStagePoint {
                    time: "02:00".to_string(),
                    temperature: 3,
                },
                MidStagePoint {
                    time: "26:00".to_string(),
                    temperature: 12,
                },
            ],
            ..ProfileInput::default()
        };

        let errors = validate_profile(&input).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "midStageTemperatures[1].time",
                "midStageTemperatures[1].temperature"
            ]
        );
    }

    #[test]
    fn out_of_range_initial_level_is_rejected() {
        let input = ProfileInput {
            initial_sleep_level: 11,
            ..ProfileInput::default()
        };

        let errors = validate_profile(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "initialSleepLevel");
        assert_eq!(errors[0].message, "Must be between -10 and 10");
    }
}
