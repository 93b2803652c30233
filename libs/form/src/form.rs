//! Editable form state for the temperature profile
//!
//! The controller tracks three phases: loading (until the initial fetch
//! resolves), editing, and submitting (while the update call is in flight).
//! Mid-stage entries live in an owned contiguous sequence mutated only by
//! replace-at-index, append, and filtered removal.

use common::profile::{MidStagePoint, ProfileInput};
use common::validation::{FieldError, validate_profile};
use thiserror::Error;
use tracing::info;

use crate::client::{ClientError, ProfileApi};

/// Errors surfaced by form operations
#[derive(Error, Debug)]
pub enum FormError {
    /// The payload failed validation; nothing was sent
    #[error("Profile payload failed validation ({} field(s))", .0.len())]
    Invalid(Vec<FieldError>),

    /// The remote call failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Client-side editable state for one user's temperature profile
pub struct ProfileForm<C: ProfileApi> {
    api: C,
    /// Editable payload fields, seeded with defaults until `load` resolves
    pub input: ProfileInput,
    /// True until the initial load has resolved successfully
    pub is_loading: bool,
    /// Set on the load path when a stored profile exists; never set at submit
    pub is_existing_profile: bool,
    /// True only while an update call is in flight
    pub is_submitting: bool,
}

impl<C: ProfileApi> ProfileForm<C> {
    /// Create a form in the loading state with default field values
    pub fn new(api: C) -> Self {
        Self {
            api,
            input: ProfileInput::default(),
            is_loading: true,
            is_existing_profile: false,
            is_submitting: false,
        }
    }

    /// Fetch the stored profile and populate the editable state
    ///
    /// First-time setup (no stored profile) keeps the defaults. A transport
    /// error propagates and leaves the form in the loading state.
    pub async fn load(&mut self) -> Result<(), FormError> {
        let profile = self.api.get_user_temperature_profile().await?;

        if let Some(profile) = profile {
            info!("Loaded existing temperature profile for {}", profile.email);
            self.input = profile.to_input();
            self.is_existing_profile = true;
        }

        self.is_loading = false;
        Ok(())
    }

    /// Append a defaulted mid-stage entry at the tail of the list
    pub fn add_mid_stage(&mut self) {
        self.input
            .mid_stage_temperatures
            .push(MidStagePoint::default_entry());
    }

    /// Remove the mid-stage entry at `index`, keeping the rest in order
    ///
    /// An out-of-bounds index is a silent no-op.
    pub fn remove_mid_stage(&mut self, index: usize) {
        let mut position = 0;
        self.input.mid_stage_temperatures.retain(|_| {
            let keep = position != index;
            position += 1;
            keep
        });
    }

    /// Replace the time of the entry at `index`; out of bounds is a no-op
    pub fn set_mid_stage_time(&mut self, index: usize, time: impl Into<String>) {
        if let Some(entry) = self.input.mid_stage_temperatures.get_mut(index) {
            entry.time = time.into();
        }
    }

    /// Replace the temperature of the entry at `index`; out of bounds is a no-op
    pub fn set_mid_stage_temperature(&mut self, index: usize, temperature: i32) {
        if let Some(entry) = self.input.mid_stage_temperatures.get_mut(index) {
            entry.temperature = temperature;
        }
    }

    /// Validate the composed payload and send it as one update call
    ///
    /// Validation failures return the per-field errors without touching the
    /// remote. The submitting flag covers exactly the in-flight window; a
    /// failed call leaves the edited state as-is.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        validate_profile(&self.input).map_err(FormError::Invalid)?;

        self.is_submitting = true;
        let result = self.api.update_user_temperature_profile(&self.input).await;
        self.is_submitting = false;

        result?;
        info!("Temperature profile saved");
        Ok(())
    }

    /// Label for the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting {
            "Saving..."
        } else {
            "Save Profile"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use common::profile::{TemperatureProfile, TimezoneSelection};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory stand-in for the profile service
    #[derive(Default)]
    struct MemoryApi {
        stored: Mutex<Option<TemperatureProfile>>,
        update_calls: AtomicUsize,
    }

    impl MemoryApi {
        fn with_profile(input: &ProfileInput) -> Self {
            let api = Self::default();
            *api.stored.lock().unwrap() = Some(materialize(input));
            api
        }
    }

    fn materialize(input: &ProfileInput) -> TemperatureProfile {
        let now = Utc::now();
        TemperatureProfile {
            email: "sleeper@example.com".to_string(),
            bed_time: input.bed_time.clone(),
            wakeup_time: input.wakeup_time.clone(),
            initial_sleep_level: input.initial_sleep_level,
            mid_stage_temperatures: input.mid_stage_temperatures.clone(),
            final_sleep_level: input.final_sleep_level,
            timezone: TimezoneSelection::new(input.timezone.value.clone()),
            created_at: now,
            updated_at: now,
        }
    }

    #[async_trait]
    impl ProfileApi for MemoryApi {
        async fn get_user_temperature_profile(
            &self,
        ) -> Result<Option<TemperatureProfile>, ClientError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn update_user_temperature_profile(
            &self,
            input: &ProfileInput,
        ) -> Result<(), ClientError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = Some(materialize(input));
            Ok(())
        }
    }

    fn point(time: &str, temperature: i32) -> MidStagePoint {
        MidStagePoint {
            time: time.to_string(),
            temperature,
        }
    }

    #[tokio::test]
    async fn new_form_starts_loading_with_defaults() {
        let form = ProfileForm::new(MemoryApi::default());

        assert!(form.is_loading);
        assert!(!form.is_existing_profile);
        assert!(!form.is_submitting);
        assert_eq!(form.input.bed_time, "22:00");
        assert_eq!(form.input.wakeup_time, "06:00");
        assert!(form.input.mid_stage_temperatures.is_empty());
        assert_eq!(form.input.timezone.value, "America/New_York");
    }

    #[tokio::test]
    async fn load_without_profile_keeps_defaults() {
        let mut form = ProfileForm::new(MemoryApi::default());
        form.load().await.expect("load");

        assert!(!form.is_loading);
        assert!(!form.is_existing_profile);
        assert_eq!(form.input, ProfileInput::default());
    }

    #[tokio::test]
    async fn load_populates_existing_profile() {
        let existing = ProfileInput {
            bed_time: "23:15".to_string(),
            initial_sleep_level: -3,
            mid_stage_temperatures: vec![point("01:30", 2), point("04:00", -1)],
            ..ProfileInput::default()
        };
        let mut form = ProfileForm::new(MemoryApi::with_profile(&existing));

        form.load().await.expect("load");

        assert!(!form.is_loading);
        assert!(form.is_existing_profile);
        assert_eq!(form.input, existing);
    }

    #[tokio::test]
    async fn add_appends_defaulted_entry_at_tail() {
        let mut form = ProfileForm::new(MemoryApi::default());
        form.add_mid_stage();
        form.set_mid_stage_time(0, "03:00");
        form.add_mid_stage();

        let points = &form.input.mid_stage_temperatures;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], point("03:00", 0));
        assert_eq!(points[1], point("00:00", 0));
    }

    #[tokio::test]
    async fn remove_preserves_relative_order() {
        let mut form = ProfileForm::new(MemoryApi::default());
        form.input.mid_stage_temperatures =
            vec![point("01:00", 1), point("02:00", 2), point("03:00", 3)];

        form.remove_mid_stage(1);

        assert_eq!(
            form.input.mid_stage_temperatures,
            vec![point("01:00", 1), point("03:00", 3)]
        );
    }

    #[tokio::test]
    async fn remove_out_of_bounds_is_a_no_op() {
        let mut form = ProfileForm::new(MemoryApi::default());
        form.input.mid_stage_temperatures = vec![point("01:00", 1)];

        form.remove_mid_stage(5);

        assert_eq!(form.input.mid_stage_temperatures, vec![point("01:00", 1)]);
    }

    #[tokio::test]
    async fn set_at_index_out_of_bounds_is_a_no_op() {
        let mut form = ProfileForm::new(MemoryApi::default());
        form.set_mid_stage_time(0, "04:00");
        form.set_mid_stage_temperature(0, 5);

        assert!(form.input.mid_stage_temperatures.is_empty());
    }

    #[tokio::test]
    async fn submit_round_trips_through_the_store() {
        let mut form = ProfileForm::new(MemoryApi::default());
        form.load().await.expect("load");

        form.input.initial_sleep_level = 0;
        form.input.final_sleep_level = 1;
        form.add_mid_stage();
        form.set_mid_stage_time(0, "02:00");
        form.set_mid_stage_temperature(0, -2);

        form.submit().await.expect("submit");
        assert!(!form.is_submitting);

        let mut reloaded = ProfileForm::new(form.api);
        reloaded.load().await.expect("reload");

        assert!(reloaded.is_existing_profile);
        assert_eq!(reloaded.input.bed_time, "22:00");
        assert_eq!(reloaded.input.wakeup_time, "06:00");
        assert_eq!(reloaded.input.initial_sleep_level, 0);
        assert_eq!(reloaded.input.final_sleep_level, 1);
        assert_eq!(
            reloaded.input.mid_stage_temperatures,
            vec![point("02:00", -2)]
        );
        assert_eq!(reloaded.input.timezone.value, "America/New_York");
    }

    #[tokio::test]
    async fn invalid_payload_blocks_submission() {
        let api = MemoryApi::default();
        let mut form = ProfileForm::new(api);
        form.input.initial_sleep_level = 11;

        let err = form.submit().await.unwrap_err();
        match err {
            FormError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "initialSleepLevel");
            }
            other => panic!("expected validation failure, got {}", other),
        }

        // Nothing was sent and nothing was stored
        assert_eq!(form.api.update_calls.load(Ordering::SeqCst), 0);
        assert!(form.api.stored.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn submit_label_reflects_in_flight_state() {
        let mut form = ProfileForm::new(MemoryApi::default());
        assert_eq!(form.submit_label(), "Save Profile");

        form.is_submitting = true;
        assert_eq!(form.submit_label(), "Saving...");
    }
}
