//! Profile repository for database operations

use anyhow::Result;
use chrono::NaiveTime;
use common::profile::{MidStagePoint, ProfileInput, TemperatureProfile, TimezoneSelection};
use sqlx::{PgPool, Row};
use tracing::info;

const TIME_FORMAT: &str = "%H:%M";

/// Profile repository
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user's profile with its mid-stage points
    ///
    /// Absence of a profile is a normal first-time-setup outcome and comes
    /// back as `Ok(None)`. Child rows are returned in surrogate-id order,
    /// which matches the order the client submitted them in.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<TemperatureProfile>> {
        let row = sqlx::query(
            r#"
            SELECT email, bed_time, wakeup_time, initial_sleep_level,
                   final_sleep_level, timezone, created_at, updated_at
            FROM temperature_profiles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let points = sqlx::query(
            r#"
            SELECT time, temperature
            FROM mid_stage_temperatures
            WHERE email = $1
            ORDER BY id
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        let mid_stage_temperatures = points
            .into_iter()
            .map(|point| MidStagePoint {
                time: format_time(point.get("time")),
                temperature: point.get("temperature"),
            })
            .collect();

        let profile = TemperatureProfile {
            email: row.get("email"),
            bed_time: format_time(row.get("bed_time")),
            wakeup_time: format_time(row.get("wakeup_time")),
            initial_sleep_level: row.get("initial_sleep_level"),
            mid_stage_temperatures,
            final_sleep_level: row.get("final_sleep_level"),
            timezone: TimezoneSelection::new(row.get::<String, _>("timezone")),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        };

        Ok(Some(profile))
    }

    /// Create or replace a user's profile and its mid-stage set
    ///
    /// Scalar fields go through an upsert keyed on the email, so a
    /// pre-existing profile is never an error. The child set is replaced
    /// wholesale inside the same transaction.
    pub async fn upsert(&self, email: &str, input: &ProfileInput) -> Result<()> {
        info!("Saving temperature profile for {}", email);

        let bed_time = parse_time(&input.bed_time)?;
        let wakeup_time = parse_time(&input.wakeup_time)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO temperature_profiles
                (email, bed_time, wakeup_time, initial_sleep_level,
                 final_sleep_level, timezone)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email) DO UPDATE SET
                bed_time = EXCLUDED.bed_time,
                wakeup_time = EXCLUDED.wakeup_time,
                initial_sleep_level = EXCLUDED.initial_sleep_level,
                final_sleep_level = EXCLUDED.final_sleep_level,
                timezone = EXCLUDED.timezone,
                updated_at = NOW()
            "#,
        )
        .bind(email)
        .bind(bed_time)
        .bind(wakeup_time)
        .bind(input.initial_sleep_level)
        .bind(input.final_sleep_level)
        .bind(&input.timezone.value)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM mid_stage_temperatures WHERE email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await?;

        for point in &input.mid_stage_temperatures {
            sqlx::query(
                r#"
                INSERT INTO mid_stage_temperatures (email, time, temperature)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(email)
            .bind(parse_time(&point.time)?)
            .bind(point.temperature)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Delete a user's profile; mid-stage rows go with it via the cascade
    pub async fn delete(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM temperature_profiles WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse_time(time: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map_err(|e| anyhow::anyhow!("Invalid time-of-day '{}': {}", time, e))
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
