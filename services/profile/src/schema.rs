//! Schema bootstrap for the profile store
//!
//! Three tables: `users` (owned by the account linkage flow, never mutated
//! here), `temperature_profiles` (one row per user, email is both primary
//! key and foreign key), and `mid_stage_temperatures` (variable-length child
//! set, cascade-deleted with its profile).

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

/// Create the profile store tables if they do not exist yet
pub async fn init_schema(pool: &PgPool) -> DatabaseResult<()> {
    let mut tx = pool.begin().await.map_err(DatabaseError::Schema)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            email                    VARCHAR(255) PRIMARY KEY,
            tracker_user_id          VARCHAR(255) NOT NULL,
            tracker_access_token     TEXT         NOT NULL,
            tracker_refresh_token    TEXT         NOT NULL,
            tracker_token_expires_at TIMESTAMPTZ  NOT NULL,
            created_at               TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
            updated_at               TIMESTAMPTZ  NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(&mut *tx)
    .await
    .map_err(DatabaseError::Schema)?;

    // mid_stage_time is a legacy single-point column kept for older rows;
    // the upsert path leaves it at its default
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS temperature_profiles (
            email               VARCHAR(255) PRIMARY KEY REFERENCES users(email),
            bed_time            TIME         NOT NULL,
            wakeup_time         TIME         NOT NULL,
            initial_sleep_level INTEGER      NOT NULL,
            mid_stage_time      TIME         NOT NULL DEFAULT '00:00',
            final_sleep_level   INTEGER      NOT NULL,
            timezone            VARCHAR(50)  NOT NULL,
            created_at          TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
            updated_at          TIMESTAMPTZ  NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(&mut *tx)
    .await
    .map_err(DatabaseError::Schema)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mid_stage_temperatures (
            id          SERIAL       PRIMARY KEY,
            email       VARCHAR(255) NOT NULL
                        REFERENCES temperature_profiles(email) ON DELETE CASCADE,
            time        TIME         NOT NULL,
            temperature INTEGER      NOT NULL,
            created_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
            updated_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(&mut *tx)
    .await
    .map_err(DatabaseError::Schema)?;

    tx.commit().await.map_err(DatabaseError::Schema)?;

    info!("Profile store schema is in place");
    Ok(())
}
