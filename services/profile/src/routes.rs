//! Profile service routes

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use common::profile::ProfileInput;
use common::validation::validate_profile;
use serde_json::json;

use crate::{
    error::ApiError,
    middleware::{Identity, identity_middleware},
    state::AppState,
};

/// Create the router for the profile service
pub fn create_router(state: AppState) -> Router {
    let profile_routes = Router::new()
        .route(
            "/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route_layer(middleware::from_fn(identity_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(profile_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "profile-service"
    }))
}

/// Fetch the caller's temperature profile
///
/// Responds with JSON `null` when no profile exists yet; first-time setup is
/// not an error.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .profile_repository
        .get_by_email(&identity.email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load temperature profile: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(profile))
}

/// Create or replace the caller's temperature profile
///
/// The payload is re-validated here with the same rules the form applies;
/// client-side validation alone is not a security boundary.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ProfileInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_profile(&payload).map_err(ApiError::Validation)?;

    state
        .profile_repository
        .upsert(&identity.email, &payload)
        .await
        .map_err(map_store_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete the caller's temperature profile and its mid-stage points
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .profile_repository
        .delete(&identity.email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete temperature profile: {}", e);
            ApiError::InternalServerError
        })?;

    if deleted {
        Ok(Json(json!({"message": "Profile deleted successfully"})))
    } else {
        Err(ApiError::BadRequest("Profile not found".to_string()))
    }
}

/// Map a store failure to an API error
///
/// A foreign-key violation means the caller has no linked account row yet;
/// that is a caller problem, not a server fault.
fn map_store_error(e: anyhow::Error) -> ApiError {
    if let Some(db_error) = e
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
    {
        if db_error.code().as_deref() == Some("23503") {
            return ApiError::BadRequest("Not a registered user".to_string());
        }
    }

    tracing::error!("Failed to save temperature profile: {}", e);
    ApiError::InternalServerError
}
