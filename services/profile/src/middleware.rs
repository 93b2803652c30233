//! Caller identity middleware
//!
//! Authentication proper is owned by an upstream gateway; by the time a
//! request reaches this service the authenticated email arrives in the
//! `x-user-email` header. The middleware validates its shape and injects an
//! [`Identity`] extension for the handlers.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use common::validation::validate_email;
use tracing::warn;

use crate::error::ApiError;

/// Header carrying the authenticated caller email
pub const IDENTITY_HEADER: &str = "x-user-email";

/// Authenticated caller information
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
}

/// Identity middleware
pub async fn identity_middleware(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let email = req
        .headers()
        .get(IDENTITY_HEADER)
        .and_then(|header| header.to_str().ok())
        .map(str::to_owned)
        .ok_or(ApiError::Unauthorized)?;

    if let Err(message) = validate_email(&email) {
        warn!("Rejected request with invalid identity header: {}", message);
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(Identity { email });

    Ok(next.run(req).await)
}
