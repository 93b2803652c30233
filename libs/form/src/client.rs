//! Remote access to the profile service
//!
//! The form depends on [`ProfileApi`] rather than on a concrete transport, so
//! the remote client is a request-scoped dependency injected at construction
//! time instead of a process-wide singleton.

use async_trait::async_trait;
use common::profile::{ProfileInput, TemperatureProfile};
use thiserror::Error;
use tracing::error;

/// Errors surfaced by a remote profile call
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, decode)
    #[error("Profile request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the request
    #[error("Profile service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// The two remote operations the form controller depends on
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Fetch the caller's stored profile, or `None` on first-time setup
    async fn get_user_temperature_profile(
        &self,
    ) -> Result<Option<TemperatureProfile>, ClientError>;

    /// Create or replace the caller's profile with the submitted payload
    async fn update_user_temperature_profile(
        &self,
        input: &ProfileInput,
    ) -> Result<(), ClientError>;
}

/// HTTP implementation of [`ProfileApi`] against the profile service
#[derive(Clone)]
pub struct HttpProfileApi {
    http: reqwest::Client,
    base_url: String,
    email: String,
}

impl HttpProfileApi {
    /// Create a client bound to one service endpoint and one identity
    pub fn new(base_url: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
        }
    }

    async fn rejection(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());

        error!("Profile service returned {}: {}", status, message);
        ClientError::Rejected { status, message }
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn get_user_temperature_profile(
        &self,
    ) -> Result<Option<TemperatureProfile>, ClientError> {
        let response = self
            .http
            .get(format!("{}/profile", self.base_url))
            .header("x-user-email", &self.email)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        // Absence of a profile is a normal outcome and arrives as JSON null
        Ok(response.json::<Option<TemperatureProfile>>().await?)
    }

    async fn update_user_temperature_profile(
        &self,
        input: &ProfileInput,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .put(format!("{}/profile", self.base_url))
            .header("x-user-email", &self.email)
            .json(input)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(())
    }
}
