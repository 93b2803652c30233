//! Form controller for the nightly temperature profile
//!
//! This crate owns the client-side editable state for a temperature profile:
//! loading an existing profile, editing the dynamic mid-stage list, and
//! submitting the composed payload through an injected [`client::ProfileApi`]
//! implementation. The HTTP implementation talks to the profile service; test
//! code injects an in-memory double instead.

pub mod client;
pub mod form;

pub use client::{ClientError, HttpProfileApi, ProfileApi};
pub use form::{FormError, ProfileForm};
