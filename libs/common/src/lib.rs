//! Common library for the temperature profile application
//!
//! This crate provides functionality shared between the profile service and
//! the form client: database connectivity, error handling, the profile wire
//! types, and the validation rules both sides apply to submitted payloads.

pub mod database;
pub mod error;
pub mod profile;
pub mod validation;
