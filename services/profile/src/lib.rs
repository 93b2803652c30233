//! Profile service: durable storage and access for temperature profiles
//!
//! Exposes the store behind a small HTTP surface: fetch-by-user,
//! upsert-by-user, and delete-by-user, with the identity taken from the
//! request (see [`middleware`]).

pub mod error;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod state;
