//! HTTP service for submitting feature requests and voting on them.
//!
//! The domain models and persistence live in [`votes_core`]; this crate adds
//! the JSON API and process configuration on top.

pub mod api;
pub mod config;

pub use votes_core::{db, models};
