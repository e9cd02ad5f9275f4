//! Core library for feature voting.
//!
//! This crate provides the domain models, input validation and database
//! operations for the voting service, independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use votes_core::db::Database;
//! use votes_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let feature = db.create_feature(CreateFeatureInput {
//!     title: "Dark mode".into(),
//!     description: "Add a dark theme".into(),
//!     created_by: "alice".into(),
//! })?;
//!
//! db.cast_vote(CreateVoteInput {
//!     feature_id: feature.id,
//!     voter_id: "bob".into(),
//! })?;
//! # Ok::<(), votes_core::db::DbError>(())
//! ```

pub mod db;
pub mod models;

// Re-export commonly used types at crate root
pub use db::{Database, DbError};
