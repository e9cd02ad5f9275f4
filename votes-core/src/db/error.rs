use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Feature not found: {0}")]
    FeatureNotFound(i64),

    #[error("Voter {voter_id} has already voted for feature {feature_id}")]
    DuplicateVote { feature_id: i64, voter_id: String },

    #[error("Unsupported database URL: {0}")]
    UnsupportedUrl(String),

    #[error("Could not determine a data directory for the default database")]
    NoDataDir,

    #[error("Database connection lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    constraint_code(err) == Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
}

pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    constraint_code(err) == Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

fn constraint_code(err: &rusqlite::Error) -> Option<std::os::raw::c_int> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
            Some(e.extended_code)
        }
        _ => None,
    }
}
