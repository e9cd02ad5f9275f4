use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{required, ValidationError};

/// A single voter's endorsement of one feature.
///
/// At most one vote exists per `(feature_id, voter_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub feature_id: i64,
    pub voter_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoteInput {
    pub feature_id: i64,
    pub voter_id: String,
}

impl CreateVoteInput {
    /// Trims `voter_id` and rejects it if nothing is left.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        Ok(Self {
            feature_id: self.feature_id,
            voter_id: required(&self.voter_id, ValidationError::EmptyVoterId)?,
        })
    }
}
