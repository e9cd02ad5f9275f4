use rusqlite::{params, TransactionBehavior};

use super::error::{is_foreign_key_violation, is_unique_violation};
use super::{timestamp, Database, DbError};
use crate::models::{CreateVoteInput, Vote};

impl Database {
    /// Record a vote and bump the feature's vote count as one transaction.
    ///
    /// The feature must exist and the trimmed voter id must be non-empty,
    /// checked in that order. A second vote by the same voter on the same
    /// feature is rejected by the `UNIQUE (feature_id, voter_id)` constraint
    /// and surfaces as [`DbError::DuplicateVote`]. On any error the
    /// transaction is rolled back and the vote count is left untouched.
    pub fn cast_vote(&self, input: CreateVoteInput) -> Result<Vote, DbError> {
        let feature_id = input.feature_id;
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS (SELECT 1 FROM features WHERE id = ?1)",
            [feature_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(DbError::FeatureNotFound(feature_id));
        }

        let input = input.normalized()?;

        let vote = tx
            .query_row(
                "INSERT INTO votes (feature_id, voter_id) VALUES (?1, ?2)
                 RETURNING id, feature_id, voter_id, created_at",
                params![feature_id, input.voter_id],
                |row| {
                    Ok(Vote {
                        id: row.get(0)?,
                        feature_id: row.get(1)?,
                        voter_id: row.get(2)?,
                        created_at: timestamp(row, 3)?,
                    })
                },
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::DuplicateVote {
                        feature_id,
                        voter_id: input.voter_id.clone(),
                    }
                } else if is_foreign_key_violation(&e) {
                    DbError::FeatureNotFound(feature_id)
                } else {
                    e.into()
                }
            })?;

        let updated = tx.execute(
            "UPDATE features SET vote_count = vote_count + 1 WHERE id = ?1",
            [feature_id],
        )?;
        if updated == 0 {
            return Err(DbError::FeatureNotFound(feature_id));
        }

        tx.commit()?;
        Ok(vote)
    }

    /// Number of vote rows recorded for a feature.
    pub fn count_votes(&self, feature_id: i64) -> Result<i64, DbError> {
        let conn = self.lock()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM votes WHERE feature_id = ?1",
            [feature_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
