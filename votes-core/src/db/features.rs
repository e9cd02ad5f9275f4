use rusqlite::{params, OptionalExtension, Row};

use super::{timestamp, Database, DbError};
use crate::models::{CreateFeatureInput, Feature};

const FEATURE_COLUMNS: &str = "id, title, description, created_by, created_at, vote_count";

fn feature_from_row(row: &Row<'_>) -> rusqlite::Result<Feature> {
    Ok(Feature {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_by: row.get(3)?,
        created_at: timestamp(row, 4)?,
        vote_count: row.get(5)?,
    })
}

impl Database {
    /// Validate and insert a new feature with a zero vote count.
    pub fn create_feature(&self, input: CreateFeatureInput) -> Result<Feature, DbError> {
        let input = input.normalized()?;
        let conn = self.lock()?;

        let feature = conn.query_row(
            &format!(
                "INSERT INTO features (title, description, created_by) VALUES (?1, ?2, ?3)
                 RETURNING {FEATURE_COLUMNS}"
            ),
            params![input.title, input.description, input.created_by],
            feature_from_row,
        )?;

        Ok(feature)
    }

    pub fn get_feature(&self, id: i64) -> Result<Option<Feature>, DbError> {
        let conn = self.lock()?;
        let feature = conn
            .query_row(
                &format!("SELECT {FEATURE_COLUMNS} FROM features WHERE id = ?1"),
                [id],
                feature_from_row,
            )
            .optional()?;
        Ok(feature)
    }

    /// All features, newest first. Features created within the same
    /// timestamp tick are ordered by descending id.
    pub fn get_all_features(&self) -> Result<Vec<Feature>, DbError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {FEATURE_COLUMNS} FROM features ORDER BY created_at DESC, id DESC"
        ))?;
        let features = stmt
            .query_map([], feature_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(features)
    }
}
