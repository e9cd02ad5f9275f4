use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{required, ValidationError};

/// A proposed product feature that users can vote on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Number of recorded votes. Only ever incremented by the database layer.
    pub vote_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeatureInput {
    pub title: String,
    pub description: String,
    pub created_by: String,
}

impl CreateFeatureInput {
    /// Trims every field and rejects an empty title or description.
    ///
    /// `created_by` is trimmed but may end up empty.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        let title = required(&self.title, ValidationError::EmptyTitle)?;
        let description = required(&self.description, ValidationError::EmptyDescription)?;

        Ok(Self {
            title,
            description,
            created_by: self.created_by.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, description: &str, created_by: &str) -> CreateFeatureInput {
        CreateFeatureInput {
            title: title.into(),
            description: description.into(),
            created_by: created_by.into(),
        }
    }

    #[test]
    fn normalized_trims_all_fields() {
        let normalized = input("  Dark mode ", "\tA darker theme\n", "  alice  ")
            .normalized()
            .unwrap();

        assert_eq!(normalized.title, "Dark mode");
        assert_eq!(normalized.description, "A darker theme");
        assert_eq!(normalized.created_by, "alice");
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let err = input("   ", "desc", "alice").normalized().unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
    }

    #[test]
    fn empty_description_is_rejected() {
        let err = input("Title", "", "alice").normalized().unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);
    }

    #[test]
    fn title_is_checked_before_description() {
        let err = input("", "", "alice").normalized().unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
    }

    #[test]
    fn empty_created_by_is_accepted() {
        let normalized = input("Title", "desc", "   ").normalized().unwrap();
        assert_eq!(normalized.created_by, "");
    }

    #[test]
    fn created_at_serializes_as_rfc3339() {
        let feature = Feature {
            id: 1,
            title: "Title".into(),
            description: "desc".into(),
            created_by: "alice".into(),
            created_at: "2024-05-01T12:30:00Z".parse().unwrap(),
            vote_count: 0,
        };

        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["vote_count"], 0);
    }
}
