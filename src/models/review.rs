use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stored review as read back for display. Append-only: nothing in this
/// system updates or deletes a review once written.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Review {
    pub user_name: String,
    pub review: String,
    pub ts_utc: DateTime<Utc>, // Captured at insert time
}

/// Review submission before it reaches the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_id: i64,
    pub user_name: String,
    pub review: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please write something before submitting")]
    EmptyReview,
}

impl NewReview {
    /// Trim the review text and reject submissions that are empty once
    /// trimmed. Runs before any store access. The user name is left exactly
    /// as entered; order matching is whitespace- and case-sensitive.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        let trimmed = self.review.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyReview);
        }
        self.review = trimmed.to_string();
        Ok(self)
    }
}
