use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("summary requires a practice title")]
    EmptyTitle,
}

/// Conclusion payload for a finished session: what was practiced and for
/// how long. This is the record handed to the navigation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    practice_title: String,
    elapsed: Duration,
    concluded_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Build a summary for a concluded session.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::EmptyTitle` when the title is blank.
    pub fn new(
        practice_title: impl Into<String>,
        elapsed: Duration,
        concluded_at: DateTime<Utc>,
    ) -> Result<Self, SessionSummaryError> {
        let practice_title = practice_title.into();
        if practice_title.trim().is_empty() {
            return Err(SessionSummaryError::EmptyTitle);
        }
        Ok(Self {
            practice_title,
            elapsed,
            concluded_at,
        })
    }

    #[must_use]
    pub fn practice_title(&self) -> &str {
        &self.practice_title
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn concluded_at(&self) -> DateTime<Utc> {
        self.concluded_at
    }
}
