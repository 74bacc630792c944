//! Reader comments and their moderation status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, Username};

/// Validation errors for comment input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    /// The body was blank once trimmed.
    #[error("comment body must not be empty")]
    EmptyBody,
    /// A stored status code was not recognised.
    #[error("unknown comment status: {0}")]
    UnknownStatus(String),
}

/// Moderation state. Only approved comments are listed publicly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    /// Awaiting moderation.
    #[default]
    Waiting,
    /// Visible to everyone.
    Approved,
    /// Rejected by a moderator.
    NotApproved,
}

impl CommentStatus {
    /// Short code stored in the `status` column.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Waiting => "w",
            Self::Approved => "a",
            Self::NotApproved => "na",
        }
    }
}

impl FromStr for CommentStatus {
    type Err = CommentValidationError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "w" => Ok(Self::Waiting),
            "a" => Ok(Self::Approved),
            "na" => Ok(Self::NotApproved),
            other => Err(CommentValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Non-blank comment text, stored as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    /// Validate a submitted body.
    pub fn new(raw: impl Into<String>) -> Result<Self, CommentValidationError> {
        let body = raw.into();
        if body.trim().is_empty() {
            return Err(CommentValidationError::EmptyBody);
        }
        Ok(Self(body))
    }

    /// Text as stored.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored comment with its author's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Primary key.
    pub id: i64,
    /// Author's display name.
    pub username: Username,
    /// Commented book.
    pub book_id: BookId,
    /// Comment text.
    pub body: String,
    /// Moderation status.
    pub status: CommentStatus,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CommentStatus::Waiting, "w")]
    #[case(CommentStatus::Approved, "a")]
    #[case(CommentStatus::NotApproved, "na")]
    fn status_codes_are_stable(#[case] status: CommentStatus, #[case] code: &str) {
        assert_eq!(status.code(), code);
        assert_eq!(code.parse::<CommentStatus>(), Ok(status));
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "x".parse::<CommentStatus>(),
            Err(CommentValidationError::UnknownStatus("x".to_owned()))
        );
    }

    #[rstest]
    fn new_comments_wait_for_moderation() {
        assert_eq!(CommentStatus::default(), CommentStatus::Waiting);
    }

    #[rstest]
    #[case("")]
    #[case(" \n\t")]
    fn blank_bodies_are_rejected(#[case] raw: &str) {
        assert_eq!(CommentBody::new(raw), Err(CommentValidationError::EmptyBody));
    }
}
