//! Book ratings and the per-row aggregates derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, User};

/// Lowest accepted score.
pub const SCORE_MIN: u8 = 1;
/// Highest accepted score.
pub const SCORE_MAX: u8 = 5;

/// Validation errors for rating scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingValidationError {
    /// Score fell outside the accepted range.
    #[error("score must be between {min} and {max} (got {value})")]
    ScoreOutOfRange {
        /// Rejected value.
        value: i64,
        /// Lowest accepted score.
        min: u8,
        /// Highest accepted score.
        max: u8,
    },
}

/// Rating score in `1..=5`.
///
/// # Examples
/// ```
/// use bookstore::domain::Score;
///
/// assert_eq!(Score::new(4).map(Score::get), Ok(4));
/// assert!(Score::new(0).is_err());
/// assert!(Score::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Validate a raw score.
    pub fn new(value: i64) -> Result<Self, RatingValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (SCORE_MIN..=SCORE_MAX).contains(v))
            .map(Self)
            .ok_or(RatingValidationError::ScoreOutOfRange {
                value,
                min: SCORE_MIN,
                max: SCORE_MAX,
            })
    }

    /// Raw score.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = RatingValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

/// Stored rating with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    /// Primary key.
    pub id: i64,
    /// Rating author.
    pub user: User,
    /// Rated book.
    pub book_id: BookId,
    /// Score given.
    pub score: Score,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
}

/// Rating statistics for one book as seen by one requester.
///
/// `avg_rating` is `None` when the book has no ratings; it is never reported
/// as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingAggregate {
    /// Mean score across all ratings.
    pub avg_rating: Option<f64>,
    /// Number of ratings.
    pub rating_count: u64,
    /// The requester's own score, if any.
    pub my_rating: Option<Score>,
}

/// Grouped statistics for one book before the requester's score is merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Mean score.
    pub avg_rating: f64,
    /// Number of ratings.
    pub rating_count: u64,
}

impl RatingSummary {
    /// Summarise a list of scores; `None` for an empty list.
    #[expect(
        clippy::float_arithmetic,
        reason = "the average of integer scores is fractional"
    )]
    pub fn from_scores(scores: impl IntoIterator<Item = Score>) -> Option<Self> {
        let (total, count) = scores
            .into_iter()
            .fold((0_u32, 0_u32), |(total, count), score| {
                (total + u32::from(score.get()), count + 1)
            });
        if count == 0 {
            return None;
        }
        Some(Self {
            avg_rating: f64::from(total) / f64::from(count),
            rating_count: u64::from(count),
        })
    }
}

impl RatingAggregate {
    /// Merge grouped statistics with the requester's own score.
    pub fn merge(summary: Option<RatingSummary>, my_rating: Option<Score>) -> Self {
        Self {
            avg_rating: summary.map(|s| s.avg_rating),
            rating_count: summary.map_or(0, |s| s.rating_count),
            my_rating,
        }
    }
}
