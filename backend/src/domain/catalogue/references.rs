//! Reference entities linked from books.
//!
//! Each type serialises to the nested shape used in book records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Book author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Primary key.
    pub id: i64,
    /// Unique name.
    pub name: String,
    /// Short biography.
    pub biography: String,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
}

/// Book translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translator {
    /// Primary key.
    pub id: i64,
    /// Unique name.
    pub name: String,
    /// Short profile.
    pub about: String,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
}

/// Publishing house. Books reference it with delete protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// Primary key.
    pub id: i64,
    /// Unique name.
    pub name: String,
    /// Short profile.
    pub about: String,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
}

/// Catalogue category. Books reference it with delete protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Primary key.
    pub id: i64,
    /// Unique title.
    pub title: String,
    /// Description.
    pub description: String,
}

/// Language a book is available in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Primary key.
    pub id: i64,
    /// Unique name.
    pub name: String,
}

/// Delivery format such as PDF or audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFormat {
    /// Primary key.
    pub id: i64,
    /// Unique name.
    pub name: String,
}
