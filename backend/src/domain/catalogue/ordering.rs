//! Allow-listed sort orders for book listings.

use std::cmp::Ordering;

use super::Book;

/// Query key carrying the ordering expression.
pub const ORDERING_PARAM: &str = "ordering";

/// Columns a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    /// Book price.
    Price,
    /// Creation timestamp.
    DatetimeCreated,
    /// Last modification timestamp.
    DatetimeModified,
}

impl OrderField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "price" => Some(Self::Price),
            "datetime_created" => Some(Self::DatetimeCreated),
            "datetime_modified" => Some(Self::DatetimeModified),
            _ => None,
        }
    }

    /// Field name as it appears in the query string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::DatetimeCreated => "datetime_created",
            Self::DatetimeModified => "datetime_modified",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Parsed `ordering` parameter.
///
/// Ties always break on book id descending so that page boundaries are
/// stable between requests.
///
/// # Examples
/// ```
/// use bookstore::domain::{BookOrdering, OrderDirection, OrderField};
///
/// let ordering = BookOrdering::parse(Some("price"));
/// assert_eq!(ordering.field(), OrderField::Price);
/// assert_eq!(ordering.direction(), OrderDirection::Asc);
/// assert_eq!(BookOrdering::parse(Some("name")), BookOrdering::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookOrdering {
    field: OrderField,
    direction: OrderDirection,
}

impl Default for BookOrdering {
    fn default() -> Self {
        Self {
            field: OrderField::DatetimeCreated,
            direction: OrderDirection::Desc,
        }
    }
}

impl BookOrdering {
    /// Build an ordering directly.
    pub const fn new(field: OrderField, direction: OrderDirection) -> Self {
        Self { field, direction }
    }

    /// Parse an optional raw value; absent or unrecognised values fall back
    /// to `-datetime_created`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Self::default();
        };
        let (direction, name) = match value.strip_prefix('-') {
            Some(rest) => (OrderDirection::Desc, rest),
            None => (OrderDirection::Asc, value),
        };
        OrderField::parse(name)
            .map(|field| Self::new(field, direction))
            .unwrap_or_default()
    }

    /// Primary sort column.
    pub const fn field(&self) -> OrderField {
        self.field
    }

    /// Primary sort direction.
    pub const fn direction(&self) -> OrderDirection {
        self.direction
    }

    /// Compare two books under this ordering with the id tie-break.
    pub fn compare(&self, left: &Book, right: &Book) -> Ordering {
        let primary = match self.field {
            OrderField::Price => left.price.cmp(&right.price),
            OrderField::DatetimeCreated => left.datetime_created.cmp(&right.datetime_created),
            OrderField::DatetimeModified => left.datetime_modified.cmp(&right.datetime_modified),
        };
        let primary = match self.direction {
            OrderDirection::Asc => primary,
            OrderDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| right.id.cmp(&left.id))
    }
}
