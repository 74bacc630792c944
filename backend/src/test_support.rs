//! Builders shared by unit tests across the crate.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{
    Author, Book, BookId, Category, ContentFormat, Language, Publisher, Translator,
};

/// Timestamp `secs` seconds after 2024-01-01T00:00:00Z.
pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .map(|base| base + chrono::Duration::seconds(secs))
        .unwrap_or_default()
}

pub(crate) fn author(id: i64, name: &str) -> Author {
    Author {
        id,
        name: name.to_owned(),
        biography: String::new(),
        datetime_created: at(0),
    }
}

pub(crate) fn translator(id: i64, name: &str) -> Translator {
    Translator {
        id,
        name: name.to_owned(),
        about: String::new(),
        datetime_created: at(0),
    }
}

pub(crate) fn publisher(id: i64, name: &str) -> Publisher {
    Publisher {
        id,
        name: name.to_owned(),
        about: String::new(),
        datetime_created: at(0),
    }
}

pub(crate) fn category(id: i64, title: &str) -> Category {
    Category {
        id,
        title: title.to_owned(),
        description: String::new(),
    }
}

/// Minimal active book created `id` seconds after the base timestamp.
pub(crate) fn book(id: i64, name: &str) -> Book {
    Book {
        id: BookId::new(id),
        name: name.to_owned(),
        description: format!("About {name}"),
        cover_image: None,
        price: 1_000,
        active: true,
        volume: 5,
        number_of_pages: 200,
        approximate_study_time: Duration::from_secs(3_600),
        publication_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap_or_default(),
        datetime_created: at(id),
        datetime_modified: at(id),
        authors: vec![author(1, "Default Author")],
        translators: Vec::new(),
        publisher: publisher(1, "Default House"),
        category: category(1, "General"),
        languages: vec![Language {
            id: 1,
            name: "English".to_owned(),
        }],
        content_formats: vec![ContentFormat {
            id: 1,
            name: "PDF".to_owned(),
        }],
        images: Vec::new(),
    }
}

/// Page request as resolved under a policy whose default size is `default`.
pub(crate) fn page_request(page: u64, size: u32, default: u32) -> pagination::PageRequest {
    let policy = std::num::NonZeroU32::new(default)
        .zip(std::num::NonZeroU32::new(50))
        .and_then(|(default, max)| pagination::PageSizePolicy::new(default, max).ok())
        .unwrap_or_else(|| panic!("invalid test policy default {default}"));
    policy
        .resolve(Some(&page.to_string()), Some(&size.to_string()))
        .unwrap_or_else(|err| panic!("invalid test page {page}: {err}"))
}
