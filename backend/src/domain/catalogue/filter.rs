//! Book filter built from flat query parameters.
//!
//! Every recognised key narrows the result with a case-insensitive substring
//! match; keys combine with AND. Relationship keys (`author`, `translator`,
//! `language`, `formats`) match when *any* linked entity matches, and
//! adapters must express them as membership tests so a book never appears
//! twice.

use super::Book;

/// Query keys understood by [`BookFilter::from_pairs`].
pub const FILTER_KEYS: [&str; 7] = [
    "search",
    "category",
    "author",
    "translator",
    "publisher",
    "language",
    "formats",
];

/// Composed predicate over books.
///
/// # Examples
/// ```
/// use bookstore::domain::BookFilter;
///
/// let filter = BookFilter::from_pairs([("author", " Tolkien "), ("colour", "red"), ("category", "")]);
/// assert_eq!(filter.author(), Some("Tolkien"));
/// assert_eq!(filter.category(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    search: Option<String>,
    category: Option<String>,
    author: Option<String>,
    translator: Option<String>,
    publisher: Option<String>,
    language: Option<String>,
    formats: Option<String>,
}

impl BookFilter {
    /// Build a filter from query pairs.
    ///
    /// Unknown keys are ignored, blank values impose no constraint, and a
    /// repeated key keeps its last value.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self::default();
        for (key, raw) in pairs {
            let value = raw.trim();
            let slot = match key {
                "search" => &mut filter.search,
                "category" => &mut filter.category,
                "author" => &mut filter.author,
                "translator" => &mut filter.translator,
                "publisher" => &mut filter.publisher,
                "language" => &mut filter.language,
                "formats" => &mut filter.formats,
                _ => continue,
            };
            *slot = (!value.is_empty()).then(|| value.to_owned());
        }
        filter
    }

    /// Free-text term over name, authors, translators and publisher.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Category title term.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Author name term.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Translator name term.
    pub fn translator(&self) -> Option<&str> {
        self.translator.as_deref()
    }

    /// Publisher name term.
    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    /// Language name term.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Content format name term.
    pub fn formats(&self) -> Option<&str> {
        self.formats.as_deref()
    }

    /// Whether no key constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the predicate against a loaded book.
    pub fn matches(&self, book: &Book) -> bool {
        let search = self.search().is_none_or(|term| {
            contains(&book.name, term)
                || book.authors.iter().any(|a| contains(&a.name, term))
                || book.translators.iter().any(|t| contains(&t.name, term))
                || contains(&book.publisher.name, term)
        });
        search
            && self
                .category()
                .is_none_or(|term| contains(&book.category.title, term))
            && self
                .author()
                .is_none_or(|term| book.authors.iter().any(|a| contains(&a.name, term)))
            && self
                .translator()
                .is_none_or(|term| book.translators.iter().any(|t| contains(&t.name, term)))
            && self
                .publisher()
                .is_none_or(|term| contains(&book.publisher.name, term))
            && self
                .language()
                .is_none_or(|term| book.languages.iter().any(|l| contains(&l.name, term)))
            && self
                .formats()
                .is_none_or(|term| book.content_formats.iter().any(|f| contains(&f.name, term)))
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
