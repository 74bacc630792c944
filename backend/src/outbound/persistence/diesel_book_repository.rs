//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.
//!
//! Filters compile to `ILIKE` predicates on the books table plus membership
//! sub-queries over the link tables, so a book matching through several
//! authors still appears once. Counting, slicing and loading relations for
//! the slice share one repeatable-read transaction.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{BookRepository, BookRepositoryError, BookSlice};
use crate::domain::{
    Author, Book, BookFilter, BookId, BookImage, BookOrdering, Category, ContentFormat, ImageRef,
    Language, OrderDirection, OrderField, Publisher, Translator,
};

use super::diesel_helpers::{
    collect_rows, map_basic_diesel_error, map_pool_error_message, non_negative,
};
use super::models::{
    AuthorRow, BookImageRow, BookRow, CategoryRow, ContentFormatRow, LanguageRow, PublisherRow,
    TranslatorRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    authors, book_authors, book_content_formats, book_images, book_languages, book_translators,
    books, categories, content_formats, languages, publishers, translators,
};

/// Diesel-backed implementation of the `BookRepository` port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookRepositoryError {
    BookRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> BookRepositoryError {
    map_basic_diesel_error(
        error,
        BookRepositoryError::query,
        BookRepositoryError::connection,
    )
}

/// Wrap `term` for a case-insensitive substring match, escaping `LIKE`
/// metacharacters so they match literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

type BoxedBooks = books::BoxedQuery<'static, Pg>;

/// Translate the filter into a boxed query over `books`.
fn filtered(filter: &BookFilter) -> BoxedBooks {
    let mut query = books::table.into_boxed();

    if let Some(term) = filter.search() {
        let pattern = contains_pattern(term);
        query = query.filter(
            books::name
                .ilike(pattern.clone())
                .or(books::id.eq_any(
                    book_authors::table
                        .inner_join(authors::table)
                        .filter(authors::name.ilike(pattern.clone()))
                        .select(book_authors::book_id),
                ))
                .or(books::id.eq_any(
                    book_translators::table
                        .inner_join(translators::table)
                        .filter(translators::name.ilike(pattern.clone()))
                        .select(book_translators::book_id),
                ))
                .or(books::publisher_id.eq_any(
                    publishers::table
                        .filter(publishers::name.ilike(pattern))
                        .select(publishers::id),
                )),
        );
    }
    if let Some(title) = filter.category() {
        query = query.filter(
            books::category_id.eq_any(
                categories::table
                    .filter(categories::title.ilike(contains_pattern(title)))
                    .select(categories::id),
            ),
        );
    }
    if let Some(name) = filter.author() {
        query = query.filter(
            books::id.eq_any(
                book_authors::table
                    .inner_join(authors::table)
                    .filter(authors::name.ilike(contains_pattern(name)))
                    .select(book_authors::book_id),
            ),
        );
    }
    if let Some(name) = filter.translator() {
        query = query.filter(
            books::id.eq_any(
                book_translators::table
                    .inner_join(translators::table)
                    .filter(translators::name.ilike(contains_pattern(name)))
                    .select(book_translators::book_id),
            ),
        );
    }
    if let Some(name) = filter.publisher() {
        query = query.filter(
            books::publisher_id.eq_any(
                publishers::table
                    .filter(publishers::name.ilike(contains_pattern(name)))
                    .select(publishers::id),
            ),
        );
    }
    if let Some(name) = filter.language() {
        query = query.filter(
            books::id.eq_any(
                book_languages::table
                    .inner_join(languages::table)
                    .filter(languages::name.ilike(contains_pattern(name)))
                    .select(book_languages::book_id),
            ),
        );
    }
    if let Some(name) = filter.formats() {
        query = query.filter(
            books::id.eq_any(
                book_content_formats::table
                    .inner_join(content_formats::table)
                    .filter(content_formats::name.ilike(contains_pattern(name)))
                    .select(book_content_formats::book_id),
            ),
        );
    }
    query
}

fn ordered(query: BoxedBooks, ordering: &BookOrdering) -> BoxedBooks {
    let query = match (ordering.field(), ordering.direction()) {
        (OrderField::Price, OrderDirection::Asc) => query.order_by(books::price.asc()),
        (OrderField::Price, OrderDirection::Desc) => query.order_by(books::price.desc()),
        (OrderField::DatetimeCreated, OrderDirection::Asc) => {
            query.order_by(books::datetime_created.asc())
        }
        (OrderField::DatetimeCreated, OrderDirection::Desc) => {
            query.order_by(books::datetime_created.desc())
        }
        (OrderField::DatetimeModified, OrderDirection::Asc) => {
            query.order_by(books::datetime_modified.asc())
        }
        (OrderField::DatetimeModified, OrderDirection::Desc) => {
            query.order_by(books::datetime_modified.desc())
        }
    };
    query.then_order_by(books::id.desc())
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// ---------------------------------------------------------------------------
// Relation loading
// ---------------------------------------------------------------------------

/// Relations for a set of books, keyed by book id or foreign key.
#[derive(Default)]
struct BookRelations {
    publishers: HashMap<i64, Publisher>,
    categories: HashMap<i64, Category>,
    authors: HashMap<i64, Vec<Author>>,
    translators: HashMap<i64, Vec<Translator>>,
    languages: HashMap<i64, Vec<Language>>,
    formats: HashMap<i64, Vec<ContentFormat>>,
    images: HashMap<i64, Vec<BookImage>>,
}

fn group_by_book<T>(rows: impl IntoIterator<Item = (i64, T)>) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for (book_id, value) in rows {
        grouped.entry(book_id).or_default().push(value);
    }
    grouped
}

/// Load every relation of `rows` with one query per relation.
async fn load_relations(
    conn: &mut AsyncPgConnection,
    rows: &[BookRow],
) -> QueryResult<BookRelations> {
    if rows.is_empty() {
        return Ok(BookRelations::default());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let publisher_ids: Vec<i64> = rows.iter().map(|row| row.publisher_id).collect();
    let category_ids: Vec<i64> = rows.iter().map(|row| row.category_id).collect();

    let publisher_rows: Vec<PublisherRow> = publishers::table
        .filter(publishers::id.eq_any(&publisher_ids))
        .select(PublisherRow::as_select())
        .load(conn)
        .await?;
    let category_rows: Vec<CategoryRow> = categories::table
        .filter(categories::id.eq_any(&category_ids))
        .select(CategoryRow::as_select())
        .load(conn)
        .await?;
    let author_rows: Vec<(i64, AuthorRow)> = book_authors::table
        .inner_join(authors::table)
        .filter(book_authors::book_id.eq_any(&ids))
        .select((book_authors::book_id, AuthorRow::as_select()))
        .order_by((book_authors::book_id, authors::name))
        .load(conn)
        .await?;
    let translator_rows: Vec<(i64, TranslatorRow)> = book_translators::table
        .inner_join(translators::table)
        .filter(book_translators::book_id.eq_any(&ids))
        .select((book_translators::book_id, TranslatorRow::as_select()))
        .order_by((book_translators::book_id, translators::name))
        .load(conn)
        .await?;
    let language_rows: Vec<(i64, LanguageRow)> = book_languages::table
        .inner_join(languages::table)
        .filter(book_languages::book_id.eq_any(&ids))
        .select((book_languages::book_id, LanguageRow::as_select()))
        .order_by((book_languages::book_id, languages::name))
        .load(conn)
        .await?;
    let format_rows: Vec<(i64, ContentFormatRow)> = book_content_formats::table
        .inner_join(content_formats::table)
        .filter(book_content_formats::book_id.eq_any(&ids))
        .select((book_content_formats::book_id, ContentFormatRow::as_select()))
        .order_by((book_content_formats::book_id, content_formats::name))
        .load(conn)
        .await?;
    let image_rows: Vec<BookImageRow> = book_images::table
        .filter(book_images::book_id.eq_any(&ids))
        .select(BookImageRow::as_select())
        .order_by(book_images::id)
        .load(conn)
        .await?;

    Ok(BookRelations {
        publishers: publisher_rows
            .into_iter()
            .map(|row| (row.id, row_to_publisher(row)))
            .collect(),
        categories: category_rows
            .into_iter()
            .map(|row| (row.id, row_to_category(row)))
            .collect(),
        authors: group_by_book(author_rows.into_iter().map(|(id, row)| (id, row_to_author(row)))),
        translators: group_by_book(
            translator_rows
                .into_iter()
                .map(|(id, row)| (id, row_to_translator(row))),
        ),
        languages: group_by_book(language_rows.into_iter().map(|(id, row)| {
            (
                id,
                Language {
                    id: row.id,
                    name: row.name,
                },
            )
        })),
        formats: group_by_book(format_rows.into_iter().map(|(id, row)| {
            (
                id,
                ContentFormat {
                    id: row.id,
                    name: row.name,
                },
            )
        })),
        images: group_by_book(
            image_rows
                .into_iter()
                .map(|row| (row.book_id, row_to_image(row))),
        ),
    })
}

/// Load `rows` with their relations and convert them to domain books.
async fn load_books(
    conn: &mut AsyncPgConnection,
    rows: Vec<BookRow>,
) -> QueryResult<Vec<Result<Book, String>>> {
    let mut relations = load_relations(conn, &rows).await?;
    Ok(rows
        .into_iter()
        .map(|row| row_to_book(row, &mut relations))
        .collect())
}

// ---------------------------------------------------------------------------
// Row-to-domain converters
// ---------------------------------------------------------------------------

fn row_to_author(row: AuthorRow) -> Author {
    Author {
        id: row.id,
        name: row.name,
        biography: row.biography,
        datetime_created: row.datetime_created,
    }
}

fn row_to_translator(row: TranslatorRow) -> Translator {
    Translator {
        id: row.id,
        name: row.name,
        about: row.about,
        datetime_created: row.datetime_created,
    }
}

fn row_to_publisher(row: PublisherRow) -> Publisher {
    Publisher {
        id: row.id,
        name: row.name,
        about: row.about,
        datetime_created: row.datetime_created,
    }
}

fn row_to_category(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        title: row.title,
        description: row.description,
    }
}

fn row_to_image(row: BookImageRow) -> BookImage {
    BookImage {
        id: row.id,
        book_id: BookId::new(row.book_id),
        image: ImageRef::from_optional(row.image),
        description: row.description,
    }
}

fn row_to_book(row: BookRow, relations: &mut BookRelations) -> Result<Book, String> {
    let publisher = relations
        .publishers
        .get(&row.publisher_id)
        .cloned()
        .ok_or_else(|| format!("book {} references missing publisher", row.id))?;
    let category = relations
        .categories
        .get(&row.category_id)
        .cloned()
        .ok_or_else(|| format!("book {} references missing category", row.id))?;
    let study_seconds: u64 = non_negative(row.approximate_study_time, "books.approximate_study_time")?;

    Ok(Book {
        id: BookId::new(row.id),
        name: row.name,
        description: row.description,
        cover_image: ImageRef::from_optional(row.cover_image),
        price: non_negative(row.price, "books.price")?,
        active: row.active,
        volume: non_negative(row.volume, "books.volume")?,
        number_of_pages: non_negative(row.number_of_pages, "books.number_of_pages")?,
        approximate_study_time: Duration::from_secs(study_seconds),
        publication_date: row.publication_date,
        datetime_created: row.datetime_created,
        datetime_modified: row.datetime_modified,
        authors: relations.authors.remove(&row.id).unwrap_or_default(),
        translators: relations.translators.remove(&row.id).unwrap_or_default(),
        publisher,
        category,
        languages: relations.languages.remove(&row.id).unwrap_or_default(),
        content_formats: relations.formats.remove(&row.id).unwrap_or_default(),
        images: relations.images.remove(&row.id).unwrap_or_default(),
    })
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn query_books(
        &self,
        filter: &BookFilter,
        ordering: &BookOrdering,
        offset: u64,
        limit: u64,
    ) -> Result<BookSlice, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (count, converted) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run(|conn| {
                async move {
                    let count: i64 = filtered(filter).count().get_result(conn).await?;
                    let rows: Vec<BookRow> = ordered(filtered(filter), ordering)
                        .select(BookRow::as_select())
                        .offset(to_sql_bound(offset))
                        .limit(to_sql_bound(limit))
                        .load(conn)
                        .await?;
                    let books = load_books(conn, rows).await?;
                    Ok::<_, diesel::result::Error>((count, books))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let books = collect_rows(converted.into_iter(), BookRepositoryError::query)?;
        let count = non_negative(count, "count(books)").map_err(BookRepositoryError::query)?;
        debug!(count, returned = books.len(), offset, "books queried");
        Ok(BookSlice { count, books })
    }

    async fn find_book(&self, book_id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let converted = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run(|conn| {
                async move {
                    let rows: Vec<BookRow> = books::table
                        .filter(books::id.eq(book_id.get()))
                        .select(BookRow::as_select())
                        .load(conn)
                        .await?;
                    load_books(conn, rows).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut books = collect_rows(converted.into_iter(), BookRepositoryError::query)?;
        Ok(books.pop())
    }

    async fn list_images(&self, book_id: BookId) -> Result<Vec<BookImage>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookImageRow> = book_images::table
            .filter(book_images::book_id.eq(book_id.get()))
            .select(BookImageRow::as_select())
            .order_by(book_images::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_image).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for query construction helpers; database behaviour is
    //! exercised by `tests/diesel_repositories.rs`.
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    #[case("tolkien", "%tolkien%")]
    #[case("100%", "%100\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn patterns_escape_like_metacharacters(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(term), expected);
    }

    #[rstest]
    fn oversized_bounds_saturate() {
        assert_eq!(to_sql_bound(u64::MAX), i64::MAX);
        assert_eq!(to_sql_bound(20), 20);
    }

    #[rstest]
    fn filtered_queries_use_membership_subqueries() {
        let filter = BookFilter::from_pairs([("author", "Austen"), ("search", "pride")]);
        let sql = diesel::debug_query::<Pg, _>(&filtered(&filter).select(books::id)).to_string();
        assert!(sql.contains("= ANY(SELECT"), "expected sub-select in {sql}");
        assert!(sql.contains(r#"FROM "books" WHERE"#), "outer query joined in {sql}");
        assert!(!sql.contains("LEFT OUTER JOIN"), "unexpected join in {sql}");
    }

    fn book_row() -> BookRow {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("timestamp");
        BookRow {
            id: 7,
            name: "Persuasion".to_owned(),
            description: String::new(),
            cover_image: Some(" ".to_owned()),
            price: 1500,
            active: true,
            volume: 3,
            number_of_pages: 250,
            approximate_study_time: 5400,
            publication_date: NaiveDate::from_ymd_opt(1817, 12, 20).expect("date"),
            datetime_created: created,
            datetime_modified: created,
            publisher_id: 1,
            category_id: 2,
        }
    }

    #[rstest]
    fn rows_without_their_publisher_are_rejected() {
        let mut relations = BookRelations::default();
        let error = row_to_book(book_row(), &mut relations).expect_err("missing publisher");
        assert_eq!(error, "book 7 references missing publisher");
    }

    #[rstest]
    fn rows_convert_with_their_relations() {
        let row = book_row();
        let mut relations = BookRelations::default();
        relations.publishers.insert(
            1,
            Publisher {
                id: 1,
                name: "Murray".to_owned(),
                about: String::new(),
                datetime_created: row.datetime_created,
            },
        );
        relations.categories.insert(
            2,
            Category {
                id: 2,
                title: "Novel".to_owned(),
                description: String::new(),
            },
        );

        let book = row_to_book(row, &mut relations).expect("book");
        assert_eq!(book.approximate_study_time, Duration::from_secs(5400));
        assert_eq!(book.cover_image, None);
        assert!(book.authors.is_empty());
        assert_eq!(book.publisher.name, "Murray");
    }
}
