//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, update this file (or regenerate it with
//! `diesel print-schema`).

diesel::table! {
    /// Local copy of identity-provider accounts.
    users (id) {
        /// Primary key: UUID issued by the identity provider.
        id -> Uuid,
        /// Username shown on comments and ratings.
        username -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Book authors.
    authors (id) {
        id -> Int8,
        /// Unique author name.
        name -> Varchar,
        biography -> Text,
        datetime_created -> Timestamptz,
    }
}

diesel::table! {
    /// Book translators.
    translators (id) {
        id -> Int8,
        /// Unique translator name.
        name -> Varchar,
        about -> Text,
        datetime_created -> Timestamptz,
    }
}

diesel::table! {
    /// Publishing houses. Referenced by books with `ON DELETE RESTRICT`.
    publishers (id) {
        id -> Int8,
        /// Unique publisher name.
        name -> Varchar,
        about -> Text,
        datetime_created -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue categories. Referenced by books with `ON DELETE RESTRICT`.
    categories (id) {
        id -> Int8,
        /// Unique category title.
        title -> Varchar,
        description -> Text,
    }
}

diesel::table! {
    /// Languages books are available in.
    languages (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Content delivery formats.
    content_formats (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Catalogue books.
    books (id) {
        id -> Int8,
        /// Unique title.
        name -> Varchar,
        description -> Text,
        /// Blob key of the cover image.
        cover_image -> Nullable<Varchar>,
        /// Price in the smallest currency unit (non-negative).
        price -> Int8,
        active -> Bool,
        /// Download size in megabytes (positive).
        volume -> Int4,
        /// Page count (positive).
        number_of_pages -> Int4,
        /// Estimated reading time in whole seconds.
        approximate_study_time -> Int8,
        publication_date -> Date,
        datetime_created -> Timestamptz,
        datetime_modified -> Timestamptz,
        publisher_id -> Int8,
        category_id -> Int8,
    }
}

diesel::table! {
    /// Book to author links.
    book_authors (book_id, author_id) {
        book_id -> Int8,
        author_id -> Int8,
    }
}

diesel::table! {
    /// Book to translator links.
    book_translators (book_id, translator_id) {
        book_id -> Int8,
        translator_id -> Int8,
    }
}

diesel::table! {
    /// Book to language links.
    book_languages (book_id, language_id) {
        book_id -> Int8,
        language_id -> Int8,
    }
}

diesel::table! {
    /// Book to content format links.
    book_content_formats (book_id, content_format_id) {
        book_id -> Int8,
        content_format_id -> Int8,
    }
}

diesel::table! {
    /// Gallery images, deleted with their book.
    book_images (id) {
        id -> Int8,
        book_id -> Int8,
        /// Blob key of the uploaded image.
        image -> Nullable<Varchar>,
        description -> Text,
    }
}

diesel::table! {
    /// Reader comments with a moderation status code (`w`, `a`, `na`).
    comments (id) {
        id -> Int8,
        user_id -> Uuid,
        book_id -> Int8,
        body -> Text,
        status -> Varchar,
        datetime_created -> Timestamptz,
    }
}

diesel::table! {
    /// Favorites; `(user_id, book_id)` is unique.
    favorites (id) {
        id -> Int8,
        user_id -> Uuid,
        book_id -> Int8,
        datetime_created -> Timestamptz,
    }
}

diesel::table! {
    /// Ratings; `(user_id, book_id)` is unique and `score` lies in 1..=5.
    ratings (id) {
        id -> Int8,
        user_id -> Uuid,
        book_id -> Int8,
        score -> Int2,
        datetime_created -> Timestamptz,
    }
}

diesel::joinable!(books -> publishers (publisher_id));
diesel::joinable!(books -> categories (category_id));
diesel::joinable!(book_authors -> books (book_id));
diesel::joinable!(book_authors -> authors (author_id));
diesel::joinable!(book_translators -> books (book_id));
diesel::joinable!(book_translators -> translators (translator_id));
diesel::joinable!(book_languages -> books (book_id));
diesel::joinable!(book_languages -> languages (language_id));
diesel::joinable!(book_content_formats -> books (book_id));
diesel::joinable!(book_content_formats -> content_formats (content_format_id));
diesel::joinable!(book_images -> books (book_id));
diesel::joinable!(comments -> books (book_id));
diesel::joinable!(comments -> users (user_id));
diesel::joinable!(favorites -> books (book_id));
diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(ratings -> books (book_id));
diesel::joinable!(ratings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    authors,
    book_authors,
    book_content_formats,
    book_images,
    book_languages,
    book_translators,
    books,
    categories,
    comments,
    content_formats,
    favorites,
    languages,
    publishers,
    ratings,
    translators,
    users,
);
